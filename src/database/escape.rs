//! Reversible unicode escaping for submitted content.
//!
//! Stored content is plain ASCII: backslash, tab, newline and carriage return
//! use their short escapes, other control or non-ASCII characters use
//! `\xNN`, `\uNNNN` or `\UNNNNNNNN` depending on the code point width.

use std::fmt::Write;

pub fn escape_content(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            ' '..='~' => out.push(c),
            c if (c as u32) < 0x100 => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c if (c as u32) < 0x10000 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => {
                let _ = write!(out, "\\U{:08x}", c as u32);
            }
        }
    }
    out
}

/// Inverse of [`escape_content`]. Sequences that do not decode are kept verbatim.
pub fn unescape_content(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos + 1..];

        let (decoded, consumed) = match tail.chars().next() {
            Some('\\') => (Some('\\'), 1),
            Some('t') => (Some('\t'), 1),
            Some('n') => (Some('\n'), 1),
            Some('r') => (Some('\r'), 1),
            Some('x') => (decode_hex(tail, 2), 3),
            Some('u') => (decode_hex(tail, 4), 5),
            Some('U') => (decode_hex(tail, 8), 9),
            _ => (None, 0),
        };

        match decoded {
            Some(c) => {
                out.push(c);
                rest = &tail[consumed..];
            }
            None => {
                out.push('\\');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Reads `width` hex digits following the one-letter escape marker.
fn decode_hex(tail: &str, width: usize) -> Option<char> {
    let digits = tail.get(1..1 + width)?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok().and_then(char::from_u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_ascii_is_untouched() {
        assert_eq!(escape_content("hi there \"quoted\""), "hi there \"quoted\"");
    }

    #[test]
    fn escapes_controls_and_non_ascii() {
        assert_eq!(escape_content("a\nb\\c"), "a\\nb\\\\c");
        assert_eq!(escape_content("é"), "\\xe9");
        assert_eq!(escape_content("€"), "\\u20ac");
        assert_eq!(escape_content("🦀"), "\\U0001f980");
        assert_eq!(escape_content("\u{7}"), "\\x07");
    }

    #[test]
    fn decodes_what_it_encodes() {
        let original = "line one\nline two\t\\ café €5 🦀\r";
        let stored = escape_content(original);
        assert!(stored.is_ascii());
        assert_eq!(unescape_content(&stored), original);
    }

    #[test]
    fn malformed_sequences_survive() {
        assert_eq!(unescape_content("C:\\path"), "C:\\path");
        assert_eq!(unescape_content("bad \\xZZ"), "bad \\xZZ");
        assert_eq!(unescape_content("trailing \\"), "trailing \\");
        assert_eq!(unescape_content("short \\u12"), "short \\u12");
    }
}
