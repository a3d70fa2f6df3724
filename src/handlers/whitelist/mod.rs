// Allow-lists queried for existence only. Nothing here cross-checks user records.

pub mod subreddit;
pub mod user;
pub mod usersubreddit;

use serde::Serialize;

/// Body of a successful single-entry lookup
#[derive(Debug, Serialize)]
pub struct Whitelisted {
    pub whitelisted: bool,
}

impl Whitelisted {
    pub const YES: Whitelisted = Whitelisted { whitelisted: true };
}
