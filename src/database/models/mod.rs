pub mod user;
pub mod whitelist;

pub use user::UserRecord;
pub use whitelist::{SubredditWhitelistEntry, UserSubredditWhitelistEntry, UserWhitelistEntry};
