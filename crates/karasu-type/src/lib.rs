//! Serde definitions of the payloads returned by the pre-v2 search endpoints
//!
//! The structures only bind the fields the client actually consumes.
//! Everything else in the payload is simply ignored during deserialisation.

pub mod search;
pub mod tweet;
pub mod user;

pub use self::search::SearchResponse;
pub use self::tweet::Tweet;
pub use self::user::User;
