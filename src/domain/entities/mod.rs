//! Domain entities

pub mod context;
pub mod tweet;

pub use context::TweetContext;
pub use tweet::{Media, MediaKind, Tweet, TweetAuthor, TweetMedia};
