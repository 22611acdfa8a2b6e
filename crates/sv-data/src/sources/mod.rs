pub mod json_source;
pub mod static_source;

pub use json_source::{FeedDocument, JsonFeedSource, OwnerDocument, StoryDocument};
pub use static_source::StaticFeedSource;
