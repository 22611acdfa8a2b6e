//! Core functionality for the story viewer
//!
//! This crate provides the story data model, navigation over a feed of
//! owners and their stories, the per-item countdown and the playback state
//! machine that ties them together.

pub mod events;
pub mod model;
pub mod navigation;
pub mod playback;
pub mod scheduler;
pub mod state;

// Re-export commonly used types
pub use events::{NavigationCause, PlaybackEvent};
pub use model::{Feed, MediaRef, Owner, StoryCollection, StoryId, StoryItem, StoryKind};
pub use navigation::{Advance, Position};
pub use playback::{
    subscriber_from_fn, PlaybackDriver, PlaybackEngine, PlaybackSubscriber, SharedEngine,
};
pub use scheduler::{Countdown, Scheduler};
pub use state::{CloseReason, PlaybackSettings, PlaybackSnapshot, PlaybackState, PlaybackStatus};
pub use data::{FeedSource, MediaResolver};

/// Collaborators the viewer depends on, implemented in other crates
pub mod data {
    use crate::model::{Feed, MediaRef};

    /// Trait for feed suppliers
    #[async_trait::async_trait]
    pub trait FeedSource: Send + Sync {
        /// Load the feed for one viewing session
        async fn load_feed(&self) -> anyhow::Result<Feed>;

        /// Get the source name/path
        fn source_name(&self) -> &str;
    }

    /// Trait for turning media references into presentable URIs.
    ///
    /// The playback engine never calls this; presentation does.
    #[async_trait::async_trait]
    pub trait MediaResolver: Send + Sync {
        async fn resolve(&self, media: &MediaRef) -> anyhow::Result<String>;
    }
}
