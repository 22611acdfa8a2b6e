//! Feed suppliers, media resolution and settings files for the story viewer

pub mod config;
pub mod media;
pub mod sources;

use thiserror::Error;

// Re-exports
pub use config::{load_settings, parse_settings};
pub use media::BaseUrlResolver;
pub use sources::{FeedDocument, JsonFeedSource, StaticFeedSource};

/// Errors that can occur in data operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid media reference: {0}")]
    InvalidMedia(String),
}
