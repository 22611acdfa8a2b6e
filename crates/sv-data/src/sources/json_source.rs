use std::path::PathBuf;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sv_core::data::FeedSource;
use sv_core::{Feed, MediaRef, Owner, StoryCollection, StoryItem, StoryKind};
use tracing::{info, warn};

use crate::DataError;

/// A feed as delivered by the stories API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedDocument {
    #[serde(default)]
    pub owners: Vec<OwnerDocument>,
}

/// One owner's entry in a [`FeedDocument`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerDocument {
    pub id: String,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub stories: Vec<StoryDocument>,
}

/// One story as delivered by the API, before contract checks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryDocument {
    pub id: String,
    pub kind: StoryKind,

    #[serde(default)]
    pub text: Option<String>,

    #[serde(default)]
    pub media: Option<MediaRef>,

    pub created_at: DateTime<Utc>,
}

impl FeedDocument {
    /// Parse a document from JSON text
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert into a playable feed.
    ///
    /// Stories that break the media contract are dropped. Owners left
    /// without stories stay in place; playback skips them.
    pub fn into_feed(self) -> Feed {
        let collections = self
            .owners
            .into_iter()
            .map(|owner| {
                let items = owner
                    .stories
                    .into_iter()
                    .map(StoryDocument::into_item)
                    .filter(|item| {
                        let renderable = item.is_renderable();
                        if !renderable {
                            warn!(
                                "Dropping story '{}' of owner '{}': {:?} story without media",
                                item.id, owner.id, item.kind
                            );
                        }
                        renderable
                    })
                    .collect();

                let display_name = owner.display_name.unwrap_or_else(|| owner.id.clone());
                StoryCollection::new(Owner::new(owner.id, display_name), items)
            })
            .collect();

        Feed::new(collections)
    }
}

impl StoryDocument {
    fn into_item(self) -> StoryItem {
        StoryItem {
            id: self.id,
            kind: self.kind,
            text: self.text,
            media: self.media,
            created_at: self.created_at,
        }
    }
}

/// Feed stored as a JSON file
pub struct JsonFeedSource {
    path: PathBuf,
    name: String,
}

impl JsonFeedSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    /// Read and convert the file
    pub async fn read(&self) -> Result<Feed, DataError> {
        let json = tokio::fs::read_to_string(&self.path).await?;
        let feed = FeedDocument::from_json(&json)?.into_feed();
        info!(
            "Loaded feed from {}: {} owners, {} stories",
            self.name,
            feed.owner_count(),
            feed.total_items()
        );
        Ok(feed)
    }
}

#[async_trait]
impl FeedSource for JsonFeedSource {
    async fn load_feed(&self) -> anyhow::Result<Feed> {
        Ok(self.read().await?)
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "owners": [
            {
                "id": "alice",
                "display_name": "Alice",
                "stories": [
                    { "id": "a1", "kind": "image", "media": { "key": "a1.jpg" }, "created_at": "2024-05-01T08:00:00Z" },
                    { "id": "a2", "kind": "video", "created_at": "2024-05-01T09:00:00Z" },
                    { "id": "a3", "kind": "text", "text": "hello", "created_at": "2024-05-01T10:00:00Z" }
                ]
            },
            {
                "id": "bob",
                "stories": [
                    { "id": "b1", "kind": "video", "created_at": "2024-05-02T08:00:00Z" }
                ]
            },
            {
                "id": "carol",
                "display_name": "Carol",
                "stories": [
                    { "id": "c1", "kind": "text", "created_at": "2024-05-03T08:00:00Z" }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_document_conversion() {
        let feed = FeedDocument::from_json(SAMPLE).unwrap().into_feed();

        assert_eq!(feed.owner_count(), 3);
        let ids: Vec<_> = feed.collections[0].items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "a3"]);

        // bob's only story has no media, the owner stays but is empty
        assert!(feed.collections[1].is_empty());
        assert_eq!(feed.collections[1].owner.display_name, "bob");

        // empty text is still a renderable slide
        assert_eq!(feed.collections[2].items[0].text, None);
        assert_eq!(feed.total_items(), 3);
    }

    #[test]
    fn test_invalid_json_is_reported() {
        assert!(matches!(
            FeedDocument::from_json("{ \"owners\": 3 }"),
            Err(DataError::Json(_))
        ));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("sv-feed-{}.json", std::process::id()));
        tokio::fs::write(&path, SAMPLE).await.unwrap();

        let source = JsonFeedSource::new(&path);
        let feed = source.load_feed().await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(feed.total_items(), 3);
        assert!(source.source_name().ends_with(".json"));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let source = JsonFeedSource::new("/nonexistent/feed.json");
        assert!(matches!(source.read().await, Err(DataError::Io(_))));
    }
}
