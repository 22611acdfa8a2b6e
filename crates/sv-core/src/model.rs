//! Story data model
//!
//! A [`Feed`] is the ordered list of owners shown in one viewing session, each
//! owner carrying an ordered [`StoryCollection`]. Ordering is positional: the
//! upstream feed supplies items oldest first and the engine never re-sorts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::navigation::Position;

/// Identifier of a story item, unique within its owner's collection
pub type StoryId = String;

/// What a story item displays
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StoryKind {
    Image,
    Video,
    Text,
}

impl StoryKind {
    /// Whether items of this kind must carry a media reference
    pub fn requires_media(self) -> bool {
        matches!(self, StoryKind::Image | StoryKind::Video)
    }
}

/// Opaque reference to a media asset.
///
/// The engine only checks for presence; turning it into something playable
/// is the media resolver's job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaRef {
    /// Storage key or absolute URL
    pub key: String,

    /// Storage provider the key belongs to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

impl MediaRef {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            provider: None,
        }
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }
}

/// One piece of ephemeral content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoryItem {
    /// Unique identifier within the owner's collection
    pub id: StoryId,

    /// Content kind
    pub kind: StoryKind,

    /// Slide text for text items, optional caption otherwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Media reference for image and video items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaRef>,

    /// Creation time, display only
    pub created_at: DateTime<Utc>,
}

impl StoryItem {
    /// Create a text slide
    pub fn text(id: impl Into<StoryId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: StoryKind::Text,
            text: Some(text.into()),
            media: None,
            created_at: Utc::now(),
        }
    }

    /// Create an image slide
    pub fn image(id: impl Into<StoryId>, media: MediaRef) -> Self {
        Self::media_item(id, StoryKind::Image, media)
    }

    /// Create a video slide
    pub fn video(id: impl Into<StoryId>, media: MediaRef) -> Self {
        Self::media_item(id, StoryKind::Video, media)
    }

    fn media_item(id: impl Into<StoryId>, kind: StoryKind, media: MediaRef) -> Self {
        Self {
            id: id.into(),
            kind,
            text: None,
            media: Some(media),
            created_at: Utc::now(),
        }
    }

    /// Attach a caption
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.text = Some(caption.into());
        self
    }

    /// Whether the item satisfies the upstream data contract.
    ///
    /// Text items are always renderable (empty text is a blank slide);
    /// image and video items need a media reference.
    pub fn is_renderable(&self) -> bool {
        !self.kind.requires_media() || self.media.is_some()
    }
}

/// The user a collection belongs to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Owner {
    pub id: String,
    pub display_name: String,
}

impl Owner {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

/// All story items of one owner, oldest first
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoryCollection {
    pub owner: Owner,
    pub items: Vec<StoryItem>,
}

impl StoryCollection {
    pub fn new(owner: Owner, items: Vec<StoryItem>) -> Self {
        Self { owner, items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the last item, `None` for an empty collection
    pub fn last_index(&self) -> Option<usize> {
        self.items.len().checked_sub(1)
    }

    pub fn get(&self, index: usize) -> Option<&StoryItem> {
        self.items.get(index)
    }
}

/// Ordered owners presented for one viewing session
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Feed {
    pub collections: Vec<StoryCollection>,
}

impl Feed {
    pub fn new(collections: Vec<StoryCollection>) -> Self {
        Self { collections }
    }

    /// Number of owners, including owners without items
    pub fn owner_count(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    pub fn collection(&self, owner: usize) -> Option<&StoryCollection> {
        self.collections.get(owner)
    }

    /// Number of items the given owner has; zero for unknown owners
    pub fn items_in(&self, owner: usize) -> usize {
        self.collection(owner).map_or(0, StoryCollection::len)
    }

    /// Item at a position, if the position is valid
    pub fn item(&self, position: Position) -> Option<&StoryItem> {
        self.collection(position.owner)?.get(position.item)
    }

    /// Whether a position addresses an existing item
    pub fn contains(&self, position: Position) -> bool {
        position.item < self.items_in(position.owner)
    }

    /// Items across all owners
    pub fn total_items(&self) -> usize {
        self.collections.iter().map(StoryCollection::len).sum()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::feed_of;
    use super::*;

    #[test]
    fn test_feed_addressing() {
        let feed = feed_of(&[2, 0, 3]);

        assert_eq!(feed.owner_count(), 3);
        assert_eq!(feed.total_items(), 5);
        assert_eq!(feed.items_in(1), 0);
        assert_eq!(feed.items_in(7), 0);
        assert!(feed.contains(Position::new(2, 2)));
        assert!(!feed.contains(Position::new(1, 0)));
        assert!(!feed.contains(Position::new(3, 0)));
        assert_eq!(feed.item(Position::new(0, 1)).map(|i| i.id.as_str()), Some("0-1"));
        assert_eq!(feed.collection(2).and_then(StoryCollection::last_index), Some(2));
        assert_eq!(feed.collection(1).and_then(StoryCollection::last_index), None);
    }

    #[test]
    fn test_renderable_contract() {
        assert!(StoryItem::text("a", "").is_renderable());
        assert!(StoryItem::image("b", MediaRef::new("img/b.jpg")).is_renderable());

        let mut video = StoryItem::video("c", MediaRef::new("vid/c.mp4"));
        video.media = None;
        assert!(!video.is_renderable());
    }

    #[test]
    fn test_item_deserializes_from_feed_json() {
        let json = r#"{
            "id": "s1",
            "kind": "image",
            "media": { "key": "stories/s1.jpg", "provider": "s3" },
            "created_at": "2024-03-01T12:00:00Z"
        }"#;

        let item: StoryItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind, StoryKind::Image);
        assert_eq!(item.text, None);
        assert_eq!(
            item.media,
            Some(MediaRef::new("stories/s1.jpg").with_provider("s3"))
        );
    }
}
