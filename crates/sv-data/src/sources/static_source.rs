use async_trait::async_trait;
use sv_core::data::FeedSource;
use sv_core::Feed;

/// Feed held in memory
pub struct StaticFeedSource {
    name: String,
    feed: Feed,
}

impl StaticFeedSource {
    pub fn new(name: impl Into<String>, feed: Feed) -> Self {
        Self {
            name: name.into(),
            feed,
        }
    }
}

#[async_trait]
impl FeedSource for StaticFeedSource {
    async fn load_feed(&self) -> anyhow::Result<Feed> {
        Ok(self.feed.clone())
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sv_core::{Owner, StoryCollection, StoryItem};

    #[tokio::test]
    async fn test_static_source_returns_its_feed() {
        let feed = Feed::new(vec![StoryCollection::new(
            Owner::new("u1", "User One"),
            vec![StoryItem::text("s1", "hi")],
        )]);
        let source = StaticFeedSource::new("demo", feed.clone());

        assert_eq!(source.load_feed().await.unwrap(), feed);
        assert_eq!(source.source_name(), "demo");
    }
}
