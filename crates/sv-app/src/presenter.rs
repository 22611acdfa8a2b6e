//! Terminal rendering of the story viewer

use std::io::Write;
use std::sync::Arc;
use sv_core::{Feed, PlaybackEvent, PlaybackSnapshot, PlaybackSubscriber, Position, StoryItem, StoryKind};
use sv_data::BaseUrlResolver;
use tracing::warn;

const BAR_WIDTH: usize = 10;

/// Draws the current story and its progress bars on stdout
pub struct TerminalPresenter {
    feed: Arc<Feed>,
    resolver: BaseUrlResolver,
}

impl TerminalPresenter {
    pub fn new(feed: Arc<Feed>, resolver: BaseUrlResolver) -> Self {
        Self { feed, resolver }
    }

    fn describe(&self, item: &StoryItem) -> String {
        let caption = item.text.as_deref().unwrap_or_default();
        match (item.kind, &item.media) {
            (StoryKind::Text, _) => format!("[text] {}", caption),
            (kind, Some(media)) => match self.resolver.resolve_ref(media) {
                Ok(uri) => format!("[{:?}] {} {}", kind, uri, caption),
                Err(e) => {
                    warn!("Failed to resolve media of story '{}': {}", item.id, e);
                    format!("[{:?}] <unavailable> {}", kind, caption)
                }
            },
            (kind, None) => format!("[{:?}] <no media> {}", kind, caption),
        }
    }

    fn show_item(&self, position: Position) {
        let Some(collection) = self.feed.collection(position.owner) else {
            return;
        };
        let Some(item) = collection.get(position.item) else {
            return;
        };
        println!();
        println!(
            "{} ({}/{}) {}",
            collection.owner.display_name,
            position.item + 1,
            collection.len(),
            item.created_at.format("%Y-%m-%d %H:%M")
        );
        println!("{}", self.describe(item));
    }
}

impl PlaybackSubscriber for TerminalPresenter {
    fn on_playback_event(&self, event: &PlaybackEvent, snapshot: &PlaybackSnapshot) {
        match event {
            PlaybackEvent::Opened(position) => self.show_item(*position),
            PlaybackEvent::PositionChanged { to, .. } => self.show_item(*to),
            PlaybackEvent::Progress(_) => {}
            PlaybackEvent::Paused => {
                println!();
                println!("(held)");
            }
            PlaybackEvent::Resumed => {}
            PlaybackEvent::Closed(reason) => {
                println!();
                println!("Viewer closed ({:?})", reason);
                return;
            }
        }

        print!("\r{}", render_bars(&snapshot.bars));
        let _ = std::io::stdout().flush();
    }
}

/// One text bar per story of the current owner
pub fn render_bars(bars: &[f64]) -> String {
    bars.iter()
        .map(|fill| {
            let filled = (fill.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
            format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_bars() {
        assert_eq!(render_bars(&[]), "");
        assert_eq!(
            render_bars(&[1.0, 0.5, 0.0]),
            "########## #####----- ----------"
        );
        assert_eq!(render_bars(&[1.7]), "##########");
    }

    #[test]
    fn test_describe_resolves_media() {
        let presenter = TerminalPresenter::new(
            Arc::new(Feed::default()),
            BaseUrlResolver::new("https://cdn.example.com"),
        );
        let item = StoryItem::image("s1", sv_core::MediaRef::new("a.jpg")).with_caption("beach");
        assert_eq!(
            presenter.describe(&item),
            "[Image] https://cdn.example.com/a.jpg beach"
        );
        assert_eq!(presenter.describe(&StoryItem::text("s2", "hi")), "[text] hi");
    }
}
