//! Playback subscriber trait

use crate::events::PlaybackEvent;
use crate::state::PlaybackSnapshot;

/// Trait for components that render or react to playback
pub trait PlaybackSubscriber: Send + Sync {
    /// Called after every state change, with the state as it now stands
    fn on_playback_event(&self, event: &PlaybackEvent, snapshot: &PlaybackSnapshot);
}

/// Subscriber backed by a closure
pub struct ClosureSubscriber<F> {
    handler: F,
}

impl<F> PlaybackSubscriber for ClosureSubscriber<F>
where
    F: Fn(&PlaybackEvent, &PlaybackSnapshot) + Send + Sync,
{
    fn on_playback_event(&self, event: &PlaybackEvent, snapshot: &PlaybackSnapshot) {
        (self.handler)(event, snapshot);
    }
}

/// Create a subscriber from a closure
pub fn subscriber_from_fn<F>(f: F) -> ClosureSubscriber<F>
where
    F: Fn(&PlaybackEvent, &PlaybackSnapshot) + Send + Sync + 'static,
{
    ClosureSubscriber { handler: f }
}
