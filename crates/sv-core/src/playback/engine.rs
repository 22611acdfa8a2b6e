//! Playback engine implementation

use std::sync::{Arc, Weak};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::PlaybackSubscriber;
use crate::events::{NavigationCause, PlaybackEvent};
use crate::model::{Feed, StoryCollection, StoryItem};
use crate::navigation::{self, Advance, Position};
use crate::scheduler::{Countdown, Scheduler};
use crate::state::{CloseReason, PlaybackSettings, PlaybackSnapshot, PlaybackState, PlaybackStatus};

/// The story playback state machine.
///
/// Owns the only writable [`PlaybackState`] of a viewing session. Every
/// operation is synchronous and infallible: bad input closes the viewer,
/// navigation past the end closes it, navigation before the start is ignored,
/// and once closed nothing changes any more.
///
/// Subscribers are notified synchronously from inside the call that changed
/// the state and must not call back into the engine.
pub struct PlaybackEngine<S: Scheduler = Countdown> {
    feed: Arc<Feed>,
    settings: PlaybackSettings,
    scheduler: S,
    status: PlaybackStatus,
    /// `None` only when the viewer never opened
    state: Option<PlaybackState>,
    subscribers: Vec<Weak<dyn PlaybackSubscriber>>,
}

impl PlaybackEngine<Countdown> {
    /// Open a viewer on `feed` at `initial`, timed by a [`Countdown`]
    pub fn open(feed: Arc<Feed>, initial: Position, settings: PlaybackSettings) -> Self {
        Self::with_scheduler(feed, initial, settings, Countdown::new())
    }
}

impl<S: Scheduler> PlaybackEngine<S> {
    /// Open a viewer with an injected scheduler.
    ///
    /// The initial position is resolved first; if nothing valid remains the
    /// engine starts out `Closed(NothingToShow)` and the scheduler never runs.
    pub fn with_scheduler(
        feed: Arc<Feed>,
        initial: Position,
        settings: PlaybackSettings,
        mut scheduler: S,
    ) -> Self {
        let settings = settings.sanitized();

        let (status, state) = match navigation::resolve_initial(&feed, initial) {
            Some(position) => {
                if position != initial {
                    debug!("Requested position {} is empty, opening at {}", initial, position);
                }
                info!(
                    "Opening story viewer at {} ({} owners, {} items)",
                    position,
                    feed.owner_count(),
                    feed.total_items()
                );
                scheduler.start(settings.item_duration());
                (PlaybackStatus::Playing, Some(PlaybackState::at(position)))
            }
            None => {
                warn!(
                    "Nothing to show at {} in a feed of {} owners, viewer stays closed",
                    initial,
                    feed.owner_count()
                );
                scheduler.cancel();
                (PlaybackStatus::Closed(CloseReason::NothingToShow), None)
            }
        };

        Self {
            feed,
            settings,
            scheduler,
            status,
            state,
            subscribers: Vec::new(),
        }
    }

    /// Report elapsed time from the tick source.
    ///
    /// Ignored unless playing. When the current item completes, playback
    /// moves on or closes at the end of the feed.
    pub fn tick(&mut self, delta: Duration) {
        if self.status != PlaybackStatus::Playing {
            return;
        }
        let Some(fraction) = self.scheduler.advance(delta) else {
            return;
        };

        if let Some(state) = self.state.as_mut() {
            state.progress = fraction;
        }
        self.notify(PlaybackEvent::Progress(fraction));

        if fraction >= 1.0 {
            if let Some(current) = self.active_position() {
                let step = navigation::advance(&self.feed, current);
                self.step_forward(step, NavigationCause::Timer);
            }
        }
    }

    /// Go to the next item, closing after the last one. Allowed while paused.
    pub fn next(&mut self) {
        if let Some(current) = self.active_position() {
            let step = navigation::advance(&self.feed, current);
            self.step_forward(step, NavigationCause::Next);
        }
    }

    /// Go to the previous item. A no-op at the very first item.
    pub fn previous(&mut self) {
        let Some(current) = self.active_position() else {
            return;
        };
        match navigation::retreat(&self.feed, current) {
            Some(target) => self.move_to(target, NavigationCause::Previous),
            None => debug!("Already at the first story, ignoring previous"),
        }
    }

    /// Jump to the next owner's first item, closing after the last owner
    pub fn next_owner(&mut self) {
        if let Some(current) = self.active_position() {
            let step = navigation::next_owner(&self.feed, current);
            self.step_forward(step, NavigationCause::NextOwner);
        }
    }

    /// Jump to the previous owner's first item. A no-op at the first owner.
    pub fn previous_owner(&mut self) {
        let Some(current) = self.active_position() else {
            return;
        };
        match navigation::previous_owner(&self.feed, current) {
            Some(target) => self.move_to(target, NavigationCause::PreviousOwner),
            None => debug!("Already at the first owner, ignoring previous owner"),
        }
    }

    /// Hold started: freeze progress
    pub fn pause(&mut self) {
        if self.status != PlaybackStatus::Playing {
            return;
        }
        self.status = PlaybackStatus::Paused;
        if let Some(state) = self.state.as_mut() {
            state.paused = true;
        }
        self.scheduler.pause();
        debug!("Playback paused at {:.3}", self.progress());
        self.notify(PlaybackEvent::Paused);
    }

    /// Hold released: continue from the frozen progress
    pub fn resume(&mut self) {
        if self.status != PlaybackStatus::Paused {
            return;
        }
        self.status = PlaybackStatus::Playing;
        if let Some(state) = self.state.as_mut() {
            state.paused = false;
        }
        self.scheduler.resume();
        debug!("Playback resumed at {:.3}", self.progress());
        self.notify(PlaybackEvent::Resumed);
    }

    /// Close the viewer. The scheduler is cancelled before this returns.
    pub fn close(&mut self) {
        if !self.status.is_closed() {
            self.enter_closed(CloseReason::Requested);
        }
    }

    /// Add a subscriber. The engine only keeps a weak reference, so the
    /// caller decides how long the subscriber lives.
    pub fn add_subscriber(&mut self, subscriber: Arc<dyn PlaybackSubscriber>) {
        if self.status.is_closed() {
            return;
        }
        self.subscribers.push(Arc::downgrade(&subscriber));
        if let Some(state) = self.state {
            subscriber.on_playback_event(&PlaybackEvent::Opened(state.position), &self.snapshot());
        }
    }

    /// Number of subscribers still alive
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.iter().filter(|weak| weak.strong_count() > 0).count()
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn state(&self) -> Option<&PlaybackState> {
        self.state.as_ref()
    }

    pub fn position(&self) -> Option<Position> {
        self.state.map(|state| state.position)
    }

    pub fn progress(&self) -> f64 {
        self.state.map_or(0.0, |state| state.progress)
    }

    pub fn is_paused(&self) -> bool {
        self.status == PlaybackStatus::Paused
    }

    pub fn is_closed(&self) -> bool {
        self.status.is_closed()
    }

    /// Item on screen, `None` once closed
    pub fn current_item(&self) -> Option<&StoryItem> {
        self.active_position().and_then(|position| self.feed.item(position))
    }

    /// Collection of the owner on screen, `None` once closed
    pub fn current_collection(&self) -> Option<&StoryCollection> {
        self.active_position()
            .and_then(|position| self.feed.collection(position.owner))
    }

    pub fn feed(&self) -> &Arc<Feed> {
        &self.feed
    }

    pub fn settings(&self) -> &PlaybackSettings {
        &self.settings
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Fill level of each progress bar of the current owner: full before the
    /// current item, the current progress at it, empty after it.
    pub fn progress_bars(&self) -> Vec<f64> {
        let Some(state) = self.state else {
            return Vec::new();
        };
        (0..self.feed.items_in(state.position.owner))
            .map(|item| {
                if item < state.position.item {
                    1.0
                } else if item == state.position.item {
                    state.progress
                } else {
                    0.0
                }
            })
            .collect()
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            status: self.status,
            position: self.position(),
            progress: self.progress(),
            paused: self.is_paused(),
            bars: self.progress_bars(),
        }
    }

    fn active_position(&self) -> Option<Position> {
        if self.status.is_closed() {
            return None;
        }
        self.position()
    }

    fn step_forward(&mut self, step: Advance, cause: NavigationCause) {
        match step {
            Advance::To(target) => self.move_to(target, cause),
            Advance::Exhausted => self.enter_closed(CloseReason::Exhausted),
        }
    }

    fn move_to(&mut self, target: Position, cause: NavigationCause) {
        let from = self.position().unwrap_or(target);
        self.state = Some(PlaybackState::at(target));
        self.status = PlaybackStatus::Playing;
        self.scheduler.reset(self.settings.item_duration());

        debug!("Story {} -> {} ({:?})", from, target, cause);
        self.notify(PlaybackEvent::PositionChanged {
            from,
            to: target,
            cause,
        });
    }

    fn enter_closed(&mut self, reason: CloseReason) {
        self.status = PlaybackStatus::Closed(reason);
        self.scheduler.cancel();
        if let Some(state) = self.state.as_mut() {
            state.paused = false;
        }

        info!("Story viewer closed ({:?})", reason);
        self.notify(PlaybackEvent::Closed(reason));
        self.subscribers.clear();
    }

    /// Notify all subscribers of a state change
    fn notify(&mut self, event: PlaybackEvent) {
        // Remove any dead weak references
        self.subscribers.retain(|weak| weak.strong_count() > 0);
        if self.subscribers.is_empty() {
            return;
        }

        let snapshot = self.snapshot();
        for weak in &self.subscribers {
            if let Some(subscriber) = weak.upgrade() {
                subscriber.on_playback_event(&event, &snapshot);
            }
        }
    }
}
