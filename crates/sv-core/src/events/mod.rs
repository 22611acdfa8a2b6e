//! Events emitted by the playback engine

use serde::{Deserialize, Serialize};

use crate::navigation::Position;
use crate::state::CloseReason;

/// What triggered a position change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationCause {
    /// The current item ran its full duration
    Timer,
    /// Tap on the right side
    Next,
    /// Tap on the left side
    Previous,
    /// Swipe to the next owner
    NextOwner,
    /// Swipe to the previous owner
    PreviousOwner,
}

/// Notifications delivered to playback subscribers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Playback started at this position
    Opened(Position),

    /// A new item became current; progress restarts at zero
    PositionChanged {
        from: Position,
        to: Position,
        cause: NavigationCause,
    },

    /// Progress of the current item moved
    Progress(f64),

    /// Hold started
    Paused,

    /// Hold released
    Resumed,

    /// The session ended; no further events follow
    Closed(CloseReason),
}

impl PlaybackEvent {
    /// Whether this event ends the session
    pub fn is_terminal(&self) -> bool {
        matches!(self, PlaybackEvent::Closed(_))
    }
}
