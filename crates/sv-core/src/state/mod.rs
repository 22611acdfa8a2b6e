//! Playback state and viewer settings

use std::time::Duration;
use serde::{Deserialize, Serialize};

use crate::navigation::Position;

/// Tick interval of the reference viewer
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 50;

/// Display time of every story item, whatever its kind
pub const DEFAULT_ITEM_DURATION_MS: u64 = 7_000;

pub const MIN_TICK_INTERVAL_MS: u64 = 10;
pub const MIN_ITEM_DURATION_MS: u64 = 500;
pub const MAX_ITEM_DURATION_MS: u64 = 60_000;

/// Why a viewer closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloseReason {
    /// The last item finished or navigation ran past it
    Exhausted,
    /// The viewer was closed explicitly
    Requested,
    /// The feed or the initial position had nothing valid to show
    NothingToShow,
}

/// Lifecycle of a playback session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackStatus {
    Playing,
    Paused,
    /// Terminal
    Closed(CloseReason),
}

impl PlaybackStatus {
    pub fn is_closed(self) -> bool {
        matches!(self, PlaybackStatus::Closed(_))
    }
}

/// Where playback is and how far the current item has run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Item on screen
    pub position: Position,

    /// Progress of the current item in `[0, 1]`
    pub progress: f64,

    /// Whether the viewer is being held
    pub paused: bool,
}

impl PlaybackState {
    /// Fresh state at a position
    pub fn at(position: Position) -> Self {
        Self {
            position,
            progress: 0.0,
            paused: false,
        }
    }
}

/// What observers see of the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    pub status: PlaybackStatus,

    /// `None` only when the viewer never opened
    pub position: Option<Position>,

    pub progress: f64,

    pub paused: bool,

    /// Fill level of each progress bar of the current owner
    pub bars: Vec<f64>,
}

/// Viewer timing settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// How long each item stays on screen
    pub item_duration_ms: u64,

    /// How often the tick source reports elapsed time
    pub tick_interval_ms: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            item_duration_ms: DEFAULT_ITEM_DURATION_MS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl PlaybackSettings {
    /// Settings with values clamped to usable bounds.
    ///
    /// The tick interval never exceeds the item duration.
    pub fn sanitized(&self) -> Self {
        let item_duration_ms = self
            .item_duration_ms
            .clamp(MIN_ITEM_DURATION_MS, MAX_ITEM_DURATION_MS);
        let tick_interval_ms = self
            .tick_interval_ms
            .clamp(MIN_TICK_INTERVAL_MS, item_duration_ms);

        Self {
            item_duration_ms,
            tick_interval_ms,
        }
    }

    pub fn item_duration(&self) -> Duration {
        Duration::from_millis(self.item_duration_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = PlaybackSettings::default();
        assert_eq!(settings.item_duration(), Duration::from_millis(7_000));
        assert_eq!(settings.tick_interval(), Duration::from_millis(50));
        assert_eq!(settings.sanitized(), settings);
    }

    #[test]
    fn test_sanitized_clamps() {
        let settings = PlaybackSettings {
            item_duration_ms: 10,
            tick_interval_ms: 0,
        }
        .sanitized();
        assert_eq!(settings.item_duration_ms, MIN_ITEM_DURATION_MS);
        assert_eq!(settings.tick_interval_ms, MIN_TICK_INTERVAL_MS);

        let settings = PlaybackSettings {
            item_duration_ms: 1_000,
            tick_interval_ms: 5_000,
        }
        .sanitized();
        assert_eq!(settings.tick_interval_ms, 1_000);
    }

    #[test]
    fn test_partial_settings_take_defaults() {
        let settings: PlaybackSettings =
            serde_json::from_str(r#"{ "item_duration_ms": 5000 }"#).unwrap();
        assert_eq!(settings.item_duration_ms, 5_000);
        assert_eq!(settings.tick_interval_ms, DEFAULT_TICK_INTERVAL_MS);
    }
}
