//! Story playback: the state machine, its subscribers and its tick driver

mod driver;
mod engine;
mod subscriber;

pub use driver::{PlaybackDriver, SharedEngine};
pub use engine::PlaybackEngine;
pub use subscriber::{subscriber_from_fn, ClosureSubscriber, PlaybackSubscriber};
