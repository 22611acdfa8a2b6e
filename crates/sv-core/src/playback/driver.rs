//! Real-time tick source for a shared playback engine

use std::sync::Arc;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::PlaybackEngine;
use crate::scheduler::{Countdown, Scheduler};

/// Engine shared between the tick task and the presentation layer
pub type SharedEngine<S = Countdown> = Arc<Mutex<PlaybackEngine<S>>>;

/// Drives a [`SharedEngine`] from a tokio interval.
///
/// Every tick locks the engine, so ticks and gestures issued through the same
/// mutex never interleave. The task ends on its own once the engine closes;
/// dropping the driver aborts it.
pub struct PlaybackDriver {
    handle: Option<JoinHandle<()>>,
}

impl PlaybackDriver {
    /// Start ticking at the engine's configured interval.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<S: Scheduler + 'static>(engine: SharedEngine<S>) -> Self {
        let interval = engine.lock().settings().tick_interval();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let mut guard = engine.lock();
                guard.tick(interval);
                if guard.is_closed() {
                    break;
                }
            }
            debug!("Playback driver stopped");
        });

        Self {
            handle: Some(handle),
        }
    }

    /// Stop ticking now
    pub fn stop(&self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait until the engine closes or the driver is stopped
    pub async fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            // Cancellation through `stop` is a normal way to end
            let _ = handle.await;
        }
    }
}

impl Drop for PlaybackDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::feed_of;
    use crate::navigation::Position;
    use crate::state::{CloseReason, PlaybackSettings, PlaybackStatus};
    use std::time::Duration;

    fn shared(sizes: &[usize]) -> SharedEngine {
        Arc::new(Mutex::new(PlaybackEngine::open(
            Arc::new(feed_of(sizes)),
            Position::origin(),
            PlaybackSettings::default(),
        )))
    }

    #[tokio::test(start_paused = true)]
    async fn test_driver_plays_feed_to_the_end() {
        let engine = shared(&[2, 1]);
        let started = tokio::time::Instant::now();

        PlaybackDriver::spawn(engine.clone()).join().await;

        assert_eq!(engine.lock().status(), PlaybackStatus::Closed(CloseReason::Exhausted));
        assert!(started.elapsed() >= Duration::from_millis(21_000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_driver_respects_hold() {
        let engine = shared(&[1]);
        let driver = PlaybackDriver::spawn(engine.clone());

        tokio::time::sleep(Duration::from_millis(1_000)).await;
        engine.lock().pause();
        let frozen = engine.lock().progress();

        tokio::time::sleep(Duration::from_millis(20_000)).await;
        assert_eq!(engine.lock().progress(), frozen);
        assert!(!driver.is_finished());

        engine.lock().resume();
        driver.join().await;
        assert_eq!(engine.lock().status(), PlaybackStatus::Closed(CloseReason::Exhausted));
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_ends_driver() {
        let engine = shared(&[3]);
        let driver = PlaybackDriver::spawn(engine.clone());

        tokio::time::sleep(Duration::from_millis(500)).await;
        engine.lock().close();
        driver.join().await;

        assert_eq!(engine.lock().status(), PlaybackStatus::Closed(CloseReason::Requested));
        assert_eq!(engine.lock().position(), Some(Position::origin()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_aborts_ticking() {
        let engine = shared(&[1]);
        let driver = PlaybackDriver::spawn(engine.clone());

        driver.stop();
        driver.join().await;
        tokio::time::sleep(Duration::from_millis(10_000)).await;

        assert_eq!(engine.lock().status(), PlaybackStatus::Playing);
        assert_eq!(engine.lock().progress(), 0.0);
    }
}
