//! Per-item countdown
//!
//! A [`Scheduler`] accumulates the time reported by a tick source and turns it
//! into the progress fraction of the current item. The tick source itself
//! lives outside: a tokio interval in the viewer, explicit calls in tests.

use std::time::Duration;

/// Capability the playback engine uses to time the current item
pub trait Scheduler: Send {
    /// Begin counting from zero
    fn start(&mut self, duration: Duration);

    /// Freeze the countdown, keeping the elapsed time
    fn pause(&mut self);

    /// Continue from the frozen elapsed time
    fn resume(&mut self);

    /// Drop the running countdown and begin a fresh one at zero
    fn reset(&mut self, duration: Duration);

    /// Stop for good
    fn cancel(&mut self);

    /// Report elapsed time from the tick source.
    ///
    /// Returns the cumulative fraction `elapsed / duration` clamped to
    /// `[0, 1]` while running, `None` otherwise.
    fn advance(&mut self, delta: Duration) -> Option<f64>;

    /// Current fraction, running or not
    fn fraction(&self) -> f64;

    fn is_running(&self) -> bool;

    fn is_cancelled(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CountdownState {
    Idle,
    Running,
    Paused,
    Cancelled,
}

/// Default [`Scheduler`]
#[derive(Debug, Clone)]
pub struct Countdown {
    duration: Duration,
    elapsed: Duration,
    state: CountdownState,
}

impl Countdown {
    pub fn new() -> Self {
        Self {
            duration: Duration::ZERO,
            elapsed: Duration::ZERO,
            state: CountdownState::Idle,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_paused(&self) -> bool {
        self.state == CountdownState::Paused
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for Countdown {
    fn start(&mut self, duration: Duration) {
        if self.state == CountdownState::Cancelled {
            return;
        }
        self.duration = duration;
        self.elapsed = Duration::ZERO;
        self.state = CountdownState::Running;
    }

    fn pause(&mut self) {
        if self.state == CountdownState::Running {
            self.state = CountdownState::Paused;
        }
    }

    fn resume(&mut self) {
        if self.state == CountdownState::Paused {
            self.state = CountdownState::Running;
        }
    }

    fn reset(&mut self, duration: Duration) {
        self.start(duration);
    }

    fn cancel(&mut self) {
        self.state = CountdownState::Cancelled;
    }

    fn advance(&mut self, delta: Duration) -> Option<f64> {
        if self.state != CountdownState::Running {
            return None;
        }
        self.elapsed = self.elapsed.saturating_add(delta).min(self.duration);
        Some(self.fraction())
    }

    fn fraction(&self) -> f64 {
        if self.duration.is_zero() {
            return if self.state == CountdownState::Idle { 0.0 } else { 1.0 };
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    fn is_running(&self) -> bool {
        self.state == CountdownState::Running
    }

    fn is_cancelled(&self) -> bool {
        self.state == CountdownState::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEVEN_SECONDS: Duration = Duration::from_millis(7_000);
    const TICK: Duration = Duration::from_millis(50);

    #[test]
    fn test_idle_countdown_does_not_tick() {
        let mut countdown = Countdown::new();
        assert_eq!(countdown.advance(TICK), None);
        assert_eq!(countdown.fraction(), 0.0);
    }

    #[test]
    fn test_fraction_accumulates_and_clamps() {
        let mut countdown = Countdown::new();
        countdown.start(Duration::from_millis(200));

        assert_eq!(countdown.advance(TICK), Some(0.25));
        assert_eq!(countdown.advance(TICK), Some(0.5));
        assert_eq!(countdown.advance(Duration::from_secs(5)), Some(1.0));
        assert_eq!(countdown.elapsed(), Duration::from_millis(200));
    }

    #[test]
    fn test_pause_freezes_and_resume_continues() {
        let mut countdown = Countdown::new();
        countdown.start(SEVEN_SECONDS);
        for _ in 0..70 {
            countdown.advance(TICK);
        }
        let frozen = countdown.fraction();

        countdown.pause();
        for _ in 0..1_000 {
            assert_eq!(countdown.advance(TICK), None);
        }
        assert_eq!(countdown.fraction(), frozen);

        countdown.resume();
        let next = countdown.advance(TICK).unwrap();
        assert!(next > frozen);
        assert!((next - 0.5 - 50.0 / 7_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_reset_starts_fresh() {
        let mut countdown = Countdown::new();
        countdown.start(SEVEN_SECONDS);
        countdown.advance(Duration::from_secs(3));
        countdown.pause();

        countdown.reset(SEVEN_SECONDS);
        assert!(countdown.is_running());
        assert_eq!(countdown.fraction(), 0.0);
    }

    #[test]
    fn test_cancel_is_permanent() {
        let mut countdown = Countdown::new();
        countdown.start(SEVEN_SECONDS);
        countdown.cancel();

        countdown.resume();
        countdown.reset(SEVEN_SECONDS);
        countdown.start(SEVEN_SECONDS);

        assert!(countdown.is_cancelled());
        assert!(!countdown.is_running());
        assert_eq!(countdown.advance(TICK), None);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let mut countdown = Countdown::new();
        countdown.start(Duration::ZERO);
        assert_eq!(countdown.advance(TICK), Some(1.0));
    }
}
