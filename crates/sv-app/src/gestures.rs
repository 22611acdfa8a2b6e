//! Keyboard stand-ins for viewer gestures

use sv_core::{PlaybackEngine, Scheduler};

/// A user gesture on the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Tap on the right half
    Next,
    /// Tap on the left half
    Previous,
    /// Swipe left
    NextOwner,
    /// Swipe right
    PreviousOwner,
    /// Press and hold
    Hold,
    /// Release the hold
    Release,
    /// Close button
    Close,
}

impl Gesture {
    /// Parse one line of input. Case matters: `n` is the next story, `N` the
    /// next owner.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "n" | "next" => Some(Gesture::Next),
            "p" | "prev" => Some(Gesture::Previous),
            "N" | "next-owner" => Some(Gesture::NextOwner),
            "P" | "prev-owner" => Some(Gesture::PreviousOwner),
            "h" | "hold" => Some(Gesture::Hold),
            "r" | "release" => Some(Gesture::Release),
            "q" | "close" => Some(Gesture::Close),
            _ => None,
        }
    }

    pub fn apply<S: Scheduler>(self, engine: &mut PlaybackEngine<S>) {
        match self {
            Gesture::Next => engine.next(),
            Gesture::Previous => engine.previous(),
            Gesture::NextOwner => engine.next_owner(),
            Gesture::PreviousOwner => engine.previous_owner(),
            Gesture::Hold => engine.pause(),
            Gesture::Release => engine.resume(),
            Gesture::Close => engine.close(),
        }
    }
}

pub const HELP: &str = "n/p: next/previous story, N/P: next/previous owner, h/r: hold/release, q: close";
