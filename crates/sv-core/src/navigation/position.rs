use serde::{Deserialize, Serialize};

/// The item currently on screen: an owner index and an item index inside
/// that owner's collection.
///
/// Ordering is row-major, so sorting positions gives viewing order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    /// Index into the feed's owners
    pub owner: usize,
    /// Index into that owner's items
    pub item: usize,
}

impl Position {
    pub const fn new(owner: usize, item: usize) -> Self {
        Self { owner, item }
    }

    /// First item of the first owner
    pub const fn origin() -> Self {
        Self::new(0, 0)
    }

    /// First item of the given owner
    pub const fn first_of(owner: usize) -> Self {
        Self::new(owner, 0)
    }

    pub fn is_origin(&self) -> bool {
        *self == Self::origin()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.owner, self.item)
    }
}

/// Outcome of a forward navigation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Move to this position
    To(Position),
    /// Nothing further; the viewer should close
    Exhausted,
}

impl Advance {
    pub fn position(self) -> Option<Position> {
        match self {
            Advance::To(position) => Some(position),
            Advance::Exhausted => None,
        }
    }
}
