//! Position arithmetic over a [`Feed`]
//!
//! Every function here is pure. Owners with no items are skipped by walking
//! the owner list, so a feed made only of empty collections terminates at once.

use super::{Advance, Position};
use crate::model::Feed;

/// Next position in viewing order.
///
/// Moves to the next item of the current owner, otherwise to the first item
/// of the next owner that has any items.
pub fn advance(feed: &Feed, position: Position) -> Advance {
    if !owner_in_range(feed, position) {
        return Advance::Exhausted;
    }

    if position.item + 1 < feed.items_in(position.owner) {
        return Advance::To(Position::new(position.owner, position.item + 1));
    }

    next_owner(feed, position)
}

/// Previous position in viewing order.
///
/// Stepping back across an owner boundary lands on that owner's last item.
/// Returns `None` at the first item of the first non-empty owner.
pub fn retreat(feed: &Feed, position: Position) -> Option<Position> {
    if !owner_in_range(feed, position) {
        return None;
    }

    let len = feed.items_in(position.owner);
    if position.item > 0 && len > 0 {
        return Some(Position::new(
            position.owner,
            (position.item - 1).min(len - 1),
        ));
    }

    (0..position.owner).rev().find_map(|owner| {
        feed.collection(owner)
            .and_then(|collection| collection.last_index())
            .map(|item| Position::new(owner, item))
    })
}

/// First item of the next owner that has items
pub fn next_owner(feed: &Feed, position: Position) -> Advance {
    if !owner_in_range(feed, position) {
        return Advance::Exhausted;
    }

    match first_non_empty(feed, position.owner + 1) {
        Some(owner) => Advance::To(Position::first_of(owner)),
        None => Advance::Exhausted,
    }
}

/// First item of the previous owner that has items
pub fn previous_owner(feed: &Feed, position: Position) -> Option<Position> {
    if !owner_in_range(feed, position) {
        return None;
    }

    (0..position.owner)
        .rev()
        .find(|&owner| feed.items_in(owner) > 0)
        .map(Position::first_of)
}

/// Where a viewer asked to open at `requested` actually starts.
///
/// A valid position is kept. An existing owner without items forwards to the
/// next owner that has some. Anything else has nothing to show.
pub fn resolve_initial(feed: &Feed, requested: Position) -> Option<Position> {
    if feed.contains(requested) {
        return Some(requested);
    }

    let owner_exists = requested.owner < feed.owner_count();
    if owner_exists && feed.items_in(requested.owner) == 0 {
        return first_non_empty(feed, requested.owner).map(Position::first_of);
    }

    None
}

fn first_non_empty(feed: &Feed, from_owner: usize) -> Option<usize> {
    (from_owner..feed.owner_count()).find(|&owner| feed.items_in(owner) > 0)
}

fn owner_in_range(feed: &Feed, position: Position) -> bool {
    let in_range = position.owner < feed.owner_count();
    debug_assert!(
        in_range,
        "position {position} does not belong to a feed of {} owners",
        feed.owner_count()
    );
    in_range
}
