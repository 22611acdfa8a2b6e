//! Navigation over the two-level owner/item structure of a feed

mod position;
pub mod resolver;

pub use position::{Advance, Position};
pub use resolver::{advance, next_owner, previous_owner, resolve_initial, retreat};
