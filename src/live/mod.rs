//! Live updates for shared budgets
//!
//! Services publish a [`ChangeEvent`] after every successful write. Anyone
//! viewing a budget subscribes to the [`ChangeFeed`] for that budget and
//! folds the events into a [`LiveBudget`] snapshot, recomputing the summary
//! from scratch after each change.
//!
//! The feed lives in process memory. The `budget` binary runs one command per
//! process and never subscribes, so its events reach no one; subscribers are
//! library callers that hold a `Storage` across several writes.

mod event;
mod feed;
mod snapshot;

pub use event::ChangeEvent;
pub use feed::{ChangeFeed, Subscription};
pub use snapshot::LiveBudget;
