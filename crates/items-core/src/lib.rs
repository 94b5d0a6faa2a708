//! Items Core - in-memory item store
//!
//! This crate provides the domain side of the items service:
//!
//! - **Item**: the single record type, plus the create and patch request bodies
//! - **Store**: exclusive in-memory owner of all items, with a monotonic clock
//! - **Command**: create / replace / patch / duplicate / delete mutations
//! - **Query**: the list pipeline (search → created bounds → tags → active →
//!   priority → sort → pagination)
//!
//! The store does no locking of its own; callers share it behind a lock and
//! run each command while holding it.

pub mod command;
pub mod error;
pub mod item;
pub mod query;
pub mod store;

pub use command::{Mutation, Outcome};
pub use error::{ItemError, Result};
pub use item::{format_timestamp, new_item_id, CreateItem, Item, ItemId, PatchItem};
pub use query::{ListQuery, SortKey, SortOrder};
pub use store::{ItemStore, StoreClock};

/// Returns the version of items-core
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
