//! The in-memory item store

use std::collections::HashMap;

use chrono::{DateTime, Duration, DurationRound, Utc};

use crate::error::{ItemError, Result};
use crate::item::{Item, ItemId};

/// Hands out strictly increasing timestamps at microsecond resolution.
///
/// When the wall clock has not advanced past the last stamp (or went
/// backwards), the next stamp is the last one plus a microsecond.
#[derive(Debug, Default)]
pub struct StoreClock {
    last: Option<DateTime<Utc>>,
}

impl StoreClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) -> DateTime<Utc> {
        self.tick_from(Utc::now())
    }

    fn tick_from(&mut self, wall: DateTime<Utc>) -> DateTime<Utc> {
        let resolution = Duration::microseconds(1);
        let wall = wall.duration_trunc(resolution).unwrap_or(wall);
        let stamp = match self.last {
            Some(last) if wall <= last => last + resolution,
            _ => wall,
        };
        self.last = Some(stamp);
        stamp
    }
}

/// Exclusive owner of every item record.
///
/// Not synchronized itself; the server wraps it in a lock so that each
/// command runs as one indivisible read-modify-write.
#[derive(Debug, Default)]
pub struct ItemStore {
    items: HashMap<ItemId, Item>,
    clock: StoreClock,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next mutation timestamp.
    pub fn now(&mut self) -> DateTime<Utc> {
        self.clock.tick()
    }

    /// Insert or overwrite the record under its id.
    pub fn put(&mut self, item: Item) {
        self.items.insert(item.id.clone(), item);
    }

    pub fn get(&self, id: &str) -> Result<&Item> {
        self.items
            .get(id)
            .ok_or_else(|| ItemError::NotFound(id.to_string()))
    }

    pub fn get_mut(&mut self, id: &str) -> Result<&mut Item> {
        self.items
            .get_mut(id)
            .ok_or_else(|| ItemError::NotFound(id.to_string()))
    }

    pub fn delete(&mut self, id: &str) -> Result<Item> {
        self.items
            .remove(id)
            .ok_or_else(|| ItemError::NotFound(id.to_string()))
    }

    /// Snapshot of every item, in no particular order.
    pub fn list_all(&self) -> Vec<Item> {
        self.items.values().cloned().collect()
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Remove everything; returns how many items were dropped.
    pub fn clear(&mut self) -> usize {
        let removed = self.items.len();
        self.items.clear();
        removed
    }
}
