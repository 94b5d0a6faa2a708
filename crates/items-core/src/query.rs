//! List query pipeline: filter, then sort, then paginate.
//!
//! Stages run in a fixed order over the whole snapshot, each consuming the
//! previous stage's complete output:
//!
//! ```text
//! search → created bounds → tags → active → priority → sort → offset/limit
//! ```

use std::cmp::Ordering;

use serde::Deserialize;

use crate::item::{format_timestamp, Item};

/// Sort direction. Anything other than `desc` sorts ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}

/// Field a list is sorted on. Unknown names fall back to `created_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    Name,
    #[default]
    CreatedAt,
    UpdatedAt,
    Priority,
}

impl SortKey {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "name" => SortKey::Name,
            "updated_at" => SortKey::UpdatedAt,
            "priority" => SortKey::Priority,
            _ => SortKey::CreatedAt,
        }
    }

    fn compare(self, a: &Item, b: &Item) -> Ordering {
        match self {
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            SortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            SortKey::Priority => a.priority.cmp(&b.priority),
        }
    }
}

/// Optional parameters of a list request, as they arrive on the query string.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub sort: Option<String>,
    pub sort_by: Option<String>,
    pub created_after: Option<String>,
    pub created_before: Option<String>,
    /// Comma-separated tag names
    pub tags: Option<String>,
    pub active: Option<bool>,
    pub priority: Option<i64>,
    pub min_priority: Option<i64>,
    pub max_priority: Option<i64>,
}

impl ListQuery {
    /// Requested tags, trimmed, with empty entries dropped.
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Sort to apply, if any sort parameter was given.
    pub fn ordering(&self) -> Option<(SortKey, SortOrder)> {
        if self.sort.is_none() && self.sort_by.is_none() {
            return None;
        }
        let key = self.sort_by.as_deref().map(SortKey::parse).unwrap_or_default();
        let order = self.sort.as_deref().map(SortOrder::parse).unwrap_or_default();
        Some((key, order))
    }

    /// Run the full pipeline over a store snapshot.
    pub fn apply(&self, mut items: Vec<Item>) -> Vec<Item> {
        if let Some(needle) = &self.search {
            let needle = needle.to_lowercase();
            items.retain(|item| matches_search(item, &needle));
        }

        if self.created_after.is_some() || self.created_before.is_some() {
            let after = self.created_after.as_deref();
            let before = self.created_before.as_deref();
            items.retain(|item| within_created_bounds(item, after, before));
        }

        let tags = self.tag_list();
        if !tags.is_empty() {
            items.retain(|item| has_any_tag(item, &tags));
        }

        if let Some(active) = self.active {
            items.retain(|item| item.active == active);
        }

        if self.priority.is_some() || self.min_priority.is_some() || self.max_priority.is_some() {
            items.retain(|item| {
                matches_priority(item, self.priority, self.min_priority, self.max_priority)
            });
        }

        if let Some((key, order)) = self.ordering() {
            sort_items(&mut items, key, order);
        }

        paginate(items, self.offset, self.limit)
    }
}

/// `needle` must already be lowercased.
pub fn matches_search(item: &Item, needle: &str) -> bool {
    let hit = |field: Option<&str>| field.is_some_and(|v| v.to_lowercase().contains(needle));
    hit(Some(&item.name)) || hit(item.description.as_deref()) || hit(item.notes.as_deref())
}

/// Inclusive bounds compared against the serialized `created_at`.
pub fn within_created_bounds(item: &Item, after: Option<&str>, before: Option<&str>) -> bool {
    let created = format_timestamp(&item.created_at);
    after.map_or(true, |lower| created.as_str() >= lower)
        && before.map_or(true, |upper| created.as_str() <= upper)
}

pub fn has_any_tag(item: &Item, wanted: &[String]) -> bool {
    item.tags
        .as_ref()
        .is_some_and(|tags| tags.iter().any(|t| wanted.contains(t)))
}

pub fn matches_priority(
    item: &Item,
    exact: Option<i64>,
    min: Option<i64>,
    max: Option<i64>,
) -> bool {
    exact.map_or(true, |p| item.priority == p)
        && min.map_or(true, |p| item.priority >= p)
        && max.map_or(true, |p| item.priority <= p)
}

/// Stable sort; equal keys keep their incoming relative order in both
/// directions.
pub fn sort_items(items: &mut [Item], key: SortKey, order: SortOrder) {
    match order {
        SortOrder::Asc => items.sort_by(|a, b| key.compare(a, b)),
        SortOrder::Desc => items.sort_by(|a, b| key.compare(b, a)),
    }
}

pub fn paginate(items: Vec<Item>, offset: Option<usize>, limit: Option<usize>) -> Vec<Item> {
    let iter = items.into_iter().skip(offset.unwrap_or(0));
    match limit {
        Some(limit) => iter.take(limit).collect(),
        None => iter.collect(),
    }
}
