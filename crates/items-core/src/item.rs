//! Item record and the request bodies that create and change it

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::{ItemError, Result};

/// Opaque item identifier (UUID v4 text).
///
/// Kept as a plain string so lookups of malformed ids resolve to
/// `NotFound` instead of a parse failure.
pub type ItemId = String;

/// Generate a fresh, never-reused item id.
pub fn new_item_id() -> ItemId {
    Uuid::new_v4().to_string()
}

/// Render a timestamp the way it appears on the wire.
///
/// Fixed-width microsecond precision, so string order matches time order.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Serde adapter for [`format_timestamp`].
pub mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

fn default_active() -> bool {
    true
}

/// The sole record type held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
    pub active: bool,
    pub priority: i64,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Build a new item from a create body. Both timestamps are `now`.
    pub fn new(id: ItemId, fields: CreateItem, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: fields.name,
            description: fields.description,
            notes: fields.notes,
            tags: fields.tags,
            active: fields.active,
            priority: fields.priority,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every user-editable field. Omitted optionals are already
    /// at their defaults in `fields`, so they reset here.
    pub fn replace(&mut self, fields: CreateItem, now: DateTime<Utc>) {
        self.name = fields.name;
        self.description = fields.description;
        self.notes = fields.notes;
        self.tags = fields.tags;
        self.active = fields.active;
        self.priority = fields.priority;
        self.updated_at = now;
    }

    /// Merge the supplied fields. Returns whether anything was applied;
    /// `updated_at` only moves when it was.
    pub fn merge(&mut self, patch: PatchItem, now: DateTime<Utc>) -> bool {
        if patch.is_empty() {
            return false;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(active) = patch.active {
            self.active = active;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        self.updated_at = now;
        true
    }

    /// Copy of this item under a new id, stamped `now`.
    pub fn duplicate(&self, id: ItemId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            created_at: now,
            updated_at: now,
            ..self.clone()
        }
    }
}

/// Whitespace-only names count as empty.
fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ItemError::Validation("name must not be empty".into()));
    }
    Ok(())
}

/// Body for create and full replace.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateItem {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub priority: i64,
}

impl CreateItem {
    /// A body carrying only the required name; everything else defaulted.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            notes: None,
            tags: None,
            active: true,
            priority: 0,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)
    }
}

/// Deserialize a present field (including an explicit `null`) as `Some`.
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Body for a partial update.
///
/// The nullable fields are doubly optional: outer `None` means "not sent",
/// `Some(None)` means "sent as null" and clears the field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PatchItem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub tags: Option<Option<Vec<String>>>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub priority: Option<i64>,
}

impl PatchItem {
    /// True when the body named no fields at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.notes.is_none()
            && self.tags.is_none()
            && self.active.is_none()
            && self.priority.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        match &self.name {
            Some(name) => validate_name(name),
            None => Ok(()),
        }
    }
}
