//! Mutating operations on the item store
//!
//! Each command is executed against `&mut ItemStore`, so whoever holds the
//! store (behind a lock, in the server) gets the whole read-modify-write as
//! a single step.

use crate::error::Result;
use crate::item::{new_item_id, CreateItem, Item, ItemId, PatchItem};
use crate::store::ItemStore;

/// Commands that change the store's contents
#[derive(Debug, Clone)]
pub enum Mutation {
    /// Insert a new item under a fresh id
    Create(CreateItem),

    /// Replace every field of an existing item
    Replace { id: ItemId, fields: CreateItem },

    /// Apply only the supplied fields to an existing item
    Patch { id: ItemId, patch: PatchItem },

    /// Copy an existing item under a fresh id
    Duplicate { source_id: ItemId },

    /// Remove a single item
    Delete { id: ItemId },
}

/// What a command did
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A new item exists (create, duplicate)
    Created(Item),
    /// An existing item changed (replace, non-empty patch)
    Updated(Item),
    /// A patch named no fields; the item as it stands
    Unchanged(Item),
    /// The removed item
    Deleted(Item),
}

impl Outcome {
    /// The item the command produced, touched or removed
    pub fn into_item(self) -> Item {
        match self {
            Outcome::Created(item)
            | Outcome::Updated(item)
            | Outcome::Unchanged(item)
            | Outcome::Deleted(item) => item,
        }
    }
}

impl Mutation {
    /// Execute the command on the given store
    pub fn execute(self, store: &mut ItemStore) -> Result<Outcome> {
        match self {
            Mutation::Create(fields) => {
                fields.validate()?;
                let now = store.now();
                let item = Item::new(new_item_id(), fields, now);
                tracing::debug!(id = %item.id, "created item");
                store.put(item.clone());
                Ok(Outcome::Created(item))
            }

            Mutation::Replace { id, fields } => {
                fields.validate()?;
                // Resolve before stamping so a miss leaves the clock untouched.
                store.get(&id)?;
                let now = store.now();
                let item = store.get_mut(&id)?;
                item.replace(fields, now);
                tracing::debug!(%id, "replaced item");
                Ok(Outcome::Updated(item.clone()))
            }

            Mutation::Patch { id, patch } => {
                patch.validate()?;
                if patch.is_empty() {
                    return Ok(Outcome::Unchanged(store.get(&id)?.clone()));
                }
                store.get(&id)?;
                let now = store.now();
                let item = store.get_mut(&id)?;
                item.merge(patch, now);
                tracing::debug!(%id, "patched item");
                Ok(Outcome::Updated(item.clone()))
            }

            Mutation::Duplicate { source_id } => {
                store.get(&source_id)?;
                let now = store.now();
                let copy = store.get(&source_id)?.duplicate(new_item_id(), now);
                tracing::debug!(source = %source_id, id = %copy.id, "duplicated item");
                store.put(copy.clone());
                Ok(Outcome::Created(copy))
            }

            Mutation::Delete { id } => {
                let removed = store.delete(&id)?;
                tracing::debug!(%id, "deleted item");
                Ok(Outcome::Deleted(removed))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ItemError;

    fn create(store: &mut ItemStore, fields: CreateItem) -> Item {
        Mutation::Create(fields)
            .execute(store)
            .unwrap()
            .into_item()
    }

    fn full_body() -> CreateItem {
        CreateItem {
            name: "Report".into(),
            description: Some("quarterly".into()),
            notes: Some("draft".into()),
            tags: Some(vec!["work".into()]),
            active: false,
            priority: 5,
        }
    }

    #[test]
    fn create_stamps_equal_timestamps() {
        let mut store = ItemStore::new();
        let item = create(&mut store, CreateItem::named("Test Item"));

        assert_eq!(item.created_at, item.updated_at);
        assert_eq!(item.description, None);
        assert!(item.active);
        assert_eq!(store.get(&item.id).unwrap(), &item);
    }

    #[test]
    fn create_rejects_blank_name() {
        let mut store = ItemStore::new();
        let err = Mutation::Create(CreateItem::named("")).execute(&mut store);
        assert!(matches!(err, Err(ItemError::Validation(_))));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn ids_are_unique() {
        let mut store = ItemStore::new();
        let a = create(&mut store, CreateItem::named("a"));
        let b = create(&mut store, CreateItem::named("b"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn replace_resets_and_advances() {
        let mut store = ItemStore::new();
        let original = create(&mut store, full_body());

        let outcome = Mutation::Replace {
            id: original.id.clone(),
            fields: CreateItem::named("Updated"),
        }
        .execute(&mut store)
        .unwrap();

        let Outcome::Updated(item) = outcome else {
            panic!("expected Updated, got {outcome:?}");
        };
        assert_eq!(item.id, original.id);
        assert_eq!(item.name, "Updated");
        assert_eq!(item.description, None);
        assert_eq!(item.notes, None);
        assert_eq!(item.tags, None);
        assert!(item.active);
        assert_eq!(item.priority, 0);
        assert_eq!(item.created_at, original.created_at);
        assert!(item.updated_at > original.updated_at);
    }

    #[test]
    fn patch_merges_and_advances() {
        let mut store = ItemStore::new();
        let original = create(&mut store, full_body());

        let patch = PatchItem {
            notes: Some(Some("final".into())),
            ..Default::default()
        };
        let item = Mutation::Patch {
            id: original.id.clone(),
            patch,
        }
        .execute(&mut store)
        .unwrap()
        .into_item();

        assert_eq!(item.notes.as_deref(), Some("final"));
        assert_eq!(item.name, original.name);
        assert_eq!(item.description, original.description);
        assert_eq!(item.tags, original.tags);
        assert_eq!(item.priority, original.priority);
        assert!(item.updated_at > original.updated_at);
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut store = ItemStore::new();
        let original = create(&mut store, full_body());

        let outcome = Mutation::Patch {
            id: original.id.clone(),
            patch: PatchItem::default(),
        }
        .execute(&mut store)
        .unwrap();

        assert_eq!(outcome, Outcome::Unchanged(original.clone()));
        assert_eq!(store.get(&original.id).unwrap(), &original);
    }

    #[test]
    fn duplicate_leaves_source_untouched() {
        let mut store = ItemStore::new();
        let source = create(&mut store, full_body());

        let copy = Mutation::Duplicate {
            source_id: source.id.clone(),
        }
        .execute(&mut store)
        .unwrap()
        .into_item();

        assert_ne!(copy.id, source.id);
        assert_eq!(copy.name, source.name);
        assert_eq!(copy.tags, source.tags);
        assert_eq!(copy.created_at, copy.updated_at);
        assert!(copy.created_at > source.created_at);
        assert_eq!(store.get(&source.id).unwrap(), &source);
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn missing_ids_are_not_found() {
        let mut store = ItemStore::new();
        let missing = || "nonexistent-id".to_string();
        let commands = vec![
            Mutation::Replace {
                id: missing(),
                fields: CreateItem::named("x"),
            },
            Mutation::Patch {
                id: missing(),
                patch: PatchItem::default(),
            },
            Mutation::Patch {
                id: missing(),
                patch: PatchItem {
                    priority: Some(1),
                    ..Default::default()
                },
            },
            Mutation::Duplicate {
                source_id: missing(),
            },
            Mutation::Delete { id: missing() },
        ];

        for command in commands {
            let result = command.execute(&mut store);
            assert_eq!(result, Err(ItemError::NotFound(missing())));
        }
        assert_eq!(store.count(), 0);
    }
}
