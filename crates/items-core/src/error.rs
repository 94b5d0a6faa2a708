//! Error types for items-core

use thiserror::Error;

use crate::item::ItemId;

/// Result type alias for item operations
pub type Result<T> = std::result::Result<T, ItemError>;

/// Errors from the item store and its commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemError {
    /// No item with the given id exists in the store
    #[error("Item not found: {0}")]
    NotFound(ItemId),

    /// Request body passed structural decoding but violates a field rule
    #[error("Validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_error_display() {
        let err = ItemError::NotFound("abc-123".into());
        assert_eq!(err.to_string(), "Item not found: abc-123");

        let err = ItemError::Validation("name must not be empty".into());
        assert!(err.to_string().contains("name"));
    }
}
