//! Collection domain model.
//!
//! A collection is a named group of endpoints. Collections form the root list
//! of the browser; selecting one opens its endpoints.

use serde::{Deserialize, Serialize};

/// A named group of endpoints.
///
/// # Fields
///
/// - `id`: Storage identifier, always positive
/// - `name`: Display name, validated by [`crate::domain::validation::validate_name`]
/// - `created_at`: Unix timestamp of creation
/// - `updated_at`: Unix timestamp of the last rename or endpoint change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: i64,
    pub name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Collection {
    /// Returns a human-readable description of when the collection last changed.
    #[must_use]
    pub fn updated_ago(&self) -> String {
        format!("updated {}", super::time::time_ago(self.updated_at))
    }
}
