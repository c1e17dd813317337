//! Pool items and their process-local identities.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable in-process identity for a pool item.
///
/// Assigned when an item enters memory (construction or file load) and never
/// persisted. The wire format identifies items only by position, which shifts
/// under filtered or sorted views; operations therefore resolve to an
/// `ItemId` first and mutate by id, never by raw index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Generates a fresh unique id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single entry in the prize pool.
///
/// Items carry no weight of their own; they reference a category by name and
/// inherit its weight and color. The reference is plain text and may dangle
/// after a forced category removal, in which case the item contributes zero
/// weight and renders with the fallback color.
///
/// # Validation
///
/// - Name must be non-blank
/// - Category name must be non-blank (existence is checked by the pool,
///   which owns the registry)
///
/// Wire format note: the persisted fields are exactly `name`, `color`
/// (the category name, kept under its historical key) and `checked`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Process-local identity, regenerated on every load
    #[serde(skip)]
    pub id: ItemId,
    /// Display name of the prize or task
    pub name: String,
    /// Name of the referenced weight category
    #[serde(rename = "color")]
    pub category: String,
    /// Whether the item participates in draws
    #[serde(rename = "checked")]
    pub active: bool,
}

impl Item {
    /// Creates a new active Item with validation.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or category is blank.
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let category = category.into();

        if name.trim().is_empty() {
            anyhow::bail!("Item name cannot be empty");
        }
        if category.trim().is_empty() {
            anyhow::bail!("Item category cannot be empty");
        }

        Ok(Self {
            id: ItemId::new(),
            name,
            category,
            active: true,
        })
    }

    /// Flips the active flag, returning the new state.
    pub const fn toggle(&mut self) -> bool {
        self.active = !self.active;
        self.active
    }
}
