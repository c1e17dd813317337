//! Weight categories shared by pool items.
//!
//! A category pairs a display name with a draw weight and a color. Items do
//! not carry weights of their own; each item references a category by name
//! and inherits its weight and color.

use crate::models::RgbColor;
use anyhow::Result;

/// User-defined weight category.
///
/// # Validation
///
/// - Name must be non-blank; it doubles as the unique registry key
/// - Weight is a non-negative integer (zero is legal and excludes the
///   category's items from weighted draws)
/// - Color must be valid RGB (enforced by `RgbColor` type)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Display name, unique within a pool (e.g., "Gold", "Blue")
    pub name: String,
    /// Relative draw weight shared by all items in this category
    pub weight: u32,
    /// RGB color for visual identification
    pub color: RgbColor,
}

impl Category {
    /// Creates a new Category with validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use prizewheel::models::{Category, RgbColor};
    ///
    /// let category = Category::new(
    ///     "Gold",
    ///     20,
    ///     RgbColor::from_hex("#FFD700").unwrap()
    /// ).unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or whitespace-only.
    pub fn new(name: impl Into<String>, weight: u32, color: RgbColor) -> Result<Self> {
        let name = name.into();
        Self::validate_name(&name)?;
        Ok(Self {
            name,
            weight,
            color,
        })
    }

    /// Validates a category name.
    fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            anyhow::bail!("Category name cannot be empty");
        }
        Ok(())
    }

    /// Updates the category weight.
    pub const fn set_weight(&mut self, weight: u32) {
        self.weight = weight;
    }

    /// Updates the category color.
    pub const fn set_color(&mut self, color: RgbColor) {
        self.color = color;
    }
}
