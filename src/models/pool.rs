//! The prize pool: category registry plus item list.
//!
//! This is the persisted document. On the wire it is exactly
//!
//! ```json
//! {
//!   "colors": { "<category>": { "weight": 50, "color": "#3399FF" } },
//!   "items": [ { "name": "prize", "color": "<category>", "checked": true } ]
//! }
//! ```
//!
//! The `colors` object is order-significant: categories keep their insertion
//! order through save/load cycles, and the CATEGORY sort key is defined by
//! that order. A `Vec<Category>` backs the registry for exactly this reason;
//! the hand-written serde below maps it to the JSON object without losing
//! order in either direction.

use crate::models::{Category, Item, ItemId, RgbColor};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Complete pool state: ordered weight categories and the items that
/// reference them.
///
/// # Validation
///
/// - Category names must be unique and non-blank
/// - Item category references may dangle (after a forced category removal);
///   dangling items contribute zero weight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    /// Weight categories in insertion order
    #[serde(rename = "colors", with = "colors_map", default = "default_categories")]
    pub categories: Vec<Category>,
    /// Pool entries in insertion order
    #[serde(default)]
    pub items: Vec<Item>,
}

/// Built-in registry used when no pool file exists yet.
fn default_categories() -> Vec<Category> {
    vec![
        Category {
            name: "Blue".to_string(),
            weight: 50,
            color: RgbColor::new(51, 153, 255),
        },
        Category {
            name: "Purple".to_string(),
            weight: 30,
            color: RgbColor::new(204, 153, 255),
        },
        Category {
            name: "Gold".to_string(),
            weight: 20,
            color: RgbColor::new(255, 215, 0),
        },
    ]
}

impl Default for Pool {
    /// Starts with the built-in Blue/Purple/Gold registry and no items.
    fn default() -> Self {
        Self {
            categories: default_categories(),
            items: Vec::new(),
        }
    }
}

impl Pool {
    /// Creates an empty pool with no categories and no items.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            categories: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Adds a category to the registry.
    ///
    /// # Errors
    ///
    /// Returns an error if a category with the same name already exists.
    pub fn add_category(&mut self, category: Category) -> Result<()> {
        if self.categories.iter().any(|c| c.name == category.name) {
            anyhow::bail!("Category '{}' already exists", category.name);
        }

        self.categories.push(category);
        Ok(())
    }

    /// Gets a category by name.
    #[must_use]
    pub fn get_category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Gets a mutable reference to a category by name.
    pub fn get_category_mut(&mut self, name: &str) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.name == name)
    }

    /// Removes a category by name, leaving referencing items in place.
    ///
    /// Items that referenced the removed category become dangling: they stay
    /// in the pool and simply contribute zero weight from then on.
    pub fn remove_category(&mut self, name: &str) -> Option<Category> {
        if let Some(index) = self.categories.iter().position(|c| c.name == name) {
            Some(self.categories.remove(index))
        } else {
            None
        }
    }

    /// Position of a category in insertion order.
    #[must_use]
    pub fn category_position(&self, name: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.name == name)
    }

    /// Number of items referencing the given category.
    #[must_use]
    pub fn items_in_category(&self, name: &str) -> usize {
        self.items.iter().filter(|i| i.category == name).count()
    }

    /// Adds an item to the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the item references a category that is not in
    /// the registry. (Loaded files may contain dangling references, but new
    /// items must point at a real category.)
    pub fn add_item(&mut self, item: Item) -> Result<()> {
        if self.get_category(&item.category).is_none() {
            anyhow::bail!("Unknown category '{}'", item.category);
        }

        self.items.push(item);
        Ok(())
    }

    /// Gets an item by id.
    #[must_use]
    pub fn get_item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Removes an item by id.
    pub fn remove_item(&mut self, id: ItemId) -> Option<Item> {
        if let Some(index) = self.items.iter().position(|i| i.id == id) {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Flips an item's active flag, returning the new state.
    pub fn toggle_item(&mut self, id: ItemId) -> Option<bool> {
        self.items
            .iter_mut()
            .find(|i| i.id == id)
            .map(Item::toggle)
    }

    /// Items currently participating in draws.
    pub fn active_items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|i| i.active)
    }

    /// Weight an item inherits from its category (zero when dangling).
    #[must_use]
    pub fn item_weight(&self, item: &Item) -> u32 {
        self.get_category(&item.category).map_or(0, |c| c.weight)
    }

    /// Color an item inherits from its category (white when dangling).
    #[must_use]
    pub fn item_color(&self, item: &Item) -> RgbColor {
        self.get_category(&item.category)
            .map_or_else(RgbColor::default, |c| c.color)
    }

    /// Total weight over active items only.
    ///
    /// Inactive and dangling items contribute nothing; toggling an item off
    /// redistributes its mass across the remaining active items.
    #[must_use]
    pub fn total_active_weight(&self) -> u64 {
        self.active_items()
            .map(|i| u64::from(self.item_weight(i)))
            .sum()
    }

    /// Derived draw probability for every item, keyed by id.
    ///
    /// An item's probability is its category weight divided by the total
    /// active weight. Inactive items have probability zero, as does every
    /// item when the total active weight is zero.
    #[must_use]
    pub fn probabilities(&self) -> HashMap<ItemId, f64> {
        let total = self.total_active_weight();
        self.items
            .iter()
            .map(|item| {
                let p = if !item.active || total == 0 {
                    0.0
                } else {
                    f64::from(self.item_weight(item)) / total as f64
                };
                (item.id, p)
            })
            .collect()
    }

    /// Validates the pool structure.
    ///
    /// Checks:
    /// - No blank category names
    /// - No duplicate category names
    ///
    /// Dangling item references are deliberately not an error.
    pub fn validate(&self) -> Result<()> {
        for (idx, category) in self.categories.iter().enumerate() {
            if category.name.trim().is_empty() {
                anyhow::bail!("Category at position {idx} has a blank name");
            }

            if self.categories[..idx]
                .iter()
                .any(|c| c.name == category.name)
            {
                anyhow::bail!("Duplicate category name '{}'", category.name);
            }
        }

        Ok(())
    }
}

/// Serde mapping between `Vec<Category>` and the order-significant
/// `colors` JSON object.
mod colors_map {
    use super::Category;
    use crate::models::RgbColor;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::fmt;

    /// Map-value side of a category entry; the name lives in the key.
    #[derive(Serialize, Deserialize)]
    struct CategoryRecord {
        weight: u32,
        color: RgbColor,
    }

    pub fn serialize<S>(categories: &[Category], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(categories.len()))?;
        for category in categories {
            map.serialize_entry(
                &category.name,
                &CategoryRecord {
                    weight: category.weight,
                    color: category.color,
                },
            )?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Category>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ColorsVisitor;

        impl<'de> Visitor<'de> for ColorsVisitor {
            type Value = Vec<Category>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of category name to weight and color")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut categories = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, record)) = access.next_entry::<String, CategoryRecord>()? {
                    categories.push(Category {
                        name,
                        weight: record.weight,
                        color: record.color,
                    });
                }
                Ok(categories)
            }
        }

        deserializer.deserialize_map(ColorsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool_with_items() -> Pool {
        let mut pool = Pool::default();
        pool.add_item(Item::new("prize1", "Blue").unwrap()).unwrap();
        pool.add_item(Item::new("prize2", "Purple").unwrap())
            .unwrap();
        pool.add_item(Item::new("prize3", "Gold").unwrap()).unwrap();
        pool
    }

    #[test]
    fn test_default_registry() {
        let pool = Pool::default();
        let names: Vec<&str> = pool.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Blue", "Purple", "Gold"]);
        assert_eq!(pool.get_category("Blue").unwrap().weight, 50);
        assert_eq!(pool.get_category("Purple").unwrap().weight, 30);
        assert_eq!(pool.get_category("Gold").unwrap().weight, 20);
        assert!(pool.items.is_empty());
    }

    #[test]
    fn test_add_category() {
        let mut pool = Pool::default();
        let category = Category::new("Red", 10, RgbColor::new(255, 0, 0)).unwrap();
        pool.add_category(category).unwrap();
        assert_eq!(pool.categories.len(), 4);
        assert_eq!(pool.category_position("Red"), Some(3));
    }

    #[test]
    fn test_add_duplicate_category() {
        let mut pool = Pool::default();
        let category = Category::new("Blue", 10, RgbColor::new(255, 0, 0)).unwrap();
        assert!(pool.add_category(category).is_err());
    }

    #[test]
    fn test_remove_category_keeps_items() {
        let mut pool = pool_with_items();
        let removed = pool.remove_category("Blue").unwrap();
        assert_eq!(removed.name, "Blue");
        assert_eq!(pool.categories.len(), 2);
        // Referencing item survives with zero weight and fallback color
        assert_eq!(pool.items.len(), 3);
        let dangling = &pool.items[0];
        assert_eq!(dangling.category, "Blue");
        assert_eq!(pool.item_weight(dangling), 0);
        assert_eq!(pool.item_color(dangling), RgbColor::default());
    }

    #[test]
    fn test_remove_missing_category() {
        let mut pool = Pool::default();
        assert!(pool.remove_category("Nope").is_none());
    }

    #[test]
    fn test_items_in_category() {
        let mut pool = pool_with_items();
        pool.add_item(Item::new("prize4", "Blue").unwrap()).unwrap();
        assert_eq!(pool.items_in_category("Blue"), 2);
        assert_eq!(pool.items_in_category("Gold"), 1);
        assert_eq!(pool.items_in_category("Nope"), 0);
    }

    #[test]
    fn test_add_item_unknown_category() {
        let mut pool = Pool::default();
        let item = Item::new("prize", "Nope").unwrap();
        assert!(pool.add_item(item).is_err());
        assert!(pool.items.is_empty());
    }

    #[test]
    fn test_remove_item_by_id() {
        let mut pool = pool_with_items();
        let id = pool.items[1].id;
        let removed = pool.remove_item(id).unwrap();
        assert_eq!(removed.name, "prize2");
        assert_eq!(pool.items.len(), 2);
        assert!(pool.remove_item(id).is_none());
    }

    #[test]
    fn test_toggle_item_by_id() {
        let mut pool = pool_with_items();
        let id = pool.items[0].id;
        assert_eq!(pool.toggle_item(id), Some(false));
        assert!(!pool.items[0].active);
        assert_eq!(pool.toggle_item(id), Some(true));
        assert_eq!(pool.toggle_item(ItemId::new()), None);
    }

    #[test]
    fn test_total_active_weight() {
        let mut pool = pool_with_items();
        assert_eq!(pool.total_active_weight(), 100);

        let id = pool.items[0].id; // Blue, weight 50
        pool.toggle_item(id).unwrap();
        assert_eq!(pool.total_active_weight(), 50);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let pool = pool_with_items();
        let probs = pool.probabilities();
        let sum: f64 = probs.values().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!((probs[&pool.items[0].id] - 0.5).abs() < 1e-9);
        assert!((probs[&pool.items[1].id] - 0.3).abs() < 1e-9);
        assert!((probs[&pool.items[2].id] - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_probabilities_inactive_is_zero() {
        let mut pool = pool_with_items();
        let id = pool.items[2].id; // Gold, weight 20
        pool.toggle_item(id).unwrap();

        let probs = pool.probabilities();
        assert!((probs[&id] - 0.0).abs() < f64::EPSILON);
        // Remaining mass redistributes over Blue (50) and Purple (30)
        assert!((probs[&pool.items[0].id] - 0.625).abs() < 1e-9);
        assert!((probs[&pool.items[1].id] - 0.375).abs() < 1e-9);
    }

    #[test]
    fn test_probabilities_zero_weight_category() {
        let mut pool = Pool::default();
        pool.add_category(Category::new("Dud", 0, RgbColor::default()).unwrap())
            .unwrap();
        pool.add_item(Item::new("never", "Dud").unwrap()).unwrap();
        pool.add_item(Item::new("always", "Blue").unwrap()).unwrap();

        let probs = pool.probabilities();
        assert!((probs[&pool.items[0].id] - 0.0).abs() < f64::EPSILON);
        assert!((probs[&pool.items[1].id] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_probabilities_all_zero_total() {
        let mut pool = Pool::empty();
        pool.add_category(Category::new("Dud", 0, RgbColor::default()).unwrap())
            .unwrap();
        pool.add_item(Item::new("a", "Dud").unwrap()).unwrap();
        pool.add_item(Item::new("b", "Dud").unwrap()).unwrap();

        let probs = pool.probabilities();
        assert!(probs.values().all(|p| p.abs() < f64::EPSILON));
    }

    #[test]
    fn test_validate_duplicate_names() {
        let mut pool = Pool::default();
        pool.categories.push(Category {
            name: "Blue".to_string(),
            weight: 1,
            color: RgbColor::default(),
        });
        assert!(pool.validate().is_err());
    }

    #[test]
    fn test_validate_blank_name() {
        let mut pool = Pool::empty();
        pool.categories.push(Category {
            name: "  ".to_string(),
            weight: 1,
            color: RgbColor::default(),
        });
        assert!(pool.validate().is_err());
    }

    #[test]
    fn test_wire_format() {
        let pool = pool_with_items();
        let json = serde_json::to_value(&pool).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "colors": {
                    "Blue": {"weight": 50, "color": "#3399FF"},
                    "Purple": {"weight": 30, "color": "#CC99FF"},
                    "Gold": {"weight": 20, "color": "#FFD700"}
                },
                "items": [
                    {"name": "prize1", "color": "Blue", "checked": true},
                    {"name": "prize2", "color": "Purple", "checked": true},
                    {"name": "prize3", "color": "Gold", "checked": true}
                ]
            })
        );
    }

    #[test]
    fn test_serialize_preserves_insertion_order() {
        let mut pool = Pool::empty();
        for name in ["Zeta", "Alpha", "Mid"] {
            pool.add_category(Category::new(name, 1, RgbColor::default()).unwrap())
                .unwrap();
        }

        let json = serde_json::to_string(&pool).unwrap();
        let zeta = json.find("Zeta").unwrap();
        let alpha = json.find("Alpha").unwrap();
        let mid = json.find("Mid").unwrap();
        assert!(zeta < alpha && alpha < mid);
    }

    #[test]
    fn test_deserialize_preserves_document_order() {
        let json = r##"{
            "colors": {
                "Zeta": {"weight": 1, "color": "#111111"},
                "Alpha": {"weight": 2, "color": "#222222"},
                "Mid": {"weight": 3, "color": "#333333"}
            },
            "items": []
        }"##;
        let pool: Pool = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = pool.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_deserialize_missing_colors_falls_back_to_defaults() {
        let pool: Pool = serde_json::from_str(r#"{"items": []}"#).unwrap();
        let names: Vec<&str> = pool.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Blue", "Purple", "Gold"]);
    }

    #[test]
    fn test_deserialize_missing_items_is_empty() {
        let pool: Pool = serde_json::from_str(r#"{"colors": {}}"#).unwrap();
        assert!(pool.categories.is_empty());
        assert!(pool.items.is_empty());
    }

    #[test]
    fn test_roundtrip_preserves_fields() {
        let mut pool = pool_with_items();
        pool.toggle_item(pool.items[1].id).unwrap();

        let json = serde_json::to_string(&pool).unwrap();
        let loaded: Pool = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded.categories, pool.categories);
        assert_eq!(loaded.items.len(), pool.items.len());
        for (a, b) in loaded.items.iter().zip(&pool.items) {
            // Ids are process-local and regenerate on load; persisted fields match
            assert_eq!(a.name, b.name);
            assert_eq!(a.category, b.category);
            assert_eq!(a.active, b.active);
            assert_ne!(a.id, b.id);
        }
    }
}
