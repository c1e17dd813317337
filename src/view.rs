//! Pure view computation over a pool: filtering, sorting, index resolution.
//!
//! Views never mutate the pool. A [`ViewState`] describes which items to
//! show and in what order; [`rows`] derives the displayable lines, and
//! [`resolve_index`] maps a 1-based position in that display back to a
//! stable item id so mutations land on the right item even when the view
//! is filtered or reordered.

use crate::models::{ItemId, Pool, RgbColor};
use anyhow::{bail, Result};
use std::cmp::Reverse;

/// Which items a view includes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Every item regardless of category
    #[default]
    All,
    /// Only items referencing the named category (raw string match, so
    /// dangling references can still be listed by their old name)
    Category(String),
}

/// Sort key applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Keep pool insertion order untouched
    #[default]
    None,
    /// Registry insertion order of the referenced category
    Category,
    /// Inherited category weight
    Weight,
    /// Derived draw probability
    Probability,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Smallest key first
    #[default]
    Ascending,
    /// Largest key first
    Descending,
}

/// Complete view selection: filter, sort key, direction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    /// Category filter
    pub filter: CategoryFilter,
    /// Sort key
    pub sort_key: SortKey,
    /// Sort direction (ignored while the key is `None`)
    pub sort_order: SortOrder,
}

/// One displayable line of a view, with all derived fields resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Stable id of the underlying item
    pub id: ItemId,
    /// Item name
    pub name: String,
    /// Referenced category name
    pub category: String,
    /// Inherited weight (zero when the reference dangles)
    pub weight: u32,
    /// Inherited color (fallback white when the reference dangles)
    pub color: RgbColor,
    /// Whether the item participates in draws
    pub active: bool,
    /// Derived draw probability
    pub probability: f64,
    /// True when the referenced category is not in the registry
    pub dangling: bool,
}

/// Computes the rows of a view: filter, derive, then stable-sort.
///
/// Repeatable for an unchanged pool and view; computing a view never
/// mutates anything.
#[must_use]
pub fn rows(pool: &Pool, view: &ViewState) -> Vec<Row> {
    let probabilities = pool.probabilities();

    let mut out: Vec<Row> = pool
        .items
        .iter()
        .filter(|item| match &view.filter {
            CategoryFilter::All => true,
            CategoryFilter::Category(name) => item.category == *name,
        })
        .map(|item| Row {
            id: item.id,
            name: item.name.clone(),
            category: item.category.clone(),
            weight: pool.item_weight(item),
            color: pool.item_color(item),
            active: item.active,
            probability: probabilities.get(&item.id).copied().unwrap_or(0.0),
            dangling: pool.get_category(&item.category).is_none(),
        })
        .collect();

    sort_rows(pool, view, &mut out);
    out
}

/// Stable sorts throughout: ties keep their pool order in both directions.
fn sort_rows(pool: &Pool, view: &ViewState, rows: &mut [Row]) {
    match view.sort_key {
        SortKey::None => {}
        SortKey::Category => {
            // Dangling references order after every registered category
            let position = |row: &Row| pool.category_position(&row.category).unwrap_or(usize::MAX);
            match view.sort_order {
                SortOrder::Ascending => rows.sort_by_key(position),
                SortOrder::Descending => rows.sort_by_key(|r| Reverse(position(r))),
            }
        }
        SortKey::Weight => match view.sort_order {
            SortOrder::Ascending => rows.sort_by_key(|r| r.weight),
            SortOrder::Descending => rows.sort_by_key(|r| Reverse(r.weight)),
        },
        SortKey::Probability => match view.sort_order {
            SortOrder::Ascending => rows.sort_by(|a, b| a.probability.total_cmp(&b.probability)),
            SortOrder::Descending => rows.sort_by(|a, b| b.probability.total_cmp(&a.probability)),
        },
    }
}

/// Maps a 1-based position in the given view to the item's stable id.
///
/// # Errors
///
/// Returns an error if the index is zero or past the end of the view.
pub fn resolve_index(pool: &Pool, view: &ViewState, index: usize) -> Result<ItemId> {
    let view_rows = rows(pool, view);
    if index == 0 || index > view_rows.len() {
        bail!(
            "Index {index} is out of range: the current view has {} item(s)",
            view_rows.len()
        );
    }
    Ok(view_rows[index - 1].id)
}

/// Formats a probability for display, e.g. `0.3333` becomes `"33.33%"`.
#[must_use]
pub fn format_percent(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}
