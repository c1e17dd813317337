//! Item management commands for the prize pool.
//!
//! Provides commands to list, add, remove, and toggle pool items. The
//! `remove` and `toggle` commands address an item by its 1-based position in
//! the displayed view, so they accept the same filter/sort flags as `list`
//! and resolve the position to a stable item id before mutating anything.

use crate::cli::common::{resolve_data_path, CliError, CliResult};
use crate::models::Item;
use crate::services::PoolStore;
use crate::view::{self, CategoryFilter, SortKey, SortOrder, ViewState};
use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

/// Manage items in the pool
#[derive(Debug, Clone, Args)]
pub struct ItemArgs {
    /// Item subcommand
    #[command(subcommand)]
    pub command: ItemCommand,
}

/// Item management subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum ItemCommand {
    /// List pool items with their derived probabilities
    List(ListItemsArgs),
    /// Add a new item to the pool
    Add(AddItemArgs),
    /// Remove an item by its position in the displayed view
    Remove(RemoveItemArgs),
    /// Toggle an item's active flag by its position in the displayed view
    Toggle(ToggleItemArgs),
}

/// Sort key selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortKeyArg {
    /// Keep pool insertion order
    #[default]
    None,
    /// Registry insertion order of the referenced category
    Category,
    /// Inherited category weight
    Weight,
    /// Derived draw probability
    Probability,
}

/// Sort direction selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortOrderArg {
    /// Smallest key first
    #[default]
    Asc,
    /// Largest key first
    Desc,
}

/// View selection flags shared by `list`, `remove`, and `toggle`
#[derive(Debug, Clone, Args)]
pub struct ViewFlags {
    /// Show only items in the given category ("all" for every item)
    #[arg(long, value_name = "CATEGORY", default_value = "all")]
    pub filter: String,

    /// Sort key applied after filtering
    #[arg(long, value_name = "KEY", value_enum, default_value_t = SortKeyArg::None)]
    pub sort: SortKeyArg,

    /// Sort direction (ignored while the sort key is "none")
    #[arg(long, value_name = "ORDER", value_enum, default_value_t = SortOrderArg::Asc)]
    pub order: SortOrderArg,
}

impl ViewFlags {
    /// Builds the view state these flags describe.
    fn view_state(&self) -> ViewState {
        let filter = if self.filter.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(self.filter.clone())
        };

        let sort_key = match self.sort {
            SortKeyArg::None => SortKey::None,
            SortKeyArg::Category => SortKey::Category,
            SortKeyArg::Weight => SortKey::Weight,
            SortKeyArg::Probability => SortKey::Probability,
        };

        let sort_order = match self.order {
            SortOrderArg::Asc => SortOrder::Ascending,
            SortOrderArg::Desc => SortOrder::Descending,
        };

        ViewState {
            filter,
            sort_key,
            sort_order,
        }
    }
}

/// List pool items with their derived probabilities
#[derive(Debug, Clone, Args)]
pub struct ListItemsArgs {
    /// Path to pool data file (defaults to the configured location)
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// View selection
    #[command(flatten)]
    pub view: ViewFlags,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Add a new item to the pool
#[derive(Debug, Clone, Args)]
pub struct AddItemArgs {
    /// Path to pool data file (defaults to the configured location)
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Item name
    #[arg(long, value_name = "NAME")]
    pub name: String,

    /// Weight category the item belongs to (must exist in the registry)
    #[arg(long, value_name = "CATEGORY")]
    pub category: String,
}

/// Remove an item by its position in the displayed view
#[derive(Debug, Clone, Args)]
pub struct RemoveItemArgs {
    /// Path to pool data file (defaults to the configured location)
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// 1-based position of the item in the displayed view
    #[arg(long, value_name = "INDEX")]
    pub index: usize,

    /// View selection the index refers to
    #[command(flatten)]
    pub view: ViewFlags,
}

/// Toggle an item's active flag by its position in the displayed view
#[derive(Debug, Clone, Args)]
pub struct ToggleItemArgs {
    /// Path to pool data file (defaults to the configured location)
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// 1-based position of the item in the displayed view
    #[arg(long, value_name = "INDEX")]
    pub index: usize,

    /// View selection the index refers to
    #[command(flatten)]
    pub view: ViewFlags,
}

// JSON response types
#[derive(Debug, Serialize)]
struct ItemEntry {
    index: usize,
    name: String,
    category: String,
    weight: u32,
    color: String,
    active: bool,
    probability: f64,
    dangling: bool,
}

#[derive(Debug, Serialize)]
struct ListItemsResponse {
    items: Vec<ItemEntry>,
    count: usize,
}

impl ItemArgs {
    /// Execute the item command
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ItemCommand::List(args) => args.execute(),
            ItemCommand::Add(args) => args.execute(),
            ItemCommand::Remove(args) => args.execute(),
            ItemCommand::Toggle(args) => args.execute(),
        }
    }
}

impl ListItemsArgs {
    /// Execute the list command
    pub fn execute(&self) -> CliResult<()> {
        let data_path = resolve_data_path(self.data.as_deref())?;
        let pool = PoolStore::load(&data_path)
            .map_err(|e| CliError::io(format!("Failed to load pool: {e}")))?;

        let rows = view::rows(&pool, &self.view.view_state());

        let items: Vec<ItemEntry> = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| ItemEntry {
                index: idx + 1,
                name: row.name.clone(),
                category: row.category.clone(),
                weight: row.weight,
                color: row.color.to_hex(),
                active: row.active,
                probability: row.probability,
                dangling: row.dangling,
            })
            .collect();

        let response = ListItemsResponse {
            count: items.len(),
            items,
        };

        if self.json {
            println!(
                "{}",
                serde_json::to_string(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else if response.count == 0 {
            println!("No items to show.");
        } else {
            println!("Items ({}):", response.count);
            println!();
            for item in response.items {
                let mark = if item.active { "✓" } else { " " };
                let category = if item.dangling {
                    format!("{} (missing)", item.category)
                } else {
                    item.category
                };
                println!(
                    "  {:>3} {} {:<20} {:<20} {:>6}  {:>8}",
                    item.index,
                    mark,
                    item.name,
                    category,
                    item.weight,
                    view::format_percent(item.probability)
                );
            }
        }

        Ok(())
    }
}

impl AddItemArgs {
    /// Execute the add command
    pub fn execute(&self) -> CliResult<()> {
        let data_path = resolve_data_path(self.data.as_deref())?;
        let mut pool = PoolStore::load(&data_path)
            .map_err(|e| CliError::io(format!("Failed to load pool: {e}")))?;

        let item = Item::new(&self.name, &self.category)
            .map_err(|e| CliError::validation(format!("Invalid item: {e}")))?;

        pool.add_item(item)
            .map_err(|e| CliError::validation(format!("Failed to add item: {e}")))?;

        PoolStore::save(&pool, &data_path)
            .map_err(|e| CliError::io(format!("Failed to save pool: {e}")))?;

        println!(
            "Item '{}' added to category '{}'.",
            self.name, self.category
        );
        Ok(())
    }
}

impl RemoveItemArgs {
    /// Execute the remove command
    pub fn execute(&self) -> CliResult<()> {
        let data_path = resolve_data_path(self.data.as_deref())?;
        let mut pool = PoolStore::load(&data_path)
            .map_err(|e| CliError::io(format!("Failed to load pool: {e}")))?;

        // Map the displayed position to a stable id before mutating
        let id = view::resolve_index(&pool, &self.view.view_state(), self.index)
            .map_err(|e| CliError::validation(e.to_string()))?;

        let Some(removed) = pool.remove_item(id) else {
            return Err(CliError::validation(format!(
                "No item at index {}",
                self.index
            )));
        };

        PoolStore::save(&pool, &data_path)
            .map_err(|e| CliError::io(format!("Failed to save pool: {e}")))?;

        println!("Item '{}' removed successfully.", removed.name);
        Ok(())
    }
}

impl ToggleItemArgs {
    /// Execute the toggle command
    pub fn execute(&self) -> CliResult<()> {
        let data_path = resolve_data_path(self.data.as_deref())?;
        let mut pool = PoolStore::load(&data_path)
            .map_err(|e| CliError::io(format!("Failed to load pool: {e}")))?;

        // Map the displayed position to a stable id before mutating
        let id = view::resolve_index(&pool, &self.view.view_state(), self.index)
            .map_err(|e| CliError::validation(e.to_string()))?;

        let Some(active) = pool.toggle_item(id) else {
            return Err(CliError::validation(format!(
                "No item at index {}",
                self.index
            )));
        };

        let name = pool
            .get_item(id)
            .map_or_else(String::new, |item| item.name.clone());

        PoolStore::save(&pool, &data_path)
            .map_err(|e| CliError::io(format!("Failed to save pool: {e}")))?;

        if active {
            println!("Item '{name}' is now active.");
        } else {
            println!("Item '{name}' is now inactive.");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(filter: &str, sort: SortKeyArg, order: SortOrderArg) -> ViewFlags {
        ViewFlags {
            filter: filter.to_string(),
            sort,
            order,
        }
    }

    #[test]
    fn test_view_flags_all_filter() {
        let state = flags("all", SortKeyArg::None, SortOrderArg::Asc).view_state();
        assert_eq!(state.filter, CategoryFilter::All);
        assert_eq!(state.sort_key, SortKey::None);
        assert_eq!(state.sort_order, SortOrder::Ascending);

        // "ALL" is accepted case-insensitively
        let state = flags("ALL", SortKeyArg::None, SortOrderArg::Asc).view_state();
        assert_eq!(state.filter, CategoryFilter::All);
    }

    #[test]
    fn test_view_flags_category_filter_keeps_case() {
        let state = flags("Blue", SortKeyArg::Weight, SortOrderArg::Desc).view_state();
        assert_eq!(state.filter, CategoryFilter::Category("Blue".to_string()));
        assert_eq!(state.sort_key, SortKey::Weight);
        assert_eq!(state.sort_order, SortOrder::Descending);
    }

    #[test]
    fn test_view_flags_sort_keys_map_across() {
        let pairs = [
            (SortKeyArg::None, SortKey::None),
            (SortKeyArg::Category, SortKey::Category),
            (SortKeyArg::Weight, SortKey::Weight),
            (SortKeyArg::Probability, SortKey::Probability),
        ];
        for (arg, key) in pairs {
            let state = flags("all", arg, SortOrderArg::Asc).view_state();
            assert_eq!(state.sort_key, key);
        }
    }
}
