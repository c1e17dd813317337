//! Category management commands for the prize pool.
//!
//! Provides commands to list, add, remove, and edit weight categories in a
//! pool file.

use crate::cli::common::{resolve_data_path, CliError, CliResult};
use crate::models::{Category, RgbColor};
use crate::services::PoolStore;
use clap::{Args, Subcommand};
use regex::Regex;
use serde::Serialize;
use std::path::PathBuf;

/// Manage weight categories in the pool
#[derive(Debug, Clone, Args)]
pub struct CategoryArgs {
    /// Category subcommand
    #[command(subcommand)]
    pub command: CategoryCommand,
}

/// Category management subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum CategoryCommand {
    /// List all categories in the pool
    List(ListCategoriesArgs),
    /// Add a new category to the pool
    Add(AddCategoryArgs),
    /// Remove a category from the pool
    Remove(RemoveCategoryArgs),
    /// Edit an existing category's weight or color in place
    Set(SetCategoryArgs),
}

/// List all categories in the pool
#[derive(Debug, Clone, Args)]
pub struct ListCategoriesArgs {
    /// Path to pool data file (defaults to the configured location)
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Add a new category to the pool
#[derive(Debug, Clone, Args)]
pub struct AddCategoryArgs {
    /// Path to pool data file (defaults to the configured location)
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Category name
    #[arg(long, value_name = "NAME")]
    pub name: String,

    /// Draw weight (non-negative integer; zero excludes the category from draws)
    #[arg(long, value_name = "WEIGHT")]
    pub weight: u32,

    /// Color in hex format (#RRGGBB or #RGB)
    #[arg(long, value_name = "HEX")]
    pub color: String,
}

/// Remove a category from the pool
#[derive(Debug, Clone, Args)]
pub struct RemoveCategoryArgs {
    /// Path to pool data file (defaults to the configured location)
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Category name to remove
    #[arg(long, value_name = "NAME")]
    pub name: String,

    /// Force removal even if items still reference the category
    #[arg(long)]
    pub force: bool,
}

/// Edit an existing category in place
#[derive(Debug, Clone, Args)]
pub struct SetCategoryArgs {
    /// Path to pool data file (defaults to the configured location)
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Category name to edit
    #[arg(long, value_name = "NAME")]
    pub name: String,

    /// New draw weight
    #[arg(long, value_name = "WEIGHT")]
    pub weight: Option<u32>,

    /// New color in hex format (#RRGGBB or #RGB)
    #[arg(long, value_name = "HEX")]
    pub color: Option<String>,
}

// JSON response types
#[derive(Debug, Serialize)]
struct CategoryEntry {
    name: String,
    weight: u32,
    color: String,
    items: usize,
}

#[derive(Debug, Serialize)]
struct ListCategoriesResponse {
    categories: Vec<CategoryEntry>,
    count: usize,
}

impl CategoryArgs {
    /// Execute the category command
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            CategoryCommand::List(args) => args.execute(),
            CategoryCommand::Add(args) => args.execute(),
            CategoryCommand::Remove(args) => args.execute(),
            CategoryCommand::Set(args) => args.execute(),
        }
    }
}

impl ListCategoriesArgs {
    /// Execute the list command
    pub fn execute(&self) -> CliResult<()> {
        let data_path = resolve_data_path(self.data.as_deref())?;
        let pool = PoolStore::load(&data_path)
            .map_err(|e| CliError::io(format!("Failed to load pool: {e}")))?;

        let categories: Vec<CategoryEntry> = pool
            .categories
            .iter()
            .map(|cat| CategoryEntry {
                name: cat.name.clone(),
                weight: cat.weight,
                color: cat.color.to_hex(),
                items: pool.items_in_category(&cat.name),
            })
            .collect();

        let response = ListCategoriesResponse {
            count: categories.len(),
            categories,
        };

        if self.json {
            println!(
                "{}",
                serde_json::to_string(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else if response.count == 0 {
            println!("No categories defined.");
        } else {
            println!("Categories ({}):", response.count);
            println!();
            for cat in response.categories {
                println!(
                    "  {:<20} {:>6}  {}  {} item(s)",
                    cat.name, cat.weight, cat.color, cat.items
                );
            }
        }

        Ok(())
    }
}

impl AddCategoryArgs {
    /// Execute the add command
    pub fn execute(&self) -> CliResult<()> {
        let data_path = resolve_data_path(self.data.as_deref())?;
        let mut pool = PoolStore::load(&data_path)
            .map_err(|e| CliError::io(format!("Failed to load pool: {e}")))?;

        // Validate hex color format
        let color = validate_and_parse_hex(&self.color).map_err(CliError::validation)?;

        // Create category with validation
        let category = Category::new(&self.name, self.weight, color)
            .map_err(|e| CliError::validation(format!("Invalid category: {e}")))?;

        // Check if category already exists
        if pool.get_category(&self.name).is_some() {
            return Err(CliError::validation(format!(
                "Category '{}' already exists",
                self.name
            )));
        }

        pool.add_category(category)
            .map_err(|e| CliError::validation(format!("Failed to add category: {e}")))?;

        PoolStore::save(&pool, &data_path)
            .map_err(|e| CliError::io(format!("Failed to save pool: {e}")))?;

        println!("Category '{}' added successfully.", self.name);
        Ok(())
    }
}

impl RemoveCategoryArgs {
    /// Execute the remove command
    pub fn execute(&self) -> CliResult<()> {
        let data_path = resolve_data_path(self.data.as_deref())?;
        let mut pool = PoolStore::load(&data_path)
            .map_err(|e| CliError::io(format!("Failed to load pool: {e}")))?;

        // Check if category exists
        if pool.get_category(&self.name).is_none() {
            return Err(CliError::validation(format!(
                "Category '{}' not found",
                self.name
            )));
        }

        // Check if category is in use (unless --force)
        let referencing = pool.items_in_category(&self.name);
        if referencing > 0 && !self.force {
            return Err(CliError::validation(format!(
                "Category '{}' is referenced by {} item(s). Use --force to remove anyway.",
                self.name, referencing
            )));
        }

        // Remove the category only; referencing items stay in the pool with
        // dangling references and zero weight
        pool.remove_category(&self.name);

        PoolStore::save(&pool, &data_path)
            .map_err(|e| CliError::io(format!("Failed to save pool: {e}")))?;

        if referencing > 0 {
            println!(
                "Category '{}' removed; {} item(s) now reference a missing category.",
                self.name, referencing
            );
        } else {
            println!("Category '{}' removed successfully.", self.name);
        }
        Ok(())
    }
}

impl SetCategoryArgs {
    /// Execute the set command
    pub fn execute(&self) -> CliResult<()> {
        // At least one argument must be provided
        if self.weight.is_none() && self.color.is_none() {
            return Err(CliError::validation(
                "At least one option must be specified: --weight or --color",
            ));
        }

        let data_path = resolve_data_path(self.data.as_deref())?;
        let mut pool = PoolStore::load(&data_path)
            .map_err(|e| CliError::io(format!("Failed to load pool: {e}")))?;

        // Parse the color before taking the mutable borrow
        let color = match &self.color {
            Some(hex) => Some(validate_and_parse_hex(hex).map_err(CliError::validation)?),
            None => None,
        };

        let Some(category) = pool.get_category_mut(&self.name) else {
            return Err(CliError::validation(format!(
                "Category '{}' not found",
                self.name
            )));
        };

        if let Some(weight) = self.weight {
            category.set_weight(weight);
        }
        if let Some(color) = color {
            category.set_color(color);
        }

        PoolStore::save(&pool, &data_path)
            .map_err(|e| CliError::io(format!("Failed to save pool: {e}")))?;

        println!("Category '{}' updated successfully.", self.name);
        Ok(())
    }
}

/// Validates hex color format (#RRGGBB or #RGB) and returns `RgbColor`
pub(crate) fn validate_and_parse_hex(color: &str) -> Result<RgbColor, String> {
    // Match #RRGGBB or #RGB format
    let hex_regex = Regex::new(r"^#([0-9A-Fa-f]{6}|[0-9A-Fa-f]{3})$")
        .map_err(|_| "Failed to create hex regex".to_string())?;

    if !hex_regex.is_match(color) {
        return Err(format!(
            "Invalid hex color format: '{color}'. Expected #RRGGBB or #RGB"
        ));
    }

    // Expand short hex format (#RGB -> #RRGGBB)
    let expanded_color = if color.len() == 4 {
        // #RGB format - expand each digit
        let hex = &color[1..]; // remove #
        format!(
            "#{}{}{}{}{}{}",
            &hex[0..1],
            &hex[0..1],
            &hex[1..2],
            &hex[1..2],
            &hex[2..3],
            &hex[2..3]
        )
    } else {
        color.to_string()
    };

    RgbColor::from_hex(&expanded_color).map_err(|e| format!("Failed to parse color: {e}"))
}
