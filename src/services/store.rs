//! Pool file I/O service.
//!
//! This module centralizes all pool file operations, providing a consistent
//! interface for loading and saving the persisted JSON document.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::Config;
use crate::constants::DATA_FILE_NAME;
use crate::models::Pool;

/// Service for managing pool file I/O operations.
///
/// This service centralizes all pool file operations to ensure consistent
/// handling of file paths, error messages, and file system operations.
pub struct PoolStore;

impl PoolStore {
    /// Loads a pool from a JSON file.
    ///
    /// An absent file is not an error: the built-in default registry with an
    /// empty item list is returned, matching first-run behavior. A file that
    /// exists but cannot be read or parsed is an error; the file is left
    /// untouched so it can be repaired by hand.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the pool file to load
    ///
    /// # Returns
    ///
    /// * `Ok(Pool)` - Successfully parsed pool (or defaults for an absent file)
    /// * `Err(...)` - Read error or parse error
    pub fn load(path: &Path) -> Result<Pool> {
        if !path.exists() {
            debug!("pool file {} absent, starting from defaults", path.display());
            return Ok(Pool::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read pool file: {}", path.display()))?;

        let pool: Pool = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse pool file: {}", path.display()))?;

        pool.validate()
            .with_context(|| format!("Invalid pool file: {}", path.display()))?;

        debug!(
            "loaded {} categories and {} items from {}",
            pool.categories.len(),
            pool.items.len(),
            path.display()
        );

        Ok(pool)
    }

    /// Saves a pool to a JSON file.
    ///
    /// This performs an atomic write using a temp file + rename pattern to
    /// ensure the file is never left in a corrupted state. Parent directories
    /// are created as needed.
    ///
    /// # Arguments
    ///
    /// * `pool` - The pool to save
    /// * `path` - Path where the pool should be saved
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Pool successfully saved
    /// * `Err(...)` - I/O error, permission error, or atomic rename failure
    pub fn save(pool: &Pool, path: &Path) -> Result<()> {
        pool.validate()?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create data directory: {}", parent.display())
                })?;
            }
        }

        let content =
            serde_json::to_string_pretty(pool).context("Failed to serialize pool to JSON")?;

        let temp_path = path.with_extension("json.tmp");

        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write temp pool file: {}", temp_path.display()))?;

        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to rename temp pool file to: {}", path.display()))?;

        info!(
            "saved {} categories and {} items to {}",
            pool.categories.len(),
            pool.items.len(),
            path.display()
        );

        Ok(())
    }

    /// Gets the default pool file location inside the config directory.
    pub fn default_data_path() -> Result<PathBuf> {
        Ok(Config::config_dir()?.join(DATA_FILE_NAME))
    }
}
