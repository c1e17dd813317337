//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Some fixtures reserved for future tests

use prizewheel::models::{Category, Item, Pool, RgbColor};
use prizewheel::services::PoolStore;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Path to the prizewheel binary (set by cargo at compile time)
pub fn prizewheel_bin() -> &'static str {
    env!("CARGO_BIN_EXE_prizewheel")
}

/// Creates a Command with an isolated config directory.
///
/// Pass in a config directory path to share state between multiple commands
/// in the same test; commands never touch the real user config this way.
pub fn isolated_command(args: &[&str], config_dir: &Path) -> Command {
    let mut cmd = Command::new(prizewheel_bin());
    cmd.env("PRIZEWHEEL_CONFIG_DIR", config_dir);
    cmd.args(args);
    cmd
}

/// Creates a pool with the built-in registry and four items.
///
/// Weights: Alice/Bob in Blue (50 each), Carol in Purple (30), Dave in
/// Gold (20). Total active weight 150.
pub fn test_pool_basic() -> Pool {
    let mut pool = Pool::default();
    for (name, category) in [
        ("Alice", "Blue"),
        ("Bob", "Blue"),
        ("Carol", "Purple"),
        ("Dave", "Gold"),
    ] {
        pool.add_item(Item::new(name, category).expect("Should create item"))
            .expect("Should add item");
    }
    pool
}

/// Creates a two-item pool split 50/50 across two categories.
///
/// Useful for draw statistics and for forcing strict alternation under the
/// no-immediate-repeat rule.
pub fn test_pool_even_pair() -> Pool {
    let mut pool = Pool::empty();
    pool.add_category(Category::new("Heads", 50, RgbColor::new(255, 0, 0)).expect("Should create"))
        .expect("Should add category");
    pool.add_category(Category::new("Tails", 50, RgbColor::new(0, 0, 255)).expect("Should create"))
        .expect("Should add category");
    pool.add_item(Item::new("left", "Heads").expect("Should create item"))
        .expect("Should add item");
    pool.add_item(Item::new("right", "Tails").expect("Should create item"))
        .expect("Should add item");
    pool
}

/// Writes a pool to a JSON file for CLI testing.
pub fn write_pool_file(pool: &Pool, path: &Path) -> std::io::Result<()> {
    PoolStore::save(pool, path).map_err(|e| std::io::Error::other(e.to_string()))
}

/// Creates a pool file in a temp directory and returns the path.
pub fn create_temp_pool_file(pool: &Pool) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let pool_path = temp_dir.path().join("test_pool.json");
    write_pool_file(pool, &pool_path).expect("Failed to write pool file");
    (pool_path, temp_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_basic_pool() {
        let pool = test_pool_basic();
        assert_eq!(pool.categories.len(), 3);
        assert_eq!(pool.items.len(), 4);
        assert_eq!(pool.total_active_weight(), 150);
    }

    #[test]
    fn test_fixture_even_pair() {
        let pool = test_pool_even_pair();
        assert_eq!(pool.items.len(), 2);
        let probs = pool.probabilities();
        assert!(probs.values().all(|p| (p - 0.5).abs() < 1e-9));
    }

    #[test]
    fn test_fixture_pool_file_roundtrip() {
        let pool = test_pool_basic();
        let (pool_path, _temp_dir) = create_temp_pool_file(&pool);
        let loaded = PoolStore::load(&pool_path).expect("Should load");
        assert_eq!(loaded.categories, pool.categories);
        assert_eq!(loaded.items.len(), pool.items.len());
    }
}
