//! CLI command handlers for Prize Wheel.
//!
//! This module provides headless, scriptable access to the prize pool for
//! automation, testing, and CI/CD integration.

pub mod category;
pub mod common;
pub mod config;
pub mod draw;
pub mod item;

// Re-export types used by main.rs and tests
pub use category::CategoryArgs;
pub use common::ExitCode;
pub use config::ConfigArgs;
pub use draw::DrawArgs;
pub use item::ItemArgs;
