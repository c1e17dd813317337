//! Data models for the prize pool, its categories, and items.
//!
//! This module contains all the core data structures used throughout the
//! application. Models are designed to be independent of presentation and
//! business logic.

pub mod category;
pub mod item;
pub mod pool;
pub mod rgb;

// Re-export all model types
pub use category::Category;
pub use item::{Item, ItemId};
pub use pool::Pool;
pub use rgb::RgbColor;
