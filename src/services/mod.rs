//! Service layer for pool persistence.
//!
//! This module contains services that sit between the data models and the
//! file system, keeping I/O concerns out of the models themselves.

pub mod store;

// Re-export commonly used types and functions
pub use store::PoolStore;
