//! Prize Wheel Library
//!
//! This library provides core functionality for the Prize Wheel application,
//! including the weighted category registry, the prize item pool with derived
//! probabilities, filtered and sorted pool views, weighted random draws, and
//! JSON persistence of the pool.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod draw;
pub mod models;
pub mod services;
pub mod view;
