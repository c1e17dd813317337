//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and well-known file names.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Prize Wheel";

/// The binary name of the application (used in command examples, lowercase).
pub const APP_BINARY_NAME: &str = "prizewheel";

/// Directory name under the platform config directory holding app state.
pub const CONFIG_DIR_NAME: &str = "PrizeWheel";

/// File name of the persisted prize pool inside the config directory.
pub const DATA_FILE_NAME: &str = "data.json";

/// Environment variable overriding the config directory (used by tests).
pub const CONFIG_DIR_ENV: &str = "PRIZEWHEEL_CONFIG_DIR";
