//! Shared types for CLI command handlers.
//!
//! Defines the two-class error taxonomy every command maps its failures
//! onto, the exit codes those classes translate to, and the resolution of
//! the pool data file path shared by all pool-touching commands.

use crate::config::Config;
use crate::services::PoolStore;
use std::fmt;
use std::path::{Path, PathBuf};

/// Error raised by a CLI command.
///
/// Validation failures are user-correctable input problems (bad arguments,
/// unknown names, empty pools); I/O failures are environment problems
/// (unreadable files, failed writes). The two classes map to distinct exit
/// codes so scripts can tell them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// Invalid input or request; the operation was refused before any
    /// state changed
    Validation(String),
    /// File system or serialization failure
    Io(String),
}

impl CliError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }

    /// The exit code this error terminates the process with.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::Validation(_) => ExitCode::ValidationError,
            Self::Io(_) => ExitCode::IoError,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(msg) | Self::Io(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result alias for CLI command handlers.
pub type CliResult<T> = Result<T, CliError>;

/// Process exit codes for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed successfully
    Success = 0,
    /// Input validation failed; nothing was changed
    ValidationError = 1,
    /// File system or serialization failure
    IoError = 2,
}

impl ExitCode {
    /// Numeric code passed to `std::process::exit`.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Resolves the pool data file path for a command.
///
/// Resolution order: explicit `--data` flag, then `paths.data_file` from the
/// config file, then `data.json` inside the config directory.
pub fn resolve_data_path(flag: Option<&Path>) -> CliResult<PathBuf> {
    if let Some(path) = flag {
        return Ok(path.to_path_buf());
    }

    let config = Config::load()
        .map_err(|e| CliError::io(format!("Failed to load configuration: {e}")))?;

    if let Some(path) = config.paths.data_file {
        return Ok(path);
    }

    PoolStore::default_data_path()
        .map_err(|e| CliError::io(format!("Failed to resolve data file location: {e}")))
}
