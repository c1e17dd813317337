//! Weighted random draw command.
//!
//! Draws one or more winners from the active pool. Draws never modify the
//! pool file; the no-immediate-repeat rule only spans the draws made within
//! a single invocation.

use crate::cli::common::{resolve_data_path, CliError, CliResult};
use crate::draw::DrawEngine;
use crate::services::PoolStore;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Draw winners from the active pool
#[derive(Debug, Clone, Args)]
pub struct DrawArgs {
    /// Path to pool data file (defaults to the configured location)
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Number of winners to draw
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub count: u32,

    /// Seed for reproducible draws
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct DrawEntry {
    name: String,
    category: String,
    color: String,
}

#[derive(Debug, Serialize)]
struct DrawResponse {
    draws: Vec<DrawEntry>,
    count: usize,
}

impl DrawArgs {
    /// Execute the draw command
    pub fn execute(&self) -> CliResult<()> {
        if self.count == 0 {
            return Err(CliError::validation("Draw count must be at least 1"));
        }

        let data_path = resolve_data_path(self.data.as_deref())?;
        let pool = PoolStore::load(&data_path)
            .map_err(|e| CliError::io(format!("Failed to load pool: {e}")))?;

        let mut engine = match self.seed {
            Some(seed) => DrawEngine::seeded(seed),
            None => DrawEngine::new(),
        };

        let mut draws = Vec::with_capacity(self.count as usize);
        for _ in 0..self.count {
            let outcome = engine
                .draw(&pool)
                .map_err(|e| CliError::validation(format!("Cannot draw: {e}")))?;
            draws.push(DrawEntry {
                name: outcome.name,
                category: outcome.category,
                color: outcome.color.to_hex(),
            });
        }

        if self.json {
            let response = DrawResponse {
                count: draws.len(),
                draws,
            };
            println!(
                "{}",
                serde_json::to_string(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            for entry in &draws {
                println!("Winner: {} ({})", entry.name, entry.category);
            }
        }

        Ok(())
    }
}
