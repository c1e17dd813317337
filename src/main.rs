//! Prize Wheel - Weighted prize pool manager
//!
//! Command-line tool for managing a weighted prize pool: categories carry
//! weights and colors, items inherit the weight of their category, and
//! winners are drawn at random in proportion to those weights.
//!
//! # Usage
//!
//! ```bash
//! prizewheel category add --name Gold --weight 20 --color '#FFD700'
//! prizewheel item add --name "Alice" --category Gold
//! prizewheel draw --count 3
//! ```

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use prizewheel::cli::{CategoryArgs, ConfigArgs, DrawArgs, ItemArgs};
use prizewheel::constants::APP_BINARY_NAME;

/// Prize Wheel - Weighted prize pool manager
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage weight categories
    Category(CategoryArgs),
    /// Manage pool items
    Item(ItemArgs),
    /// Draw winners from the active pool
    Draw(DrawArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so --json output stays parseable
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match cli.command {
        Commands::Category(args) => args.execute(),
        Commands::Item(args) => args.execute(),
        Commands::Draw(args) => args.execute(),
        Commands::Config(args) => args.execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code().code());
    }
}
