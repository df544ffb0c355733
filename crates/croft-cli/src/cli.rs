//! CLI argument parsing and command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// ============================================================================
// CLI argument types
// ============================================================================

/// Top-level arguments.
#[derive(Parser, Debug)]
#[command(name = "croft", author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "CROFT_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the `<name>-index.json` manifest for a content directory.
    Index {
        /// Directory of `.md` documents.
        dir: PathBuf,

        /// Output file (defaults to `<parent>/<name>-index.json`).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print one document as a normalized JSON record.
    Show {
        /// Markdown file to read.
        file: PathBuf,

        /// Schema to normalize with: product, animal or page.
        #[arg(short, long, default_value = "page")]
        schema: String,

        /// Also print skipped or overwritten frontmatter lines.
        #[arg(long)]
        diagnostics: bool,
    },

    /// Load a collection and print one line per record.
    List {
        /// Collection directory under the content root (e.g. "products").
        collection: String,

        /// Schema to normalize with (defaults to the collection name).
        #[arg(short, long)]
        schema: Option<String>,

        /// Only products in this category slug.
        #[arg(long)]
        category: Option<String>,

        /// Include products marked unavailable.
        #[arg(long)]
        include_unavailable: bool,
    },

    /// Cart operations.
    Cart(CartCommand),

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Cart-specific subcommands.
#[derive(Parser, Debug)]
pub struct CartCommand {
    /// Cart subcommand to execute.
    #[command(subcommand)]
    pub command: CartAction,
}

/// Available cart subcommands.
#[derive(Subcommand, Debug)]
pub enum CartAction {
    /// Add one of a product, by its document slug.
    Add {
        /// Product slug under `products/`.
        slug: String,
    },

    /// Remove a line.
    Remove {
        /// Item id.
        id: String,
    },

    /// Set a line's quantity (0 removes it).
    Set {
        /// Item id.
        id: String,

        /// New quantity.
        quantity: u32,
    },

    /// Print the cart.
    Show,

    /// Empty the cart.
    Clear,
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Get a configuration value by dotted key.
    Get {
        /// Dotted key (e.g., "content.path").
        key: String,
    },

    /// Set a configuration value by dotted key.
    Set {
        /// Dotted key (e.g., "content.base_url").
        key: String,

        /// Value to set.
        value: String,
    },

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },

    /// Export configuration as environment variables.
    Export {
        /// Format as Docker --env flags.
        #[arg(long)]
        docker_env: bool,
    },
}
