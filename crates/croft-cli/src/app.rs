//! Command dispatch and logging setup.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::cli::{CliArgs, Command};
use crate::commands::{self, ListOptions};
use crate::config::CroftConfig;
use crate::config_handlers;

/// Initialise tracing-based logging.
///
/// Uses `RUST_LOG` if set, otherwise defaults based on verbosity flags.
/// Library crates log through `log`, which the subscriber picks up.
pub fn init_logging(verbose: bool, quiet: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if quiet {
        EnvFilter::new("warn")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Ignore error if a subscriber is already set (e.g. in tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(path: Option<&str>) -> Result<CroftConfig> {
    let config = CroftConfig::load(path)?;
    tracing::debug!(content = %config.content.path, "Configuration loaded");
    Ok(config)
}

/// Run the CLI with the given arguments.
pub async fn run(args: CliArgs) -> Result<()> {
    init_logging(args.verbose, args.quiet);

    let Some(command) = args.command else {
        println!("croft {}, use --help for usage", env!("CARGO_PKG_VERSION"));
        return Ok(());
    };

    match command {
        Command::Index { dir, output } => {
            println!("{}", commands::cmd_index(&dir, output.as_deref())?);
        }
        Command::Show {
            file,
            schema,
            diagnostics,
        } => commands::run_show(&file, &schema, diagnostics)?,
        Command::List {
            collection,
            schema,
            category,
            include_unavailable,
        } => {
            let config = load_config(args.config.as_deref())?;
            let options = ListOptions {
                schema,
                category,
                include_unavailable,
            };
            commands::run_list(&config, &collection, &options).await?;
        }
        Command::Cart(cart_cmd) => {
            let config = load_config(args.config.as_deref())?;
            commands::run_cart(&config, cart_cmd.command).await?;
        }
        // Works on the file itself, even when it does not load.
        Command::Config(config_cmd) => {
            config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)?;
        }
    }
    Ok(())
}
