//! apiwrap CLI - Binding generator driver
//!
//! Commands:
//! - `apiwrap generate` - Generate the binding model from an API description
//! - `apiwrap check` - Validate an apiwrap.toml manifest
//!
//! Generation failures exit with `10 + GenError::error_code()`; any other
//! failure exits with `1`.

use apiwrap_core::{GenError, LogLevel};
use clap::{Parser, Subcommand};

mod generate;
mod manifest;

#[derive(Parser)]
#[command(name = "apiwrap")]
#[command(author, version, about = "Binding generator for native C libraries", long_about = None)]
struct Cli {
    /// Logging level (trace, debug, info, warn, error, off); APIWRAP_LOG overrides it
    #[arg(long, global = true, default_value = "warn")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the binding model from an API description tree
    Generate {
        /// Path to the API description (JSON tree)
        #[arg(short, long)]
        api: String,

        /// Output path for the generated model
        #[arg(short, long)]
        output: String,

        /// Path to apiwrap.toml manifest (default: built-in settings)
        #[arg(short, long)]
        manifest: Option<String>,
    },

    /// Validate an apiwrap.toml manifest
    Check {
        /// Path to apiwrap.toml (default: ./apiwrap.toml)
        #[arg(short, long)]
        manifest: Option<String>,
    },
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            api,
            output,
            manifest,
        } => {
            generate::run(&api, &output, manifest)?;
        }
        Commands::Check { manifest } => {
            manifest::check(manifest)?;
        }
    }

    Ok(())
}

fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<GenError>()
        .map_or(1, |gen_err| 10 + gen_err.error_code() as i32)
}

fn main() {
    let cli = Cli::parse();
    apiwrap_logging::init_logging_from_env(cli.log_level);

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(exit_code(&err));
    }
}
