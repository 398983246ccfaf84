use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod cli;

#[derive(Parser)]
#[command(name = "replcalc")]
#[command(about = "Menu-driven calculator with pluggable commands", long_about = None)]
struct Cli {
    /// Directory of JSON-defined plugins (overrides REPLCALC_PLUGINS_DIR)
    #[arg(long, global = true)]
    plugins_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive menu (default)
    Repl,
    /// Evaluate one calculation, e.g. `replcalc calc add 1 2 3`
    Calc {
        /// add, subtract, multiply or divide
        operation: String,
        /// Operands, applied left to right
        #[arg(allow_negative_numbers = true)]
        operands: Vec<String>,
    },
    /// Run plugin discovery and show what was loaded
    Plugins,
    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = cli::load_config()?;
    if let Some(dir) = cli.plugins_dir {
        config.plugins_dir = Some(dir);
    }

    cli::init_logging(&config)?;

    match cli.command {
        Some(Commands::Repl) | None => cli::repl::cmd_repl(&config),
        Some(Commands::Calc {
            operation,
            operands,
        }) => cli::calc::cmd_calc(&operation, &operands),
        Some(Commands::Plugins) => cli::plugins::cmd_plugins(&config),
        Some(Commands::Version) => {
            println!("replcalc {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
