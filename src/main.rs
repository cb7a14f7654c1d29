use bundle_delta::cmd;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::process;

/// Compare bundle sizes and build times between git branches
///
/// bundle-delta checks out the current branch and a baseline branch, runs a
/// production and a development build of each, and prints a delta table for
/// the four asset bundles and the two build durations.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Baseline branch to compare the current branch against
    #[arg(short, long, default_value = "master")]
    baseline: String,

    /// Application name used in asset file names (defaults to the current directory name)
    #[arg(long)]
    app: Option<String>,

    /// Output a JSON report after the table (for CI/CD integration)
    #[arg(long)]
    json: bool,

    /// Disable emoji output (useful for CI/CD or accessibility)
    #[arg(long, global = true)]
    no_emoji: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    // Set console emoji mode based on CLI flag
    if cli.no_emoji {
        std::env::set_var("NO_EMOJI", "1");
    }

    let result = match &cli.command {
        Some(Commands::Completions { shell }) => {
            cmd::cmd_completions(*shell);
            Ok(())
        }
        None => cmd::cmd_compare(&cli.baseline, cli.app.as_deref(), cli.json),
    };

    if let Err(e) = result {
        use bundle_delta::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}
