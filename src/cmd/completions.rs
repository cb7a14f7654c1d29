//! Completions command implementation
//!
//! Handles the `bundle-delta completions` command which generates
//! shell completion scripts for bash, zsh, fish, etc.

use clap_complete::{generate, Shell};

/// Generate shell completion scripts
///
/// Outputs completion script for the specified shell to stdout.
/// Users can redirect this to their shell's completion directory.
///
/// # Examples
///
/// ```bash
/// # Bash
/// bundle-delta completions bash > /etc/bash_completion.d/bundle-delta
///
/// # Zsh
/// bundle-delta completions zsh > ~/.zfunc/_bundle-delta
///
/// # Fish
/// bundle-delta completions fish > ~/.config/fish/completions/bundle-delta.fish
/// ```
pub fn cmd_completions(shell: Shell) {
    // We need to re-create the command structure here since Cli is in main.rs
    use clap::{Arg, ArgAction, Command};

    let mut cmd = Command::new("bundle-delta")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compare bundle sizes and build times between git branches")
        .arg(
            Arg::new("baseline")
                .long("baseline")
                .short('b')
                .help("Baseline branch to compare against")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("app")
                .long("app")
                .help("Application name used in asset file names")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Emit a JSON report after the table")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-emoji")
                .long("no-emoji")
                .help("Disable emoji output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(Command::new("completions").about("Generate shell completions"));

    let bin_name = "bundle-delta".to_string();
    generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
}
