//! Compare command implementation
//!
//! The default (no-subcommand) command: measures the current branch and the
//! baseline branch back to back, restores the working tree, and renders the
//! delta table. The working tree is the one shared mutable resource, so the
//! two measurements never overlap.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use console::style;
use indicatif::ProgressBar;

use crate::fmt::{CHART, SPARKLES};
use crate::git::GitRepository;
use crate::measure::{BranchMeasurer, INSTALL_CMD};
use crate::report::{comparison_rows, json_report, render_table};
use crate::runner::ShellRunner;
use crate::tools::ToolChain;

/// Compare build stats between the current branch and a baseline branch
///
/// Sequence: detect current branch → measure it → measure the baseline →
/// compute rows → restore the original branch and reinstall dependencies →
/// print the table. A failure anywhere aborts the run with no partial output;
/// the restore step's own failure surfaces too, since a tree left on the
/// wrong branch is a problem worth reporting.
///
/// # Examples
///
/// ```no_run
/// use bundle_delta::cmd::compare::cmd_compare;
///
/// // Compare the checked-out branch against master
/// cmd_compare("master", None, false)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_compare(baseline: &str, app_override: Option<&str>, json_output: bool) -> Result<()> {
    ToolChain::new().check_required()?;

    let app = match app_override {
        Some(name) => name.to_string(),
        None => app_from_cwd()?,
    };

    let git = GitRepository::new();
    let branch = git.current_branch()?;

    println!(
        "{} {} Comparing '{}' to '{}'",
        CHART,
        style("bundle-delta").bold(),
        style(&branch).cyan(),
        style(baseline).cyan()
    );
    println!();

    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(120));

    let measurer = BranchMeasurer::new(&app);
    let current_stats = measurer.measure(&branch, &spinner)?;
    let baseline_stats = measurer.measure(baseline, &spinner)?;

    let rows = comparison_rows(&app, &current_stats, &baseline_stats);

    spinner.set_message("Cleaning up");
    git.checkout(&branch)?;
    ShellRunner::new().exec(INSTALL_CMD)?;
    spinner.finish_and_clear();

    println!("{}", render_table(&rows));
    println!(
        "{} Compared '{}' to '{}'",
        SPARKLES,
        style(&branch).cyan(),
        style(baseline).cyan()
    );

    if json_output {
        let report = json_report(&branch, baseline, &current_stats, &baseline_stats, &rows);
        println!();
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

/// Derive the application name from the working directory, the same way the
/// build tool names the app bundle.
fn app_from_cwd() -> Result<String> {
    let cwd = env::current_dir().context("Failed to read the current directory")?;

    let name = cwd
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty());

    name.with_context(|| {
        format!(
            "Could not derive an application name from {}; pass --app",
            cwd.display()
        )
    })
}
