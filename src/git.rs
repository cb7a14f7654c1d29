//! Git operations for switching and identifying branches
//!
//! The comparison needs exactly two things from git: the name of the branch
//! the working tree currently sits on, and the ability to switch it. Both go
//! through the shell runner, and the branch name is scraped from `git status`
//! output rather than plumbing commands — the `On branch <name>` marker is
//! the contract.

use regex::Regex;

use crate::error::BundleDeltaError;
use crate::infra::{CommandExecutor, RealCommandExecutor};
use crate::runner::ShellRunner;

/// Marker scanned for in `git status` output.
const BRANCH_MARKER: &str = r"On branch (.+)";

/// Git interface with dependency injection for testability
pub struct GitRepository<CE: CommandExecutor = RealCommandExecutor> {
    runner: ShellRunner<CE>,
}

impl GitRepository<RealCommandExecutor> {
    /// Create a new GitRepository with real command execution
    pub fn new() -> Self {
        Self {
            runner: ShellRunner::new(),
        }
    }
}

impl Default for GitRepository<RealCommandExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<CE: CommandExecutor> GitRepository<CE> {
    /// Create a GitRepository over a custom runner (for testing)
    pub fn with_runner(runner: ShellRunner<CE>) -> Self {
        Self { runner }
    }

    /// Get the branch the working tree currently sits on.
    ///
    /// Runs `git status` and scans its output for the `On branch <name>`
    /// marker. Output without the marker (detached HEAD, rebase in progress)
    /// fails with [`BundleDeltaError::BranchDetection`].
    pub fn current_branch(&self) -> Result<String, BundleDeltaError> {
        let result = self.runner.exec("git status")?;

        let re = Regex::new(BRANCH_MARKER).expect("branch marker is a valid regex");
        if let Some(captures) = re.captures(&result.stdout) {
            return Ok(captures[1].to_string());
        }

        Err(BundleDeltaError::BranchDetection {
            status_output: result.stdout,
        })
    }

    /// Switch the working tree to `branch`.
    ///
    /// An unknown branch or a conflicting dirty tree surfaces as
    /// [`BundleDeltaError::CommandFailed`] with git's stderr attached.
    pub fn checkout(&self, branch: &str) -> Result<(), BundleDeltaError> {
        self.runner.exec(&format!("git checkout {}", branch))?;
        Ok(())
    }
}
