//! Tool detection and verification module
//!
//! Detects the presence of the external collaborators before a comparison
//! run starts, so a missing binary fails fast instead of surfacing as a
//! confusing spawn error halfway through a measurement:
//! - git (branch detection and switching)
//! - yarn (dependency install and build commands)

use log::debug;

use crate::error::BundleDeltaError;
use crate::infra::{CommandExecutor, RealCommandExecutor};

/// Represents an external tool with detection capabilities
#[derive(Debug)]
pub struct Tool<CE: CommandExecutor = RealCommandExecutor> {
    /// Human-readable name
    pub name: &'static str,
    /// Binary name in PATH
    pub binary: &'static str,
    /// Installation hint shown when the tool is missing
    pub install_cmd: &'static str,
    /// Flag to get version (e.g., "--version")
    pub version_flag: &'static str,
    /// Command executor for running version checks
    cmd_executor: CE,
}

impl<CE: CommandExecutor> Tool<CE> {
    /// Create a new Tool with a custom command executor
    pub fn with_executor(
        name: &'static str,
        binary: &'static str,
        install_cmd: &'static str,
        version_flag: &'static str,
        cmd_executor: CE,
    ) -> Self {
        Self {
            name,
            binary,
            install_cmd,
            version_flag,
            cmd_executor,
        }
    }

    /// Check if the tool is installed and available in PATH
    pub fn is_installed(&self) -> bool {
        which::which(self.binary).is_ok()
    }

    /// Get the version string of the installed tool
    pub fn version(&self) -> Option<String> {
        let output = self
            .cmd_executor
            .execute(|cmd| cmd.arg(self.version_flag), self.binary)
            .ok()?;

        if !output.status.success() {
            return None;
        }

        String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .map(|line| line.to_string())
    }
}

impl Tool<RealCommandExecutor> {
    /// Create a new Tool with real command execution
    pub fn new(
        name: &'static str,
        binary: &'static str,
        install_cmd: &'static str,
        version_flag: &'static str,
    ) -> Self {
        Self::with_executor(name, binary, install_cmd, version_flag, RealCommandExecutor)
    }
}

/// The tools a comparison run depends on
pub struct ToolChain<CE: CommandExecutor = RealCommandExecutor> {
    /// Version-control tool (required)
    pub git: Tool<CE>,
    /// Dependency manager and build-command entry point (required)
    pub yarn: Tool<CE>,
}

impl Default for ToolChain<RealCommandExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolChain<RealCommandExecutor> {
    /// Create a new ToolChain with real command execution
    pub fn new() -> Self {
        Self::with_executor(RealCommandExecutor)
    }
}

impl<CE: CommandExecutor + Clone> ToolChain<CE> {
    /// Create a new ToolChain with a custom command executor
    pub fn with_executor(cmd_executor: CE) -> Self {
        Self {
            git: Tool::with_executor(
                "Git",
                "git",
                "apt install git (or see https://git-scm.com)",
                "--version",
                cmd_executor.clone(),
            ),
            yarn: Tool::with_executor(
                "Yarn",
                "yarn",
                "npm install --global yarn",
                "--version",
                cmd_executor,
            ),
        }
    }
}

impl<CE: CommandExecutor> ToolChain<CE> {
    /// Verify every required tool is present.
    ///
    /// Fails with [`BundleDeltaError::ToolMissing`] for the first absent
    /// binary, carrying its installation hint.
    pub fn check_required(&self) -> Result<(), BundleDeltaError> {
        for tool in [&self.git, &self.yarn] {
            if !tool.is_installed() {
                return Err(BundleDeltaError::ToolMissing {
                    tool: tool.name.to_string(),
                    install_cmd: tool.install_cmd.to_string(),
                });
            }
            match tool.version() {
                Some(version) => debug!("{}: {}", tool.name, version),
                None => debug!("{}: version unknown", tool.name),
            }
        }

        Ok(())
    }
}
