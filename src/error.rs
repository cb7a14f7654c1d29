//! Error types with contextual suggestions
//!
//! Provides structured error types that include:
//! - Actionable error messages
//! - Suggested fixes and recovery actions
//! - Proper exit codes for scripting

use thiserror::Error;

/// Errors surfaced by a comparison run
#[derive(Error, Debug)]
pub enum BundleDeltaError {
    /// Required external tool is not installed
    #[error("Tool not installed: {tool}")]
    ToolMissing {
        /// Tool name
        tool: String,
        /// Installation command
        install_cmd: String,
    },

    /// An external command exited with a non-zero status
    #[error("Command failed: {command}\n{stderr}")]
    CommandFailed {
        /// Command line that failed
        command: String,
        /// Captured standard error
        stderr: String,
    },

    /// An external command could not be spawned at all
    #[error("Failed to spawn: {command}")]
    Spawn {
        /// Command line that could not start
        command: String,
        #[source]
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Build output contained no size line for the requested asset
    #[error("Could not parse build output for {asset}:\n{output}")]
    SizeNotFound {
        /// Asset label (e.g. "vendor.js")
        asset: String,
        /// The full unparsed output block, kept for debugging format drift
        output: String,
    },

    /// A size line matched but carried an unrecognized unit token
    #[error("Unknown size unit: {unit}")]
    UnknownUnit {
        /// The offending unit token
        unit: String,
    },

    /// `git status` output did not contain the branch marker
    #[error("Could not determine branch")]
    BranchDetection {
        /// The status output that lacked the marker
        status_output: String,
    },

    /// Generic I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Context about where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },
}

impl BundleDeltaError {
    /// Get actionable suggestion for resolving this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use bundle_delta::error::BundleDeltaError;
    ///
    /// let error = BundleDeltaError::ToolMissing {
    ///     tool: "yarn".to_string(),
    ///     install_cmd: "npm install --global yarn".to_string(),
    /// };
    ///
    /// let suggestion = error.suggestion();
    /// assert!(suggestion.is_some());
    /// assert!(suggestion.unwrap().contains("npm install"));
    /// ```
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::ToolMissing { install_cmd, .. } => Some(format!("Install with: {}", install_cmd)),
            Self::CommandFailed { stderr, .. } => {
                if stderr.contains("did not match any file(s) known to git")
                    || stderr.contains("pathspec")
                {
                    Some("Check that the branch exists locally: git branch --list".to_string())
                } else if stderr.contains("Your local changes") {
                    Some("Commit or stash local changes before comparing branches".to_string())
                } else {
                    Some("Check the command output above and re-run".to_string())
                }
            }
            Self::Spawn { .. } => {
                Some("Check that the shell and the command are on your PATH".to_string())
            }
            Self::SizeNotFound { asset, .. } => Some(format!(
                "The production build output did not contain a line like \
                 '{}-<fingerprint>: 123.45 KB'; the build tool's output format may have changed",
                asset
            )),
            Self::UnknownUnit { .. } => {
                Some("Recognized size units are B, KB and MB".to_string())
            }
            Self::BranchDetection { .. } => Some(
                "Run from inside a git work tree with a checked-out branch \
                 ('git status' must report 'On branch <name>')"
                    .to_string(),
            ),
            Self::Io { context, .. } => Some(format!(
                "Check file permissions and that {} is accessible",
                context
            )),
        }
    }

    /// Get appropriate exit code for this error.
    ///
    /// Returns Unix-style exit codes based on the error type, following sysexits.h conventions.
    ///
    /// # Examples
    ///
    /// ```
    /// use bundle_delta::error::BundleDeltaError;
    ///
    /// let error = BundleDeltaError::ToolMissing {
    ///     tool: "git".to_string(),
    ///     install_cmd: "apt install git".to_string(),
    /// };
    ///
    /// assert_eq!(error.exit_code(), 127); // Command not found
    /// ```
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ToolMissing { .. } => 127, // Command not found (Unix convention)
            Self::CommandFailed { .. } => 1, // Generic error
            Self::Spawn { .. } => 126,       // Command found but cannot execute
            Self::SizeNotFound { .. } => 65, // EX_DATAERR (sysexits.h)
            Self::UnknownUnit { .. } => 65,  // EX_DATAERR
            Self::BranchDetection { .. } => 65, // EX_DATAERR
            Self::Io { .. } => 74,           // EX_IOERR
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with suggestions
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        // Main error message
        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        // Error chain (caused by)
        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        // Try to downcast to BundleDeltaError for suggestions
        if let Some(bd_error) = error.downcast_ref::<BundleDeltaError>() {
            if let Some(suggestion) = bd_error.suggestion() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    style("help:").cyan().bold(),
                    suggestion
                ));
            }
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        if let Some(bd_error) = error.downcast_ref::<BundleDeltaError>() {
            bd_error.exit_code()
        } else {
            1 // Generic error
        }
    }
}
