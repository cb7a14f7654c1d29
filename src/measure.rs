//! Branch measurement orchestration
//!
//! One measurement owns the working tree from checkout to the end of the dev
//! build: every step mutates the single shared tree and its installed
//! dependency set, so the sequence is strictly ordered and a failure at any
//! step aborts the whole branch with nothing partial returned.

use std::time::Duration;

use indicatif::ProgressBar;
use log::info;
use serde::Serialize;

use crate::error::BundleDeltaError;
use crate::extract::extract_size;
use crate::git::GitRepository;
use crate::infra::{CommandExecutor, RealCommandExecutor};
use crate::runner::ShellRunner;

/// Dependency install command, run after every branch switch.
pub const INSTALL_CMD: &str = "yarn";

/// Production build command; its stdout carries the asset size lines.
pub const PROD_BUILD_CMD: &str = "yarn run ember build -prod";

/// Development build command; timed only, output discarded.
pub const DEV_BUILD_CMD: &str = "yarn run ember build -dev";

/// One measurement snapshot for one branch. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchStats {
    /// Size of the vendor script bundle, bytes
    pub vendor_js: u64,
    /// Size of the vendor stylesheet bundle, bytes
    pub vendor_css: u64,
    /// Size of the application script bundle, bytes
    pub app_js: u64,
    /// Size of the application stylesheet bundle, bytes
    pub app_css: u64,
    /// Production build wall-clock time, whole seconds
    pub prod_build: u64,
    /// Development build wall-clock time, whole seconds
    pub dev_build: u64,
}

/// Measures one branch at a time: checkout, install, build, extract.
pub struct BranchMeasurer<CE: CommandExecutor = RealCommandExecutor> {
    runner: ShellRunner<CE>,
    git: GitRepository<CE>,
    app: String,
}

impl BranchMeasurer<RealCommandExecutor> {
    /// Create a measurer for the named application with real command execution
    pub fn new(app: impl Into<String>) -> Self {
        Self {
            runner: ShellRunner::new(),
            git: GitRepository::new(),
            app: app.into(),
        }
    }
}

impl<CE: CommandExecutor + Clone> BranchMeasurer<CE> {
    /// Create a measurer with a custom command executor (for testing)
    pub fn with_executor(app: impl Into<String>, cmd_executor: CE) -> Self {
        Self {
            runner: ShellRunner::with_executor(cmd_executor.clone()),
            git: GitRepository::with_runner(ShellRunner::with_executor(cmd_executor)),
            app: app.into(),
        }
    }
}

impl<CE: CommandExecutor> BranchMeasurer<CE> {
    /// The application name whose assets are measured
    pub fn app(&self) -> &str {
        &self.app
    }

    /// Measure build sizes and durations for `branch`.
    ///
    /// Strictly sequential: checkout → install → prod build (timed, output
    /// kept) → extract four asset sizes → dev build (timed). The spinner gets
    /// one message per phase.
    pub fn measure(
        &self,
        branch: &str,
        spinner: &ProgressBar,
    ) -> Result<BranchStats, BundleDeltaError> {
        spinner.set_message(format!("Setting up {}", branch));
        info!("setting up {}", branch);
        self.git.checkout(branch)?;
        self.runner.exec(INSTALL_CMD)?;

        spinner.set_message(format!("Measuring prod build of {}", branch));
        info!("measuring prod build of {}", branch);
        let (prod_elapsed, prod_result) = self.runner.exec_timed(PROD_BUILD_CMD)?;

        let vendor_js = extract_size(&prod_result.stdout, "vendor", "js")?;
        let vendor_css = extract_size(&prod_result.stdout, "vendor", "css")?;
        let app_js = extract_size(&prod_result.stdout, &self.app, "js")?;
        let app_css = extract_size(&prod_result.stdout, &self.app, "css")?;

        spinner.set_message(format!("Measuring dev build of {}", branch));
        info!("measuring dev build of {}", branch);
        let (dev_elapsed, _) = self.runner.exec_timed(DEV_BUILD_CMD)?;

        Ok(BranchStats {
            vendor_js,
            vendor_css,
            app_js,
            app_css,
            prod_build: whole_seconds(prod_elapsed),
            dev_build: whole_seconds(dev_elapsed),
        })
    }
}

/// Round a wall-clock duration to whole seconds for display.
fn whole_seconds(elapsed: Duration) -> u64 {
    elapsed.as_secs_f64().round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::mock_exit_status;
    use std::io;
    use std::process::{Command, ExitStatus, Output};
    use std::sync::{Arc, Mutex};

    const PROD_OUTPUT: &str = "\
 - dist/assets/vendor-d41d8cd98f.js: 685.43 KB
 - dist/assets/vendor-a1b2c3d4e5.css: 12.30 KB
 - dist/assets/frontend-0badc0ffee.js: 250.11 KB
 - dist/assets/frontend-0badc0ffee.css: 4.20 KB
";

    // Scripted executor: answers per command line, records the sequence
    #[derive(Clone)]
    struct ScriptedExecutor {
        prod_stdout: String,
        fail_on: Option<&'static str>,
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedExecutor {
        fn new(prod_stdout: &str) -> Self {
            Self {
                prod_stdout: prod_stdout.to_string(),
                fail_on: None,
                seen: Arc::new(Mutex::new(vec![])),
            }
        }

        fn failing_on(prod_stdout: &str, fragment: &'static str) -> Self {
            Self {
                fail_on: Some(fragment),
                ..Self::new(prod_stdout)
            }
        }

        fn commands(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl CommandExecutor for ScriptedExecutor {
        fn status(&self, _cmd: &mut Command) -> io::Result<ExitStatus> {
            unimplemented!()
        }

        fn output(&self, cmd: &mut Command) -> io::Result<Output> {
            let line = cmd
                .get_args()
                .last()
                .map(|a| a.to_string_lossy().into_owned())
                .unwrap_or_default();
            self.seen.lock().unwrap().push(line.clone());

            if let Some(fragment) = self.fail_on {
                if line.contains(fragment) {
                    return Ok(Output {
                        status: mock_exit_status(1),
                        stdout: vec![],
                        stderr: b"scripted failure".to_vec(),
                    });
                }
            }

            let stdout = if line.contains("build -prod") {
                self.prod_stdout.clone().into_bytes()
            } else {
                vec![]
            };

            Ok(Output {
                status: mock_exit_status(0),
                stdout,
                stderr: vec![],
            })
        }
    }

    #[test]
    fn test_measure_extracts_all_four_sizes() {
        let executor = ScriptedExecutor::new(PROD_OUTPUT);
        let measurer = BranchMeasurer::with_executor("frontend", executor);

        let stats = measurer
            .measure("feature-x", &ProgressBar::hidden())
            .unwrap();

        assert_eq!(stats.vendor_js, 685_430);
        assert_eq!(stats.vendor_css, 12_300);
        assert_eq!(stats.app_js, 250_110);
        assert_eq!(stats.app_css, 4_200);
    }

    #[test]
    fn test_measure_runs_steps_in_order() {
        let executor = ScriptedExecutor::new(PROD_OUTPUT);
        let measurer = BranchMeasurer::with_executor("frontend", executor.clone());

        measurer
            .measure("feature-x", &ProgressBar::hidden())
            .unwrap();

        let seen = executor.commands();
        assert_eq!(seen.len(), 4);
        assert!(seen[0].contains("git checkout feature-x"));
        assert_eq!(seen[1], INSTALL_CMD);
        assert_eq!(seen[2], PROD_BUILD_CMD);
        assert_eq!(seen[3], DEV_BUILD_CMD);
    }

    #[test]
    fn test_measure_install_failure_aborts_before_any_build() {
        let executor = ScriptedExecutor::failing_on(PROD_OUTPUT, "yarn");
        let measurer = BranchMeasurer::with_executor("frontend", executor.clone());

        let err = measurer
            .measure("feature-x", &ProgressBar::hidden())
            .unwrap_err();
        assert!(matches!(err, BundleDeltaError::CommandFailed { .. }));

        let seen = executor.commands();
        assert!(!seen.iter().any(|c| c.contains("ember build")));
    }

    #[test]
    fn test_measure_checkout_failure_aborts_everything() {
        let executor = ScriptedExecutor::failing_on(PROD_OUTPUT, "checkout");
        let measurer = BranchMeasurer::with_executor("frontend", executor.clone());

        let err = measurer
            .measure("no-such-branch", &ProgressBar::hidden())
            .unwrap_err();
        assert!(matches!(err, BundleDeltaError::CommandFailed { .. }));
        assert_eq!(executor.commands().len(), 1);
    }

    #[test]
    fn test_measure_missing_size_line_aborts_before_dev_build() {
        // vendor.css line absent: extraction fails, the dev build never runs
        let partial = " - dist/assets/vendor-abc.js: 685.43 KB\n";
        let executor = ScriptedExecutor::new(partial);
        let measurer = BranchMeasurer::with_executor("frontend", executor.clone());

        let err = measurer
            .measure("feature-x", &ProgressBar::hidden())
            .unwrap_err();
        assert!(matches!(err, BundleDeltaError::SizeNotFound { .. }));

        let seen = executor.commands();
        assert!(!seen.iter().any(|c| c.contains("build -dev")));
    }

    #[test]
    fn test_whole_seconds_rounds() {
        assert_eq!(whole_seconds(Duration::from_millis(10_499)), 10);
        assert_eq!(whole_seconds(Duration::from_millis(10_500)), 11);
        assert_eq!(whole_seconds(Duration::from_millis(0)), 0);
    }
}
