//! Shell command execution for measurement runs
//!
//! Every external step (git, yarn, the build tool) goes through one runner
//! that spawns the platform shell, injects the cache-busting environment
//! variable, and captures output. The caller blocks until the child exits;
//! there is deliberately no timeout, since a comparison run is single-shot
//! and human-supervised.

use std::time::{Duration, Instant};

use log::debug;

use crate::error::BundleDeltaError;
use crate::infra::{CommandExecutor, RealCommandExecutor};

/// Environment variable that disables the build tool's persistent on-disk
/// cache, so every timed build is a cold, comparable one.
pub const CLEAR_CACHE_VAR: &str = "CLEAR_BROCCOLI_PERSISTENT_FILTER_CACHE";

#[cfg(not(windows))]
const SHELL: [&str; 2] = ["sh", "-c"];
#[cfg(windows)]
const SHELL: [&str; 2] = ["cmd", "/C"];

/// Immutable snapshot of one completed external-process invocation.
#[derive(Debug, Clone)]
pub struct ExecResult {
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

/// Runs shell command lines with dependency injection for testability
pub struct ShellRunner<CE: CommandExecutor = RealCommandExecutor> {
    cmd_executor: CE,
}

impl ShellRunner<RealCommandExecutor> {
    /// Create a runner backed by real command execution
    pub fn new() -> Self {
        Self {
            cmd_executor: RealCommandExecutor,
        }
    }
}

impl Default for ShellRunner<RealCommandExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<CE: CommandExecutor> ShellRunner<CE> {
    /// Create a runner with a custom command executor (for testing)
    pub fn with_executor(cmd_executor: CE) -> Self {
        Self { cmd_executor }
    }

    /// Run one shell command line to completion and capture its output.
    ///
    /// The child inherits the current environment plus [`CLEAR_CACHE_VAR`].
    /// A non-zero exit maps to [`BundleDeltaError::CommandFailed`] with the
    /// captured stderr attached; a spawn failure maps to
    /// [`BundleDeltaError::Spawn`].
    pub fn exec(&self, command_line: &str) -> Result<ExecResult, BundleDeltaError> {
        debug!("exec: {}", command_line);

        let output = self
            .cmd_executor
            .execute(
                |cmd| {
                    cmd.arg(SHELL[1])
                        .arg(command_line)
                        .env(CLEAR_CACHE_VAR, "true")
                },
                SHELL[0],
            )
            .map_err(|source| BundleDeltaError::Spawn {
                command: command_line.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(BundleDeltaError::CommandFailed {
                command: command_line.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(ExecResult {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    /// Access the underlying executor (test hook for command-log mocks).
    #[cfg(test)]
    pub(crate) fn executor_ref(&self) -> &CE {
        &self.cmd_executor
    }

    /// Run a command line and measure its wall-clock duration.
    pub fn exec_timed(
        &self,
        command_line: &str,
    ) -> Result<(Duration, ExecResult), BundleDeltaError> {
        let started = Instant::now();
        let result = self.exec(command_line)?;
        let elapsed = started.elapsed();

        debug!("exec finished in {:?}: {}", elapsed, command_line);
        Ok((elapsed, result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::mock_exit_status;
    use std::io;
    use std::process::{Command, ExitStatus, Output};
    use std::sync::Mutex;

    // Mock CommandExecutor that records the command it was handed
    struct MockCommandExecutor {
        stdout: Vec<u8>,
        stderr: Vec<u8>,
        exit_code: i32,
        spawn_error: bool,
        seen: Mutex<Vec<String>>,
    }

    impl MockCommandExecutor {
        fn succeeding(stdout: &str) -> Self {
            Self {
                stdout: stdout.as_bytes().to_vec(),
                stderr: vec![],
                exit_code: 0,
                spawn_error: false,
                seen: Mutex::new(vec![]),
            }
        }

        fn failing(exit_code: i32, stderr: &str) -> Self {
            Self {
                stdout: vec![],
                stderr: stderr.as_bytes().to_vec(),
                exit_code,
                spawn_error: false,
                seen: Mutex::new(vec![]),
            }
        }

        fn unspawnable() -> Self {
            Self {
                stdout: vec![],
                stderr: vec![],
                exit_code: 0,
                spawn_error: true,
                seen: Mutex::new(vec![]),
            }
        }

        fn record(&self, cmd: &Command) {
            let rendered = format!(
                "{} {}",
                cmd.get_program().to_string_lossy(),
                cmd.get_args()
                    .map(|a| a.to_string_lossy().into_owned())
                    .collect::<Vec<_>>()
                    .join(" ")
            );
            self.seen.lock().unwrap().push(rendered);
        }
    }

    impl CommandExecutor for MockCommandExecutor {
        fn status(&self, _cmd: &mut Command) -> io::Result<ExitStatus> {
            unimplemented!()
        }

        fn output(&self, cmd: &mut Command) -> io::Result<Output> {
            if self.spawn_error {
                return Err(io::Error::new(io::ErrorKind::NotFound, "no such file"));
            }
            self.record(cmd);
            Ok(Output {
                status: mock_exit_status(self.exit_code),
                stdout: self.stdout.clone(),
                stderr: self.stderr.clone(),
            })
        }
    }

    #[test]
    fn test_exec_captures_stdout_and_stderr() {
        let runner = ShellRunner::with_executor(MockCommandExecutor::succeeding("build output\n"));

        let result = runner.exec("yarn run ember build -prod").unwrap();
        assert_eq!(result.stdout, "build output\n");
        assert_eq!(result.stderr, "");
    }

    #[test]
    fn test_exec_passes_command_line_through_the_shell() {
        let mock = MockCommandExecutor::succeeding("");
        let runner = ShellRunner::with_executor(mock);

        runner.exec("git checkout master").unwrap();

        let seen = runner.cmd_executor.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].contains("git checkout master"));
        assert!(seen[0].starts_with(SHELL[0]));
    }

    #[test]
    fn test_exec_injects_cache_busting_variable() {
        let mock = MockCommandExecutor::succeeding("");
        let executor_check = |cmd: &mut Command| -> io::Result<Output> {
            let has_var = cmd.get_envs().any(|(k, v)| {
                k.to_str() == Some(CLEAR_CACHE_VAR) && v.and_then(|v| v.to_str()) == Some("true")
            });
            assert!(has_var, "cache-busting variable must be set");
            mock.output(cmd)
        };

        // Inline executor wrapper asserting on the built Command
        struct Check<F>(F);
        impl<F: Fn(&mut Command) -> io::Result<Output>> CommandExecutor for Check<F> {
            fn status(&self, _cmd: &mut Command) -> io::Result<ExitStatus> {
                unimplemented!()
            }
            fn output(&self, cmd: &mut Command) -> io::Result<Output> {
                (self.0)(cmd)
            }
        }

        let runner = ShellRunner::with_executor(Check(executor_check));
        runner.exec("yarn").unwrap();
    }

    #[test]
    fn test_exec_non_zero_exit_returns_command_failed() {
        let runner =
            ShellRunner::with_executor(MockCommandExecutor::failing(1, "fatal: not a git repo"));

        let err = runner.exec("git status").unwrap_err();
        match err {
            BundleDeltaError::CommandFailed { command, stderr } => {
                assert_eq!(command, "git status");
                assert!(stderr.contains("not a git repo"));
            }
            other => panic!("expected CommandFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_exec_spawn_failure_returns_spawn_error() {
        let runner = ShellRunner::with_executor(MockCommandExecutor::unspawnable());

        let err = runner.exec("yarn").unwrap_err();
        assert!(matches!(err, BundleDeltaError::Spawn { .. }));
    }

    #[test]
    fn test_exec_timed_reports_a_duration() {
        let runner = ShellRunner::with_executor(MockCommandExecutor::succeeding("done\n"));

        let (elapsed, result) = runner.exec_timed("yarn run ember build -dev").unwrap();
        assert_eq!(result.stdout, "done\n");
        // A mocked child returns instantly; the point is that a duration comes back at all.
        assert!(elapsed < Duration::from_secs(5));
    }

    // Integration tests with the real shell
    #[test]
    fn test_exec_real_shell_success() {
        let runner = ShellRunner::new();
        let result = runner.exec("echo real-shell").unwrap();
        assert!(result.stdout.contains("real-shell"));
    }

    #[cfg(unix)]
    #[test]
    fn test_exec_real_shell_failure_carries_stderr() {
        let runner = ShellRunner::new();
        let err = runner.exec("echo oops >&2; exit 3").unwrap_err();
        match err {
            BundleDeltaError::CommandFailed { stderr, .. } => assert!(stderr.contains("oops")),
            other => panic!("expected CommandFailed, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_exec_real_shell_sees_cache_variable() {
        let runner = ShellRunner::new();
        let result = runner.exec("printf %s \"$CLEAR_BROCCOLI_PERSISTENT_FILTER_CACHE\"");
        assert_eq!(result.unwrap().stdout, "true");
    }
}
