//! Synchronous external process execution.

use crate::{Error, Result};
use std::path::Path;
use std::process::Command;

/// Seam for invoking external processes.
///
/// Every pipeline step is a synchronous, blocking subprocess invocation
/// with captured output; tests substitute a recording implementation.
pub trait ProcessRunner {
    /// Run `argv` to completion, optionally in `cwd`, and return captured
    /// stdout. A non-zero exit is an error carrying the captured stderr.
    fn run(&self, argv: &[String], cwd: Option<&Path>) -> Result<String>;
}

/// [`ProcessRunner`] backed by [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, argv: &[String], cwd: Option<&Path>) -> Result<String> {
        let Some((program, args)) = argv.split_first() else {
            return Err(Error::CommandParse {
                command: String::new(),
            });
        };

        tracing::debug!(command = ?argv, cwd = ?cwd, "running external process");

        let mut command = Command::new(program);
        command.args(args);
        if let Some(cwd) = cwd {
            command.current_dir(cwd);
        }

        let output = command.output().map_err(|e| Error::Spawn {
            source: e,
            program: program.clone(),
        })?;

        if !output.status.success() {
            return Err(Error::ProcessFailed {
                program: program.clone(),
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn captures_stdout_on_success() {
        let out = SystemRunner.run(&argv(&["echo", "hello"]), None).unwrap();
        assert_eq!(out.trim(), "hello");
    }

    #[test]
    fn non_zero_exit_is_process_failed() {
        let err = SystemRunner
            .run(&argv(&["sh", "-c", "echo oops >&2; exit 3"]), None)
            .unwrap_err();
        match err {
            Error::ProcessFailed {
                program,
                status,
                stderr,
            } => {
                assert_eq!(program, "sh");
                assert_eq!(status, 3);
                assert_eq!(stderr.trim(), "oops");
            }
            other => panic!("expected ProcessFailed, got {other:?}"),
        }
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let err = SystemRunner
            .run(&argv(&["notepub-definitely-not-a-program"]), None)
            .unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
    }

    #[test]
    fn runs_in_requested_cwd() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = SystemRunner
            .run(&argv(&["pwd"]), Some(dir.path()))
            .unwrap();
        let reported = std::fs::canonicalize(out.trim()).unwrap();
        let expected = std::fs::canonicalize(dir.path()).unwrap();
        assert_eq!(reported, expected);
    }

    #[test]
    fn empty_argv_is_rejected() {
        assert!(matches!(
            SystemRunner.run(&[], None),
            Err(Error::CommandParse { .. })
        ));
    }
}
