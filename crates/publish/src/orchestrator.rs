//! The external publish pipeline
//!
//! Sequences the side-effecting steps of a publish run: workspace init,
//! artifact-store sync, stale build-cache purge, export. Steps run strictly
//! in order, each as a blocking subprocess; the first failure aborts the
//! run with no retries.

use crate::command::CliCommand;
use crate::process::ProcessRunner;
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Default artifact-store working copy, relative to the workspace root.
const DEFAULT_STORE_DIR: &str = ".next";

/// Build-cache directory inside the artifact store, left behind by the
/// export tool's incremental builds.
const BUILD_CACHE_DIR: &str = ".next";

/// Export destination, relative to the workspace root.
const EXPORT_DIR: &str = "docs";

/// Orchestrates external publish CLI and artifact-store invocations for one
/// workspace.
#[derive(Debug, Clone)]
pub struct Publisher {
    cli: CliCommand,
    root: PathBuf,
    store_dir: PathBuf,
}

impl Publisher {
    /// Publisher for the workspace at `root`, invoking the external CLI via
    /// the given base command.
    #[must_use]
    pub fn new(cli: CliCommand, root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let store_dir = root.join(DEFAULT_STORE_DIR);
        Self {
            cli,
            root,
            store_dir,
        }
    }

    /// Override the artifact-store directory name (relative to the
    /// workspace root).
    #[must_use]
    pub fn with_store_dir(mut self, name: impl AsRef<Path>) -> Self {
        self.store_dir = self.root.join(name.as_ref());
        self
    }

    /// The workspace root this publisher operates in.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The export destination directory.
    #[must_use]
    pub fn export_dir(&self) -> PathBuf {
        self.root.join(EXPORT_DIR)
    }

    fn build_cache_dir(&self) -> PathBuf {
        self.store_dir.join(BUILD_CACHE_DIR)
    }

    /// Initialize the local workspace state (vault checkouts) via the
    /// external CLI. Must succeed before anything reads vault content.
    pub fn init_workspace(&self, runner: &dyn ProcessRunner) -> Result<()> {
        tracing::info!("initializing workspace");
        runner.run(&self.cli.arg_vec(&["workspace", "init"]), Some(&self.root))?;
        Ok(())
    }

    /// Bring the artifact-store working copy to a clean, current state, or
    /// initialize it fresh when none exists yet. Exactly one branch runs.
    fn sync_artifact_store(&self, runner: &dyn ProcessRunner) -> Result<()> {
        if self.store_dir.join(".git").exists() {
            tracing::info!(store = %self.store_dir.display(), "syncing existing artifact store");
            let store = Some(self.store_dir.as_path());
            for argv in [
                vec!["git", "reset", "--hard"],
                vec!["git", "clean", "-f"],
                vec!["git", "pull"],
                vec!["yarn"],
            ] {
                let argv: Vec<String> = argv.into_iter().map(String::from).collect();
                runner.run(&argv, store)?;
            }
        } else {
            tracing::info!("initializing artifact store");
            runner.run(&self.cli.arg_vec(&["publish", "init"]), Some(&self.root))?;
        }
        Ok(())
    }

    /// Remove the stale build cache from a previous run, if present.
    /// Idempotent; purging a non-existent directory is a no-op.
    fn purge_build_cache(&self) -> Result<()> {
        let cache = self.build_cache_dir();
        if cache.exists() {
            tracing::info!(cache = %cache.display(), "purging stale build cache");
            fs::remove_dir_all(&cache).map_err(|e| Error::io(e, &cache, "remove_dir_all"))?;
        }
        Ok(())
    }

    /// Export the workspace non-interactively to the publish destination.
    fn export(&self, runner: &dyn ProcessRunner) -> Result<()> {
        tracing::info!("exporting published notes");
        runner.run(
            &self
                .cli
                .arg_vec(&["publish", "export", "--target", "github", "--yes"]),
            Some(&self.root),
        )?;
        Ok(())
    }

    /// Run the publish steps: artifact-store sync, build-cache purge,
    /// export. Workspace init is separate; it runs on every run, publish
    /// only on a cache miss.
    pub fn publish(&self, runner: &dyn ProcessRunner) -> Result<()> {
        self.sync_artifact_store(runner)?;
        self.purge_build_cache()?;
        self.export(runner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// Recording fake: logs every invocation, optionally failing a chosen
    /// argument pattern.
    struct RecordingRunner {
        calls: RefCell<Vec<(Vec<String>, Option<PathBuf>)>>,
        fail_on: Option<String>,
    }

    impl RecordingRunner {
        fn new() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                fail_on: None,
            }
        }

        fn failing_on(pattern: &str) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                fail_on: Some(pattern.to_string()),
            }
        }

        fn commands(&self) -> Vec<String> {
            self.calls
                .borrow()
                .iter()
                .map(|(argv, _)| argv.join(" "))
                .collect()
        }
    }

    impl ProcessRunner for RecordingRunner {
        fn run(&self, argv: &[String], cwd: Option<&Path>) -> Result<String> {
            self.calls
                .borrow_mut()
                .push((argv.to_vec(), cwd.map(Path::to_path_buf)));
            let joined = argv.join(" ");
            if let Some(pattern) = &self.fail_on
                && joined.contains(pattern.as_str())
            {
                return Err(Error::ProcessFailed {
                    program: argv[0].clone(),
                    status: 1,
                    stderr: "boom".to_string(),
                });
            }
            Ok(String::new())
        }
    }

    fn publisher(root: &Path) -> Publisher {
        Publisher::new(CliCommand::parse("npx dendron").unwrap(), root)
    }

    #[test]
    fn init_workspace_invokes_cli_in_root() {
        let dir = TempDir::new().unwrap();
        let runner = RecordingRunner::new();

        publisher(dir.path()).init_workspace(&runner).unwrap();

        let calls = runner.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, vec!["npx", "dendron", "workspace", "init"]);
        assert_eq!(calls[0].1.as_deref(), Some(dir.path()));
    }

    #[test]
    fn fresh_store_is_initialized_via_cli() {
        let dir = TempDir::new().unwrap();
        let runner = RecordingRunner::new();

        publisher(dir.path()).publish(&runner).unwrap();

        assert_eq!(
            runner.commands(),
            vec![
                "npx dendron publish init",
                "npx dendron publish export --target github --yes",
            ]
        );
    }

    #[test]
    fn existing_store_is_synced_not_reinitialized() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".next/.git")).unwrap();
        let runner = RecordingRunner::new();

        publisher(dir.path()).publish(&runner).unwrap();

        assert_eq!(
            runner.commands(),
            vec![
                "git reset --hard",
                "git clean -f",
                "git pull",
                "yarn",
                "npx dendron publish export --target github --yes",
            ]
        );
        // The git steps run inside the store working copy.
        let calls = runner.calls.borrow();
        assert_eq!(calls[0].1.as_deref(), Some(dir.path().join(".next")).as_deref());
    }

    #[test]
    fn stale_build_cache_is_purged_before_export() {
        let dir = TempDir::new().unwrap();
        let build_cache = dir.path().join(".next/.next");
        fs::create_dir_all(&build_cache).unwrap();
        fs::write(build_cache.join("stale.js"), "stale").unwrap();
        fs::create_dir_all(dir.path().join(".next/.git")).unwrap();
        let runner = RecordingRunner::new();

        publisher(dir.path()).publish(&runner).unwrap();

        assert!(!build_cache.exists());
    }

    #[test]
    fn purge_of_absent_build_cache_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let runner = RecordingRunner::new();

        // No .next at all; publish still succeeds.
        publisher(dir.path()).publish(&runner).unwrap();
    }

    #[test]
    fn failed_sync_aborts_before_export() {
        let dir = TempDir::new().unwrap();
        let runner = RecordingRunner::failing_on("publish init");

        let err = publisher(dir.path()).publish(&runner).unwrap_err();
        assert!(matches!(err, Error::ProcessFailed { .. }));
        assert_eq!(runner.commands(), vec!["npx dendron publish init"]);
    }

    #[test]
    fn failed_export_surfaces_process_error() {
        let dir = TempDir::new().unwrap();
        let runner = RecordingRunner::failing_on("export");

        let err = publisher(dir.path()).publish(&runner).unwrap_err();
        match err {
            Error::ProcessFailed { stderr, .. } => assert_eq!(stderr, "boom"),
            other => panic!("expected ProcessFailed, got {other:?}"),
        }
    }

    #[test]
    fn store_dir_override_is_respected() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("site/.git")).unwrap();
        let runner = RecordingRunner::new();

        publisher(dir.path())
            .with_store_dir("site")
            .publish(&runner)
            .unwrap();

        assert_eq!(runner.commands()[0], "git reset --hard");
    }
}
