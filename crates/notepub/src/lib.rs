//! notepub CLI library
//!
//! Wires configuration loading, private-vault filtering, fingerprinting,
//! cache lookup, and the external publish pipeline into one run. The
//! binary in `main.rs` only parses arguments, initializes tracing, and
//! maps the result to an exit code; everything testable lives here.

pub mod cli;
pub mod output;
pub mod tracing;

use cli::{Cli, CliError};
use notepub_cache::LocalBackend;
use notepub_config::{WorkspaceConfig, filter_private_vaults};
use notepub_publish::{CliCommand, PublishOutcome, Publisher, SystemRunner, run_pipeline};
use std::path::PathBuf;

/// Execute one skip-or-publish run as configured by `cli`.
pub fn run(cli: &Cli) -> Result<PublishOutcome, CliError> {
    let mut config = WorkspaceConfig::load(&cli.config)?;

    if cli.ignore_private {
        config = filter_private_vaults(&config);
        // The external publish CLI reads the document from disk, so the
        // filtered view has to be written back before any publish step.
        config.store(&cli.config)?;
    }

    let command = CliCommand::parse(&cli.cli_command)?;
    let root = workspace_root(cli)?;
    let mut publisher = Publisher::new(command, root);
    if let Some(store_dir) = &cli.store_dir {
        publisher = publisher.with_store_dir(store_dir);
    }

    let backend = match &cli.cache_dir {
        Some(dir) => LocalBackend::with_root(dir),
        None => LocalBackend::from_env()?,
    };

    let outcome = run_pipeline(&config, &publisher, &backend, &SystemRunner)?;
    Ok(outcome)
}

fn workspace_root(cli: &Cli) -> Result<PathBuf, CliError> {
    if let Some(root) = &cli.workspace_root {
        return Ok(root.clone());
    }
    std::env::current_dir().map_err(|e| {
        CliError::Cache(notepub_cache::Error::io(e, PathBuf::from("."), "current_dir"))
    })
}
