//! Skip-or-publish decision pipeline
//!
//! Ties the pieces together: workspace init, content fingerprinting, cache
//! lookup, and (on a miss) the publish steps followed by a best-effort
//! cache save. Cache hits stop the run before any publish step executes.

use crate::orchestrator::Publisher;
use crate::process::ProcessRunner;
use crate::Result;
use notepub_cache::{
    CacheBackend, CacheKey, WorkspaceFingerprint, compute_fingerprint, restore_or_miss,
    save_best_effort,
};
use notepub_config::{Vault, WorkspaceConfig};

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct PublishOutcome {
    /// Fingerprint of the workspace content this run saw.
    pub fingerprint: WorkspaceFingerprint,
    /// Whether a fresh publish occurred (false = cache hit, skipped).
    pub was_published: bool,
}

/// Run the full skip-or-publish pipeline for `config`.
///
/// Workspace init runs unconditionally; it materializes the vault
/// checkouts the fingerprint is computed over. Everything downstream of
/// the cache lookup runs only on a miss.
pub fn run_pipeline(
    config: &WorkspaceConfig,
    publisher: &Publisher,
    backend: &dyn CacheBackend,
    runner: &dyn ProcessRunner,
) -> Result<PublishOutcome> {
    publisher.init_workspace(runner)?;

    let vaults = rooted_vaults(config, publisher)?;
    tracing::info!(vaults = vaults.len(), "hashing workspace content");
    let fingerprint = compute_fingerprint(&vaults)?;
    tracing::info!(%fingerprint, "workspace fingerprint");

    let key = CacheKey::for_fingerprint(&fingerprint);
    let targets = vec![publisher.export_dir()];

    tracing::info!(%key, "looking up published artifacts in cache");
    if restore_or_miss(backend, &key, &targets).is_hit() {
        tracing::info!("workspace already published, skipping publish");
        return Ok(PublishOutcome {
            fingerprint,
            was_published: false,
        });
    }

    tracing::info!("published notes not found in cache, publishing");
    publisher.publish(runner)?;

    tracing::info!("caching published docs");
    save_best_effort(backend, &targets, &key);

    Ok(PublishOutcome {
        fingerprint,
        was_published: true,
    })
}

/// Vault list with paths resolved against the workspace root, so the
/// pipeline does not depend on the process working directory.
fn rooted_vaults(config: &WorkspaceConfig, publisher: &Publisher) -> Result<Vec<Vault>> {
    Ok(config
        .vaults()?
        .iter()
        .map(|vault| {
            let mut rooted = vault.clone();
            rooted.fs_path = publisher.root().join(&vault.fs_path);
            rooted
        })
        .collect())
}
