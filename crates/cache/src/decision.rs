//! Failure-tolerant wrapping of cache backend calls
//!
//! Backend availability matters for efficiency, not correctness: a fault
//! during restore degrades to "publish anyway", a fault during save costs
//! at most one redundant publish on the next run. Neither may abort the
//! run, so both wrappers log and carry on instead of propagating.

use crate::backend::CacheBackend;
use crate::key::CacheKey;
use std::path::PathBuf;

/// Outcome of a cache lookup after fault normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Restore {
    /// A stored artifact set was found and materialized under this key.
    Hit(CacheKey),
    /// No artifact set (or the backend was unavailable); publish is needed.
    Miss,
}

impl Restore {
    /// Whether the lookup found a stored artifact set.
    #[must_use]
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_))
    }
}

/// Query the backend for `key`, treating backend faults as misses.
pub fn restore_or_miss(
    backend: &dyn CacheBackend,
    key: &CacheKey,
    targets: &[PathBuf],
) -> Restore {
    match backend.restore(std::slice::from_ref(key), targets) {
        Ok(Some(matched)) => Restore::Hit(matched),
        Ok(None) => Restore::Miss,
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "cache restore failed; treating as miss");
            Restore::Miss
        }
    }
}

/// Store `targets` under `key`, swallowing backend faults.
///
/// Called after a successful publish; a failed save must not fail the run.
pub fn save_best_effort(backend: &dyn CacheBackend, targets: &[PathBuf], key: &CacheKey) {
    if let Err(e) = backend.save(targets, key) {
        tracing::warn!(key = %key, error = %e, "cache save failed; continuing");
    }
}
