//! Deterministic workspace content fingerprinting
//!
//! The fingerprint is the cache key's content-addressed half: a SHA-256
//! digest over the sorted per-file digests of every tracked file in every
//! vault. Sorting the pooled digest list is the determinism anchor; it
//! removes any dependency on directory enumeration order, traversal order,
//! or vault declaration order.

use crate::{Error, Result};
use notepub_config::Vault;
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Subtree of each vault whose files are tracked in addition to notes.
const ASSETS_DIR: &str = "assets";

/// Extension of tracked note files at the vault root.
const NOTE_EXTENSION: &str = "md";

/// Fixed-length hex digest summarizing all tracked content in a workspace.
///
/// Recomputed on every run; two runs over byte-identical tracked content
/// yield the same fingerprint regardless of file enumeration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceFingerprint(String);

impl WorkspaceFingerprint {
    /// The fingerprint as its canonical lowercase hex string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkspaceFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the workspace fingerprint over all tracked files in `vaults`.
///
/// Tracked files per vault: regular files directly in the vault root with
/// the `md` extension, plus every file under the vault's `assets/` subtree.
/// A missing vault root or an unreadable tracked file aborts the whole
/// computation; a partial fingerprint is meaningless.
pub fn compute_fingerprint(vaults: &[Vault]) -> Result<WorkspaceFingerprint> {
    let mut digests: Vec<String> = Vec::new();
    for vault in vaults {
        collect_vault_digests(vault, &mut digests)?;
    }

    // Lexicographic byte order of the hex strings; the input order of the
    // pool is irrelevant after this point.
    digests.sort_unstable();

    let mut hasher = Sha256::new();
    for digest in &digests {
        hasher.update(digest.as_bytes());
    }
    let fingerprint = hex::encode(hasher.finalize());

    tracing::debug!(files = digests.len(), %fingerprint, "computed workspace fingerprint");
    Ok(WorkspaceFingerprint(fingerprint))
}

fn collect_vault_digests(vault: &Vault, digests: &mut Vec<String>) -> Result<()> {
    let root = &vault.fs_path;
    let entries = fs::read_dir(root).map_err(|e| Error::io(e, root, "read_dir"))?;

    for entry in entries {
        let entry = entry.map_err(|e| Error::io(e, root, "read_dir"))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == NOTE_EXTENSION) {
            digests.push(digest_file(&path)?);
        }
    }

    let assets = root.join(ASSETS_DIR);
    if assets.is_dir() {
        for entry in WalkDir::new(&assets) {
            let entry = entry.map_err(|e| {
                let path = e.path().map_or_else(|| assets.clone(), Path::to_path_buf);
                Error::io(e.into_io_error().unwrap_or_else(|| std::io::Error::other("walk failed")), path, "walk")
            })?;
            if entry.file_type().is_file() {
                digests.push(digest_file(entry.path())?);
            }
        }
    }

    Ok(())
}

fn digest_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| Error::io(e, path, "read"))?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}
