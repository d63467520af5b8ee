//! Cache key derivation

use crate::fingerprint::WorkspaceFingerprint;
use std::fmt;

/// Fixed namespace prefix for publish artifact cache keys.
const KEY_NAMESPACE: &str = "notepub-publish";

/// String key addressing one stored artifact set on the cache backend.
///
/// The key space is flat: same key means same artifact set (until
/// overwritten by the backend's last-writer-wins semantics), different key
/// means an independent slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive the cache key for a workspace fingerprint.
    #[must_use]
    pub fn for_fingerprint(fingerprint: &WorkspaceFingerprint) -> Self {
        Self(format!("{KEY_NAMESPACE}-{fingerprint}"))
    }

    /// The key as the string the backend is addressed with.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::compute_fingerprint;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn key_carries_namespace_and_fingerprint() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("v");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("a.md"), "hello").unwrap();
        let vault = notepub_config::Vault {
            name: "v".into(),
            fs_path: root,
            visibility: None,
            extra: BTreeMap::new(),
        };

        let fingerprint = compute_fingerprint(&[vault]).unwrap();
        let key = CacheKey::for_fingerprint(&fingerprint);

        assert!(key.as_str().starts_with("notepub-publish-"));
        assert!(key.as_str().ends_with(fingerprint.as_str()));
    }
}
