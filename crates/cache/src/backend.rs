//! Cache backend contract and the local directory-per-key backend

use crate::key::CacheKey;
use crate::{Error, Result};
use dirs::{cache_dir, home_dir};
use std::fs;
use std::path::{Path, PathBuf};

/// Storage backend for publish artifact sets, addressed by cache key.
///
/// `restore` returns `Ok(None)` when no key matches; that is a cache miss,
/// not an error. `Err(Error::Backend)` is reserved for backend faults
/// (service unavailable, storage corruption) and is what the
/// failure-tolerant wrapper in [`crate::decision`] normalizes away.
pub trait CacheBackend {
    /// Look up `keys` and, on a match, materialize the stored artifact set
    /// at `targets`. Returns the matched key.
    fn restore(&self, keys: &[CacheKey], targets: &[PathBuf]) -> Result<Option<CacheKey>>;

    /// Store the trees at `targets` under `key`, overwriting any previous
    /// artifact set stored there.
    fn save(&self, targets: &[PathBuf], key: &CacheKey) -> Result<()>;
}

/// Inputs for determining the local cache root directory
#[derive(Debug, Clone)]
struct CacheRootInputs {
    notepub_cache_dir: Option<PathBuf>,
    xdg_cache_home: Option<PathBuf>,
    os_cache_dir: Option<PathBuf>,
    home_dir: Option<PathBuf>,
    temp_dir: PathBuf,
}

fn cache_root_from_inputs(inputs: CacheRootInputs) -> Result<PathBuf> {
    // Resolution order (first writable wins):
    // 1) NOTEPUB_CACHE_DIR (explicit override)
    // 2) XDG_CACHE_HOME/notepub/publish
    // 3) OS cache dir/notepub/publish
    // 4) ~/.notepub/cache/publish
    // 5) TMPDIR/notepub/cache/publish (fallback)
    let mut candidates: Vec<PathBuf> = Vec::new();

    if let Some(dir) = inputs
        .notepub_cache_dir
        .filter(|p| !p.as_os_str().is_empty())
    {
        candidates.push(dir);
    }
    if let Some(xdg) = inputs.xdg_cache_home {
        candidates.push(xdg.join("notepub/publish"));
    }
    if let Some(os_cache) = inputs.os_cache_dir {
        candidates.push(os_cache.join("notepub/publish"));
    }
    if let Some(home) = inputs.home_dir {
        candidates.push(home.join(".notepub/cache/publish"));
    }
    candidates.push(inputs.temp_dir.join("notepub/cache/publish"));

    for path in candidates {
        if path.starts_with("/homeless-shelter") {
            continue;
        }
        // An existing path may still be read-only; some CI environments
        // mount cache directories under $HOME without write permission.
        if path.exists() {
            let probe = path.join(".write_probe");
            match fs::OpenOptions::new()
                .create(true)
                .truncate(true)
                .write(true)
                .open(&probe)
            {
                Ok(_) => {
                    let _ = fs::remove_file(&probe);
                    return Ok(path);
                }
                Err(_) => continue,
            }
        }
        if fs::create_dir_all(&path).is_ok() {
            return Ok(path);
        }
    }
    Err(Error::configuration(
        "Failed to determine a writable cache directory",
    ))
}

/// Resolve the default local cache root from the environment.
fn cache_root() -> Result<PathBuf> {
    let inputs = CacheRootInputs {
        notepub_cache_dir: std::env::var("NOTEPUB_CACHE_DIR")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from),
        xdg_cache_home: std::env::var("XDG_CACHE_HOME")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from),
        os_cache_dir: cache_dir(),
        home_dir: home_dir(),
        temp_dir: std::env::temp_dir(),
    };
    cache_root_from_inputs(inputs)
}

/// Directory-per-key artifact store on the local filesystem.
///
/// Each saved target tree lives under `<root>/<key>/<target-dir-name>/`.
/// Last writer wins; no eviction or TTL policy is applied here.
#[derive(Debug, Clone)]
pub struct LocalBackend {
    root: PathBuf,
}

impl LocalBackend {
    /// Backend rooted at an explicit directory.
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Backend rooted at the default resolved cache directory.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            root: cache_root()?,
        })
    }

    fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.root.join(key.as_str())
    }

    fn stored_name(target: &Path) -> Result<&std::ffi::OsStr> {
        target.file_name().ok_or_else(|| {
            Error::configuration(format!(
                "cache target {} has no final path component",
                target.display()
            ))
        })
    }
}

impl CacheBackend for LocalBackend {
    fn restore(&self, keys: &[CacheKey], targets: &[PathBuf]) -> Result<Option<CacheKey>> {
        let Some(key) = keys.iter().find(|k| self.entry_path(k).is_dir()) else {
            return Ok(None);
        };
        let entry = self.entry_path(key);

        for target in targets {
            let stored = entry.join(Self::stored_name(target)?);
            if !stored.exists() {
                continue;
            }
            copy_tree(&stored, target)?;
        }

        tracing::debug!(key = %key, "restored artifact set from local cache");
        Ok(Some(key.clone()))
    }

    fn save(&self, targets: &[PathBuf], key: &CacheKey) -> Result<()> {
        let entry = self.entry_path(key);
        if entry.exists() {
            fs::remove_dir_all(&entry).map_err(|e| Error::io(e, &entry, "remove_dir_all"))?;
        }
        fs::create_dir_all(&entry).map_err(|e| Error::io(e, &entry, "create_dir_all"))?;

        for target in targets {
            if !target.exists() {
                continue;
            }
            let stored = entry.join(Self::stored_name(target)?);
            copy_tree(target, &stored)?;
        }

        tracing::debug!(key = %key, "saved artifact set to local cache");
        Ok(())
    }
}

/// Copy a directory tree file by file, creating parents as needed.
fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    for entry in walkdir::WalkDir::new(src).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        let rel = path.strip_prefix(src).map_err(|_| {
            Error::configuration(format!(
                "path {} is not under {}",
                path.display(),
                src.display()
            ))
        })?;
        let dest = dst.join(rel);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(e, parent, "create_dir_all"))?;
        }
        fs::copy(path, &dest).map_err(|e| Error::io(e, &dest, "copy"))?;
    }
    Ok(())
}
