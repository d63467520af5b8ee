//! Content-addressed publish caching for notepub
//!
//! This crate decides whether a documentation workspace needs a fresh
//! publish run:
//! - Deterministic fingerprinting of all tracked vault content
//! - Cache key derivation from the fingerprint
//! - A cache backend contract plus a local directory-per-key backend
//! - Failure-tolerant wrappers that degrade backend faults to "publish"
//!
//! # Cache Key Computation
//!
//! Every tracked file is hashed with SHA-256; the pooled per-file digests
//! are sorted and hashed again into a single workspace fingerprint. The
//! cache key is that fingerprint under a fixed namespace prefix.

mod backend;
mod decision;
mod error;
mod fingerprint;
mod key;

pub use backend::{CacheBackend, LocalBackend};
pub use decision::{Restore, restore_or_miss, save_best_effort};
pub use error::{Error, Result};
pub use fingerprint::{WorkspaceFingerprint, compute_fingerprint};
pub use key::CacheKey;
