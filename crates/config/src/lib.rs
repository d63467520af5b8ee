//! Workspace configuration loading for notepub
//!
//! The configuration document is a YAML file describing the content vaults
//! that make up a documentation workspace, plus publish settings. Two
//! historical schema shapes are in the wild: the legacy shape keeps the
//! vault list at the top level, newer revisions nest it under a `workspace`
//! section. [`WorkspaceConfig::vaults`] normalizes over both so nothing
//! downstream has to care which shape it was handed.
//!
//! Unknown keys are carried through untouched, so a load/filter/store
//! round trip only removes what the filter removed.

mod error;
mod filter;

pub use error::{Error, Result};
pub use filter::filter_private_vaults;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Highest configuration schema version with a known vault-list shape.
const MAX_SUPPORTED_VERSION: u64 = 5;

/// Vault visibility attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Vault is published.
    Public,
    /// Vault is excluded from publishing when `ignore-private` is set.
    Private,
}

/// A named content root contributing files to the workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vault {
    /// Vault identity.
    pub name: String,
    /// Filesystem path of the vault root, relative to the workspace root.
    pub fs_path: PathBuf,
    /// Visibility attribute; absent means public.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    /// Schema fields this tool does not interpret, preserved on rewrite.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Vault {
    /// Whether this vault is marked private.
    #[must_use]
    pub fn is_private(&self) -> bool {
        self.visibility == Some(Visibility::Private)
    }
}

/// Publish-time handling of notes duplicated across vaults. Only the
/// `payload` vault-name list is interpreted here; it must not reference
/// vaults that were filtered out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateNoteBehavior {
    /// Behavior identifier, passed through to the publish CLI.
    pub action: String,
    /// Ordered vault names the behavior applies to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Vec<String>>,
}

/// Publish settings section (`site` in the legacy shape, `publishing` in
/// the nested shape; some documents carry both).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Duplicate-note handling referencing vaults by name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate_note_behavior: Option<DuplicateNoteBehavior>,
    /// Uninterpreted publish settings, preserved on rewrite.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Nested workspace section introduced by the newer schema shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSection {
    /// Vault list in the nested shape.
    pub vaults: Vec<Vault>,
    /// Uninterpreted workspace settings, preserved on rewrite.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Parsed workspace configuration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceConfig {
    /// Declared schema version, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
    /// Legacy top-level vault list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vaults: Option<Vec<Vault>>,
    /// Nested workspace section (wins over the legacy list when present).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<WorkspaceSection>,
    /// Legacy publish settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<SiteConfig>,
    /// Publish settings in the nested shape.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publishing: Option<SiteConfig>,
    /// Everything else in the document, preserved on rewrite.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl WorkspaceConfig {
    /// Load and parse the configuration document at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|e| Error::io(e, path, "read"))?;
        let config: Self =
            serde_yaml::from_str(&data).map_err(|e| Error::parse(path, e.to_string()))?;

        if let Some(version) = config.version
            && version > MAX_SUPPORTED_VERSION
        {
            return Err(Error::UnsupportedVersion { version });
        }

        tracing::debug!(path = %path.display(), version = ?config.version, "loaded workspace configuration");
        Ok(config)
    }

    /// The vault list, regardless of which schema shape carries it.
    ///
    /// The nested `workspace.vaults` shape wins when both are present,
    /// matching how the publish CLI itself resolves the document.
    pub fn vaults(&self) -> Result<&[Vault]> {
        if let Some(section) = &self.workspace {
            return Ok(&section.vaults);
        }
        if let Some(vaults) = &self.vaults {
            return Ok(vaults);
        }
        Err(Error::MissingVaults)
    }

    /// Serialize the configuration back to YAML at `path`.
    ///
    /// Used after private-vault filtering so the external publish CLI sees
    /// the same filtered view the fingerprint was computed from.
    pub fn store(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let data = serde_yaml::to_string(self).map_err(|e| Error::Serialize {
            message: e.to_string(),
        })?;
        fs::write(path, data).map_err(|e| Error::io(e, path, "write"))?;
        tracing::debug!(path = %path.display(), "rewrote workspace configuration");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const NESTED_SHAPE: &str = r"
version: 5
workspace:
  vaults:
    - name: public
      fsPath: vault-public
    - name: private
      fsPath: vault-private
      visibility: private
publishing:
  siteUrl: https://docs.example.com
  duplicateNoteBehavior:
    action: useVault
    payload:
      - public
      - private
";

    const LEGACY_SHAPE: &str = r"
version: 3
vaults:
  - name: notes
    fsPath: vault
site:
  siteHierarchies:
    - root
";

    fn write_config(contents: &str) -> (TempDir, std::path::PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dendron.yml");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn loads_nested_shape() {
        let (_dir, path) = write_config(NESTED_SHAPE);
        let config = WorkspaceConfig::load(&path).unwrap();

        let vaults = config.vaults().unwrap();
        assert_eq!(vaults.len(), 2);
        assert_eq!(vaults[0].name, "public");
        assert_eq!(vaults[0].fs_path, PathBuf::from("vault-public"));
        assert!(!vaults[0].is_private());
        assert!(vaults[1].is_private());
    }

    #[test]
    fn loads_legacy_shape() {
        let (_dir, path) = write_config(LEGACY_SHAPE);
        let config = WorkspaceConfig::load(&path).unwrap();

        let vaults = config.vaults().unwrap();
        assert_eq!(vaults.len(), 1);
        assert_eq!(vaults[0].name, "notes");
    }

    #[test]
    fn nested_shape_wins_over_legacy_list() {
        let (_dir, path) = write_config(
            r"
vaults:
  - name: old
    fsPath: old
workspace:
  vaults:
    - name: new
      fsPath: new
",
        );
        let config = WorkspaceConfig::load(&path).unwrap();
        let vaults = config.vaults().unwrap();
        assert_eq!(vaults.len(), 1);
        assert_eq!(vaults[0].name, "new");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = WorkspaceConfig::load(dir.path().join("absent.yml")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn malformed_yaml_is_parse_error() {
        let (_dir, path) = write_config("vaults: [unclosed");
        let err = WorkspaceConfig::load(&path).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn future_schema_version_is_rejected() {
        let (_dir, path) = write_config("version: 9\nvaults: []\n");
        let err = WorkspaceConfig::load(&path).unwrap_err();
        assert!(matches!(err, Error::UnsupportedVersion { version: 9 }));
    }

    #[test]
    fn no_vault_list_is_an_error() {
        let (_dir, path) = write_config("version: 4\nsite:\n  siteUrl: x\n");
        let config = WorkspaceConfig::load(&path).unwrap();
        assert!(matches!(config.vaults(), Err(Error::MissingVaults)));
    }

    #[test]
    fn store_round_trip_preserves_unknown_keys() {
        let (dir, path) = write_config(NESTED_SHAPE);
        let config = WorkspaceConfig::load(&path).unwrap();

        let out = dir.path().join("rewritten.yml");
        config.store(&out).unwrap();

        let reloaded = WorkspaceConfig::load(&out).unwrap();
        assert_eq!(reloaded.vaults().unwrap().len(), 2);
        let publishing = reloaded.publishing.unwrap();
        assert_eq!(
            publishing.extra.get("siteUrl"),
            Some(&serde_yaml::Value::String(
                "https://docs.example.com".into()
            ))
        );
    }
}
