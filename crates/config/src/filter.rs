//! Private-vault filtering.

use crate::{SiteConfig, Vault, WorkspaceConfig};
use std::collections::BTreeSet;

/// Remove private vaults from the configuration.
///
/// Pure transform: returns a new configuration with private vaults dropped
/// from whichever schema shape carries the vault list, and with vault names
/// that no longer exist removed from the duplicate-note payload of both the
/// `site` and `publishing` sections.
#[must_use]
pub fn filter_private_vaults(config: &WorkspaceConfig) -> WorkspaceConfig {
    let mut filtered = config.clone();

    let kept: BTreeSet<String> = match filtered.vaults() {
        Ok(vaults) => vaults
            .iter()
            .filter(|v| !v.is_private())
            .map(|v| v.name.clone())
            .collect(),
        Err(_) => BTreeSet::new(),
    };

    if let Some(section) = &mut filtered.workspace {
        retain_public(&mut section.vaults);
    }
    if let Some(vaults) = &mut filtered.vaults {
        retain_public(vaults);
    }

    retain_known_payload(filtered.site.as_mut(), &kept);
    retain_known_payload(filtered.publishing.as_mut(), &kept);

    filtered
}

fn retain_public(vaults: &mut Vec<Vault>) {
    let before = vaults.len();
    vaults.retain(|v| !v.is_private());
    if vaults.len() < before {
        tracing::info!(removed = before - vaults.len(), "excluded private vaults");
    }
}

fn retain_known_payload(site: Option<&mut SiteConfig>, kept: &BTreeSet<String>) {
    if let Some(site) = site
        && let Some(behavior) = &mut site.duplicate_note_behavior
        && let Some(payload) = &mut behavior.payload
    {
        payload.retain(|name| kept.contains(name));
    }
}
