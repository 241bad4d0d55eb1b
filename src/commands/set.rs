//! Edits to the site configuration document

use crate::defaults;
use crate::gcloud;
use crate::git;
use crate::site::{self, SiteDocument};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, warn};

/// Handle set developer command: allow the developer's IPs through both
/// firewalls and record their public key, then show what changed.
pub async fn handle_set_developer(
    google_account: Option<&str>,
    ips: &[String],
    pub_key: Option<&Path>,
    skip_pub_key: bool,
) -> Result<()> {
    // refuse to mix the edit into uncommitted work
    git::ensure_clean().await?;

    let path = Path::new(site::SITE_DOCUMENT);
    let mut doc = SiteDocument::load(path)?;

    let email = match google_account {
        Some(email) => email.to_string(),
        None => gcloud::active_account()
            .await
            .context("no --google-account given; are you authenticated to gcloud?")?,
    };

    let ips = if ips.is_empty() {
        default_ips().await
    } else {
        ips.to_vec()
    };
    for ip in &ips {
        debug!("allowing {ip} through both firewalls");
        doc.allow_ip(ip);
    }

    let public_key = if skip_pub_key {
        None
    } else {
        read_public_key(pub_key)
    };
    doc.add_developer_key(&email, public_key.as_deref());

    doc.save(path)?;

    let diff = git::diff().await?;
    if diff.is_empty() {
        println!(
            "No changes have been made to {}. Is this developer already configured?",
            site::SITE_DOCUMENT
        );
    } else {
        println!("{diff}");
        println!(
            "Your {} has been updated. Commit the changes for the new settings to take effect.",
            site::SITE_DOCUMENT
        );
    }
    Ok(())
}

/// The operator's public IP as a single-host CIDR, or nothing when the
/// lookup fails (the edit still proceeds without firewall entries).
async fn default_ips() -> Vec<String> {
    let client = reqwest::Client::new();
    match defaults::public_ip(&client).await {
        Ok(ip) => vec![format!("{ip}/32")],
        Err(e) => {
            warn!("could not determine your public IP ({e}); no firewall entries will be added");
            Vec::new()
        }
    }
}

/// Read the developer's public key, falling back to `~/.ssh/id_rsa.pub`.
/// An unreadable key is not fatal; the developer entry is still recorded.
fn read_public_key(flag_path: Option<&Path>) -> Option<String> {
    let key_path = flag_path
        .map(Path::to_path_buf)
        .or_else(defaults::ssh_public_key_path)?;

    match std::fs::read_to_string(&key_path) {
        Ok(contents) => Some(contents.trim().to_string()),
        Err(e) => {
            warn!(
                "unable to read the public key at {} ({e}); not setting a key value",
                key_path.display()
            );
            println!("⚠️  Could not read your SSH public key. Pass the full path as --pub-key");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_keys_are_trimmed_of_trailing_newlines() {
        let dir = tempfile::tempdir().unwrap();
        let key_path = dir.path().join("id_rsa.pub");
        std::fs::write(&key_path, "ssh-ed25519 AAAA dev@laptop\n").unwrap();

        let key = read_public_key(Some(&key_path)).unwrap();
        assert_eq!(key, "ssh-ed25519 AAAA dev@laptop");
    }

    #[test]
    fn an_unreadable_key_resolves_to_none() {
        let dir = tempfile::tempdir().unwrap();

        let key = read_public_key(Some(&dir.path().join("missing.pub")));
        assert!(key.is_none());
    }
}
