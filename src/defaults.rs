//! Defaults resolved at startup for flags the operator did not pass.
//!
//! Each lookup is a standalone fallible function so commands only pay for
//! the ones they need: the public-IP lookup runs only when `--ip` was not
//! given, the account lookup only when `--google-account` was not given.

use crate::error::Result;
use std::path::PathBuf;
use tracing::debug;

/// Address answering plain-text "what is my IP" requests
const IP_LOOKUP_URL: &str = "https://ifconfig.me";

/// Site name fallback: the current directory's basename
#[must_use]
pub fn site_from_cwd() -> Option<String> {
    let cwd = std::env::current_dir().ok()?;
    cwd.file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

/// Default SSH public key path, `~/.ssh/id_rsa.pub`
#[must_use]
pub fn ssh_public_key_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".ssh").join("id_rsa.pub"))
}

/// Default SSH private key path, `~/.ssh/id_rsa`
#[must_use]
pub fn ssh_private_key_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".ssh").join("id_rsa"))
}

/// The workstation's public IP as seen from outside
pub async fn public_ip(client: &reqwest::Client) -> Result<String> {
    debug!("looking up public IP via {}", IP_LOOKUP_URL);
    let ip = client
        .get(IP_LOOKUP_URL)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(ip.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ssh_key_paths_live_under_the_home_directory() {
        if let Some(path) = ssh_public_key_path() {
            assert!(path.ends_with(".ssh/id_rsa.pub"));
        }
        if let Some(path) = ssh_private_key_path() {
            assert!(path.ends_with(".ssh/id_rsa"));
        }
    }

    #[test]
    fn site_from_cwd_is_a_bare_name() {
        if let Some(site) = site_from_cwd() {
            assert!(!site.is_empty());
            assert!(!site.contains('/'));
        }
    }
}
