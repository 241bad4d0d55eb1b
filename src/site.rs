//! The site configuration document: platform versions, firewall
//! allow-lists, and developer SSH access, kept under version control at the
//! site checkout root and applied by the platform on commit.

use crate::error::{Result, SiteOpsError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// File name of the site document at the checkout root
pub const SITE_DOCUMENT: &str = "siteops.yml";

/// The declarative site policy document.
///
/// Firewall lists and developer key lists are ordered and duplicate-free;
/// the merge operations below preserve existing order and drop repeats.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteDocument {
    /// Platform release the site tracks
    #[serde(default)]
    pub version: f64,
    /// PHP runtime version
    #[serde(default)]
    pub php: f64,
    /// IPs allowed through the HTTPS firewall
    #[serde(rename = "https-firewall", default)]
    pub https_firewall: Vec<String>,
    /// IPs allowed through the SSH firewall
    #[serde(rename = "ssh-firewall", default)]
    pub ssh_firewall: Vec<String>,
    /// IPs denied at the edge
    #[serde(rename = "blocked-ips", default)]
    pub blocked_ips: Vec<String>,
    /// Developer email to their authorized public keys
    #[serde(default)]
    pub developers: BTreeMap<String, Vec<String>>,
    /// Database instance sizing override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mariadb: Option<String>,
    /// Solr instance sizing, when provisioned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solr: Option<u32>,
    /// Extra domains served, per environment
    #[serde(
        rename = "domain-mappings",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub domain_mappings: Option<BTreeMap<String, Vec<String>>>,
}

impl SiteDocument {
    /// Load the document from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SiteOpsError::LocalState {
                    message: format!(
                        "{} not found; run this from your site checkout",
                        path.display()
                    ),
                }
            } else {
                SiteOpsError::Io(e)
            }
        })?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    /// Write the document back as YAML
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = serde_yaml::to_string(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Allow an IP through both the HTTPS and SSH firewalls. Already-listed
    /// IPs are left where they are.
    pub fn allow_ip(&mut self, ip: &str) {
        push_unique(&mut self.https_firewall, ip);
        push_unique(&mut self.ssh_firewall, ip);
    }

    /// Record a developer, optionally appending a public key to their list.
    /// The entry is created even when no key is supplied; duplicate keys are
    /// ignored.
    pub fn add_developer_key(&mut self, email: &str, public_key: Option<&str>) {
        let keys = self.developers.entry(email.to_string()).or_default();
        if let Some(key) = public_key {
            if !key.is_empty() {
                push_unique(keys, key);
            }
        }
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|existing| existing == value) {
        list.push(value.to_string());
    }
}
