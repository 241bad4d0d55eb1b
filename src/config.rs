use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading CLI settings
#[derive(Debug, Error)]
pub enum SettingsError {
    /// IO error occurred while reading the settings file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error occurred
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// File name of the optional per-site CLI settings
pub const SETTINGS_FILE: &str = "siteops.toml";

/// Environment variable overriding the configured region
pub const REGION_ENV_VAR: &str = "SITEOPS_REGION";

/// Region used when neither the environment nor the settings file names one
pub const DEFAULT_REGION: &str = "us-central1";

/// Optional CLI settings loaded from `siteops.toml`
#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Google Cloud specific settings
    #[serde(default)]
    pub gcloud: GcloudSettings,
}

/// Google Cloud settings
#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct GcloudSettings {
    /// Region the per-environment services are deployed in
    pub region: Option<String>,
}

impl Settings {
    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path)?;
        let settings: Self = toml::from_str(&contents)?;
        Ok(settings)
    }

    /// Load `siteops.toml` from the current directory; a missing file is not
    /// an error, a malformed one is.
    pub fn load() -> Result<Self, SettingsError> {
        let path = Path::new(SETTINGS_FILE);
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Per-invocation execution context handed to every component
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Site (project) identifier
    pub site: String,
    /// Environment name within the site
    pub environment: String,
    /// Cloud Run region the environment's service lives in
    pub region: String,
}

impl RunContext {
    /// Build the context from parsed flags and loaded settings
    #[must_use]
    pub fn new(site: String, environment: String, settings: &Settings) -> Self {
        let region = region_from(std::env::var(REGION_ENV_VAR).ok(), settings);
        Self {
            site,
            environment,
            region,
        }
    }

    /// The same context pointed at a different environment
    #[must_use]
    pub fn with_environment(&self, environment: &str) -> Self {
        Self {
            site: self.site.clone(),
            environment: environment.to_string(),
            region: self.region.clone(),
        }
    }
}

/// Region precedence: environment variable, then settings file, then the
/// built-in default. Empty values count as unset.
fn region_from(env_region: Option<String>, settings: &Settings) -> String {
    env_region
        .filter(|region| !region.is_empty())
        .or_else(|| {
            settings
                .gcloud
                .region
                .clone()
                .filter(|region| !region.is_empty())
        })
        .unwrap_or_else(|| DEFAULT_REGION.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn settings_with_region(region: &str) -> Settings {
        Settings {
            gcloud: GcloudSettings {
                region: Some(region.to_string()),
            },
        }
    }

    #[test]
    fn env_var_beats_settings_file() {
        let settings = settings_with_region("europe-west1");
        let region = region_from(Some("asia-east1".to_string()), &settings);
        assert_eq!(region, "asia-east1");
    }

    #[test]
    fn settings_file_beats_builtin_default() {
        let settings = settings_with_region("europe-west1");
        assert_eq!(region_from(None, &settings), "europe-west1");
    }

    #[test]
    fn builtin_default_applies_when_nothing_is_configured() {
        assert_eq!(region_from(None, &Settings::default()), DEFAULT_REGION);
    }

    #[test]
    fn empty_values_count_as_unset() {
        let settings = settings_with_region("");
        let region = region_from(Some(String::new()), &settings);
        assert_eq!(region, DEFAULT_REGION);
    }

    #[test]
    fn settings_parse_from_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[gcloud]\nregion = \"us-east1\"").unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.gcloud.region.as_deref(), Some("us-east1"));
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert!(settings.gcloud.region.is_none());
    }

    #[test]
    fn with_environment_keeps_site_and_region() {
        let ctx = RunContext {
            site: "demo".to_string(),
            environment: "development".to_string(),
            region: "us-central1".to_string(),
        };
        let other = ctx.with_environment("production");
        assert_eq!(other.site, "demo");
        assert_eq!(other.environment, "production");
        assert_eq!(other.region, "us-central1");
    }
}
