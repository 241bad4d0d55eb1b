use thiserror::Error;

/// Custom error types for `siteops`
#[derive(Error, Debug)]
pub enum SiteOpsError {
    /// Token or account acquisition failed
    #[error("authentication failed: {message}")]
    Auth {
        /// What went wrong while talking to the identity provider
        message: String,
    },

    /// The environment's service URL could not be resolved
    #[error("could not resolve environment '{environment}' for site '{site}': {message}")]
    Resolution {
        /// Site (project) identifier
        site: String,
        /// Environment name within the site
        environment: String,
        /// Underlying resolution failure
        message: String,
    },

    /// The environment never reported healthy within the deadline
    #[error("environment did not become ready within {waited_secs}s")]
    NotReady {
        /// How long the prober waited before giving up
        waited_secs: u64,
    },

    /// The remote API answered with a non-success status
    #[error("{operation} returned status {status}")]
    RemoteCall {
        /// HTTP status code of the failed response
        status: u16,
        /// What was being attempted
        operation: String,
    },

    /// Archive extraction failed
    #[error("extraction failed at {path}: {message}")]
    Extraction {
        /// Entry or destination path involved in the failure
        path: String,
        /// Underlying read or write failure
        message: String,
    },

    /// Local preconditions not met (dirty tree, missing file or directory)
    #[error("{message}")]
    LocalState {
        /// Human-readable description of the unmet precondition
        message: String,
    },

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport error wrapper
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// YAML (de)serialization error wrapper
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for `siteops` operations
pub type Result<T> = std::result::Result<T, SiteOpsError>;
