//! `siteops` - administer managed Drupal site environments
//!
//! This library backs the `siteops` binary: it resolves a site's
//! per-environment Cloud Run services and runs administrative operations
//! (backups, drush, config export, developer access) against them.

#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    missing_docs,
    rust_2018_idioms
)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod archive;
/// Command line interface definition
pub mod cli;
/// Command handlers, one per subcommand
pub mod commands;
/// CLI settings and per-invocation context
pub mod config;
pub mod connection;
pub mod defaults;
pub mod dispatch;
/// Error types for siteops operations
pub mod error;
pub mod gcloud;
pub mod git;
pub mod probe;
pub mod remote;
pub mod site;

pub use config::{RunContext, Settings};
pub use connection::ConnectionInfo;
pub use error::{Result, SiteOpsError};
pub use site::SiteDocument;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
    }
}
