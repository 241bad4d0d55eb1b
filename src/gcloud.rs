//! Thin wrappers around the `gcloud` CLI for identity and service discovery.

use crate::error::{Result, SiteOpsError};
use tokio::process::Command;
use tracing::debug;
use url::Url;

/// Naming convention for an environment's Cloud Run service
#[must_use]
pub fn service_name(environment: &str) -> String {
    format!("remote-{environment}")
}

/// Return the explicit token when one was passed, otherwise mint a fresh one.
/// Tokens are never cached; each invocation pays for its own.
pub async fn resolve_token(explicit: Option<&str>) -> Result<String> {
    match explicit {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => identity_token().await,
    }
}

/// Mint an identity token for the active gcloud account
pub async fn identity_token() -> Result<String> {
    run_gcloud(&["auth", "print-identity-token"], "mint an identity token").await
}

/// Email address of the active gcloud account
pub async fn active_account() -> Result<String> {
    run_gcloud(
        &[
            "auth",
            "list",
            "--filter=status:ACTIVE",
            "--format=value(account)",
        ],
        "determine the active account",
    )
    .await
}

/// Resolve the base URL of an environment's Cloud Run service.
///
/// Never cached: every dispatch re-resolves, tolerating the service being
/// recreated at a new URL between runs.
pub async fn cloud_run_url(site: &str, environment: &str, region: &str) -> Result<String> {
    let service = service_name(environment);
    debug!(
        "resolving {} in region {} for project {}",
        service, region, site
    );

    let resolution_error = |message: String| SiteOpsError::Resolution {
        site: site.to_string(),
        environment: environment.to_string(),
        message,
    };

    let output = Command::new("gcloud")
        .args([
            "run",
            "services",
            "describe",
            &service,
            &format!("--region={region}"),
            &format!("--project={site}"),
            "--format=value(status.url)",
        ])
        .output()
        .await
        .map_err(|e| resolution_error(format!("failed to execute gcloud: {e}")))?;

    if !output.status.success() {
        return Err(resolution_error(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Url::parse(&url)
        .map_err(|e| resolution_error(format!("gcloud returned an unusable URL '{url}': {e}")))?;
    Ok(url)
}

async fn run_gcloud(args: &[&str], what: &str) -> Result<String> {
    let output = Command::new("gcloud")
        .args(args)
        .output()
        .await
        .map_err(|e| SiteOpsError::Auth {
            message: format!("failed to execute gcloud to {what}: {e}"),
        })?;

    if !output.status.success() {
        return Err(SiteOpsError::Auth {
            message: format!(
                "could not {what}: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }

    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if value.is_empty() {
        return Err(SiteOpsError::Auth {
            message: format!("could not {what}; have you run 'gcloud auth login'?"),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn explicit_token_is_passed_through_verbatim() {
        let token = resolve_token(Some("ey.explicit.token")).await.unwrap();
        assert_eq!(token, "ey.explicit.token");
    }

    #[test]
    fn service_name_follows_the_remote_convention() {
        assert_eq!(service_name("production"), "remote-production");
        assert_eq!(service_name("development"), "remote-development");
    }
}
