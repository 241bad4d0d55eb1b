//! Readiness probing against an environment's `/ping/` endpoint.
//!
//! Environments run on scale-to-zero compute, so the first request after an
//! idle period can take a while to answer. The prober polls with fixed
//! intervals (no exponential backoff) until the service reports healthy or
//! the deadline passes.

use crate::config::RunContext;
use crate::error::{Result, SiteOpsError};
use crate::gcloud;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, info};

/// Timing knobs for the readiness probe
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Timeout applied to each individual probe request
    pub request_timeout: Duration,
    /// Total time to keep probing before giving up
    pub deadline: Duration,
    /// Sleep after a response with a non-200 status
    pub retry_interval: Duration,
    /// Sleep after a transport error (connection refused, DNS failure, timeout)
    pub transport_retry_interval: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(3),
            deadline: Duration::from_secs(180),
            retry_interval: Duration::from_secs(5),
            transport_retry_interval: Duration::from_secs(10),
        }
    }
}

/// Resolve the environment's URL and wait for it to report ready.
pub async fn wait_until_online(ctx: &RunContext, token: &str) -> Result<()> {
    let url = gcloud::cloud_run_url(&ctx.site, &ctx.environment, &ctx.region).await?;
    let client = reqwest::Client::new();
    wait_for_ready(&client, &url, token, &ProbeConfig::default()).await
}

/// Poll `GET <base_url>/ping/` until one probe returns 200 or the deadline
/// elapses. Success requires exactly one healthy response.
pub async fn wait_for_ready(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
    config: &ProbeConfig,
) -> Result<()> {
    let ping_url = format!("{base_url}/ping/");
    let start = Instant::now();

    while start.elapsed() < config.deadline {
        let probe = client
            .get(&ping_url)
            .timeout(config.request_timeout)
            .bearer_auth(token)
            .send()
            .await;

        match probe {
            Ok(resp) if resp.status() == reqwest::StatusCode::OK => {
                debug!("{} ready after {:?}", base_url, start.elapsed());
                return Ok(());
            }
            Ok(resp) => {
                info!(
                    "received status {} from {}, retrying",
                    resp.status(),
                    ping_url
                );
                sleep(config.retry_interval).await;
            }
            Err(e) => {
                info!("environment not reachable yet ({e}), waiting before the next probe");
                sleep(config.transport_retry_interval).await;
            }
        }
    }

    Err(SiteOpsError::NotReady {
        waited_secs: config.deadline.as_secs(),
    })
}
