//! Remote tool dispatch: runs `drush`/`gsutil` style commands on an
//! environment and streams their output back as it is produced.

use crate::config::RunContext;
use crate::error::{Result, SiteOpsError};
use crate::gcloud;
use crate::probe;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::info;

/// One remote tool invocation: the tool's endpoint name plus a single
/// argument string executed shell-style on the environment. Ephemeral; never
/// persisted.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Endpoint name of the tool to run (`drush`, `gsutil`)
    pub tool: String,
    /// Argument string passed through verbatim as the request body
    pub args: String,
    /// Bearer token presented to the environment
    pub token: String,
}

impl Invocation {
    /// Package up a tool invocation
    pub fn new(tool: &str, args: impl Into<String>, token: &str) -> Self {
        Self {
            tool: tool.to_string(),
            args: args.into(),
            token: token.to_string(),
        }
    }
}

/// Run a tool on the environment, streaming its output to stdout.
///
/// Waits for the environment to report ready, then re-resolves its URL and
/// posts the invocation. The caller is trusted to supply safe arguments;
/// nothing is sanitized client-side.
pub async fn issue_command(ctx: &RunContext, invocation: &Invocation) -> Result<()> {
    probe::wait_until_online(ctx, &invocation.token).await?;

    info!(
        "running `{} {}` on {} {}",
        invocation.tool, invocation.args, ctx.site, ctx.environment
    );
    let url = gcloud::cloud_run_url(&ctx.site, &ctx.environment, &ctx.region).await?;
    let client = reqwest::Client::new();
    let mut stdout = tokio::io::stdout();
    post_and_stream(&client, &url, invocation, &mut stdout).await
}

/// POST `<base_url>/<tool>` with the argument string as the raw body and
/// copy the response to `out` chunk by chunk, flushing as chunks arrive so
/// long-running remote commands appear incrementally. The full response is
/// never buffered.
pub async fn post_and_stream<W>(
    client: &reqwest::Client,
    base_url: &str,
    invocation: &Invocation,
    out: &mut W,
) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut resp = client
        .post(format!("{}/{}", base_url, invocation.tool))
        .bearer_auth(&invocation.token)
        .body(invocation.args.clone())
        .send()
        .await?;

    let status = resp.status().as_u16();
    if status >= 300 {
        return Err(SiteOpsError::RemoteCall {
            status,
            operation: format!("{} on {}", invocation.tool, base_url),
        });
    }

    while let Some(chunk) = resp.chunk().await? {
        out.write_all(&chunk).await?;
        out.flush().await?;
    }

    Ok(())
}
