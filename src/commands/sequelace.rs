//! Launch Sequel Ace against an environment's database

use crate::config::RunContext;
use crate::connection;
use crate::defaults;
use crate::gcloud;
use crate::remote;
use anyhow::{anyhow, Context, Result};
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

/// Handle sequelace command: fetch connection info and hand a tunnelled
/// database URL to the Sequel Ace app.
pub async fn handle_sequelace(
    ctx: &RunContext,
    token: Option<&str>,
    ssh_priv_key: Option<&Path>,
    sequel_ace_path: &str,
) -> Result<()> {
    let token = gcloud::resolve_token(token).await?;
    let url = gcloud::cloud_run_url(&ctx.site, &ctx.environment, &ctx.region).await?;

    let client = reqwest::Client::new();
    let info = remote::fetch_info(&client, &url, &token).await?;

    let ssh = info
        .ssh
        .as_ref()
        .ok_or_else(|| anyhow!("this environment does not expose an SSH bastion"))?;
    let key_path = ssh_priv_key
        .map(Path::to_path_buf)
        .or_else(defaults::ssh_private_key_path)
        .ok_or_else(|| anyhow!("could not determine your SSH private key; pass --ssh-priv-key"))?;

    let connection_url = format!(
        "{}?{}",
        info.database_url(),
        connection::ssh_tunnel_query(ssh, &key_path.to_string_lossy())
    );

    debug!("opening connection URL with {}", sequel_ace_path);
    let status = Command::new("open")
        .arg(&connection_url)
        .arg("-a")
        .arg(sequel_ace_path)
        .status()
        .await
        .context("could not run 'open'; this command only works on macOS")?;

    if !status.success() {
        return Err(anyhow!(
            "open exited with {status}; is Sequel Ace installed at {sequel_ace_path}?"
        ));
    }

    println!(
        "✅ Opening the {} {} database in Sequel Ace",
        ctx.site, ctx.environment
    );
    Ok(())
}
