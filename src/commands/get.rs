//! Read-only environment queries: connection info and config export

use crate::archive;
use crate::config::RunContext;
use crate::error::SiteOpsError;
use crate::gcloud;
use crate::remote;
use anyhow::{Context, Result};
use std::io::Cursor;
use std::path::Path;
use tracing::info;

/// Handle get info command
pub async fn handle_info(ctx: &RunContext, token: Option<&str>) -> Result<()> {
    let token = gcloud::resolve_token(token).await?;
    let url = gcloud::cloud_run_url(&ctx.site, &ctx.environment, &ctx.region).await?;

    let client = reqwest::Client::new();
    let info = remote::fetch_info(&client, &url, &token).await?;

    println!("{}", serde_json::to_string(&info)?);
    Ok(())
}

/// Handle get config command
pub async fn handle_config(ctx: &RunContext, token: Option<&str>) -> Result<()> {
    let config_dir = Path::new("config");
    if !config_dir.exists() {
        return Err(SiteOpsError::LocalState {
            message: "config directory does not exist; run this from your site's code directory"
                .to_string(),
        }
        .into());
    }

    let token = gcloud::resolve_token(token).await?;
    let url = gcloud::cloud_run_url(&ctx.site, &ctx.environment, &ctx.region).await?;

    info!("exporting config from {} {}", ctx.site, ctx.environment);
    let client = reqwest::Client::new();
    let archive_bytes = remote::export_config(&client, &url, &token).await?;

    // the export replaces the directory wholesale
    std::fs::remove_dir_all(config_dir)
        .context("could not remove config to overwrite it with new content")?;
    archive::extract_tarball(Cursor::new(archive_bytes), Path::new("."))?;

    println!("✅ Config exported to {}", config_dir.display());
    Ok(())
}
