//! Local data uploads into an environment

use crate::config::RunContext;
use crate::error::SiteOpsError;
use crate::gcloud;
use crate::probe;
use crate::remote;
use anyhow::Result;
use std::path::Path;
use tracing::info;

/// Handle import db command
pub async fn handle_import_db(ctx: &RunContext, file: &Path, token: Option<&str>) -> Result<()> {
    if !file.exists() {
        return Err(SiteOpsError::LocalState {
            message: format!("{} does not exist", file.display()),
        }
        .into());
    }

    let token = gcloud::resolve_token(token).await?;
    probe::wait_until_online(ctx, &token).await?;

    let url = gcloud::cloud_run_url(&ctx.site, &ctx.environment, &ctx.region).await?;
    info!(
        "importing {} into {} {}",
        file.display(),
        ctx.site,
        ctx.environment
    );
    let client = reqwest::Client::new();
    remote::import_database(&client, &url, &token, file).await?;

    println!("✅ Successfully imported database!");
    Ok(())
}
