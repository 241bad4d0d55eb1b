//! Pass-through drush execution on an environment

use crate::config::RunContext;
use crate::dispatch::{self, Invocation};
use crate::gcloud;
use anyhow::Result;

/// Handle drush command. Only non-interactive drush commands work; a prompt
/// on the remote side fails the call.
pub async fn handle_drush(ctx: &RunContext, token: Option<&str>, args: &[String]) -> Result<()> {
    let token = gcloud::resolve_token(token).await?;
    let invocation = Invocation::new("drush", args.join(" "), &token);
    dispatch::issue_command(ctx, &invocation).await?;
    Ok(())
}
