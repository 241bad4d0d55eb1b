//! Cross-environment database transfer

use crate::config::RunContext;
use crate::dispatch::{self, Invocation};
use crate::gcloud;
use anyhow::Result;
use tracing::info;

/// Tables excluded from transfer dumps (data only; structure is kept)
const SKIP_TABLES: &str = "cache,cache_*,watchdog";

/// One dispatch in the transfer sequence
#[derive(Debug, PartialEq, Eq)]
struct TransferStep {
    /// Runs on the source environment when true, on the target otherwise
    on_source: bool,
    /// Remote tool endpoint
    tool: &'static str,
    /// Argument string for the tool
    args: String,
}

/// Handle sync-db command. Four dispatches, aborting on the first failure;
/// a partially applied import is left for manual remediation.
pub async fn handle_sync_db(
    ctx: &RunContext,
    source: &str,
    target: &str,
    source_token: Option<&str>,
    target_token: Option<&str>,
) -> Result<()> {
    let source_ctx = ctx.with_environment(source);
    let target_ctx = ctx.with_environment(target);

    let source_token = gcloud::resolve_token(source_token).await?;
    let target_token = gcloud::resolve_token(target_token).await?;

    info!(
        "syncing the {} database from {} to {}",
        ctx.site, source, target
    );

    // random suffix avoids clobbering a concurrent transfer's object;
    // collisions are not detected
    let file_name = format!("drupal-{}-{}.sql", source, fastrand::u64(..));

    for step in transfer_plan(&ctx.site, &file_name) {
        let (step_ctx, token) = if step.on_source {
            (&source_ctx, &source_token)
        } else {
            (&target_ctx, &target_token)
        };
        let invocation = Invocation::new(step.tool, step.args, token);
        dispatch::issue_command(step_ctx, &invocation).await?;
    }

    println!(
        "✅ Synced the {} database from {source} to {target}",
        ctx.site
    );
    Ok(())
}

/// The four dispatches that move a database dump from source to target:
/// dump on the source, upload to site storage, download on the target,
/// import on the target (deleting the transferred file).
fn transfer_plan(site: &str, file_name: &str) -> [TransferStep; 4] {
    let object = format!("gs://{site}-backups/{file_name}");
    [
        TransferStep {
            on_source: true,
            tool: "drush",
            args: format!(
                "sql-dump -y --skip-tables-list={SKIP_TABLES} \
                 --structure-tables-list={SKIP_TABLES} --result-file=/tmp/drupal.sql --debug"
            ),
        },
        TransferStep {
            on_source: true,
            tool: "gsutil",
            args: format!("cp /tmp/drupal.sql {object}"),
        },
        TransferStep {
            on_source: false,
            tool: "gsutil",
            args: format!("cp {object} /tmp/"),
        },
        TransferStep {
            on_source: false,
            tool: "drush",
            args: format!("sql-query -y --file-delete --file=/tmp/{file_name} --debug"),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_plan_is_four_steps_in_transfer_order() {
        let steps = transfer_plan("demo", "drupal-staging-42.sql");

        assert_eq!(steps.len(), 4);

        assert!(steps[0].on_source);
        assert_eq!(steps[0].tool, "drush");
        assert!(steps[0].args.starts_with("sql-dump -y"));
        assert!(steps[0]
            .args
            .contains("--skip-tables-list=cache,cache_*,watchdog"));

        assert!(steps[1].on_source);
        assert_eq!(steps[1].tool, "gsutil");
        assert_eq!(
            steps[1].args,
            "cp /tmp/drupal.sql gs://demo-backups/drupal-staging-42.sql"
        );

        assert!(!steps[2].on_source);
        assert_eq!(steps[2].tool, "gsutil");
        assert_eq!(
            steps[2].args,
            "cp gs://demo-backups/drupal-staging-42.sql /tmp/"
        );

        assert!(!steps[3].on_source);
        assert_eq!(steps[3].tool, "drush");
        assert_eq!(
            steps[3].args,
            "sql-query -y --file-delete --file=/tmp/drupal-staging-42.sql --debug"
        );
    }

    #[test]
    fn transfer_objects_live_in_the_site_backup_bucket() {
        let steps = transfer_plan("my-site", "drupal-production-7.sql");
        assert!(steps[1]
            .args
            .ends_with("gs://my-site-backups/drupal-production-7.sql"));
    }
}
