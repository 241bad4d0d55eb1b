//! Database backup into the site's object storage

use crate::config::RunContext;
use crate::dispatch::{self, Invocation};
use crate::gcloud;
use anyhow::Result;
use chrono::Local;
use tracing::info;

/// Tables whose data is left out of dumps (structure is still kept)
const SKIP_TABLES: &str = "cache,cache_*";

/// Handle backup command
pub async fn handle_backup(ctx: &RunContext, token: Option<&str>) -> Result<()> {
    let token = gcloud::resolve_token(token).await?;

    info!("dumping {} {} database", ctx.site, ctx.environment);
    let dump = Invocation::new("drush", dump_args(), &token);
    dispatch::issue_command(ctx, &dump).await?;

    let object = backup_object(&ctx.site, &ctx.environment, &Local::now());
    info!("uploading dump to {}", object);
    let upload = Invocation::new("gsutil", format!("cp /tmp/drupal.sql {object}"), &token);
    dispatch::issue_command(ctx, &upload).await?;

    println!("✅ Database backed up to {object}");
    Ok(())
}

fn dump_args() -> String {
    format!(
        "sql-dump -y --skip-tables-list={SKIP_TABLES} --structure-tables-list={SKIP_TABLES} \
         --result-file=/tmp/drupal.sql --debug"
    )
}

/// Date-partitioned object path in the site's backup bucket
fn backup_object(site: &str, environment: &str, now: &chrono::DateTime<Local>) -> String {
    format!(
        "gs://{site}-backups/{}/{environment}/drupal-{}.sql",
        now.format("%Y/%m/%d"),
        now.format("%H-%M"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn dump_skips_cache_table_data() {
        let args = dump_args();
        assert!(args.starts_with("sql-dump -y"));
        assert!(args.contains("--skip-tables-list=cache,cache_*"));
        assert!(args.contains("--structure-tables-list=cache,cache_*"));
        assert!(args.contains("--result-file=/tmp/drupal.sql"));
    }

    #[test]
    fn backup_objects_are_partitioned_by_date_and_environment() {
        let when = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        assert_eq!(
            backup_object("demo", "production", &when),
            "gs://demo-backups/2024/03/09/production/drupal-14-05.sql"
        );
    }
}
