//! Client for the non-dispatch surface of an environment's admin API:
//! connection info, config export, and database import.

use crate::connection::ConnectionInfo;
use crate::error::{Result, SiteOpsError};
use reqwest::multipart;
use std::path::Path;
use tracing::debug;

/// Fetch connection information for every provisioned service.
pub async fn fetch_info(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
) -> Result<ConnectionInfo> {
    let resp = client
        .get(format!("{base_url}/info"))
        .bearer_auth(token)
        .send()
        .await?;

    let status = resp.status().as_u16();
    if status >= 300 {
        return Err(SiteOpsError::RemoteCall {
            status,
            operation: "fetching connection info".to_string(),
        });
    }

    Ok(resp.json::<ConnectionInfo>().await?)
}

/// Download the environment's exported configuration as a gzip-tar archive.
pub async fn export_config(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
) -> Result<Vec<u8>> {
    let resp = client
        .get(format!("{base_url}/cex"))
        .bearer_auth(token)
        .send()
        .await?;

    let status = resp.status().as_u16();
    if status != 200 {
        return Err(SiteOpsError::RemoteCall {
            status,
            operation: "exporting config".to_string(),
        });
    }

    let body = resp.bytes().await?;
    debug!("downloaded {} bytes of config export", body.len());
    Ok(body.to_vec())
}

/// Upload a database dump as the single multipart field `sql`.
pub async fn import_database(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
    file: &Path,
) -> Result<()> {
    let contents = tokio::fs::read(file).await?;
    debug!(
        "uploading {} ({} bytes) for import",
        file.display(),
        contents.len()
    );

    let part = multipart::Part::bytes(contents).file_name(file.display().to_string());
    let form = multipart::Form::new().part("sql", part);

    let resp = client
        .post(format!("{base_url}/import/db"))
        .bearer_auth(token)
        .multipart(form)
        .send()
        .await?;

    let status = resp.status().as_u16();
    if status != 200 {
        return Err(SiteOpsError::RemoteCall {
            status,
            operation: "importing the database".to_string(),
        });
    }

    Ok(())
}
