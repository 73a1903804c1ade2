//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{debug, warn};

/// Ensure the directory holding the SQLite file exists.
///
/// Accepts a database URL such as `sqlite://./data/cestas.db?mode=rwc`;
/// in-memory URLs and bare file names need nothing.
pub async fn ensure_data_dir(database_url: &str) -> anyhow::Result<()> {
    let Some(file) = sqlite_file_path(database_url) else {
        debug!(%database_url, "no on-disk sqlite file to prepare");
        return Ok(());
    };
    let Some(parent) = Path::new(&file).parent() else { return Ok(()) };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    if tokio::fs::metadata(parent).await.is_err() {
        warn!(dir = %parent.display(), "database directory missing; creating it");
    }
    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    Ok(())
}

/// Extract the file path from a `sqlite:` URL, or `None` for in-memory databases.
pub fn sqlite_file_path(database_url: &str) -> Option<String> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(path.to_string())
}
