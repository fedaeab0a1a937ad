//! Subcommand implementations.

pub mod add;
pub mod init;
pub mod list;
pub mod report;
pub mod snapshot;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use gradebook_client::config::{load_config_from, GradebookConfig};
use gradebook_client::RestClient;
use gradebook_store::RecordsStore;

/// Connect to the configured records API and pull the current records.
///
/// Every command runs against a freshly loaded mirror; a partial load
/// (some grade fetches failed) proceeds with a warning rather than
/// aborting the command.
pub async fn open_store(config_path: Option<&Path>) -> Result<(GradebookConfig, RecordsStore)> {
    let config = load_config_from(config_path)?;
    let client = RestClient::with_timeout(Some(config.api_url.clone()), config.timeout_secs);
    let mut store = RecordsStore::new(Arc::new(client));

    let report = store.load().await?;
    for failure in &report.failed_grade_fetches {
        tracing::warn!(
            student_id = %failure.student_id,
            error = %failure.error,
            "grades unavailable, student loaded without grades"
        );
    }

    Ok((config, store))
}
