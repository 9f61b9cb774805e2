//! JSON export of the outline document.
//!
//! Serializes the full [`OutlineDocument`] — frozen inputs, derived
//! sections and the verbatim service response — so other tooling can
//! consume the outline without re-parsing the PDF.

use crate::models::OutlineDocument;
use crate::utils::json_filename;
use std::error::Error;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write an [`OutlineDocument`] to `{output_dir}/pauta_<slug>.json`.
///
/// Creates the output directory if needed. Returns the written path.
///
/// # Errors
///
/// Returns an error if directory creation, serialization or the file
/// write fails; the caller logs and reports it without aborting.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir))]
pub async fn write_outline_json(
    document: &OutlineDocument,
    output_dir: &str,
) -> Result<String, Box<dyn Error>> {
    let json = serde_json::to_string(document)?;

    if let Err(e) = fs::create_dir_all(output_dir).await {
        error!(%output_dir, error = %e, "Failed to create output dir");
        return Err(e.into());
    }

    let path = format!(
        "{}/{}",
        output_dir.trim_end_matches('/'),
        json_filename(&document.episode.episode_title)
    );

    info!(path = %path, "Writing JSON");
    fs::write(&path, json).await?;
    info!(path = %path, sections = document.sections.len(), "Wrote outline JSON");

    Ok(path)
}
