//! Writing export artifacts to disk

use crate::domain::ExportFormat;
use crate::error::Result;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// Save rendered export contents under the format's fixed filename in `dir`.
/// An existing file is overwritten.
pub async fn save_export(dir: &Path, format: ExportFormat, contents: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir).await?;
    let path = dir.join(format.filename());
    fs::write(&path, contents).await?;

    info!(
        path = %path.display(),
        mime = format.mime_type(),
        bytes = contents.len(),
        "export written"
    );
    Ok(path)
}
