//! Export entries use case

use crate::domain::{Entry, ExportFormat};
use crate::error::Result;
use crate::infrastructure::download::save_export;
use std::path::{Path, PathBuf};

/// Service for writing the live list out as a downloadable artifact
pub struct ExportService;

impl ExportService {
    /// Render `entries` in list order and save them under the format's
    /// fixed filename in `out_dir`
    pub async fn execute(entries: &[Entry], format: ExportFormat, out_dir: &Path) -> Result<PathBuf> {
        let contents = format.render(entries)?;
        save_export(out_dir, format, &contents).await
    }
}
