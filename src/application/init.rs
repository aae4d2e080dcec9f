//! Initialize workspace use case

use crate::error::Result;
use crate::infrastructure::store::CollectionPath;
use crate::infrastructure::{Config, Workspace};
use std::fs;
use std::path::Path;

/// Initialize a new workspace at the specified path.
pub fn init(path: &Path, app_id: Option<String>) -> Result<(Workspace, Config)> {
    if let Some(app_id) = &app_id {
        CollectionPath::validate_app_id(app_id)?;
    }

    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let workspace = Workspace::new(path.to_path_buf());
    workspace.initialize()?;

    let config = Config::new(app_id);
    workspace.save_config(&config)?;

    Ok((workspace, config))
}
