//! Workspace discovery and layout

use crate::error::{Result, StoryError};
use crate::infrastructure::Config;
use std::fs;
use std::path::{Path, PathBuf};

pub const ROOT_ENV: &str = "STORYSET_ROOT";
const WORKSPACE_DIR: &str = ".storyset";
const STORE_DIR: &str = "store";

/// A directory holding `.storyset/config.toml` and the file-store data
#[derive(Debug, Clone)]
pub struct Workspace {
    pub root: PathBuf,
}

impl Workspace {
    /// Create a workspace handle for the given root directory
    pub fn new(root: PathBuf) -> Self {
        Workspace { root }
    }

    /// Discover workspace root by walking up from current directory
    /// First checks STORYSET_ROOT environment variable, then falls back to discovery
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var(ROOT_ENV) {
            let path = PathBuf::from(root_path);
            if Self::has_workspace_dir(&path) {
                return Ok(Workspace::new(path));
            } else {
                return Err(StoryError::Config(format!(
                    "STORYSET_ROOT is set to '{}' but no .storyset directory found. \
                    Run 'storyset init' in that directory or unset STORYSET_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover workspace root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_workspace_dir(&current) {
                return Ok(Workspace::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(StoryError::NotStorysetDirectory(start.to_path_buf())),
            }
        }
    }

    fn has_workspace_dir(path: &Path) -> bool {
        path.join(WORKSPACE_DIR).is_dir()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory the file store keeps its collections in
    pub fn store_dir(&self) -> PathBuf {
        self.root.join(WORKSPACE_DIR).join(STORE_DIR)
    }

    pub fn is_initialized(&self) -> bool {
        Self::has_workspace_dir(&self.root)
    }

    /// Create the .storyset directory structure
    pub fn initialize(&self) -> Result<()> {
        let workspace_dir = self.root.join(WORKSPACE_DIR);

        if workspace_dir.exists() {
            return Err(StoryError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir_all(self.store_dir())?;
        Ok(())
    }

    pub fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    pub fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }
}
