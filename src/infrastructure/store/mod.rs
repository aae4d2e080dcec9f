//! Document store boundary
//!
//! A store holds collections of entries addressed by a slash-separated
//! [`CollectionPath`]. Every implementation assigns ids and creation
//! timestamps itself and publishes snapshots sorted newest first.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::domain::{Entry, EntryId, EntryRecord};
use crate::error::{Result, StoryError};
use crate::infrastructure::{Config, StoreBackend, Workspace};
use async_trait::async_trait;
use futures::stream::BoxStream;
use regex::Regex;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Stream of full collection snapshots. The first item is the current state.
pub type SnapshotStream = BoxStream<'static, Result<Vec<Entry>>>;

pub(crate) const CLOSED_MESSAGE: &str = "store is closed";

fn segment_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[A-Za-z0-9_.-]+$").unwrap())
}

/// Validated slash-separated location of a collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionPath {
    segments: Vec<String>,
}

impl CollectionPath {
    pub fn parse(path: &str) -> Result<Self> {
        let segments: Vec<String> = path.split('/').map(str::to_string).collect();

        for segment in &segments {
            if segment == "." || segment == ".." || !segment_regex().is_match(segment) {
                return Err(StoryError::Config(format!(
                    "Invalid collection path '{}': segment '{}' must match [A-Za-z0-9_.-]+",
                    path, segment
                )));
            }
        }

        Ok(CollectionPath { segments })
    }

    /// `artifacts/<app_id>/public/data/<collection>` when an app id is set,
    /// otherwise the bare collection name
    pub fn for_collection(collection: &str, app_id: Option<&str>) -> Result<Self> {
        match app_id {
            Some(app_id) => {
                Self::validate_app_id(app_id)?;
                Self::parse(&format!(
                    "artifacts/{}/public/data/{}",
                    app_id, collection
                ))
            }
            None => Self::parse(collection),
        }
    }

    /// An app id becomes exactly one segment of the collection path
    pub fn validate_app_id(app_id: &str) -> Result<()> {
        if app_id.contains('/') {
            return Err(StoryError::Config(format!(
                "Invalid app id '{}': must not contain '/'",
                app_id
            )));
        }
        Self::parse(app_id).map(|_| ())
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

/// Abstract document store
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a record; the store assigns its id and creation time
    async fn add(&self, collection: &CollectionPath, record: EntryRecord) -> Result<EntryId>;

    /// Delete by id; deleting a missing id succeeds
    async fn delete(&self, collection: &CollectionPath, id: &EntryId) -> Result<()>;

    /// Live snapshots of a collection, newest first
    fn watch(&self, collection: &CollectionPath) -> SnapshotStream;

    /// End the store lifecycle. Later calls fail and open watches end.
    async fn close(&self) -> Result<()>;
}

/// Connect to the store selected by the configuration
pub fn connect(config: &Config, workspace: &Workspace) -> Arc<dyn DocumentStore> {
    match config.backend {
        StoreBackend::File => Arc::new(FileStore::new(
            workspace.store_dir(),
            config.poll_interval(),
        )),
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
    }
}
