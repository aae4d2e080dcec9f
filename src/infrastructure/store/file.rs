//! Document store backed by one JSON file per collection

use super::{CollectionPath, DocumentStore, SnapshotStream, CLOSED_MESSAGE};
use crate::domain::entry::sort_newest_first;
use crate::domain::{Entry, EntryId, EntryRecord, Grade, ImageData};
use crate::error::{Result, StoryError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::fs;
use tokio::sync::Mutex;
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::{debug, warn};
use uuid::Uuid;

/// On-disk document; the id is the key of the enclosing map
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredDocument {
    grade: Grade,
    related: String,
    image_url: ImageData,
    created_at: DateTime<Utc>,
    #[serde(default)]
    author_id: Option<String>,
}

type Documents = BTreeMap<EntryId, StoredDocument>;

/// Stores each collection at `<root>/<segments..>.json`.
///
/// Writes from this process are serialized; writers in other processes are
/// picked up by watchers on their next poll.
pub struct FileStore {
    root: PathBuf,
    poll_interval: Duration,
    write_lock: Mutex<()>,
    closed: Arc<AtomicBool>,
}

impl FileStore {
    pub fn new(root: PathBuf, poll_interval: Duration) -> Self {
        FileStore {
            root,
            poll_interval,
            write_lock: Mutex::new(()),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// File holding the given collection
    pub fn collection_file(&self, collection: &CollectionPath) -> PathBuf {
        let mut path = self.root.clone();
        let segments = collection.segments();
        if let Some((last, parents)) = segments.split_last() {
            for segment in parents {
                path.push(segment);
            }
            path.push(format!("{}.json", last));
        }
        path
    }

    fn check_open(&self) -> Result<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(StoryError::Store(CLOSED_MESSAGE.to_string()));
        }
        Ok(())
    }
}

async fn read_documents(path: &Path) -> Result<Documents> {
    let contents = match fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Documents::new()),
        Err(e) => {
            return Err(StoryError::Store(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            )))
        }
    };

    serde_json::from_str(&contents).map_err(|e| {
        StoryError::Store(format!("Corrupt collection file {}: {}", path.display(), e))
    })
}

/// Exclusive advisory lock on `<collection>.lock`, held until the returned
/// file is dropped. Serializes writers across handles and processes.
async fn lock_collection(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let lock_path = path.with_extension("lock");

    let file = tokio::task::spawn_blocking(move || -> std::io::Result<std::fs::File> {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;
        file.lock()?;
        Ok(file)
    })
    .await
    .map_err(|e| StoryError::Store(format!("Lock task failed: {}", e)))?;

    file.map_err(|e| StoryError::Store(format!("Failed to lock {}: {}", path.display(), e)))
}

/// Write to a temp file in the same directory, then rename into place
async fn write_documents(path: &Path, documents: &Documents) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let contents = serde_json::to_string_pretty(documents)?;
    let tmp_name = format!(
        "{}.storyset-tmp-{}",
        path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("collection.json"),
        Uuid::new_v4().simple()
    );
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, contents).await?;
    fs::rename(&tmp_path, path).await?;
    Ok(())
}

fn to_snapshot(documents: Documents) -> Vec<Entry> {
    let mut entries: Vec<Entry> = documents
        .into_iter()
        .map(|(id, doc)| Entry {
            id,
            grade: doc.grade,
            sentence: doc.related,
            image_data: doc.image_url,
            created_at: doc.created_at,
            author_id: doc.author_id,
        })
        .collect();
    sort_newest_first(&mut entries);
    entries
}

struct WatchState {
    path: PathBuf,
    closed: Arc<AtomicBool>,
    period: Duration,
    ticker: Option<Interval>,
    last: Option<Vec<Entry>>,
    failing: bool,
}

impl WatchState {
    async fn tick(&mut self) {
        let period = self.period;
        let ticker = self.ticker.get_or_insert_with(|| {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker
        });
        ticker.tick().await;
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn add(&self, collection: &CollectionPath, record: EntryRecord) -> Result<EntryId> {
        self.check_open()?;
        let _guard = self.write_lock.lock().await;

        let path = self.collection_file(collection);
        let _lock = lock_collection(&path).await?;
        let mut documents = read_documents(&path).await?;

        let now = Utc::now();
        let created_at = match documents.values().map(|doc| doc.created_at).max() {
            Some(latest) if now <= latest => latest + chrono::Duration::microseconds(1),
            _ => now,
        };

        let id = EntryId::new(Uuid::new_v4().simple().to_string());
        documents.insert(
            id.clone(),
            StoredDocument {
                grade: record.grade,
                related: record.sentence,
                image_url: record.image_data,
                created_at,
                author_id: record.author_id,
            },
        );

        write_documents(&path, &documents)
            .await
            .map_err(|e| StoryError::Store(format!("Failed to write {}: {}", path.display(), e)))?;

        debug!(collection = %collection, id = %id, "added document");
        Ok(id)
    }

    async fn delete(&self, collection: &CollectionPath, id: &EntryId) -> Result<()> {
        self.check_open()?;
        let _guard = self.write_lock.lock().await;

        let path = self.collection_file(collection);
        let _lock = lock_collection(&path).await?;
        let mut documents = read_documents(&path).await?;
        if documents.remove(id).is_none() {
            debug!(collection = %collection, id = %id, "delete of missing document ignored");
            return Ok(());
        }

        write_documents(&path, &documents)
            .await
            .map_err(|e| StoryError::Store(format!("Failed to write {}: {}", path.display(), e)))?;

        debug!(collection = %collection, id = %id, "deleted document");
        Ok(())
    }

    fn watch(&self, collection: &CollectionPath) -> SnapshotStream {
        let state = WatchState {
            path: self.collection_file(collection),
            closed: Arc::clone(&self.closed),
            period: self.poll_interval,
            ticker: None,
            last: None,
            failing: false,
        };

        stream::unfold(state, |mut state| async move {
            loop {
                if state.closed.load(Ordering::SeqCst) {
                    return None;
                }
                state.tick().await;
                if state.closed.load(Ordering::SeqCst) {
                    return None;
                }

                match read_documents(&state.path).await {
                    Ok(documents) => {
                        let snapshot = to_snapshot(documents);
                        if state.failing || state.last.as_ref() != Some(&snapshot) {
                            state.failing = false;
                            state.last = Some(snapshot.clone());
                            return Some((Ok(snapshot), state));
                        }
                    }
                    Err(e) if !state.failing => {
                        warn!(path = %state.path.display(), error = %e, "collection poll failed");
                        state.failing = true;
                        return Some((Err(e), state));
                    }
                    Err(_) => {}
                }
            }
        })
        .boxed()
    }

    async fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        // Wait out an in-flight write so close never races a rename
        let _guard = self.write_lock.lock().await;
        Ok(())
    }
}
