//! In-process document store

use super::{CollectionPath, DocumentStore, SnapshotStream, CLOSED_MESSAGE};
use crate::domain::entry::sort_newest_first;
use crate::domain::{Entry, EntryId, EntryRecord};
use crate::error::{Result, StoryError};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

const OFFLINE_MESSAGE: &str = "network unavailable";

struct Collection {
    entries: Vec<Entry>,
    tx: watch::Sender<Vec<Entry>>,
}

impl Collection {
    fn new() -> Self {
        let (tx, _) = watch::channel(Vec::new());
        Collection {
            entries: Vec::new(),
            tx,
        }
    }

    fn publish(&self) {
        self.tx.send_replace(self.entries.clone());
    }
}

#[derive(Default)]
struct State {
    collections: HashMap<CollectionPath, Collection>,
    last_created: Option<DateTime<Utc>>,
}

/// Document store kept entirely in memory.
///
/// Creation timestamps are strictly increasing within one store. Watches are
/// driven by a `watch` channel per collection, so a slow reader only ever
/// sees the latest snapshot.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    closed: AtomicBool,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a transport outage: writes and new watches fail until cleared
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_available(&self) -> Result<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(StoryError::Store(CLOSED_MESSAGE.to_string()));
        }
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoryError::Store(OFFLINE_MESSAGE.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn add(&self, collection: &CollectionPath, record: EntryRecord) -> Result<EntryId> {
        self.check_available()?;

        let mut state = self.state();
        let now = Utc::now();
        let created_at = match state.last_created {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        state.last_created = Some(created_at);

        let id = EntryId::new(Uuid::new_v4().simple().to_string());
        let coll = state
            .collections
            .entry(collection.clone())
            .or_insert_with(Collection::new);
        coll.entries.push(record.into_entry(id.clone(), created_at));
        sort_newest_first(&mut coll.entries);
        coll.publish();

        debug!(collection = %collection, id = %id, "added document");
        Ok(id)
    }

    async fn delete(&self, collection: &CollectionPath, id: &EntryId) -> Result<()> {
        self.check_available()?;

        let mut state = self.state();
        let Some(coll) = state.collections.get_mut(collection) else {
            return Ok(());
        };
        let before = coll.entries.len();
        coll.entries.retain(|entry| &entry.id != id);
        if coll.entries.len() != before {
            coll.publish();
            debug!(collection = %collection, id = %id, "deleted document");
        }
        Ok(())
    }

    fn watch(&self, collection: &CollectionPath) -> SnapshotStream {
        if let Err(e) = self.check_available() {
            return stream::once(async move { Err(e) }).boxed();
        }

        let rx = self
            .state()
            .collections
            .entry(collection.clone())
            .or_insert_with(Collection::new)
            .tx
            .subscribe();

        stream::unfold((rx, true), |(mut rx, first)| async move {
            if !first && rx.changed().await.is_err() {
                return None;
            }
            let snapshot = rx.borrow_and_update().clone();
            Some((Ok(snapshot), (rx, false)))
        })
        .boxed()
    }

    async fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        // Dropping the senders ends every open watch
        self.state().collections.clear();
        Ok(())
    }
}
