//! Entry repository over one logical collection

use crate::domain::{EntryDraft, EntryId};
use crate::error::Result;
use crate::infrastructure::store::{self, CollectionPath, DocumentStore, SnapshotStream};
use crate::infrastructure::{auth, Config, Workspace};
use std::sync::Arc;
use tracing::info;

/// Create, remove and subscribe against a single collection of entries
#[derive(Clone)]
pub struct EntryRepository {
    store: Arc<dyn DocumentStore>,
    collection: CollectionPath,
    author_id: Option<String>,
}

impl EntryRepository {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        collection: CollectionPath,
        author_id: Option<String>,
    ) -> Self {
        EntryRepository {
            store,
            collection,
            author_id,
        }
    }

    /// Connect the configured store, resolve the collection path and sign in
    pub async fn connect(config: &Config, workspace: &Workspace) -> Result<Self> {
        let collection =
            CollectionPath::for_collection(&config.collection, config.app_id.as_deref())?;
        let store = store::connect(config, workspace);
        let author_id = auth::author_id(config.auth_token.as_deref()).await;

        info!(collection = %collection, backend = %config.backend, "connected");
        Ok(Self::new(store, collection, author_id))
    }

    pub fn collection_path(&self) -> &CollectionPath {
        &self.collection
    }

    pub fn author_id(&self) -> Option<&str> {
        self.author_id.as_deref()
    }

    /// Validate and persist a draft. The store assigns id and timestamp.
    pub async fn create(&self, draft: EntryDraft) -> Result<EntryId> {
        let record = draft.validate(self.author_id.clone())?;
        self.store.add(&self.collection, record).await
    }

    /// Delete an entry; a missing id is not an error
    pub async fn remove(&self, id: &EntryId) -> Result<()> {
        self.store.delete(&self.collection, id).await
    }

    /// Live snapshots, newest first. Dropping the stream unsubscribes.
    pub fn subscribe(&self) -> SnapshotStream {
        self.store.watch(&self.collection)
    }

    pub async fn close(&self) -> Result<()> {
        self.store.close().await
    }
}
