//! Local mirror of the remote collection

use crate::domain::Entry;
use crate::error::Result;
use crate::infrastructure::SnapshotStream;
use futures::StreamExt;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// What a reader of the live list sees
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveListState {
    pub entries: Vec<Entry>,
    /// True until the first snapshot or failure arrives
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for LiveListState {
    fn default() -> Self {
        LiveListState {
            entries: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

impl LiveListState {
    /// Replace the list wholesale on success; on failure keep the stale list
    pub fn apply(&mut self, update: Result<Vec<Entry>>) {
        self.loading = false;
        match update {
            Ok(entries) => {
                self.entries = entries;
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}

/// A subscription task feeding a read-only list.
///
/// Only the task writes; readers get clones. Dropping the list (or calling
/// [`LiveList::unsubscribe`]) cancels the subscription.
pub struct LiveList {
    rx: watch::Receiver<LiveListState>,
    task: JoinHandle<()>,
}

impl LiveList {
    /// Spawn a task that applies every snapshot from the stream
    pub fn follow(mut snapshots: SnapshotStream) -> Self {
        let (tx, rx) = watch::channel(LiveListState::default());

        let task = tokio::spawn(async move {
            while let Some(update) = snapshots.next().await {
                match &update {
                    Ok(entries) => debug!(count = entries.len(), "live list updated"),
                    Err(e) => warn!(error = %e, "live list subscription failed"),
                }
                tx.send_modify(|state| state.apply(update));
            }
            debug!("live list subscription ended");
        });

        LiveList { rx, task }
    }

    pub fn state(&self) -> LiveListState {
        self.rx.borrow().clone()
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.rx.borrow().entries.clone()
    }

    /// Wait for the next update. `None` once the subscription has ended.
    pub async fn changed(&mut self) -> Option<LiveListState> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// Wait until the first snapshot (or failure) has been applied
    pub async fn ready(&mut self) -> LiveListState {
        if let Ok(state) = self.rx.wait_for(|state| !state.loading).await {
            return state.clone();
        }
        self.rx.borrow().clone()
    }

    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for LiveList {
    fn drop(&mut self) {
        self.task.abort();
    }
}
