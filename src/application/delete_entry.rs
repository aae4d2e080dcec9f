//! Delete entry use case

use crate::application::Notifier;
use crate::domain::EntryId;
use crate::error::Result;
use crate::infrastructure::EntryRepository;
use tracing::{info, warn};

pub const DELETED_MESSAGE: &str = "Deleted.";
pub const DELETE_FAILED_MESSAGE: &str = "Error deleting.";

/// Service for removing entries once the user has confirmed
pub struct DeleteEntryService {
    repository: EntryRepository,
    notifier: Notifier,
}

impl DeleteEntryService {
    pub fn new(repository: EntryRepository, notifier: Notifier) -> Self {
        DeleteEntryService {
            repository,
            notifier,
        }
    }

    /// Remove an entry. Returns `false` without touching the store when the
    /// user declined.
    pub async fn execute(&self, id: &EntryId, confirmed: bool) -> Result<bool> {
        if !confirmed {
            info!(id = %id, "delete cancelled");
            return Ok(false);
        }

        match self.repository.remove(id).await {
            Ok(()) => {
                info!(id = %id, "entry deleted");
                self.notifier.success(DELETED_MESSAGE);
                Ok(true)
            }
            Err(e) => {
                warn!(id = %id, error = %e, "delete failed");
                self.notifier.error(DELETE_FAILED_MESSAGE);
                Err(e)
            }
        }
    }
}
