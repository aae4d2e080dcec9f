//! Submit entry use case

use crate::application::{FormState, Notifier};
use crate::domain::EntryId;
use crate::error::{Result, StoryError};
use crate::infrastructure::EntryRepository;
use std::path::Path;
use tracing::{info, warn};

pub const SAVED_MESSAGE: &str = "Saved successfully!";
pub const SAVE_FAILED_MESSAGE: &str = "Save failed.";
const IN_PROGRESS_MESSAGE: &str = "A submission is already in progress.";

/// Service for attaching images and persisting the form's draft
pub struct SubmitEntryService {
    repository: EntryRepository,
    notifier: Notifier,
}

impl SubmitEntryService {
    pub fn new(repository: EntryRepository, notifier: Notifier) -> Self {
        SubmitEntryService {
            repository,
            notifier,
        }
    }

    /// Load an image into the form, surfacing rejections as notifications
    pub async fn attach_image(&self, form: &mut FormState, path: &Path) -> Result<()> {
        let result = form.set_image(path).await;
        if let Err(e) = &result {
            self.notifier.error(notification_text(e));
        }
        result
    }

    /// Persist the draft. On success the form is reset; on failure it is
    /// left as-is so the user can retry.
    pub async fn execute(&self, form: &mut FormState) -> Result<EntryId> {
        if form.is_submitting() {
            return Err(StoryError::Validation(IN_PROGRESS_MESSAGE.to_string()));
        }

        let draft = form.draft();
        let guard = form.begin_submit();
        let result = self.repository.create(draft).await;
        drop(guard);

        match &result {
            Ok(id) => {
                info!(id = %id, grade = %form.grade(), "entry saved");
                self.notifier.success(SAVED_MESSAGE);
                form.reset();
            }
            Err(e @ StoryError::Validation(_)) => {
                self.notifier.error(notification_text(e));
            }
            Err(e) => {
                warn!(error = %e, "save failed");
                self.notifier.error(SAVE_FAILED_MESSAGE);
            }
        }

        result
    }
}

fn notification_text(error: &StoryError) -> String {
    error
        .notification_text()
        .map(str::to_string)
        .unwrap_or_else(|| error.to_string())
}
