//! In-progress entry form

use crate::domain::image::mime_for_path;
use crate::domain::{EntryDraft, Grade, ImageData};
use crate::error::{Result, StoryError};
use crate::infrastructure::Config;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// One draft being edited, plus its submission status
#[derive(Debug, Clone)]
pub struct FormState {
    grade: Grade,
    sentence: String,
    image: Option<ImageData>,
    default_grade: Grade,
    max_image_bytes: u64,
    submitting: bool,
}

impl FormState {
    pub fn new(default_grade: Grade, max_image_bytes: u64) -> Self {
        FormState {
            grade: default_grade,
            sentence: String::new(),
            image: None,
            default_grade,
            max_image_bytes,
            submitting: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.default_grade, config.max_image_bytes)
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }

    pub fn sentence(&self) -> &str {
        &self.sentence
    }

    pub fn image(&self) -> Option<&ImageData> {
        self.image.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Mark the form as submitting until the returned guard is dropped,
    /// including when the submitting future is cancelled
    pub(crate) fn begin_submit(&mut self) -> SubmitGuard<'_> {
        self.submitting = true;
        SubmitGuard { form: self }
    }

    pub fn set_grade(&mut self, grade: Grade) {
        self.grade = grade;
    }

    pub fn set_sentence(&mut self, sentence: impl Into<String>) {
        self.sentence = sentence.into();
    }

    /// Message shown when a file exceeds the ceiling
    pub fn too_large_message(&self) -> String {
        format!("Image too large! Keep under {}KB.", self.max_image_bytes / 1024)
    }

    /// Load an image file into the form, replacing any previous image.
    ///
    /// The size ceiling is checked against file metadata before reading; on
    /// any failure the current image is left untouched.
    pub async fn set_image(&mut self, path: &Path) -> Result<()> {
        let metadata = fs::metadata(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoryError::Validation(format!("Image not found: {}", path.display()))
            } else {
                StoryError::Io(e)
            }
        })?;

        if !metadata.is_file() {
            return Err(StoryError::Validation(format!(
                "Not an image file: {}",
                path.display()
            )));
        }
        if metadata.len() > self.max_image_bytes {
            return Err(StoryError::Validation(self.too_large_message()));
        }

        let mime = mime_for_path(path).ok_or_else(|| {
            StoryError::Validation(format!("Unsupported image type: {}", path.display()))
        })?;

        let bytes = fs::read(path).await?;
        debug!(path = %path.display(), bytes = bytes.len(), mime, "image attached");
        self.image = Some(ImageData::encode(&bytes, mime));
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn set_image_data_for_test(&mut self, image: ImageData) {
        self.image = Some(image);
    }

    pub fn clear_image(&mut self) {
        self.image = None;
    }

    /// Back to the default grade with no sentence and no image
    pub fn reset(&mut self) {
        self.grade = self.default_grade;
        self.sentence.clear();
        self.image = None;
    }

    /// Snapshot of the current fields as a draft
    pub fn draft(&self) -> EntryDraft {
        EntryDraft::new(self.grade, self.sentence.clone(), self.image.clone())
    }
}

/// Clears the submitting flag on drop
pub(crate) struct SubmitGuard<'a> {
    form: &'a mut FormState,
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.form.submitting = false;
    }
}
