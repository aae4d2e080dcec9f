//! Entries and drafts

use crate::domain::{Grade, ImageData};
use crate::error::{Result, StoryError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

pub const MISSING_IMAGE_MESSAGE: &str = "Please upload an image.";
pub const MISSING_SENTENCE_MESSAGE: &str = "Please write a sentence.";

/// Opaque, store-assigned entry identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        EntryId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One persisted image + sentence + grade record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: EntryId,
    pub grade: Grade,
    #[serde(rename = "related")]
    pub sentence: String,
    #[serde(rename = "imageUrl")]
    pub image_data: ImageData,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub author_id: Option<String>,
}

/// Fields of an entry that passed validation, before the store assigns
/// an id and a creation timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRecord {
    pub grade: Grade,
    pub sentence: String,
    pub image_data: ImageData,
    pub author_id: Option<String>,
}

impl EntryRecord {
    /// Materialize the record once the store has assigned identity and time
    pub fn into_entry(self, id: EntryId, created_at: DateTime<Utc>) -> Entry {
        Entry {
            id,
            grade: self.grade,
            sentence: self.sentence,
            image_data: self.image_data,
            created_at,
            author_id: self.author_id,
        }
    }
}

/// An in-progress entry that has not been persisted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryDraft {
    pub grade: Grade,
    pub sentence: String,
    pub image_data: Option<ImageData>,
}

impl EntryDraft {
    pub fn new(grade: Grade, sentence: impl Into<String>, image_data: Option<ImageData>) -> Self {
        EntryDraft {
            grade,
            sentence: sentence.into(),
            image_data,
        }
    }

    /// Presence check: the image is checked before the sentence.
    pub fn validate(self, author_id: Option<String>) -> Result<EntryRecord> {
        let image_data = match self.image_data {
            Some(image) if !image.is_empty() => image,
            _ => return Err(StoryError::Validation(MISSING_IMAGE_MESSAGE.to_string())),
        };

        if self.sentence.trim().is_empty() {
            return Err(StoryError::Validation(MISSING_SENTENCE_MESSAGE.to_string()));
        }

        Ok(EntryRecord {
            grade: self.grade,
            sentence: self.sentence,
            image_data,
            author_id,
        })
    }
}

/// Newest first; equal timestamps fall back to ascending id
pub fn newest_first(a: &Entry, b: &Entry) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| a.id.cmp(&b.id))
}

/// Sort entries in live-list order
pub fn sort_newest_first(entries: &mut [Entry]) {
    entries.sort_by(newest_first);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(id: &str, secs: i64) -> Entry {
        Entry {
            id: EntryId::new(id),
            grade: Grade::Grade1,
            sentence: format!("sentence {}", id),
            image_data: ImageData::encode(b"img", "image/png"),
            created_at: Utc.timestamp_opt(secs, 0).unwrap(),
            author_id: None,
        }
    }

    #[test]
    fn test_validate_requires_image_first() {
        let draft = EntryDraft::new(Grade::Grade1, "", None);
        match draft.validate(None).unwrap_err() {
            StoryError::Validation(msg) => assert_eq!(msg, MISSING_IMAGE_MESSAGE),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_blank_sentence() {
        let image = ImageData::encode(b"img", "image/png");
        let draft = EntryDraft::new(Grade::Grade3, "   \n", Some(image));
        match draft.validate(None).unwrap_err() {
            StoryError::Validation(msg) => assert_eq!(msg, MISSING_SENTENCE_MESSAGE),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_empty_image_payload() {
        let draft = EntryDraft::new(Grade::Grade1, "text", Some(ImageData::from_data_url("")));
        assert!(matches!(
            draft.validate(None),
            Err(StoryError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_keeps_fields() {
        let image = ImageData::encode(b"img", "image/png");
        let draft = EntryDraft::new(Grade::Grade2, "ළමයි සෙල්ලම් කරනවා.", Some(image.clone()));
        let record = draft.validate(Some("anon-1".to_string())).unwrap();
        assert_eq!(record.grade, Grade::Grade2);
        assert_eq!(record.sentence, "ළමයි සෙල්ලම් කරනවා.");
        assert_eq!(record.image_data, image);
        assert_eq!(record.author_id.as_deref(), Some("anon-1"));
    }

    #[test]
    fn test_sort_newest_first_with_id_tiebreak() {
        let mut entries = vec![entry("b", 10), entry("c", 30), entry("a", 10), entry("d", 20)];
        sort_newest_first(&mut entries);
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "d", "a", "b"]);
    }

    #[test]
    fn test_entry_wire_names() {
        let json = serde_json::to_value(entry("x1", 0)).unwrap();
        assert_eq!(json["related"], "sentence x1");
        assert!(json["imageUrl"].as_str().unwrap().starts_with("data:image/png"));
        assert!(json.get("createdAt").is_some());
        assert!(json["authorId"].is_null());
        assert_eq!(json["grade"], "Grade 1");
    }
}
