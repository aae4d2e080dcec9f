//! JSON and CSV projections of the entry list

use crate::domain::{Entry, Grade};
use crate::error::{Result, StoryError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const IMAGE_CONTEXT: &str = "Image provided separately";

const CSV_HEADERS: [&str; 4] = ["ID", "Grade", "Sentence", "Image_Base64"];
const CSV_IMAGE_PREVIEW_CHARS: usize = 50;

/// Supported export artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn filename(&self) -> &'static str {
        match self {
            ExportFormat::Json => "sinhala_sentence_training.json",
            ExportFormat::Csv => "dataset_simple.csv",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
        }
    }

    /// Render entries in this format
    pub fn render(&self, entries: &[Entry]) -> Result<String> {
        match self {
            ExportFormat::Json => to_json(entries),
            ExportFormat::Csv => Ok(to_csv(entries)),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = StoryError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(StoryError::Config(format!(
                "Invalid export format: '{}'. Valid formats are: json, csv",
                s
            ))),
        }
    }
}

/// One training example in the JSON export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub input: TrainingInput,
    pub output: TrainingOutput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingInput {
    pub image_context: String,
    pub grade_level: Grade,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingOutput {
    pub sentence: String,
}

impl From<&Entry> for TrainingExample {
    fn from(entry: &Entry) -> Self {
        TrainingExample {
            input: TrainingInput {
                image_context: IMAGE_CONTEXT.to_string(),
                grade_level: entry.grade,
            },
            output: TrainingOutput {
                sentence: entry.sentence.clone(),
            },
        }
    }
}

/// Pretty-printed (two-space indent) array of training examples, in list order
pub fn to_json(entries: &[Entry]) -> Result<String> {
    let examples: Vec<TrainingExample> = entries.iter().map(TrainingExample::from).collect();
    Ok(serde_json::to_string_pretty(&examples)?)
}

/// Four-column CSV with a header row.
///
/// Sentence and image cells are wrapped in double quotes but their contents
/// are not escaped, so a sentence containing `"` or `,` yields a malformed row.
pub fn to_csv(entries: &[Entry]) -> String {
    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(CSV_HEADERS.join(","));

    for entry in entries {
        lines.push(
            [
                entry.id.to_string(),
                entry.grade.to_string(),
                format!("\"{}\"", entry.sentence),
                format!("\"{}\"", entry.image_data.preview(CSV_IMAGE_PREVIEW_CHARS)),
            ]
            .join(","),
        );
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntryId, ImageData};
    use chrono::{TimeZone, Utc};

    fn entry(id: &str, grade: Grade, sentence: &str, image: ImageData) -> Entry {
        Entry {
            id: EntryId::new(id),
            grade,
            sentence: sentence.to_string(),
            image_data: image,
            created_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            author_id: None,
        }
    }

    #[test]
    fn test_json_shape_and_key_order() {
        let entries = vec![entry(
            "a1",
            Grade::Grade2,
            "ළමයි සෙල්ලම් කරනවා.",
            ImageData::encode(b"png", "image/png"),
        )];
        let json = to_json(&entries).unwrap();

        let expected = "[\n  {\n    \"input\": {\n      \"image_context\": \"Image provided separately\",\n      \"grade_level\": \"Grade 2\"\n    },\n    \"output\": {\n      \"sentence\": \"ළමයි සෙල්ලම් කරනවා.\"\n    }\n  }\n]";
        assert_eq!(json, expected);
    }

    #[test]
    fn test_json_round_trip_preserves_order() {
        let image = ImageData::encode(b"x", "image/png");
        let entries = vec![
            entry("a", Grade::Grade1, "first", image.clone()),
            entry("b", Grade::Grade4, "second", image.clone()),
            entry("c", Grade::Grade5, "third", image),
        ];
        let parsed: Vec<TrainingExample> = serde_json::from_str(&to_json(&entries).unwrap()).unwrap();
        assert_eq!(parsed.len(), entries.len());
        for (example, entry) in parsed.iter().zip(&entries) {
            assert_eq!(example.output.sentence, entry.sentence);
            assert_eq!(example.input.grade_level, entry.grade);
        }
    }

    #[test]
    fn test_json_empty_list() {
        assert_eq!(to_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_csv_rows() {
        let image = ImageData::encode(&[1u8; 120], "image/png");
        let entries = vec![entry("id1", Grade::Grade3, "hello there", image.clone())];
        let csv = to_csv(&entries);
        let lines: Vec<&str> = csv.split('\n').collect();
        assert_eq!(lines[0], "ID,Grade,Sentence,Image_Base64");
        assert_eq!(
            lines[1],
            format!("id1,Grade 3,\"hello there\",\"{}\"", image.preview(50))
        );
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_csv_missing_image_placeholder() {
        let entries = vec![entry("z", Grade::Grade1, "s", ImageData::from_data_url(""))];
        assert!(to_csv(&entries).ends_with("\"No Image\""));
    }

    #[test]
    fn test_csv_does_not_escape_quotes_or_commas() {
        let image = ImageData::encode(b"x", "image/png");
        let entries = vec![entry("q", Grade::Grade1, "he said \"hi\", then left", image)];
        let csv = to_csv(&entries);
        assert!(csv.contains("\"he said \"hi\", then left\""));
    }

    #[test]
    fn test_csv_header_only_when_empty() {
        assert_eq!(to_csv(&[]), "ID,Grade,Sentence,Image_Base64");
    }

    #[test]
    fn test_format_metadata() {
        assert_eq!(ExportFormat::Json.filename(), "sinhala_sentence_training.json");
        assert_eq!(ExportFormat::Json.mime_type(), "application/json");
        assert_eq!(ExportFormat::Csv.filename(), "dataset_simple.csv");
        assert_eq!(ExportFormat::Csv.mime_type(), "text/csv");
        assert_eq!(ExportFormat::from_str("CSV").unwrap(), ExportFormat::Csv);
        assert!(ExportFormat::from_str("xml").is_err());
    }
}
