//! Error types for storyset

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for storyset
#[derive(Debug, Error)]
pub enum StoryError {
    #[error("Not a storyset directory: {0}")]
    NotStorysetDirectory(PathBuf),

    /// Missing or malformed user input; recovered locally, never retried.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Transport or permission failure reported by the document store.
    #[error("Store error: {0}")]
    Store(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl StoryError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            StoryError::NotStorysetDirectory(_) => 2,
            StoryError::Validation(_) => 3,
            StoryError::Store(_) => 4,
            _ => 1,
        }
    }

    /// Short user-facing text for a transient notification, if this error
    /// should be shown as one.
    pub fn notification_text(&self) -> Option<&str> {
        match self {
            StoryError::Validation(msg) => Some(msg),
            _ => None,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            StoryError::NotStorysetDirectory(path) => {
                format!(
                    "Not a storyset directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'storyset init' in this directory to create a new workspace\n\
                    • Navigate to an existing storyset directory\n\
                    • Set STORYSET_ROOT environment variable to your workspace path",
                    path.display()
                )
            }
            StoryError::Validation(msg) if msg.contains("too large") => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Resize or re-encode the image before uploading\n\
                    • Check the ceiling with: storyset config max_image_bytes",
                    msg
                )
            }
            StoryError::Store(msg) => {
                format!(
                    "Store error: {}\n\n\
                    Suggestions:\n\
                    • Nothing was retried; run the command again\n\
                    • Check the backend with: storyset config backend\n\
                    • Run with RUST_LOG=debug for store details",
                    msg
                )
            }
            StoryError::Config(msg) => {
                if msg.contains("Invalid grade") {
                    format!(
                        "{}\n\n\
                        Valid grades: Grade 1, Grade 2, Grade 3, Grade 4, Grade 5\n\
                        Example: storyset add --grade 2 --image photo.png --sentence '...'",
                        msg
                    )
                } else if msg.contains("Invalid backend") {
                    format!(
                        "{}\n\n\
                        Valid backends: file (memory is for library use only)\n\
                        Example: storyset config backend file",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            StoryError::TomlDeserialize(e) => {
                format!(
                    "Failed to parse .storyset/config.toml: {}\n\n\
                    Suggestions:\n\
                    • Fix the file by hand; missing keys fall back to their defaults",
                    e
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using StoryError
pub type Result<T> = std::result::Result<T, StoryError>;
