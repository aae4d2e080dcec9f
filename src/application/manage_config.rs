//! Config management use case

use crate::domain::Grade;
use crate::error::{Result, StoryError};
use crate::infrastructure::store::CollectionPath;
use crate::infrastructure::{Config, StoreBackend, Workspace};
use std::str::FromStr;

const VALID_KEYS: &str = "collection, app_id, auth_token, backend, default_grade, \
    max_image_bytes, notification_secs, poll_interval_ms, created";

/// Service for managing workspace configuration
pub struct ConfigService {
    workspace: Workspace,
}

impl ConfigService {
    pub fn new(workspace: Workspace) -> Self {
        ConfigService { workspace }
    }

    /// Get a single config value as stored in the file. The auth token is
    /// masked.
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.workspace.load_config()?;
        display_value(&config, key)
    }

    /// Set a config value. An empty value clears `app_id` and `auth_token`.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.workspace.load_config()?;

        match key {
            "collection" => {
                CollectionPath::parse(value)?;
                config.collection = value.to_string();
            }
            "app_id" => {
                config.app_id = if value.is_empty() {
                    None
                } else {
                    CollectionPath::validate_app_id(value)?;
                    Some(value.to_string())
                };
            }
            "auth_token" => {
                config.auth_token = (!value.is_empty()).then(|| value.to_string());
            }
            "backend" => {
                let backend = StoreBackend::from_str(value).map_err(StoryError::Config)?;
                if !backend.persists() {
                    return Err(StoryError::Config(format!(
                        "Invalid backend: '{}' does not persist between commands \
                        and can only be selected by library callers",
                        value
                    )));
                }
                config.backend = backend;
            }
            "default_grade" => {
                config.default_grade = Grade::from_str(value).map_err(StoryError::Config)?;
            }
            "max_image_bytes" => config.max_image_bytes = parse_number(key, value)?,
            "notification_secs" => config.notification_secs = parse_number(key, value)?,
            "poll_interval_ms" => config.poll_interval_ms = parse_number(key, value)?,
            "created" => {
                return Err(StoryError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(StoryError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: {}",
                    key, VALID_KEYS
                )));
            }
        }

        self.workspace.save_config(&config)?;
        Ok(())
    }

    /// All keys with their display values, in a stable order
    pub fn list(&self) -> Result<Vec<(&'static str, String)>> {
        let config = self.workspace.load_config()?;
        [
            "collection",
            "app_id",
            "auth_token",
            "backend",
            "default_grade",
            "max_image_bytes",
            "notification_secs",
            "poll_interval_ms",
            "created",
        ]
        .into_iter()
        .map(|key| display_value(&config, key).map(|value| (key, value)))
        .collect()
    }
}

fn display_value(config: &Config, key: &str) -> Result<String> {
    let value = match key {
        "collection" => config.collection.clone(),
        "app_id" => config.app_id.clone().unwrap_or_default(),
        "auth_token" => match config.auth_token {
            Some(_) => "<set>".to_string(),
            None => String::new(),
        },
        "backend" => config.backend.to_string(),
        "default_grade" => config.default_grade.to_string(),
        "max_image_bytes" => config.max_image_bytes.to_string(),
        "notification_secs" => config.notification_secs.to_string(),
        "poll_interval_ms" => config.poll_interval_ms.to_string(),
        "created" => config.created.to_rfc3339(),
        _ => {
            return Err(StoryError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: {}",
                key, VALID_KEYS
            )))
        }
    };
    Ok(value)
}

fn parse_number(key: &str, value: &str) -> Result<u64> {
    value.parse().map_err(|_| {
        StoryError::Config(format!(
            "Invalid value for '{}': '{}' is not a non-negative integer",
            key, value
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service(temp: &TempDir) -> ConfigService {
        let workspace = Workspace::new(temp.path().to_path_buf());
        workspace.initialize().unwrap();
        workspace.save_config(&Config::new(None)).unwrap();
        ConfigService::new(workspace)
    }

    #[test]
    fn test_get_defaults() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);
        assert_eq!(service.get("collection").unwrap(), "sinhala_story_dataset_simple");
        assert_eq!(service.get("backend").unwrap(), "file");
        assert_eq!(service.get("default_grade").unwrap(), "Grade 1");
        assert_eq!(service.get("app_id").unwrap(), "");
    }

    #[test]
    fn test_set_and_get_round_trip() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        service.set("default_grade", "3").unwrap();
        service.set("app_id", "school-7").unwrap();
        service.set("max_image_bytes", "1024").unwrap();

        assert_eq!(service.get("default_grade").unwrap(), "Grade 3");
        assert_eq!(service.get("app_id").unwrap(), "school-7");
        assert_eq!(service.get("max_image_bytes").unwrap(), "1024");

        service.set("app_id", "").unwrap();
        assert_eq!(service.get("app_id").unwrap(), "");
    }

    #[test]
    fn test_auth_token_is_masked() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);
        service.set("auth_token", "very-secret").unwrap();

        assert_eq!(service.get("auth_token").unwrap(), "<set>");
        let listed = service.list().unwrap();
        assert!(listed.iter().all(|(_, v)| !v.contains("very-secret")));
    }

    #[test]
    fn test_rejects_invalid_values() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        assert!(service.set("default_grade", "Grade 7").is_err());
        assert!(service.set("backend", "cloud").is_err());
        assert!(service.set("backend", "memory").is_err());
        assert_eq!(service.get("backend").unwrap(), "file");
        assert!(service.set("max_image_bytes", "-1").is_err());
        assert!(service.set("collection", "../escape").is_err());
        assert!(service.set("created", "2020-01-01T00:00:00Z").is_err());
        assert!(service.set("colour", "blue").is_err());
        assert!(service.get("colour").is_err());
    }

    #[test]
    fn test_list_is_complete_and_ordered() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);
        let keys: Vec<&str> = service.list().unwrap().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys.first(), Some(&"collection"));
        assert_eq!(keys.last(), Some(&"created"));
        assert_eq!(keys.len(), 9);
    }
}
