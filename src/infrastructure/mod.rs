//! Infrastructure layer - Stores, sessions, configuration and disk I/O

pub mod auth;
pub mod config;
pub mod download;
pub mod repository;
pub mod store;
pub mod workspace;

pub use auth::Session;
pub use config::{Config, StoreBackend};
pub use repository::EntryRepository;
pub use store::{CollectionPath, DocumentStore, SnapshotStream};
pub use workspace::Workspace;
