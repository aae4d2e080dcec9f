//! Application layer - Use cases and orchestration

pub mod collector;
pub mod delete_entry;
pub mod export_entries;
pub mod form;
pub mod init;
pub mod live_list;
pub mod manage_config;
pub mod notifier;
pub mod submit_entry;

pub use collector::Collector;
pub use delete_entry::DeleteEntryService;
pub use export_entries::ExportService;
pub use form::FormState;
pub use live_list::{LiveList, LiveListState};
pub use manage_config::ConfigService;
pub use notifier::Notifier;
pub use submit_entry::SubmitEntryService;
