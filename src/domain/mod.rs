//! Domain layer - Entries, grades, images and export projections

pub mod entry;
pub mod export;
pub mod grade;
pub mod image;
pub mod notification;

pub use entry::{Entry, EntryDraft, EntryId, EntryRecord};
pub use export::ExportFormat;
pub use grade::Grade;
pub use image::ImageData;
pub use notification::{Notification, NotificationKind};
