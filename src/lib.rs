//! storyset - Image + sentence dataset collector
//!
//! Collects images paired with a sentence and a grade
//! level into a document store, mirrors the collection live, and exports it
//! as JSON training data or CSV.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::StoryError;
