// Re-export models
pub use crate::models::*;

pub mod models;
pub mod utils;

/// Marker that separates page image URLs inside a chapter's `chapterUrl` cell.
pub const PAGE_BREAK: &str = "<br>";
