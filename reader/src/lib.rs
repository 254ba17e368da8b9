//! Client-side reading state: pagination, view mode, persisted cursor and
//! chapter-to-chapter navigation.

pub mod navigation;
pub mod session;
pub mod store;

pub use navigation::{neighbors, ChapterNeighbors};
pub use session::{ParseViewModeError, ReaderSession, ViewMode};
pub use store::{page_key, JsonFileStore, KeyValueStore, MemoryStore, VIEW_MODE_KEY};
