use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::{Path, PathBuf};

/// Global key holding the last chosen view mode.
pub const VIEW_MODE_KEY: &str = "viewMode";

/// Key holding the page cursor of one chapter.
pub fn page_key(comic_id: &str, chapter_id: &str) -> String {
    format!("currentPage_{comic_id}_{chapter_id}")
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// Fire-and-forget: implementations log failures instead of returning them.
    fn set(&mut self, key: &str, value: &str);
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        (**self).set(key, value)
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// Keeps entries in a flat JSON object on disk. The whole file is rewritten
/// on every `set`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Loads `path` if it exists. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed state file {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!("Failed to read state file {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, json)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush() {
            tracing::warn!("Failed to persist {} to {}: {}", key, self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("runtu-comic-{}", uuid::Uuid::new_v4()))
            .join("state.json")
    }

    #[test]
    fn page_keys_are_scoped_per_chapter() {
        assert_eq!(page_key("c1", "ch1"), "currentPage_c1_ch1");
        assert_ne!(page_key("c1", "ch1"), page_key("c1", "ch2"));
    }

    #[test]
    fn memory_store_last_write_wins() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k"), None);
        store.set("k", "1");
        store.set("k", "2");
        assert_eq!(store.get("k").as_deref(), Some("2"));
    }

    #[test]
    fn json_store_survives_reopen() {
        let path = temp_path();

        let mut store = JsonFileStore::open(&path);
        store.set(VIEW_MODE_KEY, "double");
        store.set(&page_key("c1", "ch1"), "4");

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get(VIEW_MODE_KEY).as_deref(), Some("double"));
        assert_eq!(reopened.get(&page_key("c1", "ch1")).as_deref(), Some("4"));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn malformed_state_file_starts_empty() {
        let path = temp_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json").unwrap();

        let store = JsonFileStore::open(&path);
        assert_eq!(store.get(VIEW_MODE_KEY), None);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn borrowed_store_writes_through() {
        fn write<S: KeyValueStore>(mut store: S) {
            store.set("k", "v");
        }

        let mut store = MemoryStore::new();
        write(&mut store);
        assert_eq!(store.get("k").as_deref(), Some("v"));
    }
}
