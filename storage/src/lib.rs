use anyhow::{Context, Result};

use runtu_comic_common::models;
use runtu_comic_common::utils::search;
use std::path::{Path, PathBuf};
use tokio::fs;

pub mod catalog;
pub mod chapters;
pub mod download;
pub mod table;

/// Catalog table; also the document the download metadata is read from.
pub const CATALOG_FILE: &str = "data-info.md";

/// Read-only view over the flat-file tables in `data_dir`. Every call
/// re-reads and re-parses the backing text.
#[derive(Clone, Debug)]
pub struct Storage {
    pub data_dir: PathBuf,
}

impl Storage {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        if !data_dir.is_dir() {
            tracing::warn!("Data directory {} does not exist", data_dir.display());
        }
        Self { data_dir }
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join(CATALOG_FILE)
    }

    /// `<data_dir>/<comic_id>.md`, or `None` for ids that could escape the
    /// data directory.
    pub fn chapter_path(&self, comic_id: &str) -> Option<PathBuf> {
        if comic_id.is_empty()
            || comic_id.starts_with('.')
            || comic_id.contains(|c: char| c == '/' || c == '\\')
        {
            return None;
        }
        Some(self.data_dir.join(format!("{comic_id}.md")))
    }

    async fn read_text(path: &Path) -> Result<String> {
        let bytes = fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(decode_text(&bytes))
    }

    /// The catalog document, unparsed.
    pub async fn read_data_info(&self) -> Result<String> {
        Self::read_text(&self.catalog_path()).await
    }

    pub async fn get_comics(&self) -> Result<Vec<models::Comic>> {
        let text = self.read_data_info().await?;
        Ok(catalog::parse_catalog(&text))
    }

    pub async fn search_comics(&self, keyword: &str) -> Result<Vec<models::Comic>> {
        let comics = self.get_comics().await?;
        Ok(search::filter(comics, keyword))
    }

    /// First catalog row with this id.
    pub async fn get_comic(&self, id: &str) -> Result<Option<models::Comic>> {
        let comics = self.get_comics().await?;
        Ok(comics.into_iter().find(|c| c.id == id))
    }

    /// Chapters of a comic in table order. `None` when the chapter file
    /// cannot be read; callers decide whether that means "no chapters" or
    /// "not found".
    pub async fn list_chapters(&self, comic_id: &str) -> Option<Vec<models::Chapter>> {
        let path = self.chapter_path(comic_id)?;
        match Self::read_text(&path).await {
            Ok(text) => Some(chapters::parse_chapters(&text)),
            Err(e) => {
                tracing::warn!("Chapter table for {} unavailable: {:#}", comic_id, e);
                None
            }
        }
    }

    pub async fn get_comic_details(&self, id: &str) -> Result<Option<models::ComicDetails>> {
        let comic = match self.get_comic(id).await? {
            Some(c) => c,
            None => return Ok(None),
        };

        let chapters = self.list_chapters(id).await.unwrap_or_default();

        Ok(Some(models::ComicDetails { comic, chapters }))
    }

    /// First chapter row with this id in the comic's chapter table.
    pub async fn get_chapter(&self, comic_id: &str, chapter_id: &str) -> Option<models::Chapter> {
        self.list_chapters(comic_id)
            .await?
            .into_iter()
            .find(|c| c.chapter_id == chapter_id)
    }

    pub async fn get_download_info(&self, comic_id: &str) -> Result<Option<models::DownloadInfo>> {
        let text = self.read_data_info().await?;
        Ok(download::find_download_info(&text, comic_id))
    }
}

/// Lossy UTF-8 decoding with any leading byte-order mark removed.
fn decode_text(bytes: &[u8]) -> String {
    let decoded = String::from_utf8_lossy(bytes);
    let text: &str = &decoded;
    text.strip_prefix('\u{feff}').unwrap_or(text).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_order_mark_is_stripped() {
        let text = decode_text(b"\xEF\xBB\xBF|c1|Title A|a.jpg|1|\n");
        assert_eq!(text, "|c1|Title A|a.jpg|1|\n");
        assert_eq!(catalog::parse_catalog(&text).len(), 1);
        assert_eq!(decode_text(b"plain"), "plain");
    }

    #[test]
    fn chapter_path_rejects_escaping_ids() {
        let storage = Storage::new("db");
        assert_eq!(storage.chapter_path("c1"), Some(PathBuf::from("db/c1.md")));
        assert_eq!(storage.chapter_path(""), None);
        assert_eq!(storage.chapter_path(".."), None);
        assert_eq!(storage.chapter_path(".hidden"), None);
        assert_eq!(storage.chapter_path("../etc/passwd"), None);
        assert_eq!(storage.chapter_path("a\\b"), None);
    }
}
