use runtu_comic_common::models::Chapter;

use crate::table::{parse_positional, PositionalRecord, RowTokenizer, Sentinel};

pub const CHAPTER_ID: Sentinel = Sentinel {
    header: "chapter-id",
    separator: "--------",
};

pub const CHAPTER_TITLE: Sentinel = Sentinel {
    header: "chapter-title",
    separator: "-----------",
};

// comic id | chapter id | title | page urls | page count (optional)
impl PositionalRecord for Chapter {
    const MIN_CELLS: usize = 4;

    fn from_cells(cells: &[&str]) -> Option<Self> {
        let (chapter_id, chapter_title) = (cells[1], cells[2]);
        if !CHAPTER_ID.admits_key(chapter_id) || !CHAPTER_TITLE.admits(chapter_title) {
            return None;
        }
        Some(Self {
            chapter_id: chapter_id.to_string(),
            chapter_title: chapter_title.to_string(),
            chapter_url: cells[3].to_string(),
            page_count: cells.get(4).copied().unwrap_or_default().to_string(),
        })
    }
}

/// Parses one comic's chapter table, keeping source order as reading order.
pub fn parse_chapters(text: &str) -> Vec<Chapter> {
    let chapters = parse_positional(&RowTokenizer::default(), text);
    tracing::debug!("Parsed {} chapter rows", chapters.len());
    chapters
}
