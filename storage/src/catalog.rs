use runtu_comic_common::models::Comic;

use crate::table::{parse_positional, PositionalRecord, RowTokenizer, Sentinel};

pub const COMIC_ID: Sentinel = Sentinel {
    header: "comic-id",
    separator: "--------",
};

pub const COMIC_TITLE: Sentinel = Sentinel {
    header: "comic-title",
    separator: "-----------",
};

// id | title | cover | chapter count, extra trailing columns ignored
impl PositionalRecord for Comic {
    const MIN_CELLS: usize = 4;

    fn from_cells(cells: &[&str]) -> Option<Self> {
        let (id, title) = (cells[0], cells[1]);
        if !COMIC_ID.admits_key(id) || !COMIC_TITLE.admits(title) {
            return None;
        }
        Some(Self {
            id: id.to_string(),
            title: title.to_string(),
            cover: cells[2].to_string(),
            chapter_count: cells[3].to_string(),
        })
    }
}

/// Parses the catalog table. Never fails; text without valid rows yields an
/// empty list.
pub fn parse_catalog(text: &str) -> Vec<Comic> {
    let comics = parse_positional(&RowTokenizer::default(), text);
    tracing::debug!("Parsed {} catalog rows", comics.len());
    comics
}
