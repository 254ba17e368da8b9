//! Download metadata lookup over the catalog document.
//!
//! Unlike the catalog and chapter readers this one binds columns by header
//! name. The header sits on a fixed line and the body starts a fixed number
//! of lines later (the gap holds the markdown separator row).
//!
//! Keys are compared against the row's non-empty cells, but values are read
//! from the unfiltered cells at `position + 1`. The extra one skips the empty
//! cell in front of the leading delimiter. The two indexings only agree while
//! no cell before a value column is empty; this mirrors how the document has
//! always been read and is kept as-is.

use runtu_comic_common::models::DownloadInfo;

use crate::table::RowTokenizer;

pub const HEADER_LINE: usize = 1;
pub const BODY_START: usize = 3;

pub const COMIC_ID_COLUMN: &str = "comic-id";
pub const TEXT_COLUMN: &str = "download-link-text";
pub const IMG_COLUMN: &str = "download-link-img";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    comic_id: usize,
    text: usize,
    img: usize,
}

impl Columns {
    fn locate(header: &[&str]) -> Option<Self> {
        let position = |name: &str| header.iter().position(|cell| *cell == name);
        Some(Self {
            comic_id: position(COMIC_ID_COLUMN)?,
            text: position(TEXT_COLUMN)?,
            img: position(IMG_COLUMN)?,
        })
    }
}

/// Resolves the download metadata of `comic_id`. Returns the first matching
/// body row; `None` when the id is absent or a required column is missing.
pub fn find_download_info(text: &str, comic_id: &str) -> Option<DownloadInfo> {
    let tokenizer = RowTokenizer::default();
    let lines: Vec<&str> = text.lines().collect();

    let header = tokenizer.split_filtered(lines.get(HEADER_LINE)?);
    let Some(columns) = Columns::locate(&header) else {
        tracing::warn!(
            "Download info header is missing a required column (need {}, {}, {}), got {:?}",
            COMIC_ID_COLUMN,
            TEXT_COLUMN,
            IMG_COLUMN,
            header
        );
        return None;
    };

    lines
        .iter()
        .skip(BODY_START)
        .filter(|line| !line.trim().is_empty() && line.starts_with(tokenizer.delimiter()))
        .find_map(|line| {
            let raw = tokenizer.split_raw(line);
            let filtered: Vec<&str> = raw.iter().copied().filter(|c| !c.is_empty()).collect();
            if filtered.get(columns.comic_id).copied() != Some(comic_id) {
                return None;
            }

            let value = |position: usize| raw.get(position + 1).copied().unwrap_or_default();
            Some(DownloadInfo {
                comic_id: comic_id.to_string(),
                text: value(columns.text).to_string(),
                img_url: value(columns.img).to_string(),
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DOC: &str = "\
# Catalog
| comic-id | comic-title | comic-cover | chapter-count | download-link-text | download-link-img |
|--------|-----------|----|----|----|----|
| c1 | Title A | a.jpg | 3 | Get <b>it</b> | qr1.png |
| c2 | Title B | b.jpg | 1 | Other | qr2.png |
| c1 | Title A again | a2.jpg | 3 | Later | late.png |
";

    #[test]
    fn finds_first_matching_row() {
        assert_eq!(
            find_download_info(DOC, "c1"),
            Some(DownloadInfo {
                comic_id: "c1".to_string(),
                text: "Get <b>it</b>".to_string(),
                img_url: "qr1.png".to_string(),
            })
        );
        assert_eq!(find_download_info(DOC, "c2").unwrap().img_url, "qr2.png");
    }

    #[test]
    fn absent_id_is_none() {
        assert_eq!(find_download_info(DOC, "c404"), None);
    }

    #[test]
    fn columns_are_found_by_name() {
        let doc = "\
title
| download-link-img | comic-id | download-link-text |
|---|---|---|
| qr.png | c7 | hello |
";
        let info = find_download_info(doc, "c7").unwrap();
        assert_eq!(info.text, "hello");
        assert_eq!(info.img_url, "qr.png");
    }

    #[test]
    fn missing_required_column_aborts() {
        let doc = "\
title
| comic-id | download-link-text |
|---|---|
| c1 | hello |
";
        assert_eq!(find_download_info(doc, "c1"), None);
    }

    #[test]
    fn too_short_document_is_none() {
        assert_eq!(find_download_info("", "c1"), None);
        assert_eq!(find_download_info("only one line", "c1"), None);
    }

    #[test]
    fn lines_before_body_start_are_never_matched() {
        let doc = "\
| comic-id | download-link-text | download-link-img |
| comic-id | download-link-text | download-link-img |
| c1 | in the gap | gap.png |
";
        assert_eq!(find_download_info(doc, "c1"), None);
    }

    #[test]
    fn indented_body_rows_are_ignored() {
        let doc = "\
x
| comic-id | download-link-text | download-link-img |
|---|---|---|
  | c1 | indented | i.png |
| c1 | flush | f.png |
";
        assert_eq!(find_download_info(doc, "c1").unwrap().text, "flush");
    }

    #[test]
    fn empty_value_cells_read_as_empty_strings() {
        let doc = "\
x
| comic-id | download-link-text | download-link-img |
|---|---|---|
| c1 | | |
";
        let info = find_download_info(doc, "c1").unwrap();
        assert_eq!(info.text, "");
        assert_eq!(info.img_url, "");
    }

    #[test]
    fn empty_leading_cell_shifts_key_but_not_values() {
        // key match uses filtered cells, value reads use raw ones
        let doc = "\
x
| download-link-text | comic-id | download-link-img |
|---|---|---|
| | c1 | img.png |
";
        assert_eq!(find_download_info(doc, "c1"), None);
        let info = find_download_info(doc, "img.png").unwrap();
        assert_eq!(info.text, "");
        assert_eq!(info.img_url, "img.png");
    }
}
