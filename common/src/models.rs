use serde::{Deserialize, Serialize};

use crate::PAGE_BREAK;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Comic {
    pub id: String,
    pub title: String,
    pub cover: String,
    /// Informational only, never checked against the chapter table.
    pub chapter_count: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub chapter_id: String,
    pub chapter_title: String,
    pub chapter_url: String,
    #[serde(default)]
    pub page_count: String,
}

impl Chapter {
    /// Splits `chapter_url` on the page-break marker. Blank segments are
    /// dropped before numbering, so indices stay contiguous from 1.
    pub fn pages(&self) -> Vec<Page> {
        self.chapter_url
            .split(PAGE_BREAK)
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .enumerate()
            .map(|(i, url)| Page {
                index: i + 1,
                image_url: url.to_string(),
            })
            .collect()
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub index: usize,
    pub image_url: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DownloadInfo {
    pub comic_id: String,
    /// May contain inline markup; rendered as-is by the client.
    pub text: String,
    pub img_url: String,
}

/// A catalog entry together with its chapter table, in scan order.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct ComicDetails {
    #[serde(flatten)]
    pub comic: Comic,
    pub chapters: Vec<Chapter>,
}
