use std::fmt;
use std::str::FromStr;

use runtu_comic_common::models::{Chapter, Page};
use serde::{Deserialize, Serialize};

use crate::store::{page_key, KeyValueStore, VIEW_MODE_KEY};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Single,
    Double,
    All,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Single => "single",
            ViewMode::Double => "double",
            ViewMode::All => "all",
        }
    }

    /// Pages moved by one next/prev action.
    pub fn step(&self) -> usize {
        match self {
            ViewMode::Double => 2,
            ViewMode::Single | ViewMode::All => 1,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseViewModeError(pub String);

impl fmt::Display for ParseViewModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown view mode '{}' (expected single, double or all)", self.0)
    }
}

impl std::error::Error for ParseViewModeError {}

impl FromStr for ViewMode {
    type Err = ParseViewModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "single" => Ok(ViewMode::Single),
            "double" => Ok(ViewMode::Double),
            "all" => Ok(ViewMode::All),
            other => Err(ParseViewModeError(other.to_string())),
        }
    }
}

/// Reads a persisted cursor. The whole value must be numeric and within
/// `1..=total`; a fractional page resumes at its integer part.
fn resume_page(saved: &str, total: usize) -> Option<usize> {
    let value: f64 = saved.trim().parse().ok()?;
    if !(value > 0.0 && value <= total as f64) {
        return None;
    }
    Some(value.trunc() as usize).filter(|page| *page >= 1)
}

/// Pagination state for one (comic, chapter) pair.
///
/// The view mode is read when the session is created; the page cursor is
/// read on every chapter load. Every accepted page change writes the cursor
/// back under the chapter's key and every view mode change writes the global
/// view mode key.
///
/// Invariant: once a chapter with pages is loaded, `current_page` is within
/// `1..=total_pages()`.
#[derive(Debug)]
pub struct ReaderSession<S> {
    store: S,
    comic_id: String,
    chapter_id: String,
    view_mode: ViewMode,
    pages: Vec<Page>,
    current_page: usize,
    aspect_checked: bool,
}

impl<S: KeyValueStore> ReaderSession<S> {
    pub fn new(store: S, comic_id: impl Into<String>, chapter_id: impl Into<String>) -> Self {
        let comic_id = comic_id.into();
        let chapter_id = chapter_id.into();

        let view_mode = store
            .get(VIEW_MODE_KEY)
            .and_then(|mode| mode.parse().ok())
            .unwrap_or_default();

        Self {
            store,
            comic_id,
            chapter_id,
            view_mode,
            pages: Vec::new(),
            current_page: 1,
            aspect_checked: false,
        }
    }

    /// Replaces the page list with `chapter`'s pages and resumes at the
    /// persisted page when it is still in range, otherwise at page 1.
    /// A chapter other than the session's own is ignored.
    pub fn load_chapter(&mut self, chapter: &Chapter) -> bool {
        if chapter.chapter_id != self.chapter_id {
            tracing::warn!(
                "Ignoring chapter {} in the reading session of {}/{}",
                chapter.chapter_id,
                self.comic_id,
                self.chapter_id
            );
            return false;
        }

        self.pages = chapter.pages();
        self.aspect_checked = false;

        let total = self.total_pages();
        self.current_page = self
            .store
            .get(&page_key(&self.comic_id, &self.chapter_id))
            .and_then(|saved| resume_page(&saved, total))
            .unwrap_or(1);

        tracing::debug!(
            "Loaded {}/{} with {} pages at page {}",
            self.comic_id,
            self.chapter_id,
            total,
            self.current_page
        );
        self.show_page(self.current_page);
        true
    }

    /// Moves to `page`. Out-of-range requests are ignored, not clamped.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.show_page(page)
    }

    pub fn next_page(&mut self) -> bool {
        self.show_page(self.current_page + self.view_mode.step())
    }

    pub fn prev_page(&mut self) -> bool {
        match self.current_page.checked_sub(self.view_mode.step()) {
            Some(page) => self.show_page(page),
            None => false,
        }
    }

    /// Switches layout without moving the cursor.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
        self.store.set(VIEW_MODE_KEY, mode.as_str());
        self.show_page(self.current_page);
    }

    /// Reports the intrinsic size of the first page once its image has
    /// decoded. A landscape first page forces double mode down to single.
    /// Only the first report after a chapter load is considered. Returns
    /// whether the mode was downgraded.
    pub fn first_page_loaded(&mut self, width: u32, height: u32) -> bool {
        if self.aspect_checked || self.pages.is_empty() {
            return false;
        }
        self.aspect_checked = true;

        if width > height && self.view_mode == ViewMode::Double {
            tracing::debug!("Landscape first page ({}x{}), switching to single", width, height);
            self.set_view_mode(ViewMode::Single);
            return true;
        }
        false
    }

    fn show_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages() {
            return false;
        }
        self.current_page = page;
        self.store.set(
            &page_key(&self.comic_id, &self.chapter_id),
            &page.to_string(),
        );
        true
    }

    /// Pages to display for the current cursor and mode. Double mode shows
    /// the cursor page and the one after it, when there is one.
    pub fn visible_pages(&self) -> &[Page] {
        let total = self.total_pages();
        if total == 0 {
            return &[];
        }
        let start = self.current_page - 1;
        match self.view_mode {
            ViewMode::Single => &self.pages[start..self.current_page],
            ViewMode::Double => &self.pages[start..(self.current_page + 1).min(total)],
            ViewMode::All => &self.pages,
        }
    }

    pub fn page_label(&self) -> String {
        format!("{} / {}", self.current_page, self.total_pages())
    }

    pub fn comic_id(&self) -> &str {
        &self.comic_id
    }

    pub fn chapter_id(&self) -> &str {
        &self.chapter_id
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
