use runtu_comic_common::models::Chapter;

/// Chapters adjacent to the active one in table scan order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ChapterNeighbors<'a> {
    pub previous: Option<&'a Chapter>,
    pub next: Option<&'a Chapter>,
}

/// Looks up `chapter_id` (first occurrence) and returns its neighbours.
/// An id that is not in the list has none.
pub fn neighbors<'a>(chapters: &'a [Chapter], chapter_id: &str) -> ChapterNeighbors<'a> {
    let Some(index) = chapters.iter().position(|c| c.chapter_id == chapter_id) else {
        return ChapterNeighbors::default();
    };

    ChapterNeighbors {
        previous: index.checked_sub(1).and_then(|i| chapters.get(i)),
        next: chapters.get(index + 1),
    }
}
