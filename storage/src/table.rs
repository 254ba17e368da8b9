//! Row tokenizing shared by the catalog, chapter and download-info readers.
//!
//! Tables are markdown-styled: a row is any line that, once trimmed, starts
//! and ends with the delimiter. Everything else in a file (headings, prose,
//! blank lines) is ignored. A delimiter cannot be escaped inside a cell.

pub const DELIMITER: char = '|';

#[derive(Debug, Clone, Copy)]
pub struct RowTokenizer {
    delimiter: char,
}

impl Default for RowTokenizer {
    fn default() -> Self {
        Self::new(DELIMITER)
    }
}

impl RowTokenizer {
    pub const fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn is_row(&self, line: &str) -> bool {
        let line = line.trim();
        line.starts_with(self.delimiter) && line.ends_with(self.delimiter)
    }

    /// Trimmed, non-empty cells of a table row, or `None` when the line is
    /// not a table row at all.
    pub fn cells<'a>(&self, line: &'a str) -> Option<Vec<&'a str>> {
        if !self.is_row(line) {
            return None;
        }
        Some(self.split_filtered(line.trim()))
    }

    /// Splits and trims without any row check, dropping empty cells.
    pub fn split_filtered<'a>(&self, line: &'a str) -> Vec<&'a str> {
        line.split(self.delimiter)
            .map(str::trim)
            .filter(|cell| !cell.is_empty())
            .collect()
    }

    /// Splits and trims, keeping empty cells. For a bounded row the first
    /// and last entries are the empty strings outside the outer delimiters.
    pub fn split_raw<'a>(&self, line: &'a str) -> Vec<&'a str> {
        line.split(self.delimiter).map(str::trim).collect()
    }
}

/// Labels that identify a header or markdown-separator cell in a column.
#[derive(Debug, Clone, Copy)]
pub struct Sentinel {
    pub header: &'static str,
    pub separator: &'static str,
}

impl Sentinel {
    pub fn admits(&self, value: &str) -> bool {
        !value.is_empty() && value != self.header && value != self.separator
    }

    /// Key columns additionally reject anything starting with a dash, which
    /// catches separator rows of any width.
    pub fn admits_key(&self, value: &str) -> bool {
        self.admits(value) && !value.starts_with('-')
    }
}

/// A record bound to table cells by fixed position.
pub trait PositionalRecord: Sized {
    const MIN_CELLS: usize;

    /// Builds the record from a row with at least `MIN_CELLS` cells, or
    /// rejects it as a sentinel row.
    fn from_cells(cells: &[&str]) -> Option<Self>;
}

/// Parses every qualifying row of `text`, in source order. Rows that are too
/// short or rejected by the record are skipped individually.
pub fn parse_positional<T: PositionalRecord>(tokenizer: &RowTokenizer, text: &str) -> Vec<T> {
    text.lines()
        .filter_map(|line| tokenizer.cells(line))
        .filter(|cells| cells.len() >= T::MIN_CELLS)
        .filter_map(|cells| T::from_cells(&cells))
        .collect()
}
