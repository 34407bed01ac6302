//! Markdown table parsing.
//!
//! [`parse_table`] turns the text of an API subsection into rows keyed by
//! column header. It never fails: input without a usable table yields an empty
//! vector, and the caller decides whether that is worth logging.
//!
//! Cells may contain `\|` to mean a literal pipe. Those sequences are hidden
//! behind a private-use sentinel while splitting and restored verbatim
//! afterwards, so a cell keeps the escape convention that the type normalizer
//! understands.

use serde::{Deserialize, Serialize};

/// Escaped pipe as written in documentation cells.
pub const ESCAPED_PIPE: &str = "\\|";

/// Private-use code point that stands in for `\|` while a line is split.
const PIPE_SENTINEL: &str = "\u{E000}";

/// Narrative connectives that mark a line as prose rather than a table row.
const DEFAULT_PROSE_MARKERS: &[&str] = &["可以", "如果", "例如", "用于", "通过"];

/// Tuning knobs for [`parse_table`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOptions {
    /// A pipe-bearing line containing any of these words is treated as prose
    /// and never chosen as the header row.
    pub prose_markers: Vec<String>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            prose_markers: DEFAULT_PROSE_MARKERS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl TableOptions {
    /// Whether `line` reads like narrative text.
    pub fn looks_like_prose(&self, line: &str) -> bool {
        self.prose_markers
            .iter()
            .any(|marker| !marker.is_empty() && line.contains(marker.as_str()))
    }
}

/// One body row of a table, keyed by the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    cells: Vec<(String, String)>,
}

impl TableRow {
    /// Cell under `header`, if that column exists.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v.as_str())
    }

    /// First column in `aliases` (in alias order) present in this row.
    ///
    /// Returns the matched header together with the cell.
    pub fn get_any<'a>(&'a self, aliases: &[&str]) -> Option<(&'a str, &'a str)> {
        aliases.iter().find_map(|alias| {
            self.cells
                .iter()
                .find(|(h, _)| h.eq_ignore_ascii_case(alias))
                .map(|(h, v)| (h.as_str(), v.as_str()))
        })
    }

    /// Headers in column order.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(h, _)| h.as_str())
    }

    /// Cell values in column order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(_, v)| v.as_str())
    }

    /// True when every cell is an alignment marker such as `---` or `:-:`.
    pub fn is_separator(&self) -> bool {
        !self.cells.is_empty() && self.values().all(is_separator_cell)
    }
}

/// Parse the first Markdown table found in `text`.
///
/// Returns an empty vector when `text` has fewer than three non-blank lines or
/// when no pipe-bearing, non-prose line exists. An alignment-only line is never
/// taken as the header. Body rows shorter than the
/// header are padded with empty strings; extra cells are dropped.
pub fn parse_table(text: &str, options: &TableOptions) -> Vec<TableRow> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() < 3 {
        return Vec::new();
    }

    let Some(start) = lines
        .iter()
        .position(|line| is_header_candidate(line, options))
    else {
        return Vec::new();
    };

    let table_lines: Vec<&str> = lines[start..]
        .iter()
        .take_while(|line| line.contains('|'))
        .copied()
        .collect();

    let Some((header_line, rest)) = table_lines.split_first() else {
        return Vec::new();
    };

    let headers = split_cells(header_line);
    if headers.iter().all(String::is_empty) {
        return Vec::new();
    }

    let body = match rest.split_first() {
        Some((first, tail)) if split_cells(first).iter().all(|c| is_separator_cell(c)) => tail,
        _ => rest,
    };

    body.iter()
        .map(|line| {
            let mut values = split_cells(line).into_iter();
            TableRow {
                cells: headers
                    .iter()
                    .map(|header| (header.clone(), values.next().unwrap_or_default()))
                    .collect(),
            }
        })
        .collect()
}

fn is_header_candidate(line: &str, options: &TableOptions) -> bool {
    line.contains('|')
        && !options.looks_like_prose(line)
        && !split_cells(line).iter().all(|c| is_separator_cell(c))
}

/// Split one table line into trimmed cells, honoring `\|`.
fn split_cells(line: &str) -> Vec<String> {
    let protected = line.replace(ESCAPED_PIPE, PIPE_SENTINEL);
    let trimmed = protected.trim();
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);

    inner
        .split('|')
        .map(|cell| cell.trim().replace(PIPE_SENTINEL, ESCAPED_PIPE))
        .collect()
}

fn is_separator_cell(cell: &str) -> bool {
    let cell = cell.trim();
    let core = cell.strip_prefix(':').unwrap_or(cell);
    let core = core.strip_suffix(':').unwrap_or(core);
    !core.is_empty() && core.chars().all(|c| c == '-')
}
