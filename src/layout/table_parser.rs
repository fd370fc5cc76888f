//! Row/column table builder with caller-chosen column keys.
//!
//! Fragments are grouped by their exact `y` into rows, then by a column key
//! supplied by the caller (an index, a header position, a clustered value,
//! ...). Fragments landing in the same cell are kept together.

use crate::geometry::Coord;
use crate::item::TextItem;
use crate::layout::render;
use std::collections::{BTreeMap, BTreeSet};

/// Fragments sharing one table cell.
pub type Cell = Vec<TextItem>;

/// Rows of cells. Each cell holds every fragment classified into it.
pub type Matrix = Vec<Vec<Cell>>;

/// Cells of one row, keyed by column.
pub type TableRow = BTreeMap<Coord, Cell>;

/// Classifies fragments into rows (by top position) and caller-provided columns.
///
/// # Examples
///
/// ```
/// use pdf_rules::item::TextItem;
/// use pdf_rules::layout::TableParser;
///
/// let mut table = TableParser::new();
/// table.process_item(&TextItem::new("b", 50.0, 10.0), 50.0);
/// table.process_item(&TextItem::new("a", 0.0, 10.0), 0.0);
/// table.process_item(&TextItem::new("c", 0.0, 20.0), 0.0);
///
/// assert_eq!(
///     table.clean_matrix(""),
///     vec![vec!["a".to_string(), "b".to_string()], vec!["c".to_string(), String::new()]]
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct TableParser {
    rows: BTreeMap<Coord, TableRow>,
}

impl TableParser {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fragment to the row of its `y`, in column `column`.
    pub fn process_item(&mut self, item: &TextItem, column: f32) {
        self.rows
            .entry(Coord(item.y))
            .or_default()
            .entry(Coord(column))
            .or_default()
            .push(item.clone());
    }

    /// Add a header fragment; header fragments all share the row `y = 0`.
    pub fn process_heading_item(&mut self, item: &TextItem, column: f32) {
        let heading = TextItem {
            y: 0.0,
            ..item.clone()
        };
        self.process_item(&heading, column);
    }

    /// Rows sorted by ascending `y`.
    pub fn rows(&self) -> Vec<&TableRow> {
        self.rows.values().collect()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no fragment was added.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct column keys of all rows, ascending.
    fn column_keys(&self) -> Vec<Coord> {
        let keys: BTreeSet<Coord> = self
            .rows
            .values()
            .flat_map(|row| row.keys().copied())
            .collect();
        keys.into_iter().collect()
    }

    /// Row-major matrix of collision lists.
    ///
    /// Columns are the distinct column keys of all rows, sorted numerically,
    /// so every row has the same width; absent cells are empty.
    pub fn matrix(&self) -> Matrix {
        let columns = self.column_keys();
        self.rows
            .values()
            .map(|row| {
                let mut cells: Vec<Cell> = vec![Vec::new(); columns.len()];
                for (key, items) in row {
                    if let Ok(index) = columns.binary_search(key) {
                        cells[index].extend(items.iter().cloned());
                    }
                }
                cells
            })
            .collect()
    }

    /// Matrix of cell texts, colliding fragments joined with `separator`.
    pub fn clean_matrix(&self, separator: &str) -> Vec<Vec<String>> {
        clean_matrix(&self.matrix(), separator)
    }

    /// One line per row: `index:<TAB>x: text, x: text, ...`.
    pub fn render_rows(&self) -> String {
        self.rows
            .values()
            .enumerate()
            .map(|(index, row)| {
                let cells: Vec<String> = row
                    .values()
                    .flatten()
                    .map(|item| format!("{}: {}", item.x, item.text))
                    .collect();
                format!("{}:\t{}", index, cells.join(", "))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Tab-separated rendering of [`TableParser::matrix`].
    pub fn render_matrix(&self) -> String {
        render::render_matrix(&self.matrix())
    }
}

/// Flatten a matrix to texts, colliding fragments joined with `separator`.
pub fn clean_matrix(matrix: &Matrix, separator: &str) -> Vec<Vec<String>> {
    matrix
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| {
                    cell.iter()
                        .map(|item| item.text.as_str())
                        .collect::<Vec<_>>()
                        .join(separator)
                })
                .collect()
        })
        .collect()
}
