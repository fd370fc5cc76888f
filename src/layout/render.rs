//! Plain-text rendering of reconstructed tables, for debugging.
//!
//! Cells are truncated to 7 characters so that tab-separated output stays
//! aligned in a terminal.

use crate::item::TextItem;
use crate::layout::table_parser::Matrix;

const CELL_WIDTH: usize = 7;

fn fit(text: &str) -> String {
    text.chars().take(CELL_WIDTH).collect()
}

/// A cell holding more than one fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct Collision {
    /// Row index
    pub row: usize,
    /// Column index
    pub column: usize,
    /// Colliding fragments
    pub items: Vec<TextItem>,
}

/// One line per fragment: `y<TAB>x<TAB>text`.
pub fn render_items(items: &[TextItem]) -> String {
    items
        .iter()
        .map(|item| format!("{}\t{}\t{}", item.y, item.x, item.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per row: the row index, then `floor(x):text` per fragment.
pub fn render_rows(rows: &[Vec<TextItem>]) -> String {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let mut cells = vec![format!("{}:", index)];
            cells.extend(
                row.iter()
                    .map(|item| fit(&format!("{}:{}", item.x.floor(), item.text))),
            );
            cells.join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per row, colliding fragments joined with `+`.
pub fn render_matrix(matrix: &Matrix) -> String {
    matrix
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| {
                    let texts: Vec<&str> = cell.iter().map(|item| item.text.as_str()).collect();
                    fit(&texts.join("+"))
                })
                .collect::<Vec<_>>()
                .join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per row of an already flattened table.
pub fn render_table(table: &[Vec<String>]) -> String {
    table
        .iter()
        .map(|row| row.iter().map(|cell| fit(cell)).collect::<Vec<_>>().join("\t"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Every cell of `matrix` holding more than one fragment.
pub fn detect_collisions(matrix: &Matrix) -> Vec<Collision> {
    let mut collisions = Vec::new();
    for (row, cells) in matrix.iter().enumerate() {
        for (column, items) in cells.iter().enumerate() {
            if items.len() > 1 {
                collisions.push(Collision {
                    row,
                    column,
                    items: items.clone(),
                });
            }
        }
    }
    collisions
}
