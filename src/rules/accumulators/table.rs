//! Row/column-cluster table, given the expected number of rows.
//!
//! Items are only collected while the rule is active: row and column
//! boundaries depend on the whole coordinate distribution, so the table is
//! built when the accumulator finishes.

use super::Accumulator;
use crate::config::TableOptions;
use crate::item::TextItem;
use crate::layout::{floor_boundary, FloorClassifier, Matrix};
use crate::rules::{RuleOutput, TableOutput};
use std::collections::BTreeMap;

/// Table whose rows are evenly spaced buckets of `y`, and whose columns
/// start at the cells of a header row.
#[derive(Debug)]
pub struct TableAccumulator {
    options: TableOptions,
    items: Vec<TextItem>,
}

impl TableAccumulator {
    /// Create an accumulator for a table described by `options`.
    pub fn new(options: TableOptions) -> Self {
        Self {
            options,
            items: Vec::new(),
        }
    }

    /// Group items by row bucket; empty buckets are skipped.
    fn build_rows(&self) -> Vec<Vec<TextItem>> {
        let tops: Vec<f32> = self.items.iter().map(|item| item.y).collect();
        let Some(classify) =
            FloorClassifier::new(&tops, self.options.rows, self.options.row_offset)
        else {
            return Vec::new();
        };

        let mut buckets: BTreeMap<usize, Vec<TextItem>> = BTreeMap::new();
        for item in &self.items {
            buckets
                .entry(classify.classify(item.y))
                .or_default()
                .push(item.clone());
        }
        buckets.into_values().collect()
    }

    /// Column boundaries: the header cells' left positions, ascending.
    ///
    /// A zero boundary is prepended when some item lies left of the first
    /// header cell, so that it gets a column of its own.
    fn column_boundaries(&self, rows: &[Vec<TextItem>]) -> Vec<f32> {
        let mut boundaries: Vec<f32> = rows
            .get(self.options.header_row)
            .map(|header| header.iter().map(|item| item.x).collect())
            .unwrap_or_default();
        boundaries.sort_by(f32::total_cmp);
        boundaries.dedup();

        let leftmost = self.items.iter().map(|item| item.x).reduce(f32::min);
        match (boundaries.first(), leftmost) {
            (Some(&first), Some(leftmost)) if leftmost < first => boundaries.insert(0, 0.0),
            (None, _) => boundaries.push(0.0),
            _ => {},
        }
        boundaries
    }

    fn build_matrix(rows: &[Vec<TextItem>], boundaries: &[f32]) -> Matrix {
        rows.iter()
            .map(|row| {
                let mut cells = vec![Vec::new(); boundaries.len()];
                for item in row {
                    let column = floor_boundary(boundaries, item.x).unwrap_or(0);
                    cells[column].push(item.clone());
                }
                cells
            })
            .collect()
    }
}

impl Accumulator for TableAccumulator {
    fn accumulate(&mut self, item: &TextItem) -> bool {
        self.items.push(item.clone());
        false
    }

    fn finish(self: Box<Self>) -> RuleOutput {
        let rows = self.build_rows();
        let boundaries = self.column_boundaries(&rows);
        let matrix = Self::build_matrix(&rows, &boundaries);
        RuleOutput::Table(TableOutput {
            items: self.items,
            rows,
            matrix,
        })
    }

    fn name(&self) -> &'static str {
        "parse_table"
    }
}
