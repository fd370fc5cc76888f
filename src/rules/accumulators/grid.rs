//! Geometry-first tables.
//!
//! Coordinates are quantized (multiplied by a scale, then rounded) so that
//! fragments off by a fraction of a unit share a row. Columns are then
//! derived either by clustering right edges ([`GridAccumulator`]) or from
//! the left edges of a header row ([`HeaderGridAccumulator`]).

use super::Accumulator;
use crate::config::{GridOptions, HeaderGridOptions};
use crate::item::TextItem;
use crate::layout::{floor_boundary, ColumnClassifier, Matrix};
use crate::rules::{GridTable, RuleOutput};
use std::collections::BTreeMap;

/// Fragments keyed by quantized `(y, x)`.
#[derive(Debug, Default)]
struct QuantizedGrid {
    scale: f32,
    cells: BTreeMap<i64, BTreeMap<i64, Vec<TextItem>>>,
}

impl QuantizedGrid {
    fn new(scale: f32) -> Self {
        Self {
            scale,
            cells: BTreeMap::new(),
        }
    }

    fn quantize(&self, value: f32) -> i64 {
        (value * self.scale).round() as i64
    }

    fn insert(&mut self, item: &TextItem) {
        let (row, column) = (self.quantize(item.y), self.quantize(item.x));
        self.cells
            .entry(row)
            .or_default()
            .entry(column)
            .or_default()
            .push(item.clone());
    }

    /// Rows from top to bottom, fragments from left to right.
    fn into_rows(self) -> Vec<Vec<TextItem>> {
        self.cells
            .into_values()
            .map(|row| row.into_values().flatten().collect())
            .collect()
    }
}

/// Table whose columns are clusters of fragment right edges.
#[derive(Debug)]
pub struct GridAccumulator {
    columns: usize,
    grid: QuantizedGrid,
}

impl GridAccumulator {
    /// Create an accumulator for a grid described by `options`.
    pub fn new(options: GridOptions) -> Self {
        Self {
            columns: options.columns,
            grid: QuantizedGrid::new(options.scale),
        }
    }
}

impl Accumulator for GridAccumulator {
    fn accumulate(&mut self, item: &TextItem) -> bool {
        self.grid.insert(item);
        false
    }

    fn finish(self: Box<Self>) -> RuleOutput {
        let rows = self.grid.into_rows();
        let right_edges: Vec<f32> = rows.iter().flatten().map(TextItem::right).collect();
        let classifier = ColumnClassifier::cluster(&right_edges, self.columns).classifier();
        let last_column = classifier.len().saturating_sub(1);

        let matrix: Matrix = rows
            .into_iter()
            .map(|row| {
                let mut cells = vec![Vec::new(); classifier.len()];
                for item in row {
                    let column = classifier.classify(item.right()).unwrap_or(last_column);
                    cells[column].push(item);
                }
                cells
            })
            .collect();

        RuleOutput::Grid(GridTable {
            header: Vec::new(),
            matrix,
        })
    }

    fn name(&self) -> &'static str {
        "parse_grid"
    }
}

/// Table whose columns start at the cells of its first row.
#[derive(Debug)]
pub struct HeaderGridAccumulator {
    skip_rows: usize,
    grid: QuantizedGrid,
}

impl HeaderGridAccumulator {
    /// Create an accumulator for a grid described by `options`.
    pub fn new(options: HeaderGridOptions) -> Self {
        Self {
            skip_rows: options.skip_rows,
            grid: QuantizedGrid::new(options.scale),
        }
    }
}

impl Accumulator for HeaderGridAccumulator {
    fn accumulate(&mut self, item: &TextItem) -> bool {
        self.grid.insert(item);
        false
    }

    fn finish(self: Box<Self>) -> RuleOutput {
        let mut rows = self.grid.into_rows().into_iter().skip(self.skip_rows);
        let header = rows.next().unwrap_or_default();
        let mut boundaries: Vec<f32> = header.iter().map(|item| item.x).collect();
        boundaries.sort_by(f32::total_cmp);

        let matrix: Matrix = rows
            .map(|row| {
                let mut cells = vec![Vec::new(); boundaries.len().max(1)];
                for item in row {
                    let column = floor_boundary(&boundaries, item.x).unwrap_or(0);
                    cells[column].push(item);
                }
                cells
            })
            .collect();

        RuleOutput::Grid(GridTable { header, matrix })
    }

    fn name(&self) -> &'static str {
        "parse_header_grid"
    }
}
