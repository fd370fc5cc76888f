//! Column parsing by header names.
//!
//! The header line is located first, by the names of its columns. Every
//! following item is then stored on its line, in the rightmost column whose
//! header starts at or before the item.

use super::Accumulator;
use crate::geometry::Coord;
use crate::item::TextItem;
use crate::layout::floor_boundary;
use crate::rules::{ColumnRows, RuleOutput};

#[derive(Debug)]
enum Phase {
    /// Still looking for header names; holds the x of each located one.
    Header(Vec<Option<f32>>),
    /// Header complete; holds the left position of each column.
    Rows(Vec<f32>),
}

/// Lines of a table whose columns are announced by a header line.
#[derive(Debug)]
pub struct ColumnsAccumulator {
    phase: Phase,
    output: ColumnRows,
}

impl ColumnsAccumulator {
    /// Create an accumulator expecting the given header names.
    pub fn new(columns: Vec<String>) -> Self {
        let mut accumulator = Self {
            phase: Phase::Header(vec![None; columns.len()]),
            output: ColumnRows {
                columns,
                ..Default::default()
            },
        };
        accumulator.complete_header();
        accumulator
    }

    fn locate_header(&mut self, item: &TextItem) {
        let Phase::Header(located) = &mut self.phase else {
            return;
        };
        let pending = self
            .output
            .columns
            .iter()
            .zip(located.iter())
            .position(|(name, x)| x.is_none() && *name == item.text);
        if let Some(index) = pending {
            located[index] = Some(item.x);
        }
        self.complete_header();
    }

    fn complete_header(&mut self) {
        if let Phase::Header(located) = &self.phase {
            if let Some(positions) = located.iter().copied().collect::<Option<Vec<f32>>>() {
                log::debug!("table header: {:?} {:?}", self.output.columns, positions);
                self.phase = Phase::Rows(positions);
            }
        }
    }
}

impl Accumulator for ColumnsAccumulator {
    fn accumulate(&mut self, item: &TextItem) -> bool {
        match &mut self.phase {
            Phase::Header(_) => self.locate_header(item),
            Phase::Rows(positions) => {
                // each distinct y is a line of its own
                let column = floor_boundary(positions, item.x).unwrap_or(0);
                self.output
                    .rows
                    .entry(Coord(item.y))
                    .or_default()
                    .insert(column, item.text.clone());
            },
        }
        false
    }

    fn finish(self: Box<Self>) -> RuleOutput {
        RuleOutput::Columns(self.output)
    }

    fn name(&self) -> &'static str {
        "parse_columns"
    }
}
