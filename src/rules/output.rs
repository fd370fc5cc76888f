//! Values produced by rule accumulators.

use crate::geometry::Coord;
use crate::item::TextItem;
use crate::layout::{clean_matrix, Matrix};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// Finalized output of a rule, handed to its completion callback.
///
/// The variant depends on the accumulator strategy of the rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RuleOutput {
    /// `stop_accumulating`: nothing captured.
    None,
    /// `extract_regexp_values`: capture groups of the pattern on the trigger.
    Values(Vec<String>),
    /// `parse_next_item_value`: text of the item following the trigger.
    Value(Option<String>),
    /// `accumulate_after_heading` / `accumulate_from_same_x`: captured texts.
    List(Vec<String>),
    /// `parse_columns`: cells keyed by line and column index.
    Columns(ColumnRows),
    /// `parse_table`: fragments, rows and column matrix.
    Table(TableOutput),
    /// `parse_grid` / `parse_header_grid`: geometric grid.
    Grid(GridTable),
}

impl RuleOutput {
    /// Captured groups, for `Values`.
    pub fn as_values(&self) -> Option<&[String]> {
        match self {
            RuleOutput::Values(values) => Some(values),
            _ => None,
        }
    }

    /// Captured value, for `Value`.
    pub fn as_value(&self) -> Option<&str> {
        match self {
            RuleOutput::Value(value) => value.as_deref(),
            _ => None,
        }
    }

    /// Captured texts, for `List`.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            RuleOutput::List(list) => Some(list),
            _ => None,
        }
    }

    /// Column rows, for `Columns`.
    pub fn as_columns(&self) -> Option<&ColumnRows> {
        match self {
            RuleOutput::Columns(columns) => Some(columns),
            _ => None,
        }
    }

    /// Table, for `Table`.
    pub fn as_table(&self) -> Option<&TableOutput> {
        match self {
            RuleOutput::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Grid, for `Grid`.
    pub fn as_grid(&self) -> Option<&GridTable> {
        match self {
            RuleOutput::Grid(grid) => Some(grid),
            _ => None,
        }
    }
}

/// Rows captured by `parse_columns`.
///
/// Each line (keyed by its `y`, in first-seen order) maps column indexes to
/// the last text written in that cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ColumnRows {
    /// Expected header names
    pub columns: Vec<String>,
    /// Cells by line, then by column index
    pub rows: IndexMap<Coord, BTreeMap<usize, String>>,
}

impl ColumnRows {
    /// Dense table of texts, one entry per expected column, `""` when absent.
    pub fn to_table(&self) -> Vec<Vec<String>> {
        let width = self
            .rows
            .values()
            .filter_map(|cells| cells.keys().next_back().map(|last| last + 1))
            .fold(self.columns.len(), usize::max);
        self.rows
            .values()
            .map(|cells| {
                (0..width)
                    .map(|column| cells.get(&column).cloned().unwrap_or_default())
                    .collect()
            })
            .collect()
    }
}

/// Table built by `parse_table`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableOutput {
    /// Every accumulated fragment, in stream order
    pub items: Vec<TextItem>,
    /// Fragments grouped by row bucket, non-empty buckets only
    pub rows: Vec<Vec<TextItem>>,
    /// Rows × columns of colliding fragments
    pub matrix: Matrix,
}

impl TableOutput {
    /// Matrix of cell texts, colliding fragments joined with `separator`.
    pub fn clean_matrix(&self, separator: &str) -> Vec<Vec<String>> {
        clean_matrix(&self.matrix, separator)
    }
}

/// Grid built by `parse_grid` or `parse_header_grid`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GridTable {
    /// Header fragments (header-relative grids only), left to right
    pub header: Vec<TextItem>,
    /// Rows × columns of colliding fragments
    pub matrix: Matrix,
}

impl GridTable {
    /// Matrix of cell texts, colliding fragments joined with `separator`.
    pub fn clean_matrix(&self, separator: &str) -> Vec<Vec<String>> {
        clean_matrix(&self.matrix, separator)
    }

    /// Header texts, left to right.
    pub fn header_names(&self) -> Vec<&str> {
        self.header.iter().map(|item| item.text.as_str()).collect()
    }
}
