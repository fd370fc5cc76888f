//! Accumulator strategies available to rules.
//!
//! An accumulator receives the items following its rule's trigger and
//! builds the rule output. The available strategies are fixed at compile
//! time and listed in [`AccumulatorKind`]:
//!
//! - [`StopAccumulating`]: captures nothing
//! - [`ExtractValues`]: capture groups of the rule pattern on the trigger
//! - [`NextValue`]: text of the next item
//! - [`AfterHeading`]: texts of every following item
//! - [`SameX`]: texts of following items sharing the first one's x
//! - [`ColumnsAccumulator`]: lines split by named column headers
//! - [`TableAccumulator`]: rows bucketed by count, columns from a header row
//! - [`GridAccumulator`]: columns clustered on right edges
//! - [`HeaderGridAccumulator`]: columns from the left edges of a header row

mod columns;
mod grid;
mod simple;
mod table;

pub use columns::ColumnsAccumulator;
pub use grid::{GridAccumulator, HeaderGridAccumulator};
pub use simple::{AfterHeading, ExtractValues, NextValue, SameX, StopAccumulating};
pub use table::TableAccumulator;

use crate::config::{GridOptions, HeaderGridOptions, TableOptions};
use crate::item::TextItem;
use crate::rules::RuleOutput;
use regex::Regex;

/// Incremental builder of a rule output.
pub trait Accumulator {
    /// Feed one item following the trigger.
    ///
    /// Returns `true` once the accumulator needs no further item; the
    /// processor then terminates it right away.
    fn accumulate(&mut self, item: &TextItem) -> bool;

    /// Finalize the accumulated state into the rule output.
    fn finish(self: Box<Self>) -> RuleOutput;

    /// Return the name of this strategy for debugging.
    fn name(&self) -> &'static str;
}

/// Strategy selected for a rule, with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum AccumulatorKind {
    /// Capture nothing.
    Stop,
    /// Capture groups of the rule pattern on the trigger text.
    ExtractValues,
    /// Text of the next item.
    NextValue,
    /// Texts of every following item.
    AfterHeading,
    /// Texts of following items at the first item's x.
    SameX,
    /// Lines split by the named column headers.
    Columns(Vec<String>),
    /// Rows bucketed by count, columns from a header row.
    Table(TableOptions),
    /// Columns clustered on right edges.
    Grid(GridOptions),
    /// Columns from the left edges of a header row.
    HeaderGrid(HeaderGridOptions),
}

impl AccumulatorKind {
    /// Builder-method name of this strategy.
    pub fn name(&self) -> &'static str {
        match self {
            AccumulatorKind::Stop => "stop_accumulating",
            AccumulatorKind::ExtractValues => "extract_regexp_values",
            AccumulatorKind::NextValue => "parse_next_item_value",
            AccumulatorKind::AfterHeading => "accumulate_after_heading",
            AccumulatorKind::SameX => "accumulate_from_same_x",
            AccumulatorKind::Columns(_) => "parse_columns",
            AccumulatorKind::Table(_) => "parse_table",
            AccumulatorKind::Grid(_) => "parse_grid",
            AccumulatorKind::HeaderGrid(_) => "parse_header_grid",
        }
    }
}

/// Build the accumulator of `kind` for a rule triggered by `trigger`.
///
/// `pattern` is the rule pattern. When `include_trigger` is false the
/// trigger is not counted as data (rules built with `Rule::after`).
pub fn create_accumulator(
    kind: &AccumulatorKind,
    pattern: &Regex,
    trigger: &TextItem,
    include_trigger: bool,
) -> Box<dyn Accumulator> {
    match kind {
        AccumulatorKind::Stop => Box::new(StopAccumulating),
        AccumulatorKind::ExtractValues => Box::new(ExtractValues::new(pattern, trigger)),
        AccumulatorKind::NextValue => Box::new(NextValue::new()),
        AccumulatorKind::AfterHeading => Box::new(AfterHeading::new()),
        AccumulatorKind::SameX => Box::new(SameX::new()),
        AccumulatorKind::Columns(names) => {
            let mut columns = ColumnsAccumulator::new(names.clone());
            if include_trigger {
                columns.accumulate(trigger);
            }
            Box::new(columns)
        },
        AccumulatorKind::Table(options) => Box::new(TableAccumulator::new(options.clone())),
        AccumulatorKind::Grid(options) => Box::new(GridAccumulator::new(options.clone())),
        AccumulatorKind::HeaderGrid(options) => {
            Box::new(HeaderGridAccumulator::new(options.clone()))
        },
    }
}
