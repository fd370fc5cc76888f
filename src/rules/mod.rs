//! Declarative extraction rules and the engine that applies them.
//!
//! A [`Rule`] pairs a pattern over fragment text with an accumulation
//! strategy and an optional completion callback. A [`RuleProcessor`] feeds
//! the item stream through an ordered list of rules:
//!
//! ```text
//! Item → [pending rules, declaration order] → match? → activate rule
//!                                            ↘ no   → active accumulator
//! ```
//!
//! Each rule fires at most once per stream. Exactly one accumulator is
//! active at a time; activating a rule terminates the previous one, whose
//! output is then handed to its callback.
//!
//! # Examples
//!
//! ```
//! use pdf_rules::item::{Item, TextItem};
//! use pdf_rules::rules::{Rule, RuleProcessor};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! # fn main() -> pdf_rules::Result<()> {
//! let found = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&found);
//!
//! let rules = vec![Rule::on(r"^Value:")?
//!     .parse_next_item_value()
//!     .then(move |output| sink.borrow_mut().push(output))];
//!
//! let mut processor = RuleProcessor::new(rules);
//! processor.process_all(&[
//!     Item::Text(TextItem::new("Value:", 1.0, 1.0)),
//!     Item::Text(TextItem::new("42", 5.0, 1.0)),
//!     Item::EndOfStream,
//! ]);
//!
//! assert_eq!(found.borrow()[0].as_value(), Some("42"));
//! # Ok(())
//! # }
//! ```

pub mod accumulators;
mod output;
pub mod processor;
pub mod trace;

pub use accumulators::{create_accumulator, Accumulator, AccumulatorKind};
pub use output::{ColumnRows, GridTable, RuleOutput, TableOutput};
pub use processor::RuleProcessor;
pub use trace::{LogTrace, NoopTrace, Trace};

use crate::config::{GridOptions, HeaderGridOptions, TableOptions};
use crate::error::Result;
use crate::item::TextItem;
use regex::Regex;
use std::fmt;

/// Completion callback of a rule.
pub type OnComplete = Box<dyn FnMut(RuleOutput)>;

/// A pattern, an accumulation strategy and a completion callback.
///
/// Built with [`Rule::on`] or [`Rule::after`], then one strategy method
/// (e.g. [`Rule::parse_table`]) and optionally [`Rule::then`]. A rule
/// without a strategy never matches.
pub struct Rule {
    pattern: Regex,
    skip_trigger: bool,
    kind: Option<AccumulatorKind>,
    on_complete: Option<OnComplete>,
    accumulator: Option<Box<dyn Accumulator>>,
    consumed: bool,
}

impl Rule {
    /// Rule triggered by `pattern`; the trigger may bootstrap the accumulator.
    pub fn on(pattern: &str) -> Result<Self> {
        Ok(Self::new(Regex::new(pattern)?))
    }

    /// Rule triggered by `pattern`, whose trigger is not counted as data.
    ///
    /// The item right after the trigger is given to the accumulator without
    /// being tested against other rules.
    pub fn after(pattern: &str) -> Result<Self> {
        let mut rule = Self::on(pattern)?;
        rule.skip_trigger = true;
        Ok(rule)
    }

    /// Rule triggered by an already compiled pattern.
    pub fn new(pattern: Regex) -> Self {
        Self {
            pattern,
            skip_trigger: false,
            kind: None,
            on_complete: None,
            accumulator: None,
            consumed: false,
        }
    }

    fn with_kind(mut self, kind: AccumulatorKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Capture nothing.
    pub fn stop_accumulating(self) -> Self {
        self.with_kind(AccumulatorKind::Stop)
    }

    /// Capture the groups of the pattern on the trigger text.
    pub fn extract_regexp_values(self) -> Self {
        self.with_kind(AccumulatorKind::ExtractValues)
    }

    /// Capture the text of the next item.
    pub fn parse_next_item_value(self) -> Self {
        self.with_kind(AccumulatorKind::NextValue)
    }

    /// Capture the texts of all following items, until another rule matches.
    pub fn accumulate_after_heading(self) -> Self {
        self.with_kind(AccumulatorKind::AfterHeading)
    }

    /// Capture the texts of following items sharing the first one's x.
    pub fn accumulate_from_same_x(self) -> Self {
        self.with_kind(AccumulatorKind::SameX)
    }

    /// Capture lines split by the given column header names.
    pub fn parse_columns<S: AsRef<str>>(self, columns: &[S]) -> Self {
        let columns = columns.iter().map(|name| name.as_ref().to_string()).collect();
        self.with_kind(AccumulatorKind::Columns(columns))
    }

    /// Capture a table of `rows` rows; columns come from its first row.
    pub fn parse_table(self, rows: usize) -> Self {
        self.parse_table_with(TableOptions::new(rows))
    }

    /// Capture a table described by `options`.
    pub fn parse_table_with(self, options: TableOptions) -> Self {
        self.with_kind(AccumulatorKind::Table(options))
    }

    /// Capture a grid of `columns` columns clustered on right edges.
    pub fn parse_grid(self, columns: usize) -> Self {
        self.parse_grid_with(GridOptions::new(columns))
    }

    /// Capture a right-edge clustered grid described by `options`.
    pub fn parse_grid_with(self, options: GridOptions) -> Self {
        self.with_kind(AccumulatorKind::Grid(options))
    }

    /// Capture a grid whose header is the first row after `skip_rows` rows.
    pub fn parse_header_grid(self, skip_rows: usize) -> Self {
        self.parse_header_grid_with(HeaderGridOptions::new(skip_rows))
    }

    /// Capture a header-relative grid described by `options`.
    pub fn parse_header_grid_with(self, options: HeaderGridOptions) -> Self {
        self.with_kind(AccumulatorKind::HeaderGrid(options))
    }

    /// Call `callback` with the rule output once its accumulator terminates.
    pub fn then<F>(mut self, callback: F) -> Self
    where
        F: FnMut(RuleOutput) + 'static,
    {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// The trigger pattern.
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// The selected strategy, if any.
    pub fn kind(&self) -> Option<&AccumulatorKind> {
        self.kind.as_ref()
    }

    /// Whether the trigger is excluded from the accumulated data.
    pub fn skips_trigger(&self) -> bool {
        self.skip_trigger
    }

    /// Whether the rule already matched.
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Whether the rule can still match an item.
    pub fn is_pending(&self) -> bool {
        !self.consumed && self.kind.is_some()
    }

    /// Whether `text` triggers this rule.
    pub fn matches(&self, text: &str) -> bool {
        self.is_pending() && self.pattern.is_match(text)
    }

    /// Build the accumulator from the trigger and mark the rule consumed.
    pub(crate) fn activate(&mut self, trigger: &TextItem) {
        if let Some(kind) = &self.kind {
            self.accumulator = Some(create_accumulator(
                kind,
                &self.pattern,
                trigger,
                !self.skip_trigger,
            ));
        }
        self.consumed = true;
    }

    /// Feed an item to the accumulator; `true` once it is done.
    pub(crate) fn accumulate(&mut self, item: &TextItem) -> bool {
        self.accumulator
            .as_mut()
            .is_some_and(|accumulator| accumulator.accumulate(item))
    }

    /// Finalize the accumulator and hand its output to the callback.
    pub(crate) fn terminate(&mut self) {
        let Some(accumulator) = self.accumulator.take() else {
            return;
        };
        let output = accumulator.finish();
        if let Some(callback) = self.on_complete.as_mut() {
            callback(output);
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("pattern", &self.pattern.as_str())
            .field("skip_trigger", &self.skip_trigger)
            .field("kind", &self.kind)
            .field("consumed", &self.consumed)
            .field("active", &self.accumulator.is_some())
            .finish()
    }
}
