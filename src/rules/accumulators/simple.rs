//! Scalar and list accumulators.

use super::Accumulator;
use crate::item::TextItem;
use crate::rules::RuleOutput;
use regex::Regex;

/// Captures nothing; used to close a chain of rules explicitly.
#[derive(Debug, Default)]
pub struct StopAccumulating;

impl Accumulator for StopAccumulating {
    fn accumulate(&mut self, _item: &TextItem) -> bool {
        false
    }

    fn finish(self: Box<Self>) -> RuleOutput {
        RuleOutput::None
    }

    fn name(&self) -> &'static str {
        "stop_accumulating"
    }
}

/// Capture groups of the rule pattern, applied to the trigger text.
///
/// Only the trigger contributes; following items are ignored. Groups that
/// did not participate in the match yield an empty string.
#[derive(Debug)]
pub struct ExtractValues {
    values: Vec<String>,
}

impl ExtractValues {
    /// Apply `pattern` to the trigger text.
    pub fn new(pattern: &Regex, trigger: &TextItem) -> Self {
        let values = match pattern.captures(&trigger.text) {
            Some(captures) => captures
                .iter()
                .skip(1)
                .map(|group| group.map_or_else(String::new, |m| m.as_str().to_string()))
                .collect(),
            None => {
                log::warn!(
                    "pattern {} does not match its own trigger {:?}",
                    pattern,
                    trigger.text
                );
                Vec::new()
            },
        };
        Self { values }
    }
}

impl Accumulator for ExtractValues {
    fn accumulate(&mut self, _item: &TextItem) -> bool {
        false
    }

    fn finish(self: Box<Self>) -> RuleOutput {
        RuleOutput::Values(self.values)
    }

    fn name(&self) -> &'static str {
        "extract_regexp_values"
    }
}

/// Text of the first item following the trigger.
#[derive(Debug, Default)]
pub struct NextValue {
    value: Option<String>,
}

impl NextValue {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accumulator for NextValue {
    fn accumulate(&mut self, item: &TextItem) -> bool {
        if self.value.is_none() {
            self.value = Some(item.text.clone());
        }
        true
    }

    fn finish(self: Box<Self>) -> RuleOutput {
        RuleOutput::Value(self.value)
    }

    fn name(&self) -> &'static str {
        "parse_next_item_value"
    }
}

/// Texts of every item until another rule takes over.
#[derive(Debug, Default)]
pub struct AfterHeading {
    texts: Vec<String>,
}

impl AfterHeading {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accumulator for AfterHeading {
    fn accumulate(&mut self, item: &TextItem) -> bool {
        self.texts.push(item.text.clone());
        false
    }

    fn finish(self: Box<Self>) -> RuleOutput {
        RuleOutput::List(self.texts)
    }

    fn name(&self) -> &'static str {
        "accumulate_after_heading"
    }
}

/// Texts of items sharing the x of the first item seen.
///
/// Items at any other x are dropped.
#[derive(Debug, Default)]
pub struct SameX {
    x: Option<f32>,
    texts: Vec<String>,
}

impl SameX {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accumulator for SameX {
    fn accumulate(&mut self, item: &TextItem) -> bool {
        let x = *self.x.get_or_insert(item.x);
        if item.x == x {
            self.texts.push(item.text.clone());
        }
        false
    }

    fn finish(self: Box<Self>) -> RuleOutput {
        RuleOutput::List(self.texts)
    }

    fn name(&self) -> &'static str {
        "accumulate_from_same_x"
    }
}
