//! Positional field extraction.
//!
//! Where [`RuleProcessor`](crate::rules::RuleProcessor) reacts to text
//! patterns, a [`SequentialParser`] consumes items by position: each step
//! of its list handles items until it is done, then the next step takes
//! over.
//!
//! # Examples
//!
//! ```
//! use pdf_rules::item::{Item, TextItem};
//! use pdf_rules::sequential::{SequentialParser, Step};
//!
//! let mut parser = SequentialParser::new(vec![
//!     Step::Skip,
//!     Step::field("name"),
//!     Step::field("date"),
//! ]);
//! for text in ["Invoice", "ACME", "2024-01-31"] {
//!     parser.parse_item(&Item::Text(TextItem::new(text, 0.0, 0.0)));
//! }
//!
//! assert!(parser.is_done());
//! assert_eq!(parser.fields()["name"].text(), Some("ACME"));
//! ```

use crate::item::Item;
use indexmap::IndexMap;
use std::fmt;

/// Fields collected by a [`SequentialParser`], in insertion order.
pub type Fields = IndexMap<String, Item>;

/// Custom step: returns `true` once it consumed its last item.
pub type StepFn = Box<dyn FnMut(&Item, &mut Fields) -> bool>;

/// One action of a [`SequentialParser`].
pub enum Step {
    /// Store the next item under this name.
    Field(String),
    /// Feed items to a function until it reports done.
    Accumulate(StepFn),
    /// Drop the next item.
    Skip,
}

impl Step {
    /// Store the next item as field `name`.
    pub fn field(name: impl Into<String>) -> Self {
        Step::Field(name.into())
    }

    /// Feed items to `accumulate` until it returns `true`.
    pub fn accumulate<F>(accumulate: F) -> Self
    where
        F: FnMut(&Item, &mut Fields) -> bool + 'static,
    {
        Step::Accumulate(Box::new(accumulate))
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Step::Accumulate(_) => f.write_str("Accumulate(..)"),
            Step::Skip => f.write_str("Skip"),
        }
    }
}

/// Applies a list of steps to successive items.
///
/// The completion callback fires once, when the last step is done or when
/// the end of the stream arrives, whichever comes first. Items received
/// afterwards are discarded with a warning.
pub struct SequentialParser {
    steps: Vec<Step>,
    step: usize,
    fields: Fields,
    done: bool,
    on_complete: Option<Box<dyn FnOnce(&Fields)>>,
}

impl SequentialParser {
    /// Create a parser running `steps` in order.
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps,
            step: 0,
            fields: Fields::new(),
            done: false,
            on_complete: None,
        }
    }

    /// Call `callback` with the collected fields once parsing completes.
    pub fn then<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&Fields) + 'static,
    {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Fields collected so far.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Store a field explicitly, e.g. from outside a step.
    pub fn add_field(&mut self, name: impl Into<String>, item: Item) {
        self.fields.insert(name.into(), item);
    }

    /// Whether the completion callback has fired.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Consume the parser, returning its fields.
    pub fn into_fields(self) -> Fields {
        self.fields
    }

    /// Apply the current step to `item`.
    pub fn parse_item(&mut self, item: &Item) {
        if self.done {
            log::warn!("skipping item, sequential parser is done: {:?}", item);
            return;
        }
        if item.is_end() {
            self.complete();
            return;
        }
        let Some(step) = self.steps.get_mut(self.step) else {
            self.complete();
            return;
        };

        let advance = match step {
            Step::Field(name) => {
                self.fields.insert(name.clone(), item.clone());
                true
            },
            Step::Accumulate(accumulate) => accumulate(item, &mut self.fields),
            Step::Skip => true,
        };
        if advance {
            self.step += 1;
        }
        if self.step >= self.steps.len() {
            self.complete();
        }
    }

    fn complete(&mut self) {
        self.done = true;
        if let Some(callback) = self.on_complete.take() {
            callback(&self.fields);
        }
    }
}

impl fmt::Debug for SequentialParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequentialParser")
            .field("steps", &self.steps)
            .field("step", &self.step)
            .field("fields", &self.fields)
            .field("done", &self.done)
            .finish()
    }
}
