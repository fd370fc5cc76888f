//! Routing of the item stream through an ordered rule list.

use super::trace::{NoopTrace, Trace};
use super::Rule;
use crate::item::Item;

/// Applies an ordered list of rules to a stream of items.
///
/// For every text item, pending rules are tested in declaration order and
/// the first match becomes the active rule; otherwise the item is given to
/// the active rule's accumulator. Markers and empty fragments are ignored.
/// The stream ends with [`Item::EndOfStream`], which terminates the active
/// accumulator.
pub struct RuleProcessor {
    rules: Vec<Rule>,
    active: Option<usize>,
    match_next: bool,
    finished: bool,
    trace: Box<dyn Trace>,
}

impl RuleProcessor {
    /// Create a processor over `rules`, tested in the given order.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self::with_trace(rules, NoopTrace)
    }

    /// Create a processor reporting activations to `trace`.
    pub fn with_trace(rules: Vec<Rule>, trace: impl Trace + 'static) -> Self {
        Self {
            rules,
            active: None,
            match_next: true,
            finished: false,
            trace: Box::new(trace),
        }
    }

    /// The rules, in declaration order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Index of the rule whose accumulator currently receives items.
    pub fn active_rule(&self) -> Option<usize> {
        self.active
    }

    /// Whether the end of the stream was reached.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Route one item.
    pub fn process_item(&mut self, item: &Item) {
        if self.finished {
            log::warn!("item received after end of stream, discarded: {:?}", item);
            return;
        }
        if item.is_end() {
            self.terminate_active();
            self.finished = true;
            self.trace.trace(format_args!("end of stream"));
            return;
        }
        let Some(text) = item.as_text() else {
            return;
        };

        if self.match_next {
            if let Some(index) = self.rules.iter().position(|rule| rule.matches(&text.text)) {
                self.terminate_active();
                let rule = &mut self.rules[index];
                rule.activate(text);
                self.match_next = !rule.skips_trigger();
                self.active = Some(index);
                self.trace.trace(format_args!(
                    "rule {} ({}) triggered by {:?}",
                    index,
                    rule.pattern(),
                    text.text
                ));
                return;
            }
        } else {
            self.match_next = true;
        }

        if let Some(index) = self.active {
            if self.rules[index].accumulate(text) {
                self.terminate_active();
            }
        }
    }

    /// Route every item of `items`, in order.
    pub fn process_all<I>(&mut self, items: I)
    where
        I: IntoIterator,
        I::Item: std::borrow::Borrow<Item>,
    {
        for item in items {
            self.process_item(std::borrow::Borrow::borrow(&item));
        }
    }

    fn terminate_active(&mut self) {
        if let Some(index) = self.active.take() {
            self.trace.trace(format_args!("rule {} terminated", index));
            self.rules[index].terminate();
        }
    }
}

impl std::fmt::Debug for RuleProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleProcessor")
            .field("rules", &self.rules)
            .field("active", &self.active)
            .field("match_next", &self.match_next)
            .field("finished", &self.finished)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{FileMarker, PageMarker, TextItem};
    use crate::rules::RuleOutput;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;

    type Outputs = Rc<RefCell<Vec<(&'static str, RuleOutput)>>>;

    fn text(value: &str) -> Item {
        Item::Text(TextItem::new(value, 0.0, 0.0))
    }

    fn recorder(outputs: &Outputs, tag: &'static str) -> impl FnMut(RuleOutput) + 'static {
        let outputs = Rc::clone(outputs);
        move |output| outputs.borrow_mut().push((tag, output))
    }

    #[test]
    fn test_end_to_end_scenario() {
        let outputs: Outputs = Rc::default();
        let rules = vec![
            Rule::on(r#"^Hello "(.*)"$"#)
                .unwrap()
                .extract_regexp_values()
                .then(recorder(&outputs, "hello")),
            Rule::on("^Value:")
                .unwrap()
                .parse_next_item_value()
                .then(recorder(&outputs, "value")),
        ];
        let mut processor = RuleProcessor::new(rules);
        processor.process_all(vec![
            Item::File(FileMarker::Path(PathBuf::from("doc.pdf"))),
            Item::Page(PageMarker {
                number: 1,
                width: 100.0,
                height: 100.0,
            }),
            text("Hello \"World\""),
            text("Value:"),
            text("42"),
            Item::EndOfStream,
        ]);

        assert!(processor.is_finished());
        assert_eq!(
            *outputs.borrow(),
            vec![
                ("hello", RuleOutput::Values(vec!["World".to_string()])),
                ("value", RuleOutput::Value(Some("42".to_string()))),
            ]
        );
    }

    #[test]
    fn test_next_value_ignores_later_items() {
        let outputs: Outputs = Rc::default();
        let rules = vec![Rule::on("^Value:")
            .unwrap()
            .parse_next_item_value()
            .then(recorder(&outputs, "value"))];
        let mut processor = RuleProcessor::new(rules);
        processor.process_all(&[text("Value:"), text("42"), text("43"), Item::EndOfStream]);

        assert_eq!(
            *outputs.borrow(),
            vec![("value", RuleOutput::Value(Some("42".to_string())))]
        );
        assert_eq!(processor.active_rule(), None);
    }

    #[test]
    fn test_first_declared_rule_wins() {
        let outputs: Outputs = Rc::default();
        let rules = vec![
            Rule::on("^Total")
                .unwrap()
                .accumulate_after_heading()
                .then(recorder(&outputs, "first")),
            Rule::on("^Total:")
                .unwrap()
                .accumulate_after_heading()
                .then(recorder(&outputs, "second")),
        ];
        let mut processor = RuleProcessor::new(rules);
        processor.process_all(&[text("Total: 3"), text("x"), Item::EndOfStream]);

        let outputs = outputs.borrow();
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].0, "first");
    }

    #[test]
    fn test_rules_are_one_shot() {
        let outputs: Outputs = Rc::default();
        let rules = vec![Rule::on("^Section$")
            .unwrap()
            .accumulate_after_heading()
            .then(recorder(&outputs, "section"))];
        let mut processor = RuleProcessor::new(rules);
        processor.process_all(&[
            text("Section"),
            text("a"),
            text("Section"),
            text("b"),
            Item::EndOfStream,
        ]);

        assert_eq!(
            *outputs.borrow(),
            vec![(
                "section",
                RuleOutput::List(vec!["a".to_string(), "Section".to_string(), "b".to_string()])
            )]
        );
    }

    #[test]
    fn test_activation_terminates_previous_rule() {
        let outputs: Outputs = Rc::default();
        let rules = vec![
            Rule::on("^A$")
                .unwrap()
                .accumulate_after_heading()
                .then(recorder(&outputs, "a")),
            Rule::on("^B$")
                .unwrap()
                .accumulate_after_heading()
                .then(recorder(&outputs, "b")),
        ];
        let mut processor = RuleProcessor::new(rules);
        processor.process_all(&[text("A"), text("1"), text("B")]);

        assert_eq!(outputs.borrow().len(), 1);
        assert_eq!(processor.active_rule(), Some(1));

        processor.process_item(&text("2"));
        processor.process_item(&Item::EndOfStream);
        assert_eq!(
            *outputs.borrow(),
            vec![
                ("a", RuleOutput::List(vec!["1".to_string()])),
                ("b", RuleOutput::List(vec!["2".to_string()])),
            ]
        );
    }

    #[test]
    fn test_after_rule_skips_trigger_and_next_match() {
        let outputs: Outputs = Rc::default();
        let rules = vec![
            Rule::after("^Notes$")
                .unwrap()
                .accumulate_after_heading()
                .then(recorder(&outputs, "notes")),
            Rule::on("^End$")
                .unwrap()
                .stop_accumulating()
                .then(recorder(&outputs, "end")),
        ];
        let mut processor = RuleProcessor::new(rules);
        // "End" right after the trigger is data, the second one matches
        processor.process_all(&[
            text("Notes"),
            text("End"),
            text("more"),
            text("End"),
            text("ignored"),
            Item::EndOfStream,
        ]);

        assert_eq!(
            *outputs.borrow(),
            vec![
                (
                    "notes",
                    RuleOutput::List(vec!["End".to_string(), "more".to_string()])
                ),
                ("end", RuleOutput::None),
            ]
        );
    }

    #[test]
    fn test_markers_and_empty_text_are_ignored() {
        let outputs: Outputs = Rc::default();
        let rules = vec![Rule::after("^Label$")
            .unwrap()
            .parse_next_item_value()
            .then(recorder(&outputs, "label"))];
        let mut processor = RuleProcessor::new(rules);
        processor.process_all(&[
            text("Label"),
            Item::Page(PageMarker {
                number: 2,
                width: 10.0,
                height: 10.0,
            }),
            text(""),
            text("value"),
            Item::EndOfStream,
        ]);

        assert_eq!(
            *outputs.borrow(),
            vec![("label", RuleOutput::Value(Some("value".to_string())))]
        );
    }

    #[test]
    fn test_unmatched_rule_never_calls_back() {
        let outputs: Outputs = Rc::default();
        let rules = vec![Rule::on("^never$")
            .unwrap()
            .accumulate_after_heading()
            .then(recorder(&outputs, "never"))];
        let mut processor = RuleProcessor::new(rules);
        processor.process_all(&[text("a"), text("b"), Item::EndOfStream]);
        assert!(outputs.borrow().is_empty());
    }

    #[test]
    fn test_end_of_stream_without_active_rule() {
        let mut processor = RuleProcessor::new(Vec::new());
        processor.process_item(&Item::EndOfStream);
        assert!(processor.is_finished());
        // discarded
        processor.process_item(&text("late"));
        assert!(processor.is_finished());
    }

    #[test]
    fn test_items_after_end_are_discarded() {
        let outputs: Outputs = Rc::default();
        let rules = vec![Rule::on("^late$")
            .unwrap()
            .stop_accumulating()
            .then(recorder(&outputs, "late"))];
        let mut processor = RuleProcessor::new(rules);
        processor.process_all(&[Item::EndOfStream, text("late"), Item::EndOfStream]);
        assert!(outputs.borrow().is_empty());
        assert!(!processor.rules()[0].is_consumed());
    }

    #[test]
    fn test_process_all_accepts_owned_and_borrowed_items() {
        let outputs: Outputs = Rc::default();
        let rules = vec![Rule::on("^Value:")
            .unwrap()
            .parse_next_item_value()
            .then(recorder(&outputs, "value"))];
        let mut processor = RuleProcessor::new(rules);

        let head = vec![text("Value:")];
        processor.process_all(head.iter());
        processor.process_all(vec![text("7"), Item::EndOfStream]);

        assert!(processor.is_finished());
        assert_eq!(
            *outputs.borrow(),
            vec![("value", RuleOutput::Value(Some("7".to_string())))]
        );
    }

    #[test]
    fn test_trace_reports_activation() {
        let lines = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&lines);
        let rules = vec![Rule::on("^x$").unwrap().stop_accumulating()];
        let mut processor = RuleProcessor::with_trace(rules, move |message: std::fmt::Arguments<'_>| {
            sink.borrow_mut().push(message.to_string())
        });
        processor.process_all(&[text("x"), Item::EndOfStream]);

        let lines = lines.borrow();
        assert_eq!(lines[0], "rule 0 (^x$) triggered by \"x\"");
        assert_eq!(lines[1], "rule 0 terminated");
        assert_eq!(lines[2], "end of stream");
    }
}
