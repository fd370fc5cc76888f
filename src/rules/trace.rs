//! Diagnostics sink injected into the rule processor.
//!
//! The processor reports rule activations and terminations through a
//! [`Trace`] given at construction. Nothing is reported unless a sink is
//! provided.

use std::fmt;

/// Receives debug messages from the rule processor.
///
/// Any `Fn(fmt::Arguments<'_>)` closure is a `Trace`.
pub trait Trace {
    /// Record one message.
    fn trace(&self, message: fmt::Arguments<'_>);
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTrace;

impl Trace for NoopTrace {
    fn trace(&self, _message: fmt::Arguments<'_>) {}
}

/// Forwards messages to `log::debug!` under the `pdf_rules::rules` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTrace;

impl Trace for LogTrace {
    fn trace(&self, message: fmt::Arguments<'_>) {
        log::debug!(target: "pdf_rules::rules", "{}", message);
    }
}

impl<F> Trace for F
where
    F: Fn(fmt::Arguments<'_>),
{
    fn trace(&self, message: fmt::Arguments<'_>) {
        self(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_closure_trace() {
        let lines = RefCell::new(Vec::new());
        let sink = |message: fmt::Arguments<'_>| lines.borrow_mut().push(message.to_string());
        sink.trace(format_args!("rule {} active", 2));
        NoopTrace.trace(format_args!("dropped"));
        assert_eq!(lines.into_inner(), vec!["rule 2 active".to_string()]);
    }
}
