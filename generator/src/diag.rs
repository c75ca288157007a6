// Licensed under the Apache-2.0 license

//! Structured compiler diagnostics.
//!
//! The compiler never prints: every accepted row, skipped register, and
//! non-fatal validation finding is recorded as a [`Diagnostic`] and returned
//! to the caller. The presentation layer (console, log file) decides how to
//! surface them. Fatal failures are not diagnostics; they travel as
//! `anyhow::Error` and abort the run before any artifact is written.

/// How serious a diagnostic is.
///
/// There is deliberately no `Error` severity: anything fatal aborts
/// compilation through the `Result` channel instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// Progress reporting, e.g. the one-line summary per accepted register.
    Info,
    /// A tolerated problem the user should see, e.g. `Min >= Max`.
    Warning,
}

/// One diagnostic record.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

/// Ordered collector for diagnostics produced during one compilation run.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    records: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.records.push(Diagnostic {
            severity: Severity::Info,
            message: message.into(),
        });
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.records.push(Diagnostic {
            severity: Severity::Warning,
            message: message.into(),
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.records.iter()
    }

    pub fn warning_count(&self) -> usize {
        self.records
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_preserve_order() {
        let mut diags = Diagnostics::new();
        diags.info("first");
        diags.warning("second");
        diags.info("third");
        let messages: Vec<_> = diags.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, ["first", "second", "third"]);
        assert_eq!(diags.warning_count(), 1);
    }
}
