//! Diagnostic records emitted during manifest parsing.
//!
//! The core never renders messages; it hands structured records with
//! source ranges to a sink owned by the caller. Rendering (colors,
//! line/column mapping) happens in the outer layers.

use crate::source::SourceRange;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// Supplementary message attached to a diagnostic, optionally anchored
/// to its own source range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub range: Option<SourceRange>,
    pub text: String,
}

impl Note {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            range: None,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn with_range(mut self, range: SourceRange) -> Self {
        self.range = Some(range);
        self
    }
}

/// A single diagnostic with its anchor range and optional notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub range: SourceRange,
    pub message: String,
    pub notes: Vec<Note>,
}

impl Diagnostic {
    /// Create a warning anchored at `range`.
    #[must_use]
    pub fn warning(range: SourceRange, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            range,
            message: message.into(),
            notes: Vec::new(),
        }
    }

    /// Create an error anchored at `range`.
    #[must_use]
    pub fn error(range: SourceRange, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            range,
            message: message.into(),
            notes: Vec::new(),
        }
    }

    /// Attach a note.
    #[must_use]
    pub fn with_note(mut self, note: Note) -> Self {
        self.notes.push(note);
        self
    }
}

/// Sink for diagnostics produced while reading a manifest.
///
/// Each caller supplies its own sink, so parsing can run from any
/// number of threads without shared state.
pub trait DiagnosticSink {
    fn add(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn add(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}
