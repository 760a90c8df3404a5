//! Plain-data snapshots copied out of a parse: locations, extents,
//! diagnostics and completion candidates. None of these borrow the unit.

use crate::kind::CursorKind;

/// A resolved source position. `line` and `column` are 1-based, `offset` is
/// the 0-based byte offset into `file`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
    pub offset: u32,
    /// Path of the file as the front-end names it; empty when unknown
    pub file: String,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: u32, column: u32, offset: u32) -> Self {
        Self {
            line,
            column,
            offset,
            file: file.into(),
        }
    }
}

/// A `[start, end)` source range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Extent {
    pub start: SourceLocation,
    pub end: SourceLocation,
}

impl Extent {
    pub fn new(start: SourceLocation, end: SourceLocation) -> Self {
        Self { start, end }
    }

    /// Whether the 1-based `(line, column)` falls inside this range.
    pub fn contains(&self, line: u32, column: u32) -> bool {
        let pos = (line, column);
        (self.start.line, self.start.column) <= pos && pos < (self.end.line, self.end.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Ignored,
    Note,
    Warning,
    Error,
    Fatal,
}

impl Severity {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            1 => Severity::Note,
            2 => Severity::Warning,
            3 => Severity::Error,
            4 => Severity::Fatal,
            _ => Severity::Ignored,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Ignored => "ignored",
            Severity::Note => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }
}

/// A suggested replacement attached to a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixIt {
    pub replacement: String,
    pub range: Option<Extent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub location: Option<SourceLocation>,
    pub fixits: Vec<FixIt>,
}

/// One code-completion result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionCandidate {
    /// Text the user types to select this candidate
    pub typed_text: String,
    /// Full rendering with placeholders, without the result type
    pub display: String,
    /// Result type chunk, empty when there is none
    pub result_type: String,
    pub kind: CursorKind,
    pub brief: Option<String>,
    /// Lower is better
    pub priority: u32,
}
