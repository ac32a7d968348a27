//! Provides definition for diagnostics, which are normally errors and warnings
//! associated with translation.
//!
//! There exist crates that make this easy, but we need different information
//! for different integrations and there is no one crate that does it all
//! (especially one that works for both the engine and the command line).

use std::ops::Range;

use st2py_problems::Problem;

use crate::core::{FileId, SourceSpan};

/// A position marker that has both line and offset information.
#[derive(Debug)]
pub struct QualifiedPosition {
    /// Line (1-indexed)
    pub line: usize,

    /// Column (1-indexed)
    pub column: usize,

    /// Byte offset from start of string (0-indexed)
    pub offset: usize,
}

impl QualifiedPosition {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

/// A position marker that only has an offset in a file.
#[derive(Debug)]
pub struct OffsetRange {
    /// Byte offset from start of string (0-indexed)
    pub start: usize,
    /// Byte offset from end of string (0-indexed)
    pub end: usize,
}

#[derive(Debug)]
pub enum Location {
    QualifiedPosition(QualifiedPosition),
    OffsetRange(OffsetRange),
}

/// A label that refers to some range in a file and possibly associated
/// with a message related to that range.
///
/// Normally this indicates the location of an error or warning along with a
/// text message describing that position.
#[derive(Debug)]
pub struct Label {
    /// The position of label.
    pub location: Location,

    /// Identifier for the file.
    pub file_id: FileId,

    /// A message describing this label.
    pub message: String,
}

impl Label {
    pub fn qualified(
        file_id: impl Into<FileId>,
        position: QualifiedPosition,
        message: impl Into<String>,
    ) -> Self {
        Self {
            location: Location::QualifiedPosition(position),
            file_id: file_id.into(),
            message: message.into(),
        }
    }

    pub fn offset(
        file_id: impl Into<FileId>,
        offset: impl Into<Range<usize>>,
        message: impl Into<String>,
    ) -> Self {
        let range = offset.into();
        Self {
            location: Location::OffsetRange(OffsetRange {
                start: range.start,
                end: range.end,
            }),
            file_id: file_id.into(),
            message: message.into(),
        }
    }

    pub fn span(span: SourceSpan, message: impl Into<String>) -> Self {
        Self {
            location: Location::OffsetRange(OffsetRange {
                start: span.start,
                end: span.end,
            }),
            file_id: span.file_id,
            message: message.into(),
        }
    }

    /// A "position" that is a file in its entirety rather than a particular
    /// line number.
    pub fn file(file_id: impl Into<FileId>, message: impl Into<String>) -> Self {
        Self {
            location: Location::QualifiedPosition(QualifiedPosition {
                column: 0,
                line: 0,
                offset: 0,
            }),
            file_id: file_id.into(),
            message: message.into(),
        }
    }
}

/// A diagnostic. Diagnostics have a code that is indicative of the category,
/// a primary location and possibly non-zero set of secondary locations.
#[derive(Debug)]
pub struct Diagnostic {
    /// A normally unique value describing the type of diagnostic.
    pub code: String,

    description: String,

    /// The primary or first diagnostic.
    pub primary: Label,

    /// Additional descriptions to the constant description.
    pub described: Vec<String>,

    /// Additional information about the diagnostic.
    pub secondary: Vec<Label>,
}

impl Diagnostic {
    /// Creates a diagnostic from the problem code and with the specified label.
    ///
    /// The label associates the problem to a particular instance in the
    /// structured text source.
    pub fn problem(problem: Problem, primary: Label) -> Self {
        Self {
            code: problem.code().to_string(),
            description: problem.message().to_string(),
            primary,
            described: vec![],
            secondary: vec![],
        }
    }

    /// Adds to the problem description (primary text) additional context
    /// about the problem.
    ///
    /// This is similar to adding primary and secondary items except that this
    /// forms part of the main description and does not need to be related to
    /// a position in a source file.
    pub fn with_context(mut self, description: &str, item: &str) -> Self {
        self.described.push(format!("{}={}", description, item));
        self
    }

    pub fn with_secondary(mut self, label: Label) -> Self {
        self.secondary.push(label);
        self
    }

    /// Returns the description for the diagnostic. This may add in other
    /// data in addition that is part of the diagnostic.
    pub fn description(&self) -> String {
        if self.described.is_empty() {
            self.description.clone()
        } else {
            format!("{} ({})", self.description, self.described.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn problem_when_empty_input_then_has_code_and_message() {
        let diagnostic = Diagnostic::problem(
            Problem::EmptyInput,
            Label::file(FileId::default(), "input was empty"),
        );
        assert_eq!("P0001", diagnostic.code);
        assert!(!diagnostic.description().is_empty());
    }

    #[test]
    fn description_when_context_then_appends_context() {
        let diagnostic = Diagnostic::problem(
            Problem::UnclosedFor,
            Label::offset(FileId::default(), 0..3, "expected END_FOR"),
        )
        .with_context("keyword", "FOR");
        assert!(diagnostic.description().contains("keyword=FOR"));
    }
}
