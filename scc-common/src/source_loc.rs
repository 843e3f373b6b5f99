//! Source location tracking for error reporting
//!
//! Every AST node carries a span so that errors raised deep inside the
//! lowering engine can still point at the offending source text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A location in a source file (line and column are 1-based)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub filename: String,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    /// Create a location with filename
    pub fn new(filename: &str, line: u32, column: u32) -> Self {
        Self {
            filename: filename.to_string(),
            line,
            column,
        }
    }

    /// Create a location with just line and column (common pattern in tests)
    pub fn new_simple(line: u32, column: u32) -> Self {
        Self::new("<input>", line, column)
    }

    /// Create a dummy location for testing
    pub fn dummy() -> Self {
        Self::new("<unknown>", 0, 0)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.column)
    }
}

/// A span in a source file (from start to end location)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpan {
    pub start: SourceLocation,
    pub end: SourceLocation,
}

impl SourceSpan {
    pub fn new(start: SourceLocation, end: SourceLocation) -> Self {
        Self { start, end }
    }

    /// Create a span covering a single location
    pub fn from_location(location: SourceLocation) -> Self {
        Self {
            end: location.clone(),
            start: location,
        }
    }

    /// Create a dummy span for testing
    pub fn dummy() -> Self {
        Self::from_location(SourceLocation::dummy())
    }

    /// Check if this span is in the same file as another
    pub fn same_file(&self, other: &SourceSpan) -> bool {
        self.start.filename == other.start.filename
    }

    /// Extend this span to cover another span as well
    pub fn extend(&self, other: &SourceSpan) -> SourceSpan {
        if !self.same_file(other) {
            return self.clone();
        }

        let self_start = (self.start.line, self.start.column);
        let other_start = (other.start.line, other.start.column);
        let start = if self_start <= other_start {
            self.start.clone()
        } else {
            other.start.clone()
        };

        let self_end = (self.end.line, self.end.column);
        let other_end = (other.end.line, other.end.column);
        let end = if self_end >= other_end {
            self.end.clone()
        } else {
            other.end.clone()
        };

        SourceSpan::new(start, end)
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.filename != self.end.filename {
            write!(f, "{} to {}", self.start, self.end)
        } else if self.start.line == self.end.line {
            if self.start.column == self.end.column {
                write!(f, "{}:{}", self.start.filename, self.start.line)
            } else {
                write!(
                    f,
                    "{}:{}:{}-{}",
                    self.start.filename, self.start.line, self.start.column, self.end.column
                )
            }
        } else {
            write!(
                f,
                "{}:{}:{}-{}:{}",
                self.start.filename, self.start.line, self.start.column, self.end.line, self.end.column
            )
        }
    }
}

/// Trait for types that have a source location
pub trait HasSpan {
    fn span(&self) -> SourceSpan;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_location_display() {
        let loc = SourceLocation::new("main.c", 12, 7);
        assert_eq!(loc.line, 12);
        assert_eq!(loc.column, 7);
        assert_eq!(format!("{}", loc), "main.c:12:7");
    }

    #[test]
    fn test_span_display_same_line() {
        let span = SourceSpan::new(
            SourceLocation::new("main.c", 3, 4),
            SourceLocation::new("main.c", 3, 9),
        );
        assert_eq!(format!("{}", span), "main.c:3:4-9");
    }

    #[test]
    fn test_span_display_multiline() {
        let span = SourceSpan::new(
            SourceLocation::new("main.c", 3, 4),
            SourceLocation::new("main.c", 5, 2),
        );
        assert_eq!(format!("{}", span), "main.c:3:4-5:2");
    }

    #[test]
    fn test_span_from_location() {
        let span = SourceSpan::from_location(SourceLocation::new("main.c", 8, 1));
        assert_eq!(span.start, span.end);
        assert_eq!(format!("{}", span), "main.c:8");
    }

    #[test]
    fn test_span_extend() {
        let first = SourceSpan::new(
            SourceLocation::new("main.c", 2, 5),
            SourceLocation::new("main.c", 2, 10),
        );
        let second = SourceSpan::new(
            SourceLocation::new("main.c", 2, 8),
            SourceLocation::new("main.c", 4, 3),
        );

        let extended = first.extend(&second);
        assert_eq!(extended.start.line, 2);
        assert_eq!(extended.start.column, 5);
        assert_eq!(extended.end.line, 4);
        assert_eq!(extended.end.column, 3);
    }

    #[test]
    fn test_span_extend_other_file() {
        let first = SourceSpan::from_location(SourceLocation::new("a.c", 1, 1));
        let second = SourceSpan::from_location(SourceLocation::new("b.c", 9, 9));
        assert_eq!(first.extend(&second), first);
    }
}
