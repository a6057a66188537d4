//! A single diagnostic value and the three-bucket result of a validation run.

use crate::code::{DiagnosticCode, Severity};
use gdscript_position::{ByteSpan, LineCol};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One diagnostic produced by a validation pass.
///
/// Diagnostics are plain values, never exceptions: a pass that finds a
/// problem records one and keeps walking the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Diagnostic {
    /// Severity of this diagnostic.
    pub severity: Severity,
    /// Stable code identifying the kind of problem.
    pub code: DiagnosticCode,
    /// Human-readable message.
    pub message: String,
    /// Byte span the diagnostic refers to.
    pub span: ByteSpan,
    /// 1-based line / 0-based column of `span.start`.
    pub position: LineCol,
}

impl Diagnostic {
    /// Construct a diagnostic using the code's default severity.
    pub fn new(code: DiagnosticCode, message: impl Into<String>, span: ByteSpan, position: LineCol) -> Self {
        Diagnostic { severity: code.default_severity(), code, message: message.into(), span, position }
    }

    /// Construct a diagnostic with an explicit severity override.
    pub fn with_severity(
        severity: Severity,
        code: DiagnosticCode,
        message: impl Into<String>,
        span: ByteSpan,
        position: LineCol,
    ) -> Self {
        Diagnostic { severity, code, message: message.into(), span, position }
    }

    /// Sort key used to order diagnostics within one file: (start line,
    /// start column, code).
    fn sort_key(&self) -> (u32, u32, &'static str) {
        (self.position.line, self.position.column, self.code.as_str())
    }
}

impl fmt::Display for Diagnostic {
    /// `severity code: message (line:col)`, e.g.
    /// `warning GD5001: 'break' outside loop (12:3)`. See DESIGN.md for
    /// why this format was chosen over the alternate bracketed form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {} ({})", self.severity, self.code, self.message, self.position)
    }
}

/// Result of a validation run: diagnostics bucketed by severity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiagnosticList {
    /// Error-severity diagnostics, ordered by (line, column, code).
    pub errors: Vec<Diagnostic>,
    /// Warning-severity diagnostics, ordered by (line, column, code).
    pub warnings: Vec<Diagnostic>,
    /// Hint-severity diagnostics, ordered by (line, column, code).
    pub hints: Vec<Diagnostic>,
}

impl DiagnosticList {
    /// Empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// File one diagnostic into the correct bucket.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.errors.push(diagnostic),
            Severity::Warning => self.warnings.push(diagnostic),
            Severity::Hint => self.hints.push(diagnostic),
        }
    }

    /// Merge another result's diagnostics into this one (used when
    /// joining per-file results from parallel analysis).
    pub fn extend(&mut self, other: DiagnosticList) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.hints.extend(other.hints);
    }

    /// Sort every bucket by (start line, start column, code).
    pub fn sort(&mut self) {
        self.errors.sort_by_key(Diagnostic::sort_key);
        self.warnings.sort_by_key(Diagnostic::sort_key);
        self.hints.sort_by_key(Diagnostic::sort_key);
    }

    /// Total count across all three buckets.
    pub fn len(&self) -> usize {
        self.errors.len() + self.warnings.len() + self.hints.len()
    }

    /// True when no diagnostics were recorded in any bucket.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty() && self.hints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diag(line: u32, col: u32, code: DiagnosticCode) -> Diagnostic {
        Diagnostic::new(code, "msg", ByteSpan::empty(0), LineCol::new(line, col))
    }

    #[test]
    fn wire_format_matches_documented_example() {
        let d = Diagnostic::new(
            DiagnosticCode::BreakOutsideLoop,
            "'break' outside loop",
            ByteSpan::empty(0),
            LineCol::new(12, 3),
        );
        assert_eq!(d.to_string(), "warning GD5001: 'break' outside loop (12:3)");
    }

    #[test]
    fn push_buckets_by_severity() {
        let mut list = DiagnosticList::new();
        list.push(diag(1, 0, DiagnosticCode::InvalidToken));
        list.push(diag(2, 0, DiagnosticCode::VariableUsedBeforeDeclaration));
        assert_eq!(list.errors.len(), 1);
        assert_eq!(list.warnings.len(), 1);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn sort_orders_by_line_then_column_then_code() {
        let mut list = DiagnosticList::new();
        list.push(diag(5, 2, DiagnosticCode::InvalidToken));
        list.push(diag(1, 9, DiagnosticCode::InvalidToken));
        list.push(diag(1, 1, DiagnosticCode::InvalidToken));
        list.sort();
        let lines: Vec<u32> = list.errors.iter().map(|d| d.position.line).collect();
        assert_eq!(lines, vec![1, 1, 5]);
    }
}
