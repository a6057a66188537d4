//! Stable `GDxxxx` diagnostic codes and their default severities.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Severity {
    /// A defect the caller should treat as a hard problem, though the
    /// parser never refuses to produce a tree over it.
    Error,
    /// A likely defect that doesn't block further analysis.
    Warning,
    /// A stylistic or informational observation.
    Hint,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Hint => write!(f, "hint"),
        }
    }
}

/// A stable diagnostic code.
///
/// `as_str` returns the externally-referenced `GDxxxx` string; this is
/// part of the crate's external contract and variants are never
/// renumbered once published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DiagnosticCode {
    // ---- Syntax pass: 1000-1999 ----
    /// An invalid-token recovery slot was populated.
    InvalidToken,

    // ---- Scope pass: 2000-2999 (declaration collector + scope pass) ----
    /// A name was declared twice in the same scope.
    DuplicateDeclaration,
    /// An identifier used as a variable could not be resolved.
    UndefinedVariable,
    /// An identifier used as a call target could not be resolved.
    UndefinedFunction,
    /// A local variable was referenced before its declaration.
    VariableUsedBeforeDeclaration,

    // ---- Type pass: 3000-3999 ----
    /// The inferred type of an expression does not match an expected type.
    TypeMismatch,
    /// An operator was applied to an operand of an incompatible type.
    InvalidOperandType,
    /// An assignment's right-hand side is incompatible with the left-hand side.
    InvalidAssignment,

    // ---- Call pass: 4000-4999 ----
    /// A call supplied the wrong number of arguments for the target signature.
    WrongArgumentCount,
    /// A call named a method that does not exist on the resolved receiver type.
    MethodNotFound,
    /// A call target resolved to a non-callable value.
    NotCallable,

    // ---- Control-flow pass: 5000-5999 ----
    /// `break` used outside a loop scope.
    BreakOutsideLoop,
    /// `continue` used outside a loop scope.
    ContinueOutsideLoop,
    /// `return` used outside a method or lambda scope.
    ReturnOutsideFunction,
    /// `await` used outside a function scope.
    AwaitOutsideFunction,
    /// `yield` used outside a function scope.
    YieldOutsideFunction,
    /// `super` used outside a method.
    SuperOutsideMethod,
    /// An assignment targeted a symbol of kind `constant`.
    ConstantReassignment,

    // ---- Indentation pass: 6000-6999 ----
    /// A single block mixed tabs and spaces.
    InconsistentIndentation,
    /// A dedent landed on a column matching no enclosing block.
    IndentationMismatch,
}

impl DiagnosticCode {
    /// The stable `GDxxxx` string for this code.
    pub const fn as_str(self) -> &'static str {
        match self {
            DiagnosticCode::InvalidToken => "GD1000",

            DiagnosticCode::DuplicateDeclaration => "GD2001",
            DiagnosticCode::UndefinedVariable => "GD2002",
            DiagnosticCode::UndefinedFunction => "GD2003",
            DiagnosticCode::VariableUsedBeforeDeclaration => "GD2004",

            DiagnosticCode::TypeMismatch => "GD3001",
            DiagnosticCode::InvalidOperandType => "GD3002",
            DiagnosticCode::InvalidAssignment => "GD3003",

            DiagnosticCode::WrongArgumentCount => "GD4001",
            DiagnosticCode::MethodNotFound => "GD4002",
            DiagnosticCode::NotCallable => "GD4003",

            DiagnosticCode::BreakOutsideLoop => "GD5001",
            DiagnosticCode::ContinueOutsideLoop => "GD5002",
            DiagnosticCode::ReturnOutsideFunction => "GD5003",
            DiagnosticCode::AwaitOutsideFunction => "GD5004",
            DiagnosticCode::YieldOutsideFunction => "GD5005",
            DiagnosticCode::SuperOutsideMethod => "GD5006",
            DiagnosticCode::ConstantReassignment => "GD5007",

            DiagnosticCode::InconsistentIndentation => "GD6001",
            DiagnosticCode::IndentationMismatch => "GD6002",
        }
    }

    /// Default severity for this code; individual passes may downgrade
    /// hints but never upgrade a warning-class code to error or vice versa.
    pub const fn default_severity(self) -> Severity {
        match self {
            DiagnosticCode::InvalidToken
            | DiagnosticCode::DuplicateDeclaration
            | DiagnosticCode::UndefinedVariable
            | DiagnosticCode::UndefinedFunction
            | DiagnosticCode::TypeMismatch
            | DiagnosticCode::InvalidAssignment
            | DiagnosticCode::WrongArgumentCount
            | DiagnosticCode::MethodNotFound
            | DiagnosticCode::NotCallable
            | DiagnosticCode::ConstantReassignment
            | DiagnosticCode::IndentationMismatch => Severity::Error,

            DiagnosticCode::VariableUsedBeforeDeclaration
            | DiagnosticCode::InvalidOperandType
            | DiagnosticCode::BreakOutsideLoop
            | DiagnosticCode::ContinueOutsideLoop
            | DiagnosticCode::ReturnOutsideFunction
            | DiagnosticCode::AwaitOutsideFunction
            | DiagnosticCode::YieldOutsideFunction
            | DiagnosticCode::SuperOutsideMethod
            | DiagnosticCode::InconsistentIndentation => Severity::Warning,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric(c: DiagnosticCode) -> u32 {
        c.as_str()[2..].parse().unwrap_or(0)
    }

    #[test]
    fn codes_fall_in_their_documented_ranges() {
        assert!((1000..2000).contains(&numeric(DiagnosticCode::InvalidToken)));
        assert!((2000..3000).contains(&numeric(DiagnosticCode::DuplicateDeclaration)));
        assert!((3000..4000).contains(&numeric(DiagnosticCode::TypeMismatch)));
        assert!((4000..5000).contains(&numeric(DiagnosticCode::WrongArgumentCount)));
        assert!((5000..6000).contains(&numeric(DiagnosticCode::BreakOutsideLoop)));
        assert!((6000..7000).contains(&numeric(DiagnosticCode::InconsistentIndentation)));
    }

    #[test]
    fn break_outside_loop_has_documented_code() {
        assert_eq!(DiagnosticCode::BreakOutsideLoop.as_str(), "GD5001");
    }
}
