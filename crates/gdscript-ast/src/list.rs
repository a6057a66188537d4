//! Classification of the generic list node. Lists are first-class nodes
//! that interleave separator tokens with items so the printer can
//! reproduce the original layout.

/// What a `NodeKind::List` is a list *of*. Purely descriptive — the
/// separator tokens inside the list already carry their own kind
/// (`TokenKind::Comma`, `TokenKind::Newline`, `TokenKind::Colon`, ...);
/// this tag exists so semantic passes can tell a parameter list from a
/// class body without re-deriving it from context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// Top-level members of a class or inner class body.
    ClassBody,
    /// Parameters of a method, lambda, or signal declaration.
    Parameters,
    /// Arguments of a call expression.
    Arguments,
    /// Statements inside a block (method body, loop body, branch body).
    Statements,
    /// Elements of an array literal.
    ArrayElements,
    /// Entries of a dictionary literal.
    DictEntries,
    /// Values of an enum declaration.
    EnumValues,
    /// `elif` clauses attached to an `if` statement.
    ElifClauses,
    /// `match` cases attached to a `match` statement.
    MatchCases,
    /// Patterns of a single `match` case (comma-separated alternatives).
    MatchPatterns,
    /// Annotations attached to the following declaration.
    Annotations,
}
