use thiserror::Error;

/// A malformed sentence or clause line.
///
/// Surfaced to the caller of the operation that consumed the text; it aborts
/// only that unit's processing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// A character outside the sentence grammar.
    #[error("unexpected character `{0}`")]
    UnexpectedCharacter(char),
    /// The input ended while an operand or closing delimiter was expected.
    #[error("unexpected end of input")]
    UnexpectedEnd,
    /// A token that cannot appear at this position.
    #[error("unexpected `{0}`")]
    UnexpectedToken(String),
    /// A group opened with one delimiter kind was closed with the other.
    #[error("expected `{expected}`, found `{found}`")]
    MismatchedDelimiter {
        /// The closing delimiter that would match the opener.
        expected: char,
        /// What was actually found.
        found: String,
    },
    /// A clause-line literal that is not an identifier with an optional `-`.
    #[error("invalid literal `{0}`")]
    InvalidLiteral(String),
}

/// A rewrite pipeline produced a tree that is not a conjunction of
/// disjunctions of literals.
///
/// This is a defect in the normalizer itself, never a consequence of user
/// input; well-formed sentences cannot trigger it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// A conjunct contained a node other than OR, a variable, or a negated
    /// variable.
    #[error("conjunct is not a disjunction of literals (found {0} node)")]
    MalformedConjunct(&'static str),
    /// A negation survived with a non-atomic operand.
    #[error("negation was not pushed down to a variable (found negated {0})")]
    DanglingNegation(&'static str),
}

/// Any failure while building or querying a knowledge base.
#[derive(Debug, Error)]
pub enum Error {
    /// The sentence or clause line could not be parsed.
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    /// CNF conversion broke its own invariant.
    #[error("normalization error: {0}")]
    Normalize(#[from] NormalizeError),
    /// Reading a knowledge-base file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
