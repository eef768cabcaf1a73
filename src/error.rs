use crate::location::Location;
use crate::var::Var;
use thiserror::Error;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum SyntaxError {
    #[error("{1}: unexpected word '{0}', constant or variable expected")]
    ExpectedOperand(String, Location),
    #[error("{1}: expected ')' but found '{0}'")]
    ExpectedCloseParen(String, Location),
    #[error("{1}: integer expected after minus sign, found '{0}'")]
    ExpectedIntAfterMinus(String, Location),
    #[error("{1}: unable to parse statement '{0}', variable name or condition keyword expected")]
    UnexpectedStatement(String, Location),
    #[error("{1}: unexpected end of input, {0} expected")]
    UnexpectedEndOfInput(&'static str, Location),
}

impl SyntaxError {
    /// The word the parser could not reduce, if there was one.
    pub fn word(&self) -> Option<&str> {
        match self {
            SyntaxError::ExpectedOperand(word, _)
            | SyntaxError::ExpectedCloseParen(word, _)
            | SyntaxError::ExpectedIntAfterMinus(word, _)
            | SyntaxError::UnexpectedStatement(word, _) => Some(word),
            SyntaxError::UnexpectedEndOfInput(..) => None,
        }
    }

    pub fn location(&self) -> Location {
        match self {
            SyntaxError::ExpectedOperand(_, location)
            | SyntaxError::ExpectedCloseParen(_, location)
            | SyntaxError::ExpectedIntAfterMinus(_, location)
            | SyntaxError::UnexpectedStatement(_, location)
            | SyntaxError::UnexpectedEndOfInput(_, location) => *location,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum AnalysisError {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    /// The word after an assigned variable is not `=`.
    #[error("invariant violation: {location}: '=' expected after '{var}', found '{found}'")]
    InvariantViolation {
        var: Var,
        found: String,
        location: Location,
    },
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
