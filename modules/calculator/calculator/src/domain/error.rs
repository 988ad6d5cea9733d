use thiserror::Error;

use super::expr::EvalError;

/// Errors a calculation request can fail with.
///
/// Store failures are deliberately absent: they are logged by the history
/// store and never surface to callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Expression contains disallowed characters: {characters:?}")]
    DisallowedCharacters { characters: Vec<char> },

    #[error("Expression could not be evaluated: {0}")]
    Evaluation(#[from] EvalError),
}

impl DomainError {
    #[must_use]
    pub fn disallowed(characters: Vec<char>) -> Self {
        Self::DisallowedCharacters { characters }
    }
}
