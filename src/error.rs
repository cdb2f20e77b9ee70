use thiserror::Error;

use crate::scan::TokenKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("invalid character {0:?}")]
    InvalidCharacter(char),
    #[error("invalid integer literal {0:?}")]
    InvalidInteger(String),
    #[error("syntax error: expected {expected}, found {found}")]
    SyntaxError {
        expected: &'static str,
        found: TokenKind,
    },
    #[error("division by zero")]
    DivisionByZero,
}
