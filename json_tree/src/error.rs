use thiserror::Error;

use crate::token::TokenKind;

/// Failure raised while scanning or parsing, pointing at the offending lexeme.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} on line {line} at '{lexeme}'")]
pub struct Error {
    pub kind: ErrorKind,
    pub line: usize,
    pub lexeme: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErrorKind {
    // Scanner specific errors
    #[error("found unexpected symbol '{0}'")]
    UnexpectedSymbol(char),
    #[error("unterminated string")]
    UnterminatedString,

    // Parser specific errors
    #[error("not an integer or float")]
    InvalidNumber,
    #[error("leading zero in number")]
    LeadingZero,
    #[error("trailing comma")]
    TrailingComma,
    #[error("expected ',' to separate elements")]
    MissingSeparator,
    #[error("unexpected token")]
    UnexpectedToken,
    #[error("{message} (expected {expected})")]
    ExpectedToken {
        expected: TokenKind,
        message: &'static str,
    },
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("invalid escape sequence")]
    InvalidEscape,
    #[error("nesting too deep")]
    NestingTooDeep,
}

/// Failure raised when converting a parsed value into a Rust type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertErr {
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("{value} is out of range for {target}")]
    OutOfRange { target: &'static str, value: i64 },
    #[error("missing field '{0}'")]
    MissingField(&'static str),
    #[error("in entry '{key}': {source}")]
    Entry {
        key: String,
        source: Box<ConvertErr>,
    },
    #[error("in field '{name}': {source}")]
    Field {
        name: &'static str,
        source: Box<ConvertErr>,
    },
}
