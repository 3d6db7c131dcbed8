use crate::token::{Token, TokenKind};

use thiserror::Error;

#[derive(Debug, PartialEq, Error)]
pub enum ParseError {
    #[error("unexpected end of input, expected {expected}")]
    PrematureEndOfInput { expected: Expected },
    #[error("expected {expected}, got {got}")]
    UnexpectedToken { expected: Expected, got: Token },
    #[error("invalid integer literal: {0}")]
    ParseIntError(#[from] std::num::ParseIntError),
    #[error("no prefix parse function for {0} found")]
    NoPrefixFunction(Token),
}

#[derive(Debug, PartialEq)]
pub enum Expected {
    Token(TokenKind),
    Identifier,
    Expression,
}

impl std::fmt::Display for Expected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "'{}'", kind),
            Expected::Identifier => write!(f, "an identifier"),
            Expected::Expression => write!(f, "an expression"),
        }
    }
}

impl ParseError {
    pub fn premature_end_expected_expression() -> Self {
        ParseError::PrematureEndOfInput {
            expected: Expected::Expression,
        }
    }

    pub fn unexpected_token(expected: TokenKind, got: Option<Token>) -> ParseError {
        match got {
            Some(got) => ParseError::UnexpectedToken {
                expected: Expected::Token(expected),
                got,
            },
            None => ParseError::PrematureEndOfInput {
                expected: Expected::Token(expected),
            },
        }
    }

    pub fn unexpected_other(expected: Expected, got: Option<Token>) -> ParseError {
        match got {
            Some(got) => ParseError::UnexpectedToken { expected, got },
            None => ParseError::PrematureEndOfInput { expected },
        }
    }
}
