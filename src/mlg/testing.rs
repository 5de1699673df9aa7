//! Testing utilities
//!
//!     Helpers shared by the unit tests of the lexer passes and by the integration tests
//!     under tests/. Token streams are compared by kind or by text here, and as rendered
//!     streams through [crate::mlg::formats::to_simple_str].

pub mod factories {
    use crate::mlg::token::{Position, Token, TokenKind};

    /// Build a token on the first line at `offset`.
    pub fn mk_token(kind: TokenKind, text: &str, offset: usize) -> Token {
        Token::new(kind, text, Position::new(offset, 0, offset))
    }

    pub fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|token| token.kind).collect()
    }

    pub fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|token| token.text.as_str()).collect()
    }
}
