//! Pull interface shared by the lexer passes
//!
//! Every pass exposes its output through [TokenIter] and consumes the pass before it
//! through the same trait. A pass owns its token buffer and diagnostics exclusively; the
//! only thing that flows between passes is what the trait hands out.
//!
//! The passes materialize their output eagerly into a [TokenBuffer]. Consumers cannot
//! tell the difference, since they only ever see `has_next/peek/next_token`.

use crate::mlg::diagnostics::Diagnostic;
use crate::mlg::token::{Token, TokenKind};

/// A cursor over a token stream.
pub trait TokenIter {
    fn has_next(&self) -> bool;

    /// Look `n` tokens ahead without consuming anything. `peek_nth(0)` is the next token.
    fn peek_nth(&self, n: usize) -> Option<&Token>;

    fn next_token(&mut self) -> Option<Token>;

    /// Diagnostics of this pass, preceded by those of every upstream pass.
    fn diagnostics(&self) -> &[Diagnostic];

    fn peek(&self) -> Option<&Token> {
        self.peek_nth(0)
    }

    /// Check whether the token `n` positions ahead is of the given kind
    fn peek_is(&self, n: usize, kind: TokenKind) -> bool {
        self.peek_nth(n).map_or(false, |token| token.kind == kind)
    }
}

/// A fully materialized token stream with a read cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenBuffer {
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
    index: usize,
}

impl TokenBuffer {
    pub fn new(tokens: Vec<Token>, diagnostics: Vec<Diagnostic>) -> Self {
        TokenBuffer {
            tokens,
            diagnostics,
            index: 0,
        }
    }

    /// Tokens not yet consumed
    pub fn remaining(&self) -> &[Token] {
        &self.tokens[self.index..]
    }

    /// Unconsumed tokens and all diagnostics
    pub fn into_parts(mut self) -> (Vec<Token>, Vec<Diagnostic>) {
        let tokens = self.tokens.split_off(self.index);
        (tokens, self.diagnostics)
    }
}

impl TokenIter for TokenBuffer {
    fn has_next(&self) -> bool {
        self.index < self.tokens.len()
    }

    fn peek_nth(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.index + n)
    }

    fn next_token(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.index).cloned();
        if token.is_some() {
            self.index += 1;
        }
        token
    }

    fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl Iterator for TokenBuffer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

/// Implements [TokenIter] for a pass struct by delegating to its `buffer` field.
macro_rules! delegate_token_iter {
    ($pass:ty) => {
        impl $crate::mlg::lexing::interface::TokenIter for $pass {
            fn has_next(&self) -> bool {
                $crate::mlg::lexing::interface::TokenIter::has_next(&self.buffer)
            }

            fn peek_nth(&self, n: usize) -> Option<&$crate::mlg::token::Token> {
                $crate::mlg::lexing::interface::TokenIter::peek_nth(&self.buffer, n)
            }

            fn next_token(&mut self) -> Option<$crate::mlg::token::Token> {
                $crate::mlg::lexing::interface::TokenIter::next_token(&mut self.buffer)
            }

            fn diagnostics(&self) -> &[$crate::mlg::diagnostics::Diagnostic] {
                $crate::mlg::lexing::interface::TokenIter::diagnostics(&self.buffer)
            }
        }

        impl $pass {
            pub fn into_buffer(self) -> $crate::mlg::lexing::interface::TokenBuffer {
                self.buffer
            }
        }
    };
}

pub(crate) use delegate_token_iter;
