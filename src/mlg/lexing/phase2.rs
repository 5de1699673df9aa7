//! Phase 2: indentation resolution
//!
//!     Converts the literal Space/DotSpace/Newline runs of phase 1 into Indent, UnIndent
//!     and LineBreak tokens. All other tokens pass through unchanged.
//!
//!     This transformation is a stateful machine that tracks the indent level of the
//!     previous line and emits one Indent or UnIndent per level of difference:
//!
//!     - A run of n Space tokens is level n / 2. Odd runs are reported. If the run is
//!       followed by a DotSpace, the dot counts as one more level and is re-emitted after
//!       the indentation tokens.
//!     - A DotSpace with no Space run in front of it is level 1.
//!     - A Newline is re-emitted. Further newlines right after it collapse into a single
//!       LineBreak. If the next line does not start with a Space or a DotSpace, the level
//!       drops back to 0 immediately.
//!
//!     At end of stream the level drops back to 0, so Indent and UnIndent always balance.

use crate::mlg::diagnostics::{Diagnostic, Origin};
use crate::mlg::lexing::interface::{delegate_token_iter, TokenBuffer, TokenIter};
use crate::mlg::token::{Position, Token, TokenKind};

/// The phase 2 pass, consuming phase 1
pub struct Phase2Lexer {
    buffer: TokenBuffer,
}

impl Phase2Lexer {
    pub fn new<I: TokenIter>(mut upstream: I, path: &str) -> Self {
        let mut resolver = IndentationResolver {
            input: &mut upstream,
            path,
            tokens: Vec::new(),
            diagnostics: Vec::new(),
            previous_level: 0,
        };
        resolver.run();
        let IndentationResolver {
            tokens,
            diagnostics: own,
            ..
        } = resolver;

        let mut diagnostics = upstream.diagnostics().to_vec();
        diagnostics.extend(own);

        tracing::debug!(
            path,
            tokens = tokens.len(),
            diagnostics = diagnostics.len(),
            "phase2 complete"
        );

        Phase2Lexer {
            buffer: TokenBuffer::new(tokens, diagnostics),
        }
    }
}

delegate_token_iter!(Phase2Lexer);

struct IndentationResolver<'a, I: TokenIter> {
    input: &'a mut I,
    path: &'a str,
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
    previous_level: usize,
}

impl<'a, I: TokenIter> IndentationResolver<'a, I> {
    fn run(&mut self) {
        let mut last_position = Position::default();
        while let Some(token) = self.input.next_token() {
            last_position = token.position;
            match token.kind {
                TokenKind::Newline => self.newline(token),
                TokenKind::Space => self.spaces(token),
                TokenKind::DotSpace => {
                    self.change_level(1, token.position);
                    self.tokens.push(token);
                }
                _ => self.tokens.push(token),
            }
        }
        self.change_level(0, last_position);
    }

    fn newline(&mut self, newline: Token) {
        let position = newline.position;
        self.tokens.push(newline);

        if self.input.peek_is(0, TokenKind::Newline) {
            let blank = self.input.next_token().map_or(position, |t| t.position);
            while self.input.peek_is(0, TokenKind::Newline) {
                self.input.next_token();
            }
            self.tokens
                .push(Token::synthetic(TokenKind::LineBreak, blank));
        }

        let continues = self.input.peek_is(0, TokenKind::Space)
            || self.input.peek_is(0, TokenKind::DotSpace);
        if !continues {
            let at = self.input.peek().map_or(position, |t| t.position);
            self.change_level(0, at);
        }
    }

    fn spaces(&mut self, first: Token) {
        let mut count = 1;
        while self.input.peek_is(0, TokenKind::Space) {
            self.input.next_token();
            count += 1;
        }

        if count % 2 != 0 {
            let diagnostic = Diagnostic::error(
                Origin::Phase2,
                format!("expected an even indent but found {}", count),
                first.position,
                self.path,
            );
            tracing::trace!(%diagnostic, "phase2 diagnostic");
            self.diagnostics.push(diagnostic);
        }

        let mut level = count / 2;
        if self.input.peek_is(0, TokenKind::DotSpace) {
            level += 1;
            self.change_level(level, first.position);
            if let Some(dot_space) = self.input.next_token() {
                self.tokens.push(dot_space);
            }
        } else {
            self.change_level(level, first.position);
        }
    }

    /// Emit the Indent or UnIndent tokens that move the previous level to `level`.
    fn change_level(&mut self, level: usize, position: Position) {
        let kind = if level > self.previous_level {
            TokenKind::Indent
        } else {
            TokenKind::UnIndent
        };
        let delta = level.abs_diff(self.previous_level);
        for _ in 0..delta {
            self.tokens.push(Token::synthetic(kind, position));
        }
        self.previous_level = level;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mlg::lexing::prepare_source;
    use crate::mlg::lexing::Phase1Lexer;
    use crate::mlg::formats::to_simple_str;
    use crate::mlg::testing::factories::{kinds, mk_token};

    fn lex(text: &str) -> TokenBuffer {
        let prepared = prepare_source(text, 3);
        Phase2Lexer::new(Phase1Lexer::new(&prepared, "test.mlg"), "test.mlg").into_buffer()
    }

    #[test]
    fn test_nested_sections() {
        let buffer = lex("\na:\n. b:\n  . c:\nd:\n");
        assert!(buffer.diagnostics().is_empty());
        assert_eq!(
            to_simple_str(buffer.remaining()),
            "<Newline> a : <Newline> <Indent> <DotSpace> b : <Newline> <Indent> <DotSpace> c : \
             <Newline> <UnIndent> <UnIndent> d : <Newline> <LineBreak>"
        );
    }

    #[test]
    fn test_sibling_dot_spaces_keep_level() {
        let buffer = lex("a:\n. b\n. c\n");
        assert_eq!(
            to_simple_str(buffer.remaining()),
            "a : <Newline> <Indent> <DotSpace> b <Newline> <DotSpace> c <Newline> <LineBreak> <UnIndent>"
        );
    }

    #[test]
    fn test_odd_indent_is_reported_once() {
        let buffer = lex("a:\n. b:\n   . c\n");
        assert_eq!(buffer.diagnostics().len(), 1);
        assert_eq!(
            buffer.diagnostics()[0].message,
            "expected an even indent but found 3"
        );
        assert_eq!(buffer.diagnostics()[0].origin, Origin::Phase2);
        assert_eq!(buffer.diagnostics()[0].position.row, 2);
    }

    #[test]
    fn test_blank_line_collapses_newlines() {
        let buffer = lex("a:\n\n\n\nb:\n");
        assert_eq!(
            kinds(buffer.remaining()),
            vec![
                TokenKind::Name,
                TokenKind::Colon,
                TokenKind::Newline,
                TokenKind::LineBreak,
                TokenKind::Name,
                TokenKind::Colon,
                TokenKind::Newline,
                TokenKind::LineBreak,
            ]
        );
    }

    #[test]
    fn test_indented_line_after_blank_line_keeps_level() {
        let buffer = lex("a:\n. b\n\n  . c\n");
        assert_eq!(
            to_simple_str(buffer.remaining()),
            "a : <Newline> <Indent> <DotSpace> b <Newline> <LineBreak> <Indent> <DotSpace> c \
             <Newline> <LineBreak> <UnIndent> <UnIndent>"
        );
    }

    #[test]
    fn test_end_of_stream_returns_to_level_zero() {
        // No trailing newline at all, as if an unterminated literal ate them
        let input = vec![
            mk_token(TokenKind::Space, " ", 0),
            mk_token(TokenKind::Space, " ", 1),
            mk_token(TokenKind::DotSpace, ". ", 2),
            mk_token(TokenKind::Text, "x", 4),
        ];
        let buffer =
            Phase2Lexer::new(TokenBuffer::new(input, vec![]), "test.mlg").into_buffer();
        assert_eq!(
            kinds(buffer.remaining()),
            vec![
                TokenKind::Indent,
                TokenKind::Indent,
                TokenKind::DotSpace,
                TokenKind::Text,
                TokenKind::UnIndent,
                TokenKind::UnIndent,
            ]
        );
    }

    #[test]
    fn test_upstream_diagnostics_come_first() {
        let buffer = lex("a%:\n   . b\n");
        let origins: Vec<_> = buffer.diagnostics().iter().map(|d| d.origin).collect();
        assert_eq!(origins, vec![Origin::Phase1, Origin::Phase2]);
    }
}
