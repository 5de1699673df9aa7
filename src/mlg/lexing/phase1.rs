//! Phase 1: raw tokenization
//!
//!     Turns characters into the first level token stream. There is no notion of
//!     indentation depth or nesting here, beyond bracket matching inside literals.
//!
//!     At each position the scanner recognizes, in order:
//!     - a name (letters and digits, starting with a letter)
//!     - `::` opening a text block, captured verbatim up to the closing `::`
//!     - `:` emitting a Colon and starting argument collection
//!     - `. ` emitting a DotSpace, and starting argument collection unless a section
//!       header (`name:`) follows on the same line
//!     - `[` opening an id, captured up to the bracket that balances it
//!     - a newline, followed by one Space token per leading space of the next line
//!     - anything else is reported as an unrecognized character and skipped
//!
//!     Argument collection lives in [arguments].
//!
//! Whitespace
//!
//!     Leading spaces are the only spaces that survive this pass, one token per space.
//!     A line made only of spaces produces no Space tokens at all, so it reads as a blank
//!     line downstream. Other spaces between lexemes are skipped.

mod arguments;

use crate::mlg::diagnostics::{Diagnostic, Origin};
use crate::mlg::lexing::base_tokenization::{next_lexeme, starts_with_name_colon, Lexeme};
use crate::mlg::lexing::chars::CharReader;
use crate::mlg::lexing::interface::{delegate_token_iter, TokenBuffer};
use crate::mlg::lexing::LexOptions;
use crate::mlg::token::{Position, Token, TokenKind};

/// The phase 1 pass over a prepared document
pub struct Phase1Lexer {
    buffer: TokenBuffer,
}

impl Phase1Lexer {
    /// Lex `text` with default options. `path` is only used to attribute diagnostics.
    pub fn new(text: &str, path: &str) -> Self {
        Self::with_options(text, path, &LexOptions::default())
    }

    pub fn with_options(text: &str, path: &str, options: &LexOptions) -> Self {
        let scanner = Scanner {
            source: text,
            path,
            report_trailing_whitespace: options.report_trailing_whitespace,
            chars: CharReader::new(text),
            tokens: Vec::new(),
            diagnostics: Vec::new(),
            at_line_start: true,
        };
        let (tokens, diagnostics) = scanner.run();

        tracing::debug!(
            path,
            tokens = tokens.len(),
            diagnostics = diagnostics.len(),
            "phase1 complete"
        );

        Phase1Lexer {
            buffer: TokenBuffer::new(tokens, diagnostics),
        }
    }
}

delegate_token_iter!(Phase1Lexer);

struct Scanner<'a> {
    source: &'a str,
    path: &'a str,
    report_trailing_whitespace: bool,
    chars: CharReader,
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
    at_line_start: bool,
}

impl<'a> Scanner<'a> {
    fn run(mut self) -> (Vec<Token>, Vec<Diagnostic>) {
        while self.chars.has_next() {
            let start = self.chars.offset();
            match next_lexeme(&self.source[start..]) {
                Some((lexeme, len)) => self.accept(lexeme, start, start + len),
                None => self.unrecognized(),
            }
        }
        (self.tokens, self.diagnostics)
    }

    fn accept(&mut self, lexeme: Lexeme, start: usize, end: usize) {
        let position = self.chars.position();
        match lexeme {
            Lexeme::Newline => {
                self.chars.advance_to(end);
                self.push(TokenKind::Newline, "\n", position);
                self.at_line_start = true;
                return;
            }
            Lexeme::Space => {
                if self.at_line_start {
                    self.leading_spaces();
                } else {
                    self.chars.advance_to(end);
                }
                return;
            }
            Lexeme::Name => {
                self.chars.advance_to(end);
                let text = &self.source[start..end];
                self.push(TokenKind::Name, text, position);
            }
            Lexeme::Colon => {
                self.chars.advance_to(end);
                self.push(TokenKind::Colon, ":", position);
                self.collect_arguments();
            }
            Lexeme::DotSpace => {
                self.chars.advance_to(end);
                self.push(TokenKind::DotSpace, ". ", position);
                if !starts_with_name_colon(&self.source[self.chars.offset()..]) {
                    self.collect_arguments();
                }
            }
            Lexeme::TextBlockMarker => self.text_block(),
            Lexeme::OpenBracket => self.id(),
        }
        self.at_line_start = false;
    }

    /// Emit one Space per leading space, unless the line holds nothing but spaces.
    fn leading_spaces(&mut self) {
        let mut count = 0;
        while self.chars.peek_nth(count) == Some(' ') {
            count += 1;
        }

        let blank = matches!(self.chars.peek_nth(count), None | Some('\n'));
        for _ in 0..count {
            if let Some(c) = self.chars.next() {
                if !blank {
                    self.push(TokenKind::Space, " ", c.position);
                }
            }
        }
        self.at_line_start = blank;
    }

    /// `::` up to the next `::` that is not preceded by a backslash, kept verbatim.
    fn text_block(&mut self) {
        let position = self.chars.position();
        self.chars.next();
        self.chars.next();

        let mut text = String::new();
        let mut terminated = false;
        while let Some(c) = self.chars.next() {
            match c.symbol {
                '\\' if self.chars.peek() == Some(':') => {
                    text.push('\\');
                    text.push(':');
                    self.chars.next();
                }
                ':' if self.chars.peek() == Some(':') => {
                    self.chars.next();
                    terminated = true;
                    break;
                }
                other => text.push(other),
            }
        }

        if !terminated {
            self.error("expected a terminating ::", position);
        }
        self.push(TokenKind::TextBlock, text, position);
    }

    /// `[` up to the `]` that balances it. The token text excludes the outer brackets.
    fn id(&mut self) {
        let position = self.chars.position();
        self.chars.next();

        let mut text = String::new();
        let mut depth = 1;
        while let Some(c) = self.chars.peek() {
            if c == '\n' {
                break;
            }
            self.chars.next();
            match c {
                '[' => depth += 1,
                ']' => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
            text.push(c);
        }

        if depth > 0 {
            self.error("expected a terminating ]", position);
        }
        self.push(TokenKind::Id, text, position);
    }

    fn unrecognized(&mut self) {
        if let Some(c) = self.chars.next() {
            self.error(
                format!("Unrecognized character '{}'", c.symbol.escape_default()),
                c.position,
            );
        }
        self.at_line_start = false;
    }

    fn push(&mut self, kind: TokenKind, text: impl Into<String>, position: Position) {
        self.tokens.push(Token::new(kind, text, position));
    }

    fn error(&mut self, message: impl Into<String>, position: Position) {
        let diagnostic = Diagnostic::error(Origin::Phase1, message, position, self.path);
        tracing::trace!(%diagnostic, "phase1 diagnostic");
        self.diagnostics.push(diagnostic);
    }

    fn warning(&mut self, message: impl Into<String>, position: Position) {
        let diagnostic = Diagnostic::warning(Origin::Phase1, message, position, self.path);
        tracing::trace!(%diagnostic, "phase1 diagnostic");
        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mlg::lexing::interface::TokenIter;
    use crate::mlg::testing::factories::{kinds, texts};

    fn lex(text: &str) -> TokenBuffer {
        Phase1Lexer::new(text, "test.mlg").into_buffer()
    }

    #[test]
    fn test_quoted_text_and_formulation_arguments() {
        let buffer = lex("xyz: \"abc\",'123'");
        assert!(buffer.diagnostics().is_empty());

        let tokens = buffer.remaining();
        assert_eq!(
            kinds(tokens),
            vec![
                TokenKind::Name,
                TokenKind::Colon,
                TokenKind::Text,
                TokenKind::Comma,
                TokenKind::Formulation,
            ]
        );
        assert_eq!(texts(tokens), vec!["xyz", ":", "abc", ",", "123"]);

        let offsets: Vec<_> = tokens.iter().map(|t| t.position.offset).collect();
        assert_eq!(offsets, vec![0, 3, 5, 10, 11]);
    }

    #[test]
    fn test_section_with_plain_arguments() {
        let buffer = lex("a: xyz, abc\n");
        assert!(buffer.diagnostics().is_empty());
        assert_eq!(
            kinds(buffer.remaining()),
            vec![
                TokenKind::Name,
                TokenKind::Colon,
                TokenKind::ArgumentText,
                TokenKind::Comma,
                TokenKind::ArgumentText,
                TokenKind::Newline,
            ]
        );
        assert_eq!(texts(buffer.remaining())[2], "xyz");
        assert_eq!(texts(buffer.remaining())[4], "abc");
    }

    #[test]
    fn test_dot_space_followed_by_section_header() {
        let buffer = lex(". b:\n");
        assert_eq!(
            kinds(buffer.remaining()),
            vec![
                TokenKind::DotSpace,
                TokenKind::Name,
                TokenKind::Colon,
                TokenKind::Newline,
            ]
        );
    }

    #[test]
    fn test_dot_space_followed_by_argument() {
        let buffer = lex(". b c\n");
        assert_eq!(
            kinds(buffer.remaining()),
            vec![
                TokenKind::DotSpace,
                TokenKind::ArgumentText,
                TokenKind::Newline,
            ]
        );
        assert_eq!(texts(buffer.remaining())[1], "b c");
    }

    #[test]
    fn test_leading_spaces_become_space_tokens() {
        let buffer = lex("a:\n  . b\n");
        assert_eq!(
            kinds(buffer.remaining()),
            vec![
                TokenKind::Name,
                TokenKind::Colon,
                TokenKind::Newline,
                TokenKind::Space,
                TokenKind::Space,
                TokenKind::DotSpace,
                TokenKind::ArgumentText,
                TokenKind::Newline,
            ]
        );
        let spaces: Vec<_> = buffer
            .remaining()
            .iter()
            .filter(|t| t.is(TokenKind::Space))
            .map(|t| t.position.column)
            .collect();
        assert_eq!(spaces, vec![0, 1]);
    }

    #[test]
    fn test_whitespace_only_line_is_blank() {
        let buffer = lex("a:\n    \nb:\n");
        assert!(!buffer.remaining().iter().any(|t| t.is(TokenKind::Space)));
        assert!(buffer.diagnostics().is_empty());
    }

    #[test]
    fn test_text_block() {
        let buffer = lex("::some \\:: text::\n");
        assert!(buffer.diagnostics().is_empty());
        let tokens = buffer.remaining();
        assert_eq!(tokens[0].kind, TokenKind::TextBlock);
        assert_eq!(tokens[0].text, "some \\:: text");
        assert_eq!(tokens[1].kind, TokenKind::Newline);
    }

    #[test]
    fn test_unterminated_text_block_consumes_rest() {
        let buffer = lex("::abc\n\nd:");
        assert_eq!(buffer.diagnostics().len(), 1);
        assert_eq!(buffer.diagnostics()[0].message, "expected a terminating ::");
        assert_eq!(kinds(buffer.remaining()), vec![TokenKind::TextBlock]);
        assert_eq!(buffer.remaining()[0].text, "abc\n\nd:");
    }

    #[test]
    fn test_nested_id() {
        let buffer = lex("[\\set{[x]}]\n");
        assert!(buffer.diagnostics().is_empty());
        assert_eq!(buffer.remaining()[0].kind, TokenKind::Id);
        assert_eq!(buffer.remaining()[0].text, "\\set{[x]}");
    }

    #[test]
    fn test_unterminated_id_stops_at_line_end() {
        let buffer = lex("[x[y]\nb:\n");
        assert_eq!(buffer.diagnostics().len(), 1);
        assert_eq!(buffer.diagnostics()[0].message, "expected a terminating ]");
        assert_eq!(
            kinds(buffer.remaining()),
            vec![
                TokenKind::Id,
                TokenKind::Newline,
                TokenKind::Name,
                TokenKind::Colon,
                TokenKind::Newline,
            ]
        );
    }

    #[test]
    fn test_unrecognized_character_is_skipped() {
        let buffer = lex("a%:\n");
        assert_eq!(buffer.diagnostics().len(), 1);
        assert_eq!(
            buffer.diagnostics()[0].message,
            "Unrecognized character '%'"
        );
        assert_eq!(buffer.diagnostics()[0].position.offset, 1);
        assert_eq!(
            kinds(buffer.remaining()),
            vec![TokenKind::Name, TokenKind::Colon, TokenKind::Newline]
        );
    }

    #[test]
    fn test_newline_positions() {
        let buffer = lex("a:\nb:\n");
        let newlines: Vec<_> = buffer
            .remaining()
            .iter()
            .filter(|t| t.is(TokenKind::Newline))
            .map(|t| t.position)
            .collect();
        assert_eq!(
            newlines,
            vec![Position::new(2, 0, 2), Position::new(5, 1, 2)]
        );
    }
}
