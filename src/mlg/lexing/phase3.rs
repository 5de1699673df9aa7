//! Phase 3: structural bracketing
//!
//!     Inserts explicit Begin/End markers so that downstream consumers see a strictly
//!     nested stream instead of an indentation based one. A stack of open [Frame]s is
//!     pushed on every Begin and popped on every End.
//!
//!     Rules, in priority order, against the phase 2 stream:
//!     1. `Name Colon` opens a Section, after opening a TopLevelGroup if nothing is open
//!        and closing the previous sibling Section if it is the innermost frame.
//!     2. `Indent DotSpace` opens an Argument, plus an ArgumentGroup if a section header
//!        follows.
//!     3. `DotSpace` closes the innermost Section, ArgumentGroup and Argument (each only
//!        if it is the innermost frame at that point), then opens an Argument as in 2.
//!     4. `UnIndent` closes the same frames as 3, but opens nothing.
//!     5. `LineBreak` closes every open frame.
//!     6. `Indent` without a DotSpace is reported and dropped.
//!     7. `Newline` is dropped.
//!     8. Everything else passes through.
//!
//!     Callers append blank lines to every document, so rule 5 normally closes everything.
//!     Frames still open at end of stream (an unterminated literal can swallow those blank
//!     lines) are closed there as well.

use crate::mlg::diagnostics::{Diagnostic, Origin};
use crate::mlg::lexing::interface::{delegate_token_iter, TokenBuffer, TokenIter};
use crate::mlg::token::{Position, Token, TokenKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An open structure on the phase 3 stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frame {
    TopLevelGroup,
    Section,
    ArgumentGroup,
    Argument,
}

impl Frame {
    pub fn begin_kind(self) -> TokenKind {
        match self {
            Frame::TopLevelGroup => TokenKind::BeginTopLevelGroup,
            Frame::Section => TokenKind::BeginSection,
            Frame::ArgumentGroup => TokenKind::BeginArgumentGroup,
            Frame::Argument => TokenKind::BeginArgument,
        }
    }

    pub fn end_kind(self) -> TokenKind {
        match self {
            Frame::TopLevelGroup => TokenKind::EndTopLevelGroup,
            Frame::Section => TokenKind::EndSection,
            Frame::ArgumentGroup => TokenKind::EndArgumentGroup,
            Frame::Argument => TokenKind::EndArgument,
        }
    }

    /// The frame a Begin or End token refers to
    pub fn of(kind: TokenKind) -> Option<Frame> {
        match kind {
            TokenKind::BeginTopLevelGroup | TokenKind::EndTopLevelGroup => {
                Some(Frame::TopLevelGroup)
            }
            TokenKind::BeginSection | TokenKind::EndSection => Some(Frame::Section),
            TokenKind::BeginArgumentGroup | TokenKind::EndArgumentGroup => {
                Some(Frame::ArgumentGroup)
            }
            TokenKind::BeginArgument | TokenKind::EndArgument => Some(Frame::Argument),
            _ => None,
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frame::TopLevelGroup => "TopLevelGroup",
            Frame::Section => "Section",
            Frame::ArgumentGroup => "ArgumentGroup",
            Frame::Argument => "Argument",
        };
        f.write_str(name)
    }
}

/// The phase 3 pass, consuming phase 2
pub struct Phase3Lexer {
    buffer: TokenBuffer,
}

impl Phase3Lexer {
    pub fn new<I: TokenIter>(mut upstream: I, path: &str) -> Self {
        let mut bracketer = Bracketer {
            input: &mut upstream,
            path,
            tokens: Vec::new(),
            diagnostics: Vec::new(),
            stack: Vec::new(),
        };
        bracketer.run();
        let Bracketer {
            tokens,
            diagnostics: own,
            ..
        } = bracketer;

        let mut diagnostics = upstream.diagnostics().to_vec();
        diagnostics.extend(own);

        tracing::debug!(
            path,
            tokens = tokens.len(),
            diagnostics = diagnostics.len(),
            "phase3 complete"
        );

        Phase3Lexer {
            buffer: TokenBuffer::new(tokens, diagnostics),
        }
    }
}

delegate_token_iter!(Phase3Lexer);

struct Bracketer<'a, I: TokenIter> {
    input: &'a mut I,
    path: &'a str,
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
    stack: Vec<Frame>,
}

impl<'a, I: TokenIter> Bracketer<'a, I> {
    fn run(&mut self) {
        let mut last_position = Position::default();
        while let Some(next) = self.input.peek() {
            let position = next.position;
            let kind = next.kind;
            last_position = position;

            if self.has_name_colon() {
                self.section(position);
            } else if kind == TokenKind::Indent && self.input.peek_is(1, TokenKind::DotSpace) {
                self.input.next_token();
                self.input.next_token();
                self.open_argument(position);
            } else {
                match kind {
                    TokenKind::DotSpace => {
                        self.input.next_token();
                        self.close_argument_frames(position);
                        self.open_argument(position);
                    }
                    TokenKind::UnIndent => {
                        self.input.next_token();
                        self.close_argument_frames(position);
                    }
                    TokenKind::LineBreak => {
                        self.input.next_token();
                        self.unwind(position);
                    }
                    TokenKind::Indent => {
                        self.input.next_token();
                        self.error("unexpected indent", position);
                    }
                    TokenKind::Newline => {
                        self.input.next_token();
                    }
                    _ => {
                        if let Some(token) = self.input.next_token() {
                            self.tokens.push(token);
                        }
                    }
                }
            }
        }
        self.unwind(last_position);
    }

    fn has_name_colon(&self) -> bool {
        self.input.peek_is(0, TokenKind::Name) && self.input.peek_is(1, TokenKind::Colon)
    }

    fn section(&mut self, position: Position) {
        if self.stack.is_empty() {
            self.open(Frame::TopLevelGroup, position);
        }
        self.close_if(Frame::Section, position);
        self.open(Frame::Section, position);

        for _ in 0..2 {
            if let Some(token) = self.input.next_token() {
                self.tokens.push(token);
            }
        }
    }

    fn open_argument(&mut self, position: Position) {
        self.open(Frame::Argument, position);
        if self.has_name_colon() {
            self.open(Frame::ArgumentGroup, position);
        }
    }

    fn close_argument_frames(&mut self, position: Position) {
        self.close_if(Frame::Section, position);
        self.close_if(Frame::ArgumentGroup, position);
        self.close_if(Frame::Argument, position);
    }

    fn open(&mut self, frame: Frame, position: Position) {
        self.stack.push(frame);
        self.tokens
            .push(Token::synthetic(frame.begin_kind(), position));
    }

    /// Close `frame` if it is the innermost open frame.
    fn close_if(&mut self, frame: Frame, position: Position) {
        if self.stack.last() == Some(&frame) {
            self.stack.pop();
            self.tokens.push(Token::synthetic(frame.end_kind(), position));
        }
    }

    /// Close every open frame, innermost first.
    fn unwind(&mut self, position: Position) {
        while let Some(frame) = self.stack.pop() {
            self.tokens.push(Token::synthetic(frame.end_kind(), position));
        }
    }

    fn error(&mut self, message: &str, position: Position) {
        let diagnostic = Diagnostic::error(Origin::Phase3, message, position, self.path);
        tracing::trace!(%diagnostic, "phase3 diagnostic");
        self.diagnostics.push(diagnostic);
    }
}
