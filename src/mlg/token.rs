//! Core token types shared across the lexer passes, the validator and the output formats.
//!
//! Token Layers
//!
//!     The three lexer passes share a single token type, but each pass produces a
//!     different subset of the kinds:
//!
//!     Literal Tokens:
//!         Name, Colon, Text, Formulation, ArgumentText, TextBlock, Id, Comma. They are
//!         produced by phase 1 and carried unchanged through the later passes.
//!
//!     Whitespace Tokens:
//!         Space, Newline, DotSpace. Produced by phase 1. Phase 2 folds runs of them into
//!         indentation tokens, phase 3 drops what is left.
//!
//!     Indentation Tokens:
//!         Indent, UnIndent, LineBreak. Produced by phase 2 from the whitespace tokens,
//!         similar to open/close braces in more c-style languages.
//!
//!     Structural Tokens:
//!         Begin*/End* pairs for top-level groups, sections, argument groups and
//!         arguments. Produced by phase 3 and always balanced.
//!
//! Positions
//!
//!     Every token carries the [Position] of its first character, computed once by the
//!     character reader and never adjusted afterwards. Synthetic tokens reuse the position
//!     of the token that caused them to be emitted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A location in the source text. All fields are zero-based.
///
/// `offset` is a UTF-8 byte offset, `column` counts code points since the last newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub offset: usize,
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub fn new(offset: usize, row: usize, column: usize) -> Self {
        Position {
            offset,
            row,
            column,
        }
    }
}

/// Rendered one-based, the way editors report locations.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row + 1, self.column + 1)
    }
}

/// The closed set of token kinds exchanged between the passes and with the tree builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Literals
    Name,
    Colon,
    Text,
    Formulation,
    ArgumentText,
    TextBlock,
    Id,
    Comma,

    // Whitespace
    Space,
    Newline,
    DotSpace,

    // Indentation
    Indent,
    UnIndent,
    LineBreak,

    // Structure
    BeginTopLevelGroup,
    EndTopLevelGroup,
    BeginSection,
    EndSection,
    BeginArgumentGroup,
    EndArgumentGroup,
    BeginArgument,
    EndArgument,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Name => "Name",
            TokenKind::Colon => "Colon",
            TokenKind::Text => "Text",
            TokenKind::Formulation => "Formulation",
            TokenKind::ArgumentText => "ArgumentText",
            TokenKind::TextBlock => "TextBlock",
            TokenKind::Id => "Id",
            TokenKind::Comma => "Comma",
            TokenKind::Space => "Space",
            TokenKind::Newline => "Newline",
            TokenKind::DotSpace => "DotSpace",
            TokenKind::Indent => "Indent",
            TokenKind::UnIndent => "UnIndent",
            TokenKind::LineBreak => "LineBreak",
            TokenKind::BeginTopLevelGroup => "BeginTopLevelGroup",
            TokenKind::EndTopLevelGroup => "EndTopLevelGroup",
            TokenKind::BeginSection => "BeginSection",
            TokenKind::EndSection => "EndSection",
            TokenKind::BeginArgumentGroup => "BeginArgumentGroup",
            TokenKind::EndArgumentGroup => "EndArgumentGroup",
            TokenKind::BeginArgument => "BeginArgument",
            TokenKind::EndArgument => "EndArgument",
        }
    }

    /// Check if this kind carries source text the tree builder consumes
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::Name
                | TokenKind::Colon
                | TokenKind::Text
                | TokenKind::Formulation
                | TokenKind::ArgumentText
                | TokenKind::TextBlock
                | TokenKind::Id
                | TokenKind::Comma
        )
    }

    pub fn is_begin(self) -> bool {
        matches!(
            self,
            TokenKind::BeginTopLevelGroup
                | TokenKind::BeginSection
                | TokenKind::BeginArgumentGroup
                | TokenKind::BeginArgument
        )
    }

    pub fn is_end(self) -> bool {
        matches!(
            self,
            TokenKind::EndTopLevelGroup
                | TokenKind::EndSection
                | TokenKind::EndArgumentGroup
                | TokenKind::EndArgument
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single token. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: Position) -> Self {
        Token {
            kind,
            text: text.into(),
            position,
        }
    }

    /// A token with no text of its own, such as `Indent` or `BeginSection`.
    pub fn synthetic(kind: TokenKind, position: Position) -> Self {
        Token::new(kind, String::new(), position)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

/// Literal tokens print their text, everything else prints `<Kind>`.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.is_literal() {
            f.write_str(&self.text)
        } else {
            write!(f, "<{}>", self.kind)
        }
    }
}
