//! Base lexeme recognition for phase 1
//!
//! Outside of argument lists, a document only contains a handful of lexemes: names,
//! colons, dot-space markers, text block markers, id brackets, newlines and spaces.
//! These are recognized by a logos lexer. Everything that needs context (argument
//! splitting, quoting, bracket depth) is handled by hand in phase 1 on top of the
//! character reader.
//!
//! Phase 1 restarts this lexer at its own cursor for every top-level lexeme, so the
//! spans returned here are relative to the slice being lexed.

use logos::Logos;

/// Lexemes recognized at the top level of a line
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lexeme {
    #[regex(r"[\p{L}][\p{L}\p{N}]*")]
    Name,

    #[token("::")]
    TextBlockMarker,

    #[token(":")]
    Colon,

    #[token(". ")]
    DotSpace,

    #[token("[")]
    OpenBracket,

    #[token("\n")]
    Newline,

    #[token(" ")]
    Space,
}

/// Recognize the lexeme at the start of `source` and return it with its byte length.
///
/// Returns `None` if `source` is empty or starts with a character no lexeme accepts.
pub fn next_lexeme(source: &str) -> Option<(Lexeme, usize)> {
    let mut lexer = Lexeme::lexer(source);
    match lexer.next() {
        Some(Ok(lexeme)) => Some((lexeme, lexer.span().end)),
        _ => None,
    }
}

/// Check whether `source` starts with a section header, a name directly followed by a colon.
pub fn starts_with_name_colon(source: &str) -> bool {
    let mut lexer = Lexeme::lexer(source);
    matches!(lexer.next(), Some(Ok(Lexeme::Name))) && matches!(lexer.next(), Some(Ok(Lexeme::Colon)))
}
