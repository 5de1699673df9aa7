//! Character reader
//!
//! Decorates source text with a [Position] per code point. This is the only place where
//! positions are computed; every later token reuses the position of its first character.
//!
//! Columns count code points since the last newline, so a multi-byte character advances
//! the column by one and the offset by its UTF-8 length.

use crate::mlg::token::Position;

/// A code point and where it starts in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Char {
    pub symbol: char,
    pub position: Position,
}

/// Decorate every code point of `text` with its position.
pub fn read_chars(text: &str) -> Vec<Char> {
    let mut chars = Vec::with_capacity(text.len());
    let mut row = 0;
    let mut column = 0;

    for (offset, symbol) in text.char_indices() {
        chars.push(Char {
            symbol,
            position: Position::new(offset, row, column),
        });
        if symbol == '\n' {
            row += 1;
            column = 0;
        } else {
            column += 1;
        }
    }

    chars
}

/// Cursor over the decorated characters of a document.
#[derive(Debug, Clone)]
pub struct CharReader {
    chars: Vec<Char>,
    index: usize,
    end: Position,
}

impl CharReader {
    pub fn new(text: &str) -> Self {
        let chars = read_chars(text);
        let end = match chars.last() {
            Some(last) if last.symbol == '\n' => Position::new(text.len(), last.position.row + 1, 0),
            Some(last) => Position::new(
                text.len(),
                last.position.row,
                last.position.column + 1,
            ),
            None => Position::default(),
        };
        CharReader {
            chars,
            index: 0,
            end,
        }
    }

    pub fn has_next(&self) -> bool {
        self.index < self.chars.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.peek_nth(0)
    }

    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.chars.get(self.index + n).map(|c| c.symbol)
    }

    /// Position of the next character, or the end of the text once exhausted
    pub fn position(&self) -> Position {
        self.chars
            .get(self.index)
            .map_or(self.end, |c| c.position)
    }

    /// Byte offset of the next character
    pub fn offset(&self) -> usize {
        self.position().offset
    }

    /// Consume characters until the cursor reaches byte `offset`.
    pub fn advance_to(&mut self, offset: usize) {
        while self.has_next() && self.offset() < offset {
            self.index += 1;
        }
    }
}

impl Iterator for CharReader {
    type Item = Char;

    fn next(&mut self) -> Option<Char> {
        let c = self.chars.get(self.index).copied();
        if c.is_some() {
            self.index += 1;
        }
        c
    }
}
