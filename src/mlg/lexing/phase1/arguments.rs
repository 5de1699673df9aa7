//! Argument collection
//!
//!     Runs after a Colon and after a DotSpace that does not introduce a section header.
//!     Arguments are separated by commas and end at the first newline that is not nested
//!     inside brackets.
//!
//!     Enclosed arguments:
//!         `"..."` is Text, with `\"` unescaped to `"`. `'...'` and `` `...` `` are
//!         Formulations and are kept exactly as written, since backslashes are part of the
//!         notation. Enclosed arguments may span lines.
//!
//!     Plain arguments:
//!         Anything else, up to the first comma or newline outside of `()`, `[]` and `{}`.
//!         A closing bracket only pops the depth stack if it matches the innermost open
//!         one. Mismatches are tolerated, but a bracket still open at end of input is
//!         reported at the start of the argument.
//!
//!     An empty argument between two commas is reported and collection carries on with
//!     the next one.

use super::Scanner;
use crate::mlg::token::{Position, TokenKind};

/// What follows a collected argument
enum Separator {
    Comma,
    End,
}

impl<'a> Scanner<'a> {
    pub(super) fn collect_arguments(&mut self) {
        self.skip_spaces();
        loop {
            match self.chars.peek() {
                None | Some('\n') => break,
                Some(',') => {
                    // Empty argument, keep going from the next one
                    let position = self.chars.position();
                    self.error("expected an argument", position);
                }
                Some(_) => {
                    self.collect_argument();
                    if let Separator::End = self.finish_argument() {
                        break;
                    }
                }
            }
            self.comma();
        }
    }

    fn comma(&mut self) {
        let position = self.chars.position();
        self.chars.next();
        self.push(TokenKind::Comma, ",", position);
        self.skip_spaces();
    }

    /// Collect a single argument starting at the cursor, which is not on a separator.
    fn collect_argument(&mut self) {
        match self.chars.peek() {
            Some('"') => self.quoted_text(),
            Some(quote @ ('\'' | '`')) => self.formulation(quote),
            Some(_) => self.plain_argument(),
            None => {}
        }
    }

    fn quoted_text(&mut self) {
        let position = self.chars.position();
        self.chars.next();

        let mut text = String::new();
        let mut terminated = false;
        while let Some(c) = self.chars.next() {
            match c.symbol {
                '\\' if self.chars.peek() == Some('"') => {
                    self.chars.next();
                    text.push('"');
                }
                '"' => {
                    terminated = true;
                    break;
                }
                other => text.push(other),
            }
        }

        if !terminated {
            self.error("expected a terminating \"", position);
        }
        self.push(TokenKind::Text, text, position);
    }

    fn formulation(&mut self, quote: char) {
        let position = self.chars.position();
        self.chars.next();

        let mut text = String::new();
        let mut terminated = false;
        for c in self.chars.by_ref() {
            if c.symbol == quote {
                terminated = true;
                break;
            }
            text.push(c.symbol);
        }

        if !terminated {
            self.error(format!("expected a terminating {}", quote), position);
        }
        self.push(TokenKind::Formulation, text, position);
    }

    fn plain_argument(&mut self) {
        let position = self.chars.position();
        let mut text = String::new();
        let mut brackets: Vec<char> = Vec::new();
        let mut trailing: Option<Position> = None;

        while let Some(c) = self.chars.peek() {
            if brackets.is_empty() && (c == ',' || c == '\n') {
                break;
            }
            match c {
                '(' | '[' | '{' => brackets.push(c),
                ')' | ']' | '}' => {
                    if brackets.last() == Some(&opening(c)) {
                        brackets.pop();
                    }
                }
                _ => {}
            }

            if c == ' ' {
                trailing.get_or_insert(self.chars.position());
            } else {
                trailing = None;
            }
            text.push(c);
            self.chars.next();
        }

        if let Some(&open) = brackets.last() {
            self.error(format!("expected a terminating {}", closing(open)), position);
        } else if let Some(at) = trailing {
            self.trailing_whitespace(at);
        }
        self.push(TokenKind::ArgumentText, text, position);
    }

    /// Consume what separates this argument from the next one.
    fn finish_argument(&mut self) -> Separator {
        let spaces = self.chars.position();
        let mut count = 0;
        while self.chars.peek() == Some(' ') {
            self.chars.next();
            count += 1;
        }

        match self.chars.peek() {
            Some(',') => Separator::Comma,
            None | Some('\n') => {
                if count > 0 {
                    self.trailing_whitespace(spaces);
                }
                Separator::End
            }
            Some(_) => {
                let position = self.chars.position();
                self.error("expected a , to follow this argument", position);
                self.skip_line();
                Separator::End
            }
        }
    }

    /// Skip spaces before an argument, reporting them if nothing follows on the line.
    fn skip_spaces(&mut self) {
        let position = self.chars.position();
        let mut count = 0;
        while self.chars.peek() == Some(' ') {
            self.chars.next();
            count += 1;
        }
        if count > 0 && matches!(self.chars.peek(), None | Some('\n')) {
            self.trailing_whitespace(position);
        }
    }

    fn skip_line(&mut self) {
        while !matches!(self.chars.peek(), None | Some('\n')) {
            self.chars.next();
        }
    }

    fn trailing_whitespace(&mut self, position: Position) {
        if self.report_trailing_whitespace {
            self.warning("unnecessary trailing whitespace", position);
        }
    }
}

fn opening(close: char) -> char {
    match close {
        ')' => '(',
        ']' => '[',
        _ => '{',
    }
}

fn closing(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}
