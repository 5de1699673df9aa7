//! Lexer
//!
//! This module orchestrates the complete tokenization pipeline for the mlg format.
//!
//! The pipeline consists of three passes, each a pull-based token iterator consumed by
//! the next one:
//! 1. Phase 1 ./lexing/phase1.rs - characters to names, colons, quoted text, formulations,
//!    ids, text blocks and comma separated arguments. Top-level lexemes are recognized by
//!    the logos lexer in ./lexing/base_tokenization.rs, positions come from the character
//!    reader in ./lexing/chars.rs.
//! 2. Phase 2 ./lexing/phase2.rs - runs of leading spaces and dot-space markers to
//!    Indent/UnIndent tokens, consecutive newlines to LineBreak tokens.
//! 3. Phase 3 ./lexing/phase3.rs - Indent/UnIndent/LineBreak to balanced Begin/End pairs
//!    for top-level groups, sections, argument groups and arguments.
//!
//! Indentation Handling
//!
//!     Indentation is resolved in two steps. Phase 1 only reports one Space token per
//!     leading space, phase 2 turns those into indent levels (two spaces per level, plus
//!     one level for a dot-space marker), and phase 3 turns level changes into structure.
//!     Keeping the three concerns apart means each pass only ever looks one or two tokens
//!     ahead.
//!
//! Trailing Newlines
//!
//!     Callers append a few newlines to every document before lexing (see
//!     [prepare_source]). This guarantees the last entry is followed by a blank line, which
//!     is what closes every open structure in phase 3.

pub mod base_tokenization;
pub mod chars;
pub mod interface;
pub mod phase1;
pub mod phase2;
pub mod phase3;

pub use chars::{read_chars, Char, CharReader};
pub use interface::{TokenBuffer, TokenIter};
pub use phase1::Phase1Lexer;
pub use phase2::Phase2Lexer;
pub use phase3::{Frame, Phase3Lexer};

use crate::mlg::diagnostics::Diagnostic;
use crate::mlg::token::Token;
use serde::{Deserialize, Serialize};

/// Number of newlines appended to a document before lexing
pub const TRAILING_NEWLINES: usize = 3;

/// Knobs that change how a document is lexed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexOptions {
    pub trailing_newlines: usize,
    pub report_trailing_whitespace: bool,
}

impl Default for LexOptions {
    fn default() -> Self {
        LexOptions {
            trailing_newlines: TRAILING_NEWLINES,
            report_trailing_whitespace: true,
        }
    }
}

/// How far to run the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Phase1,
    Phase2,
    Phase3,
}

/// The drained result of a pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LexOutput {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
}

impl LexOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

impl From<TokenBuffer> for LexOutput {
    fn from(buffer: TokenBuffer) -> Self {
        let (tokens, diagnostics) = buffer.into_parts();
        LexOutput {
            tokens,
            diagnostics,
        }
    }
}

/// Appends the trailing newlines every document needs before phase 1.
pub fn prepare_source(source: &str, trailing_newlines: usize) -> String {
    let mut prepared = String::with_capacity(source.len() + trailing_newlines);
    prepared.push_str(source);
    prepared.extend(std::iter::repeat('\n').take(trailing_newlines));
    prepared
}

/// Runs the full pipeline with default options.
pub fn lex(source: &str, path: &str) -> LexOutput {
    lex_with(source, path, &LexOptions::default())
}

/// Runs the full pipeline.
pub fn lex_with(source: &str, path: &str, options: &LexOptions) -> LexOutput {
    lex_stage(source, path, Stage::Phase3, options)
}

/// Runs the pipeline up to and including `stage`.
pub fn lex_stage(source: &str, path: &str, stage: Stage, options: &LexOptions) -> LexOutput {
    let prepared = prepare_source(source, options.trailing_newlines);
    let phase1 = Phase1Lexer::with_options(&prepared, path, options);
    if stage == Stage::Phase1 {
        return phase1.into_buffer().into();
    }

    let phase2 = Phase2Lexer::new(phase1, path);
    if stage == Stage::Phase2 {
        return phase2.into_buffer().into();
    }

    Phase3Lexer::new(phase2, path).into_buffer().into()
}
