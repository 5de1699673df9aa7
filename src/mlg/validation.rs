//! Structural validation of phase 3 output
//!
//! A tree builder consumes the phase 3 stream by pushing a node on every Begin token and
//! popping on every End token. [check_structure] replays a stream against the same stack
//! and reports the first point at which such a consumer would fail.

use crate::mlg::lexing::Frame;
use crate::mlg::token::{Position, Token};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("{position}: End{frame} with no open frame")]
    Unopened { frame: Frame, position: Position },

    #[error("{position}: End{found} does not close the open {expected}")]
    Mismatched {
        expected: Frame,
        found: Frame,
        position: Position,
    },

    #[error("{open} frame(s) left open at end of stream, innermost {innermost}")]
    Unclosed { open: usize, innermost: Frame },
}

/// Check that Begin and End tokens in `tokens` are properly nested.
pub fn check_structure(tokens: &[Token]) -> Result<(), StructureError> {
    let mut stack: Vec<Frame> = Vec::new();

    for token in tokens {
        let Some(frame) = Frame::of(token.kind) else {
            continue;
        };

        if token.kind.is_begin() {
            stack.push(frame);
            continue;
        }

        match stack.pop() {
            None => {
                return Err(StructureError::Unopened {
                    frame,
                    position: token.position,
                })
            }
            Some(open) if open != frame => {
                return Err(StructureError::Mismatched {
                    expected: open,
                    found: frame,
                    position: token.position,
                })
            }
            Some(_) => {}
        }
    }

    match stack.last() {
        Some(&innermost) => Err(StructureError::Unclosed {
            open: stack.len(),
            innermost,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mlg::lexing::lex;
    use crate::mlg::testing::factories::mk_token;
    use crate::mlg::token::TokenKind;

    #[test]
    fn test_lexer_output_is_well_formed() {
        let output = lex("a:\n. b:\n  . c, d\n. e\nf: 'x'\n\ng: h\n", "doc");
        assert_eq!(check_structure(&output.tokens), Ok(()));
    }

    #[test]
    fn test_empty_stream_is_well_formed() {
        assert_eq!(check_structure(&[]), Ok(()));
    }

    #[test]
    fn test_unopened_end() {
        let tokens = vec![mk_token(TokenKind::EndSection, "", 4)];
        assert_eq!(
            check_structure(&tokens),
            Err(StructureError::Unopened {
                frame: Frame::Section,
                position: Position::new(4, 0, 4),
            })
        );
    }

    #[test]
    fn test_mismatched_end() {
        let tokens = vec![
            mk_token(TokenKind::BeginSection, "", 0),
            mk_token(TokenKind::BeginArgument, "", 3),
            mk_token(TokenKind::EndSection, "", 5),
        ];
        let error = check_structure(&tokens).unwrap_err();
        assert_eq!(
            error,
            StructureError::Mismatched {
                expected: Frame::Argument,
                found: Frame::Section,
                position: Position::new(5, 0, 5),
            }
        );
        assert_eq!(
            error.to_string(),
            "1:6: EndSection does not close the open Argument"
        );
    }

    #[test]
    fn test_unclosed_frames() {
        let tokens = vec![
            mk_token(TokenKind::BeginTopLevelGroup, "", 0),
            mk_token(TokenKind::BeginSection, "", 0),
            mk_token(TokenKind::Name, "a", 0),
        ];
        let error = check_structure(&tokens).unwrap_err();
        assert_eq!(
            error,
            StructureError::Unclosed {
                open: 2,
                innermost: Frame::Section,
            }
        );
        assert_eq!(
            error.to_string(),
            "2 frame(s) left open at end of stream, innermost Section"
        );
    }
}
