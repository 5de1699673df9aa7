//! # mlg
//!
//! Structural lexer for the mlg mathematical document format.
//!
//! Documents are written as indentation-sensitive `Name: value` sections with dot-space
//! continuation lines, quoted text and embedded formulations. The [lexing](mlg::lexing)
//! module turns source text into a balanced stream of structural tokens that a tree
//! builder can consume without knowing anything about whitespace.

pub mod mlg;
