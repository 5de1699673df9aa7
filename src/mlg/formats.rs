//! Output formats for token streams
//!
//! A token stream can be rendered in four ways:
//!
//!     simple  one line, tokens separated by a space. Literal tokens print their text,
//!             every other token prints `<Kind>`.
//!     tree    one token per line, indented two spaces per open Begin token.
//!     json    the token list serialized with serde_json.
//!     yaml    the token list serialized with serde_yaml.
//!
//! Diagnostics are always rendered one per line, see [format_diagnostics].

use crate::mlg::diagnostics::Diagnostic;
use crate::mlg::token::Token;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Format '{0}' not found")]
    FormatNotFound(String),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Simple,
    Tree,
    Json,
    Yaml,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Simple,
        OutputFormat::Tree,
        OutputFormat::Json,
        OutputFormat::Yaml,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Simple => "simple",
            OutputFormat::Tree => "tree",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.name() == s)
            .ok_or_else(|| FormatError::FormatNotFound(s.to_string()))
    }
}

/// Render `tokens` in the given format.
pub fn serialize_tokens(tokens: &[Token], format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Simple => Ok(to_simple_str(tokens)),
        OutputFormat::Tree => Ok(to_tree_str(tokens)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(tokens)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(tokens)?),
    }
}

pub fn to_simple_str(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn to_tree_str(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut depth: usize = 0;

    for token in tokens {
        if token.kind.is_end() {
            depth = depth.saturating_sub(1);
        }
        out.push_str(&"  ".repeat(depth));
        if token.kind.is_literal() {
            out.push_str(&format!("{} {:?}", token.kind, token.text));
        } else {
            out.push_str(token.kind.name());
        }
        out.push('\n');
        if token.kind.is_begin() {
            depth += 1;
        }
    }
    out
}

/// One diagnostic per line, `path:row:column: severity[origin]: message`.
pub fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
