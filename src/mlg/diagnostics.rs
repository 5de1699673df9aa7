//! Diagnostics raised by the lexer passes
//!
//! Lexing never aborts on malformed input. Every problem is recorded as a [Diagnostic]
//! and the pass carries on from the next plausible token boundary. Each pass re-exports
//! the diagnostics of the pass it consumes, followed by its own.

use crate::mlg::token::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// The pass that raised a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Phase1,
    Phase2,
    Phase3,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Phase1 => f.write_str("phase1"),
            Origin::Phase2 => f.write_str("phase2"),
            Origin::Phase3 => f.write_str("phase3"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub origin: Origin,
    pub message: String,
    pub position: Position,
    /// Document the diagnostic belongs to, as given by the caller
    pub path: String,
}

impl Diagnostic {
    pub fn error(
        origin: Origin,
        message: impl Into<String>,
        position: Position,
        path: impl Into<String>,
    ) -> Self {
        Diagnostic {
            severity: Severity::Error,
            origin,
            message: message.into(),
            position,
            path: path.into(),
        }
    }

    pub fn warning(
        origin: Origin,
        message: impl Into<String>,
        position: Position,
        path: impl Into<String>,
    ) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            ..Diagnostic::error(origin, message, position, path)
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}[{}]: {}",
            self.path, self.position, self.severity, self.origin, self.message
        )
    }
}
