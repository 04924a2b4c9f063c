//! Error types for script execution
//!
//! Two kinds of failure exist:
//!
//! - [`Diagnostic`]: a recoverable condition. It is written to the diagnostic
//!   stream, a default value is substituted, and execution continues.
//! - [`RuntimeError`]: the run cannot continue because produced text could not
//!   be delivered.
//!
//! Everything else (undefined variables, malformed constructs, unknown
//! characters) degrades silently and is not represented here.

use crate::parser::ast::SourceLocation;
use std::io;

/// Recoverable conditions reported while execution continues
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Diagnostic {
    /// Division with a zero right operand; the result is replaced by zero
    #[error(
        "division by zero: {dividend} / 0 at line {}, column {}",
        .location.line,
        .location.column
    )]
    DivisionByZero {
        dividend: String,
        location: SourceLocation,
    },
}

impl Diagnostic {
    pub fn location(&self) -> SourceLocation {
        match self {
            Diagnostic::DivisionByZero { location, .. } => *location,
        }
    }
}

/// Fatal run errors
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// Program output or a diagnostic could not be written
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}
