//! # Introduction
//!
//! phplite runs short scripts written in a small PHP-like subset: scalar
//! variables, one arithmetic step per assignment, bracket arrays, `if`/`else`,
//! `for` and `foreach`, with `echo` as the only output.
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Lexer → Parser → Program (statement arena) → Interpreter → Terminal
//! ```
//!
//! 1. [`parser`]: tokenises the source once and records statements in a flat
//!    arena where every block is a contiguous span.
//! 2. [`interpreter`]: executes the arena; loops re-run their body span and
//!    re-read loop variables from the environment on every pass.
//! 3. [`memory`]: the run-scoped [`memory::Environment`] holding tagged
//!    [`memory::value::Value`]s (scalar or array).
//! 4. [`terminal`]: where echoed text and diagnostics go: the process's
//!    stdout/stderr, or a [`terminal::MockTerminal`] that records them.
//!
//! ## Failure model
//!
//! Nothing a script contains stops a run. Unknown characters, unterminated
//! strings, undefined variables and malformed constructs all degrade to a
//! default; division by zero writes a diagnostic and yields `0.00`. Only a
//! failure to write output ends a run with [`interpreter::errors::RuntimeError`].

pub mod interpreter;
pub mod memory;
pub mod parser;
pub mod terminal;

use interpreter::engine::Interpreter;
use interpreter::errors::RuntimeError;
use std::sync::Once;
use terminal::Terminal;

/// Lex, parse and execute `source` with a fresh interpreter, handing the
/// terminal back once the run completes.
pub fn run_source<T: Terminal>(source: &str, terminal: T) -> Result<T, RuntimeError> {
    let program = parser::parse::parse(source);
    let mut interpreter = Interpreter::new(terminal);
    interpreter.run(&program)?;
    Ok(interpreter.into_terminal())
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times. Nothing is
/// installed unless `RUST_LOG` is set, e.g. `RUST_LOG=phplite=trace`. Events go
/// to stderr so they never mix with script output.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
