//! Script execution engine
//!
//! This module provides the execution logic:
//! - [`engine`]: Interpreter struct, statement dispatch and operand resolution
//! - [`errors`]: Diagnostics and run errors
//! - [`ops`]: Arithmetic and comparison over operand texts
//!
//! # Execution Model
//!
//! The interpreter walks the statement arena produced by the parser. Blocks
//! are spans of that arena; loops re-execute their body span on every pass and
//! read loop variables from the environment each time, so the observable
//! behavior is that of re-reading the loop body from the source.

pub mod constants;
pub mod engine;
pub mod errors;
mod loops;
pub mod ops;
mod statements;
