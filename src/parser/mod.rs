//! Script source parser
//!
//! This module turns source text into a [`ast::Program`]:
//! - [`lexer`]: Tokenization (source text → tokens), a single pass
//! - [`parse`]: Parser struct, cursor helpers and block handling
//! - [`ast`]: Statement arena and operand definitions
//!
//! # Supported subset
//!
//! - `echo` of a string literal or a variable
//! - Assignment of a literal, a variable, or a bracket array literal, with at
//!   most one trailing `+ - * /` step
//! - `if (a < b) { } else { }`, `for (...) { }`, `foreach ($a as [$k =>] $v) { }`
//!
//! # Parser Implementation
//!
//! Hand-written, positional, and infallible: malformed constructs are dropped
//! rather than reported. No external parser generator dependencies.

pub mod ast;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;
