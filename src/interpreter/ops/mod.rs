//! Arithmetic and comparison over operand texts
//!
//! Operands are scalar texts (or nothing). Both are read as floating-point
//! numbers, where anything non-numeric counts as zero.

pub mod binary;

pub use binary::{arithmetic, compare, format_number, parse_number, ArithmeticError};
