//! Statement execution implementation
//!
//! This module handles the straight-line statements and `if`/`else`:
//!
//! - `echo` of a literal or a variable's current scalar
//! - Assignment, including array literals and the single arithmetic step
//! - Conditionals, whose condition is evaluated once before either branch runs
//!
//! All methods are `pub(crate)` on [`Interpreter`] so they share its
//! environment and terminal.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::{Diagnostic, RuntimeError};
use crate::interpreter::ops::{self, ArithmeticError};
use crate::memory::value::{ArrayEntry, ArrayValue, Value};
use crate::parser::ast::*;
use crate::terminal::Terminal;

impl<T: Terminal> Interpreter<T> {
    pub(crate) fn execute_echo(&mut self, operand: &Operand) -> Result<(), RuntimeError> {
        if let Some(text) = self.snapshot(operand) {
            self.terminal.print(&text)?;
        }
        Ok(())
    }

    pub(crate) fn execute_assignment(
        &mut self,
        target: &str,
        value: &Rhs,
        arithmetic: Option<&Arithmetic>,
    ) -> Result<(), RuntimeError> {
        let value = match value {
            Rhs::Operand(operand) => {
                let scalar = self.snapshot(operand);
                let scalar = match arithmetic {
                    Some(step) => {
                        let right = self.snapshot(&step.operand);
                        Some(self.apply_arithmetic(scalar.as_deref(), step.op, right.as_deref())?)
                    }
                    None => scalar,
                };
                scalar.map(Value::from)
            }
            Rhs::Array(elements) => Some(Value::from(self.build_array(elements))),
        };

        self.env.set(target, value);
        Ok(())
    }

    /// Resolve every element of an array literal against the current
    /// environment. Variables are copied now; later changes to them do not
    /// reach the array.
    pub(crate) fn build_array(&self, elements: &[ArrayElement]) -> ArrayValue {
        elements
            .iter()
            .map(|element| {
                let value = self.snapshot(&element.value).unwrap_or_default();
                match &element.key {
                    Some(key) => ArrayEntry::keyed(self.snapshot(key).unwrap_or_default(), value),
                    None => ArrayEntry::indexed(value),
                }
            })
            .collect()
    }

    /// One arithmetic step; division by zero is reported and yields zero.
    pub(crate) fn apply_arithmetic(
        &mut self,
        left: Option<&str>,
        op: ArithOp,
        right: Option<&str>,
    ) -> Result<String, RuntimeError> {
        match ops::arithmetic(left, op, right) {
            Ok(result) => Ok(result),
            Err(ArithmeticError::DivisionByZero) => {
                self.report(Diagnostic::DivisionByZero {
                    dividend: left.unwrap_or_default().to_string(),
                    location: self.current_location,
                })?;
                Ok(ops::format_number(0.0))
            }
        }
    }

    pub(crate) fn evaluate_condition(&self, condition: &Condition) -> bool {
        ops::compare(
            self.resolve(&condition.left),
            condition.comparator,
            self.resolve(&condition.right),
        )
    }

    pub(crate) fn execute_if(
        &mut self,
        program: &Program,
        condition: &Condition,
        then_block: Span,
        else_block: Option<Span>,
    ) -> Result<(), RuntimeError> {
        if self.evaluate_condition(condition) {
            self.execute_block(program, then_block)
        } else if let Some(else_block) = else_block {
            self.execute_block(program, else_block)
        } else {
            Ok(())
        }
    }
}
