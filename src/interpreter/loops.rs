//! Loop statement execution (`for`, `foreach`).
//!
//! A loop body is a span of the statement arena and each pass simply executes
//! that span again. Whatever the header fixes (the `for` limit and step, the
//! array a `foreach` walks) is captured once on entry; the `for` condition
//! variable is read from the environment again before every pass.
//!
//! There is no iteration limit: a loop whose condition never turns false runs
//! forever.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::value::Value;
use crate::parser::ast::*;
use crate::terminal::Terminal;

impl<T: Terminal> Interpreter<T> {
    /// Executes `for (...; left cmp limit; var = var op step) { body }`.
    ///
    /// The initializer has already run as the preceding assignment. Before each
    /// pass the condition's left side is resolved afresh; after each pass the
    /// step is applied to the step variable's current value and stored back.
    pub(crate) fn execute_for(
        &mut self,
        program: &Program,
        condition: &Condition,
        step: &Step,
        body: Span,
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        let limit = Operand::from_snapshot(self.snapshot(&condition.right));
        let amount = self.snapshot(&step.amount);
        let live_condition = Condition {
            left: condition.left.clone(),
            comparator: condition.comparator,
            right: limit,
        };

        let mut passes: u64 = 0;
        while self.evaluate_condition(&live_condition) {
            self.execute_block(program, body)?;

            self.current_location = location;
            let current = self.env.get_scalar(&step.target).map(str::to_owned);
            let next = match step.op {
                Some(op) => self.apply_arithmetic(current.as_deref(), op, amount.as_deref())?,
                None => "0".to_string(),
            };
            self.env.set_scalar(&step.target, next);
            passes += 1;
        }

        tracing::debug!(line = location.line, passes, "for loop finished");
        Ok(())
    }

    /// Executes `foreach ($array as [$key =>] $value) { body }`.
    ///
    /// The array is copied on entry; reassigning it inside the body does not
    /// change what is iterated. A name that holds no array runs zero passes.
    pub(crate) fn execute_foreach(
        &mut self,
        program: &Program,
        array: &str,
        key: Option<&str>,
        value: &str,
        body: Span,
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        let Some(entries) = self.env.get_array(array).cloned() else {
            tracing::debug!(line = location.line, array, "foreach over non-array skipped");
            return Ok(());
        };

        for entry in &entries {
            if let Some(key) = key {
                self.env.set(key, entry.key.clone().map(Value::Scalar));
            }
            self.env.set_scalar(value, entry.value.as_str());
            self.execute_block(program, body)?;
        }

        tracing::debug!(line = location.line, passes = entries.len(), "foreach finished");
        Ok(())
    }
}

impl Operand {
    /// Freeze resolved text back into an operand; nothing stays nothing.
    pub(crate) fn from_snapshot(text: Option<String>) -> Self {
        text.map_or(Operand::Nothing, Operand::Literal)
    }
}
