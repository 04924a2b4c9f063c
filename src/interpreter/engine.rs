// Execution engine for the script interpreter

use crate::interpreter::errors::{Diagnostic, RuntimeError};
use crate::memory::Environment;
use crate::parser::ast::*;
use crate::terminal::Terminal;

/// Executes a parsed [`Program`] against one run-scoped [`Environment`].
///
/// Each interpreter owns its variables, so separate runs never share state.
pub struct Interpreter<T: Terminal> {
    /// Run-global variables
    pub(crate) env: Environment,

    /// Destination for echoed text and diagnostics
    pub(crate) terminal: T,

    /// Location of the statement being executed
    pub(crate) current_location: SourceLocation,

    /// Number of statements executed so far, loop passes included
    pub(crate) executed: u64,
}

impl<T: Terminal> Interpreter<T> {
    pub fn new(terminal: T) -> Self {
        Interpreter {
            env: Environment::new(),
            terminal,
            current_location: SourceLocation::new(1, 1),
            executed: 0,
        }
    }

    /// Run the program from start to finish.
    ///
    /// Only a failure to write output stops a run early.
    pub fn run(&mut self, program: &Program) -> Result<(), RuntimeError> {
        tracing::debug!(
            statements = program.len(),
            top_level = program.root.len(),
            "starting run"
        );

        self.execute_block(program, program.root)?;
        self.terminal.flush()?;

        tracing::debug!(
            executed = self.executed,
            variables = self.env.len(),
            "run finished"
        );
        Ok(())
    }

    /// Execute every statement of a block in order
    pub(crate) fn execute_block(
        &mut self,
        program: &Program,
        block: Span,
    ) -> Result<(), RuntimeError> {
        for stmt in program.block(block) {
            self.execute_statement(program, stmt)?;
        }
        Ok(())
    }

    /// Execute a single statement
    fn execute_statement(&mut self, program: &Program, stmt: &Stmt) -> Result<(), RuntimeError> {
        self.current_location = stmt.location();
        self.executed += 1;
        tracing::trace!(
            line = self.current_location.line,
            column = self.current_location.column,
            "executing statement"
        );

        match stmt {
            Stmt::Echo { operand, .. } => self.execute_echo(operand),

            Stmt::Assign {
                target,
                value,
                arithmetic,
                ..
            } => self.execute_assignment(target, value, arithmetic.as_ref()),

            Stmt::If {
                condition,
                then_block,
                else_block,
                ..
            } => self.execute_if(program, condition, *then_block, *else_block),

            Stmt::For {
                condition,
                step,
                body,
                location,
            } => self.execute_for(program, condition, step, *body, *location),

            Stmt::Foreach {
                array,
                key,
                value,
                body,
                location,
            } => self.execute_foreach(program, array, key.as_deref(), value, *body, *location),
        }
    }

    /// Resolve an operand to its current text: a literal's own text or a
    /// variable's scalar. Undefined variables and arrays resolve to nothing.
    pub(crate) fn resolve<'a>(&'a self, operand: &'a Operand) -> Option<&'a str> {
        match operand {
            Operand::Literal(text) => Some(text.as_str()),
            Operand::Variable(name) => self.env.get_scalar(name),
            Operand::Nothing => None,
        }
    }

    /// Copy an operand's current text out of the environment
    pub(crate) fn snapshot(&self, operand: &Operand) -> Option<String> {
        self.resolve(operand).map(str::to_owned)
    }

    /// Write a diagnostic to the diagnostic stream and keep going
    pub(crate) fn report(&mut self, diagnostic: Diagnostic) -> Result<(), RuntimeError> {
        let location = diagnostic.location();
        tracing::warn!(
            line = location.line,
            column = location.column,
            %diagnostic,
            "recoverable error"
        );
        self.terminal.report(&diagnostic)?;
        Ok(())
    }

    /// Variables as they stand after (or during) a run
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    /// Consume the interpreter, handing back its terminal
    pub fn into_terminal(self) -> T {
        self.terminal
    }

    /// Number of statements executed, counting every loop pass
    pub fn executed_statements(&self) -> u64 {
        self.executed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::parse;
    use crate::terminal::MockTerminal;

    fn run(source: &str) -> Interpreter<MockTerminal> {
        let program = parse(source);
        let mut interpreter = Interpreter::new(MockTerminal::new());
        interpreter.run(&program).expect("run failed");
        interpreter
    }

    #[test]
    fn test_resolve_operands() {
        let interpreter = run("$x = 4;");
        assert_eq!(
            interpreter.resolve(&Operand::Literal("a".to_string())),
            Some("a")
        );
        assert_eq!(
            interpreter.resolve(&Operand::Variable("x".to_string())),
            Some("4")
        );
        assert_eq!(interpreter.resolve(&Operand::Variable("y".to_string())), None);
        assert_eq!(interpreter.resolve(&Operand::Nothing), None);
    }

    #[test]
    fn test_executed_statement_count_includes_loop_passes() {
        let interpreter = run("for ($i = 0; $i < 3; $i = $i + 1) { echo $i; }");
        // initializer + for + three echo passes
        assert_eq!(interpreter.executed_statements(), 5);
    }

    #[test]
    fn test_fresh_interpreters_do_not_share_state() {
        let first = run("$x = 1;");
        let second = run("echo $x;");
        assert_eq!(first.environment().get_scalar("x"), Some("1"));
        assert_eq!(second.terminal().output(), "");
        assert!(second.environment().is_empty());
    }
}
