//! Statement parsing
//!
//! Each construct is read positionally, the same way it is executed: header
//! tokens are taken in order and only the tokens that select a construct
//! (`=`, `(`, `)`, `{`, `as`, `else`) are checked. When one of those is
//! missing, the construct is dropped and nothing past the consumed tokens is
//! touched. Its `{ ... }` block, if one follows, is then skipped as a whole.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::Parser;

impl Parser {
    /// Parse one statement, appending zero or more nodes to `out`.
    ///
    /// Always consumes at least one token unless already at end of input.
    pub(crate) fn parse_statement(&mut self, out: &mut Vec<Stmt>) {
        let start = self.position();

        match self.peek_kind() {
            TokenKind::Echo => self.parse_echo(out),
            TokenKind::Variable => self.parse_assignment(out),
            TokenKind::If => self.parse_if(out),
            TokenKind::For => self.parse_for(out),
            TokenKind::Foreach => self.parse_foreach(out),
            TokenKind::LBrace => {
                tracing::trace!(
                    line = self.current_location().line,
                    "skipping block of a dropped construct"
                );
                self.skip_block();
            }
            _ => {}
        }

        if self.position() == start {
            tracing::trace!(
                token = %self.peek(),
                line = self.current_location().line,
                "skipping token that starts no statement"
            );
            self.advance();
        }
    }

    /// `echo <string|variable> [;]`
    fn parse_echo(&mut self, out: &mut Vec<Stmt>) {
        let location = self.current_location();
        self.advance(); // echo

        if matches!(
            self.peek_kind(),
            TokenKind::StringLiteral | TokenKind::Variable
        ) {
            let operand = self.take_operand();
            out.push(Stmt::Echo { operand, location });
        }

        self.match_token(TokenKind::Semicolon);
    }

    /// `<var> = <rhs> [<op> <operand>] [;]`
    fn parse_assignment(&mut self, out: &mut Vec<Stmt>) {
        let location = self.current_location();
        let target = self.take_name().unwrap_or_default();

        if !self.match_token(TokenKind::Eq) {
            return;
        }

        let value = match self.peek_kind() {
            TokenKind::StringLiteral | TokenKind::NumberLiteral | TokenKind::Variable => {
                Rhs::Operand(self.take_operand())
            }
            TokenKind::LBracket => Rhs::Array(self.parse_array_literal()),
            _ => Rhs::Operand(Operand::Nothing),
        };

        let arithmetic = match (&value, ArithOp::from_token(self.peek_kind())) {
            (Rhs::Operand(_), Some(op)) => {
                self.advance(); // operator
                let operand = self.take_operand();
                Some(Arithmetic { op, operand })
            }
            _ => None,
        };

        out.push(Stmt::Assign {
            target,
            value,
            arithmetic,
            location,
        });

        self.match_token(TokenKind::Semicolon);
    }

    /// `if (<left> <cmp> <right>) { ... } [else { ... }]`
    fn parse_if(&mut self, out: &mut Vec<Stmt>) {
        let location = self.current_location();
        self.advance(); // if

        if !self.match_token(TokenKind::LParen) {
            return;
        }
        let condition = self.parse_condition();
        if !self.match_token(TokenKind::RParen) || !self.match_token(TokenKind::LBrace) {
            return;
        }

        let then_block = self.parse_block();

        let mut else_block = None;
        if self.match_token(TokenKind::Else) && self.match_token(TokenKind::LBrace) {
            else_block = Some(self.parse_block());
        }

        out.push(Stmt::If {
            condition,
            then_block,
            else_block,
            location,
        });
    }

    /// `for (var = init; left cmp limit; var = var op step) { ... }`
    ///
    /// The initializer is emitted as its own assignment as soon as it is read,
    /// so it still runs when the rest of the header is malformed.
    fn parse_for(&mut self, out: &mut Vec<Stmt>) {
        let location = self.current_location();
        self.advance(); // for

        if !self.match_token(TokenKind::LParen) {
            return;
        }

        let init_location = self.current_location();
        let init_target = self.take_name();
        if self.match_token(TokenKind::Eq) {
            let init = self.take_operand();
            if let Some(target) = init_target {
                out.push(Stmt::Assign {
                    target,
                    value: Rhs::Operand(init),
                    arithmetic: None,
                    location: init_location,
                });
            }
            self.match_token(TokenKind::Semicolon);
        }

        let condition = self.parse_condition();
        self.match_token(TokenKind::Semicolon);

        let step_target = self.take_name();
        if !self.match_token(TokenKind::Eq) {
            return;
        }
        self.advance(); // repeated step variable
        let op = ArithOp::from_token(self.peek_kind());
        self.advance();
        let amount = self.take_operand();

        if !self.match_token(TokenKind::RParen) || !self.match_token(TokenKind::LBrace) {
            return;
        }
        let body = self.parse_block();

        let Some(target) = step_target else {
            return;
        };

        out.push(Stmt::For {
            condition,
            step: Step { target, op, amount },
            body,
            location,
        });
    }

    /// `foreach ($array as [$key =>] $value) { ... }`
    fn parse_foreach(&mut self, out: &mut Vec<Stmt>) {
        let location = self.current_location();
        self.advance(); // foreach

        if !self.match_token(TokenKind::LParen) {
            return;
        }
        let array = self.take_name();
        if !self.match_token(TokenKind::As) {
            return;
        }

        let mut value = self.take_name();
        let mut key = None;
        if self.match_token(TokenKind::Arrow) {
            key = value;
            value = self.take_name();
        }

        if !self.match_token(TokenKind::RParen) || !self.match_token(TokenKind::LBrace) {
            return;
        }
        let body = self.parse_block();

        let (Some(array), Some(value)) = (array, value) else {
            return;
        };

        out.push(Stmt::Foreach {
            array,
            key,
            value,
            body,
            location,
        });
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::parse;
    use pretty_assertions::assert_eq;

    fn var(name: &str) -> Operand {
        Operand::Variable(name.to_string())
    }

    fn lit(text: &str) -> Operand {
        Operand::Literal(text.to_string())
    }

    #[test]
    fn test_assignment_with_arithmetic() {
        let program = parse("$x = $x + 3;");
        match &program.top_level()[0] {
            Stmt::Assign {
                target,
                value,
                arithmetic,
                ..
            } => {
                assert_eq!(target, "x");
                assert_eq!(value, &Rhs::Operand(var("x")));
                assert_eq!(
                    arithmetic,
                    &Some(Arithmetic {
                        op: ArithOp::Add,
                        operand: lit("3"),
                    })
                );
            }
            other => panic!("Expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_assignment_without_rhs_assigns_nothing() {
        let program = parse("$x = ;");
        match &program.top_level()[0] {
            Stmt::Assign { value, .. } => {
                assert_eq!(value, &Rhs::Operand(Operand::Nothing));
            }
            other => panic!("Expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_array_assignment_takes_no_arithmetic() {
        let program = parse("$a = [1] + 2;");
        let top = program.top_level();
        match &top[0] {
            Stmt::Assign { arithmetic, .. } => assert_eq!(arithmetic, &None),
            other => panic!("Expected assignment, got {:?}", other),
        }
        // `+` and `2` are skipped as stray tokens.
        assert_eq!(top.len(), 1);
    }

    #[test]
    fn test_variable_without_assignment_is_skipped() {
        let program = parse(r#"$x; echo "a";"#);
        assert_eq!(program.top_level().len(), 1);
        assert!(matches!(program.top_level()[0], Stmt::Echo { .. }));
    }

    #[test]
    fn test_echo_of_number_prints_nothing() {
        // Only strings and variables are echoed; the number is then skipped.
        let program = parse("echo 5;");
        assert!(program.top_level().is_empty());
    }

    #[test]
    fn test_for_header() {
        let program = parse("for ($i = 0; $i < 3; $i = $i + 1) { echo $i; }");
        let top = program.top_level();
        assert_eq!(top.len(), 2);

        match &top[0] {
            Stmt::Assign { target, value, .. } => {
                assert_eq!(target, "i");
                assert_eq!(value, &Rhs::Operand(lit("0")));
            }
            other => panic!("Expected initializer, got {:?}", other),
        }
        match &top[1] {
            Stmt::For {
                condition,
                step,
                body,
                ..
            } => {
                assert_eq!(
                    condition,
                    &Condition {
                        left: var("i"),
                        comparator: Some(Comparator::Lt),
                        right: lit("3"),
                    }
                );
                assert_eq!(
                    step,
                    &Step {
                        target: "i".to_string(),
                        op: Some(ArithOp::Add),
                        amount: lit("1"),
                    }
                );
                assert_eq!(program.block(*body).len(), 1);
            }
            other => panic!("Expected for, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_for_keeps_initializer() {
        let program = parse("for ($i = 7; $i < 3; $i) { }");
        let top = program.top_level();
        assert!(matches!(top[0], Stmt::Assign { .. }));
        assert!(!top.iter().any(|s| matches!(s, Stmt::For { .. })));
    }

    #[test]
    fn test_foreach_forms() {
        let program = parse("foreach ($a as $v) { } foreach ($a as $k => $v) { }");
        let top = program.top_level();
        match &top[0] {
            Stmt::Foreach {
                array, key, value, ..
            } => {
                assert_eq!(array, "a");
                assert_eq!(key, &None);
                assert_eq!(value, "v");
            }
            other => panic!("Expected foreach, got {:?}", other),
        }
        match &top[1] {
            Stmt::Foreach { key, value, .. } => {
                assert_eq!(key.as_deref(), Some("k"));
                assert_eq!(value, "v");
            }
            other => panic!("Expected foreach, got {:?}", other),
        }
    }

    #[test]
    fn test_if_missing_paren_drops_its_block() {
        let program = parse(r#"if (1 > 2 { echo "a"; } echo "b";"#);
        let top = program.top_level();
        assert_eq!(top.len(), 1);
        match &top[0] {
            Stmt::Echo { operand, .. } => assert_eq!(operand, &lit("b")),
            other => panic!("Expected echo, got {:?}", other),
        }
        assert_eq!(program.len(), 1);
    }

    #[test]
    fn test_dropped_block_does_not_close_parent() {
        let program = parse(
            r#"if (1 > 2) { if (1 < 2 { if (2 > 1) { echo "a"; } } echo "b"; } echo "c";"#,
        );
        let top = program.top_level();
        assert_eq!(top.len(), 2);
        match &top[0] {
            Stmt::If { then_block, .. } => {
                let then_block = program.block(*then_block);
                assert_eq!(then_block.len(), 1);
                assert!(matches!(
                    &then_block[0],
                    Stmt::Echo { operand, .. } if *operand == lit("b")
                ));
            }
            other => panic!("Expected if, got {:?}", other),
        }
        assert!(matches!(&top[1], Stmt::Echo { operand, .. } if *operand == lit("c")));
    }

    #[test]
    fn test_malformed_foreach_in_loop_body_drops_its_block() {
        let program = parse(
            r#"for ($i = 5; $i < 3; $i = $i + 1) { foreach ($a $v) { echo "x"; } echo "y"; }"#,
        );
        match &program.top_level()[1] {
            Stmt::For { body, .. } => {
                let body = program.block(*body);
                assert_eq!(body.len(), 1);
                assert!(matches!(&body[0], Stmt::Echo { operand, .. } if *operand == lit("y")));
            }
            other => panic!("Expected for, got {:?}", other),
        }
    }

    #[test]
    fn test_unclosed_stray_block_runs_to_end() {
        let program = parse(r#"echo "a"; { echo "b"; { } echo "c";"#);
        assert_eq!(program.top_level().len(), 1);
        assert_eq!(program.len(), 1);
    }

    #[test]
    fn test_else_without_brace() {
        let program = parse(r#"if (1 < 2) { } else echo "x";"#);
        let top = program.top_level();
        match &top[0] {
            Stmt::If { else_block, .. } => assert_eq!(else_block, &None),
            other => panic!("Expected if, got {:?}", other),
        }
        assert!(matches!(top[1], Stmt::Echo { .. }));
    }
}
