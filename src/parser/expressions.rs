//! Operand, condition and array literal parsing
//!
//! There is no expression grammar beyond single tokens: an operand is one
//! token, a condition is three, and an array literal is a bracketed,
//! comma-separated list of operands with optional `=>` keys.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::Parser;

impl Parser {
    /// Read the current token as an operand and move past it.
    pub(crate) fn take_operand(&mut self) -> Operand {
        let token = self.peek();
        let operand = match (token.kind, token.text()) {
            (TokenKind::Variable, Some(name)) => Operand::Variable(name.to_string()),
            (TokenKind::StringLiteral | TokenKind::NumberLiteral, Some(text)) => {
                Operand::Literal(text.to_string())
            }
            _ => Operand::Nothing,
        };
        self.advance();
        operand
    }

    /// Read the current token as a variable name and move past it.
    ///
    /// Yields `None` (and still advances) when the token is not a variable.
    pub(crate) fn take_name(&mut self) -> Option<String> {
        let token = self.peek();
        let name = match token.kind {
            TokenKind::Variable => token.text.clone(),
            _ => None,
        };
        self.advance();
        name
    }

    /// `<left> <cmp> <right>`, three tokens taken unconditionally
    pub(crate) fn parse_condition(&mut self) -> Condition {
        let left = self.take_operand();
        let comparator = Comparator::from_token(self.peek_kind());
        self.advance();
        let right = self.take_operand();
        Condition {
            left,
            comparator,
            right,
        }
    }

    /// `[ elem, elem => elem, ... ]` with an optional trailing comma.
    ///
    /// The cursor is on the opening bracket. Every element consumes at least
    /// one token, and the list ends at the matching `]` or end of input.
    pub(crate) fn parse_array_literal(&mut self) -> Vec<ArrayElement> {
        self.advance(); // [

        let mut elements = Vec::new();
        while !self.check(TokenKind::RBracket) && !self.is_at_end() {
            let first = self.take_operand();
            let element = if self.match_token(TokenKind::Arrow) {
                ArrayElement {
                    key: Some(first),
                    value: self.take_operand(),
                }
            } else {
                ArrayElement {
                    key: None,
                    value: first,
                }
            };
            elements.push(element);

            self.match_token(TokenKind::Comma);
        }

        self.match_token(TokenKind::RBracket);
        elements
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::parse;
    use pretty_assertions::assert_eq;

    fn array_of(source: &str) -> Vec<ArrayElement> {
        let program = parse(source);
        match &program.top_level()[0] {
            Stmt::Assign {
                value: Rhs::Array(elements),
                ..
            } => elements.clone(),
            other => panic!("Expected array assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_indexed_array_literal() {
        let elements = array_of("$a = [1, \"two\", $three];");
        assert_eq!(
            elements,
            vec![
                ArrayElement {
                    key: None,
                    value: Operand::Literal("1".to_string()),
                },
                ArrayElement {
                    key: None,
                    value: Operand::Literal("two".to_string()),
                },
                ArrayElement {
                    key: None,
                    value: Operand::Variable("three".to_string()),
                },
            ]
        );
    }

    #[test]
    fn test_associative_array_literal_with_trailing_comma() {
        let elements = array_of(r#"$a = ["x" => 1, "y" => $v,];"#);
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].key, Some(Operand::Literal("x".to_string())));
        assert_eq!(elements[1].value, Operand::Variable("v".to_string()));
    }

    #[test]
    fn test_empty_array_literal() {
        assert!(array_of("$a = [];").is_empty());
    }

    #[test]
    fn test_unclosed_array_literal_stops_at_end() {
        let elements = array_of("$a = [1, 2");
        assert_eq!(elements.len(), 2);
    }

    #[test]
    fn test_condition_with_other_operator() {
        let program = parse("if (1 + 2) { }");
        match &program.top_level()[0] {
            Stmt::If { condition, .. } => assert_eq!(condition.comparator, None),
            other => panic!("Expected if, got {:?}", other),
        }
    }
}
