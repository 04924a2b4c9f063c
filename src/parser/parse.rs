//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and the cursor helpers shared by
//! the statement and expression parsers.
//!
//! # Parser Architecture
//!
//! - This module: Parser struct, cursor helpers, program and block parsing
//! - `statements`: `echo`, assignment, `if`/`else`, `for`, `foreach`
//! - `expressions`: operands, conditions and bracket array literals
//!
//! # Degradation
//!
//! Parsing never fails. Constructs are read positionally, and a construct that
//! is missing an expected parenthesis or brace is dropped after the tokens it
//! already consumed; parsing resumes with whatever token comes next. A `{`
//! left behind by a dropped construct is skipped together with everything up
//! to its matching `}`, so the dropped construct's block never runs and never
//! closes the enclosing block early. Every statement dispatch consumes at
//! least one token, so an unrecognized leading token can never stall the
//! parser.

use crate::parser::ast::*;
use crate::parser::lexer::{Lexer, Token, TokenKind};

/// Single-pass parser from tokens to a statement arena
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    pub(crate) arena: Vec<Stmt>,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        let tokens = Lexer::new(source).tokenize();
        Self::from_tokens(tokens)
    }

    /// Build a parser over an existing token sequence.
    ///
    /// A sequence without a trailing end-of-input token gets one appended.
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(|t| t.is(TokenKind::Eof)) {
            let location = tokens.last().map(|t| t.location).unwrap_or_default();
            tokens.push(Token::new(TokenKind::Eof, location));
        }
        Self {
            tokens,
            position: 0,
            arena: Vec::new(),
        }
    }

    /// Parse the entire script.
    pub fn parse_program(&mut self) -> Program {
        let mut top_level = Vec::new();
        while !self.is_at_end() {
            self.parse_statement(&mut top_level);
        }
        let root = self.push_block(top_level);

        tracing::debug!(
            statements = self.arena.len(),
            top_level = root.len(),
            "parsed program"
        );

        Program {
            statements: std::mem::take(&mut self.arena),
            root,
        }
    }

    /// Parse statements up to the closing `}` of a block whose `{` has
    /// already been consumed, then consume the `}` if present.
    pub(crate) fn parse_block(&mut self) -> Span {
        let mut statements = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            self.parse_statement(&mut statements);
        }
        self.match_token(TokenKind::RBrace);
        self.push_block(statements)
    }

    /// Skip a block that belongs to no statement: the `{` at the cursor and
    /// every token up to its matching `}` (or end of input).
    pub(crate) fn skip_block(&mut self) {
        let mut depth = 0usize;
        while !self.is_at_end() {
            match self.peek_kind() {
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => depth = depth.saturating_sub(1),
                _ => {}
            }
            self.advance();
            if depth == 0 {
                break;
            }
        }
    }

    /// Append a block's statements to the arena as one contiguous span.
    ///
    /// Nested blocks were pushed while their parent statements were parsed,
    /// so the parent's direct statements always land after them.
    fn push_block(&mut self, statements: Vec<Stmt>) -> Span {
        let start = self.arena.len();
        self.arena.extend(statements);
        Span::new(start, self.arena.len())
    }

    // ===== Helper methods =====

    pub(crate) fn peek(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.position.min(last)]
    }

    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Move past the current token. The cursor never moves past end of input.
    pub(crate) fn advance(&mut self) {
        if !self.is_at_end() {
            self.position += 1;
        }
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    pub(crate) fn position(&self) -> usize {
        self.position
    }
}

/// Lex and parse `source` into a [`Program`].
pub fn parse(source: &str) -> Program {
    Parser::new(source).parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_echo() {
        let program = parse(r#"echo "hi"; echo $x;"#);

        assert_eq!(program.top_level().len(), 2);
        match &program.top_level()[0] {
            Stmt::Echo { operand, .. } => {
                assert_eq!(operand, &Operand::Literal("hi".to_string()));
            }
            other => panic!("Expected echo, got {:?}", other),
        }
        match &program.top_level()[1] {
            Stmt::Echo { operand, .. } => {
                assert_eq!(operand, &Operand::Variable("x".to_string()));
            }
            other => panic!("Expected echo, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_blocks_are_contiguous_spans() {
        let program = parse(
            r#"
            echo "a";
            if (1 < 2) { echo "b"; echo "c"; } else { echo "d"; }
            echo "e";
            "#,
        );

        let top = program.top_level();
        assert_eq!(top.len(), 3);
        match &top[1] {
            Stmt::If {
                then_block,
                else_block,
                ..
            } => {
                assert_eq!(program.block(*then_block).len(), 2);
                let else_block = else_block.expect("else block");
                assert_eq!(program.block(else_block).len(), 1);
            }
            other => panic!("Expected if, got {:?}", other),
        }
        assert_eq!(program.len(), 6);
    }

    #[test]
    fn test_unknown_leading_tokens_make_progress() {
        let program = parse(r#"} ) @ ; echo "ok";"#);
        assert_eq!(program.top_level().len(), 1);
        assert!(matches!(program.top_level()[0], Stmt::Echo { .. }));
    }

    #[test]
    fn test_empty_program() {
        let program = parse("<?php");
        assert!(program.is_empty());
        assert!(program.root.is_empty());
    }

    #[test]
    fn test_from_tokens_appends_eof() {
        let mut parser = Parser::from_tokens(Vec::new());
        assert!(parser.is_at_end());
        assert!(parser.parse_program().is_empty());
    }
}
