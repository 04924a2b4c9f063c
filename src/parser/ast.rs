// Statement arena for parsed scripts
//
// A script is lexed once and parsed once into a flat arena of statements.
// Every block (the program root, both `if` branches, loop bodies) is a
// contiguous `Span` of that arena, so loops re-run a body by walking the same
// span again instead of re-reading tokens.

use super::lexer::TokenKind;

/// Source location information for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Half-open range of statement indices into [`Program::statements`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Arithmetic operators usable as the single binary step of an assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(ArithOp::Add),
            TokenKind::Minus => Some(ArithOp::Sub),
            TokenKind::Star => Some(ArithOp::Mul),
            TokenKind::Slash => Some(ArithOp::Div),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
        }
    }
}

/// Comparison operators allowed in conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Lt,
    Gt,
}

impl Comparator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Lt => Some(Comparator::Lt),
            TokenKind::Gt => Some(Comparator::Gt),
            _ => None,
        }
    }
}

/// A value read from a single token.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// String or number literal text, used verbatim
    Literal(String),
    /// Variable reference, resolved to its scalar when evaluated
    Variable(String),
    /// A token that carries no value (punctuation, keywords, end of input)
    Nothing,
}

/// `<left> <cmp> <right>`; a missing or non-comparator operator is kept as
/// `None` and always evaluates to false.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub left: Operand,
    pub comparator: Option<Comparator>,
    pub right: Operand,
}

/// One element of a bracket array literal: `value` or `key => value`
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayElement {
    pub key: Option<Operand>,
    pub value: Operand,
}

/// Right-hand side of an assignment
#[derive(Debug, Clone, PartialEq)]
pub enum Rhs {
    Operand(Operand),
    Array(Vec<ArrayElement>),
}

/// `<op> <operand>` applied to a freshly resolved scalar
#[derive(Debug, Clone, PartialEq)]
pub struct Arithmetic {
    pub op: ArithOp,
    pub operand: Operand,
}

/// The `var = var <op> step` part of a `for` header
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub target: String,
    /// `None` when the header names something other than `+ - * /`; the step
    /// then stores `0`.
    pub op: Option<ArithOp>,
    pub amount: Operand,
}

/// Statements
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Echo {
        operand: Operand,
        location: SourceLocation,
    },
    Assign {
        target: String,
        value: Rhs,
        arithmetic: Option<Arithmetic>,
        location: SourceLocation,
    },
    If {
        condition: Condition,
        then_block: Span,
        else_block: Option<Span>,
        location: SourceLocation,
    },
    /// The initializer of a `for` header is emitted as a separate
    /// [`Stmt::Assign`] immediately before this node.
    For {
        condition: Condition,
        step: Step,
        body: Span,
        location: SourceLocation,
    },
    Foreach {
        array: String,
        key: Option<String>,
        value: String,
        body: Span,
        location: SourceLocation,
    },
}

impl Stmt {
    pub fn location(&self) -> SourceLocation {
        match self {
            Stmt::Echo { location, .. }
            | Stmt::Assign { location, .. }
            | Stmt::If { location, .. }
            | Stmt::For { location, .. }
            | Stmt::Foreach { location, .. } => *location,
        }
    }
}

/// A parsed script: the statement arena plus the span of top-level statements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
    pub root: Span,
}

impl Program {
    /// Statements of a block, in source order.
    pub fn block(&self, span: Span) -> &[Stmt] {
        &self.statements[span.start..span.end]
    }

    /// Top-level statements, in source order.
    pub fn top_level(&self) -> &[Stmt] {
        self.block(self.root)
    }

    /// Total number of statements in the arena, nested ones included.
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
