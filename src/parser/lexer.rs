//! Lexer (tokenizer) for script source
//!
//! Converts raw source text into a flat, immutable [`Token`] sequence consumed
//! by the parser. Scanning never fails: characters that start no token become
//! [`TokenKind::Unknown`], and an unterminated string literal simply runs to the
//! end of the input. The sequence always ends with exactly one
//! [`TokenKind::Eof`].

use super::ast::SourceLocation;
use crate::interpreter::constants::OPEN_TAG;
use std::fmt;

/// The closed set of token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    Echo,
    For,
    Foreach,
    If,
    Else,
    As,

    // Literals and references (these carry text)
    Variable,
    StringLiteral,
    NumberLiteral,

    // Operators
    Plus,  // +
    Minus, // -
    Star,  // *
    Slash, // /
    Eq,    // =
    Arrow, // =>

    // Comparators
    Lt, // <
    Gt, // >

    // Punctuation
    Semicolon, // ;
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    LBracket,  // [
    RBracket,  // ]
    Comma,     // ,

    Unknown,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Echo => write!(f, "'echo'"),
            TokenKind::For => write!(f, "'for'"),
            TokenKind::Foreach => write!(f, "'foreach'"),
            TokenKind::If => write!(f, "'if'"),
            TokenKind::Else => write!(f, "'else'"),
            TokenKind::As => write!(f, "'as'"),
            TokenKind::Variable => write!(f, "variable"),
            TokenKind::StringLiteral => write!(f, "string literal"),
            TokenKind::NumberLiteral => write!(f, "number literal"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::Eq => write!(f, "'='"),
            TokenKind::Arrow => write!(f, "'=>'"),
            TokenKind::Lt => write!(f, "'<'"),
            TokenKind::Gt => write!(f, "'>'"),
            TokenKind::Semicolon => write!(f, "';'"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::LBrace => write!(f, "'{{'"),
            TokenKind::RBrace => write!(f, "'}}'"),
            TokenKind::LBracket => write!(f, "'['"),
            TokenKind::RBracket => write!(f, "']'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Unknown => write!(f, "unknown character"),
            TokenKind::Eof => write!(f, "end of file"),
        }
    }
}

/// A single lexical unit.
///
/// Only variables (name without the `$` sigil), string literals (contents
/// without quotes) and number literals carry `text`.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: Option<String>,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, location: SourceLocation) -> Self {
        Self {
            kind,
            text: None,
            location,
        }
    }

    pub fn with_text(kind: TokenKind, text: String, location: SourceLocation) -> Self {
        Self {
            kind,
            text: Some(text),
            location,
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.text) {
            (TokenKind::Variable, Some(name)) => write!(f, "variable '${}'", name),
            (TokenKind::StringLiteral, Some(s)) => write!(f, "string literal \"{}\"", s),
            (TokenKind::NumberLiteral, Some(n)) => write!(f, "number literal {}", n),
            (kind, _) => write!(f, "{}", kind),
        }
    }
}

/// Keywords in the order they must be tried: `foreach` before its prefix `for`.
const KEYWORDS: [(&str, TokenKind); 6] = [
    ("foreach", TokenKind::Foreach),
    ("for", TokenKind::For),
    ("echo", TokenKind::Echo),
    ("else", TokenKind::Else),
    ("if", TokenKind::If),
    ("as", TokenKind::As),
];

/// Lexer for script source
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input in a single left-to-right pass.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        self.skip_whitespace();
        if self.starts_with(OPEN_TAG) {
            self.advance_by(OPEN_TAG.chars().count());
        }

        loop {
            self.skip_whitespace();

            if self.is_at_end() {
                tokens.push(Token::new(TokenKind::Eof, self.current_location()));
                break;
            }

            tokens.push(self.next_token());
        }

        tracing::debug!(tokens = tokens.len(), "tokenized source");
        tokens
    }

    /// Get next token. The caller guarantees at least one character remains.
    fn next_token(&mut self) -> Token {
        let loc = self.current_location();

        if let Some(kind) = self.keyword_at_cursor() {
            return Token::new(kind, loc);
        }

        let Some(ch) = self.advance() else {
            return Token::new(TokenKind::Eof, loc);
        };

        match ch {
            '$' => self.variable(loc),
            '"' => self.string_literal(loc),
            '0'..='9' => self.number_literal(ch, loc),

            '=' => {
                if self.peek() == Some('>') {
                    self.advance();
                    Token::new(TokenKind::Arrow, loc)
                } else {
                    Token::new(TokenKind::Eq, loc)
                }
            }
            '+' => Token::new(TokenKind::Plus, loc),
            '-' => Token::new(TokenKind::Minus, loc),
            '*' => Token::new(TokenKind::Star, loc),
            '/' => Token::new(TokenKind::Slash, loc),
            '<' => Token::new(TokenKind::Lt, loc),
            '>' => Token::new(TokenKind::Gt, loc),
            ';' => Token::new(TokenKind::Semicolon, loc),
            '(' => Token::new(TokenKind::LParen, loc),
            ')' => Token::new(TokenKind::RParen, loc),
            '{' => Token::new(TokenKind::LBrace, loc),
            '}' => Token::new(TokenKind::RBrace, loc),
            '[' => Token::new(TokenKind::LBracket, loc),
            ']' => Token::new(TokenKind::RBracket, loc),
            ',' => Token::new(TokenKind::Comma, loc),

            _ => Token::new(TokenKind::Unknown, loc),
        }
    }

    /// Match a keyword at the cursor and consume it.
    ///
    /// Only the character following the keyword is checked: it must not be
    /// alphanumeric. Nothing is required of the character before it.
    fn keyword_at_cursor(&mut self) -> Option<TokenKind> {
        for (word, kind) in KEYWORDS {
            if !self.starts_with(word) {
                continue;
            }
            let len = word.len();
            if self
                .peek_ahead(len)
                .is_some_and(|c| c.is_ascii_alphanumeric())
            {
                continue;
            }
            self.advance_by(len);
            return Some(kind);
        }
        None
    }

    /// `$` followed by zero or more alphanumeric characters
    fn variable(&mut self, loc: SourceLocation) -> Token {
        let mut name = String::new();
        while let Some(ch) = self.peek() {
            if !ch.is_ascii_alphanumeric() {
                break;
            }
            name.push(ch);
            self.advance();
        }
        Token::with_text(TokenKind::Variable, name, loc)
    }

    /// Double-quoted string without escapes; runs to end of input if unterminated
    fn string_literal(&mut self, loc: SourceLocation) -> Token {
        let mut string = String::new();
        while let Some(ch) = self.advance() {
            if ch == '"' {
                break;
            }
            string.push(ch);
        }
        Token::with_text(TokenKind::StringLiteral, string, loc)
    }

    /// Parse numeric literal (integers only)
    fn number_literal(&mut self, first_digit: char, loc: SourceLocation) -> Token {
        let mut digits = String::new();
        digits.push(first_digit);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                digits.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::with_text(TokenKind::NumberLiteral, digits, loc)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_space) {
            self.advance();
        }
    }

    fn starts_with(&self, word: &str) -> bool {
        word.chars()
            .enumerate()
            .all(|(i, expected)| self.peek_ahead(i) == Some(expected))
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = *self.input.get(self.position)?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

/// Blank characters between tokens: ASCII space, tab, newline, carriage
/// return, vertical tab and form feed. Other Unicode spaces scan as unknown.
pub(crate) fn is_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}

/// Tokenize `source` into a sequence terminated by a single end-of-input token.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}
