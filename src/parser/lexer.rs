//! Lexer (tokenizer) for a single expression line
//!
//! Converts raw line text into a flat [`Token`] stream consumed by the symbol
//! table builder and the parser. Whitespace is skipped and never emitted.
//!
//! Unlike a compiler lexer, an unrecognized character does not stop the scan:
//! a [`LexError`] is recorded at that character and scanning resumes with the
//! next one, so a single pass reports every bad character on the line.

use super::charset::{is_allowed_char, is_identifier_continue, is_identifier_start};
use super::cst::SourceLocation;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Token categories, in the priority order the lexer tries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Skipped by the lexer; never present in a token stream.
    Whitespace,
    Plus,
    Minus,
    Multiply,
    Divide,
    Equals,
    LParen,
    RParen,
    NumberLiteral,
    Identifier,
}

impl TokenKind {
    /// Name used in outlines, reports and CST slot keys.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Whitespace => "WhiteSpace",
            TokenKind::Plus => "Plus",
            TokenKind::Minus => "Minus",
            TokenKind::Multiply => "Multiply",
            TokenKind::Divide => "Divide",
            TokenKind::Equals => "Equals",
            TokenKind::LParen => "LParen",
            TokenKind::RParen => "RParen",
            TokenKind::NumberLiteral => "NumberLiteral",
            TokenKind::Identifier => "Identifier",
        }
    }

    /// `+ - * /`
    pub fn is_operator(self) -> bool {
        matches!(
            self,
            TokenKind::Plus | TokenKind::Minus | TokenKind::Multiply | TokenKind::Divide
        )
    }

    /// Number literals and identifiers, the only kinds kept in the symbol table.
    pub fn is_symbol(self) -> bool {
        matches!(self, TokenKind::NumberLiteral | TokenKind::Identifier)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A recognized lexeme with its 1-based, inclusive start and end positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl Token {
    pub fn start(&self) -> SourceLocation {
        SourceLocation::new(self.start_line, self.start_column)
    }

    pub fn end(&self) -> SourceLocation {
        SourceLocation::new(self.end_line, self.end_column)
    }

    /// Length of the lexeme in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.text)
    }
}

/// A character no token pattern matches.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lexer error at line {}, column {}: unexpected character '{character}'", .location.line, .location.column)]
pub struct LexError {
    pub character: char,
    pub location: SourceLocation,
}

impl LexError {
    /// Whether the character is outside the legal expression alphabet, as
    /// opposed to a legal character in an illegal place (a lone `.`).
    pub fn is_invalid_character(&self) -> bool {
        !is_allowed_char(self.character)
    }
}

/// Everything one lexing pass produces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexOutput {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl LexOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Tokenize one line of text. Pure function of its input.
pub fn tokenize(line: &str) -> LexOutput {
    Lexer::new(line).tokenize()
}

/// Character-level scanner over one line of text
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

    /// Tokenize the entire input, collecting every lex error
    pub fn tokenize(mut self) -> LexOutput {
        let mut output = LexOutput::default();

        loop {
            self.skip_whitespace();

            if self.is_at_end() {
                break;
            }

            match self.next_token() {
                Ok(token) => output.tokens.push(token),
                Err(err) => output.errors.push(err),
            }
        }

        output
    }

    /// Match the next token at the current position
    fn next_token(&mut self) -> Result<Token, LexError> {
        let start = self.current_location();
        let ch = match self.advance() {
            Some(ch) => ch,
            None => {
                // tokenize() never calls us at the end of input
                return Err(LexError {
                    character: '\0',
                    location: start,
                });
            }
        };

        let kind = match ch {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Multiply,
            '/' => TokenKind::Divide,
            '=' => TokenKind::Equals,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '0'..='9' => return Ok(self.number_literal(ch, start)),
            c if is_identifier_start(c) => return Ok(self.identifier(ch, start)),
            _ => {
                return Err(LexError {
                    character: ch,
                    location: start,
                })
            }
        };

        Ok(self.make_token(kind, ch.to_string(), start))
    }

    /// `[0-9]+(\.[0-9]+)?`
    fn number_literal(&mut self, first_digit: char, start: SourceLocation) -> Token {
        let mut text = String::new();
        text.push(first_digit);
        self.take_digits(&mut text);

        // The fraction only belongs to the literal when a digit follows the dot
        if self.peek() == Some('.') && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            text.push('.');
            self.take_digits(&mut text);
        }

        self.make_token(TokenKind::NumberLiteral, text, start)
    }

    /// `[A-Za-z][A-Za-z0-9]*`
    fn identifier(&mut self, first_char: char, start: SourceLocation) -> Token {
        let mut text = String::new();
        text.push(first_char);

        while let Some(ch) = self.peek() {
            if is_identifier_continue(ch) {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        self.make_token(TokenKind::Identifier, text, start)
    }

    fn take_digits(&mut self, text: &mut String) {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
    }

    fn make_token(&self, kind: TokenKind, text: String, start: SourceLocation) -> Token {
        let len = text.chars().count();
        Token {
            kind,
            text,
            start_line: start.line,
            start_column: start.column,
            end_line: start.line,
            end_column: start.column + len.saturating_sub(1),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
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

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}
