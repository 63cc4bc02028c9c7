//! Formula parser
//!
//! A small tokenizer and recursive descent parser for the call grammar:
//!
//! ```text
//! formula := '=' expr
//! expr    := NAME '(' [expr (';' expr)*] ')' | OPERAND | '"' text '"'
//! ```
//!
//! Operand text is not interpreted here; the resolver classifies it.

use crate::ast::FormulaExpr;
use crate::error::{FormulaError, FormulaResult};

/// Deepest allowed nesting of function calls
pub const MAX_NESTING: usize = 64;

/// Parse a formula string into an expression tree
///
/// # Example
/// ```rust
/// use sylk_sheets_formula::{parse_formula, FormulaExpr};
///
/// let expr = parse_formula("=SUM(A1:A3;5)").unwrap();
/// assert!(matches!(expr, FormulaExpr::Call { .. }));
///
/// let expr = parse_formula("=B2").unwrap();
/// assert_eq!(expr, FormulaExpr::Operand("B2".into()));
/// ```
pub fn parse_formula(formula: &str) -> FormulaResult<FormulaExpr> {
    let body = formula
        .trim()
        .strip_prefix('=')
        .ok_or_else(|| FormulaError::syntax(formula, "formula must start with '='"))?;

    let mut parser = FormulaParser::new(body).map_err(|e| FormulaError::syntax(formula, e))?;
    let expr = parser
        .parse_expression()
        .map_err(|e| FormulaError::syntax(formula, e))?;

    // Make sure we consumed all input
    if parser.current() != &Token::Eof {
        return Err(FormulaError::syntax(
            formula,
            format!("unexpected {:?} after expression", parser.current()),
        ));
    }

    Ok(expr)
}

/// Token types
#[derive(Debug, Clone, PartialEq)]
enum Token {
    /// Run of text up to the next delimiter, trimmed
    Word(String),
    /// Double-quoted string with `""` escapes resolved
    Quoted(String),
    LeftParen,
    RightParen,
    Semicolon,
    Eof,
}

struct FormulaParser {
    tokens: Vec<Token>,
    pos: usize,
    /// Calls currently open
    depth: usize,
}

impl FormulaParser {
    fn new(input: &str) -> Result<Self, String> {
        Ok(Self {
            tokens: tokenize(input)?,
            pos: 0,
            depth: 0,
        })
    }

    fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&Token::Eof)
    }

    fn consume(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: &Token) -> Result<(), String> {
        if self.current() == expected {
            self.consume();
            Ok(())
        } else {
            Err(format!("expected {:?}, got {:?}", expected, self.current()))
        }
    }

    fn parse_expression(&mut self) -> Result<FormulaExpr, String> {
        match self.consume() {
            Token::Word(word) => {
                if self.current() == &Token::LeftParen {
                    self.parse_call(word)
                } else {
                    Ok(FormulaExpr::Operand(word))
                }
            }
            Token::Quoted(text) => Ok(FormulaExpr::Quoted(text)),
            Token::Eof => Err("unexpected end of formula".into()),
            other => Err(format!("unexpected {:?}", other)),
        }
    }

    fn parse_call(&mut self, name: String) -> Result<FormulaExpr, String> {
        if !is_function_name(&name) {
            return Err(format!("'{}' is not a valid function name", name));
        }
        if self.depth >= MAX_NESTING {
            return Err(format!(
                "function calls nest deeper than {} levels",
                MAX_NESTING
            ));
        }
        self.expect(&Token::LeftParen)?;
        self.depth += 1;

        let mut args = Vec::new();
        if self.current() != &Token::RightParen {
            args.push(self.parse_expression()?);

            while self.current() == &Token::Semicolon {
                self.consume();
                args.push(self.parse_expression()?);
            }
        }

        self.expect(&Token::RightParen)?;
        self.depth -= 1;

        Ok(FormulaExpr::Call {
            name: name.to_lowercase(),
            args,
        })
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut word = String::new();
    let mut chars = input.chars().peekable();

    let flush = |word: &mut String, tokens: &mut Vec<Token>| {
        let trimmed = word.trim();
        if !trimmed.is_empty() {
            tokens.push(Token::Word(trimmed.to_string()));
        }
        word.clear();
    };

    while let Some(c) = chars.next() {
        match c {
            '(' | ')' | ';' => {
                flush(&mut word, &mut tokens);
                tokens.push(match c {
                    '(' => Token::LeftParen,
                    ')' => Token::RightParen,
                    _ => Token::Semicolon,
                });
            }
            '"' => {
                flush(&mut word, &mut tokens);
                let mut text = String::new();
                loop {
                    match chars.next() {
                        // Escaped quote ("")
                        Some('"') if chars.peek() == Some(&'"') => {
                            chars.next();
                            text.push('"');
                        }
                        Some('"') => break,
                        Some(c) => text.push(c),
                        None => return Err("unterminated string literal".into()),
                    }
                }
                tokens.push(Token::Quoted(text));
            }
            _ => word.push(c),
        }
    }
    flush(&mut word, &mut tokens);

    Ok(tokens)
}

fn is_function_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}
