//! Arithmetic expression evaluation.
//!
//! A tokenizer plus recursive descent evaluator for preprocessed formulas,
//! which by this point contain only numbers, `+ - * /` and parentheses.
//!
//! Grammar (lowest to highest precedence, binary operators left-associative):
//!
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := unary (('*' | '/') unary)*
//! unary      := ('+' | '-') unary | primary
//! primary    := NUMBER | '(' expression ')'
//! ```
//!
//! Unary signs are needed because substituted values may be negative
//! (`2*A1` with `A1 = -3` becomes `2*-3`).

use std::fmt;

use crate::error::{FormulaError, Result};

/// Deepest parenthesis/unary nesting accepted before giving up.
pub const MAX_NESTING: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LeftParen,
    RightParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "number {}", n),
            Token::Plus => f.write_str("'+'"),
            Token::Minus => f.write_str("'-'"),
            Token::Star => f.write_str("'*'"),
            Token::Slash => f.write_str("'/'"),
            Token::LeftParen => f.write_str("'('"),
            Token::RightParen => f.write_str("')'"),
        }
    }
}

/// Split an arithmetic string into tokens with their byte positions.
fn tokenize(input: &str) -> Result<Vec<(Token, usize)>> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        let token = match b {
            b' ' | b'\t' | b'\n' | b'\r' => {
                i += 1;
                continue;
            }
            b'+' => Token::Plus,
            b'-' => Token::Minus,
            b'*' => Token::Star,
            b'/' => Token::Slash,
            b'(' => Token::LeftParen,
            b')' => Token::RightParen,
            b'0'..=b'9' | b'.' => {
                let start = i;
                let len = scan_number(&bytes[i..]);
                let text = &input[start..start + len];
                let value = text
                    .parse::<f64>()
                    .map_err(|_| FormulaError::UnexpectedToken {
                        found: format!("'{}'", text),
                        pos: start,
                    })?;
                tokens.push((Token::Number(value), start));
                i += len;
                continue;
            }
            _ => {
                // Report the full character, not a stray UTF-8 byte.
                let found = input[i..].chars().next().unwrap_or('\u{FFFD}');
                return Err(FormulaError::UnexpectedCharacter { found, pos: i });
            }
        };
        tokens.push((token, i));
        i += 1;
    }

    Ok(tokens)
}

/// Length of the decimal literal at the start of `bytes`: digits with at most one '.'.
fn scan_number(bytes: &[u8]) -> usize {
    let mut seen_dot = false;
    let mut len = 0;
    for &b in bytes {
        match b {
            b'0'..=b'9' => {}
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        len += 1;
    }
    len
}

struct ExprParser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    depth: usize,
}

impl ExprParser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).map(|(token, _)| *token)
    }

    fn advance(&mut self) -> Option<(Token, usize)> {
        let next = self.tokens.get(self.pos).copied();
        if next.is_some() {
            self.pos += 1;
        }
        next
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(FormulaError::NestingTooDeep(MAX_NESTING));
        }
        Ok(())
    }

    fn parse_expression(&mut self) -> Result<f64> {
        let mut left = self.parse_term()?;

        loop {
            let negate = match self.peek() {
                Some(Token::Plus) => false,
                Some(Token::Minus) => true,
                _ => break,
            };
            self.advance();
            let right = self.parse_term()?;
            left = if negate { left - right } else { left + right };
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> Result<f64> {
        let mut left = self.parse_unary()?;

        loop {
            let divide = match self.peek() {
                Some(Token::Star) => false,
                Some(Token::Slash) => true,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            left = if divide {
                if right == 0.0 {
                    return Err(FormulaError::DivisionByZero);
                }
                left / right
            } else {
                left * right
            };
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<f64> {
        match self.peek() {
            Some(Token::Minus) => {
                self.advance();
                self.enter()?;
                let operand = self.parse_unary()?;
                self.depth -= 1;
                Ok(-operand)
            }
            Some(Token::Plus) => {
                self.advance();
                self.enter()?;
                let operand = self.parse_unary()?;
                self.depth -= 1;
                Ok(operand)
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<f64> {
        match self.advance() {
            Some((Token::Number(n), _)) => Ok(n),
            Some((Token::LeftParen, _)) => {
                self.enter()?;
                let value = self.parse_expression()?;
                self.depth -= 1;
                match self.advance() {
                    Some((Token::RightParen, _)) => Ok(value),
                    Some((token, pos)) => Err(FormulaError::UnexpectedToken {
                        found: token.to_string(),
                        pos,
                    }),
                    None => Err(FormulaError::UnbalancedParentheses),
                }
            }
            Some((Token::RightParen, _)) => Err(FormulaError::UnbalancedParentheses),
            Some((token, pos)) => Err(FormulaError::UnexpectedToken {
                found: token.to_string(),
                pos,
            }),
            None => Err(FormulaError::UnexpectedEnd),
        }
    }
}

/// Evaluate an arithmetic expression made of numbers, `+ - * /` and parentheses.
///
/// Fails on any other character, unbalanced parentheses, trailing input,
/// division by zero, or a non-finite result.
pub fn eval_arithmetic(input: &str) -> Result<f64> {
    let tokens = tokenize(input)?;
    let mut parser = ExprParser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.parse_expression()?;

    // Make sure we consumed all input
    if let Some((token, pos)) = parser.advance() {
        return Err(match token {
            Token::RightParen => FormulaError::UnbalancedParentheses,
            _ => FormulaError::UnexpectedToken {
                found: token.to_string(),
                pos,
            },
        });
    }

    if !value.is_finite() {
        return Err(FormulaError::NonFinite);
    }
    Ok(value)
}
