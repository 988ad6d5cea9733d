//! Tokenizer for arithmetic expressions.

use std::fmt;

use super::EvalError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    DoubleSlash,
    LParen,
    RParen,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Plus => f.write_str("+"),
            Self::Minus => f.write_str("-"),
            Self::Star => f.write_str("*"),
            Self::DoubleStar => f.write_str("**"),
            Self::Slash => f.write_str("/"),
            Self::DoubleSlash => f.write_str("//"),
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
        }
    }
}

/// A token and the character offset it starts at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: usize,
}

/// Splits `input` into tokens, skipping spaces.
///
/// # Errors
/// Returns [`EvalError::UnexpectedCharacter`] for anything outside the
/// arithmetic alphabet and [`EvalError::InvalidNumber`] for literals such as
/// a lone `.`.
pub fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while let Some(&c) = chars.get(pos) {
        let start = pos;
        let kind = match c {
            ' ' => {
                pos += 1;
                continue;
            }
            '0'..='9' | '.' => {
                let (value, end) = scan_number(&chars, start)?;
                pos = end;
                TokenKind::Number(value)
            }
            '+' => {
                pos += 1;
                TokenKind::Plus
            }
            '-' => {
                pos += 1;
                TokenKind::Minus
            }
            '*' | '/' => {
                let doubled = chars.get(pos + 1) == Some(&c);
                pos += if doubled { 2 } else { 1 };
                match (c, doubled) {
                    ('*', false) => TokenKind::Star,
                    ('*', true) => TokenKind::DoubleStar,
                    (_, false) => TokenKind::Slash,
                    (_, true) => TokenKind::DoubleSlash,
                }
            }
            '(' => {
                pos += 1;
                TokenKind::LParen
            }
            ')' => {
                pos += 1;
                TokenKind::RParen
            }
            other => return Err(EvalError::UnexpectedCharacter { ch: other, pos }),
        };
        tokens.push(Token { kind, pos: start });
    }

    Ok(tokens)
}

/// Reads `digits ['.' digits*] | '.' digits` starting at `start`.
///
/// An integer literal may not carry leading zeros (`007`), although zero
/// itself may be written with several (`00`); decimals are unrestricted.
fn scan_number(chars: &[char], start: usize) -> Result<(f64, usize), EvalError> {
    let mut end = start;
    let mut seen_dot = false;
    let mut digits = 0usize;

    while let Some(&c) = chars.get(end) {
        match c {
            '0'..='9' => digits += 1,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }

    let literal: String = chars[start..end].iter().collect();
    let invalid = || EvalError::InvalidNumber {
        literal: literal.clone(),
        pos: start,
    };

    if digits == 0 || has_leading_zero(&literal, seen_dot) {
        return Err(invalid());
    }
    let value: f64 = literal.parse().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid());
    }
    Ok((value, end))
}

fn has_leading_zero(literal: &str, seen_dot: bool) -> bool {
    !seen_dot && literal.len() > 1 && literal.starts_with('0') && literal.contains(|c| c != '0')
}
