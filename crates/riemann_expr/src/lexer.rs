//! Tokenizer for expression source text

use std::fmt;

use crate::ExprError;

/// Kinds of tokens produced by [`tokenize`]
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Ident(String),
    /// `Math.name`, holding `name`
    MathMember(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    /// `^` or `**`
    Caret,
    LParen,
    RParen,
    Comma,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "{}", n),
            TokenKind::Ident(name) => write!(f, "{}", name),
            TokenKind::MathMember(name) => write!(f, "Math.{}", name),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::Percent => write!(f, "%"),
            TokenKind::Caret => write!(f, "^"),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::Comma => write!(f, ","),
        }
    }
}

/// A token and the byte offset where it starts
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: usize,
}

impl Token {
    fn new(kind: TokenKind, pos: usize) -> Self {
        Self { kind, pos }
    }
}

/// Split source text into tokens
///
/// `Math.name` is folded into a single `MathMember(name)` token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ExprError> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        let start = i;

        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }

        if c.is_ascii_digit() || (c == b'.' && bytes.get(i + 1).is_some_and(u8::is_ascii_digit)) {
            i = scan_number(bytes, i);
            let text = &source[start..i];
            let value = text.parse::<f64>().map_err(|_| ExprError::InvalidNumber {
                pos: start,
                text: text.to_string(),
            })?;
            tokens.push(Token::new(TokenKind::Number(value), start));
            continue;
        }

        if is_ident_start(c) {
            i = scan_ident(bytes, i);
            let name = &source[start..i];

            if name == "Math" && bytes.get(i) == Some(&b'.') {
                let member_start = i + 1;
                if !bytes.get(member_start).is_some_and(|b| is_ident_start(*b)) {
                    return Err(match source[member_start..].chars().next() {
                        Some(ch) => ExprError::UnexpectedChar { pos: member_start, ch },
                        None => ExprError::UnexpectedEnd,
                    });
                }
                i = scan_ident(bytes, member_start);
                let member = source[member_start..i].to_string();
                tokens.push(Token::new(TokenKind::MathMember(member), start));
                continue;
            }

            tokens.push(Token::new(TokenKind::Ident(name.to_string()), start));
            continue;
        }

        let kind = match c {
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' if bytes.get(i + 1) == Some(&b'*') => {
                i += 1;
                TokenKind::Caret
            }
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'%' => TokenKind::Percent,
            b'^' => TokenKind::Caret,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b',' => TokenKind::Comma,
            _ => {
                // Report the full (possibly multi-byte) character
                let ch = source[start..].chars().next().unwrap_or('?');
                return Err(ExprError::UnexpectedChar { pos: start, ch });
            }
        };
        i += 1;
        tokens.push(Token::new(kind, start));
    }

    Ok(tokens)
}

fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

fn scan_ident(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
        i += 1;
    }
    i
}

fn scan_number(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
    }
    // Exponent only if digits follow, so `2e` stays `2` then `e`
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        if j < bytes.len() && bytes[j].is_ascii_digit() {
            i = j;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
        }
    }
    i
}
