//! Tokenizer for arithmetic expressions, built on logos.

use std::fmt;
use std::ops::Range;

use logos::Logos;

use crate::error::{FormulaError, FormulaResult};

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    /// `1`, `1.5`, `5.`, `.5`, with an optional exponent.
    #[regex(r"([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("**")]
    StarStar,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{n}"),
            Token::Plus => f.write_str("'+'"),
            Token::Minus => f.write_str("'-'"),
            Token::Star => f.write_str("'*'"),
            Token::StarStar => f.write_str("'**'"),
            Token::Slash => f.write_str("'/'"),
            Token::Percent => f.write_str("'%'"),
            Token::LParen => f.write_str("'('"),
            Token::RParen => f.write_str("')'"),
        }
    }
}

pub type Spanned = (Token, Range<usize>);

/// Split an expression into tokens with their byte spans.
pub fn tokenize(source: &str) -> FormulaResult<Vec<Spanned>> {
    Token::lexer(source)
        .spanned()
        .map(|(result, span)| match result {
            Ok(token) => Ok((token, span)),
            Err(()) => Err(lex_error(source, span)),
        })
        .collect()
}

fn lex_error(source: &str, span: Range<usize>) -> FormulaError {
    let ch = source[span.start..].chars().next().unwrap_or('?');
    if ch == '.' || ch.is_ascii_digit() {
        FormulaError::InvalidNumber {
            pos: span.start,
            text: source[span].to_string(),
        }
    } else {
        FormulaError::UnexpectedChar { pos: span.start, ch }
    }
}
