//! Recursive-descent parser.
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := unary (('*' | '/' | '%') unary)*
//! unary  := ('+' | '-') unary | power
//! power  := atom ('**' unary)?
//! atom   := number | '(' expr ')'
//! ```
//!
//! As in JavaScript, a unary operator may not be applied directly to the
//! base of `**`: `-2 ** 2` is rejected, `(-2) ** 2` and `-(2 ** 2)` are not.

use crate::error::{FormulaError, FormulaResult};
use crate::lexer::{Spanned, Token, tokenize};

/// Deepest tree the parser builds. Parentheses, unary operators and each
/// link of an operator chain all count one level.
pub const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Neg,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

/// Parse a complete expression.
pub fn parse(source: &str) -> FormulaResult<Expr> {
    let mut parser = Parser::new(tokenize(source)?, source.len());
    let expr = parser.parse_expr()?;
    if let Some((token, span)) = parser.peek() {
        return Err(FormulaError::unexpected_token(
            span.start,
            "end of expression",
            token.to_string(),
        ));
    }
    Ok(expr)
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    source_len: usize,
    depth: usize,
}

impl Parser {
    fn new(tokens: Vec<Spanned>, source_len: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            source_len,
            depth: 0,
        }
    }

    fn parse_expr(&mut self) -> FormulaResult<Expr> {
        let mut lhs = self.parse_term()?;
        let mut chained = 0;
        loop {
            let op = if self.match_token(Token::Plus) {
                BinaryOp::Add
            } else if self.match_token(Token::Minus) {
                BinaryOp::Sub
            } else {
                break;
            };
            self.descend()?;
            chained += 1;
            let rhs = self.parse_term()?;
            lhs = binary(op, lhs, rhs);
        }
        self.depth -= chained;
        Ok(lhs)
    }

    fn parse_term(&mut self) -> FormulaResult<Expr> {
        let mut lhs = self.parse_unary()?;
        let mut chained = 0;
        loop {
            let op = if self.match_token(Token::Star) {
                BinaryOp::Mul
            } else if self.match_token(Token::Slash) {
                BinaryOp::Div
            } else if self.match_token(Token::Percent) {
                BinaryOp::Rem
            } else {
                break;
            };
            self.descend()?;
            chained += 1;
            let rhs = self.parse_unary()?;
            lhs = binary(op, lhs, rhs);
        }
        self.depth -= chained;
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> FormulaResult<Expr> {
        let op = if self.match_token(Token::Plus) {
            UnaryOp::Plus
        } else if self.match_token(Token::Minus) {
            UnaryOp::Neg
        } else {
            return self.parse_power();
        };

        self.descend()?;
        let operand = if self.check(Token::Plus) || self.check(Token::Minus) {
            self.parse_unary()?
        } else {
            self.parse_atom()?
        };
        self.depth -= 1;
        if self.check(Token::StarStar) {
            return Err(FormulaError::invalid_syntax(
                self.peek_pos(),
                "unary operator before '**' base needs parentheses",
            ));
        }
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    fn parse_power(&mut self) -> FormulaResult<Expr> {
        let base = self.parse_atom()?;
        if self.match_token(Token::StarStar) {
            // Right-associative: the exponent may itself contain '**'.
            self.descend()?;
            let exponent = self.parse_unary()?;
            self.depth -= 1;
            return Ok(binary(BinaryOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn parse_atom(&mut self) -> FormulaResult<Expr> {
        match self.peek() {
            Some((Token::Number(n), _)) => {
                let n = *n;
                self.advance();
                Ok(Expr::Number(n))
            }
            Some((Token::LParen, _)) => {
                self.advance();
                self.descend()?;
                let inner = self.parse_expr()?;
                self.expect(Token::RParen)?;
                self.depth -= 1;
                Ok(inner)
            }
            Some((token, span)) => Err(FormulaError::unexpected_token(
                span.start,
                "number or '('",
                token.to_string(),
            )),
            None => Err(FormulaError::UnexpectedEof {
                pos: self.source_len,
            }),
        }
    }

    fn descend(&mut self) -> FormulaResult<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(FormulaError::invalid_syntax(
                self.peek_pos(),
                "expression nests too deeply",
            ));
        }
        Ok(())
    }

    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.pos)
    }

    fn peek_pos(&self) -> usize {
        self.peek().map_or(self.source_len, |(_, span)| span.start)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn check(&self, token: Token) -> bool {
        if let Some((t, _)) = self.peek() {
            std::mem::discriminant(t) == std::mem::discriminant(&token)
        } else {
            false
        }
    }

    fn match_token(&mut self, token: Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: Token) -> FormulaResult<()> {
        if self.check(token) {
            self.advance();
            return Ok(());
        }
        match self.peek() {
            Some((found, span)) => Err(FormulaError::unexpected_token(
                span.start,
                token.to_string(),
                found.to_string(),
            )),
            None => Err(FormulaError::UnexpectedEof {
                pos: self.source_len,
            }),
        }
    }
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}
