//! Recursive-descent parser.
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/' | '//') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := primary ('**' unary)?
//! primary := NUMBER | '(' expr ')'
//! ```

use super::lexer::{Token, TokenKind, tokenize};
use super::{BinaryOp, EvalError, Expr, UnaryOp};

/// Bound on both the parser's recursion (parentheses, stacked signs and
/// exponents) and the height of the resulting tree, so evaluating and
/// dropping the tree stays within a small, fixed stack budget.
pub const MAX_DEPTH: usize = 256;

/// Parses `input` into an expression tree.
///
/// # Errors
/// Returns [`EvalError::Empty`] for blank input and a syntax error variant for
/// anything that is not a single well-formed expression.
pub fn parse(input: &str) -> Result<Expr, EvalError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(EvalError::Empty);
    }

    let mut parser = Parser {
        tokens: &tokens,
        cursor: 0,
        depth: 0,
    };
    let node = parser.expr()?;

    match parser.peek() {
        None => Ok(node.expr),
        Some(Token {
            kind: TokenKind::RParen,
            pos,
        }) => Err(EvalError::UnbalancedParenthesis { pos }),
        Some(token) => Err(unexpected(token)),
    }
}

/// A subtree together with its height.
struct Node {
    expr: Expr,
    height: usize,
}

impl Node {
    fn leaf(value: f64) -> Self {
        Self {
            expr: Expr::Number(value),
            height: 1,
        }
    }

    fn unary(op: UnaryOp, operand: Self) -> Result<Self, EvalError> {
        Self::checked(Expr::unary(op, operand.expr), operand.height + 1)
    }

    fn binary(op: BinaryOp, lhs: Self, rhs: Self) -> Result<Self, EvalError> {
        let height = lhs.height.max(rhs.height) + 1;
        Self::checked(Expr::binary(op, lhs.expr, rhs.expr), height)
    }

    fn checked(expr: Expr, height: usize) -> Result<Self, EvalError> {
        if height > MAX_DEPTH {
            return Err(EvalError::TooDeeplyNested);
        }
        Ok(Self { expr, height })
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    cursor: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.cursor).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.cursor += 1;
        }
        token
    }

    fn descend(&mut self) -> Result<(), EvalError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(EvalError::TooDeeplyNested);
        }
        Ok(())
    }

    fn ascend(&mut self) {
        self.depth -= 1;
    }

    fn expr(&mut self) -> Result<Node, EvalError> {
        self.descend()?;
        let mut lhs = self.term()?;
        while let Some(op) = self.peek().and_then(|t| additive(t.kind)) {
            self.cursor += 1;
            let rhs = self.term()?;
            lhs = Node::binary(op, lhs, rhs)?;
        }
        self.ascend();
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Node, EvalError> {
        let mut lhs = self.unary()?;
        while let Some(op) = self.peek().and_then(|t| multiplicative(t.kind)) {
            self.cursor += 1;
            let rhs = self.unary()?;
            lhs = Node::binary(op, lhs, rhs)?;
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Node, EvalError> {
        let op = match self.peek().map(|t| t.kind) {
            Some(TokenKind::Plus) => UnaryOp::Plus,
            Some(TokenKind::Minus) => UnaryOp::Minus,
            _ => return self.power(),
        };
        self.cursor += 1;

        self.descend()?;
        let operand = self.unary()?;
        self.ascend();
        Node::unary(op, operand)
    }

    fn power(&mut self) -> Result<Node, EvalError> {
        let base = self.primary()?;
        if self.peek().map(|t| t.kind) == Some(TokenKind::DoubleStar) {
            self.cursor += 1;
            self.descend()?;
            let exponent = self.unary()?;
            self.ascend();
            return Node::binary(BinaryOp::Pow, base, exponent);
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Node, EvalError> {
        let token = self.next().ok_or(EvalError::UnexpectedEnd)?;
        match token.kind {
            TokenKind::Number(n) => Ok(Node::leaf(n)),
            TokenKind::LParen => {
                let inner = self.expr()?;
                match self.next() {
                    Some(Token {
                        kind: TokenKind::RParen,
                        ..
                    }) => Ok(inner),
                    None => Err(EvalError::UnbalancedParenthesis { pos: token.pos }),
                    Some(other) => Err(unexpected(other)),
                }
            }
            _ => Err(unexpected(token)),
        }
    }
}

fn additive(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        _ => None,
    }
}

fn multiplicative(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Star => Some(BinaryOp::Mul),
        TokenKind::Slash => Some(BinaryOp::Div),
        TokenKind::DoubleSlash => Some(BinaryOp::FloorDiv),
        _ => None,
    }
}

fn unexpected(token: Token) -> EvalError {
    EvalError::UnexpectedToken {
        token: token.kind.to_string(),
        pos: token.pos,
    }
}
