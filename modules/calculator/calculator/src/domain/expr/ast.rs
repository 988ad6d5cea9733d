use super::EvalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Pow,
}

/// Parsed arithmetic expression.
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

impl Expr {
    #[must_use]
    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Self::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    #[must_use]
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Evaluates the tree.
    ///
    /// Recursion follows the tree height, which the parser caps at
    /// [`super::MAX_DEPTH`] levels.
    ///
    /// # Errors
    /// Returns [`EvalError::DivisionByZero`] for `/` or `//` by zero and
    /// [`EvalError::NonFinite`] as soon as any intermediate value overflows
    /// or becomes NaN.
    pub fn eval(&self) -> Result<f64, EvalError> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Unary { op, operand } => {
                let v = operand.eval()?;
                match op {
                    UnaryOp::Plus => v,
                    UnaryOp::Minus => -v,
                }
            }
            Self::Binary { op, lhs, rhs } => apply(*op, lhs.eval()?, rhs.eval()?)?,
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvalError::NonFinite)
        }
    }
}

fn apply(op: BinaryOp, lhs: f64, rhs: f64) -> Result<f64, EvalError> {
    Ok(match op {
        BinaryOp::Add => lhs + rhs,
        BinaryOp::Sub => lhs - rhs,
        BinaryOp::Mul => lhs * rhs,
        BinaryOp::Div => checked_divisor(rhs).map(|d| lhs / d)?,
        BinaryOp::FloorDiv => checked_divisor(rhs).map(|d| (lhs / d).floor())?,
        BinaryOp::Pow => lhs.powf(rhs),
    })
}

fn checked_divisor(rhs: f64) -> Result<f64, EvalError> {
    if rhs == 0.0 {
        Err(EvalError::DivisionByZero)
    } else {
        Ok(rhs)
    }
}
