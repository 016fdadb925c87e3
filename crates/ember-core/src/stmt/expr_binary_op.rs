use super::{BinaryOp, Expr};
use std::fmt;

/// A binary operation between two expressions.
///
/// Applies an integer operator to a left-hand side and right-hand side
/// expression. A pushed-down limit is typically `add(limit, offset)`.
///
/// # Examples
///
/// ```text
/// add(a, b)   // a + b
/// sub(a, b)   // a - b
/// mul(a, b)   // a * b
/// ```
#[derive(Clone, PartialEq)]
pub struct ExprBinaryOp {
    /// The left-hand side expression.
    pub lhs: Box<Expr>,

    /// The operator to apply.
    pub op: BinaryOp,

    /// The right-hand side expression.
    pub rhs: Box<Expr>,
}

impl Expr {
    pub fn binary_op(lhs: impl Into<Self>, op: BinaryOp, rhs: impl Into<Self>) -> Self {
        ExprBinaryOp {
            op,
            lhs: Box::new(lhs.into()),
            rhs: Box::new(rhs.into()),
        }
        .into()
    }

    pub fn add(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        Expr::binary_op(lhs, BinaryOp::Add, rhs)
    }

    pub fn sub(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        Expr::binary_op(lhs, BinaryOp::Sub, rhs)
    }

    pub fn mul(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        Expr::binary_op(lhs, BinaryOp::Mul, rhs)
    }
}

impl From<ExprBinaryOp> for Expr {
    fn from(value: ExprBinaryOp) -> Self {
        Self::BinaryOp(value)
    }
}

impl fmt::Debug for ExprBinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?} {} {:?})", self.lhs, self.op, self.rhs)
    }
}
