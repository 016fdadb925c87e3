use super::{ExprArg, ExprBinaryOp, Value};
use std::fmt;

#[derive(Clone, PartialEq)]
pub enum Expr {
    /// A parameter supplied at execution time
    Arg(ExprArg),

    /// Binary expression
    BinaryOp(ExprBinaryOp),

    /// Evaluates to a constant value
    Value(Value),
}

impl Expr {
    pub fn null() -> Self {
        Self::Value(Value::Null)
    }

    /// Returns true if evaluating the expression never reads the input.
    pub fn is_const(&self) -> bool {
        match self {
            Self::Arg(_) => false,
            Self::BinaryOp(e) => e.lhs.is_const() && e.rhs.is_const(),
            Self::Value(_) => true,
        }
    }
}

impl Default for Expr {
    fn default() -> Self {
        Self::null()
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Self::Value(value.into())
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Self::Value(value.into())
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arg(e) => e.fmt(f),
            Self::BinaryOp(e) => e.fmt(f),
            Self::Value(e) => e.fmt(f),
        }
    }
}
