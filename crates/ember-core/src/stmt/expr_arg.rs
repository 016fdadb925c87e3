use super::Expr;
use std::fmt;

/// A positional parameter placeholder.
///
/// Represents a reference to a runtime parameter by position. During
/// evaluation, `arg(n)` is replaced with the nth value of the parameter
/// binding.
///
/// # Examples
///
/// ```text
/// arg(0)  // refers to the first parameter
/// arg(1)  // refers to the second parameter
/// ```
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct ExprArg {
    /// The zero-based position of the parameter.
    pub position: usize,
}

impl Expr {
    pub fn arg(expr_arg: impl Into<ExprArg>) -> Self {
        Self::Arg(expr_arg.into())
    }
}

impl ExprArg {
    pub fn new(position: usize) -> ExprArg {
        ExprArg { position }
    }
}

impl From<usize> for ExprArg {
    fn from(value: usize) -> Self {
        Self { position: value }
    }
}

impl From<ExprArg> for Expr {
    fn from(value: ExprArg) -> Self {
        Self::Arg(value)
    }
}

impl fmt::Debug for ExprArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "arg({})", self.position)
    }
}
