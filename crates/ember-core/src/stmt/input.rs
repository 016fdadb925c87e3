use crate::stmt::{ExprArg, Value};

/// A parameter binding supplied to a plan at execution time.
///
/// Implementations resolve a positional argument to its bound value. `None`
/// means the position is not bound.
pub trait Input {
    fn resolve_arg(&mut self, expr_arg: &ExprArg) -> Option<Value> {
        let _ = expr_arg;
        None
    }
}

/// Input that binds no parameters.
#[derive(Debug, Default)]
pub struct ConstInput {}

impl ConstInput {
    pub fn new() -> ConstInput {
        ConstInput {}
    }
}

impl Input for ConstInput {}

impl<I: Input + ?Sized> Input for &mut I {
    fn resolve_arg(&mut self, expr_arg: &ExprArg) -> Option<Value> {
        (**self).resolve_arg(expr_arg)
    }
}

impl Input for &Vec<Value> {
    fn resolve_arg(&mut self, expr_arg: &ExprArg) -> Option<Value> {
        self.get(expr_arg.position).cloned()
    }
}

impl Input for &[Value] {
    fn resolve_arg(&mut self, expr_arg: &ExprArg) -> Option<Value> {
        self.get(expr_arg.position).cloned()
    }
}

impl<const N: usize> Input for [Value; N] {
    fn resolve_arg(&mut self, expr_arg: &ExprArg) -> Option<Value> {
        self.get(expr_arg.position).cloned()
    }
}

impl<const N: usize> Input for &[Value; N] {
    fn resolve_arg(&mut self, expr_arg: &ExprArg) -> Option<Value> {
        self.get(expr_arg.position).cloned()
    }
}
