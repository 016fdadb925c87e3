use crate::{
    stmt::{ConstInput, Expr, Input, Value},
    Result,
};

impl Expr {
    pub fn eval(&self, mut input: impl Input) -> Result<Value> {
        self.eval_ref(&mut input)
    }

    pub fn eval_const(&self) -> Result<Value> {
        self.eval(ConstInput::new())
    }

    fn eval_ref(&self, input: &mut impl Input) -> Result<Value> {
        match self {
            Expr::Arg(expr_arg) => input.resolve_arg(expr_arg).ok_or_else(|| {
                crate::Error::expression_evaluation_failed(format!(
                    "failed to resolve argument {}",
                    expr_arg.position
                ))
            }),
            Expr::BinaryOp(expr_binary_op) => {
                let lhs = expr_binary_op.lhs.eval_ref(input)?;
                let rhs = expr_binary_op.rhs.eval_ref(input)?;

                // SQL arithmetic: NULL on either side propagates
                if lhs.is_null() || rhs.is_null() {
                    return Ok(Value::Null);
                }

                // Operands go through the same integer coercion as bound
                // LIMIT and OFFSET parameters
                let lhs = i64::try_from(lhs)?;
                let rhs = i64::try_from(rhs)?;

                expr_binary_op
                    .op
                    .checked_apply(lhs, rhs)
                    .map(Value::I64)
                    .ok_or_else(|| {
                        crate::Error::expression_evaluation_failed(format!(
                            "integer overflow evaluating {lhs} {} {rhs}",
                            expr_binary_op.op
                        ))
                    })
            }
            Expr::Value(value) => Ok(value.clone()),
        }
    }
}
