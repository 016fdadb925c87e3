mod eval;

mod expr;
pub use expr::Expr;

mod expr_arg;
pub use expr_arg::ExprArg;

mod expr_binary_op;
pub use expr_binary_op::ExprBinaryOp;

mod input;
pub use input::{ConstInput, Input};

mod num;

mod op_binary;
pub use op_binary::BinaryOp;

mod value;
pub use value::Value;
