use super::Error;

/// Error when a pushed-down LIMIT expression cannot be evaluated.
///
/// This occurs when:
/// - The expression reads a parameter index the execution did not bind
/// - `limit + offset` overflows `i64` (a parent LIMIT near `i64::MAX`)
///
/// Operands that are not integers fail with a type conversion error
/// instead. `LimitNode::resolve` wraps both in a contract violation, so the
/// evaluator error is the root cause seen by the executor.
#[derive(Debug)]
pub(super) struct ExpressionEvaluationFailed {
    message: Box<str>,
}

impl std::error::Error for ExpressionEvaluationFailed {}

impl core::fmt::Display for ExpressionEvaluationFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "expression evaluation failed: {}", self.message)
    }
}

impl Error {
    /// Creates an expression evaluation failed error.
    pub fn expression_evaluation_failed(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::ExpressionEvaluationFailed(
            ExpressionEvaluationFailed {
                message: message.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an expression evaluation failure.
    pub fn is_expression_evaluation_failed(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ExpressionEvaluationFailed(_))
    }
}
