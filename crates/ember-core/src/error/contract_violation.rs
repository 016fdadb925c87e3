use super::Error;

/// Error when plan execution breaks an invariant the pipeline guarantees.
///
/// This occurs when:
/// - A parameter index is out of range for the supplied parameter binding
/// - A LIMIT or OFFSET value resolves to a negative integer
/// - A LIMIT or OFFSET parameter is not an integer
/// - A pushed-down LIMIT expression cannot be evaluated
///
/// Parameter bindings are validated before a plan executes, so these are
/// internal errors rather than user input errors. The current execution is
/// aborted; nothing is retried.
#[derive(Debug)]
pub(super) struct ContractViolation {
    message: Box<str>,
}

impl std::error::Error for ContractViolation {}

impl core::fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "contract violation: {}", self.message)
    }
}

impl Error {
    /// Creates a contract violation error.
    pub fn contract_violation(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::ContractViolation(ContractViolation {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a contract violation.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ContractViolation(_))
    }
}
