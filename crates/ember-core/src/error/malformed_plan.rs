use super::Error;

/// Error when a serialized plan cannot be hydrated.
///
/// This occurs when:
/// - A required field is missing (LIMIT without a parameter index or expression)
/// - A field has the wrong encoded type (a string where an integer is expected)
/// - A value is out of its allowed range (negative OFFSET)
/// - The plan tree is inconsistent (duplicate ids, dangling child ids)
///
/// Hydration failures abort compilation of the statement being planned.
#[derive(Debug)]
pub(super) struct MalformedPlan {
    message: Box<str>,
}

impl std::error::Error for MalformedPlan {}

impl core::fmt::Display for MalformedPlan {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "malformed plan: {}", self.message)
    }
}

impl Error {
    /// Creates a malformed plan error.
    pub fn malformed_plan(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MalformedPlan(MalformedPlan {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a malformed plan error.
    pub fn is_malformed_plan(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MalformedPlan(_))
    }
}
