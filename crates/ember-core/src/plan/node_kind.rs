use crate::Error;
use std::{fmt, str::FromStr};

/// Stable identity of a plan node type.
///
/// The string form is the `PLAN_NODE_TYPE` value used in serialized plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum NodeKind {
    /// Restricts the rows produced by its child with LIMIT / OFFSET
    Limit,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Limit => "LIMIT",
        }
    }

    pub fn is_limit(self) -> bool {
        matches!(self, Self::Limit)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LIMIT" => Ok(Self::Limit),
            _ => Err(Error::unsupported_feature(format!(
                "plan node type `{s}`"
            ))),
        }
    }
}
