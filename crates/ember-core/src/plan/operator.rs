use super::{LimitNode, NodeKind, ResolvedLimit};
use crate::{stmt::Input, Result};

/// The operation a plan node performs.
#[derive(Debug, Clone, PartialEq)]
pub enum Operator {
    /// Restrict the child's rows to a LIMIT / OFFSET window
    Limit(LimitNode),
}

impl Operator {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Limit(node) => node.kind(),
        }
    }

    pub fn as_limit(&self) -> Option<&LimitNode> {
        match self {
            Self::Limit(node) => Some(node),
        }
    }

    pub fn resolve(&self, params: impl Input) -> Result<ResolvedLimit> {
        match self {
            Self::Limit(node) => node.resolve(params),
        }
    }

    pub fn debug_description(&self, spacer: &str) -> String {
        match self {
            Self::Limit(node) => node.debug_description(spacer),
        }
    }
}

impl From<LimitNode> for Operator {
    fn from(value: LimitNode) -> Self {
        Self::Limit(value)
    }
}
