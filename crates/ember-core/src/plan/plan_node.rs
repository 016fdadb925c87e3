use super::{Hydrator, NodeKind, Operator, ResolvedLimit};
use crate::{stmt::Input, Result};
use std::fmt;

/// Identifies a node within a plan, as assigned by the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlanNodeId(pub i32);

impl fmt::Display for PlanNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A node in a physical plan tree.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanNode {
    /// Planner-assigned identifier
    pub id: PlanNodeId,

    /// Nodes whose output feeds this one
    pub children: Vec<PlanNodeId>,

    /// What the node does
    pub operator: Operator,
}

impl PlanNode {
    pub fn new(id: PlanNodeId, operator: impl Into<Operator>) -> PlanNode {
        PlanNode {
            id,
            children: vec![],
            operator: operator.into(),
        }
    }

    /// Hydrates a node, including its header fields, using the default options.
    pub fn hydrate(obj: &serde_json::Value) -> Result<PlanNode> {
        Hydrator::default().hydrate_node(obj)
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = PlanNodeId>) -> PlanNode {
        self.children = children.into_iter().collect();
        self
    }

    pub fn kind(&self) -> NodeKind {
        self.operator.kind()
    }

    pub fn resolve(&self, params: impl Input) -> Result<ResolvedLimit> {
        self.operator.resolve(params)
    }

    /// Renders a header line for the node followed by its configuration,
    /// indented one level deeper than `spacer`.
    pub fn debug_description(&self, spacer: &str) -> String {
        let mut buffer = format!("{spacer}* {}[{}]\n", self.kind(), self.id);
        buffer.push_str(&self.operator.debug_description(&format!("{spacer}  ")));
        buffer
    }
}
