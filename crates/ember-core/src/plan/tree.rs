use super::{Hydrator, PlanNode, PlanNodeId};
use crate::Result;
use indexmap::IndexMap;

/// A hydrated plan: nodes keyed by id, in serialized order.
///
/// The first node is the root. Every other node is reachable from the root
/// exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    nodes: IndexMap<PlanNodeId, PlanNode>,
}

impl Plan {
    /// Hydrates a plan from `{"PLAN_NODES": [...]}` using the default options.
    pub fn hydrate(obj: &serde_json::Value) -> Result<Plan> {
        Hydrator::default().hydrate_plan(obj)
    }

    /// Parses and hydrates a plan from its JSON text.
    pub fn from_json_str(src: &str) -> Result<Plan> {
        let obj: serde_json::Value = serde_json::from_str(src)?;
        Plan::hydrate(&obj)
    }

    /// Callers must uphold the tree invariants; [`Hydrator`] checks them.
    pub(super) fn from_nodes(nodes: IndexMap<PlanNodeId, PlanNode>) -> Plan {
        debug_assert!(!nodes.is_empty());
        Plan { nodes }
    }

    pub fn root(&self) -> &PlanNode {
        &self.nodes[0]
    }

    pub fn node(&self, id: PlanNodeId) -> Option<&PlanNode> {
        self.nodes.get(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &PlanNode> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Renders the tree depth-first from the root.
    pub fn debug_description(&self) -> String {
        let mut buffer = String::new();
        self.describe(self.root(), "", &mut buffer);
        buffer
    }

    fn describe(&self, node: &PlanNode, spacer: &str, buffer: &mut String) {
        buffer.push_str(&node.debug_description(spacer));

        let spacer = format!("{spacer}  ");
        for child in node.children.iter().filter_map(|id| self.node(*id)) {
            self.describe(child, &spacer, buffer);
        }
    }
}
