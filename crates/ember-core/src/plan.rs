//! Physical plan nodes and their hydration from serialized plans.

mod hydrate;
pub use hydrate::Hydrator;

mod limit;
pub use limit::{Limit, ResolvedLimit};

mod limit_node;
pub use limit_node::LimitNode;

mod node_kind;
pub use node_kind::NodeKind;

mod operator;
pub use operator::Operator;

mod plan_node;
pub use plan_node::{PlanNode, PlanNodeId};

mod tree;
pub use tree::Plan;
