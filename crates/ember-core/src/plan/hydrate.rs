use super::{Limit, LimitNode, NodeKind, Operator, Plan, PlanNode, PlanNodeId};
use crate::{
    stmt::{BinaryOp, Expr, ExprArg, Value},
    Error, Result,
};
use indexmap::{map::Entry, IndexMap};
use serde_json::{Map, Value as Json};
use std::collections::HashSet;

/// Serialized plan field names.
mod field {
    pub(super) const CHILDREN_IDS: &str = "CHILDREN_IDS";
    pub(super) const ID: &str = "ID";
    pub(super) const ISNULL: &str = "ISNULL";
    pub(super) const LEFT: &str = "LEFT";
    pub(super) const LIMIT: &str = "LIMIT";
    pub(super) const LIMIT_EXPRESSION: &str = "LIMIT_EXPRESSION";
    pub(super) const LIMIT_PARAM_IDX: &str = "LIMIT_PARAM_IDX";
    pub(super) const OFFSET: &str = "OFFSET";
    pub(super) const OFFSET_PARAM_IDX: &str = "OFFSET_PARAM_IDX";
    pub(super) const PARAM_IDX: &str = "PARAM_IDX";
    pub(super) const PLAN_NODES: &str = "PLAN_NODES";
    pub(super) const PLAN_NODE_TYPE: &str = "PLAN_NODE_TYPE";
    pub(super) const RIGHT: &str = "RIGHT";
    pub(super) const TYPE: &str = "TYPE";
    pub(super) const VALUE: &str = "VALUE";
}

/// Builds plan nodes from their serialized JSON description.
///
/// Hydration happens once per compiled statement. The resulting nodes are
/// immutable and may be shared across concurrent executions.
#[derive(Debug, Default, Clone)]
pub struct Hydrator {
    /// Reject LIMIT nodes that carry both a pushed-down expression and an
    /// offset. The expression always zeroes the offset, so such a node
    /// silently ignores its configured offset.
    strict_limit_expression: bool,
}

impl Hydrator {
    pub fn new() -> Hydrator {
        Hydrator::default()
    }

    /// Set whether a LIMIT expression combined with an offset is rejected
    pub fn strict_limit_expression(&mut self, strict: bool) -> &mut Self {
        self.strict_limit_expression = strict;
        self
    }

    /// Hydrates the LIMIT-specific fields of a plan node.
    pub fn hydrate_limit(&self, obj: &Json) -> Result<LimitNode> {
        let map = object(obj, "LIMIT node")?;

        let limit_param = param_index(map, field::LIMIT_PARAM_IDX)?;
        let offset_param = param_index(map, field::OFFSET_PARAM_IDX)?;
        let limit_expr = map
            .get(field::LIMIT_EXPRESSION)
            .map(|expr| {
                hydrate_expr(expr).map_err(|err| {
                    err.context(Error::malformed_plan(format!(
                        "invalid {}",
                        field::LIMIT_EXPRESSION
                    )))
                })
            })
            .transpose()?;

        let limit = match integer(map, field::LIMIT)? {
            Some(-1) => Limit::Unbounded,
            Some(n) => Limit::Bounded(usize::try_from(n).map_err(|_| {
                Error::malformed_plan(format!("{} must be -1 or non-negative; got {n}", field::LIMIT))
            })?),
            None if limit_param.is_some() || limit_expr.is_some() => Limit::Unbounded,
            None => {
                return Err(Error::malformed_plan(format!(
                    "missing {} and neither {} nor {} is given",
                    field::LIMIT,
                    field::LIMIT_PARAM_IDX,
                    field::LIMIT_EXPRESSION
                )))
            }
        };

        let offset = match integer(map, field::OFFSET)? {
            Some(n) => usize::try_from(n).map_err(|_| {
                Error::malformed_plan(format!("{} must be non-negative; got {n}", field::OFFSET))
            })?,
            None => 0,
        };

        if limit_expr.is_some() && (offset_param.is_some() || offset != 0) {
            if self.strict_limit_expression {
                return Err(Error::malformed_plan(format!(
                    "{} cannot be combined with an offset",
                    field::LIMIT_EXPRESSION
                )));
            }

            tracing::warn!(
                offset,
                offset_param = ?offset_param,
                "LIMIT expression overrides the configured offset"
            );
        }

        let mut node = LimitNode::new().with_offset(offset);

        if let Limit::Bounded(n) = limit {
            node = node.with_limit(n);
        }

        if let Some(param) = limit_param {
            node = node.with_limit_param(param);
        }

        if let Some(param) = offset_param {
            node = node.with_offset_param(param);
        }

        if let Some(expr) = limit_expr {
            node = node.with_limit_expr(expr);
        }

        tracing::debug!(
            limit = %node.limit(),
            offset = node.offset(),
            limit_param = ?node.limit_param(),
            offset_param = ?node.offset_param(),
            limit_expr = ?node.limit_expr(),
            "hydrated LIMIT node"
        );

        Ok(node)
    }

    /// Hydrates a plan node: the `ID`, `PLAN_NODE_TYPE` and `CHILDREN_IDS`
    /// header plus the fields of its node type.
    pub fn hydrate_node(&self, obj: &Json) -> Result<PlanNode> {
        let map = object(obj, "plan node")?;

        let id = node_id(map.get(field::ID), field::ID)?;

        let kind: NodeKind = match map.get(field::PLAN_NODE_TYPE) {
            Some(Json::String(kind)) => kind.parse()?,
            Some(other) => {
                return Err(Error::malformed_plan(format!(
                    "{} must be a string; got {other}",
                    field::PLAN_NODE_TYPE
                )))
            }
            None => {
                return Err(Error::malformed_plan(format!(
                    "node {id} is missing {}",
                    field::PLAN_NODE_TYPE
                )))
            }
        };

        let children = match map.get(field::CHILDREN_IDS) {
            Some(Json::Array(ids)) => ids
                .iter()
                .map(|id| node_id(Some(id), field::CHILDREN_IDS))
                .collect::<Result<Vec<_>>>()?,
            Some(other) => {
                return Err(Error::malformed_plan(format!(
                    "{} must be an array; got {other}",
                    field::CHILDREN_IDS
                )))
            }
            None => vec![],
        };

        let operator = match kind {
            NodeKind::Limit => Operator::Limit(
                self.hydrate_limit(obj)
                    .map_err(|err| err.context(Error::malformed_plan(format!("node {id}"))))?,
            ),
        };

        Ok(PlanNode::new(id, operator).with_children(children))
    }

    /// Hydrates a whole plan from `{"PLAN_NODES": [...]}`.
    ///
    /// The first listed node is the root. Ids must be unique, child ids must
    /// refer to listed nodes, and every node must be reachable from the root
    /// exactly once.
    pub fn hydrate_plan(&self, obj: &Json) -> Result<Plan> {
        let map = object(obj, "plan")?;

        let list = match map.get(field::PLAN_NODES) {
            Some(Json::Array(list)) if !list.is_empty() => list,
            Some(Json::Array(_)) => {
                return Err(Error::malformed_plan(format!("{} is empty", field::PLAN_NODES)))
            }
            Some(other) => {
                return Err(Error::malformed_plan(format!(
                    "{} must be an array; got {other}",
                    field::PLAN_NODES
                )))
            }
            None => {
                return Err(Error::malformed_plan(format!(
                    "missing {}",
                    field::PLAN_NODES
                )))
            }
        };

        let mut nodes = IndexMap::with_capacity(list.len());

        for obj in list {
            let node = self.hydrate_node(obj)?;

            match nodes.entry(node.id) {
                Entry::Occupied(_) => {
                    return Err(Error::malformed_plan(format!(
                        "duplicate plan node id {}",
                        node.id
                    )))
                }
                Entry::Vacant(entry) => {
                    entry.insert(node);
                }
            }
        }

        verify_tree(&nodes)?;

        tracing::debug!(nodes = nodes.len(), "hydrated plan");

        Ok(Plan::from_nodes(nodes))
    }
}

fn verify_tree(nodes: &IndexMap<PlanNodeId, PlanNode>) -> Result<()> {
    let mut seen = HashSet::with_capacity(nodes.len());
    let mut stack: Vec<PlanNodeId> = nodes.keys().take(1).copied().collect();

    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            return Err(Error::malformed_plan(format!(
                "plan node {id} is reachable more than once"
            )));
        }

        let Some(node) = nodes.get(&id) else {
            return Err(Error::malformed_plan(format!(
                "child id {id} does not refer to a plan node"
            )));
        };

        stack.extend(node.children.iter().rev().copied());
    }

    if let Some(id) = nodes.keys().find(|id| !seen.contains(*id)) {
        return Err(Error::malformed_plan(format!(
            "plan node {id} is not reachable from the root"
        )));
    }

    Ok(())
}

fn hydrate_expr(obj: &Json) -> Result<Expr> {
    let map = object(obj, "expression")?;

    let ty = match map.get(field::TYPE) {
        Some(Json::String(ty)) => ty.as_str(),
        Some(other) => {
            return Err(Error::malformed_plan(format!(
                "expression {} must be a string; got {other}",
                field::TYPE
            )))
        }
        None => {
            return Err(Error::malformed_plan(format!(
                "expression is missing {}",
                field::TYPE
            )))
        }
    };

    let op = match ty {
        "VALUE_CONSTANT" => return constant(map).map(Expr::Value),
        "VALUE_PARAMETER" => {
            return match param_index(map, field::PARAM_IDX)? {
                Some(param) => Ok(Expr::Arg(param)),
                None => Err(Error::malformed_plan(format!(
                    "parameter expression requires a non-negative {}",
                    field::PARAM_IDX
                ))),
            };
        }
        "OPERATOR_PLUS" => BinaryOp::Add,
        "OPERATOR_MINUS" => BinaryOp::Sub,
        "OPERATOR_MULTIPLY" => BinaryOp::Mul,
        _ => {
            return Err(Error::malformed_plan(format!(
                "unsupported expression type `{ty}`"
            )))
        }
    };

    let operand = |key: &str| match map.get(key) {
        Some(operand) => hydrate_expr(operand),
        None => Err(Error::malformed_plan(format!(
            "`{ty}` expression is missing {key}"
        ))),
    };

    Ok(Expr::binary_op(operand(field::LEFT)?, op, operand(field::RIGHT)?))
}

fn constant(map: &Map<String, Json>) -> Result<Value> {
    if let Some(is_null) = map.get(field::ISNULL) {
        match is_null {
            Json::Bool(true) => return Ok(Value::Null),
            Json::Bool(false) => {}
            other => {
                return Err(Error::malformed_plan(format!(
                    "{} must be a boolean; got {other}",
                    field::ISNULL
                )))
            }
        }
    }

    match map.get(field::VALUE) {
        Some(Json::Null) => Ok(Value::Null),
        Some(Json::Bool(v)) => Ok(Value::Bool(*v)),
        Some(Json::String(v)) => Ok(Value::String(v.clone())),
        Some(Json::Number(n)) => {
            if let Some(v) = n.as_i64() {
                Ok(Value::I64(v))
            } else if let Some(v) = n.as_u64() {
                Ok(Value::U64(v))
            } else {
                Err(Error::malformed_plan(format!(
                    "constant {} must be an integer; got {n}",
                    field::VALUE
                )))
            }
        }
        Some(other) => Err(Error::malformed_plan(format!(
            "constant {} must be a scalar; got {other}",
            field::VALUE
        ))),
        None => Err(Error::malformed_plan(format!(
            "constant expression is missing {}",
            field::VALUE
        ))),
    }
}

fn object<'a>(obj: &'a Json, what: &str) -> Result<&'a Map<String, Json>> {
    obj.as_object()
        .ok_or_else(|| Error::malformed_plan(format!("{what} must be a JSON object; got {obj}")))
}

/// Reads an optional integer field. Absent is `None`; any other non-integer
/// encoding, including `null`, is malformed.
fn integer(map: &Map<String, Json>, key: &str) -> Result<Option<i64>> {
    match map.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_i64()
            .map(Some)
            .ok_or_else(|| Error::malformed_plan(format!("{key} must be an integer; got {value}"))),
    }
}

/// Reads a parameter index where `-1` or absence means "not parameterized".
fn param_index(map: &Map<String, Json>, key: &str) -> Result<Option<ExprArg>> {
    match integer(map, key)? {
        None | Some(-1) => Ok(None),
        Some(n) => usize::try_from(n).map(|position| Some(ExprArg::new(position))).map_err(|_| {
            Error::malformed_plan(format!("{key} must be -1 or non-negative; got {n}"))
        }),
    }
}

fn node_id(value: Option<&Json>, key: &str) -> Result<PlanNodeId> {
    let Some(value) = value else {
        return Err(Error::malformed_plan(format!("plan node is missing {key}")));
    };

    value
        .as_i64()
        .and_then(|id| i32::try_from(id).ok())
        .map(PlanNodeId)
        .ok_or_else(|| Error::malformed_plan(format!("{key} must be a 32-bit integer; got {value}")))
}
