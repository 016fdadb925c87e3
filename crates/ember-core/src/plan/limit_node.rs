use super::{Hydrator, Limit, NodeKind, ResolvedLimit};
use crate::{
    stmt::{Expr, ExprArg, Input, Value},
    Error, Result,
};

/// Restricts the rows produced by its child to a LIMIT / OFFSET window.
///
/// Each bound comes from exactly one source, picked at resolution time:
///
/// * limit: `limit_expr`, then `limit_param`, then the literal `limit`.
/// * offset: zero when `limit_expr` is set, then `offset_param`, then the
///   literal `offset`.
///
/// `limit_expr` is set when the planner pushes a parent's LIMIT and OFFSET
/// down below it. The expression then evaluates to `limit + offset`, and this
/// node must not skip any rows itself.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LimitNode {
    /// Literal limit, used when no parameter or expression is configured
    limit: Limit,

    /// Literal offset, used when no parameter or expression is configured
    offset: usize,

    /// Parameter supplying the limit at execution time
    limit_param: Option<ExprArg>,

    /// Parameter supplying the offset at execution time
    offset_param: Option<ExprArg>,

    /// Pushed-down `limit + offset`
    limit_expr: Option<Box<Expr>>,
}

impl LimitNode {
    pub fn new() -> LimitNode {
        LimitNode::default()
    }

    /// Hydrates a node from its serialized form using the default options.
    pub fn hydrate(obj: &serde_json::Value) -> Result<LimitNode> {
        Hydrator::default().hydrate_limit(obj)
    }

    pub fn with_limit(mut self, limit: usize) -> LimitNode {
        self.limit = Limit::Bounded(limit);
        self
    }

    pub fn with_offset(mut self, offset: usize) -> LimitNode {
        self.offset = offset;
        self
    }

    pub fn with_limit_param(mut self, param: impl Into<ExprArg>) -> LimitNode {
        self.limit_param = Some(param.into());
        self
    }

    pub fn with_offset_param(mut self, param: impl Into<ExprArg>) -> LimitNode {
        self.offset_param = Some(param.into());
        self
    }

    pub fn with_limit_expr(mut self, expr: impl Into<Expr>) -> LimitNode {
        self.limit_expr = Some(Box::new(expr.into()));
        self
    }

    pub fn kind(&self) -> NodeKind {
        NodeKind::Limit
    }

    pub fn limit(&self) -> Limit {
        self.limit
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn limit_param(&self) -> Option<ExprArg> {
        self.limit_param
    }

    pub fn offset_param(&self) -> Option<ExprArg> {
        self.offset_param
    }

    pub fn limit_expr(&self) -> Option<&Expr> {
        self.limit_expr.as_deref()
    }

    /// Returns true if resolving the node never reads a parameter.
    pub fn is_const(&self) -> bool {
        match &self.limit_expr {
            Some(expr) => expr.is_const(),
            None => self.limit_param.is_none() && self.offset_param.is_none(),
        }
    }

    /// Computes the effective bounds for one execution.
    ///
    /// `params` must already be validated against the statement. A missing
    /// parameter or a negative bound is a contract violation.
    pub fn resolve(&self, mut params: impl Input) -> Result<ResolvedLimit> {
        let mut resolved = ResolvedLimit::new(self.limit, self.offset);

        if let Some(limit_expr) = &self.limit_expr {
            let value = limit_expr.eval(&mut params).map_err(|err| {
                err.context(Error::contract_violation(format!(
                    "failed to evaluate LIMIT expression {limit_expr:?}"
                )))
            })?;

            resolved.limit = limit_from_value(value, "LIMIT expression")?;
            resolved.offset = 0;
        } else {
            if let Some(param) = &self.limit_param {
                let value = param_value(&mut params, param, "LIMIT")?;
                resolved.limit = limit_from_value(value, "LIMIT parameter")?;
            }

            if let Some(param) = &self.offset_param {
                let value = param_value(&mut params, param, "OFFSET")?;
                resolved.offset = offset_from_value(value)?;
            }
        }

        tracing::trace!(
            limit = %resolved.limit,
            offset = resolved.offset,
            "resolved LIMIT bounds"
        );

        Ok(resolved)
    }

    /// Renders the node configuration, one `spacer`-prefixed line per entry.
    pub fn debug_description(&self, spacer: &str) -> String {
        let mut buffer = format!(
            "{spacer}Limit[{}]\n{spacer}Offset[{}]\n{spacer}LimitParamIdx[{}]\n{spacer}OffsetParamIdx[{}]\n",
            self.limit,
            self.offset,
            param_label(self.limit_param),
            param_label(self.offset_param),
        );

        if let Some(limit_expr) = &self.limit_expr {
            buffer.push_str(&format!("{spacer}LimitExpression[{limit_expr:?}]\n"));
        }

        buffer
    }
}

fn param_label(param: Option<ExprArg>) -> String {
    match param {
        Some(param) => param.position.to_string(),
        None => "none".to_string(),
    }
}

fn param_value(params: &mut impl Input, param: &ExprArg, clause: &str) -> Result<Value> {
    params.resolve_arg(param).ok_or_else(|| {
        Error::contract_violation(format!(
            "{clause} parameter index {} is not bound",
            param.position
        ))
    })
}

/// NULL means no limit.
fn limit_from_value(value: Value, what: &str) -> Result<Limit> {
    if value.is_null() {
        return Ok(Limit::Unbounded);
    }

    non_negative(value, what).map(Limit::Bounded)
}

/// NULL means no offset.
fn offset_from_value(value: Value) -> Result<usize> {
    if value.is_null() {
        return Ok(0);
    }

    non_negative(value, "OFFSET parameter")
}

fn non_negative(value: Value, what: &str) -> Result<usize> {
    let n = i64::try_from(value)
        .map_err(|err| err.context(Error::contract_violation(format!("{what} is not an integer"))))?;

    if n < 0 {
        return Err(Error::contract_violation(format!(
            "{what} is negative: {n}"
        )));
    }

    usize::try_from(n)
        .map_err(|_| Error::contract_violation(format!("{what} is out of range: {n}")))
}
