use ember_core::{
    plan::{Limit, LimitNode, ResolvedLimit},
    stmt::{ConstInput, Expr, Value},
};

// ---------------------------------------------------------------------------
// Literal bounds
// ---------------------------------------------------------------------------

#[test]
fn default_node_is_unbounded_without_offset() {
    let node = LimitNode::new();
    assert_eq!(
        node.resolve(ConstInput::new()).unwrap(),
        ResolvedLimit::unbounded(0)
    );
}

#[test]
fn literal_limit_and_offset() {
    let node = LimitNode::new().with_limit(10).with_offset(5);
    assert_eq!(
        node.resolve(ConstInput::new()).unwrap(),
        ResolvedLimit::bounded(10, 5)
    );
}

#[test]
fn literal_bounds_ignore_supplied_params() {
    let node = LimitNode::new().with_limit(3).with_offset(1);
    let params = vec![Value::I64(99), Value::I64(42)];
    assert_eq!(node.resolve(&params).unwrap(), ResolvedLimit::bounded(3, 1));
}

#[test]
fn literal_zero_limit() {
    let node = LimitNode::new().with_limit(0);
    let resolved = node.resolve(ConstInput::new()).unwrap();
    assert_eq!(resolved.limit, Limit::Bounded(0));
    assert!(resolved.is_empty_window());
}

#[test]
fn literal_node_is_const() {
    assert!(LimitNode::new().with_limit(10).is_const());
}

// ---------------------------------------------------------------------------
// Parameterized limit
// ---------------------------------------------------------------------------

#[test]
fn limit_param_overrides_literal() {
    let node = LimitNode::new().with_limit(10).with_limit_param(0usize);
    assert_eq!(
        node.resolve([Value::I64(25)]).unwrap(),
        ResolvedLimit::bounded(25, 0)
    );
}

#[test]
fn limit_param_reads_requested_position() {
    let node = LimitNode::new().with_limit_param(2usize);
    let params = vec![Value::I64(1), Value::I64(2), Value::I64(7)];
    assert_eq!(node.resolve(&params).unwrap().limit, Limit::Bounded(7));
}

#[test]
fn limit_param_coerces_narrow_integers() {
    let node = LimitNode::new().with_limit_param(0usize);
    assert_eq!(
        node.resolve([Value::I8(4)]).unwrap().limit,
        Limit::Bounded(4)
    );
    assert_eq!(
        node.resolve([Value::I32(40)]).unwrap().limit,
        Limit::Bounded(40)
    );
    assert_eq!(
        node.resolve([Value::U64(400)]).unwrap().limit,
        Limit::Bounded(400)
    );
}

#[test]
fn limit_param_coerces_integer_string() {
    let node = LimitNode::new().with_limit_param(0usize);
    assert_eq!(
        node.resolve([Value::from("12")]).unwrap().limit,
        Limit::Bounded(12)
    );
}

#[test]
fn limit_param_null_is_unbounded() {
    let node = LimitNode::new().with_limit(10).with_limit_param(0usize);
    assert_eq!(
        node.resolve([Value::Null]).unwrap().limit,
        Limit::Unbounded
    );
}

#[test]
fn limit_param_zero() {
    let node = LimitNode::new().with_limit_param(0usize);
    assert!(node.resolve([Value::I64(0)]).unwrap().is_empty_window());
}

#[test]
fn limit_param_negative_is_contract_violation() {
    let node = LimitNode::new().with_limit_param(0usize);
    let err = node.resolve([Value::I64(-1)]).unwrap_err();
    assert!(err.is_contract_violation());
}

#[test]
fn limit_param_non_integer_is_contract_violation() {
    let node = LimitNode::new().with_limit_param(0usize);
    let err = node.resolve([Value::Bool(true)]).unwrap_err();
    assert!(err.is_contract_violation());
    assert!(err.root().is_type_conversion());
}

#[test]
fn limit_param_out_of_range_is_contract_violation() {
    let node = LimitNode::new().with_limit_param(3usize);
    let params = vec![Value::I64(1)];
    let err = node.resolve(&params).unwrap_err();
    assert!(err.is_contract_violation());
    assert_eq!(
        err.to_string(),
        "contract violation: LIMIT parameter index 3 is not bound"
    );
}

#[test]
fn limit_param_with_no_binding_is_contract_violation() {
    let node = LimitNode::new().with_limit_param(0usize);
    assert!(node
        .resolve(ConstInput::new())
        .unwrap_err()
        .is_contract_violation());
}

#[test]
fn parameterized_node_is_not_const() {
    assert!(!LimitNode::new().with_limit_param(0usize).is_const());
    assert!(!LimitNode::new().with_offset_param(0usize).is_const());
}

// ---------------------------------------------------------------------------
// Parameterized offset
// ---------------------------------------------------------------------------

#[test]
fn offset_param_overrides_literal() {
    let node = LimitNode::new().with_limit(10).with_offset(2).with_offset_param(0usize);
    assert_eq!(
        node.resolve([Value::I64(30)]).unwrap(),
        ResolvedLimit::bounded(10, 30)
    );
}

#[test]
fn limit_and_offset_params_together() {
    let node = LimitNode::new()
        .with_limit_param(1usize)
        .with_offset_param(0usize);
    let params = vec![Value::I64(20), Value::I64(5)];
    assert_eq!(node.resolve(&params).unwrap(), ResolvedLimit::bounded(5, 20));
}

#[test]
fn offset_param_null_is_zero() {
    let node = LimitNode::new().with_offset(4).with_offset_param(0usize);
    assert_eq!(node.resolve([Value::Null]).unwrap().offset, 0);
}

#[test]
fn offset_param_negative_is_contract_violation() {
    let node = LimitNode::new().with_offset_param(0usize);
    let err = node.resolve([Value::I64(-3)]).unwrap_err();
    assert!(err.is_contract_violation());
    assert_eq!(
        err.to_string(),
        "contract violation: OFFSET parameter is negative: -3"
    );
}

#[test]
fn offset_param_out_of_range_is_contract_violation() {
    let node = LimitNode::new().with_limit(1).with_offset_param(1usize);
    let err = node.resolve([Value::I64(1)]).unwrap_err();
    assert!(err.is_contract_violation());
}

// ---------------------------------------------------------------------------
// Pushed-down limit expression
// ---------------------------------------------------------------------------

#[test]
fn limit_expr_constant_sum() {
    let node = LimitNode::new().with_limit_expr(Expr::add(5i64, 10i64));
    assert_eq!(
        node.resolve(ConstInput::new()).unwrap(),
        ResolvedLimit::bounded(15, 0)
    );
    assert!(node.is_const());
}

#[test]
fn limit_expr_over_params() {
    let node = LimitNode::new().with_limit_expr(Expr::add(Expr::arg(0usize), Expr::arg(1usize)));
    let params = vec![Value::I64(10), Value::I64(20)];
    assert_eq!(node.resolve(&params).unwrap(), ResolvedLimit::bounded(30, 0));
    assert!(!node.is_const());
}

#[test]
fn limit_expr_coerces_integer_string_params() {
    let node = LimitNode::new().with_limit_expr(Expr::add(Expr::arg(0usize), Expr::arg(1usize)));
    let params = vec![Value::from("10"), Value::from("5")];
    assert_eq!(node.resolve(&params).unwrap(), ResolvedLimit::bounded(15, 0));
}

#[test]
fn limit_expr_and_limit_param_agree_on_string_params() {
    let params = vec![Value::from("10"), Value::I64(0)];

    let direct = LimitNode::new().with_limit_param(0usize);
    let pushed_down = LimitNode::new().with_limit_expr(Expr::add(Expr::arg(0usize), Expr::arg(1usize)));

    assert_eq!(
        direct.resolve(&params).unwrap(),
        pushed_down.resolve(&params).unwrap()
    );
}

#[test]
fn limit_expr_non_integer_string_is_contract_violation() {
    let node = LimitNode::new().with_limit_expr(Expr::add(Expr::arg(0usize), 1i64));
    let err = node.resolve([Value::from("ten")]).unwrap_err();
    assert!(err.is_contract_violation());
    assert!(err.root().is_type_conversion());
}

#[test]
fn limit_expr_zeroes_literal_offset() {
    let node = LimitNode::new()
        .with_offset(7)
        .with_limit_expr(Expr::add(1i64, 2i64));
    assert_eq!(
        node.resolve(ConstInput::new()).unwrap(),
        ResolvedLimit::bounded(3, 0)
    );
}

#[test]
fn limit_expr_zeroes_offset_param() {
    let node = LimitNode::new()
        .with_offset_param(0usize)
        .with_limit_expr(Expr::add(Expr::arg(0usize), 4i64));

    for offset in [0, 1, 50] {
        let resolved = node.resolve([Value::I64(offset)]).unwrap();
        assert_eq!(resolved, ResolvedLimit::bounded(offset as usize + 4, 0));
    }
}

#[test]
fn limit_expr_takes_priority_over_limit_param() {
    let node = LimitNode::new()
        .with_limit_param(0usize)
        .with_limit_expr(Expr::add(Expr::arg(1usize), 1i64));
    let params = vec![Value::I64(100), Value::I64(8)];
    assert_eq!(node.resolve(&params).unwrap().limit, Limit::Bounded(9));
}

#[test]
fn limit_expr_does_not_read_unused_params() {
    // The offset parameter index is unbound, but the expression wins.
    let node = LimitNode::new()
        .with_offset_param(9usize)
        .with_limit_expr(Expr::add(2i64, 3i64));
    assert_eq!(
        node.resolve(ConstInput::new()).unwrap(),
        ResolvedLimit::bounded(5, 0)
    );
}

#[test]
fn limit_expr_null_is_unbounded() {
    let node = LimitNode::new().with_limit_expr(Expr::add(Expr::arg(0usize), 5i64));
    assert_eq!(
        node.resolve([Value::Null]).unwrap(),
        ResolvedLimit::unbounded(0)
    );
}

#[test]
fn limit_expr_negative_is_contract_violation() {
    let node = LimitNode::new().with_limit_expr(Expr::sub(1i64, 5i64));
    let err = node.resolve(ConstInput::new()).unwrap_err();
    assert!(err.is_contract_violation());
    assert_eq!(
        err.to_string(),
        "contract violation: LIMIT expression is negative: -4"
    );
}

#[test]
fn limit_expr_unbound_param_is_contract_violation() {
    let node = LimitNode::new().with_limit_expr(Expr::add(Expr::arg(2usize), 1i64));
    let err = node.resolve([Value::I64(1)]).unwrap_err();
    assert!(err.is_contract_violation());
    assert!(err.root().is_expression_evaluation_failed());
}

#[test]
fn limit_expr_overflow_is_contract_violation() {
    let node = LimitNode::new().with_limit_expr(Expr::add(i64::MAX, 1i64));
    let err = node.resolve(ConstInput::new()).unwrap_err();
    assert!(err.is_contract_violation());
    assert!(err.root().is_expression_evaluation_failed());
}

// ---------------------------------------------------------------------------
// Purity
// ---------------------------------------------------------------------------

#[test]
fn resolve_is_repeatable() {
    let node = LimitNode::new()
        .with_limit_param(0usize)
        .with_offset_param(1usize);
    let before = node.clone();

    let first = node.resolve([Value::I64(3), Value::I64(1)]).unwrap();
    let second = node.resolve([Value::I64(8), Value::I64(2)]).unwrap();
    let third = node.resolve([Value::I64(3), Value::I64(1)]).unwrap();

    assert_eq!(first, ResolvedLimit::bounded(3, 1));
    assert_eq!(second, ResolvedLimit::bounded(8, 2));
    assert_eq!(first, third);
    assert_eq!(node, before);
}

#[test]
fn resolve_concurrently_with_distinct_bindings() {
    let node = LimitNode::new().with_limit_expr(Expr::add(Expr::arg(0usize), Expr::arg(1usize)));

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..8i64)
            .map(|i| {
                let node = &node;
                s.spawn(move || node.resolve([Value::I64(i), Value::I64(i * 10)]).unwrap())
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), ResolvedLimit::bounded(i * 11, 0));
        }
    });
}
