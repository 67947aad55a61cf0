// Copyright 2025 Stoolap Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Scalar Window Adapter Tests
//!
//! A scalar expression placed where a window function is expected keeps
//! its metadata but cannot be executed as a window function.

use std::sync::Arc;

use sqlwindow::expression::{ArithmeticExpr, ArithmeticOp, CastExpr, ColumnRef, Literal};
use sqlwindow::{
    DataType, Error, ExprRef, Expression, Row, ScalarWindowAdapter, Value, WindowExpression,
    WindowFunction,
};

fn price_times_qty() -> ExprRef {
    Arc::new(ArithmeticExpr::new(
        ArithmeticOp::Multiply,
        Arc::new(ColumnRef::nullable(0, "price", DataType::Float)),
        Arc::new(ColumnRef::new(1, "qty", DataType::Integer)),
    ))
}

/// Test metadata is read from the wrapped expression
#[test]
fn test_adapter_metadata() {
    let inner = price_times_qty();
    let adapter = ScalarWindowAdapter::wrap(Arc::clone(&inner));

    assert_eq!(adapter.data_type(), DataType::Float);
    assert!(adapter.nullable());
    assert!(!adapter.foldable());
    assert!(adapter.resolved());
    assert_eq!(adapter.to_string(), "(price * qty)");
    assert_eq!(adapter.children().len(), 2);

    let literal = ScalarWindowAdapter::wrap(Arc::new(Literal::new(Value::integer(7))));
    assert_eq!(literal.foldable(), Literal::new(Value::integer(7)).foldable());
}

/// Test scalar evaluation goes through the wrapped expression
#[test]
fn test_adapter_scalar_evaluation() {
    let adapter = ScalarWindowAdapter::wrap(price_times_qty());
    let row = Row::from_values(vec![Value::float(2.5), Value::integer(4)]);
    assert_eq!(adapter.evaluate(&row).unwrap(), Value::float(10.0));

    let null_price = Row::from_values(vec![Value::null(DataType::Float), Value::integer(4)]);
    let v = adapter.evaluate(&null_price).unwrap();
    assert!(v.is_null());
    assert_eq!(v.data_type(), DataType::Float);

    // Through the Expression trait object
    let as_expr: ExprRef = Arc::new(adapter);
    assert_eq!(as_expr.evaluate(&row).unwrap(), Value::float(10.0));
}

/// Test the adapter returns exactly what the wrapped expression returns
#[test]
fn test_adapter_matches_direct_evaluation() {
    let cast: ExprRef = Arc::new(CastExpr::new(
        Arc::new(ColumnRef::new(0, "code", DataType::Text)),
        DataType::Integer,
    ));
    let adapter = ScalarWindowAdapter::wrap(Arc::clone(&cast));
    let row = Row::from_values(vec![Value::text("17")]);
    assert_eq!(adapter.evaluate(&row).unwrap(), Value::integer(17));

    // Row values whose type differs from the declared column type
    let qty: ExprRef = Arc::new(ColumnRef::new(1, "qty", DataType::Integer));
    let cases: Vec<(ExprRef, Row)> = vec![
        (
            price_times_qty(),
            Row::from_values(vec![Value::float(2.5), Value::float(1.5)]),
        ),
        (
            Arc::clone(&qty),
            Row::from_values(vec![Value::null_unknown(), Value::text("abc")]),
        ),
        (
            qty,
            Row::from_values(vec![Value::null_unknown(), Value::float(7.9)]),
        ),
        (
            cast,
            Row::from_values(vec![Value::text("not a number")]),
        ),
    ];
    for (expr, row) in cases {
        let adapter = ScalarWindowAdapter::wrap(Arc::clone(&expr));
        let direct = expr.evaluate(&row).expect("Failed to evaluate directly");
        let wrapped = adapter.evaluate(&row).expect("Failed to evaluate adapter");
        assert_eq!(wrapped, direct, "{}", expr);
        assert_eq!(wrapped.data_type(), direct.data_type(), "{}", expr);
    }
}

/// Test rebuilding the wrapped expression over new children
#[test]
fn test_adapter_new_with_children() {
    let children: Vec<ExprRef> = vec![
        Arc::new(Literal::new(Value::float(1.5))),
        Arc::new(Literal::new(Value::integer(2))),
    ];
    let adapter = ScalarWindowAdapter::new(price_times_qty(), children).unwrap();
    assert!(adapter.foldable());
    assert_eq!(adapter.evaluate(&Row::new()).unwrap(), Value::float(3.0));

    let err = ScalarWindowAdapter::new(price_times_qty(), vec![]).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

/// Test the window lifecycle is inert and yields typed NULLs
#[test]
fn test_adapter_lifecycle() {
    let mut adapter = ScalarWindowAdapter::wrap(price_times_qty());
    let row = Row::from_values(vec![Value::float(2.5), Value::integer(4)]);

    WindowFunction::init(&mut adapter).unwrap();
    for _ in 0..3 {
        let input = adapter.prepare_input(&row).unwrap();
        assert!(input.is_empty());
        adapter.update(input).unwrap();
        assert_eq!(
            WindowFunction::evaluate(&mut adapter).unwrap(),
            Value::Null(DataType::Float)
        );
    }
    adapter.batch_update(vec![row.clone(), row]).unwrap();
    assert_eq!(adapter.get(0).unwrap(), Value::Null(DataType::Float));
    WindowFunction::reset(&mut adapter).unwrap();
}

/// Test instantiation is refused on both sides
#[test]
fn test_adapter_new_instance_fails() {
    let adapter = ScalarWindowAdapter::wrap(price_times_qty());

    let err = WindowExpression::new_instance(&adapter).unwrap_err();
    assert!(matches!(err, Error::UnsupportedOperation(_)));
    assert!(err.is_usage_error());

    let err = WindowFunction::new_instance(&adapter).unwrap_err();
    assert!(matches!(err, Error::UnsupportedOperation(_)));

    let boxed: Box<dyn WindowExpression> = Box::new(adapter);
    assert!(boxed.new_instance().is_err());
}
