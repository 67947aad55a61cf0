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

//! Running Window Driver Tests
//!
//! Partition evaluation, frame and sort-order validation, and parallel
//! batches.

use std::sync::Arc;

use sqlwindow::expression::{ColumnRef, NullOrdering, SortOrder};
use sqlwindow::functions::FrameUnit;
use sqlwindow::{
    DataType, DenseRankExpression, Error, ExprRef, FrameBoundary, OrderBy, RankExpression, Row,
    RowNumberExpression, RunningWindowDriver, ScalarWindowAdapter, Value, WindowConfig,
    WindowExpression, WindowFrame, WindowSpec,
};

fn score() -> ExprRef {
    Arc::new(ColumnRef::nullable(0, "score", DataType::Integer))
}

fn spec_asc() -> WindowSpec {
    WindowSpec::new(
        OrderBy::from(vec![SortOrder::asc(score())]),
        WindowFrame::running(),
    )
}

fn partition(scores: &[Option<i64>]) -> Vec<Row> {
    scores
        .iter()
        .map(|s| Row::from_values(vec![Value::from(*s)]))
        .collect()
}

fn as_ints(values: &[Value]) -> Vec<i64> {
    values
        .iter()
        .map(|v| v.as_int64().expect("Expected an integer"))
        .collect()
}

fn driver(expr: Arc<dyn WindowExpression>, config: WindowConfig) -> RunningWindowDriver {
    RunningWindowDriver::new(expr, spec_asc(), config).expect("Failed to create driver")
}

/// Test one partition through every rank-like function
#[test]
fn test_evaluate_partition() {
    let rows = partition(&[Some(1), Some(1), Some(2), Some(2), Some(2), Some(4)]);

    let rank = driver(
        Arc::new(RankExpression::new(vec![score()])),
        WindowConfig::default(),
    );
    let dense = driver(
        Arc::new(DenseRankExpression::new(vec![score()])),
        WindowConfig::default(),
    );
    let row_number = driver(
        Arc::new(RowNumberExpression::new(vec![score()])),
        WindowConfig::default(),
    );

    assert_eq!(
        as_ints(&rank.evaluate_partition(&rows).unwrap()),
        vec![1, 1, 3, 3, 3, 6]
    );
    assert_eq!(
        as_ints(&dense.evaluate_partition(&rows).unwrap()),
        vec![1, 1, 2, 2, 2, 3]
    );
    assert_eq!(
        as_ints(&row_number.evaluate_partition(&rows).unwrap()),
        vec![1, 2, 3, 4, 5, 6]
    );
}

/// Test NULL keys form one ordering group
#[test]
fn test_null_keys_share_a_rank() {
    let rows = partition(&[None, None, Some(3), Some(3)]);
    let rank = driver(
        Arc::new(RankExpression::new(vec![score()])),
        WindowConfig::strict(),
    );
    assert_eq!(
        as_ints(&rank.evaluate_partition(&rows).unwrap()),
        vec![1, 1, 3, 3]
    );
}

/// Test each partition restarts numbering
#[test]
fn test_partitions_are_independent() {
    let partitions = vec![
        partition(&[Some(5), Some(5), Some(9)]),
        partition(&[]),
        partition(&[Some(1)]),
    ];
    let rank = driver(
        Arc::new(RankExpression::new(vec![score()])),
        WindowConfig::default(),
    );
    let results = rank.evaluate_partitions(&partitions).unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(as_ints(&results[0]), vec![1, 1, 3]);
    assert!(results[1].is_empty());
    assert_eq!(as_ints(&results[2]), vec![1]);
}

/// Test parallel and sequential batches agree
#[test]
fn test_parallel_matches_sequential() {
    let partitions: Vec<Vec<Row>> = (0..500)
        .map(|p| {
            let rows: Vec<Option<i64>> = (0..(p % 13)).map(|i| Some(i / 3)).collect();
            partition(&rows)
        })
        .collect();
    let expr: Arc<dyn WindowExpression> = Arc::new(DenseRankExpression::new(vec![score()]));

    let parallel = driver(
        Arc::clone(&expr),
        WindowConfig::default().with_min_partitions_for_parallel(1),
    );
    let sequential = driver(expr, WindowConfig::default().sequential());

    assert_eq!(
        parallel.evaluate_partitions(&partitions).unwrap(),
        sequential.evaluate_partitions(&partitions).unwrap()
    );
}

/// Test a rank function is rejected under a sliding frame
#[test]
fn test_frame_validation() {
    let sliding = WindowFrame::try_new(
        FrameUnit::Rows,
        FrameBoundary::Preceding(1),
        FrameBoundary::Following(1),
    )
    .unwrap();
    let spec = WindowSpec::new(OrderBy::from(vec![SortOrder::asc(score())]), sliding);
    let rank: Arc<dyn WindowExpression> = Arc::new(RankExpression::new(vec![score()]));

    let err = RunningWindowDriver::new(Arc::clone(&rank), spec.clone(), WindowConfig::default())
        .unwrap_err();
    match err {
        Error::InvalidWindowFrame { function, frame } => {
            assert_eq!(function, "RANK");
            assert_eq!(frame, "ROWS BETWEEN 1 PRECEDING AND 1 FOLLOWING");
        }
        other => panic!("unexpected error: {}", other),
    }

    // Validation off: still evaluated as a running frame
    let unchecked = RunningWindowDriver::new(rank, spec, WindowConfig::permissive()).unwrap();
    let rows = partition(&[Some(1), Some(2)]);
    assert_eq!(
        as_ints(&unchecked.evaluate_partition(&rows).unwrap()),
        vec![1, 2]
    );
}

/// Test sort order checking honours direction and NULL placement
#[test]
fn test_sort_order_check() {
    let rank: Arc<dyn WindowExpression> = Arc::new(RankExpression::new(vec![score()]));
    let strict = driver(Arc::clone(&rank), WindowConfig::strict());

    assert!(strict
        .evaluate_partition(&partition(&[None, Some(1), Some(1), Some(3)]))
        .is_ok());
    assert_eq!(
        strict
            .evaluate_partition(&partition(&[Some(1), Some(4), Some(3)]))
            .unwrap_err(),
        Error::UnsortedInput { row: 2 }
    );
    assert_eq!(
        strict
            .evaluate_partition(&partition(&[Some(1), None]))
            .unwrap_err(),
        Error::UnsortedInput { row: 1 }
    );

    let desc_nulls_first = WindowSpec::new(
        OrderBy::from(vec![
            SortOrder::desc(score()).with_nulls(NullOrdering::NullsFirst)
        ]),
        WindowFrame::running(),
    );
    let desc = RunningWindowDriver::new(rank, desc_nulls_first, WindowConfig::strict()).unwrap();
    assert!(desc
        .evaluate_partition(&partition(&[None, Some(9), Some(9), Some(2)]))
        .is_ok());

    let errors = desc
        .evaluate_partitions(&[
            partition(&[Some(9), Some(2)]),
            partition(&[Some(2), Some(9)]),
        ])
        .unwrap_err();
    assert_eq!(errors, Error::UnsortedInput { row: 1 });
}

/// Test the scalar adapter cannot be driven
#[test]
fn test_adapter_rejected_by_driver() {
    let adapter = Arc::new(ScalarWindowAdapter::wrap(score()));
    let d = RunningWindowDriver::running(adapter).unwrap();
    assert!(matches!(
        d.evaluate_partition(&partition(&[Some(1)])),
        Err(Error::UnsupportedOperation(_))
    ));
    assert!(d.evaluate_partition(&[]).is_err());
}
