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

//! RANK, DENSE_RANK and ROW_NUMBER window functions
//!
//! All three walk a partition in ORDER BY order with a running counter.
//! They differ only in how the counter advances when the ordering key
//! changes, which is captured by [`RankKind`].

use std::fmt;
use std::marker::PhantomData;

use crate::core::{DataType, Result, Row, Value};
use crate::expression::{ExprRef, GroupKey, OrderBy, Projection};
use crate::functions::{
    FunctionInfo, FunctionSignature, FunctionType, WindowExpression, WindowFunction,
};

/// How a rank-like function numbers ordering groups
pub trait RankKind:
    fmt::Debug + Clone + Copy + PartialEq + Eq + Default + Send + Sync + 'static
{
    /// SQL name of the function
    const NAME: &'static str;

    /// One-line description for [`FunctionInfo`]
    const DESCRIPTION: &'static str;

    /// Whether rows with equal ordering keys share a value
    const TRACKS_PEERS: bool = true;

    /// Value for the first row of a new ordering group
    ///
    /// `row_counter` already counts the current row; `rank` is the value
    /// of the previous group (0 before the first row).
    fn next_rank(row_counter: i64, rank: i64) -> i64;
}

/// RANK(): ties share a rank and leave gaps after them
///
/// Example: If two rows tie for rank 1, the next row gets rank 3 (not 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rank;

impl RankKind for Rank {
    const NAME: &'static str = "RANK";
    const DESCRIPTION: &'static str =
        "Returns the rank of the current row within the partition, with gaps for ties";

    #[inline]
    fn next_rank(row_counter: i64, _rank: i64) -> i64 {
        row_counter
    }
}

/// DENSE_RANK(): ties share a rank and the next group follows directly
///
/// Example: If two rows tie for rank 1, the next row gets rank 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DenseRank;

impl RankKind for DenseRank {
    const NAME: &'static str = "DENSE_RANK";
    const DESCRIPTION: &'static str =
        "Returns the rank of the current row within the partition, without gaps for ties";

    #[inline]
    fn next_rank(_row_counter: i64, rank: i64) -> i64 {
        rank + 1
    }
}

/// ROW_NUMBER(): position of the row in the partition, ties ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RowNumber;

impl RankKind for RowNumber {
    const NAME: &'static str = "ROW_NUMBER";
    const DESCRIPTION: &'static str =
        "Returns the sequential row number within the partition, starting at 1";
    const TRACKS_PEERS: bool = false;

    #[inline]
    fn next_rank(row_counter: i64, _rank: i64) -> i64 {
        row_counter
    }
}

/// Descriptor for a rank-like window function over a list of ORDER BY keys
#[derive(Debug, Clone)]
pub struct RankLikeExpression<K: RankKind> {
    order_by: Vec<ExprRef>,
    kind: K,
}

/// RANK() descriptor
pub type RankExpression = RankLikeExpression<Rank>;
/// DENSE_RANK() descriptor
pub type DenseRankExpression = RankLikeExpression<DenseRank>;
/// ROW_NUMBER() descriptor
pub type RowNumberExpression = RankLikeExpression<RowNumber>;

impl<K: RankKind> RankLikeExpression<K> {
    /// Create a descriptor over the given ordering expressions
    pub fn new(order_by: Vec<ExprRef>) -> Self {
        Self {
            order_by,
            kind: K::default(),
        }
    }

    /// Create a descriptor from a window's ORDER BY clause
    ///
    /// An unresolved ORDER BY yields a descriptor with no ordering keys.
    pub fn from_order_by(order_by: &OrderBy) -> Self {
        Self::new(order_by.expressions())
    }

    /// The ordering expressions
    pub fn order_by(&self) -> &[ExprRef] {
        &self.order_by
    }

    /// The rank kind
    pub fn kind(&self) -> K {
        self.kind
    }
}

impl<K: RankKind> WindowExpression for RankLikeExpression<K> {
    fn name(&self) -> &str {
        K::NAME
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            K::NAME,
            FunctionType::Window,
            K::DESCRIPTION,
            FunctionSignature::new(DataType::Integer, 0, 0),
        )
    }

    fn data_type(&self) -> DataType {
        DataType::Integer
    }

    fn nullable(&self) -> bool {
        false
    }

    fn foldable(&self) -> bool {
        false
    }

    fn resolved(&self) -> bool {
        self.order_by.iter().all(|e| e.resolved())
    }

    fn children(&self) -> Vec<ExprRef> {
        self.order_by.clone()
    }

    fn new_instance(&self) -> Result<Box<dyn WindowFunction>> {
        Ok(Box::new(RankLikeFunction::<K>::new(self.order_by.clone())))
    }

    fn requires_running_frame(&self) -> bool {
        true
    }
}

impl<K: RankKind> fmt::Display for RankLikeExpression<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}()", K::NAME)
    }
}

/// Per-partition state of a rank-like function
///
/// Rows must arrive sorted by the ordering keys; this is not checked here.
/// Keys are compared by value, so NULL matches NULL and `2` matches `2.0`.
#[derive(Debug, Clone)]
pub struct RankLikeFunction<K: RankKind> {
    projection: Projection,
    row_counter: i64,
    rank: i64,
    /// Key of the previous row, `None` before the first row
    last_key: Option<GroupKey>,
    kind: PhantomData<K>,
}

/// RANK() state
pub type RankFunction = RankLikeFunction<Rank>;
/// DENSE_RANK() state
pub type DenseRankFunction = RankLikeFunction<DenseRank>;
/// ROW_NUMBER() state
pub type RowNumberFunction = RankLikeFunction<RowNumber>;

impl<K: RankKind> RankLikeFunction<K> {
    /// Create a fresh instance over the given ordering expressions
    pub fn new(order_by: Vec<ExprRef>) -> Self {
        Self {
            projection: Projection::new(order_by),
            row_counter: 0,
            rank: 0,
            last_key: None,
            kind: PhantomData,
        }
    }

    /// Rows processed so far
    pub fn row_counter(&self) -> i64 {
        self.row_counter
    }

    /// Value for the current row
    pub fn rank(&self) -> i64 {
        self.rank
    }

    fn clear(&mut self) {
        self.row_counter = 0;
        self.rank = 0;
        self.last_key = None;
    }
}

impl<K: RankKind> WindowFunction for RankLikeFunction<K> {
    fn name(&self) -> &str {
        K::NAME
    }

    fn init(&mut self) -> Result<()> {
        self.clear();
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.clear();
        Ok(())
    }

    fn prepare_input(&self, row: &Row) -> Result<Row> {
        Ok(row.clone())
    }

    fn update(&mut self, input: Row) -> Result<()> {
        if !K::TRACKS_PEERS {
            self.row_counter += 1;
            self.rank = K::next_rank(self.row_counter, self.rank);
            return Ok(());
        }

        // Project before touching the counters so a failed row leaves no trace
        let key = self.projection.project(&input)?;
        self.row_counter += 1;
        if self.last_key.as_ref() != Some(&key) {
            self.rank = K::next_rank(self.row_counter, self.rank);
            self.last_key = Some(key);
        }
        Ok(())
    }

    fn evaluate(&mut self) -> Result<Value> {
        Ok(Value::Integer(self.rank))
    }

    fn get(&self, _index: usize) -> Result<Value> {
        Ok(Value::Integer(self.rank))
    }

    fn new_instance(&self) -> Result<Box<dyn WindowFunction>> {
        Ok(Box::new(Self::new(self.projection.exprs().to_vec())))
    }
}
