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

//! Window Function System
//!
//! - [`WindowExpression`] - Stateless descriptor planned into a query
//! - [`WindowFunction`] - Per-partition state machine spawned by a descriptor
//! - [`WindowFunctionRegistry`] - Registry for function lookup by name
//!
//! A windowing operator asks the descriptor for a fresh [`WindowFunction`]
//! per partition, calls [`WindowFunction::init`], then for every row (in
//! ORDER BY order) calls [`WindowFunction::prepare_input`],
//! [`WindowFunction::update`] and reads [`WindowFunction::evaluate`].

pub mod registry;
pub mod window;

use std::fmt::{Debug, Display};

use crate::core::{DataType, Error, Result, Row, Value};
use crate::expression::ExprRef;

/// Function type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionType {
    /// Scalar function (operates on a single row)
    Scalar,
    /// Window function (operates over a window of rows)
    Window,
}

/// Function signature information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    /// Return type
    pub return_type: DataType,
    /// Minimum number of arguments
    pub min_args: usize,
    /// Maximum number of arguments
    pub max_args: usize,
}

impl FunctionSignature {
    /// Create a new function signature
    pub fn new(return_type: DataType, min_args: usize, max_args: usize) -> Self {
        Self {
            return_type,
            min_args,
            max_args,
        }
    }
}

/// Function information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionInfo {
    /// Function name
    pub name: String,
    /// Function type
    pub function_type: FunctionType,
    /// Description
    pub description: String,
    /// Signature
    pub signature: FunctionSignature,
}

impl FunctionInfo {
    /// Create a new function info
    pub fn new(
        name: impl Into<String>,
        function_type: FunctionType,
        description: impl Into<String>,
        signature: FunctionSignature,
    ) -> Self {
        Self {
            name: name.into(),
            function_type,
            description: description.into(),
            signature,
        }
    }

    /// Get the function name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the function type
    pub fn function_type(&self) -> FunctionType {
        self.function_type
    }

    /// Get the description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Get the signature
    pub fn signature(&self) -> &FunctionSignature {
        &self.signature
    }
}

/// Per-partition window function state machine
///
/// An instance belongs to exactly one partition and is driven by a single
/// caller; it is `Send` so partitions can be processed on different threads.
pub trait WindowFunction: Send + Debug {
    /// Get the function name
    fn name(&self) -> &str;

    /// Prepare the instance before the first row of a partition
    fn init(&mut self) -> Result<()>;

    /// Return to the freshly initialised state
    fn reset(&mut self) -> Result<()>;

    /// Turn an input row into what [`WindowFunction::update`] consumes
    fn prepare_input(&self, row: &Row) -> Result<Row>;

    /// Feed the next row of the partition
    fn update(&mut self, input: Row) -> Result<()>;

    /// Feed several rows, in order
    fn batch_update(&mut self, inputs: Vec<Row>) -> Result<()> {
        for input in inputs {
            self.update(input)?;
        }
        Ok(())
    }

    /// Value for the row most recently passed to `update`
    fn evaluate(&mut self) -> Result<Value>;

    /// Value at `index` of the current output
    fn get(&self, index: usize) -> Result<Value>;

    /// Spawn an independent instance in the initial state
    fn new_instance(&self) -> Result<Box<dyn WindowFunction>>;
}

/// Stateless window function descriptor
///
/// The planner holds descriptors; the windowing operator turns them into
/// per-partition [`WindowFunction`]s through [`WindowExpression::new_instance`].
pub trait WindowExpression: Send + Sync + Debug + Display {
    /// Get the function name
    fn name(&self) -> &str;

    /// Get function information
    fn info(&self) -> FunctionInfo;

    /// Type of the values the function produces
    fn data_type(&self) -> DataType;

    /// Whether the function may produce NULL
    fn nullable(&self) -> bool;

    /// Whether the function can be folded to a constant
    fn foldable(&self) -> bool;

    /// Whether every child expression has been bound
    fn resolved(&self) -> bool;

    /// Child expressions
    fn children(&self) -> Vec<ExprRef>;

    /// Create a fresh per-partition function bound to the same children
    fn new_instance(&self) -> Result<Box<dyn WindowFunction>>;

    /// Whether correct results need an UNBOUNDED PRECEDING .. CURRENT ROW frame
    fn requires_running_frame(&self) -> bool {
        false
    }

    /// Check that the function can be evaluated under `frame`
    fn validate_frame(&self, frame: &WindowFrame) -> Result<()> {
        if self.requires_running_frame() && !frame.is_running() {
            return Err(Error::invalid_window_frame(self.name(), frame.to_string()));
        }
        Ok(())
    }
}

// Re-export main types
pub use registry::{global_registry, WindowExprFactory, WindowFunctionRegistry};
pub use window::{
    frame_boundary_offset, DenseRank, DenseRankExpression, DenseRankFunction, FrameBoundary,
    FrameUnit, Rank, RankExpression, RankFunction, RankKind, RankLikeExpression,
    RankLikeFunction, RowNumber, RowNumberExpression, RowNumberFunction, RunningWindowDriver,
    ScalarWindowAdapter, WindowConfig, WindowFrame, WindowSpec,
    DEFAULT_MIN_PARTITIONS_FOR_PARALLEL,
};
