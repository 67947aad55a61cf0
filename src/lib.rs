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

//! # sqlwindow - Rank-style window functions for a SQL expression layer
//!
//! sqlwindow provides the window function contract of a SQL engine's
//! expression layer together with its running-frame functions.
//!
//! ## Key Features
//!
//! - **RANK / DENSE_RANK / ROW_NUMBER** - One shared ordering-group counter
//! - **Scalar adapter** - Any scalar expression in a window-function position
//! - **Frame boundaries** - Signed offsets for `n PRECEDING` / `n FOLLOWING`
//! - **Unresolved ORDER BY** - Empty placeholder used before analysis
//! - **Partition driver** - Sequential or rayon-parallel partition evaluation
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use sqlwindow::expression::{ColumnRef, OrderBy, SortOrder};
//! use sqlwindow::functions::{global_registry, RunningWindowDriver, WindowConfig, WindowSpec};
//! use sqlwindow::{DataType, Row, Value};
//!
//! let age = Arc::new(ColumnRef::new(0, "age", DataType::Integer));
//! let order_by = OrderBy::from(vec![SortOrder::asc(age)]);
//!
//! let rank = global_registry().create("rank", &order_by).unwrap();
//! let spec = WindowSpec::new(order_by, Default::default());
//! let driver = RunningWindowDriver::new(Arc::from(rank), spec, WindowConfig::default()).unwrap();
//!
//! let partition: Vec<Row> = [25, 30, 30, 41]
//!     .iter()
//!     .map(|&age| Row::from_values(vec![Value::integer(age)]))
//!     .collect();
//! let ranks = driver.evaluate_partition(&partition).unwrap();
//! assert_eq!(
//!     ranks,
//!     vec![Value::integer(1), Value::integer(2), Value::integer(2), Value::integer(4)]
//! );
//! ```
//!
//! ## Modules
//!
//! - [`core`] - Core types ([`DataType`], [`Value`], [`Row`], [`Error`])
//! - [`expression`] - Expression contract, projections and sort orders
//! - [`functions`] - Window function contract, rank family, registry and driver

pub mod core;
pub mod expression;
pub mod functions;

// Re-export main types for convenience
pub use core::{DataType, Error, Result, Row, Value};

// Re-export expression types
pub use expression::{
    ExprRef, Expression, GroupKey, OrderBy, Projection, SortOrder, UnresolvedSortOrder,
    UNRESOLVED_SORT_ORDER,
};

// Re-export function types
pub use functions::{
    frame_boundary_offset, global_registry, DenseRankExpression, DenseRankFunction,
    FrameBoundary, FunctionInfo, FunctionSignature, FunctionType, RankExpression, RankFunction,
    RankKind, RowNumberExpression, RowNumberFunction, RunningWindowDriver, ScalarWindowAdapter,
    WindowConfig, WindowExpression, WindowFrame, WindowFunction, WindowFunctionRegistry,
    WindowSpec,
};

#[cfg(test)]
mod size_tests {
    use std::mem::size_of;

    #[test]
    fn test_state_sizes() {
        // Fat Arc<str> plus the tag
        assert!(size_of::<crate::core::Value>() <= 24);
        // Ordering-group keys of up to 4 values stay inline
        assert!(
            size_of::<crate::expression::GroupKey>() <= 5 * size_of::<crate::core::Value>()
        );
        assert!(size_of::<crate::functions::RankFunction>() <= 256);
        assert_eq!(
            size_of::<crate::functions::RankFunction>(),
            size_of::<crate::functions::RowNumberFunction>()
        );
    }
}
