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

//! Expression contract consumed by window functions
//!
//! Window functions never look inside an expression: they evaluate it
//! against a row and read its metadata. This module defines that contract
//! and the small set of expressions the rest of the crate builds on.
//!
//! # Expression Types
//!
//! - [`Literal`] - Constant value
//! - [`ColumnRef`] - Column bound to a position in the input row
//! - [`UnresolvedColumn`] - Column known only by name, before analysis
//! - [`ArithmeticExpr`] - `+`, `-`, `*`, `/` over numeric operands
//! - [`CastExpr`] - Type coercion of a child expression
//!
//! [`Projection`] turns a row into an ordering-group key and
//! [`SortOrder`] / [`OrderBy`] describe how a partition is ordered.

pub mod arithmetic;
pub mod cast;
pub mod column;
pub mod literal;
pub mod projection;
pub mod sort_order;

use std::fmt::{Debug, Display};
use std::sync::Arc;

use crate::core::{DataType, Error, Result, Row, Value};

pub use arithmetic::{ArithmeticExpr, ArithmeticOp};
pub use cast::CastExpr;
pub use column::{ColumnRef, UnresolvedColumn};
pub use literal::Literal;
pub use projection::{GroupKey, Projection};
pub use sort_order::{
    NullOrdering, OrderBy, SortDirection, SortOrder, UnresolvedSortOrder, UNRESOLVED_SORT_ORDER,
};

/// Shared handle to an expression node
pub type ExprRef = Arc<dyn Expression>;

/// Value-producing expression evaluated one row at a time
pub trait Expression: Send + Sync + Debug + Display {
    /// Evaluate the expression against a row
    fn evaluate(&self, row: &Row) -> Result<Value>;

    /// Type of the values this expression produces
    fn data_type(&self) -> DataType;

    /// Whether evaluation may produce NULL
    fn nullable(&self) -> bool;

    /// Whether the expression can be folded to a constant at planning time
    fn foldable(&self) -> bool {
        let children = self.children();
        !children.is_empty() && children.iter().all(|c| c.foldable())
    }

    /// Whether every reference in the tree has been bound by the analyzer
    fn resolved(&self) -> bool {
        self.children().iter().all(|c| c.resolved())
    }

    /// Direct children of this node
    fn children(&self) -> Vec<ExprRef>;

    /// Rebuild this node over a new set of children
    ///
    /// The number of children must match [`Expression::children`].
    fn with_new_children(&self, children: Vec<ExprRef>) -> Result<ExprRef>;
}

/// Fail unless `children` has exactly `expected` entries
pub(crate) fn check_arity(node: &dyn Display, children: &[ExprRef], expected: usize) -> Result<()> {
    if children.len() != expected {
        return Err(Error::invalid_argument(format!(
            "{} expects {} children, got {}",
            node,
            expected,
            children.len()
        )));
    }
    Ok(())
}
