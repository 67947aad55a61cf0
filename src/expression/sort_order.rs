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

//! Sort orders and the unresolved ORDER BY placeholder

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use super::ExprRef;
use crate::core::{Error, Result, Value};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Placement of NULLs relative to non-NULL values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NullOrdering {
    NullsFirst,
    NullsLast,
}

/// One ORDER BY key
#[derive(Debug, Clone)]
pub struct SortOrder {
    pub expr: ExprRef,
    pub direction: SortDirection,
    pub nulls: NullOrdering,
}

impl SortOrder {
    /// Ascending, NULLs first
    pub fn asc(expr: ExprRef) -> Self {
        Self {
            expr,
            direction: SortDirection::Ascending,
            nulls: NullOrdering::NullsFirst,
        }
    }

    /// Descending, NULLs last
    pub fn desc(expr: ExprRef) -> Self {
        Self {
            expr,
            direction: SortDirection::Descending,
            nulls: NullOrdering::NullsLast,
        }
    }

    /// Override NULL placement
    pub fn with_nulls(mut self, nulls: NullOrdering) -> Self {
        self.nulls = nulls;
        self
    }

    /// Compare two evaluated keys under this sort order
    pub fn compare_values(&self, a: &Value, b: &Value) -> Ordering {
        match (a.is_null(), b.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => match self.nulls {
                NullOrdering::NullsFirst => Ordering::Less,
                NullOrdering::NullsLast => Ordering::Greater,
            },
            (false, true) => match self.nulls {
                NullOrdering::NullsFirst => Ordering::Greater,
                NullOrdering::NullsLast => Ordering::Less,
            },
            (false, false) => match self.direction {
                SortDirection::Ascending => a.cmp(b),
                SortDirection::Descending => b.cmp(a),
            },
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        };
        let nulls = match self.nulls {
            NullOrdering::NullsFirst => "NULLS FIRST",
            NullOrdering::NullsLast => "NULLS LAST",
        };
        write!(f, "{} {} {}", self.expr, direction, nulls)
    }
}

/// Sort order that the analyzer has not assigned yet
///
/// Behaves as an empty, immutable sequence: it has no elements, iterating
/// yields nothing and every indexed access fails with
/// [`Error::NoSuchElement`]. Use the [`UNRESOLVED_SORT_ORDER`] constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UnresolvedSortOrder;

/// The unresolved sort order placeholder
pub const UNRESOLVED_SORT_ORDER: UnresolvedSortOrder = UnresolvedSortOrder;

const NO_SORT_ORDERS: &[SortOrder] = &[];

impl UnresolvedSortOrder {
    /// Always 0
    pub fn len(&self) -> usize {
        0
    }

    /// Always true
    pub fn is_empty(&self) -> bool {
        true
    }

    /// Always fails
    pub fn get(&self, index: usize) -> Result<&SortOrder> {
        Err(Error::NoSuchElement { index })
    }

    /// Iterator that yields nothing
    pub fn iter(&self) -> std::slice::Iter<'static, SortOrder> {
        NO_SORT_ORDERS.iter()
    }
}

impl IntoIterator for &UnresolvedSortOrder {
    type Item = &'static SortOrder;
    type IntoIter = std::slice::Iter<'static, SortOrder>;

    fn into_iter(self) -> Self::IntoIter {
        NO_SORT_ORDERS.iter()
    }
}

impl fmt::Display for UnresolvedSortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<unresolved>")
    }
}

/// ORDER BY of a window specification
#[derive(Debug, Clone)]
pub enum OrderBy {
    /// Not assigned by the analyzer yet
    Unresolved(UnresolvedSortOrder),
    /// Bound sort keys, possibly empty
    Resolved(Vec<SortOrder>),
}

impl Default for OrderBy {
    fn default() -> Self {
        OrderBy::Unresolved(UNRESOLVED_SORT_ORDER)
    }
}

impl OrderBy {
    /// Check if the analyzer has assigned the sort keys
    pub fn is_resolved(&self) -> bool {
        matches!(self, OrderBy::Resolved(_))
    }

    /// Sort keys as a slice; empty when unresolved
    pub fn as_slice(&self) -> &[SortOrder] {
        match self {
            OrderBy::Unresolved(_) => NO_SORT_ORDERS,
            OrderBy::Resolved(orders) => orders,
        }
    }

    /// Number of sort keys
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Check if there are no sort keys
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Sort key at `index`
    pub fn get(&self, index: usize) -> Result<&SortOrder> {
        match self {
            OrderBy::Unresolved(placeholder) => placeholder.get(index),
            OrderBy::Resolved(orders) => orders.get(index).ok_or(Error::NoSuchElement { index }),
        }
    }

    /// Iterate over the sort keys
    pub fn iter(&self) -> std::slice::Iter<'_, SortOrder> {
        self.as_slice().iter()
    }

    /// The key expressions, in order
    pub fn expressions(&self) -> Vec<ExprRef> {
        self.iter().map(|o| Arc::clone(&o.expr)).collect()
    }
}

impl From<Vec<SortOrder>> for OrderBy {
    fn from(orders: Vec<SortOrder>) -> Self {
        OrderBy::Resolved(orders)
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderBy::Unresolved(placeholder) => write!(f, "{}", placeholder),
            OrderBy::Resolved(orders) => {
                let parts: Vec<String> = orders.iter().map(|o| o.to_string()).collect();
                write!(f, "{}", parts.join(", "))
            }
        }
    }
}
