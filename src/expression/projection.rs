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

//! Row projection into comparable keys

use smallvec::SmallVec;

use super::ExprRef;
use crate::core::{Result, Row};

/// Projected values of one row, compared by value
///
/// Most ORDER BY clauses have a handful of keys, so the values live inline.
pub type GroupKey = SmallVec<[crate::core::Value; 4]>;

/// Evaluates a fixed list of expressions against rows
#[derive(Debug, Clone, Default)]
pub struct Projection {
    exprs: Vec<ExprRef>,
}

impl Projection {
    /// Create a projection over the given expressions
    pub fn new(exprs: Vec<ExprRef>) -> Self {
        Self { exprs }
    }

    /// Evaluate every expression against `row`, in order
    pub fn project(&self, row: &Row) -> Result<GroupKey> {
        let mut key = GroupKey::with_capacity(self.exprs.len());
        for expr in &self.exprs {
            key.push(expr.evaluate(row)?);
        }
        Ok(key)
    }

    /// The projected expressions
    pub fn exprs(&self) -> &[ExprRef] {
        &self.exprs
    }

    /// Number of projected expressions
    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    /// Check if nothing is projected
    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DataType, Value};
    use crate::expression::{ColumnRef, Literal};
    use std::sync::Arc;

    #[test]
    fn test_project() {
        let projection = Projection::new(vec![
            Arc::new(ColumnRef::new(1, "b", DataType::Text)),
            Arc::new(ColumnRef::new(0, "a", DataType::Integer)),
        ]);
        let row = Row::from_values(vec![Value::integer(1), Value::text("x")]);
        let key = projection.project(&row).unwrap();
        assert_eq!(key.as_slice(), &[Value::text("x"), Value::integer(1)]);
    }

    #[test]
    fn test_keys_compare_by_value() {
        let projection = Projection::new(vec![Arc::new(ColumnRef::new(0, "a", DataType::Float))]);
        let a = projection
            .project(&Row::from_values(vec![Value::integer(2)]))
            .unwrap();
        let b = projection
            .project(&Row::from_values(vec![Value::float(2.0)]))
            .unwrap();
        assert_eq!(a, b);

        let null_a = projection
            .project(&Row::from_values(vec![Value::null_unknown()]))
            .unwrap();
        let null_b = projection
            .project(&Row::from_values(vec![Value::null(DataType::Float)]))
            .unwrap();
        assert_eq!(null_a, null_b);
    }

    #[test]
    fn test_empty_projection() {
        let projection = Projection::default();
        assert!(projection.is_empty());
        let key = projection
            .project(&Row::from_values(vec![Value::integer(1)]))
            .unwrap();
        assert!(key.is_empty());

        let constant = Projection::new(vec![Arc::new(Literal::new(Value::integer(1)))]);
        assert_eq!(constant.len(), 1);
    }

    #[test]
    fn test_projection_error_propagates() {
        let projection = Projection::new(vec![Arc::new(ColumnRef::new(3, "d", DataType::Integer))]);
        assert!(projection.project(&Row::new()).is_err());
    }
}
