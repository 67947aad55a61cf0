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

//! CAST expression

use std::fmt;
use std::sync::Arc;

use super::{check_arity, ExprRef, Expression};
use crate::core::{DataType, Error, Result, Row, Value};

/// CAST(child AS type)
///
/// Values that cannot be converted become NULL, so the result is always
/// nullable.
#[derive(Debug, Clone)]
pub struct CastExpr {
    child: ExprRef,
    target_type: DataType,
}

impl CastExpr {
    /// Create a new CAST expression
    pub fn new(child: ExprRef, target_type: DataType) -> Self {
        Self { child, target_type }
    }

    /// Get the target type
    pub fn target_type(&self) -> DataType {
        self.target_type
    }
}

impl Expression for CastExpr {
    fn evaluate(&self, row: &Row) -> Result<Value> {
        Ok(self
            .child
            .evaluate(row)?
            .into_coerce_to_type(self.target_type))
    }

    fn data_type(&self) -> DataType {
        self.target_type
    }

    fn nullable(&self) -> bool {
        true
    }

    fn children(&self) -> Vec<ExprRef> {
        vec![Arc::clone(&self.child)]
    }

    fn with_new_children(&self, children: Vec<ExprRef>) -> Result<ExprRef> {
        check_arity(self, &children, 1)?;
        let child = children
            .into_iter()
            .next()
            .ok_or_else(|| Error::invalid_argument("CAST expects one child"))?;
        Ok(Arc::new(CastExpr::new(child, self.target_type)))
    }
}

impl fmt::Display for CastExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CAST({} AS {})", self.child, self.target_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::{ColumnRef, Literal};

    #[test]
    fn test_cast() {
        let cast = CastExpr::new(Arc::new(Literal::new(Value::text("42"))), DataType::Integer);
        assert_eq!(cast.evaluate(&Row::new()).unwrap(), Value::integer(42));
        assert_eq!(cast.to_string(), "CAST('42' AS INTEGER)");
        assert!(cast.foldable());
    }

    #[test]
    fn test_failed_cast_is_null() {
        let cast = CastExpr::new(
            Arc::new(ColumnRef::new(0, "name", DataType::Text)),
            DataType::Float,
        );
        let row = Row::from_values(vec![Value::text("abc")]);
        let v = cast.evaluate(&row).unwrap();
        assert!(v.is_null());
        assert_eq!(v.data_type(), DataType::Float);
        assert!(!cast.foldable());
    }
}
