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

//! Constant expression

use std::fmt;
use std::sync::Arc;

use super::{check_arity, ExprRef, Expression};
use crate::core::{DataType, Result, Row, Value};

/// A constant value
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    value: Value,
}

impl Literal {
    /// Create a new literal
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    /// Get the constant value
    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl Expression for Literal {
    fn evaluate(&self, _row: &Row) -> Result<Value> {
        Ok(self.value.clone())
    }

    fn data_type(&self) -> DataType {
        self.value.data_type()
    }

    fn nullable(&self) -> bool {
        self.value.is_null()
    }

    fn foldable(&self) -> bool {
        true
    }

    fn resolved(&self) -> bool {
        true
    }

    fn children(&self) -> Vec<ExprRef> {
        Vec::new()
    }

    fn with_new_children(&self, children: Vec<ExprRef>) -> Result<ExprRef> {
        check_arity(self, &children, 0)?;
        Ok(Arc::new(self.clone()))
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Value::Text(s) => write!(f, "'{}'", s),
            other => write!(f, "{}", other),
        }
    }
}
