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

//! Column references, bound and unbound

use std::fmt;
use std::sync::Arc;

use super::{check_arity, ExprRef, Expression};
use crate::core::{DataType, Error, Result, Row, Value};

/// Column bound to a position in the input row
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRef {
    /// Position in the row
    index: usize,
    /// Display name
    name: String,
    data_type: DataType,
    nullable: bool,
}

impl ColumnRef {
    /// Create a non-nullable column reference
    pub fn new(index: usize, name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            index,
            name: name.into(),
            data_type,
            nullable: false,
        }
    }

    /// Create a nullable column reference
    pub fn nullable(index: usize, name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            nullable: true,
            ..Self::new(index, name, data_type)
        }
    }

    /// Position of the column in the row
    pub fn index(&self) -> usize {
        self.index
    }

    /// Column name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Expression for ColumnRef {
    fn evaluate(&self, row: &Row) -> Result<Value> {
        row.try_get(self.index).cloned()
    }

    fn data_type(&self) -> DataType {
        self.data_type
    }

    fn nullable(&self) -> bool {
        self.nullable
    }

    fn foldable(&self) -> bool {
        false
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

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Column known only by name
///
/// Produced by the parser and replaced by a [`ColumnRef`] during analysis.
/// Evaluating it is always an error.
#[derive(Debug, Clone, PartialEq)]
pub struct UnresolvedColumn {
    name: String,
}

impl UnresolvedColumn {
    /// Create a new unresolved column
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Column name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Expression for UnresolvedColumn {
    fn evaluate(&self, _row: &Row) -> Result<Value> {
        Err(Error::unresolved(format!("column '{}'", self.name)))
    }

    fn data_type(&self) -> DataType {
        DataType::Null
    }

    fn nullable(&self) -> bool {
        true
    }

    fn foldable(&self) -> bool {
        false
    }

    fn resolved(&self) -> bool {
        false
    }

    fn children(&self) -> Vec<ExprRef> {
        Vec::new()
    }

    fn with_new_children(&self, children: Vec<ExprRef>) -> Result<ExprRef> {
        check_arity(self, &children, 0)?;
        Ok(Arc::new(self.clone()))
    }
}

impl fmt::Display for UnresolvedColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}", self.name)
    }
}
