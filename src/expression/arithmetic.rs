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

//! Binary arithmetic expression

use std::fmt;
use std::sync::Arc;

use super::{check_arity, ExprRef, Expression};
use crate::core::{DataType, Error, Result, Row, Value};

/// Arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl ArithmeticOp {
    /// SQL symbol for the operator
    pub fn symbol(&self) -> &'static str {
        match self {
            ArithmeticOp::Add => "+",
            ArithmeticOp::Subtract => "-",
            ArithmeticOp::Multiply => "*",
            ArithmeticOp::Divide => "/",
        }
    }
}

/// `left <op> right` over INTEGER and FLOAT operands
///
/// NULL in either operand yields NULL. INTEGER op INTEGER stays INTEGER
/// (division truncates); any FLOAT operand widens the result to FLOAT.
#[derive(Debug, Clone)]
pub struct ArithmeticExpr {
    op: ArithmeticOp,
    left: ExprRef,
    right: ExprRef,
}

impl ArithmeticExpr {
    /// Create a new arithmetic expression
    pub fn new(op: ArithmeticOp, left: ExprRef, right: ExprRef) -> Self {
        Self { op, left, right }
    }

    /// The operator
    pub fn op(&self) -> ArithmeticOp {
        self.op
    }

    fn eval_integer(&self, a: i64, b: i64) -> Result<Value> {
        let result = match self.op {
            ArithmeticOp::Add => a.checked_add(b),
            ArithmeticOp::Subtract => a.checked_sub(b),
            ArithmeticOp::Multiply => a.checked_mul(b),
            ArithmeticOp::Divide => {
                if b == 0 {
                    return Err(Error::DivisionByZero);
                }
                a.checked_div(b)
            }
        };
        result
            .map(Value::Integer)
            .ok_or_else(|| Error::invalid_argument(format!("integer overflow in {}", self)))
    }

    fn eval_float(&self, a: f64, b: f64) -> Result<Value> {
        let result = match self.op {
            ArithmeticOp::Add => a + b,
            ArithmeticOp::Subtract => a - b,
            ArithmeticOp::Multiply => a * b,
            ArithmeticOp::Divide => {
                if b == 0.0 {
                    return Err(Error::DivisionByZero);
                }
                a / b
            }
        };
        Ok(Value::Float(result))
    }
}

impl Expression for ArithmeticExpr {
    fn evaluate(&self, row: &Row) -> Result<Value> {
        let left = self.left.evaluate(row)?;
        let right = self.right.evaluate(row)?;

        if left.is_null() || right.is_null() {
            return Ok(Value::Null(self.data_type()));
        }

        match (&left, &right) {
            (Value::Integer(a), Value::Integer(b)) => self.eval_integer(*a, *b),
            _ => {
                let a = left
                    .as_float64()
                    .filter(|_| left.data_type().is_numeric())
                    .ok_or_else(|| Error::type_conversion(left.data_type().to_string(), "FLOAT"))?;
                let b = right
                    .as_float64()
                    .filter(|_| right.data_type().is_numeric())
                    .ok_or_else(|| {
                        Error::type_conversion(right.data_type().to_string(), "FLOAT")
                    })?;
                self.eval_float(a, b)
            }
        }
    }

    fn data_type(&self) -> DataType {
        match (self.left.data_type(), self.right.data_type()) {
            (DataType::Integer, DataType::Integer) => DataType::Integer,
            _ => DataType::Float,
        }
    }

    fn nullable(&self) -> bool {
        self.left.nullable() || self.right.nullable()
    }

    fn children(&self) -> Vec<ExprRef> {
        vec![Arc::clone(&self.left), Arc::clone(&self.right)]
    }

    fn with_new_children(&self, children: Vec<ExprRef>) -> Result<ExprRef> {
        check_arity(self, &children, 2)?;
        let mut children = children.into_iter();
        match (children.next(), children.next()) {
            (Some(left), Some(right)) => Ok(Arc::new(ArithmeticExpr::new(self.op, left, right))),
            _ => Err(Error::invalid_argument("arithmetic expects two children")),
        }
    }
}

impl fmt::Display for ArithmeticExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.left, self.op.symbol(), self.right)
    }
}
