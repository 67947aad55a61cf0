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

//! Scalar expression wrapped as a window function

use std::fmt;
use std::sync::Arc;

use crate::core::{DataType, Error, Result, Row, Value};
use crate::expression::{ExprRef, Expression};
use crate::functions::{
    FunctionInfo, FunctionSignature, FunctionType, WindowExpression, WindowFunction,
};

/// Lets a scalar expression sit where a window function is expected
///
/// Metadata comes from the wrapped expression. The window lifecycle does
/// nothing and yields typed NULLs, and spawning an instance always fails:
/// the adapter cannot be executed as a real window function.
///
/// The adapter implements [`Expression`], [`WindowFunction`] and
/// [`WindowExpression`]. The inherent methods below answer the questions the
/// three traits share, so plain method calls are unambiguous.
#[derive(Debug, Clone)]
pub struct ScalarWindowAdapter {
    expr: ExprRef,
    children: Vec<ExprRef>,
    name: String,
}

impl ScalarWindowAdapter {
    /// Wrap `expr` rebuilt over `children`
    pub fn new(expr: ExprRef, children: Vec<ExprRef>) -> Result<Self> {
        let expr = expr.with_new_children(children.clone())?;
        Ok(Self::from_parts(expr, children))
    }

    /// Wrap `expr` with its own children
    pub fn wrap(expr: ExprRef) -> Self {
        let children = expr.children();
        Self::from_parts(expr, children)
    }

    fn from_parts(expr: ExprRef, children: Vec<ExprRef>) -> Self {
        let name = expr.to_string();
        Self {
            expr,
            children,
            name,
        }
    }

    /// The wrapped expression
    pub fn expr(&self) -> &ExprRef {
        &self.expr
    }

    /// Name shown for the adapter, the wrapped expression's text
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> DataType {
        self.expr.data_type()
    }

    pub fn nullable(&self) -> bool {
        self.expr.nullable()
    }

    pub fn foldable(&self) -> bool {
        self.expr.foldable()
    }

    pub fn resolved(&self) -> bool {
        self.expr.resolved()
    }

    pub fn children(&self) -> Vec<ExprRef> {
        self.children.clone()
    }

    /// Evaluate the wrapped expression; the value is returned as produced
    pub fn evaluate(&self, row: &Row) -> Result<Value> {
        self.expr.evaluate(row)
    }

    fn unsupported(&self) -> Error {
        Error::unsupported_operation(format!(
            "{} cannot be instantiated as a window function",
            self.name
        ))
    }
}

impl Expression for ScalarWindowAdapter {
    fn evaluate(&self, row: &Row) -> Result<Value> {
        ScalarWindowAdapter::evaluate(self, row)
    }

    fn data_type(&self) -> DataType {
        ScalarWindowAdapter::data_type(self)
    }

    fn nullable(&self) -> bool {
        ScalarWindowAdapter::nullable(self)
    }

    fn foldable(&self) -> bool {
        ScalarWindowAdapter::foldable(self)
    }

    fn resolved(&self) -> bool {
        ScalarWindowAdapter::resolved(self)
    }

    fn children(&self) -> Vec<ExprRef> {
        ScalarWindowAdapter::children(self)
    }

    fn with_new_children(&self, children: Vec<ExprRef>) -> Result<ExprRef> {
        Ok(Arc::new(ScalarWindowAdapter::new(
            Arc::clone(&self.expr),
            children,
        )?))
    }
}

impl WindowFunction for ScalarWindowAdapter {
    fn name(&self) -> &str {
        ScalarWindowAdapter::name(self)
    }

    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        Ok(())
    }

    fn prepare_input(&self, _row: &Row) -> Result<Row> {
        Ok(Row::new())
    }

    fn update(&mut self, _input: Row) -> Result<()> {
        Ok(())
    }

    fn batch_update(&mut self, _inputs: Vec<Row>) -> Result<()> {
        Ok(())
    }

    fn evaluate(&mut self) -> Result<Value> {
        Ok(Value::Null(self.data_type()))
    }

    fn get(&self, _index: usize) -> Result<Value> {
        Ok(Value::Null(self.data_type()))
    }

    fn new_instance(&self) -> Result<Box<dyn WindowFunction>> {
        Err(self.unsupported())
    }
}

impl WindowExpression for ScalarWindowAdapter {
    fn name(&self) -> &str {
        ScalarWindowAdapter::name(self)
    }

    fn info(&self) -> FunctionInfo {
        let arity = self.children.len();
        FunctionInfo::new(
            self.name.clone(),
            FunctionType::Scalar,
            "Scalar expression evaluated in a window position",
            FunctionSignature::new(self.data_type(), arity, arity),
        )
    }

    fn data_type(&self) -> DataType {
        ScalarWindowAdapter::data_type(self)
    }

    fn nullable(&self) -> bool {
        ScalarWindowAdapter::nullable(self)
    }

    fn foldable(&self) -> bool {
        ScalarWindowAdapter::foldable(self)
    }

    fn resolved(&self) -> bool {
        ScalarWindowAdapter::resolved(self)
    }

    fn children(&self) -> Vec<ExprRef> {
        ScalarWindowAdapter::children(self)
    }

    fn new_instance(&self) -> Result<Box<dyn WindowFunction>> {
        Err(self.unsupported())
    }
}

impl fmt::Display for ScalarWindowAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::{
        ArithmeticExpr, ArithmeticOp, CastExpr, ColumnRef, Literal, UnresolvedColumn,
    };

    fn plus_one() -> ExprRef {
        Arc::new(ArithmeticExpr::new(
            ArithmeticOp::Add,
            Arc::new(ColumnRef::new(0, "a", DataType::Integer)),
            Arc::new(Literal::new(Value::integer(1))),
        ))
    }

    #[test]
    fn test_metadata_delegates() {
        let inner = plus_one();
        let adapter = ScalarWindowAdapter::wrap(Arc::clone(&inner));
        assert_eq!(adapter.data_type(), inner.data_type());
        assert_eq!(adapter.nullable(), inner.nullable());
        assert_eq!(adapter.foldable(), inner.foldable());
        assert_eq!(adapter.resolved(), inner.resolved());
        assert_eq!(adapter.to_string(), inner.to_string());
        assert_eq!(adapter.children().len(), 2);
        assert_eq!(adapter.name(), "(a + 1)");
    }

    #[test]
    fn test_new_rebuilds_over_children() {
        let inner = plus_one();
        let children: Vec<ExprRef> = vec![
            Arc::new(ColumnRef::new(1, "b", DataType::Integer)),
            Arc::new(Literal::new(Value::integer(10))),
        ];
        let adapter = ScalarWindowAdapter::new(inner, children).unwrap();
        assert_eq!(adapter.to_string(), "(b + 10)");
        let row = Row::from_values(vec![Value::integer(0), Value::integer(5)]);
        assert_eq!(adapter.evaluate(&row).unwrap(), Value::integer(15));
    }

    #[test]
    fn test_new_rejects_wrong_arity() {
        let err = ScalarWindowAdapter::new(plus_one(), vec![]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_evaluate_through_cast() {
        let cast: ExprRef = Arc::new(CastExpr::new(
            Arc::new(ColumnRef::new(0, "s", DataType::Text)),
            DataType::Float,
        ));
        let adapter = ScalarWindowAdapter::wrap(cast);
        let row = Row::from_values(vec![Value::text("2.5")]);
        assert_eq!(adapter.evaluate(&row).unwrap(), Value::float(2.5));

        let null_row = Row::from_values(vec![Value::null(DataType::Text)]);
        let v = adapter.evaluate(&null_row).unwrap();
        assert!(v.is_null());
    }

    #[test]
    fn test_evaluate_keeps_values_of_other_types() {
        // Rows are not checked against declared column types
        let adapter = ScalarWindowAdapter::wrap(plus_one());
        let row = Row::from_values(vec![Value::float(2.5)]);
        let direct = plus_one().evaluate(&row).unwrap();
        assert_eq!(direct, Value::float(3.5));
        assert_eq!(adapter.evaluate(&row).unwrap(), direct);
        assert!(matches!(adapter.evaluate(&row).unwrap(), Value::Float(_)));

        let column: ExprRef = Arc::new(ColumnRef::new(0, "a", DataType::Integer));
        let adapter = ScalarWindowAdapter::wrap(Arc::clone(&column));
        let row = Row::from_values(vec![Value::text("abc")]);
        assert_eq!(adapter.evaluate(&row).unwrap(), Value::text("abc"));
        assert_eq!(
            adapter.evaluate(&row).unwrap(),
            column.evaluate(&row).unwrap()
        );
    }

    #[test]
    fn test_lifecycle_is_noop() {
        let mut adapter = ScalarWindowAdapter::wrap(plus_one());
        let row = Row::from_values(vec![Value::integer(41)]);

        WindowFunction::init(&mut adapter).unwrap();
        let input = adapter.prepare_input(&row).unwrap();
        assert!(input.is_empty());
        adapter.update(input).unwrap();
        adapter.batch_update(vec![row.clone(), row]).unwrap();
        WindowFunction::reset(&mut adapter).unwrap();

        let v = WindowFunction::evaluate(&mut adapter).unwrap();
        assert_eq!(v, Value::Null(DataType::Integer));
        assert_eq!(v.data_type(), DataType::Integer);
        assert_eq!(adapter.get(3).unwrap(), Value::Null(DataType::Integer));
    }

    #[test]
    fn test_new_instance_unsupported() {
        let adapter = ScalarWindowAdapter::wrap(plus_one());
        let err = WindowFunction::new_instance(&adapter).unwrap_err();
        assert!(matches!(err, Error::UnsupportedOperation(_)));
        let err = WindowExpression::new_instance(&adapter).unwrap_err();
        assert!(matches!(err, Error::UnsupportedOperation(_)));
    }

    #[test]
    fn test_unresolved_inner() {
        let adapter = ScalarWindowAdapter::wrap(Arc::new(UnresolvedColumn::new("price")));
        assert!(!adapter.resolved());
        assert!(adapter.evaluate(&Row::new()).is_err());
    }

    #[test]
    fn test_as_expression_rebuild() {
        let adapter: ExprRef = Arc::new(ScalarWindowAdapter::wrap(plus_one()));
        let rebuilt = adapter.with_new_children(adapter.children()).unwrap();
        let row = Row::from_values(vec![Value::integer(1)]);
        assert_eq!(rebuilt.evaluate(&row).unwrap(), Value::integer(2));
        assert_eq!(rebuilt.to_string(), "(a + 1)");
    }

    #[test]
    fn test_info() {
        let adapter = ScalarWindowAdapter::wrap(plus_one());
        let info = WindowExpression::info(&adapter);
        assert_eq!(info.function_type, FunctionType::Scalar);
        assert_eq!(info.signature.min_args, 2);
        assert_eq!(info.signature.return_type, DataType::Integer);
    }
}
