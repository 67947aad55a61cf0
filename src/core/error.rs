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

//! Error types for sqlwindow
//!
//! A single error enum covers expression evaluation, window function
//! lifecycle misuse and frame validation.

use thiserror::Error;

/// Result type alias for sqlwindow operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // =========================================================================
    // Lifecycle errors
    // =========================================================================
    /// The operation is not supported by this expression or function
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Indexed access into a sequence that has no element at that position
    #[error("no such element at index {index}")]
    NoSuchElement { index: usize },

    /// Expression has not been resolved by the analyzer yet
    #[error("unresolved expression: {0}")]
    UnresolvedExpression(String),

    // =========================================================================
    // Row access errors
    // =========================================================================
    /// Column index out of bounds
    #[error("column index {index} out of bounds for row of width {width}")]
    ColumnIndexOutOfBounds { index: usize, width: usize },

    // =========================================================================
    // Window errors
    // =========================================================================
    /// Function used with a frame it cannot be evaluated under
    #[error("invalid window frame for {function}: {frame}")]
    InvalidWindowFrame { function: String, frame: String },

    /// Partition rows are not ordered by the ordering keys
    #[error("partition is not sorted by its ordering keys at row {row}")]
    UnsortedInput { row: usize },

    // =========================================================================
    // Value errors
    // =========================================================================
    /// Invalid argument for function
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Type conversion error
    #[error("type conversion error: cannot convert {from} to {to}")]
    TypeConversion { from: String, to: String },

    /// Division by zero
    #[error("division by zero")]
    DivisionByZero,

    /// Cannot compare NULL with non-NULL value
    #[error("cannot compare NULL with non-NULL value")]
    NullComparison,

    /// Cannot compare incompatible types
    #[error("cannot compare incompatible types")]
    IncomparableTypes,

    /// Parse error
    #[error("parse error: {0}")]
    Parse(String),
}

impl Error {
    /// Create a new UnsupportedOperation error
    pub fn unsupported_operation(message: impl Into<String>) -> Self {
        Error::UnsupportedOperation(message.into())
    }

    /// Create a new UnresolvedExpression error
    pub fn unresolved(expression: impl Into<String>) -> Self {
        Error::UnresolvedExpression(expression.into())
    }

    /// Create a new InvalidWindowFrame error
    pub fn invalid_window_frame(function: impl Into<String>, frame: impl Into<String>) -> Self {
        Error::InvalidWindowFrame {
            function: function.into(),
            frame: frame.into(),
        }
    }

    /// Create a new TypeConversion error
    pub fn type_conversion(from: impl Into<String>, to: impl Into<String>) -> Self {
        Error::TypeConversion {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Create a new InvalidArgument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    /// Create a new Parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Error::Parse(message.into())
    }

    /// Check if this error reports a caller misusing the API rather than bad data
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedOperation(_)
                | Error::NoSuchElement { .. }
                | Error::UnresolvedExpression(_)
                | Error::InvalidWindowFrame { .. }
                | Error::UnsortedInput { .. }
        )
    }
}
