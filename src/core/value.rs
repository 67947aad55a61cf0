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

//! Runtime values produced by expression evaluation
//!
//! [`Value`] carries its data type alongside the payload. Equality, hashing
//! and total ordering agree with each other so values can be used directly
//! as ordering-group keys.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use super::error::{Error, Result};
use super::types::DataType;

/// Timestamp formats accepted when coercing text, most specific first
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%:z",
    "%Y-%m-%dT%H:%M:%SZ",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// A runtime value with type information
///
/// Text uses `Arc<str>` so that projecting a row into a group key does not
/// copy string payloads.
#[derive(Debug, Clone)]
pub enum Value {
    /// NULL value with optional type hint
    Null(DataType),

    /// 64-bit signed integer
    Integer(i64),

    /// 64-bit floating point
    Float(f64),

    /// UTF-8 text string
    Text(Arc<str>),

    /// Boolean value
    Boolean(bool),

    /// Timestamp (UTC)
    Timestamp(DateTime<Utc>),
}

impl Value {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create a NULL value with a type hint
    pub fn null(data_type: DataType) -> Self {
        Value::Null(data_type)
    }

    /// Create a NULL value with unknown type
    pub fn null_unknown() -> Self {
        Value::Null(DataType::Null)
    }

    /// Create an integer value
    pub fn integer(value: i64) -> Self {
        Value::Integer(value)
    }

    /// Create a float value
    pub fn float(value: f64) -> Self {
        Value::Float(value)
    }

    /// Create a text value
    pub fn text(value: impl AsRef<str>) -> Self {
        Value::Text(Arc::from(value.as_ref()))
    }

    /// Create a boolean value
    pub fn boolean(value: bool) -> Self {
        Value::Boolean(value)
    }

    /// Create a timestamp value
    pub fn timestamp(value: DateTime<Utc>) -> Self {
        Value::Timestamp(value)
    }

    // =========================================================================
    // Type accessors
    // =========================================================================

    /// Returns the data type of this value
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Null(dt) => *dt,
            Value::Integer(_) => DataType::Integer,
            Value::Float(_) => DataType::Float,
            Value::Text(_) => DataType::Text,
            Value::Boolean(_) => DataType::Boolean,
            Value::Timestamp(_) => DataType::Timestamp,
        }
    }

    /// Returns true if this value is NULL
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null(_))
    }

    /// Extract as i64, with numeric coercion
    pub fn as_int64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            Value::Float(v) => Some(*v as i64),
            Value::Text(s) => s.parse::<i64>().ok(),
            Value::Boolean(b) => Some(i64::from(*b)),
            Value::Null(_) | Value::Timestamp(_) => None,
        }
    }

    /// Extract as f64, with numeric coercion
    pub fn as_float64(&self) -> Option<f64> {
        match self {
            Value::Integer(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Text(s) => s.parse::<f64>().ok(),
            Value::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Null(_) | Value::Timestamp(_) => None,
        }
    }

    /// Extract as string reference (no allocation for Text)
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    // =========================================================================
    // Comparison
    // =========================================================================

    /// Compare two values with SQL semantics
    ///
    /// NULL compared with NULL is equal; NULL compared with anything else is
    /// an error. Integers and floats compare numerically.
    pub fn compare(&self, other: &Value) -> Result<Ordering> {
        match (self.is_null(), other.is_null()) {
            (true, true) => return Ok(Ordering::Equal),
            (true, false) | (false, true) => return Err(Error::NullComparison),
            (false, false) => {}
        }

        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => Ok(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => Ok(compare_floats(*a, *b)),
            (Value::Integer(a), Value::Float(b)) => Ok(compare_floats(*a as f64, *b)),
            (Value::Float(a), Value::Integer(b)) => Ok(compare_floats(*a, *b as f64)),
            (Value::Text(a), Value::Text(b)) => Ok(a.cmp(b)),
            (Value::Boolean(a), Value::Boolean(b)) => Ok(a.cmp(b)),
            (Value::Timestamp(a), Value::Timestamp(b)) => Ok(a.cmp(b)),
            _ => Err(Error::IncomparableTypes),
        }
    }

    // =========================================================================
    // Type coercion
    // =========================================================================

    /// Coerce this value to the target data type, returning NULL when the
    /// conversion is not possible
    pub fn coerce_to_type(&self, target_type: DataType) -> Value {
        self.clone().into_coerce_to_type(target_type)
    }

    /// Coerce value to target type, consuming self
    pub fn into_coerce_to_type(self, target_type: DataType) -> Value {
        if self.is_null() {
            return Value::Null(target_type);
        }
        if self.data_type() == target_type {
            return self;
        }

        match (target_type, self) {
            (DataType::Integer, Value::Float(v)) => Value::Integer(v as i64),
            (DataType::Integer, Value::Boolean(b)) => Value::Integer(i64::from(b)),
            (DataType::Integer, Value::Text(s)) => s
                .parse::<i64>()
                .map(Value::Integer)
                .unwrap_or(Value::Null(target_type)),
            (DataType::Float, Value::Integer(v)) => Value::Float(v as f64),
            (DataType::Float, Value::Boolean(b)) => Value::Float(if b { 1.0 } else { 0.0 }),
            (DataType::Float, Value::Text(s)) => s
                .parse::<f64>()
                .map(Value::Float)
                .unwrap_or(Value::Null(target_type)),
            (DataType::Text, other) => Value::Text(Arc::from(other.to_string().as_str())),
            (DataType::Boolean, Value::Integer(v)) => Value::Boolean(v != 0),
            (DataType::Boolean, Value::Float(v)) => Value::Boolean(v != 0.0),
            (DataType::Boolean, Value::Text(s)) => match s.to_ascii_lowercase().as_str() {
                "true" | "t" | "yes" | "y" | "1" => Value::Boolean(true),
                "false" | "f" | "no" | "n" | "0" => Value::Boolean(false),
                _ => Value::Null(target_type),
            },
            (DataType::Timestamp, Value::Text(s)) => parse_timestamp(&s)
                .map(Value::Timestamp)
                .unwrap_or(Value::Null(target_type)),
            (DataType::Null, _) => Value::Null(DataType::Null),
            _ => Value::Null(target_type),
        }
    }
}

// =========================================================================
// Trait implementations
// =========================================================================

impl Default for Value {
    fn default() -> Self {
        Value::Null(DataType::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null(_) => write!(f, "NULL"),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", format_float(*v)),
            Value::Text(s) => write!(f, "{}", s),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Timestamp(t) => write!(f, "{}", t.to_rfc3339()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        // Grouping semantics: NULL is not distinct from NULL
        match (self, other) {
            (Value::Null(_), Value::Null(_)) => true,
            (Value::Null(_), _) | (_, Value::Null(_)) => false,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => (a.is_nan() && b.is_nan()) || a == b,
            (Value::Integer(i), Value::Float(f)) | (Value::Float(f), Value::Integer(i)) => {
                compare_int_float(*i, *f) == Ordering::Equal
            }
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Integer(5) == Float(5.0), so both hash through the same f64 bits
        match self {
            Value::Null(_) => 0u8.hash(state),
            Value::Integer(v) => {
                1u8.hash(state);
                float_hash_bits(*v as f64).hash(state);
            }
            Value::Float(v) => {
                1u8.hash(state);
                float_hash_bits(*v).hash(state);
            }
            Value::Text(s) => {
                2u8.hash(state);
                s.hash(state);
            }
            Value::Boolean(b) => {
                3u8.hash(state);
                b.hash(state);
            }
            Value::Timestamp(t) => {
                4u8.hash(state);
                t.timestamp_nanos_opt().hash(state);
            }
        }
    }
}

/// Same order as [`Ord`]; SQL comparison lives in [`Value::compare`]
impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Total ordering: NULLs first, numerics by value, then other types by a
/// fixed type rank. Consistent with `PartialEq`.
impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        fn type_rank(v: &Value) -> u8 {
            match v {
                Value::Null(_) => 0,
                Value::Boolean(_) => 1,
                Value::Integer(_) | Value::Float(_) => 2,
                Value::Text(_) => 3,
                Value::Timestamp(_) => 4,
            }
        }

        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => compare_floats(*a, *b),
            (Value::Integer(a), Value::Float(b)) => compare_int_float(*a, *b),
            (Value::Float(a), Value::Integer(b)) => compare_int_float(*b, *a).reverse(),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
            (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
            _ => type_rank(self).cmp(&type_rank(other)),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::text(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(Arc::from(v.as_str()))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::null_unknown(),
        }
    }
}

// =========================================================================
// Helper functions
// =========================================================================

/// Parse a timestamp string, assuming UTC when no offset is present
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    for format in TIMESTAMP_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, format) {
            return Ok(dt.with_timezone(&Utc));
        }
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(Utc.from_utc_datetime(&ndt));
        }
    }
    if let Some(ndt) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(Utc.from_utc_datetime(&ndt));
    }
    Err(Error::parse(format!("invalid timestamp format: {}", s)))
}

fn format_float(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{:.0}", v)
    } else {
        format!("{}", v)
    }
}

/// NaN sorts after every other float
fn compare_floats(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Exact integer/float ordering, no rounding of `i` through f64
///
/// NaN sorts after every integer, like [`compare_floats`].
fn compare_int_float(i: i64, f: f64) -> Ordering {
    // 2^63, the first f64 above i64::MAX
    const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;
    if f.is_nan() || f >= I64_BOUND {
        return Ordering::Less;
    }
    if f < -I64_BOUND {
        return Ordering::Greater;
    }
    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => whole.partial_cmp(&f).unwrap_or(Ordering::Equal),
        ord => ord,
    }
}

/// Bits used for hashing; folds -0.0 into 0.0 and every NaN into one pattern
fn float_hash_bits(v: f64) -> u64 {
    if v.is_nan() {
        f64::NAN.to_bits()
    } else if v == 0.0 {
        0u64
    } else {
        v.to_bits()
    }
}
