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

//! Window frames and frame boundaries

use std::fmt;

use crate::core::{Error, Result};
use crate::expression::OrderBy;

/// Window frame unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FrameUnit {
    Rows,
    #[default]
    Range,
}

/// Window frame boundary
///
/// `Preceding(n)` / `Following(n)` are literal row (or range) counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameBoundary {
    UnboundedPreceding,
    Preceding(u32),
    CurrentRow,
    Following(u32),
    UnboundedFollowing,
}

impl FrameBoundary {
    /// Signed distance from the current row
    ///
    /// Rows before the current row are negative, rows after are positive,
    /// and unbounded boundaries have no offset.
    #[inline]
    pub fn offset(&self) -> Option<i64> {
        match *self {
            FrameBoundary::CurrentRow => Some(0),
            FrameBoundary::Preceding(n) => Some(-i64::from(n)),
            FrameBoundary::Following(n) => Some(i64::from(n)),
            FrameBoundary::UnboundedPreceding | FrameBoundary::UnboundedFollowing => None,
        }
    }
}

/// Signed offset of a frame boundary, see [`FrameBoundary::offset`]
#[inline]
pub fn frame_boundary_offset(boundary: &FrameBoundary) -> Option<i64> {
    boundary.offset()
}

impl fmt::Display for FrameBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameBoundary::UnboundedPreceding => write!(f, "UNBOUNDED PRECEDING"),
            FrameBoundary::Preceding(n) => write!(f, "{} PRECEDING", n),
            FrameBoundary::CurrentRow => write!(f, "CURRENT ROW"),
            FrameBoundary::Following(n) => write!(f, "{} FOLLOWING", n),
            FrameBoundary::UnboundedFollowing => write!(f, "UNBOUNDED FOLLOWING"),
        }
    }
}

/// Window frame specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowFrame {
    pub unit: FrameUnit,
    pub start: FrameBoundary,
    pub end: FrameBoundary,
}

impl WindowFrame {
    /// RANGE BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW
    pub const fn running() -> Self {
        Self {
            unit: FrameUnit::Range,
            start: FrameBoundary::UnboundedPreceding,
            end: FrameBoundary::CurrentRow,
        }
    }

    /// Create a frame, rejecting boundary pairs SQL does not allow
    pub fn try_new(unit: FrameUnit, start: FrameBoundary, end: FrameBoundary) -> Result<Self> {
        let frame = Self { unit, start, end };
        if start == FrameBoundary::UnboundedFollowing {
            return Err(Error::invalid_argument(format!(
                "frame start cannot be UNBOUNDED FOLLOWING: {}",
                frame
            )));
        }
        if end == FrameBoundary::UnboundedPreceding {
            return Err(Error::invalid_argument(format!(
                "frame end cannot be UNBOUNDED PRECEDING: {}",
                frame
            )));
        }
        if let (Some(s), Some(e)) = (start.offset(), end.offset()) {
            if s > e {
                return Err(Error::invalid_argument(format!(
                    "frame start is after frame end: {}",
                    frame
                )));
            }
        }
        Ok(frame)
    }

    /// Check if the frame runs from the partition start to the current row
    pub fn is_running(&self) -> bool {
        self.start == FrameBoundary::UnboundedPreceding && self.end == FrameBoundary::CurrentRow
    }
}

impl Default for WindowFrame {
    fn default() -> Self {
        Self::running()
    }
}

impl fmt::Display for WindowFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self.unit {
            FrameUnit::Rows => "ROWS",
            FrameUnit::Range => "RANGE",
        };
        write!(f, "{} BETWEEN {} AND {}", unit, self.start, self.end)
    }
}

/// ORDER BY and frame of an OVER clause
///
/// PARTITION BY is applied by the caller before rows reach a driver.
#[derive(Debug, Clone, Default)]
pub struct WindowSpec {
    pub order_by: OrderBy,
    pub frame: WindowFrame,
}

impl WindowSpec {
    /// Create a window spec
    pub fn new(order_by: impl Into<OrderBy>, frame: WindowFrame) -> Self {
        Self {
            order_by: order_by.into(),
            frame,
        }
    }
}

impl fmt::Display for WindowSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(ORDER BY {} {})", self.order_by, self.frame)
    }
}
