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

//! Window Functions
//!
//! This module provides the running-frame window functions:
//!
//! - [`RankExpression`] - RANK()
//! - [`DenseRankExpression`] - DENSE_RANK()
//! - [`RowNumberExpression`] - ROW_NUMBER()
//! - [`ScalarWindowAdapter`] - scalar expression in a window position
//!
//! together with frame boundaries ([`FrameBoundary`], [`WindowFrame`]) and
//! the [`RunningWindowDriver`] that evaluates partitions.

mod adapter;
mod config;
mod driver;
mod frame;
mod rank;

pub use adapter::ScalarWindowAdapter;
pub use config::{WindowConfig, DEFAULT_MIN_PARTITIONS_FOR_PARALLEL};
pub use driver::RunningWindowDriver;
pub use frame::{frame_boundary_offset, FrameBoundary, FrameUnit, WindowFrame, WindowSpec};
pub use rank::{
    DenseRank, DenseRankExpression, DenseRankFunction, Rank, RankExpression, RankFunction,
    RankKind, RankLikeExpression, RankLikeFunction, RowNumber, RowNumberExpression,
    RowNumberFunction,
};
