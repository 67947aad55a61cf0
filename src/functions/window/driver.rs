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

//! Running-frame window evaluation
//!
//! [`RunningWindowDriver`] feeds already partitioned and sorted rows
//! through a window function, one fresh instance per partition. Batches
//! with enough partitions are evaluated with rayon; each partition still
//! runs sequentially on one thread since rank state depends on row order.

use std::cmp::Ordering;
use std::sync::Arc;

use log::{debug, trace, warn};
use rayon::prelude::*;

use super::config::WindowConfig;
use super::frame::WindowSpec;
use crate::core::{Error, Result, Row, Value};
use crate::expression::{GroupKey, Projection, SortOrder};
use crate::functions::WindowExpression;

/// Evaluates a window function over whole partitions
#[derive(Debug, Clone)]
pub struct RunningWindowDriver {
    expr: Arc<dyn WindowExpression>,
    spec: WindowSpec,
    sort_keys: Projection,
    config: WindowConfig,
}

impl RunningWindowDriver {
    /// Create a driver, validating the frame when the config asks for it
    pub fn new(
        expr: Arc<dyn WindowExpression>,
        spec: WindowSpec,
        config: WindowConfig,
    ) -> Result<Self> {
        if config.validate_frame {
            expr.validate_frame(&spec.frame)?;
        } else if expr.requires_running_frame() && !spec.frame.is_running() {
            warn!(
                "{} evaluated under {} without frame validation; results follow a running frame",
                expr, spec.frame
            );
        }

        let sort_keys = Projection::new(spec.order_by.expressions());
        debug!(
            "window driver for {} OVER {} (check_sort_order={}, parallel={})",
            expr, spec, config.check_sort_order, config.parallel
        );

        Ok(Self {
            expr,
            spec,
            sort_keys,
            config,
        })
    }

    /// Driver over the default window spec and config
    pub fn running(expr: Arc<dyn WindowExpression>) -> Result<Self> {
        Self::new(expr, WindowSpec::default(), WindowConfig::default())
    }

    /// The evaluated window expression
    pub fn expr(&self) -> &Arc<dyn WindowExpression> {
        &self.expr
    }

    /// The window specification
    pub fn spec(&self) -> &WindowSpec {
        &self.spec
    }

    /// The driver configuration
    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Evaluate one partition, returning one value per input row
    pub fn evaluate_partition(&self, rows: &[Row]) -> Result<Vec<Value>> {
        trace!("{}: partition of {} rows", self.expr, rows.len());

        if self.config.check_sort_order {
            self.check_sorted(rows)?;
        }

        let mut function = self.expr.new_instance()?;
        function.init()?;

        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let input = function.prepare_input(row)?;
            function.update(input)?;
            results.push(function.evaluate()?);
        }
        Ok(results)
    }

    /// Evaluate several partitions; results keep the input order
    pub fn evaluate_partitions(&self, partitions: &[Vec<Row>]) -> Result<Vec<Vec<Value>>> {
        if self.config.should_parallelize(partitions.len()) {
            debug!(
                "{}: evaluating {} partitions in parallel",
                self.expr,
                partitions.len()
            );
            return partitions
                .par_iter()
                .map(|rows| self.evaluate_partition(rows))
                .collect();
        }

        partitions
            .iter()
            .map(|rows| self.evaluate_partition(rows))
            .collect()
    }

    /// Fail with the index of the first row that sorts before its predecessor
    fn check_sorted(&self, rows: &[Row]) -> Result<()> {
        if self.sort_keys.is_empty() {
            return Ok(());
        }

        let orders = self.spec.order_by.as_slice();
        let mut previous: Option<GroupKey> = None;
        for (index, row) in rows.iter().enumerate() {
            let key = self.sort_keys.project(row)?;
            if let Some(prev) = &previous {
                if compare_keys(orders, prev, &key) == Ordering::Greater {
                    return Err(Error::UnsortedInput { row: index });
                }
            }
            previous = Some(key);
        }
        Ok(())
    }
}

fn compare_keys(orders: &[SortOrder], a: &GroupKey, b: &GroupKey) -> Ordering {
    orders
        .iter()
        .zip(a.iter().zip(b.iter()))
        .map(|(order, (x, y))| order.compare_values(x, y))
        .find(|ord| *ord != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}
