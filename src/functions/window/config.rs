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

//! Window evaluation configuration

/// Minimum number of partitions before evaluation is spread over rayon
pub const DEFAULT_MIN_PARTITIONS_FOR_PARALLEL: usize = 64;

/// Configuration for [`RunningWindowDriver`](super::RunningWindowDriver)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowConfig {
    /// Reject frames the function cannot be evaluated under
    pub validate_frame: bool,
    /// Reject partitions whose rows are not ordered by the ORDER BY keys
    pub check_sort_order: bool,
    /// Whether partitions may be evaluated in parallel
    pub parallel: bool,
    /// Minimum partitions in a batch to trigger parallel evaluation
    pub min_partitions_for_parallel: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            validate_frame: true,
            check_sort_order: false,
            parallel: true,
            min_partitions_for_parallel: DEFAULT_MIN_PARTITIONS_FOR_PARALLEL,
        }
    }
}

impl WindowConfig {
    /// Create a new window config with custom settings
    pub fn new(
        validate_frame: bool,
        check_sort_order: bool,
        parallel: bool,
        min_partitions_for_parallel: usize,
    ) -> Self {
        Self {
            validate_frame,
            check_sort_order,
            parallel,
            min_partitions_for_parallel,
        }
    }

    /// Validate both the frame and the partition ordering
    pub fn strict() -> Self {
        Self {
            validate_frame: true,
            check_sort_order: true,
            ..Default::default()
        }
    }

    /// Trust the caller for both frame and ordering
    pub fn permissive() -> Self {
        Self {
            validate_frame: false,
            check_sort_order: false,
            ..Default::default()
        }
    }

    /// Evaluate every partition on the calling thread
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the parallel partition threshold
    pub fn with_min_partitions_for_parallel(mut self, min: usize) -> Self {
        self.min_partitions_for_parallel = min;
        self
    }

    /// Check if a batch of `partition_count` partitions should go parallel
    #[inline]
    pub fn should_parallelize(&self, partition_count: usize) -> bool {
        self.parallel && partition_count >= self.min_partitions_for_parallel
    }
}
