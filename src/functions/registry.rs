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

//! Window Function Registry
//!
//! Maps SQL function names to descriptor factories. Lookups are
//! case-insensitive; names are stored upper-cased.

use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::window::{DenseRank, Rank, RankKind, RankLikeExpression, RowNumber};
use super::{FunctionInfo, WindowExpression};
use crate::expression::OrderBy;

/// Global window function registry instance
static GLOBAL_REGISTRY: OnceLock<WindowFunctionRegistry> = OnceLock::new();

/// Get the global window function registry
#[inline]
pub fn global_registry() -> &'static WindowFunctionRegistry {
    GLOBAL_REGISTRY.get_or_init(WindowFunctionRegistry::new)
}

/// Builds a descriptor bound to a window's ORDER BY
pub type WindowExprFactory = Arc<dyn Fn(&OrderBy) -> Box<dyn WindowExpression> + Send + Sync>;

/// Factory and info of one registered function, published together
#[derive(Clone)]
struct RegisteredFunction {
    info: FunctionInfo,
    factory: WindowExprFactory,
}

/// Registry for window functions
pub struct WindowFunctionRegistry {
    functions: RwLock<FxHashMap<String, RegisteredFunction>>,
}

impl Default for WindowFunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WindowFunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowFunctionRegistry")
            .field("functions", &self.list_functions())
            .finish()
    }
}

impl WindowFunctionRegistry {
    /// Create a new registry with the built-in rank functions registered
    pub fn new() -> Self {
        let registry = Self::empty();
        registry.register::<Rank>();
        registry.register::<DenseRank>();
        registry.register::<RowNumber>();
        registry
    }

    /// Create a registry with nothing registered
    pub fn empty() -> Self {
        Self {
            functions: RwLock::new(FxHashMap::default()),
        }
    }

    /// Register a rank-like function
    pub fn register<K: RankKind>(&self) {
        let prototype = RankLikeExpression::<K>::new(Vec::new());
        self.register_factory(
            prototype.info(),
            Arc::new(|order_by: &OrderBy| {
                Box::new(RankLikeExpression::<K>::from_order_by(order_by))
                    as Box<dyn WindowExpression>
            }),
        );
    }

    /// Register a window function under `info.name`, replacing any previous entry
    pub fn register_factory(&self, info: FunctionInfo, factory: WindowExprFactory) {
        let name = info.name.to_uppercase();
        self.functions
            .write()
            .insert(name, RegisteredFunction { info, factory });
    }

    /// Create a descriptor for `name` bound to `order_by`
    ///
    /// The factory runs after the registry lock is released, so it may
    /// use the registry itself.
    pub fn create(&self, name: &str, order_by: &OrderBy) -> Option<Box<dyn WindowExpression>> {
        let factory = self.lookup(name)?.factory;
        Some(factory(order_by))
    }

    /// Check if a function name is a registered window function
    pub fn is_window(&self, name: &str) -> bool {
        let functions = self.functions.read();
        if functions.contains_key(name) {
            return true;
        }
        functions.contains_key(&name.to_uppercase())
    }

    /// Get function info by name
    pub fn get_info(&self, name: &str) -> Option<FunctionInfo> {
        self.lookup(name).map(|entry| entry.info)
    }

    /// List all registered function names, sorted
    pub fn list_functions(&self) -> Vec<String> {
        let mut names: Vec<String> = self.functions.read().keys().cloned().collect();
        names.sort();
        names
    }

    fn lookup(&self, name: &str) -> Option<RegisteredFunction> {
        let functions = self.functions.read();
        // Fast path - name already upper-cased
        if let Some(entry) = functions.get(name) {
            return Some(entry.clone());
        }
        functions.get(&name.to_uppercase()).cloned()
    }
}
