// Copyright 2024 OctoFHIR Team
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

//! Evaluation context for template rendering

use crate::ast::Path;
use crate::config::EngineConfig;
use indexmap::IndexMap;
use serde_json::Value;

/// Named bindings pushed for one loop iteration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopeFrame {
    bindings: IndexMap<String, Value>,
}

impl ScopeFrame {
    /// Create an empty frame
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding, replacing an earlier one with the same name
    pub fn bind(mut self, name: impl Into<String>, value: Value) -> Self {
        self.bindings.insert(name.into(), value);
        self
    }

    /// Look up a binding in this frame only
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }
}

/// Per-evaluation state: the data model, the scope stack and resource usage
///
/// A fresh context is built for every evaluation, so nothing here is shared
/// between concurrent evaluations of the same template.
#[derive(Debug)]
pub struct EvaluationContext<'a> {
    root: &'a Value,
    scopes: Vec<ScopeFrame>,
    config: EngineConfig,
    depth: usize,
    iterations: usize,
    iteration_limit_reported: bool,
}

impl<'a> EvaluationContext<'a> {
    /// Create a context over a data model
    pub fn new(root: &'a Value, config: EngineConfig) -> Self {
        Self {
            root,
            scopes: Vec::new(),
            config,
            depth: 0,
            iterations: 0,
            iteration_limit_reported: false,
        }
    }

    /// Number of scope frames currently pushed
    pub fn scope_depth(&self) -> usize {
        self.scopes.len()
    }

    /// Loop iterations consumed so far
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Run `f` with `frame` pushed; the frame is popped before returning
    pub fn with_scope<T>(&mut self, frame: ScopeFrame, f: impl FnOnce(&mut Self) -> T) -> T {
        self.scopes.push(frame);
        let result = f(self);
        self.scopes.pop();
        result
    }

    /// Run `f` one node level deeper, or return `None` past the depth bound
    pub fn descend<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        if self.depth >= self.config.max_depth {
            log::warn!(
                "Template nesting exceeds max depth {}; skipping sub-tree",
                self.config.max_depth
            );
            return None;
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Reserve one loop iteration from the evaluation-wide budget
    pub fn consume_iteration(&mut self) -> bool {
        if self.iterations >= self.config.max_loop_iterations {
            if !self.iteration_limit_reported {
                log::warn!(
                    "Loop iteration budget of {} exhausted; remaining iterations are skipped",
                    self.config.max_loop_iterations
                );
                self.iteration_limit_reported = true;
            }
            return false;
        }
        self.iterations += 1;
        true
    }

    /// Look up the first path segment: innermost scope, outer scopes, then root
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.scopes
            .iter()
            .rev()
            .find_map(|frame| frame.get(name))
            .or_else(|| step(self.root, name))
    }

    /// Resolve a dot-path; any segment that does not resolve yields `None`
    pub fn resolve(&self, path: &Path) -> Option<&Value> {
        let (head, rest) = path.segments().split_first()?;
        rest.iter()
            .try_fold(self.lookup(head)?, |value, segment| step(value, segment))
    }
}

/// One path step: object property or numeric array index
fn step<'v>(value: &'v Value, segment: &str) -> Option<&'v Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|index| items.get(index)),
        _ => None,
    }
}
