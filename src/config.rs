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

//! Engine configuration options

use serde::{Deserialize, Serialize};

/// Resource bounds applied to every evaluation of a template
///
/// Exceeding a bound never fails the whole evaluation: the offending
/// sub-tree is cut short, a warning is logged, and the rest of the
/// template is still rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum nesting depth of template nodes evaluated
    pub max_depth: usize,

    /// Maximum number of loop iterations across one evaluation
    pub max_loop_iterations: usize,
}

impl EngineConfig {
    /// Create a new configuration with custom bounds
    pub fn new(max_depth: usize, max_loop_iterations: usize) -> Self {
        Self {
            max_depth,
            max_loop_iterations,
        }
    }

    /// Tight bounds for templates from less trusted sources
    pub fn strict() -> Self {
        Self {
            max_depth: 32,
            max_loop_iterations: 10_000,
        }
    }

    /// No bounds at all
    pub fn unbounded() -> Self {
        Self {
            max_depth: usize::MAX,
            max_loop_iterations: usize::MAX,
        }
    }

    /// Override the depth bound
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Override the loop iteration bound
    pub fn with_max_loop_iterations(mut self, max_loop_iterations: usize) -> Self {
        self.max_loop_iterations = max_loop_iterations;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: 128,
            max_loop_iterations: 100_000,
        }
    }
}
