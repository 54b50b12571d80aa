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

//! Template evaluator
//!
//! Walks a parsed template against one data model. Control flows one way:
//! node evaluation calls expression evaluation, which calls the filter
//! catalog, with the [`EvaluationContext`] threaded through every level.

#![warn(missing_docs)]

mod context;
mod expression;
mod node;

pub use context::{EvaluationContext, ScopeFrame};
pub use expression::{evaluate_expression, evaluate_interpolation, evaluate_source, into_output};
pub use node::{LoopOutput, evaluate_conditional, evaluate_loop, evaluate_node};
