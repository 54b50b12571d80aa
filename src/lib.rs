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

//! Declarative JSON template engine
//!
//! A template is a JSON document mixing literal values, control nodes
//! (`$for` loops and `$if` conditionals) and `{{ path | filter: arg }}`
//! placeholders. Evaluating it against a JSON data model yields a fresh,
//! fully resolved JSON tree.

pub mod ast;
pub mod config;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod parser;
pub mod registry;

// Re-export main types
pub use config::EngineConfig;
pub use engine::Template;
pub use error::{Result, TemplateError};
pub use model::JsonValueExt;
pub use registry::Filter;
