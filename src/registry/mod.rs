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

//! Filter catalog for template expressions
//!
//! The catalog is closed: [`Filter`] enumerates every transform a template
//! may name, and dispatch is an exhaustive match. Names outside the catalog
//! are resolved to `None` and handled by the evaluator as pass-through.

#![warn(missing_docs)]

pub mod filter;
pub mod filters;

pub use filter::Filter;
