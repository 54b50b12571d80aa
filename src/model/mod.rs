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

//! JSON value model used by the template engine
//!
//! Templates, data models and output trees are all plain `serde_json`
//! values. This module adds the handful of value semantics the engine
//! shares across its layers.

#![warn(missing_docs)]

pub mod value;

pub use value::{JsonValueExt, detach};
