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

//! Utility filters: `json`

use serde_json::Value;
use std::borrow::Cow;

/// Compact JSON text of the input; null becomes `"null"`
pub fn json(input: &Value) -> Cow<'static, Value> {
    Cow::Owned(Value::String(input.to_string()))
}
