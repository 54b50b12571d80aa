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

//! Truthiness-based filters: `default`, `not`, `if_true`

use crate::model::JsonValueExt;
use serde_json::Value;
use std::borrow::Cow;

/// Input if truthy, otherwise the argument (or null without one)
pub fn default<'v>(input: Cow<'v, Value>, argument: Option<&str>) -> Cow<'v, Value> {
    if input.is_truthy() {
        return input;
    }
    Cow::Owned(argument.map_or(Value::Null, |fallback| Value::String(fallback.to_string())))
}

/// Negated truthiness
pub fn not(input: &Value) -> Cow<'static, Value> {
    Cow::Owned(Value::Bool(!input.is_truthy()))
}

/// Argument if the input is truthy, otherwise the input unchanged
///
/// A falsy input is passed on as is, so `if_true: X | default: Y` only
/// ever substitutes `Y` on the falsy path.
pub fn if_true<'v>(input: Cow<'v, Value>, argument: Option<&str>) -> Cow<'v, Value> {
    if !input.is_truthy() {
        return input;
    }
    Cow::Owned(argument.map_or(Value::Null, |value| Value::String(value.to_string())))
}
