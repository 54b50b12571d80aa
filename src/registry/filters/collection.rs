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

//! Collection filters: `size`, `first`, `last`, `join`

use crate::model::JsonValueExt;
use serde_json::Value;
use std::borrow::Cow;

const DEFAULT_SEPARATOR: &str = ", ";

/// Element count of arrays, character count of strings, key count of objects
pub fn size(input: &Value) -> Cow<'static, Value> {
    let size = match input {
        Value::Array(items) => items.len(),
        Value::String(s) => s.chars().count(),
        Value::Object(map) => map.len(),
        _ => 0,
    };
    Cow::Owned(Value::from(size))
}

/// First element of an array, otherwise null
pub fn first(input: Cow<'_, Value>) -> Cow<'_, Value> {
    match input {
        Cow::Borrowed(Value::Array(items)) => items.first().map_or(null(), Cow::Borrowed),
        Cow::Owned(Value::Array(items)) => items.into_iter().next().map_or(null(), Cow::Owned),
        _ => null(),
    }
}

/// Last element of an array, otherwise null
pub fn last(input: Cow<'_, Value>) -> Cow<'_, Value> {
    match input {
        Cow::Borrowed(Value::Array(items)) => items.last().map_or(null(), Cow::Borrowed),
        Cow::Owned(Value::Array(mut items)) => items.pop().map_or(null(), Cow::Owned),
        _ => null(),
    }
}

/// Stringified array elements joined by the separator
pub fn join<'v>(input: Cow<'v, Value>, separator: Option<&str>) -> Cow<'v, Value> {
    let Value::Array(items) = input.as_ref() else {
        return input;
    };
    let separator = separator.unwrap_or(DEFAULT_SEPARATOR);
    let joined = items
        .iter()
        .map(JsonValueExt::to_display_string)
        .collect::<Vec<_>>()
        .join(separator);
    Cow::Owned(Value::String(joined))
}

fn null<'v>() -> Cow<'v, Value> {
    Cow::Owned(Value::Null)
}
