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

//! Value semantics shared by conditionals, filters and interpolation

use serde_json::Value;

/// Deep-copy a value on its way into an output tree.
///
/// Every value sourced from the template, a scope frame or the data model
/// passes through here before it is inserted into output, so output trees
/// never alias their sources or each other.
#[inline]
pub fn detach(value: &Value) -> Value {
    value.clone()
}

/// Template-level semantics for JSON values
pub trait JsonValueExt {
    /// Shared truthiness rule.
    ///
    /// Falsy: `false`, numeric zero, `""`, `[]`, `{}` and `null`.
    /// Everything else is truthy, including the strings `"false"` and `"0"`.
    fn is_truthy(&self) -> bool;

    /// Text used when a value is substituted into a string.
    ///
    /// Strings are used verbatim, `null` becomes empty, every other value
    /// is rendered as compact JSON.
    fn to_display_string(&self) -> String;

    /// Short type name for log messages
    fn type_name(&self) -> &'static str;
}

impl JsonValueExt for Value {
    fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
        }
    }

    fn to_display_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}
