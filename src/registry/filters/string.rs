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

//! String filters: `truncate`, `escape`, `upcase`, `downcase`, `append`, `prepend`

use crate::model::JsonValueExt;
use serde_json::Value;
use std::borrow::Cow;

const ELLIPSIS: &str = "...";

/// Cut a string to `n` characters, appending `...` when it was longer
///
/// Non-strings and a missing or non-numeric `n` pass through.
pub fn truncate<'v>(input: Cow<'v, Value>, argument: Option<&str>) -> Cow<'v, Value> {
    let Some(limit) = argument.and_then(|arg| arg.trim().parse::<usize>().ok()) else {
        return input;
    };
    let Value::String(s) = input.as_ref() else {
        return input;
    };
    if s.chars().count() <= limit {
        return input;
    }

    let mut truncated: String = s.chars().take(limit).collect();
    truncated.push_str(ELLIPSIS);
    Cow::Owned(Value::String(truncated))
}

/// HTML-escape a string
pub fn escape(input: Cow<'_, Value>) -> Cow<'_, Value> {
    map_string(input, |s| {
        let mut escaped = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&#39;"),
                _ => escaped.push(c),
            }
        }
        escaped
    })
}

/// Upper-case a string
pub fn upcase(input: Cow<'_, Value>) -> Cow<'_, Value> {
    map_string(input, str::to_uppercase)
}

/// Lower-case a string
pub fn downcase(input: Cow<'_, Value>) -> Cow<'_, Value> {
    map_string(input, str::to_lowercase)
}

/// Stringified input followed by the argument
pub fn append(input: &Value, suffix: Option<&str>) -> Cow<'static, Value> {
    let mut text = input.to_display_string();
    text.push_str(suffix.unwrap_or_default());
    Cow::Owned(Value::String(text))
}

/// Argument followed by the stringified input
pub fn prepend(input: &Value, prefix: Option<&str>) -> Cow<'static, Value> {
    let text = format!("{}{}", prefix.unwrap_or_default(), input.to_display_string());
    Cow::Owned(Value::String(text))
}

fn map_string<'v>(input: Cow<'v, Value>, f: impl FnOnce(&str) -> String) -> Cow<'v, Value> {
    match input.as_ref() {
        Value::String(s) => Cow::Owned(Value::String(f(s))),
        _ => input,
    }
}
