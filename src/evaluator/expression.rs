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

//! Expression evaluation: path resolution plus filter chains

use super::context::EvaluationContext;
use crate::ast::{Expression, Interpolation, Segment, ValueSource};
use crate::model::{JsonValueExt, detach};
use serde_json::Value;
use std::borrow::Cow;

/// Evaluate a placeholder string leaf
///
/// A pure placeholder yields its native JSON value; mixed text always
/// yields a string, with absent values rendered as empty text.
pub fn evaluate_interpolation(interpolation: &Interpolation, context: &EvaluationContext) -> Value {
    match interpolation {
        Interpolation::Pure(expression) => into_output(evaluate_expression(expression, context)),
        Interpolation::Mixed(segments) => {
            let mut text = String::new();
            for segment in segments {
                match segment {
                    Segment::Text(literal) => text.push_str(literal),
                    Segment::Expression(expression) => text.push_str(
                        &evaluate_expression(expression, context).to_display_string(),
                    ),
                }
            }
            Value::String(text)
        }
    }
}

/// Resolve the path and run the filter chain left to right
///
/// The result may still borrow from the data model or a scope frame; use
/// [`into_output`] before placing it in an output tree.
pub fn evaluate_expression<'c>(
    expression: &Expression,
    context: &'c EvaluationContext,
) -> Cow<'c, Value> {
    let initial = context
        .resolve(&expression.path)
        .map_or(Cow::Owned(Value::Null), Cow::Borrowed);

    expression.filters.iter().fold(initial, |value, call| match call.filter {
        Some(filter) => filter.apply(value, call.argument.as_deref()),
        None => {
            log::warn!(
                "Unknown filter '{}' in expression '{}', passing value through",
                call.name,
                expression.source
            );
            value
        }
    })
}

/// Evaluate a `$in` / `$if` operand to an owned value
pub fn evaluate_source(source: &ValueSource, context: &EvaluationContext) -> Value {
    match source {
        ValueSource::Path(path) => context.resolve(path).map_or(Value::Null, detach),
        ValueSource::Interpolation(interpolation) => evaluate_interpolation(interpolation, context),
        ValueSource::Literal(value) => detach(value),
    }
}

/// Truthiness of a `$if` operand without copying it
pub fn source_is_truthy(source: &ValueSource, context: &EvaluationContext) -> bool {
    match source {
        ValueSource::Path(path) => context.resolve(path).is_some_and(JsonValueExt::is_truthy),
        ValueSource::Interpolation(Interpolation::Pure(expression)) => {
            evaluate_expression(expression, context).is_truthy()
        }
        ValueSource::Interpolation(interpolation) => {
            evaluate_interpolation(interpolation, context).is_truthy()
        }
        ValueSource::Literal(value) => value.is_truthy(),
    }
}

/// Detach a borrowed result so the output owns it
pub fn into_output(value: Cow<'_, Value>) -> Value {
    match value {
        Cow::Borrowed(borrowed) => detach(borrowed),
        Cow::Owned(owned) => owned,
    }
}
