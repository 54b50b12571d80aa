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

//! Template parser
//!
//! Converts a template JSON tree into a [`TemplateNode`] tree. Any JSON value
//! is a valid template, so this step cannot fail; suspicious constructs
//! (incomplete control nodes, unknown filters) are logged once here.

#![warn(missing_docs)]

pub mod expression;
pub mod span;
pub mod tokenizer;

pub use expression::{has_placeholder, parse_expression, parse_interpolation, parse_path};
pub use span::Spanned;
pub use tokenizer::Tokenizer;

use crate::ast::{
    ConditionalNode, ELSE_KEY, EMPTY_KEY, FOR_KEY, IF_KEY, IN_KEY, Interpolation, LoopNode,
    TEMPLATE_KEY, THEN_KEY, TemplateNode, ValueSource,
};
use serde_json::{Map, Value};

/// Parse a template JSON tree
pub fn parse_template(value: &Value) -> TemplateNode {
    match value {
        Value::String(text) => parse_string(text),
        Value::Array(items) => TemplateNode::Array(items.iter().map(parse_template).collect()),
        Value::Object(map) if map.contains_key(FOR_KEY) => TemplateNode::Loop(parse_loop(map)),
        Value::Object(map) if map.contains_key(IF_KEY) => {
            TemplateNode::Conditional(parse_conditional(map))
        }
        Value::Object(map) => TemplateNode::Object(
            map.iter()
                .map(|(key, child)| (key.clone(), parse_template(child)))
                .collect(),
        ),
        literal => TemplateNode::Literal(literal.clone()),
    }
}

fn parse_string(text: &str) -> TemplateNode {
    if !has_placeholder(text) {
        return TemplateNode::Literal(Value::String(text.to_string()));
    }
    match parse_interpolation(text) {
        Some(interpolation) => {
            warn_unknown_filters(&interpolation);
            TemplateNode::Expression(interpolation)
        }
        None => TemplateNode::Literal(Value::String(text.to_string())),
    }
}

fn parse_loop(map: &Map<String, Value>) -> LoopNode {
    let binding = match map.get(FOR_KEY) {
        Some(Value::String(name)) if !name.trim().is_empty() => Some(name.trim().to_string()),
        other => {
            log::warn!("`{FOR_KEY}` must be a non-empty binding name, found {other:?}");
            None
        }
    };

    let node = LoopNode {
        binding,
        collection: map.get(IN_KEY).map(parse_source),
        body: map.get(TEMPLATE_KEY).map(|body| Box::new(parse_template(body))),
        empty: map.get(EMPTY_KEY).map(|body| Box::new(parse_template(body))),
    };

    let missing = node.missing_fields();
    if !missing.is_empty() {
        log::warn!(
            "Incomplete `{FOR_KEY}` node, missing {}; it will produce nothing",
            missing.join(", ")
        );
    }
    node
}

fn parse_conditional(map: &Map<String, Value>) -> ConditionalNode {
    let condition = map.get(IF_KEY).map(parse_source).unwrap_or(ValueSource::Literal(Value::Null));
    ConditionalNode {
        condition,
        then_branch: map.get(THEN_KEY).map(|branch| Box::new(parse_template(branch))),
        else_branch: map.get(ELSE_KEY).map(|branch| Box::new(parse_template(branch))),
    }
}

/// `$in` / `$if` operand: path, placeholder string, or literal JSON
fn parse_source(value: &Value) -> ValueSource {
    match value {
        Value::String(text) => match parse_interpolation(text) {
            Some(interpolation) => {
                warn_unknown_filters(&interpolation);
                ValueSource::Interpolation(interpolation)
            }
            None => ValueSource::Path(parse_path(text)),
        },
        literal => ValueSource::Literal(literal.clone()),
    }
}

fn warn_unknown_filters(interpolation: &Interpolation) {
    for expression in interpolation.expressions() {
        for name in expression.unknown_filters() {
            log::warn!(
                "Unknown filter '{name}' in expression '{}'; values will pass through unchanged",
                expression.source
            );
        }
    }
}
