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

//! Node evaluation: walks the parsed template and builds the output tree

use super::context::{EvaluationContext, ScopeFrame};
use super::expression::{evaluate_interpolation, evaluate_source, source_is_truthy};
use crate::ast::{ConditionalNode, FOR_KEY, LOOP_BINDING, LoopNode, TemplateNode};
use crate::model::{JsonValueExt, detach};
use indexmap::IndexMap;
use serde_json::{Map, Value, json};

/// What a `$for` node produced
#[derive(Debug, Clone, PartialEq)]
pub enum LoopOutput {
    /// One value per iteration that produced something
    Items(Vec<Value>),
    /// The collection was missing, not an array, or empty
    Empty(Option<Value>),
    /// The node was incomplete or cut off by a resource bound
    Skipped,
}

impl LoopOutput {
    /// Value for object-property position: a single nested array
    pub fn into_nested(self) -> Option<Value> {
        match self {
            LoopOutput::Items(items) => Some(Value::Array(items)),
            LoopOutput::Empty(Some(fallback)) => Some(fallback),
            LoopOutput::Empty(None) => Some(Value::Array(Vec::new())),
            LoopOutput::Skipped => None,
        }
    }

    /// Append to an array as siblings
    pub fn splice_into(self, output: &mut Vec<Value>) {
        match self {
            LoopOutput::Items(items) | LoopOutput::Empty(Some(Value::Array(items))) => {
                output.extend(items)
            }
            LoopOutput::Empty(None | Some(Value::Null)) | LoopOutput::Skipped => {}
            LoopOutput::Empty(Some(fallback)) => output.push(fallback),
        }
    }
}

/// Evaluate a node; `None` means the node produced nothing
pub fn evaluate_node(node: &TemplateNode, context: &mut EvaluationContext) -> Option<Value> {
    context.descend(|context| match node {
        TemplateNode::Literal(value) => Some(detach(value)),
        TemplateNode::Expression(interpolation) => {
            Some(evaluate_interpolation(interpolation, context))
        }
        TemplateNode::Object(properties) => Some(evaluate_object(properties, context)),
        TemplateNode::Array(items) => Some(evaluate_array(items, context)),
        TemplateNode::Loop(node) => evaluate_loop(node, context).into_nested(),
        TemplateNode::Conditional(node) => evaluate_conditional(node, context),
    })
}

fn evaluate_object(
    properties: &IndexMap<String, TemplateNode>,
    context: &mut EvaluationContext,
) -> Value {
    let mut output = Map::with_capacity(properties.len());
    for (key, child) in properties {
        let value = evaluate_node(child, context).unwrap_or(Value::Null);
        output.insert(key.clone(), value);
    }
    Value::Object(output)
}

fn evaluate_array(items: &[TemplateNode], context: &mut EvaluationContext) -> Value {
    let mut output = Vec::with_capacity(items.len());
    for item in items {
        match item {
            TemplateNode::Loop(node) => {
                if let Some(result) = context.descend(|context| Some(evaluate_loop(node, context))) {
                    result.splice_into(&mut output);
                }
            }
            TemplateNode::Conditional(_) => {
                output.extend(evaluate_node(item, context).filter(|value| !value.is_null()));
            }
            _ => output.extend(evaluate_node(item, context)),
        }
    }
    Value::Array(output)
}

/// Evaluate a `$for` node
pub fn evaluate_loop(node: &LoopNode, context: &mut EvaluationContext) -> LoopOutput {
    let (Some(binding), Some(collection), Some(body)) =
        (&node.binding, &node.collection, &node.body)
    else {
        log::warn!(
            "Skipping `{FOR_KEY}` node missing {}",
            node.missing_fields().join(", ")
        );
        return LoopOutput::Skipped;
    };

    let elements = match evaluate_source(collection, context) {
        Value::Array(elements) if !elements.is_empty() => elements,
        other => {
            if !other.is_null() && !other.is_array() {
                log::warn!(
                    "`{FOR_KEY}` collection for '{binding}' is a {}, not an array",
                    other.type_name()
                );
            }
            let fallback = node
                .empty
                .as_deref()
                .and_then(|empty| evaluate_node(empty, context));
            return LoopOutput::Empty(fallback);
        }
    };

    let length = elements.len();
    let mut items = Vec::with_capacity(length);
    for (index, element) in elements.into_iter().enumerate() {
        if !context.consume_iteration() {
            break;
        }
        let frame = ScopeFrame::new().bind(binding.as_str(), element).bind(
            LOOP_BINDING,
            json!({
                "index": index,
                "first": index == 0,
                "last": index + 1 == length,
                "length": length,
            }),
        );
        if let Some(value) = context.with_scope(frame, |context| evaluate_node(body, context)) {
            items.push(value);
        }
    }
    LoopOutput::Items(items)
}

/// Evaluate a `$if` node
pub fn evaluate_conditional(node: &ConditionalNode, context: &mut EvaluationContext) -> Option<Value> {
    let branch = if source_is_truthy(&node.condition, context) {
        node.then_branch.as_deref()
    } else {
        node.else_branch.as_deref()
    };
    branch.and_then(|branch| evaluate_node(branch, context))
}
