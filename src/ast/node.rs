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

//! Template node definitions

use super::{Interpolation, Path};
use indexmap::IndexMap;
use serde_json::Value;

/// Reserved key naming the loop binding
pub const FOR_KEY: &str = "$for";
/// Reserved key holding the loop collection
pub const IN_KEY: &str = "$in";
/// Reserved key holding the loop body
pub const TEMPLATE_KEY: &str = "$template";
/// Reserved key holding the loop fallback body
pub const EMPTY_KEY: &str = "$empty";
/// Reserved key holding the condition
pub const IF_KEY: &str = "$if";
/// Reserved key holding the truthy branch
pub const THEN_KEY: &str = "$then";
/// Reserved key holding the falsy branch
pub const ELSE_KEY: &str = "$else";

/// Name of the implicit per-iteration binding inside loop bodies
pub const LOOP_BINDING: &str = "loop";

/// Parsed template node
///
/// The set of node kinds is closed; evaluation matches on it exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateNode {
    /// Value emitted as is (numbers, booleans, null, plain strings)
    Literal(Value),
    /// String leaf containing `{{...}}` placeholders
    Expression(Interpolation),
    /// Object whose property values are evaluated in key order
    Object(IndexMap<String, TemplateNode>),
    /// Array whose elements are evaluated, splicing control nodes
    Array(Vec<TemplateNode>),
    /// `$for` control node
    Loop(LoopNode),
    /// `$if` control node
    Conditional(ConditionalNode),
}

/// Where a loop collection or a condition value comes from
#[derive(Debug, Clone, PartialEq)]
pub enum ValueSource {
    /// Bare dot-path (`"items"`)
    Path(Path),
    /// Placeholder string (`"{{items | first}}"`)
    Interpolation(Interpolation),
    /// Literal JSON embedded in the template
    Literal(Value),
}

/// `$for` / `$in` / `$template` / `$empty`
///
/// Fields are optional so that an incomplete node still parses; evaluation
/// reports it and produces nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopNode {
    /// Name each element is bound to
    pub binding: Option<String>,
    /// Collection to iterate
    pub collection: Option<ValueSource>,
    /// Body evaluated once per element
    pub body: Option<Box<TemplateNode>>,
    /// Body evaluated when the collection is missing or empty
    pub empty: Option<Box<TemplateNode>>,
}

impl LoopNode {
    /// Names of the required fields that are missing
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.binding.is_none() {
            missing.push(FOR_KEY);
        }
        if self.collection.is_none() {
            missing.push(IN_KEY);
        }
        if self.body.is_none() {
            missing.push(TEMPLATE_KEY);
        }
        missing
    }
}

/// `$if` / `$then` / `$else`
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalNode {
    /// Value tested for truthiness
    pub condition: ValueSource,
    /// Evaluated when the condition is truthy
    pub then_branch: Option<Box<TemplateNode>>,
    /// Evaluated when the condition is falsy
    pub else_branch: Option<Box<TemplateNode>>,
}

impl TemplateNode {
    /// Total number of nodes in this sub-tree
    pub fn node_count(&self) -> usize {
        let children: usize = match self {
            TemplateNode::Literal(_) | TemplateNode::Expression(_) => 0,
            TemplateNode::Object(map) => map.values().map(TemplateNode::node_count).sum(),
            TemplateNode::Array(items) => items.iter().map(TemplateNode::node_count).sum(),
            TemplateNode::Loop(node) => [&node.body, &node.empty]
                .into_iter()
                .flatten()
                .map(|child| child.node_count())
                .sum(),
            TemplateNode::Conditional(node) => [&node.then_branch, &node.else_branch]
                .into_iter()
                .flatten()
                .map(|child| child.node_count())
                .sum(),
        };
        children + 1
    }
}
