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

//! Expression AST node definitions

use crate::registry::Filter;
use std::fmt;

/// Dot-path into the evaluation context (`user.address.city`, `items.0`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// Create a path from its segments
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// Path segments, first segment is the binding or root property name
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Check if the path has no segments
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// One `| name: argument` step of a filter chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCall {
    /// Filter name as written in the template
    pub name: String,
    /// Resolved catalog entry, `None` when the name is unknown
    pub filter: Option<Filter>,
    /// Literal argument after `:`, never evaluated
    pub argument: Option<String>,
}

impl FilterCall {
    /// Create a filter call, resolving the name against the catalog
    pub fn new(name: impl Into<String>, argument: Option<String>) -> Self {
        let name = name.into();
        Self {
            filter: Filter::from_name(&name),
            name,
            argument,
        }
    }
}

/// A parsed `{{ path | filter: arg | ... }}` placeholder body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    /// Leading dot-path
    pub path: Path,
    /// Filters applied left to right
    pub filters: Vec<FilterCall>,
    /// Original placeholder text, used in log messages
    pub source: String,
}

impl Expression {
    /// Iterate over filter names the catalog does not know
    pub fn unknown_filters(&self) -> impl Iterator<Item = &str> {
        self.filters
            .iter()
            .filter(|call| call.filter.is_none())
            .map(|call| call.name.as_str())
    }
}

/// Piece of a mixed interpolation string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text copied as is
    Text(String),
    /// Placeholder resolved and stringified
    Expression(Expression),
}

/// A string leaf that contains placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interpolation {
    /// The whole string is one placeholder; yields the native JSON value
    Pure(Expression),
    /// Placeholders interleaved with text; always yields a string
    Mixed(Vec<Segment>),
}

impl Interpolation {
    /// All expressions referenced by this leaf
    pub fn expressions(&self) -> Vec<&Expression> {
        match self {
            Interpolation::Pure(expression) => vec![expression],
            Interpolation::Mixed(segments) => segments
                .iter()
                .filter_map(|segment| match segment {
                    Segment::Expression(expression) => Some(expression),
                    Segment::Text(_) => None,
                })
                .collect(),
        }
    }
}
