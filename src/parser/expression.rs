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

//! Placeholder and path parsing
//!
//! Parsing is total: malformed placeholder text never fails, it degrades
//! into an expression that resolves to absent.

use super::tokenizer::{Tokenizer, split_filter, unquote_argument};
use crate::ast::{Expression, FilterCall, Interpolation, Path, Segment};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Check if a string contains placeholder syntax
pub fn has_placeholder(text: &str) -> bool {
    text.contains(OPEN)
}

/// Parse a dot-path such as `items[0].name` or `items.0.name`
pub fn parse_path(text: &str) -> Path {
    fn flush(current: &mut String, segments: &mut Vec<String>) {
        let segment = current.trim();
        if !segment.is_empty() {
            segments.push(segment.to_string());
        }
        current.clear();
    }

    let mut segments = Vec::new();
    let mut current = String::new();

    for c in text.chars() {
        match c {
            '.' | '[' | ']' => flush(&mut current, &mut segments),
            _ => current.push(c),
        }
    }
    flush(&mut current, &mut segments);

    Path::new(segments)
}

/// Parse a placeholder body: `path | filter: arg | filter`
pub fn parse_expression(body: &str) -> Expression {
    let mut tokens = Tokenizer::new(body);
    let path = tokens
        .next_token()
        .map(|token| parse_path(token.value))
        .unwrap_or_default();

    let mut filters = Vec::new();
    for token in tokens {
        let (name, argument) = split_filter(token.value);
        if name.is_empty() {
            log::warn!(
                "Empty filter at offset {} in expression '{}', skipping",
                token.start,
                body.trim()
            );
            continue;
        }
        filters.push(FilterCall::new(name, argument.and_then(unquote_argument)));
    }

    Expression {
        path,
        filters,
        source: body.trim().to_string(),
    }
}

/// Parse a string leaf into pure or mixed interpolation
///
/// Returns `None` when the text holds no complete placeholder and should
/// be emitted as a literal.
pub fn parse_interpolation(text: &str) -> Option<Interpolation> {
    let trimmed = text.trim();
    if let Some(body) = pure_body(trimmed) {
        return Some(Interpolation::Pure(parse_expression(body)));
    }

    let mut segments = Vec::new();
    let mut rest = text;
    let mut has_expression = false;

    while let Some(open) = rest.find(OPEN) {
        let after_open = &rest[open + OPEN.len()..];
        let Some(close) = after_open.find(CLOSE) else {
            break;
        };

        if open > 0 {
            segments.push(Segment::Text(rest[..open].to_string()));
        }
        segments.push(Segment::Expression(parse_expression(&after_open[..close])));
        has_expression = true;
        rest = &after_open[close + CLOSE.len()..];
    }

    if !has_expression {
        return None;
    }
    if !rest.is_empty() {
        segments.push(Segment::Text(rest.to_string()));
    }
    Some(Interpolation::Mixed(segments))
}

/// Body of a string that is exactly one placeholder
fn pure_body(trimmed: &str) -> Option<&str> {
    let body = trimmed.strip_prefix(OPEN)?.strip_suffix(CLOSE)?;
    if body.contains(OPEN) || body.contains(CLOSE) {
        return None;
    }
    Some(body)
}
