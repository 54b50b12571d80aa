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

//! Filter catalog and dispatch

use super::filters::{boolean, collection, datetime, string, utility};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

/// Every named transform a filter chain may apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    /// `default: x`
    Default,
    /// `size`
    Size,
    /// `truncate: n`
    Truncate,
    /// `escape`
    Escape,
    /// `upcase`
    Upcase,
    /// `downcase`
    Downcase,
    /// `json`
    Json,
    /// `not` / `negate`
    Not,
    /// `if_true: x`
    IfTrue,
    /// `duration`
    Duration,
    /// `first`
    First,
    /// `last`
    Last,
    /// `join: sep`
    Join,
    /// `append: s`
    Append,
    /// `prepend: s`
    Prepend,
    /// `date: fmt`
    Date,
}

impl Filter {
    /// Every catalog entry
    pub const ALL: [Filter; 16] = [
        Filter::Default,
        Filter::Size,
        Filter::Truncate,
        Filter::Escape,
        Filter::Upcase,
        Filter::Downcase,
        Filter::Json,
        Filter::Not,
        Filter::IfTrue,
        Filter::Duration,
        Filter::First,
        Filter::Last,
        Filter::Join,
        Filter::Append,
        Filter::Prepend,
        Filter::Date,
    ];

    /// Resolve a filter name as written in a template
    pub fn from_name(name: &str) -> Option<Self> {
        let filter = match name {
            "default" => Filter::Default,
            "size" => Filter::Size,
            "truncate" => Filter::Truncate,
            "escape" => Filter::Escape,
            "upcase" => Filter::Upcase,
            "downcase" => Filter::Downcase,
            "json" => Filter::Json,
            "not" | "negate" => Filter::Not,
            "if_true" => Filter::IfTrue,
            "duration" => Filter::Duration,
            "first" => Filter::First,
            "last" => Filter::Last,
            "join" => Filter::Join,
            "append" => Filter::Append,
            "prepend" => Filter::Prepend,
            "date" => Filter::Date,
            _ => return None,
        };
        Some(filter)
    }

    /// Canonical name
    pub fn name(&self) -> &'static str {
        match self {
            Filter::Default => "default",
            Filter::Size => "size",
            Filter::Truncate => "truncate",
            Filter::Escape => "escape",
            Filter::Upcase => "upcase",
            Filter::Downcase => "downcase",
            Filter::Json => "json",
            Filter::Not => "not",
            Filter::IfTrue => "if_true",
            Filter::Duration => "duration",
            Filter::First => "first",
            Filter::Last => "last",
            Filter::Join => "join",
            Filter::Append => "append",
            Filter::Prepend => "prepend",
            Filter::Date => "date",
        }
    }

    /// One-line description, shown by the command line `filters` listing
    pub fn documentation(&self) -> &'static str {
        match self {
            Filter::Default => "Returns the input if truthy, otherwise the argument (or null).",
            Filter::Size => "Length of an array or string, key count of an object, otherwise 0.",
            Filter::Truncate => "Cuts a string to N characters and appends \"...\" when longer.",
            Filter::Escape => "HTML-escapes a string.",
            Filter::Upcase => "Converts a string to upper case.",
            Filter::Downcase => "Converts a string to lower case.",
            Filter::Json => "Serializes the input to compact JSON text.",
            Filter::Not => "Boolean negation of the input's truthiness (alias: negate).",
            Filter::IfTrue => "Returns the argument if the input is truthy, otherwise the input.",
            Filter::Duration => "Formats milliseconds as HH:MM:SS.",
            Filter::First => "First element of an array, otherwise null.",
            Filter::Last => "Last element of an array, otherwise null.",
            Filter::Join => "Joins array elements with the argument (default \", \").",
            Filter::Append => "Appends the argument to the stringified input.",
            Filter::Prepend => "Prepends the argument to the stringified input.",
            Filter::Date => "Formats an epoch number or date string with strftime tokens.",
        }
    }

    /// Apply this filter to a value
    ///
    /// Pass-through results keep borrowing the input, so values only get
    /// copied when a filter actually produces something new.
    pub fn apply<'v>(&self, input: Cow<'v, Value>, argument: Option<&str>) -> Cow<'v, Value> {
        match self {
            Filter::Default => boolean::default(input, argument),
            Filter::Not => boolean::not(&input),
            Filter::IfTrue => boolean::if_true(input, argument),
            Filter::Size => collection::size(&input),
            Filter::First => collection::first(input),
            Filter::Last => collection::last(input),
            Filter::Join => collection::join(input, argument),
            Filter::Truncate => string::truncate(input, argument),
            Filter::Escape => string::escape(input),
            Filter::Upcase => string::upcase(input),
            Filter::Downcase => string::downcase(input),
            Filter::Append => string::append(&input, argument),
            Filter::Prepend => string::prepend(&input, argument),
            Filter::Duration => datetime::duration(input),
            Filter::Date => datetime::date(input, argument),
            Filter::Json => utility::json(&input),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
