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

//! Error types for template construction and evaluation
//!
//! Only construction can fail on a malformed template. Everything that goes
//! wrong while walking a data model is recovered locally and logged instead.

use thiserror::Error;

/// Result type alias for template operations
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Errors surfaced to callers of the template engine
#[derive(Error, Debug)]
pub enum TemplateError {
    /// The template text is not valid JSON
    #[error("Invalid template JSON at line {line}, column {column}: {source}")]
    InvalidTemplate {
        /// 1-based line of the syntax error
        line: usize,
        /// 1-based column of the syntax error
        column: usize,
        /// Underlying parser error
        #[source]
        source: serde_json::Error,
    },

    /// The data model text handed to `evaluate` is not valid JSON
    #[error("Invalid data model JSON at line {line}, column {column}: {source}")]
    InvalidDataModel {
        /// 1-based line of the syntax error
        line: usize,
        /// 1-based column of the syntax error
        column: usize,
        /// Underlying parser error
        #[source]
        source: serde_json::Error,
    },

    /// File access failed (command line front end)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TemplateError {
    /// Wrap a template parse failure
    pub fn invalid_template(source: serde_json::Error) -> Self {
        Self::InvalidTemplate {
            line: source.line(),
            column: source.column(),
            source,
        }
    }

    /// Wrap a data model parse failure
    pub fn invalid_data_model(source: serde_json::Error) -> Self {
        Self::InvalidDataModel {
            line: source.line(),
            column: source.column(),
            source,
        }
    }

    /// Check whether this error came from the template itself
    pub fn is_template_error(&self) -> bool {
        matches!(self, Self::InvalidTemplate { .. })
    }
}
