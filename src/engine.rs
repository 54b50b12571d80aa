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

//! Template engine - the main entry point for template evaluation

use crate::ast::TemplateNode;
use crate::config::EngineConfig;
use crate::error::{Result, TemplateError};
use crate::evaluator::{EvaluationContext, evaluate_node};
use crate::parser::parse_template;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// A parsed, immutable template
///
/// Parse once, then evaluate any number of times, from any number of
/// threads. Every evaluation builds its own context and output tree.
///
/// ```
/// use jsontemplate::Template;
/// use serde_json::json;
///
/// let template = Template::new(r#"{"title": "Hi {{name}}!", "items": "{{items}}"}"#)?;
/// let output = template.evaluate_value(&json!({"name": "Ann", "items": [1, 2]}));
/// assert_eq!(output, json!({"title": "Hi Ann!", "items": [1, 2]}));
/// # Ok::<(), jsontemplate::TemplateError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Template {
    source: Value,
    root: TemplateNode,
    config: EngineConfig,
}

impl Template {
    /// Parse a template from JSON text with the default configuration
    pub fn new(text: &str) -> Result<Self> {
        Self::with_config(text, EngineConfig::default())
    }

    /// Parse a template from JSON text with an explicit configuration
    pub fn with_config(text: &str, config: EngineConfig) -> Result<Self> {
        let source: Value = serde_json::from_str(text).map_err(TemplateError::invalid_template)?;
        Ok(Self::from_value_with_config(source, config))
    }

    /// Read and parse a template file
    pub fn from_path(path: impl AsRef<Path>, config: EngineConfig) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::with_config(&text, config)
    }

    /// Build a template from an already-parsed JSON tree
    pub fn from_value(source: Value) -> Self {
        Self::from_value_with_config(source, EngineConfig::default())
    }

    /// Build a template from an already-parsed JSON tree with an explicit configuration
    pub fn from_value_with_config(source: Value, config: EngineConfig) -> Self {
        let root = parse_template(&source);
        log::debug!("Parsed template with {} nodes", root.node_count());
        Self {
            source,
            root,
            config,
        }
    }

    /// Evaluate against data model JSON text, returning output JSON text
    ///
    /// Fails only when `data` is not valid JSON.
    pub fn evaluate(&self, data: &str) -> Result<String> {
        let data: Value = serde_json::from_str(data).map_err(TemplateError::invalid_data_model)?;
        Ok(self.evaluate_value(&data).to_string())
    }

    /// Evaluate against an already-parsed data model
    ///
    /// Never fails: unresolved paths, bad control nodes and exceeded bounds
    /// degrade to absent or partial output.
    pub fn evaluate_value(&self, data: &Value) -> Value {
        let mut context = EvaluationContext::new(data, self.config);
        let output = evaluate_node(&self.root, &mut context).unwrap_or(Value::Null);
        log::debug!(
            "Evaluated template using {} loop iterations",
            context.iterations()
        );
        output
    }

    /// The configuration applied to each evaluation
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The template JSON as it was parsed
    pub fn source(&self) -> &Value {
        &self.source
    }

    /// The parsed template tree
    pub fn root(&self) -> &TemplateNode {
        &self.root
    }
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(text: &str) -> Result<Self> {
        Self::new(text)
    }
}
