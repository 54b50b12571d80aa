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

//! Command-line interface for rendering JSON templates
//!
//! Renders a template file against a data model read from a file or stdin.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use jsontemplate::{EngineConfig, Filter, Template};
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "jsontemplate")]
#[command(about = "Render declarative JSON templates against a JSON data model")]
#[command(version)]
#[command(author = "OctoFHIR Team <funyloony@gmail.com>")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a template against a data model
    Render {
        /// JSON file containing the template
        template: PathBuf,
        /// JSON file containing the data model (reads from stdin if not provided)
        #[arg(short, long)]
        data: Option<PathBuf>,
        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
        #[command(flatten)]
        limits: LimitArgs,
    },
    /// Parse a template and report construction problems
    Check {
        /// JSON file containing the template
        template: PathBuf,
    },
    /// List the filters available in expressions
    Filters,
}

#[derive(Args)]
struct LimitArgs {
    /// JSON file with engine configuration (`max_depth`, `max_loop_iterations`)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Maximum template nesting depth
    #[arg(long)]
    max_depth: Option<usize>,
    /// Maximum loop iterations per evaluation
    #[arg(long)]
    max_iterations: Option<usize>,
}

fn main() {
    // Setup human-panic for better error messages
    human_panic::setup_panic!();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Render {
            template,
            data,
            pretty,
            limits,
        } => handle_render(&template, data.as_deref(), pretty, &limits),
        Commands::Check { template } => handle_check(&template),
        Commands::Filters => {
            handle_filters();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

fn handle_render(template: &Path, data: Option<&Path>, pretty: bool, limits: &LimitArgs) -> Result<()> {
    let config = load_config(limits)?;
    let template = load_template(template, config)?;

    let data_text = match data {
        Some(path) => read_file(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Error reading data model from stdin")?;
            buffer
        }
    };
    let data: Value = serde_json::from_str(&data_text).context("Error parsing data model JSON")?;

    let output = template.evaluate_value(&data);
    let rendered = if pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        output.to_string()
    };
    println!("{rendered}");
    Ok(())
}

fn handle_check(template: &Path) -> Result<()> {
    let parsed = load_template(template, EngineConfig::default())?;
    println!(
        "✓ Template parsed successfully ({} nodes)",
        parsed.root().node_count()
    );
    Ok(())
}

fn handle_filters() {
    for filter in Filter::ALL {
        println!("{:<10} {}", filter.name(), filter.documentation());
    }
}

fn load_config(limits: &LimitArgs) -> Result<EngineConfig> {
    let mut config = match &limits.config {
        Some(path) => serde_json::from_str(&read_file(path)?)
            .with_context(|| format!("Error parsing config '{}'", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(max_depth) = limits.max_depth {
        config = config.with_max_depth(max_depth);
    }
    if let Some(max_iterations) = limits.max_iterations {
        config = config.with_max_loop_iterations(max_iterations);
    }
    Ok(config)
}

fn load_template(path: &Path, config: EngineConfig) -> Result<Template> {
    Template::from_path(path, config)
        .with_context(|| format!("Error loading template '{}'", path.display()))
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Error reading file '{}'", path.display()))
}
