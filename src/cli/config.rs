//! `snipfix.json` loading and flag merging.
//!
//! ```json
//! { "disabledRules": ["return-target"], "resolveIdentifiers": true }
//! ```
//!
//! Command-line flags are applied on top of the file.

use anyhow::{Context, Result, bail};
use std::path::Path;

use snipfix_fixer::{FixerOptions, Rule};

use crate::cli::args::CliArgs;
use crate::pipeline::PipelineOptions;

pub fn parse_config(source: &str) -> Result<FixerOptions> {
    serde_json::from_str(source).context("failed to parse snipfix config")
}

pub fn load_config(path: &Path) -> Result<FixerOptions> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse_config(&source).with_context(|| format!("invalid config file {}", path.display()))
}

fn parse_rule(name: &str) -> Result<Rule> {
    match Rule::from_name(name) {
        Some(rule) => Ok(rule),
        None => {
            let known: Vec<&str> = Rule::ALL.iter().map(|rule| rule.name()).collect();
            bail!("unknown rule '{}' (expected one of: {})", name, known.join(", "))
        }
    }
}

/// Pipeline options from the config file (if any) and the command line.
pub fn resolve_pipeline_options(args: &CliArgs) -> Result<PipelineOptions> {
    let mut fixer = match &args.config {
        Some(path) => load_config(path)?,
        None => FixerOptions::default(),
    };

    for name in &args.disable_rules {
        fixer.disable(parse_rule(name)?);
    }
    if args.no_resolve {
        fixer.resolve_identifiers = false;
    }

    Ok(PipelineOptions { fixer })
}
