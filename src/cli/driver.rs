//! Reads the snippet, runs the pipeline and renders the report.

use anyhow::{Context, Result};
use std::io::{IsTerminal, Read};
use std::path::Path;
use tracing::debug;

use crate::cli::args::{CliArgs, ColorChoice, OutputFormat};
use crate::cli::config::resolve_pipeline_options;
use crate::cli::reporter::Reporter;
use crate::pipeline::{Analysis, Outcome, analyze_with_options};

pub const EXIT_CLEAN: i32 = 0;
pub const EXIT_FIXED: i32 = 1;
pub const EXIT_UNFIXABLE: i32 = 2;
pub const EXIT_REJECTED: i32 = 3;

/// A rendered report and the process exit code it maps to.
#[derive(Debug)]
pub struct RunOutput {
    pub rendered: String,
    pub exit_code: i32,
}

pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read snippet {}", path.display())),
        None => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("failed to read snippet from stdin")?;
            Ok(source)
        }
    }
}

pub fn exit_code(analysis: &Analysis) -> i32 {
    match analysis.outcome() {
        None => EXIT_REJECTED,
        Some(Outcome::Clean) => EXIT_CLEAN,
        Some(Outcome::Fixed) => EXIT_FIXED,
        Some(Outcome::Unfixable) => EXIT_UNFIXABLE,
    }
}

pub fn use_color(choice: ColorChoice) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stdout().is_terminal(),
    }
}

pub fn render(analysis: &Analysis, format: OutputFormat, color: bool) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(analysis).context("failed to serialize analysis")
        }
        OutputFormat::Text => Ok(Reporter::new(color).render(analysis)),
    }
}

/// Analyze `source` under the options `args` selects.
pub fn run_source(args: &CliArgs, source: &str) -> Result<RunOutput> {
    let options = resolve_pipeline_options(args)?;
    let analysis = analyze_with_options(source, &options);
    let code = exit_code(&analysis);
    debug!(exit_code = code, "analysis finished");
    Ok(RunOutput {
        rendered: render(&analysis, args.format, use_color(args.color))?,
        exit_code: code,
    })
}

pub fn run(args: &CliArgs) -> Result<RunOutput> {
    let source = read_input(args.input_path().map(|path| path.as_path()))?;
    run_source(args, &source)
}
