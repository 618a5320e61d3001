use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the snipfix binary.
#[derive(Parser, Debug)]
#[command(
    name = "snipfix",
    version,
    about = "Detect and repair common mistakes in short JavaScript snippets"
)]
pub struct CliArgs {
    /// Snippet file to analyze. Reads stdin when omitted or `-`.
    pub input: Option<PathBuf>,

    // ==================== Output ====================
    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// When to color text output.
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    // ==================== Fixer ====================
    /// Path to a snipfix.json config file.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Disable a Layer-1 rule by name (repeatable).
    #[arg(long = "disable-rule", value_name = "RULE")]
    pub disable_rules: Vec<String>,

    /// Skip undefined-identifier resolution.
    #[arg(long = "no-resolve")]
    pub no_resolve: bool,
}

impl CliArgs {
    /// The input path, or `None` for stdin.
    pub fn input_path(&self) -> Option<&PathBuf> {
        self.input
            .as_ref()
            .filter(|path| path.as_os_str() != "-")
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}
