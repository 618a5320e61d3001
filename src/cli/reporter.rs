use colored::Colorize;

use crate::pipeline::{Analysis, AnalysisResult, Outcome};

/// Renders an `Analysis` as human-readable text.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    pub fn render(&self, analysis: &Analysis) -> String {
        match analysis {
            Analysis::Rejected { error } => format!("{}: {}", self.paint_error("error"), error),
            Analysis::Report(result) => self.format_report(result),
        }
    }

    pub fn format_report(&self, result: &AnalysisResult) -> String {
        let mut out = String::new();
        out.push_str(&self.format_outcome(result.outcome));
        out.push('\n');

        out.push('\n');
        out.push_str(&self.format_heading("Issues"));
        for issue in &result.issues {
            out.push_str("\n  - ");
            out.push_str(&issue.message_text);
        }

        if result.outcome == Outcome::Fixed && !result.fixes.is_empty() {
            out.push_str("\n\n");
            out.push_str(&self.format_heading("Fixes"));
            for fix in &result.fixes {
                out.push_str("\n  + ");
                out.push_str(&fix.message_text);
            }
        }

        out.push_str("\n\n");
        out.push_str(&self.format_heading("Explanation"));
        out.push_str("\n  ");
        out.push_str(&result.explanation);

        out.push_str("\n\n");
        out.push_str(&self.format_heading("Corrected code"));
        out.push('\n');
        out.push_str(&result.corrected_code);
        out
    }

    fn format_outcome(&self, outcome: Outcome) -> String {
        let label = match outcome {
            Outcome::Fixed => "fixed",
            Outcome::Unfixable => "could not safely fix",
            Outcome::Clean => "clean",
        };

        if !self.color {
            return label.to_string();
        }

        match outcome {
            Outcome::Fixed => label.green().bold().to_string(),
            Outcome::Unfixable => label.yellow().bold().to_string(),
            Outcome::Clean => label.cyan().bold().to_string(),
        }
    }

    fn format_heading(&self, heading: &str) -> String {
        let label = format!("{heading}:");
        if self.color {
            label.bold().to_string()
        } else {
            label
        }
    }

    fn paint_error(&self, label: &str) -> String {
        if self.color {
            label.red().bold().to_string()
        } else {
            label.to_string()
        }
    }
}
