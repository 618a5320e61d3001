//! Pipeline controller.
//!
//! Runs the stages in their fixed order on one snippet and picks one of three
//! result shapes: fixed, "could not safely fix", or clean. Empty input is
//! rejected before any stage runs.

use serde::Serialize;
use tracing::{debug, field, trace};

use snipfix_common::{Fix, Issue, message_codes};
use snipfix_explain::{CLEAN_EXPLANATION, UNFIXABLE_EXPLANATION, explain};
use snipfix_fixer::{FixerOptions, apply_pattern_fixes, resolve_undefined_identifiers};
use snipfix_scanner::scan_declarations;

pub const EMPTY_INPUT_ERROR: &str = "Please supply code to analyze.";

/// `correctedCode` when no safe rewrite could be produced.
pub const SENTINEL_TEXT: &str = "This snippet could not be safely auto-fixed.";

/// Controller states. Transitions are linear; there is no way back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Scanning,
    PatternFixing,
    Resolving,
    Explaining,
    Done,
}

impl Stage {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Idle => Self::Scanning,
            Self::Scanning => Self::PatternFixing,
            Self::PatternFixing => Self::Resolving,
            Self::Resolving => Self::Explaining,
            Self::Explaining | Self::Done => Self::Done,
        }
    }

    fn advance(&mut self) {
        *self = self.next();
        trace!(stage = ?self, "entering stage");
    }
}

/// Which result shape the controller chose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Rewrites were applied and the text changed.
    Fixed,
    /// Issues were found but nothing could be rewritten safely.
    Unfixable,
    /// Nothing to report.
    Clean,
}

/// The terminal value of a pipeline run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub issues: Vec<Issue>,
    pub explanation: String,
    pub corrected_code: String,
    /// Combined Layer-1 and Layer-2 fix log.
    #[serde(skip)]
    pub fixes: Vec<Fix>,
    #[serde(skip)]
    pub outcome: Outcome,
}

/// Either a rejection of the input or a full report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Analysis {
    Rejected { error: String },
    Report(AnalysisResult),
}

impl Analysis {
    #[must_use]
    pub fn report(&self) -> Option<&AnalysisResult> {
        match self {
            Self::Report(result) => Some(result),
            Self::Rejected { .. } => None,
        }
    }

    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.report().map(|result| result.outcome)
    }

    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

/// Options for a pipeline run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    pub fixer: FixerOptions,
}

/// Analyze `snippet` with every rule and the resolution gate enabled.
#[must_use]
pub fn analyze(snippet: &str) -> Analysis {
    analyze_with_options(snippet, &PipelineOptions::default())
}

/// Analyze `snippet` under `options`.
#[must_use]
#[tracing::instrument(level = "debug", skip_all, fields(len = snippet.len(), outcome = tracing::field::Empty))]
pub fn analyze_with_options(snippet: &str, options: &PipelineOptions) -> Analysis {
    if snippet.trim().is_empty() {
        debug!("rejecting empty snippet");
        return Analysis::Rejected {
            error: EMPTY_INPUT_ERROR.to_string(),
        };
    }

    let mut stage = Stage::Idle;

    stage.advance();
    let index = scan_declarations(snippet);

    stage.advance();
    let layer1 = apply_pattern_fixes(snippet, index, &options.fixer);
    let mut fixes = layer1.fixes;

    stage.advance();
    let final_text = if options.fixer.resolve_identifiers {
        let layer2 = resolve_undefined_identifiers(&layer1.text, &layer1.index);
        if !layer2.unresolved.is_empty() {
            debug!(unresolved = ?layer2.unresolved, "identifiers left unresolved");
        }
        fixes.extend(layer2.fixes);
        layer2.text
    } else {
        layer1.text
    };

    stage.advance();
    let explanation = explain(snippet, &fixes);

    stage.advance();
    let result = if !fixes.is_empty() && final_text != snippet {
        AnalysisResult {
            issues: explanation.issues,
            explanation: explanation.explanation,
            corrected_code: final_text,
            fixes,
            outcome: Outcome::Fixed,
        }
    } else if explanation.detected > 0 {
        AnalysisResult {
            issues: explanation.issues,
            explanation: UNFIXABLE_EXPLANATION.to_string(),
            corrected_code: SENTINEL_TEXT.to_string(),
            fixes,
            outcome: Outcome::Unfixable,
        }
    } else {
        AnalysisResult {
            issues: vec![Issue::new(message_codes::NO_ISSUES_DETECTED, &[])],
            explanation: CLEAN_EXPLANATION.to_string(),
            corrected_code: snippet.to_string(),
            fixes,
            outcome: Outcome::Clean,
        }
    };

    tracing::Span::current().record("outcome", field::debug(result.outcome));
    debug!(fixes = result.fixes.len(), issues = result.issues.len(), "analysis complete");
    Analysis::Report(result)
}
