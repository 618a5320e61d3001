//! Composition of the issue list and explanation.

use snipfix_common::{Fix, Issue, message_codes};

use crate::detect::detect_issues;

pub const UNFIXABLE_EXPLANATION: &str = "This snippet could not be safely auto-fixed. Review the detected issues and fix them manually.";
pub const CLEAN_EXPLANATION: &str =
    "The code looks good! No obvious issues detected in this snippet.";

/// Layer-3 output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Explanation {
    pub issues: Vec<Issue>,
    pub explanation: String,
    /// Issues actually detected in the original. Zero when `issues` holds
    /// only a placeholder entry.
    pub detected: usize,
}

fn fixed_explanation(detected: usize, fixes: &[Fix]) -> String {
    let noun = if detected == 1 { "issue" } else { "issues" };
    let applied = fixes
        .iter()
        .map(|fix| fix.message_text.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "The code had {detected} {noun}. Applied deterministic fixes: {applied}. \
         The corrected version is runnable and preserves the original intent."
    )
}

/// Explain `original` given the combined Layer-1 and Layer-2 fix log.
#[must_use]
pub fn explain(original: &str, fixes: &[Fix]) -> Explanation {
    let detected = detect_issues(original);
    let count = detected.len();

    if !fixes.is_empty() {
        let issues = if detected.is_empty() {
            vec![Issue::new(message_codes::QUALITY_IMPROVEMENTS_APPLIED, &[])]
        } else {
            detected
        };
        return Explanation {
            issues,
            explanation: fixed_explanation(count, fixes),
            detected: count,
        };
    }

    if count > 0 {
        return Explanation {
            issues: detected,
            explanation: UNFIXABLE_EXPLANATION.to_string(),
            detected: count,
        };
    }

    Explanation {
        issues: vec![Issue::new(message_codes::NO_ISSUES_DETECTED, &[])],
        explanation: CLEAN_EXPLANATION.to_string(),
        detected: 0,
    }
}
