use serde_json::json;

use snipfix_common::message_codes;
use snipfix_fixer::FixerOptions;

use crate::pipeline::{
    Analysis, EMPTY_INPUT_ERROR, Outcome, PipelineOptions, SENTINEL_TEXT, Stage, analyze,
    analyze_with_options,
};

fn report(snippet: &str) -> crate::pipeline::AnalysisResult {
    match analyze(snippet) {
        Analysis::Report(result) => result,
        Analysis::Rejected { error } => panic!("unexpected rejection: {error}"),
    }
}

#[test]
fn test_empty_and_blank_input_rejected() {
    for snippet in ["", "   ", "\n\t\n"] {
        assert_eq!(
            analyze(snippet),
            Analysis::Rejected {
                error: EMPTY_INPUT_ERROR.to_string()
            }
        );
    }
}

#[test]
fn test_fixed_shape() {
    let result = report("function calc(a, b) { var result = a + b; return result; }");
    assert_eq!(result.outcome, Outcome::Fixed);
    assert_eq!(
        result.corrected_code,
        "function calc(a, b) { let result = a + b; return result; }"
    );
    assert_eq!(result.fixes.len(), 1);
    assert_eq!(
        result.explanation,
        "The code had 1 issue. Applied deterministic fixes: Replaced var with let for modern \
         JavaScript practices. The corrected version is runnable and preserves the original intent."
    );
}

#[test]
fn test_layer_two_resolves_after_layer_one() {
    let result = report("function f(a) { return y; }");
    assert_eq!(result.outcome, Outcome::Fixed);
    assert_eq!(result.corrected_code, "function f(a) { return a; }");
    assert_eq!(
        result.fixes.iter().map(|fix| fix.code).collect::<Vec<_>>(),
        vec![message_codes::RESOLVED_IDENTIFIER]
    );
    assert_eq!(
        result.issues[0].message_text,
        "Variable 'y' is undefined or missing declaration"
    );
}

#[test]
fn test_resolution_can_be_switched_off() {
    let options = PipelineOptions {
        fixer: FixerOptions {
            resolve_identifiers: false,
            ..FixerOptions::default()
        },
    };
    let analysis = analyze_with_options("function f(a) { return y; }", &options);
    assert_eq!(analysis.outcome(), Some(Outcome::Unfixable));
}

#[test]
fn test_unfixable_shape_uses_sentinel() {
    let result = report("return z;");
    assert_eq!(result.outcome, Outcome::Unfixable);
    assert!(result.fixes.is_empty());
    assert_eq!(result.corrected_code, SENTINEL_TEXT);
}

#[test]
fn test_loose_equality_alone_is_not_rewritten() {
    let result = report("function eq(a, b) { return a == b; }");
    assert_eq!(result.outcome, Outcome::Unfixable);
    assert_eq!(result.issues[0].code, message_codes::LOOSE_EQUALITY);
}

#[test]
fn test_clean_shape_echoes_input() {
    let snippet = "function add(a, b) { return a + b; }";
    let result = report(snippet);
    assert_eq!(result.outcome, Outcome::Clean);
    assert_eq!(result.corrected_code, snippet);
    assert_eq!(result.issues[0].message_text, "No obvious issues detected");
}

#[test]
fn test_report_wire_shape() {
    let value = serde_json::to_value(analyze("return z;")).unwrap();
    assert_eq!(
        value,
        json!({
            "issues": ["Variable 'z' is undefined or missing declaration"],
            "explanation": "This snippet could not be safely auto-fixed. Review the detected issues and fix them manually.",
            "correctedCode": "This snippet could not be safely auto-fixed.",
        })
    );
}

#[test]
fn test_rejection_wire_shape() {
    let value = serde_json::to_value(analyze("")).unwrap();
    assert_eq!(value, json!({ "error": "Please supply code to analyze." }));
}

#[test]
fn test_stages_are_linear() {
    let mut stage = Stage::Idle;
    let mut visited = vec![stage];
    while stage != Stage::Done {
        stage = stage.next();
        visited.push(stage);
    }
    assert_eq!(
        visited,
        vec![
            Stage::Idle,
            Stage::Scanning,
            Stage::PatternFixing,
            Stage::Resolving,
            Stage::Explaining,
            Stage::Done,
        ]
    );
    assert_eq!(Stage::Done.next(), Stage::Done);
}
