use snipfix_common::message_codes;
use snipfix_scanner::scan_declarations;

use crate::options::FixerOptions;
use crate::rules::{PatternFixOutput, Rule, apply_pattern_fixes};

fn fix(source: &str) -> PatternFixOutput {
    apply_pattern_fixes(source, scan_declarations(source), &FixerOptions::default())
}

fn fix_with(source: &str, options: &FixerOptions) -> PatternFixOutput {
    apply_pattern_fixes(source, scan_declarations(source), options)
}

fn codes(output: &PatternFixOutput) -> Vec<u32> {
    output.fixes.iter().map(|fix| fix.code).collect()
}

#[test]
fn test_var_becomes_let() {
    let output = fix("function calc(a, b) { var result = a + b; return result; }");
    assert_eq!(
        output.text,
        "function calc(a, b) { let result = a + b; return result; }"
    );
    assert_eq!(codes(&output), vec![message_codes::REPLACED_LEGACY_DECLARATION]);
    assert_eq!(
        output.fixes[0].message_text,
        "Replaced var with let for modern JavaScript practices"
    );
}

#[test]
fn test_var_inside_string_is_untouched() {
    let output = fix(r#"var greeting = "var in a string";"#);
    assert_eq!(output.text, r#"let greeting = "var in a string";"#);
    assert_eq!(output.fixes.len(), 1);
}

#[test]
fn test_var_prefix_of_identifier_is_untouched() {
    let output = fix("let variable = 1;");
    assert_eq!(output.text, "let variable = 1;");
    assert!(output.fixes.is_empty());
}

#[test]
fn test_loop_bound_is_tightened() {
    let output = fix("function f(arr) { for (let i = 0; i <= arr.length; i++) {} }");
    assert_eq!(
        output.text,
        "function f(arr) { for (let i = 0; i < arr.length; i++) {} }"
    );
    assert_eq!(codes(&output), vec![message_codes::FIXED_LOOP_BOUND]);
}

#[test]
fn test_plain_assignment_gets_let() {
    let source = "function double(a) {\n  total = a * 2;\n  return total;\n}";
    let output = fix(source);
    assert_eq!(
        output.text,
        "function double(a) {\n  let total = a * 2;\n  return total;\n}"
    );
    assert_eq!(codes(&output), vec![message_codes::ADDED_DECLARATION]);
    assert_eq!(
        output.fixes[0].message_text,
        "Added let declaration for variable 'total'"
    );
    assert!(output.index.is_declared("total"));
}

#[test]
fn test_accumulator_declared_before_loop() {
    let output = fix(
        "function sum(arr) { for (let i = 0; i <= arr.length; i++) { total += arr[i]; } return total; }",
    );
    assert_eq!(
        output.text,
        "function sum(arr) { let total = 0; for (let i = 0; i < arr.length; i++) { total += arr[i]; } return total; }"
    );
    assert_eq!(
        codes(&output),
        vec![
            message_codes::FIXED_LOOP_BOUND,
            message_codes::ADDED_DECLARATION
        ]
    );
}

#[test]
fn test_accumulator_declared_on_its_own_line() {
    let source = "function sum(arr) {\n  for (let i = 0; i < arr.length; i++) {\n    total += arr[i];\n  }\n  return total;\n}";
    let output = fix(source);
    assert_eq!(
        output.text,
        "function sum(arr) {\n  let total = 0;\n  for (let i = 0; i < arr.length; i++) {\n    total += arr[i];\n  }\n  return total;\n}"
    );
}

#[test]
fn test_product_starts_at_one() {
    let output = fix("function f(xs) { for (const x of xs) { product *= x; } return product; }");
    assert_eq!(
        output.text,
        "function f(xs) { let product = 1; for (const x of xs) { product *= x; } return product; }"
    );
}

#[test]
fn test_accumulator_in_callback_declared_before_call() {
    let output = fix("function sum(arr) { arr.forEach(x => { total += x; }); return total; }");
    assert_eq!(
        output.text,
        "function sum(arr) { let total = 0; arr.forEach(x => { total += x; }); return total; }"
    );
}

#[test]
fn test_return_retargeted_to_computed_variable() {
    let output = fix("function calc(a, b) { let sum = a + b; return x; }");
    assert_eq!(output.text, "function calc(a, b) { let sum = a + b; return sum; }");
    assert_eq!(codes(&output), vec![message_codes::FIXED_RETURN_TARGET]);
    assert_eq!(
        output.fixes[0].message_text,
        "Fixed return statement to return computed variable 'sum'"
    );
}

#[test]
fn test_declared_return_is_kept() {
    let source = "function f(a, b) { let total = a + b; let x = 1; return x; }";
    let output = fix(source);
    assert_eq!(output.text, source);
    assert!(output.fixes.is_empty());
}

#[test]
fn test_literal_return_is_kept() {
    let source = "function f(a) { let s = a + 1; return null; }";
    assert!(fix(source).fixes.is_empty());
}

#[test]
fn test_return_without_computed_variable_is_kept() {
    let source = "function f(a) { let s = a; return x; }";
    let output = fix(source);
    assert_eq!(output.text, source);
    assert!(output.fixes.is_empty());
}

#[test]
fn test_undefined_counter_replaced_by_length() {
    let output =
        fix("function f(arr) { while ((n = arr.length) > 0) { arr.pop(); } return n; }");
    assert_eq!(
        output.text,
        "function f(arr) { while ((arr.length) > 0) { arr.pop(); } return arr.length; }"
    );
    assert_eq!(codes(&output), vec![message_codes::REPLACED_UNDEFINED_COUNTER]);
    assert_eq!(
        output.fixes[0].message_text,
        "Replaced undefined counter 'n' with arr.length"
    );
}

#[test]
fn test_reassigned_counter_is_kept() {
    let source = "function f(arr) { for (n = arr.length; n > 0; n--) {} }";
    let output = fix(source);
    assert_eq!(output.text, source);
    assert!(output.fixes.is_empty());
}

#[test]
fn test_disabled_rule_does_not_fire() {
    let mut options = FixerOptions::default();
    options.disable(Rule::LegacyDeclaration);
    let source = "function calc(a, b) { var result = a + b; return result; }";
    let output = fix_with(source, &options);
    assert_eq!(output.text, source);
    assert!(output.fixes.is_empty());
}

#[test]
fn test_fixing_is_idempotent() {
    let first = fix(
        "function sum(arr) { for (var i = 0; i <= arr.length; i++) { total += arr[i]; } return total; }",
    );
    let second = fix(&first.text);
    assert_eq!(second.text, first.text);
    assert!(second.fixes.is_empty());
}

#[test]
fn test_rule_names_round_trip() {
    for rule in Rule::ALL {
        assert_eq!(Rule::from_name(rule.name()), Some(rule));
        assert_eq!(rule.to_string(), rule.name());
    }
    assert_eq!(Rule::from_name("no-such-rule"), None);
}

#[test]
fn test_two_accumulators_declared_before_multi_line_loop() {
    let source = "function stats(arr) {\n  for (let i = 0; i < arr.length; i++) {\n    total += arr[i];\n    count += 1;\n  }\n  return total;\n}";
    let output = fix(source);
    assert_eq!(
        output.text,
        "function stats(arr) {\n  let total = 0;\n  let count = 0;\n  for (let i = 0; i < arr.length; i++) {\n    total += arr[i];\n    count += 1;\n  }\n  return total;\n}"
    );
    let messages: Vec<&str> = output
        .fixes
        .iter()
        .map(|fix| fix.message_text.as_str())
        .collect();
    assert_eq!(
        messages,
        vec![
            "Added let declaration for variable 'total'",
            "Added let declaration for variable 'count'",
        ]
    );
    assert!(output.index.is_declared("count"));
}

#[test]
fn test_two_accumulators_on_one_line() {
    let output = fix("function f(arr) { for (const x of arr) { total += x; count += 1; } return total; }");
    assert_eq!(
        output.text,
        "function f(arr) { let total = 0; let count = 0; for (const x of arr) { total += x; count += 1; } return total; }"
    );
    assert_eq!(output.fixes.len(), 2);
}

#[test]
fn test_plain_assignment_after_inserted_line() {
    let source = "function f(arr) {\n  for (const x of arr) {\n    total += x;\n  }\n  label = 'sum';\n  return total;\n}";
    let output = fix(source);
    assert_eq!(
        output.text,
        "function f(arr) {\n  let total = 0;\n  for (const x of arr) {\n    total += x;\n  }\n  let label = 'sum';\n  return total;\n}"
    );
    assert_eq!(
        codes(&output),
        vec![
            message_codes::ADDED_DECLARATION,
            message_codes::ADDED_DECLARATION
        ]
    );
}

#[test]
fn test_plain_assignments_on_separate_lines() {
    let source = "function f(a) {\n  first = a + 1;\n  second = first * 2;\n  return second;\n}";
    let output = fix(source);
    assert_eq!(
        output.text,
        "function f(a) {\n  let first = a + 1;\n  let second = first * 2;\n  return second;\n}"
    );
}
