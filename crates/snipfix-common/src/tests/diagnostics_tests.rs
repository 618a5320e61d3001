use crate::diagnostics::{
    Fix, Issue, MESSAGES, MessageCategory, format_message, get_message_template, message_codes,
};

#[test]
fn test_format_message_fills_placeholders() {
    let text = format_message("Function returns '{0}' but should return '{1}'", &["x", "sum"]);
    assert_eq!(text, "Function returns 'x' but should return 'sum'");
}

#[test]
fn test_message_codes_are_unique() {
    for (i, a) in MESSAGES.iter().enumerate() {
        for b in &MESSAGES[i + 1..] {
            assert_ne!(a.code, b.code, "duplicate message code {}", a.code);
        }
    }
}

#[test]
fn test_fix_codes_are_in_fix_category() {
    for message in MESSAGES {
        let expected = if message.code >= 2000 {
            MessageCategory::Fix
        } else {
            MessageCategory::Issue
        };
        assert_eq!(message.category, expected, "code {}", message.code);
    }
}

#[test]
fn test_issue_renders_from_template() {
    let issue = Issue::new(message_codes::UNDEFINED_VARIABLE, &["total"]);
    assert_eq!(
        issue.message_text,
        "Variable 'total' is undefined or missing declaration"
    );
    assert_eq!(issue.to_string(), issue.message_text);
}

#[test]
fn test_fix_serializes_as_plain_string() {
    let fix = Fix::new(message_codes::RESOLVED_IDENTIFIER, &["y", "a"]);
    let json = serde_json::to_string(&fix).unwrap();
    assert_eq!(json, "\"Resolved undefined identifier 'y' → 'a'\"");
}

#[test]
fn test_unknown_code_has_no_template() {
    assert!(get_message_template(42).is_none());
    assert_eq!(Issue::new(42, &[]).message_text, "");
}
