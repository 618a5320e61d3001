use crate::source::{
    identifiers, is_member_name, is_object_key, is_standalone, is_valid_identifier, line_starts,
    mask_source,
};

#[test]
fn test_mask_preserves_length_and_newlines() {
    let source = "let s = \"var x\"; // total\nreturn s;";
    let masked = mask_source(source);
    assert_eq!(masked.len(), source.len());
    assert_eq!(masked, "let s = \"     \";         \nreturn s;");
}

#[test]
fn test_mask_block_comment_and_template() {
    let source = "/* var a */ let t = `x ${y}`;";
    let masked = mask_source(source);
    assert_eq!(masked.len(), source.len());
    assert_eq!(masked, "            let t = `    y `;");
}

#[test]
fn test_mask_nested_interpolations() {
    let source = "let s = `a ${ {k: v}.k } b ${`in ${z}`} c`; w";
    let masked = mask_source(source);
    assert_eq!(masked, "let s = `     {k: v}.k       `     z `   `; w");
    let names: Vec<&str> = identifiers(&masked).map(|ident| ident.text).collect();
    assert_eq!(names, vec!["let", "s", "k", "v", "k", "z", "w"]);
}

#[test]
fn test_mask_brace_in_string_inside_interpolation() {
    assert_eq!(mask_source("let s = `${'}'}` + q;"), "let s = `  ' ' ` + q;");
}

#[test]
fn test_mask_multibyte_string_keeps_offsets() {
    let source = "let s = 'é→'; x = 1;";
    let masked = mask_source(source);
    assert_eq!(masked.len(), source.len());
    assert_eq!(&masked[masked.len() - 6..], "x = 1;");
}

#[test]
fn test_mask_escaped_quote() {
    let masked = mask_source(r#"let s = "a\"b"; c"#);
    assert!(masked.ends_with("; c"));
}

#[test]
fn test_identifiers_skip_numbers() {
    let names: Vec<&str> = identifiers("x = 1e5 + 0xff + y2;")
        .map(|ident| ident.text)
        .collect();
    assert_eq!(names, vec!["x", "y2"]);
}

#[test]
fn test_identifier_offsets() {
    let ids: Vec<_> = identifiers("  $a = _b;").collect();
    assert_eq!(ids[0].start, 2);
    assert_eq!(ids[0].text, "$a");
    assert_eq!(ids[1].start, 7);
    assert_eq!(ids[1].end(), 9);
}

#[test]
fn test_member_name_detection() {
    let masked = "arr.length + a. b + [...rest]";
    let starts: Vec<(&str, bool)> = identifiers(masked)
        .map(|ident| (ident.text, is_member_name(masked, ident.start)))
        .collect();
    assert_eq!(
        starts,
        vec![
            ("arr", false),
            ("length", true),
            ("a", false),
            ("b", true),
            ("rest", false)
        ]
    );
}

#[test]
fn test_object_key_detection() {
    let masked = "let o = { key: v, other: w }; let t = c ? d : e;";
    let keys: Vec<&str> = identifiers(masked)
        .filter(|ident| is_object_key(masked, ident))
        .map(|ident| ident.text)
        .collect();
    assert_eq!(keys, vec!["key", "other"]);
}

#[test]
fn test_is_standalone() {
    let masked = "var x; obj.var; $var";
    assert!(is_standalone(masked, 0, 3));
    assert!(!is_standalone(masked, 11, 14));
    assert!(!is_standalone(masked, 17, 20));
}

#[test]
fn test_valid_identifier() {
    assert!(is_valid_identifier("total"));
    assert!(is_valid_identifier("$el"));
    assert!(!is_valid_identifier("1x"));
    assert!(!is_valid_identifier(""));
    assert!(!is_valid_identifier("a b"));
}

#[test]
fn test_line_starts() {
    assert_eq!(line_starts("a\nbc\n"), vec![0, 2, 5]);
    assert_eq!(line_starts(""), vec![0]);
}
