use crate::cli::reporter::Reporter;
use crate::pipeline::analyze;

#[test]
fn test_render_unfixable() {
    let rendered = Reporter::new(false).render(&analyze("return z;"));
    assert_eq!(
        rendered,
        "could not safely fix\n\
         \n\
         Issues:\n  - Variable 'z' is undefined or missing declaration\n\
         \n\
         Explanation:\n  This snippet could not be safely auto-fixed. Review the detected issues and fix them manually.\n\
         \n\
         Corrected code:\n\
         This snippet could not be safely auto-fixed."
    );
}

#[test]
fn test_render_fixed_lists_fixes() {
    let rendered = Reporter::new(false)
        .render(&analyze("function calc(a, b) { var result = a + b; return result; }"));
    assert!(rendered.starts_with("fixed\n"));
    assert!(rendered.contains("Fixes:\n  + Replaced var with let for modern JavaScript practices"));
    assert!(rendered.ends_with(
        "Corrected code:\nfunction calc(a, b) { let result = a + b; return result; }"
    ));
}

#[test]
fn test_render_clean_has_no_fixes_section() {
    let rendered = Reporter::new(false).render(&analyze("let a = 1;"));
    assert!(rendered.starts_with("clean\n"));
    assert!(!rendered.contains("Fixes:"));
}

#[test]
fn test_render_rejection() {
    let rendered = Reporter::new(false).render(&analyze(""));
    assert_eq!(rendered, "error: Please supply code to analyze.");
}
