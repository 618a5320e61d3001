//! Issue detection over the original snippet.
//!
//! Each check runs on its own against the masked original text, so a finding
//! inside a string literal or comment is never reported.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use snipfix_common::{Issue, message_codes};
use snipfix_scanner::{
    computed_variables, first_return, is_reserved, is_standalone, mask_source, scan_declarations,
    undefined_identifiers,
};

static LEGACY_DECLARATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bvar\s").unwrap());
static OFF_BY_ONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z_$][\w$]*\s*<=\s*[A-Za-z_$][\w$]*\.length\b").unwrap()
});

fn uses_legacy_declaration(masked: &str) -> bool {
    LEGACY_DECLARATION
        .find_iter(masked)
        .any(|m| is_standalone(masked, m.start(), m.start() + 3))
}

/// Whether `masked` contains `==` or `!=` that is not part of `===`, `!==`,
/// `<=` or `>=`.
#[must_use]
pub fn has_loose_equality(masked: &str) -> bool {
    let bytes = masked.as_bytes();
    bytes.windows(2).enumerate().any(|(i, pair)| {
        let followed_by_eq = bytes.get(i + 2) == Some(&b'=');
        match pair {
            [b'!', b'='] => !followed_by_eq,
            [b'=', b'='] => {
                let prev = i.checked_sub(1).map(|p| bytes[p]);
                !followed_by_eq && !matches!(prev, Some(b'=' | b'!' | b'<' | b'>'))
            }
            _ => false,
        }
    })
}

/// Every issue found in `original`, in a fixed order: legacy declarations,
/// loose equality, undefined identifiers, off-by-one bounds, and a wrong
/// return target.
#[must_use]
pub fn detect_issues(original: &str) -> Vec<Issue> {
    let masked = mask_source(original);
    let index = scan_declarations(original);
    let mut issues = Vec::new();

    if uses_legacy_declaration(&masked) {
        issues.push(Issue::new(message_codes::LEGACY_DECLARATION, &[]));
    }

    if has_loose_equality(&masked) {
        issues.push(Issue::new(message_codes::LOOSE_EQUALITY, &[]));
    }

    for name in undefined_identifiers(original, &index) {
        issues.push(Issue::new(message_codes::UNDEFINED_VARIABLE, &[name.as_str()]));
    }

    if OFF_BY_ONE.is_match(&masked) {
        issues.push(Issue::new(message_codes::OFF_BY_ONE_COMPARISON, &[]));
    }

    if let Some(site) = first_return(&masked) {
        let returned = site.name.as_str();
        let eligible = !index.is_declared(returned)
            && !is_reserved(returned)
            && !index.callables.contains(returned);
        let computed = computed_variables(&masked);
        if let Some(expected) = computed
            .first()
            .filter(|expected| eligible && *expected != returned)
        {
            issues.push(Issue::new(
                message_codes::WRONG_RETURN_TARGET,
                &[returned, expected.as_str()],
            ));
        }
    }

    trace!(issues = issues.len(), "detected issues in original snippet");
    issues
}
