//! Referenced-but-undeclared identifiers.

use indexmap::IndexSet;
use rustc_hash::FxHashSet;
use tracing::trace;

use crate::declarations::DeclarationIndex;
use crate::reserved::is_reserved;
use crate::source::{identifiers, is_member_name, is_object_key, mask_source};

/// Identifiers used in `text` that `index` does not account for.
///
/// A name is skipped when it is reserved, when it appears anywhere as a
/// property name (`.name`), when it is a declared function or class, or when
/// it is declared. Object-literal keys are not references. The result is
/// distinct and in order of first appearance.
#[must_use]
pub fn undefined_identifiers(text: &str, index: &DeclarationIndex) -> Vec<String> {
    let masked = mask_source(text);
    let member_names: FxHashSet<&str> = identifiers(&masked)
        .filter(|ident| is_member_name(&masked, ident.start))
        .map(|ident| ident.text)
        .collect();

    let mut undefined = IndexSet::new();
    for ident in identifiers(&masked) {
        let name = ident.text;
        if is_reserved(name)
            || member_names.contains(name)
            || index.callables.contains(name)
            || index.is_declared(name)
            || is_object_key(&masked, &ident)
        {
            continue;
        }
        if undefined.insert(name.to_string()) {
            trace!(name, "undefined identifier");
        }
    }
    undefined.into_iter().collect()
}
