//! Byte-offset text edits.
//!
//! Pattern rules locate their targets on a masked copy of the snippet and
//! express rewrites as edits against the same offsets, so the real text is
//! only ever touched here.

/// A replacement of `start..end` with `new_text`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextEdit {
    pub start: usize,
    pub end: usize,
    pub new_text: String,
}

impl TextEdit {
    #[must_use]
    pub fn replace(start: usize, end: usize, new_text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            new_text: new_text.into(),
        }
    }

    #[must_use]
    pub fn insert(at: usize, new_text: impl Into<String>) -> Self {
        Self::replace(at, at, new_text)
    }

    #[must_use]
    pub fn delete(start: usize, end: usize) -> Self {
        Self::replace(start, end, String::new())
    }
}

/// Apply `edits` to `text` and return the rewritten string.
///
/// Edits are applied in offset order. An edit that overlaps an earlier one, or
/// that does not fall on character boundaries, is dropped.
#[must_use]
pub fn apply_edits(text: &str, mut edits: Vec<TextEdit>) -> String {
    edits.sort_by_key(|edit| (edit.start, edit.end));

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for edit in edits {
        if edit.start < cursor
            || edit.end < edit.start
            || edit.end > text.len()
            || !text.is_char_boundary(edit.start)
            || !text.is_char_boundary(edit.end)
        {
            continue;
        }
        out.push_str(&text[cursor..edit.start]);
        out.push_str(&edit.new_text);
        cursor = edit.end;
    }
    out.push_str(&text[cursor..]);
    out
}
