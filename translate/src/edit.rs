//! Byte-range edits against one stage's input text.
//!
//! Stages never mutate text while scanning it. They collect the
//! replacements they want to make against the token spans and splice them
//! in one pass at the end.

use std::ops::Range;

/// A replacement for one byte range of the input.
pub(crate) struct Edit {
    pub range: Range<usize>,
    pub text: String,
}

impl Edit {
    pub fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        Edit {
            range,
            text: text.into(),
        }
    }

    pub fn delete(range: Range<usize>) -> Self {
        Edit {
            range,
            text: String::new(),
        }
    }
}

/// Applies edits to the source. The edits must be ordered by start position
/// and must not overlap.
pub(crate) fn apply(source: &str, edits: &[Edit]) -> String {
    let mut output = String::with_capacity(source.len());
    let mut pos = 0;
    for edit in edits {
        output.push_str(&source[pos..edit.range.start]);
        output.push_str(&edit.text);
        pos = edit.range.end;
    }
    output.push_str(&source[pos..]);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_when_no_edits_then_unchanged() {
        assert_eq!("abc", apply("abc", &[]));
    }

    #[test]
    fn apply_when_replace_and_delete_then_spliced() {
        let edits = vec![Edit::replace(0..1, "x"), Edit::delete(2..3)];
        assert_eq!("xb", apply("abc", &edits));
    }
}
