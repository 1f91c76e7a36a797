//! Pre-mutation snapshot of the canonical buffer.

use std::borrow::Cow;

use xi_rope::Rope;

/// Reference copy of the buffer taken before a mutation.
///
/// The auto-formatting algorithms splice against this snapshot rather than
/// the live surface text, and the keyup settle check compares the live text
/// against it to decide whether anything changed.
pub(crate) struct TextModel {
    prev: Rope,
}

impl TextModel {
    pub(crate) fn new(initial: &str) -> Self {
        Self {
            prev: Rope::from(initial),
        }
    }

    /// Capture `text` as the new pre-mutation reference.
    pub(crate) fn snapshot(&mut self, text: &str) {
        self.prev = Rope::from(text);
    }

    pub(crate) fn prev(&self) -> &Rope {
        &self.prev
    }

    pub(crate) fn prev_text(&self) -> Cow<'_, str> {
        self.prev.slice_to_cow(..)
    }

    /// Whether `current` differs from the last captured snapshot.
    pub(crate) fn changed_since(&self, current: &str) -> bool {
        self.prev.len() != current.len() || self.prev_text() != current
    }
}

/// Append the missing trailing newline, if any.
///
/// Enforced only during reconciliation, never mid-keystroke: a settled
/// buffer ends with a newline so the highlighter and the gutter always see
/// complete lines.
pub(crate) fn ensure_trailing_newline(text: &mut String) -> bool {
    if text.ends_with('\n') {
        false
    } else {
        text.push('\n');
        true
    }
}

/// Visible line count for the gutter: `max(1, segments - 1)` over the
/// newline-delimited split, so the settled trailing newline does not count
/// as an extra line.
pub(crate) fn line_count(text: &str) -> usize {
    text.split('\n').count().saturating_sub(1).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn snapshot_tracks_changes() {
        let mut model = TextModel::new("");
        model.snapshot("abc\n");
        assert!(!model.changed_since("abc\n"));
        assert!(model.changed_since("abcd\n"));
        assert!(model.changed_since("abd\n"));
    }

    #[rstest]
    #[case("abc", true, "abc\n")]
    #[case("abc\n", false, "abc\n")]
    #[case("", true, "\n")]
    fn trailing_newline_is_appended_once(
        #[case] input: &str,
        #[case] expect_fix: bool,
        #[case] expected: &str,
    ) {
        let mut text = input.to_string();
        assert_eq!(ensure_trailing_newline(&mut text), expect_fix);
        assert_eq!(text, expected);
    }

    #[rstest]
    #[case("\n", 1)]
    #[case("a\n", 1)]
    #[case("a\nb\n", 2)]
    #[case("a\n\n", 2)]
    fn line_count_ignores_the_settled_newline(#[case] text: &str, #[case] expected: usize) {
        assert_eq!(line_count(text), expected);
    }
}
