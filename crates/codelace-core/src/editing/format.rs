//! Structural auto-formatting: indent-on-enter, dedent, bracket pairing.
//!
//! Every function here is pure: it reads the pre-mutation snapshot and
//! returns the complete replacement text with the caret position that
//! belongs to it. The editor applies the result atomically and requests an
//! immediate reconciliation, so auto-formatting never feels laggy.

use std::ops::Range;

use xi_rope::Rope;

/// A fully-computed buffer replacement and the caret that goes with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub text: String,
    pub caret: usize,
}

/// Closing partner of an opening bracket or quote.
pub fn closing_for(open: char) -> Option<char> {
    match open {
        '[' => Some(']'),
        '(' => Some(')'),
        '{' => Some('}'),
        '"' => Some('"'),
        '\'' => Some('\''),
        _ => None,
    }
}

/// Whether `ch` can close a pair. Quotes are both openers and closers;
/// skip-over is checked before auto-close so a quote typed in front of an
/// identical one skips instead of doubling.
pub fn is_closing(ch: char) -> bool {
    matches!(ch, ']' | ')' | '}' | '"' | '\'')
}

fn whitespace_prefix(line: &str) -> &str {
    let end = line.len() - line.trim_start().len();
    &line[..end]
}

/// Indent-on-enter.
///
/// The new line inherits the indentation of the line the caret leaves, one
/// indent unit deeper when that line ends in `[` or `{`. When the character
/// immediately after the caret is a closer (`)`, `}` or `]`), a second line
/// at the original indentation is inserted so the closer lands on its own
/// line; the caret stays on the indented blank line in between. Only the
/// single character directly after the caret is inspected, intervening
/// whitespace is not skipped.
pub fn auto_indent(prev: &Rope, caret: usize, indent_unit: &str) -> TextEdit {
    let before = prev.slice_to_cow(..caret);
    let after = prev.slice_to_cow(caret..prev.len());

    let last_line = before.rsplit('\n').next().unwrap_or("");
    let last_indentation = whitespace_prefix(last_line);
    let last_char = last_line.trim().chars().next_back();

    let mut indentation = last_indentation.to_string();
    if matches!(last_char, Some('[' | '{')) {
        indentation.push_str(indent_unit);
    }
    let extra_line = matches!(after.chars().next(), Some(')' | '}' | ']'));

    let mut insert = String::with_capacity(2 + indentation.len() + last_indentation.len());
    insert.push('\n');
    insert.push_str(&indentation);
    if extra_line {
        insert.push('\n');
        insert.push_str(last_indentation);
    }

    let caret_after = caret + 1 + indentation.len();
    let mut text = prev.clone();
    text.edit(caret..caret, insert.as_str());
    TextEdit {
        text: text.to_string(),
        caret: caret_after,
    }
}

/// Dedent on Backspace or Shift+Tab inside leading whitespace.
///
/// Applies only when the text on the caret's line before the caret is
/// non-empty and entirely whitespace; returns `None` otherwise so the
/// caller lets native behavior proceed. Removal snaps the caret back to the
/// previous tab stop: a full indent unit when the prefix is a multiple of
/// the unit width, the remainder otherwise.
pub fn dedent(prev: &Rope, caret: usize, unit_width: usize) -> Option<TextEdit> {
    let before = prev.slice_to_cow(..caret);
    let line = before.rsplit('\n').next().unwrap_or("");
    if line.is_empty() || !line.trim().is_empty() {
        return None;
    }

    let width = line.len();
    let remove = if width % unit_width == 0 {
        unit_width
    } else {
        width % unit_width
    };

    let mut text = prev.clone();
    text.edit(caret - remove..caret, "");
    Some(TextEdit {
        text: text.to_string(),
        caret: caret - remove,
    })
}

/// Auto-close and wrap.
///
/// Replaces the selection (empty for a caret) with
/// `open + selected text + close`; the caret ends immediately after the
/// inserted opening character.
pub fn auto_close(prev: &Rope, selection: Range<usize>, open: char, close: char) -> TextEdit {
    let wrapped = prev.slice_to_cow(selection.clone());
    let mut replacement = String::with_capacity(wrapped.len() + 2);
    replacement.push(open);
    replacement.push_str(&wrapped);
    replacement.push(close);

    let caret = selection.start + open.len_utf8();
    let mut text = prev.clone();
    text.edit(selection, replacement.as_str());
    TextEdit {
        text: text.to_string(),
        caret,
    }
}
