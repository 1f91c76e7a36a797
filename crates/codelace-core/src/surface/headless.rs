//! In-memory host surface.
//!
//! Behaves like a contenteditable region without a UI: content is a flat
//! list of text leaves, markup replacement re-chunks that list the way an
//! `innerHTML` assignment turns markup into text nodes (tags dropped,
//! entities decoded), and the selection survives content replacement only
//! as a clamped caret — which is exactly why reconciliation saves and
//! restores the offset around it.

use super::{Surface, SurfacePoint, SurfaceSelection};

#[derive(Debug)]
pub struct HeadlessSurface {
    leaves: Vec<String>,
    gutter: String,
    gutter_writes: usize,
    focused: bool,
    selection: Option<SurfaceSelection>,
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self {
            leaves: vec![String::new()],
            gutter: String::new(),
            gutter_writes: 0,
            focused: false,
            selection: None,
        }
    }

    /// Give or take focus. Gaining focus with no selection places a caret
    /// at the start, the way focusing an editable region does.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if focused && self.selection.is_none() {
            self.selection = Some(SurfaceSelection::caret(SurfacePoint { leaf: 0, offset: 0 }));
        }
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// The current leaf chunking, for assertions on rendered structure.
    pub fn leaves(&self) -> &[String] {
        &self.leaves
    }

    pub fn gutter(&self) -> &str {
        &self.gutter
    }

    /// How many times the gutter has been rewritten; the editor only
    /// rewrites it when the line count changes.
    pub fn gutter_writes(&self) -> usize {
        self.gutter_writes
    }

    fn resolve(&self, point: SurfacePoint) -> usize {
        let preceding: usize = self.leaves[..point.leaf].iter().map(String::len).sum();
        preceding + point.offset
    }

    fn caret_point(&self, offset: usize) -> SurfacePoint {
        let mut remaining = offset;
        let last = self.leaves.len() - 1;
        for (leaf, text) in self.leaves.iter().enumerate() {
            if remaining > text.len() && leaf < last {
                remaining -= text.len();
                continue;
            }
            return SurfacePoint {
                leaf,
                offset: remaining.min(text.len()),
            };
        }
        SurfacePoint { leaf: 0, offset: 0 }
    }

    /// Replace the whole leaf list, collapsing any selection to a clamped
    /// caret at its former start offset.
    fn replace_leaves(&mut self, leaves: Vec<String>) {
        let saved = self.selection.map(|selection| self.resolve(selection.start));
        self.leaves = leaves;
        if self.leaves.is_empty() {
            self.leaves.push(String::new());
        }
        if let Some(offset) = saved {
            self.selection = Some(SurfaceSelection::caret(self.caret_point(offset)));
        }
    }

    fn replace_selection(&mut self, text: &str) {
        let selection = self
            .selection
            .filter(|_| self.focused)
            .expect("native editing requires an active selection");
        let (mut start, mut end) = (selection.start, selection.end);
        if self.resolve(start) > self.resolve(end) {
            std::mem::swap(&mut start, &mut end);
        }

        if start.leaf == end.leaf {
            self.leaves[start.leaf].replace_range(start.offset..end.offset, text);
        } else {
            let tail = self.leaves[end.leaf][end.offset..].to_string();
            let head = &mut self.leaves[start.leaf];
            head.truncate(start.offset);
            head.push_str(text);
            head.push_str(&tail);
            self.leaves.drain(start.leaf + 1..=end.leaf);
        }

        self.selection = Some(SurfaceSelection::caret(SurfacePoint {
            leaf: start.leaf,
            offset: start.offset + text.len(),
        }));
    }
}

/// Chunk markup into text leaves: tags are dropped, entity references are
/// decoded, and each run of text between tags becomes one leaf. An
/// unterminated tag swallows the rest of the input, like a forgiving HTML
/// parser.
fn leaves_from_markup(markup: &str) -> Vec<String> {
    let mut leaves = Vec::new();
    let mut rest = markup;
    while let Some(open) = rest.find('<') {
        if open > 0 {
            leaves.push(html_escape::decode_html_entities(&rest[..open]).into_owned());
        }
        match rest[open..].find('>') {
            Some(close) => rest = &rest[open + close + 1..],
            None => rest = "",
        }
    }
    if !rest.is_empty() {
        leaves.push(html_escape::decode_html_entities(rest).into_owned());
    }
    if leaves.is_empty() {
        leaves.push(String::new());
    }
    leaves
}

impl Surface for HeadlessSurface {
    fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    fn leaf_text(&self, leaf: usize) -> &str {
        &self.leaves[leaf]
    }

    fn text(&self) -> String {
        self.leaves.concat()
    }

    fn set_text(&mut self, text: &str) {
        self.replace_leaves(vec![text.to_string()]);
    }

    fn set_markup(&mut self, markup: &str) {
        self.replace_leaves(leaves_from_markup(markup));
    }

    fn set_gutter(&mut self, lines: &str) {
        self.gutter = lines.to_string();
        self.gutter_writes += 1;
    }

    fn selection(&self) -> Option<SurfaceSelection> {
        if self.focused { self.selection } else { None }
    }

    fn set_selection(&mut self, selection: SurfaceSelection) {
        self.selection = Some(selection);
    }

    fn insert_at_selection(&mut self, text: &str) {
        self.replace_selection(text);
    }

    fn delete_selection(&mut self) {
        self.replace_selection("");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn markup_chunks_into_leaves() {
        let mut surface = HeadlessSurface::new();
        surface.set_markup("<b>fn</b> main()");
        insta::assert_snapshot!(surface.leaves().join("|"), @"fn| main()");
        assert_eq!(surface.text(), "fn main()");
    }

    #[test]
    fn entities_are_decoded_in_leaves() {
        let mut surface = HeadlessSurface::new();
        surface.set_markup("<span>&lt;a&gt; &amp; &quot;b&quot;</span>");
        assert_eq!(surface.text(), "<a> & \"b\"");
        assert_eq!(surface.leaf_count(), 1);
    }

    #[test]
    fn empty_markup_keeps_one_empty_leaf() {
        let mut surface = HeadlessSurface::new();
        surface.set_markup("<span></span>");
        assert_eq!(surface.leaves(), &[String::new()]);
    }

    #[test]
    fn unterminated_tag_swallows_the_rest() {
        let mut surface = HeadlessSurface::new();
        surface.set_markup("ab<span cd");
        assert_eq!(surface.text(), "ab");
    }

    #[test]
    fn set_text_collapses_to_a_single_leaf() {
        let mut surface = HeadlessSurface::new();
        surface.set_markup("<b>ab</b>cd");
        assert_eq!(surface.leaf_count(), 2);
        surface.set_text("abcd");
        assert_eq!(surface.leaves(), &["abcd".to_string()]);
    }

    #[test]
    fn content_replacement_clamps_the_caret() {
        let mut surface = HeadlessSurface::new();
        surface.set_focused(true);
        surface.set_text("abcdef");
        surface.set_selection(SurfaceSelection::caret(SurfacePoint { leaf: 0, offset: 5 }));
        surface.set_text("ab");
        let selection = surface.selection().unwrap();
        assert_eq!(selection.start, SurfacePoint { leaf: 0, offset: 2 });
    }

    #[test]
    fn insert_replaces_a_same_leaf_selection() {
        let mut surface = HeadlessSurface::new();
        surface.set_focused(true);
        surface.set_text("hello world");
        surface.set_selection(SurfaceSelection {
            start: SurfacePoint { leaf: 0, offset: 6 },
            end: SurfacePoint { leaf: 0, offset: 11 },
        });
        surface.insert_at_selection("there");
        assert_eq!(surface.text(), "hello there");
        let selection = surface.selection().unwrap();
        assert_eq!(selection.start, SurfacePoint { leaf: 0, offset: 11 });
        assert_eq!(selection.start, selection.end);
    }

    #[test]
    fn insert_merges_a_cross_leaf_selection() {
        let mut surface = HeadlessSurface::new();
        surface.set_focused(true);
        surface.set_markup("<b>ab</b>cd<i>ef</i>");
        surface.set_selection(SurfaceSelection {
            start: SurfacePoint { leaf: 0, offset: 1 },
            end: SurfacePoint { leaf: 2, offset: 1 },
        });
        surface.insert_at_selection("X");
        assert_eq!(surface.text(), "aXf");
        assert_eq!(surface.leaf_count(), 1);
    }

    #[test]
    fn delete_selection_leaves_a_caret() {
        let mut surface = HeadlessSurface::new();
        surface.set_focused(true);
        surface.set_text("abcd");
        surface.set_selection(SurfaceSelection {
            start: SurfacePoint { leaf: 0, offset: 1 },
            end: SurfacePoint { leaf: 0, offset: 3 },
        });
        surface.delete_selection();
        assert_eq!(surface.text(), "ad");
        let selection = surface.selection().unwrap();
        assert_eq!(selection.start, SurfacePoint { leaf: 0, offset: 1 });
    }

    #[test]
    fn selection_is_gated_on_focus() {
        let mut surface = HeadlessSurface::new();
        surface.set_focused(true);
        assert!(surface.selection().is_some());
        surface.set_focused(false);
        assert!(surface.selection().is_none());
    }
}
