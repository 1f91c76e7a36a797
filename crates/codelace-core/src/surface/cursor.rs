//! Cursor position mapping between linear byte offsets and surface
//! (leaf, offset) positions.
//!
//! Saving measures the distance from the buffer start to the selection
//! start; restoring walks the text leaves depth-first and places a
//! zero-width caret where the cumulative preceding length equals the saved
//! offset. This is what lets reconciliation replace the rendered markup —
//! and with it the whole leaf structure — without losing the caret.
//!
//! Every function here requires an active selection. Calling one while the
//! surface does not hold focus is a programmer error and panics; callers
//! gate on the focus flag fed by focus/blur notifications.

use std::ops::Range;

use super::{SelectionKind, Surface, SurfacePoint, SurfaceSelection};

fn active_selection<S: Surface + ?Sized>(surface: &S) -> SurfaceSelection {
    surface
        .selection()
        .expect("cursor mapper requires an active selection; gate on focus")
}

fn offset_of_point<S: Surface + ?Sized>(surface: &S, point: SurfacePoint) -> usize {
    let preceding: usize = (0..point.leaf)
        .map(|leaf| surface.leaf_text(leaf).len())
        .sum();
    preceding + point.offset
}

/// Byte offset from the buffer start to the selection start.
pub fn save_offset<S: Surface + ?Sized>(surface: &S) -> usize {
    let selection = active_selection(surface);
    offset_of_point(surface, selection.start)
}

/// Both selection boundaries as byte offsets, start before end.
pub fn selection_offsets<S: Surface + ?Sized>(surface: &S) -> Range<usize> {
    let selection = active_selection(surface);
    let a = offset_of_point(surface, selection.start);
    let b = offset_of_point(surface, selection.end);
    a.min(b)..a.max(b)
}

/// Place a zero-width caret at byte offset `offset`.
///
/// Walks the leaves depth-first; an offset past the total length clamps to
/// the end of the last leaf, mirroring a tree walker that falls back to the
/// root when it runs out of text nodes.
pub fn restore_offset<S: Surface + ?Sized>(surface: &mut S, offset: usize) {
    let count = surface.leaf_count();
    let mut remaining = offset;
    let mut point = SurfacePoint { leaf: 0, offset: 0 };
    for leaf in 0..count {
        let len = surface.leaf_text(leaf).len();
        if remaining > len && leaf + 1 < count {
            remaining -= len;
            continue;
        }
        point = SurfacePoint {
            leaf,
            offset: remaining.min(len),
        };
        break;
    }
    surface.set_selection(SurfaceSelection::caret(point));
}

/// Whether the current selection is a caret or spans text.
pub fn selection_kind<S: Surface + ?Sized>(surface: &S) -> SelectionKind {
    let offsets = selection_offsets(surface);
    if offsets.start == offsets.end {
        SelectionKind::Caret
    } else {
        SelectionKind::Range
    }
}

/// All text strictly before the selection start.
pub fn text_before<S: Surface + ?Sized>(surface: &S) -> String {
    let selection = active_selection(surface);
    let mut out = String::new();
    for leaf in 0..selection.start.leaf {
        out.push_str(surface.leaf_text(leaf));
    }
    out.push_str(&surface.leaf_text(selection.start.leaf)[..selection.start.offset]);
    out
}

/// All text strictly after the selection end.
pub fn text_after<S: Surface + ?Sized>(surface: &S) -> String {
    let selection = active_selection(surface);
    let mut out = String::new();
    out.push_str(&surface.leaf_text(selection.end.leaf)[selection.end.offset..]);
    for leaf in selection.end.leaf + 1..surface.leaf_count() {
        out.push_str(surface.leaf_text(leaf));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::headless::HeadlessSurface;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn surface_with_leaves(markup: &str) -> HeadlessSurface {
        let mut surface = HeadlessSurface::new();
        surface.set_focused(true);
        surface.set_markup(markup);
        surface
    }

    #[rstest]
    #[case(0)]
    #[case(3)]
    #[case(4)]
    #[case(7)]
    #[case(11)]
    fn save_after_restore_round_trips(#[case] offset: usize) {
        // Three leaves: "let ", "x = ", "1;\n" (total length 11).
        let mut surface = surface_with_leaves("<b>let </b>x = <i>1;\n</i>");
        restore_offset(&mut surface, offset);
        assert_eq!(save_offset(&surface), offset);
    }

    #[test]
    fn restore_clamps_past_the_end() {
        let mut surface = surface_with_leaves("<b>ab</b>cd");
        restore_offset(&mut surface, 99);
        assert_eq!(save_offset(&surface), 4);
    }

    #[test]
    fn leaf_boundary_offsets_stay_in_the_earlier_leaf() {
        let mut surface = surface_with_leaves("<b>ab</b>cd");
        restore_offset(&mut surface, 2);
        let selection = surface.selection().unwrap();
        assert_eq!(selection.start, SurfacePoint { leaf: 0, offset: 2 });
    }

    #[test]
    fn before_and_after_split_around_the_selection() {
        let mut surface = surface_with_leaves("<b>ab</b>cd<i>ef</i>");
        surface.set_selection(SurfaceSelection {
            start: SurfacePoint { leaf: 1, offset: 1 },
            end: SurfacePoint { leaf: 2, offset: 1 },
        });
        assert_eq!(text_before(&surface), "abc");
        assert_eq!(text_after(&surface), "f");
        assert_eq!(selection_offsets(&surface), 3..5);
        assert_eq!(selection_kind(&surface), SelectionKind::Range);
    }

    #[test]
    fn caret_and_range_are_distinguished() {
        let mut surface = surface_with_leaves("abcd");
        restore_offset(&mut surface, 2);
        assert_eq!(selection_kind(&surface), SelectionKind::Caret);
    }

    #[test]
    fn equal_offsets_across_leaves_still_form_a_caret() {
        let mut surface = surface_with_leaves("<b>ab</b>cd");
        // (leaf 0, end) and (leaf 1, start) resolve to the same offset.
        surface.set_selection(SurfaceSelection {
            start: SurfacePoint { leaf: 0, offset: 2 },
            end: SurfacePoint { leaf: 1, offset: 0 },
        });
        assert_eq!(selection_kind(&surface), SelectionKind::Caret);
    }

    #[test]
    #[should_panic(expected = "requires an active selection")]
    fn unfocused_surface_is_a_programmer_error() {
        let surface = HeadlessSurface::new();
        save_offset(&surface);
    }
}
