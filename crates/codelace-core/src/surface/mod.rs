/*!
 * The host surface abstraction.
 *
 * The editor never touches a concrete UI toolkit. It sees the editable
 * region as a depth-first sequence of text-bearing leaves plus a selection
 * addressed as (leaf, intra-leaf offset) pairs, and writes back either
 * plain text, highlighter markup (which re-chunks the leaves), or the
 * line-number gutter. Any surface implementing this narrow contract is
 * substitutable; [`headless::HeadlessSurface`] is the in-memory one used by
 * tests and non-visual embedders.
 */

pub mod cursor;
pub mod headless;

/// A position inside the surface: the index of a text leaf in depth-first
/// order and a byte offset within that leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfacePoint {
    pub leaf: usize,
    pub offset: usize,
}

/// Selection boundaries in surface coordinates. Equal resolved boundaries
/// form a caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSelection {
    pub start: SurfacePoint,
    pub end: SurfacePoint,
}

impl SurfaceSelection {
    /// A zero-width caret at `point`.
    pub fn caret(point: SurfacePoint) -> Self {
        Self {
            start: point,
            end: point,
        }
    }
}

/// Whether the current selection is a pure cursor position or spans text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    Caret,
    Range,
}

/// Contract the editable host region must implement.
///
/// A surface always exposes at least one (possibly empty) text leaf.
/// Focus, blur, scroll, key and paste notifications flow to the editor
/// through its handler methods, not through this trait.
pub trait Surface {
    fn leaf_count(&self) -> usize;

    /// Text of the `leaf`-th text-bearing leaf in depth-first order.
    fn leaf_text(&self, leaf: usize) -> &str;

    /// The full content, the concatenation of all leaves.
    fn text(&self) -> String;

    /// Replace the whole content with plain text (a single leaf).
    fn set_text(&mut self, text: &str);

    /// Replace the rendered content with highlighter markup, re-chunking
    /// the leaf list. Destroys and recreates the internal structure, which
    /// is why reconciliation wraps it in cursor save/restore.
    fn set_markup(&mut self, markup: &str);

    /// Rewrite the line-number gutter with the given content.
    fn set_gutter(&mut self, lines: &str);

    /// The active selection, `None` while the surface does not hold focus.
    fn selection(&self) -> Option<SurfaceSelection>;

    fn set_selection(&mut self, selection: SurfaceSelection);

    /// Native editing primitive: replace the active selection with `text`,
    /// leaving a caret immediately after it.
    fn insert_at_selection(&mut self, text: &str);

    /// Native editing primitive: delete the active selection, leaving a
    /// caret where it was.
    fn delete_selection(&mut self);
}
