/*!
 * Text model and auto-formatting algorithms.
 *
 * The editing pipeline never mutates in place: every keystroke the editor
 * intercepts is compiled against the pre-mutation snapshot into one
 * fully-computed replacement text plus the caret that goes with it
 * ([`format::TextEdit`]), then applied atomically. There is no
 * partially-applied edit state.
 */

pub(crate) mod buffer;
pub mod format;
