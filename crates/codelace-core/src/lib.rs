/*!
 * # codelace-core
 *
 * A cursor-preserving plain-text code editing core.
 *
 * The hard problem this crate solves is keeping one logical text buffer
 * and the user's cursor consistent while three things interleave:
 *
 * 1. **Structural auto-formatting** — Enter, Backspace, Tab and
 *    bracket/quote keys compile into atomic buffer replacements
 *    ([`editing::format`]), applied with the caret they carry.
 * 2. **Pluggable highlighting** — a pure `(text, language) -> markup`
 *    function periodically replaces the rendered view, destroying the
 *    surface's internal structure.
 * 3. **Variable-latency re-rendering** — re-renders are coalesced through
 *    a single-slot debounce ([`schedule::Scheduler`]) and wrapped in
 *    cursor save/restore ([`surface::cursor`]) so the caret is never lost,
 *    duplicated, or misplaced.
 *
 * The host UI is abstracted behind the narrow [`surface::Surface`] trait;
 * [`surface::headless::HeadlessSurface`] implements it in memory for tests
 * and non-visual embedders. Everything runs single-threaded and
 * cooperatively: the host feeds key/paste/focus notifications into
 * [`editor::Editor`] and pumps the scheduler from its own loop.
 */

pub mod editing;
pub mod editor;
pub mod events;
pub mod keys;
pub mod options;
pub mod schedule;
pub mod surface;

// Re-export the types an embedder touches day to day.
pub use editing::format::TextEdit;
pub use editor::Editor;
pub use events::EventKind;
pub use keys::{Key, KeyEvent};
pub use options::{Highlight, Options, OptionsError, Settings};
pub use schedule::Latency;
pub use surface::headless::HeadlessSurface;
pub use surface::{SelectionKind, Surface, SurfacePoint, SurfaceSelection};
