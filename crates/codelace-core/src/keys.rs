//! Raw key events as delivered by the host surface.

/// Logical identity of a pressed key.
///
/// Hosts map their native key representation onto this before feeding the
/// editor; anything without editing significance collapses to [`Key::Other`]
/// and falls through to native behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    Tab,
    Escape,
    /// A printable character, as typed.
    Char(char),
    Other,
}

/// One keydown/keyup notification.
///
/// The `handled` flag plays the role of the DOM's `defaultPrevented`: the
/// editor marks events it intercepts, and external keydown listeners may mark
/// an event handled to stop the editor from intercepting it. An unhandled
/// event means the host applies its native behavior afterwards.
#[derive(Debug, Clone)]
pub struct KeyEvent {
    pub key: Key,
    pub shift: bool,
    handled: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            shift: false,
            handled: false,
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Mark the event as consumed; native behavior must not run.
    pub fn mark_handled(&mut self) {
        self.handled = true;
    }

    pub fn is_handled(&self) -> bool {
        self.handled
    }
}
