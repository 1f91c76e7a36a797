//! Single-slot listener registration.
//!
//! The editor retains at most one listener per event name; registering again
//! silently replaces the previous listener. This is deliberately not a
//! multi-subscriber bus. Listeners run synchronously on the editor's control
//! thread and cannot re-enter the editor, since the editor is exclusively
//! borrowed while they run.

use crate::keys::KeyEvent;

/// Event names an external listener can attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A reconciliation settled; payload is the settled text.
    Change,
    /// A raw keydown, rebroadcast before the editor dispatches it.
    KeyDown,
    /// A raw keyup, rebroadcast before the settle check.
    KeyUp,
}

type ChangeListener = Box<dyn FnMut(&str)>;
type KeyListener = Box<dyn FnMut(&mut KeyEvent)>;

#[derive(Default)]
pub(crate) struct Listeners {
    change: Option<ChangeListener>,
    keydown: Option<KeyListener>,
    keyup: Option<KeyListener>,
}

impl Listeners {
    pub(crate) fn set_change(&mut self, listener: ChangeListener) {
        self.change = Some(listener);
    }

    pub(crate) fn set_keydown(&mut self, listener: KeyListener) {
        self.keydown = Some(listener);
    }

    pub(crate) fn set_keyup(&mut self, listener: KeyListener) {
        self.keyup = Some(listener);
    }

    pub(crate) fn clear(&mut self, kind: EventKind) {
        match kind {
            EventKind::Change => self.change = None,
            EventKind::KeyDown => self.keydown = None,
            EventKind::KeyUp => self.keyup = None,
        }
    }

    pub(crate) fn emit_change(&mut self, text: &str) {
        if let Some(listener) = &mut self.change {
            listener(text);
        }
    }

    pub(crate) fn emit_keydown(&mut self, event: &mut KeyEvent) {
        if let Some(listener) = &mut self.keydown {
            listener(event);
        }
    }

    pub(crate) fn emit_keyup(&mut self, event: &mut KeyEvent) {
        if let Some(listener) = &mut self.keyup {
            listener(event);
        }
    }
}
