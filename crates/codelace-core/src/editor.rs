//! The editor: key-event state machine, text model, and reconciliation.
//!
//! One `Editor` owns one surface. All mutation and reconciliation run on
//! the caller's thread; the only deferred work is the scheduler's pending
//! slot, pumped by the host loop. Listeners run synchronously and cannot
//! re-enter the editor, since it stays exclusively borrowed while they run.

use std::time::Instant;

use log::{debug, trace};

use crate::editing::buffer::{self, TextModel};
use crate::editing::format::{self, TextEdit};
use crate::events::{EventKind, Listeners};
use crate::keys::{Key, KeyEvent};
use crate::options::{Highlight, Options, OptionsError, Settings};
use crate::schedule::{Latency, Scheduler};
use crate::surface::{cursor, SelectionKind, Surface};

/// A plain-text code editor over an abstract host surface.
pub struct Editor<S: Surface> {
    surface: S,
    settings: Settings,
    highlight: Option<Highlight>,
    indent_unit: String,
    model: TextModel,
    scheduler: Scheduler,
    listeners: Listeners,
    /// Fed by focus/blur notifications; cursor save/restore is gated on it.
    focused: bool,
    /// True iff the immediately preceding keydown was Escape. Suppresses
    /// Tab handling so keyboard focus is not trapped right after an
    /// Escape-driven focus exit.
    escape_guard: bool,
    /// Gutter line count as of the previous reconciliation.
    line_count: Option<usize>,
}

impl<S: Surface> Editor<S> {
    /// Build an editor over `surface`.
    ///
    /// With an initial value the first reconciliation runs at Normal
    /// latency once the host pumps; without one, an immediate
    /// reconciliation settles the empty document to a single newline.
    pub fn new(surface: S, options: Options) -> Result<Self, OptionsError> {
        let Options {
            settings,
            value,
            highlight,
        } = options;
        let indent_unit = settings.indent_unit()?;
        let mut editor = Self {
            surface,
            settings,
            highlight,
            indent_unit,
            model: TextModel::new(""),
            scheduler: Scheduler::new(),
            listeners: Listeners::default(),
            focused: false,
            escape_guard: false,
            line_count: None,
        };
        match value {
            Some(value) => editor.set_text(&value, Latency::Normal),
            None => editor.request(Latency::Immediate),
        }
        Ok(editor)
    }

    /// Exact current content.
    pub fn get(&self) -> String {
        self.surface.text()
    }

    /// Replace the content and reconcile immediately.
    pub fn set(&mut self, text: &str) {
        self.set_text(text, Latency::Immediate);
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // Listener registration: one slot per event, silent replacement.

    pub fn on_change(&mut self, listener: impl FnMut(&str) + 'static) {
        self.listeners.set_change(Box::new(listener));
    }

    pub fn on_keydown(&mut self, listener: impl FnMut(&mut KeyEvent) + 'static) {
        self.listeners.set_keydown(Box::new(listener));
    }

    pub fn on_keyup(&mut self, listener: impl FnMut(&mut KeyEvent) + 'static) {
        self.listeners.set_keyup(Box::new(listener));
    }

    pub fn off(&mut self, kind: EventKind) {
        self.listeners.clear(kind);
    }

    // Scheduling.

    /// Run the pending reconciliation if it is due at `now`.
    pub fn pump(&mut self, now: Instant) {
        if self.scheduler.poll(now) {
            self.reconcile();
        }
    }

    pub fn reconciliation_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    pub fn pending_latency(&self) -> Option<Latency> {
        self.scheduler.pending_latency()
    }

    fn request(&mut self, latency: Latency) {
        if self.scheduler.request(latency, Instant::now()) {
            self.reconcile();
        }
    }

    /// Replace the buffer, snapshot it as the pre-mutation reference, and
    /// request reconciliation at `latency`.
    fn set_text(&mut self, text: &str, latency: Latency) {
        self.surface.set_text(text);
        self.model.snapshot(&self.surface.text());
        self.request(latency);
    }

    // Surface notifications.

    pub fn handle_focus(&mut self) {
        self.focused = true;
    }

    pub fn handle_blur(&mut self) {
        self.focused = false;
    }

    /// Scroll notifications are accepted for contract completeness; gutter
    /// scroll sync is the host's concern.
    pub fn handle_scroll(&mut self) {}

    /// Feed a raw keydown. Rebroadcasts to the external listener first;
    /// dispatches through the interception table only when the event is
    /// still unhandled and the editor is not read-only.
    pub fn handle_keydown(&mut self, event: &mut KeyEvent) {
        self.listeners.emit_keydown(event);
        if !event.is_handled() && !self.settings.read_only {
            self.model.snapshot(&self.surface.text());
            self.dispatch(event);
        }
        self.escape_guard = event.key == Key::Escape;
    }

    /// Feed a raw keyup: the steady-state "typing settled" path.
    pub fn handle_keyup(&mut self, event: &mut KeyEvent) {
        self.listeners.emit_keyup(event);
        if !event.is_handled()
            && !self.settings.read_only
            && self.model.changed_since(&self.surface.text())
        {
            self.request(Latency::Slow);
        }
    }

    /// Feed a paste with the plain-text payload only: the selection is
    /// replaced by the payload, stripping any rich formatting.
    pub fn handle_paste(&mut self, text: &str) {
        if self.settings.read_only {
            return;
        }
        self.surface.insert_at_selection(text);
        self.request(Latency::Fast);
    }

    /// Priority dispatch: first match wins, the rest fall through to the
    /// host's native behavior.
    fn dispatch(&mut self, event: &mut KeyEvent) {
        match event.key {
            Key::Enter if self.settings.auto_indent => {
                event.mark_handled();
                self.auto_indent();
            }
            Key::Backspace => {
                self.try_dedent(event);
            }
            Key::Tab if event.shift && !self.escape_guard => {
                self.try_dedent(event);
            }
            Key::Tab if !event.shift && !self.escape_guard => {
                event.mark_handled();
                trace!("inserting indent unit");
                self.surface.insert_at_selection(&self.indent_unit);
            }
            Key::Char(ch) if self.settings.add_closing => {
                self.try_pairing(event, ch);
            }
            _ => {}
        }
    }

    fn auto_indent(&mut self) {
        let caret = cursor::save_offset(&self.surface);
        let edit = format::auto_indent(self.model.prev(), caret, &self.indent_unit);
        debug!("auto-indent at {caret} -> caret {}", edit.caret);
        self.apply_edit(edit);
    }

    /// Dedent guard: only a caret whose preceding same-line text is
    /// non-empty and entirely whitespace is intercepted; Range selections
    /// never dedent, even via Shift+Tab.
    fn try_dedent(&mut self, event: &mut KeyEvent) {
        if cursor::selection_kind(&self.surface) != SelectionKind::Caret {
            return;
        }
        let caret = cursor::save_offset(&self.surface);
        if let Some(edit) = format::dedent(self.model.prev(), caret, self.indent_unit.len()) {
            event.mark_handled();
            debug!("dedent at {caret} -> caret {}", edit.caret);
            self.apply_edit(edit);
        }
    }

    /// Skip-over wins over auto-close, so a quote typed in front of an
    /// identical character moves the caret instead of doubling the pair.
    fn try_pairing(&mut self, event: &mut KeyEvent, ch: char) {
        if format::is_closing(ch) && cursor::text_after(&self.surface).starts_with(ch) {
            event.mark_handled();
            let caret = cursor::save_offset(&self.surface);
            cursor::restore_offset(&mut self.surface, caret + ch.len_utf8());
        } else if let Some(close) = format::closing_for(ch) {
            event.mark_handled();
            let selection = cursor::selection_offsets(&self.surface);
            let edit = format::auto_close(self.model.prev(), selection, ch, close);
            self.apply_edit(edit);
        }
    }

    /// Apply one fully-computed replacement atomically, then put the caret
    /// where the edit says it belongs.
    fn apply_edit(&mut self, edit: TextEdit) {
        self.set_text(&edit.text, Latency::Immediate);
        cursor::restore_offset(&mut self.surface, edit.caret);
    }

    /// Settle the buffer and recompute the derived view.
    ///
    /// Markup replacement destroys and recreates the surface's internal
    /// structure, so the cursor save/restore wraps the whole sequence, not
    /// just the markup swap.
    fn reconcile(&mut self) {
        let saved = if self.focused {
            Some(cursor::save_offset(&self.surface))
        } else {
            None
        };

        let mut text = self.surface.text();
        if buffer::ensure_trailing_newline(&mut text) {
            self.surface.set_text(&text);
        }

        if self.settings.line_numbers {
            let count = buffer::line_count(&text);
            if self.line_count != Some(count) {
                let gutter = (1..=count)
                    .map(|line| line.to_string())
                    .collect::<Vec<_>>()
                    .join("\n");
                self.surface.set_gutter(&gutter);
                self.line_count = Some(count);
            }
        }

        if let Some(highlight) = &self.highlight {
            let markup = highlight(&text, &self.settings.language);
            self.surface.set_markup(&markup);
        }

        trace!("reconciled {} bytes", text.len());
        self.listeners.emit_change(&text);

        if let Some(offset) = saved {
            cursor::restore_offset(&mut self.surface, offset);
        }
    }
}
