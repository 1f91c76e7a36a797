//! Editor construction options.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pluggable highlighting function: `(text, language) -> markup`.
///
/// Always invoked with text ending in exactly one newline. The returned
/// markup fully replaces the rendered content, so it must keep a
/// round-trippable, entity-escaped representation of the original text.
pub type Highlight = Box<dyn Fn(&str, &str) -> String>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    #[error("tab size must be at least 1 when indenting with spaces")]
    ZeroTabSize,
}

/// The plain-data subset of the options, loadable from TOML the same way a
/// host loads the rest of its configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Language id forwarded verbatim to the highlighter.
    pub language: String,
    pub read_only: bool,
    pub line_numbers: bool,
    /// Indent with one tab character instead of spaces.
    pub indent_with_tabs: bool,
    /// Spaces per indent level; ignored when `indent_with_tabs` is set.
    pub tab_size: usize,
    /// Auto-close brackets and quotes, skip over typed closers.
    pub add_closing: bool,
    /// Indent new lines on Enter.
    pub auto_indent: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: String::new(),
            read_only: false,
            line_numbers: false,
            indent_with_tabs: false,
            tab_size: 4,
            add_closing: true,
            auto_indent: true,
        }
    }
}

impl Settings {
    /// The string inserted for one indentation level.
    pub(crate) fn indent_unit(&self) -> Result<String, OptionsError> {
        if self.indent_with_tabs {
            Ok("\t".to_string())
        } else if self.tab_size == 0 {
            Err(OptionsError::ZeroTabSize)
        } else {
            Ok(" ".repeat(self.tab_size))
        }
    }
}

/// Full construction options: settings plus the two non-data pieces, the
/// initial document value and the highlighter.
#[derive(Default)]
pub struct Options {
    pub settings: Settings,
    /// Initial document content; absent means an empty document.
    pub value: Option<String>,
    /// Absent means the raw text is shown unhighlighted.
    pub highlight: Option<Highlight>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.settings.language = language.into();
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.settings.read_only = read_only;
        self
    }

    pub fn line_numbers(mut self, line_numbers: bool) -> Self {
        self.settings.line_numbers = line_numbers;
        self
    }

    pub fn indent_with_tabs(mut self, indent_with_tabs: bool) -> Self {
        self.settings.indent_with_tabs = indent_with_tabs;
        self
    }

    pub fn tab_size(mut self, tab_size: usize) -> Self {
        self.settings.tab_size = tab_size;
        self
    }

    pub fn add_closing(mut self, add_closing: bool) -> Self {
        self.settings.add_closing = add_closing;
        self
    }

    pub fn auto_indent(mut self, auto_indent: bool) -> Self {
        self.settings.auto_indent = auto_indent;
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn highlight(mut self, highlight: impl Fn(&str, &str) -> String + 'static) -> Self {
        self.highlight = Some(Box::new(highlight));
        self
    }
}
