//! Headless demo front-end: load a file into the editor, let the
//! reconciliation settle it against a small regex highlighter, and print
//! the result next to the gutter.

use std::env;
use std::fs;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use codelace_core::{Editor, HeadlessSurface, Options, Surface};
use log::info;
use regex::Regex;

/// A deliberately small highlighter: entity-escape the text, then wrap
/// keywords and numbers in spans. Real embedders plug in whatever tokenizer
/// they like; the editor only cares that the markup round-trips the text.
fn keyword_highlighter() -> impl Fn(&str, &str) -> String {
    let keywords =
        Regex::new(r"\b(fn|let|mut|pub|use|mod|struct|enum|impl|match|if|else|for|while|return)\b")
            .expect("static pattern");
    let numbers = Regex::new(r"\b[0-9]+\b").expect("static pattern");
    move |text: &str, _language: &str| {
        let escaped = html_escape::encode_text(text);
        let marked = keywords.replace_all(&escaped, r#"<span class="kw">$0</span>"#);
        numbers
            .replace_all(&marked, r#"<span class="num">$0</span>"#)
            .into_owned()
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let path = env::args().nth(1).context("usage: codelace <file>")?;
    let source = fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;

    let options = Options::new()
        .language("rust")
        .line_numbers(true)
        .value(source)
        .highlight(keyword_highlighter());
    let mut editor = Editor::new(HeadlessSurface::new(), options)?;

    // The initial value settles at Normal latency; pump past it.
    editor.pump(Instant::now() + Duration::from_millis(100));
    info!(
        "settled {} bytes into {} rendered leaves",
        editor.get().len(),
        editor.surface().leaf_count()
    );

    let text = editor.get();
    for (number, line) in editor.surface().gutter().lines().zip(text.lines()) {
        println!("{number:>4} │ {line}");
    }
    Ok(())
}
