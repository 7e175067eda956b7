//! Syntax highlighting for rendered pages printed to a terminal.

use std::iter;

use once_cell::sync::Lazy;
use syntect::{
    easy::HighlightLines,
    highlighting::ThemeSet,
    parsing::SyntaxSet,
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};

use crate::error::{AsyncPageError, Result};

/// Theme applied to printed pages.
const THEME_NAME: &str = "Solarized (dark)";

/// Resets terminal colors after the last highlighted line.
const RESET: &str = "\x1b[0m";

/// Syntax definitions and themes, loaded on first use.
static ASSETS: Lazy<(SyntaxSet, ThemeSet)> =
    Lazy::new(|| (SyntaxSet::load_defaults_newlines(), ThemeSet::load_defaults()));

/// Highlight `page` as HTML with 24-bit ANSI escapes.
pub fn highlight_html(page: &str) -> Result<String> {
    let (syntaxes, themes) = &*ASSETS;
    let syntax = syntaxes
        .find_syntax_by_extension("html")
        .ok_or_else(|| AsyncPageError::Highlight("HTML syntax not found".to_string()))?;
    let theme = themes
        .themes
        .get(THEME_NAME)
        .ok_or_else(|| AsyncPageError::Highlight(format!("theme {THEME_NAME} not found")))?;

    let mut highlighter = HighlightLines::new(syntax, theme);
    LinesWithEndings::from(page)
        .map(|line| -> Result<String> {
            let regions = highlighter.highlight_line(line, syntaxes)?;
            Ok(as_24_bit_terminal_escaped(&regions, false))
        })
        .chain(iter::once(Ok(RESET.to_string())))
        .collect()
}
