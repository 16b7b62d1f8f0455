//! Format pipeline: raw API text → safe display markup.
//!
//! The pipeline is a deterministic, total function over its inputs.
//! Stages run in a fixed order, each operating on the output of the
//! previous one:
//!
//! 1. **Unescape**: resolve `\uXXXX` escapes, then HTML entities
//! 2. **Linebreak**: literal newlines become [`LINE_BREAK`] markup
//! 3. **Bold-markdown**: shortest-match `**…**` spans become bold
//!    markup with each enclosed word capitalized
//! 4. **Heading-bold**: `### Phrase:` lines become bold markup
//! 5. **Restoration**: re-insert the user's original input phrase
//!    wherever its space-stripped form appears
//! 6. **Sanitize**: delegate to the [`Sanitize`] collaborator
//! 7. **Escape-for-embedding**: neutralize backticks and `</script>`
//!
//! Malformed markdown is never an error: unmatched `**` or `###` tokens
//! simply remain literal text.

pub mod sanitize;

mod entities;

use regex::{Captures, Regex};
use sanitize::{AllowListSanitizer, Sanitize};
use std::sync::OnceLock;
use thiserror::Error;

/// The markup token a literal newline is rendered as.
pub const LINE_BREAK: &str = "<br />";

/// Contract violations reported by [`FormatPipeline::format`].
///
/// Absent arguments are rejected before any processing; empty strings
/// are valid and produce an empty or no-op result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The raw response argument was absent.
    #[error("raw response text is required")]
    MissingRaw,
    /// The original input argument was absent.
    #[error("original input phrase is required")]
    MissingOriginalInput,
}

/// A fully transformed, sanitized, escape-safe string ready for
/// progressive display.
///
/// Guaranteed to contain no literal `</script>` sequence and no
/// unescaped backtick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeMarkup(String);

impl SafeMarkup {
    /// Wrap caller-vouched text without running the pipeline.
    ///
    /// For static strings the caller controls, like the fetch-failure
    /// fallback message or test fixtures, never for API responses.
    pub fn verbatim(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// View the markup as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap into the underlying string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for SafeMarkup {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SafeMarkup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The deterministic raw → [`SafeMarkup`] transformation.
///
/// Owns the sanitizer collaborator; everything else is pure string
/// processing with no I/O and no randomness.
#[derive(Debug, Clone, Default)]
pub struct FormatPipeline<S: Sanitize = AllowListSanitizer> {
    sanitizer: S,
}

impl<S: Sanitize> FormatPipeline<S> {
    /// Create a pipeline around the given sanitizer collaborator.
    pub const fn new(sanitizer: S) -> Self {
        Self { sanitizer }
    }

    /// Transform a raw response into safe display markup.
    ///
    /// `original_input` is the user's phrase as typed; wherever its
    /// space-stripped form appears in the text it is restored verbatim.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] when either argument is absent.
    pub fn format(
        &self,
        raw: Option<&str>,
        original_input: Option<&str>,
    ) -> Result<SafeMarkup, FormatError> {
        let raw = raw.ok_or(FormatError::MissingRaw)?;
        let original_input = original_input.ok_or(FormatError::MissingOriginalInput)?;

        let text = entities::decode_entities(&entities::resolve_unicode_escapes(raw));
        let text = text.replace('\n', LINE_BREAK);
        let text = embolden_markdown(&text);
        let text = embolden_headings(&text);
        let text = restore_original_input(&text, original_input);
        let text = self.sanitizer.sanitize(&text);
        Ok(SafeMarkup(escape_for_embedding(&text)))
    }
}

/// Shortest-match `**…**` span. Non-greedy by design: nested or
/// unbalanced delimiters follow whatever the shortest match produces,
/// and leftovers stay literal.
fn bold_span() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold span regex"))
}

/// Line-leading `###` heading up to the first colon. Lines are bounded
/// by start-of-string or the line-break markup inserted in stage 2; the
/// phrase excludes `<` so a colon-less heading can never swallow the
/// next line's boundary.
fn heading_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(^|<br />)###[ \t]*([^:<\n]+):").expect("heading regex"))
}

fn embolden_markdown(text: &str) -> String {
    bold_span()
        .replace_all(text, |caps: &Captures<'_>| {
            format!("<b>{}</b>", title_case(&caps[1]))
        })
        .into_owned()
}

fn embolden_headings(text: &str) -> String {
    heading_line()
        .replace_all(text, "${1}<b>${2}:</b>")
        .into_owned()
}

/// Capitalize the first letter of each space-separated word and
/// lower-case the remainder, preserving the single-space joins.
fn title_case(span: &str) -> String {
    span.split(' ')
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Replace every occurrence of the space-stripped original input with
/// the original, space-containing phrase. Plain substring replacement,
/// not word-boundary aware.
fn restore_original_input(text: &str, original_input: &str) -> String {
    let lookup = original_input.trim().replace(' ', "");
    if lookup.is_empty() {
        return text.to_owned();
    }
    text.replace(&lookup, original_input)
}

/// Final defense for embedding contexts: escape backticks and split
/// any literal `</script>` so it cannot close an enclosing script tag.
fn escape_for_embedding(text: &str) -> String {
    text.replace('`', "\\`").replace("</script>", "<\\/script>")
}
