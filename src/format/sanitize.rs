//! HTML sanitization collaborator seam.
//!
//! The pipeline never implements sanitization logic itself; it hands the
//! text to a [`Sanitize`] collaborator. The provided [`AllowListSanitizer`]
//! keeps a fixed set of inline formatting tags and drops everything else.

use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Allow-list HTML sanitizer contract.
///
/// Implementations must be idempotent (`sanitize(sanitize(x)) ==
/// sanitize(x)`) and total: sanitization never fails, it only strips.
pub trait Sanitize {
    /// Strip any tag or attribute that is not explicitly permitted.
    fn sanitize(&self, markup: &str) -> String;
}

/// Tags the provided sanitizer lets through.
const ALLOWED_TAGS: &[&str] = &["b", "strong", "i", "em", "u", "br"];

/// The provided allow-list sanitizer.
///
/// Keeps `b`, `strong`, `i`, `em`, `u`, and `br`, strips all attributes,
/// and removes every other tag outright. Output tags are canonicalized
/// (lowercase, attribute-free, `<br />` self-closing), which is what
/// makes a second pass a no-op. Text outside tag tokens passes through
/// untouched; a stray `<` that never forms a tag token is left alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowListSanitizer;

/// A tag token: `<` or `</`, a name, anything up to the next `>`.
fn tag_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"</?([a-zA-Z][a-zA-Z0-9]*)[^>]*>").expect("tag token regex"))
}

impl Sanitize for AllowListSanitizer {
    fn sanitize(&self, markup: &str) -> String {
        tag_token()
            .replace_all(markup, |caps: &Captures<'_>| {
                let name = caps[1].to_ascii_lowercase();
                if !ALLOWED_TAGS.contains(&name.as_str()) {
                    return String::new();
                }
                if name == "br" {
                    return "<br />".to_owned();
                }
                if caps[0].starts_with("</") {
                    format!("</{name}>")
                } else {
                    format!("<{name}>")
                }
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanitize(input: &str) -> String {
        AllowListSanitizer.sanitize(input)
    }

    #[test]
    fn test_keeps_allowed_tags() {
        assert_eq!(sanitize("<b>hi</b>"), "<b>hi</b>");
        assert_eq!(sanitize("<em>x</em> <u>y</u>"), "<em>x</em> <u>y</u>");
    }

    #[test]
    fn test_strips_disallowed_tags() {
        assert_eq!(sanitize("<script>alert(1)</script>"), "alert(1)");
        assert_eq!(sanitize("<div>boxed</div>"), "boxed");
        assert_eq!(sanitize("a<img src=x onerror=y>b"), "ab");
    }

    #[test]
    fn test_strips_attributes_from_allowed_tags() {
        assert_eq!(sanitize(r#"<b class="x" onclick="y">hi</b>"#), "<b>hi</b>");
    }

    #[test]
    fn test_canonicalizes_case_and_br() {
        assert_eq!(sanitize("<B>hi</B>"), "<b>hi</b>");
        assert_eq!(sanitize("<br>"), "<br />");
        assert_eq!(sanitize("<br/>"), "<br />");
        assert_eq!(sanitize("<br />"), "<br />");
    }

    #[test]
    fn test_stray_angle_brackets_untouched() {
        assert_eq!(sanitize("1 < 2 and 3 > 2"), "1 < 2 and 3 > 2");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "<b>hi</b>",
            "<script>alert(1)</script>",
            "plain text",
            "<B style='x'>mixed</B> with <div>junk</div>",
            "1 < 2 and <br> done",
            "",
        ];
        for sample in samples {
            let once = sanitize(sample);
            assert_eq!(sanitize(&once), once, "not idempotent for {sample:?}");
        }
    }
}
