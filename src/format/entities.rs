//! Escape resolution for raw API text.
//!
//! Raw responses arrive with backslash-style Unicode escapes (`\uXXXX`)
//! and HTML entities (`&amp;`) still encoded. This module resolves both
//! into literal characters before any markup stage runs.

/// Resolve `\uXXXX` escape sequences to their literal characters.
///
/// Surrogate pairs (`\uD83D\uDE00`) are combined into a single scalar.
/// Malformed escapes (short hex runs, lone surrogates) are left as
/// literal text, matching the pipeline's permissive failure policy.
pub(crate) fn resolve_unicode_escapes(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find("\\u") {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 2..];

        match after.get(..4).and_then(parse_hex4) {
            // High surrogate: must be followed by a low-surrogate escape.
            Some(high) if (0xD800..0xDC00).contains(&high) => {
                let tail = &after[4..];
                let low = tail
                    .strip_prefix("\\u")
                    .and_then(|t| t.get(..4))
                    .and_then(parse_hex4);
                if let Some(low) = low.filter(|lo| (0xDC00..0xE000).contains(lo)) {
                    let combined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                    if let Some(ch) = char::from_u32(combined) {
                        out.push(ch);
                    }
                    rest = &tail[6..];
                } else {
                    // Lone high surrogate stays literal.
                    out.push_str("\\u");
                    rest = after;
                }
            }
            Some(code) => {
                match char::from_u32(code) {
                    Some(ch) => out.push(ch),
                    // Lone low surrogate stays literal.
                    None => out.push_str(&rest[pos..pos + 6]),
                }
                rest = &after[4..];
            }
            None => {
                out.push_str("\\u");
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Decode HTML entities to their literal characters.
///
/// Handles a fixed table of named entities plus numeric references
/// (`&#8212;`, `&#x2014;`). Anything unrecognized is left as literal
/// text. Single pass: decoded output is never re-scanned, so
/// `&amp;lt;` becomes `&lt;` and stops there.
pub(crate) fn decode_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if let Some((ch, len)) = decode_one(tail) {
            out.push(ch);
            rest = &tail[len..];
        } else {
            out.push('&');
            rest = &tail[1..];
        }
    }

    out.push_str(rest);
    out
}

/// Decode the entity at the start of `s` (which begins with `&`).
///
/// Returns the decoded character and the byte length consumed.
fn decode_one(s: &str) -> Option<(char, usize)> {
    // Entities are short; bound the scan so a stray '&' in prose does
    // not pair with a distant ';'.
    let window = s.get(..s.len().min(12)).unwrap_or(s);
    let end = window.find(';')?;
    let name = &s[1..end];

    let decoded = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "hellip" => '\u{2026}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201c}',
        "rdquo" => '\u{201d}',
        _ => return decode_numeric(name).map(|ch| (ch, end + 1)),
    };

    Some((decoded, end + 1))
}

/// Decode a numeric entity body: `#8212` or `#x2014`.
fn decode_numeric(name: &str) -> Option<char> {
    let digits = name.strip_prefix('#')?;
    let code = if let Some(hex) = digits.strip_prefix('x').or_else(|| digits.strip_prefix('X')) {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        digits.parse::<u32>().ok()?
    };
    char::from_u32(code)
}

/// Parse exactly four ASCII hex digits.
fn parse_hex4(s: &str) -> Option<u32> {
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_hexdigit()) {
        u32::from_str_radix(s, 16).ok()
    } else {
        None
    }
}
