//! Reveal units: the atomic chunks of a reveal animation.
//!
//! The tokenizer guarantees tag atomicity: a markup tag is never split
//! across two reveal steps, and concatenating every unit in order
//! reconstructs the input exactly.

use unicode_segmentation::UnicodeSegmentation;

/// The smallest atomic chunk the scheduler emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealUnit<'a> {
    /// A single visible grapheme cluster.
    Char(&'a str),
    /// One complete markup tag, `<` through the next `>` inclusive.
    /// When no closing `>` exists, the remainder of the string.
    Tag(&'a str),
}

impl<'a> RevealUnit<'a> {
    /// The text this unit contributes to the revealed prefix.
    pub const fn text(&self) -> &'a str {
        match *self {
            Self::Char(s) | Self::Tag(s) => s,
        }
    }

    /// Pacing weight: the inter-unit delay is `unit_delay × weight`.
    ///
    /// Sentence-ending punctuation pauses longest, then line breaks,
    /// then clause punctuation, then tags; every other character is a
    /// single tick.
    pub fn delay_weight(&self) -> u32 {
        match *self {
            Self::Tag(_) => 2,
            Self::Char(g) => match g {
                "." | "!" | "?" => 8,
                "\n" => 6,
                "," | ";" | ":" => 4,
                _ => 1,
            },
        }
    }
}

/// Iterator over the [`RevealUnit`]s of a markup string.
#[derive(Debug, Clone)]
pub struct Units<'a> {
    rest: &'a str,
}

/// Tokenize markup into reveal units.
pub const fn units(text: &str) -> Units<'_> {
    Units { rest: text }
}

impl<'a> Iterator for Units<'a> {
    type Item = RevealUnit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        if self.rest.starts_with('<') {
            // Whole tag, or the remainder when unterminated.
            let end = self.rest.find('>').map_or(self.rest.len(), |i| i + 1);
            let (tag, rest) = self.rest.split_at(end);
            self.rest = rest;
            return Some(RevealUnit::Tag(tag));
        }

        let grapheme = self.rest.graphemes(true).next()?;
        let (grapheme, rest) = self.rest.split_at(grapheme.len());
        self.rest = rest;
        Some(RevealUnit::Char(grapheme))
    }
}
