//! Word boundary expansion — widen an edit to whitespace boundaries.
//!
//! Re-lexing only the inserted text would classify `r` typed into `daw` on
//! its own and leave `d`/`aw` with stale styles. Before classifying, the
//! engine widens the edit point to the partial words touching it, so the
//! re-lexed range always starts and ends on whitespace (or a buffer edge).
//!
//! Whether a side is widened depends on the inserted text: if it begins
//! with whitespace nothing on the left can join a word with it, so the left
//! side stays put; symmetrically for the right side and trailing
//! whitespace. An empty insertion (a bare re-lex or a deletion) widens both
//! sides.

use std::ops::Range;

use crate::buffer::StyledBuffer;

/// Result of widening an edit point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Widened {
    /// Char range of the buffer that will be replaced.
    pub range: Range<usize>,
    /// Buffer text from `range.start` up to the edit point.
    pub prefix: String,
    /// Buffer text from the edit point up to `range.end`.
    pub suffix: String,
}

impl Widened {
    /// The text to classify: `prefix + inserted + suffix`.
    #[must_use]
    pub fn splice(&self, inserted: &str) -> String {
        let mut text = String::with_capacity(self.prefix.len() + inserted.len() + self.suffix.len());
        text.push_str(&self.prefix);
        text.push_str(inserted);
        text.push_str(&self.suffix);
        text
    }

    /// Char length of the suffix.
    #[must_use]
    pub fn suffix_len(&self) -> usize {
        self.suffix.chars().count()
    }
}

/// Widen the edit at `position` (inserting `inserted`) to word boundaries.
///
/// With `to_line_end` set, the right edge runs to the end of the line
/// instead of the end of the word (used when `%` comments are highlighted,
/// since a comment marker restyles the rest of its line).
///
/// `position` is clamped to the buffer; the scan always terminates.
#[must_use]
pub fn expand(buf: &StyledBuffer, position: usize, inserted: &str, to_line_end: bool) -> Widened {
    let position = position.min(buf.len());

    let mut start = position;
    if !inserted.starts_with(char::is_whitespace) {
        while start > 0 && buf.char_at(start - 1).is_some_and(|ch| !ch.is_whitespace()) {
            start -= 1;
        }
    }

    let mut end = position;
    if to_line_end {
        while buf.char_at(end).is_some_and(|ch| ch != '\n') {
            end += 1;
        }
    } else if !inserted.ends_with(char::is_whitespace) {
        while buf.char_at(end).is_some_and(|ch| !ch.is_whitespace()) {
            end += 1;
        }
    }

    Widened {
        prefix: buf.slice(start..position).unwrap_or_default(),
        suffix: buf.slice(position..end).unwrap_or_default(),
        range: start..end,
    }
}
