//! Styled buffer — text plus one style tag per char.
//!
//! A `StyledBuffer` wraps a [`ropey::Rope`] and a parallel `Vec<StyleTag>`
//! with exactly one entry per char of the rope. Runs of equal tag are what
//! the shell paints as tokens, but the tags are stored per char because an
//! edit can land in the middle of what used to be one token.
//!
//! # Design choices
//!
//! - **Offsets are char indices**, the same unit ropey uses. Byte offsets
//!   never leak into the public API.
//!
//! - **Replacement is validated before it mutates.** [`replace`] and
//!   [`replace_raw`] check the range and the tag count first, then touch
//!   the rope and the tag vector. A failing call leaves both untouched, so
//!   the text/tag length invariant can't be broken half-way.
//!
//! - **Every mutation returns a [`Change`]** describing what was removed
//!   and inserted (text and tags). The history layer stores these to undo
//!   and redo exactly, without re-lexing.
//!
//! [`replace`]: StyledBuffer::replace
//! [`replace_raw`]: StyledBuffer::replace_raw

use std::ops::Range;

use ropey::Rope;

use crate::classify::Token;
use crate::error::EditError;
use crate::position::Position;
use crate::style::{StyleTag, StyledSpan};

// ---------------------------------------------------------------------------
// Change
// ---------------------------------------------------------------------------

/// One raw mutation of a [`StyledBuffer`]: `removed` (with its tags) was
/// replaced by `inserted` (with its tags) at char offset `start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub start: usize,
    pub removed: String,
    pub removed_styles: Vec<StyleTag>,
    pub inserted: String,
    pub inserted_styles: Vec<StyleTag>,
}

impl Change {
    /// True when the change neither removed nor inserted anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.inserted.is_empty()
    }

    /// True when text and tags on both sides are identical, i.e. applying
    /// the change did not alter the buffer.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.removed == self.inserted && self.removed_styles == self.inserted_styles
    }
}

// ---------------------------------------------------------------------------
// StyledBuffer
// ---------------------------------------------------------------------------

/// Text buffer with a style tag for every char.
#[derive(Debug, Clone, Default)]
pub struct StyledBuffer {
    rope: Rope,
    styles: Vec<StyleTag>,
    modified: bool,
    revision: u64,
}

impl StyledBuffer {
    // -- Construction -------------------------------------------------------

    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer holding `text`, every char tagged `Normal`.
    ///
    /// The engine restyles freshly loaded text; this constructor only
    /// establishes the length invariant.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let rope = Rope::from_str(text);
        let styles = vec![StyleTag::Normal; rope.len_chars()];
        Self {
            rope,
            styles,
            modified: false,
            revision: 0,
        }
    }

    // -- Text access --------------------------------------------------------

    /// The underlying rope.
    #[inline]
    #[must_use]
    pub const fn rope(&self) -> &Rope {
        &self.rope
    }

    /// Total char count.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rope.len_chars()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// The char at `idx`, or `None` past the end.
    #[inline]
    #[must_use]
    pub fn char_at(&self, idx: usize) -> Option<char> {
        self.rope.get_char(idx)
    }

    /// The style tag of the char at `idx`, or `None` past the end.
    #[inline]
    #[must_use]
    pub fn style_at(&self, idx: usize) -> Option<StyleTag> {
        self.styles.get(idx).copied()
    }

    /// All style tags, one per char.
    #[inline]
    #[must_use]
    pub fn styles(&self) -> &[StyleTag] {
        &self.styles
    }

    /// The text in `range` as an owned string, or `None` if the range is
    /// out of bounds.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> Option<String> {
        if range.start > range.end || range.end > self.len() {
            return None;
        }
        Some(self.rope.slice(range).to_string())
    }

    /// Collect all text into a `String`.
    #[must_use]
    pub fn contents(&self) -> String {
        self.rope.to_string()
    }

    /// Runs of equal style within `range`, clipped to the range.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::OutOfRange`] if `range.start > range.end` or
    /// `range.end > len()`.
    pub fn spans(&self, range: Range<usize>) -> Result<Vec<StyledSpan>, EditError> {
        self.check_range(range.clone())?;
        let mut spans: Vec<StyledSpan> = Vec::new();
        let chars = self.rope.slice(range.clone()).chars();
        for (ch, &style) in chars.zip(&self.styles[range]) {
            match spans.last_mut() {
                Some(span) if span.style == style => span.text.push(ch),
                _ => spans.push(StyledSpan::new(ch.to_string(), style)),
            }
        }
        Ok(spans)
    }

    // -- Coordinates --------------------------------------------------------

    /// Convert a char offset to a (line, col) position. `idx == len()` is
    /// valid (the position past the last char).
    #[must_use]
    pub fn char_idx_to_pos(&self, idx: usize) -> Option<Position> {
        if idx > self.rope.len_chars() {
            return None;
        }
        let line = self.rope.char_to_line(idx);
        Some(Position::new(line, idx - self.rope.line_to_char(line)))
    }

    // -- Editing ------------------------------------------------------------

    /// Replace `range` with the concatenated text of `tokens`, each char
    /// tagged with its token's style.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::OutOfRange`] if the range is not inside the
    /// buffer. The buffer is unchanged on error.
    pub fn replace(&mut self, range: Range<usize>, tokens: &[Token]) -> Result<Change, EditError> {
        let mut text = String::new();
        let mut styles = Vec::new();
        for token in tokens {
            text.push_str(&token.text);
            styles.extend(std::iter::repeat_n(token.style, token.len));
        }
        self.replace_raw(range, &text, &styles)
    }

    /// Replace `range` with `text`, tagged char by char with `styles`.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::OutOfRange`] if the range is not inside the
    /// buffer, or [`EditError::InconsistentState`] if `styles` does not
    /// have one tag per char of `text`. The buffer is unchanged on error.
    pub fn replace_raw(
        &mut self,
        range: Range<usize>,
        text: &str,
        styles: &[StyleTag],
    ) -> Result<Change, EditError> {
        self.check_range(range.clone())?;
        if text.chars().count() != styles.len() {
            return Err(EditError::InconsistentState {
                offset: range.start,
            });
        }

        let removed = self.rope.slice(range.clone()).to_string();
        self.rope.remove(range.clone());
        self.rope.insert(range.start, text);
        let removed_styles: Vec<StyleTag> = self
            .styles
            .splice(range.clone(), styles.iter().copied())
            .collect();

        let change = Change {
            start: range.start,
            removed,
            removed_styles,
            inserted: text.to_string(),
            inserted_styles: styles.to_vec(),
        };
        if !change.is_noop() {
            self.modified = true;
            self.revision += 1;
        }
        debug_assert_eq!(self.rope.len_chars(), self.styles.len());
        Ok(change)
    }

    /// Restyle `range` in place without touching the text.
    ///
    /// # Errors
    ///
    /// Same as [`replace_raw`](Self::replace_raw).
    pub fn restyle(&mut self, range: Range<usize>, tokens: &[Token]) -> Result<Change, EditError> {
        let text = self
            .slice(range.clone())
            .ok_or_else(|| self.out_of_range(range.clone()))?;
        let joined: String = tokens.iter().map(|t| t.text.as_str()).collect();
        if joined != text {
            return Err(EditError::InconsistentState {
                offset: range.start,
            });
        }
        self.replace(range, tokens)
    }

    // -- Metadata -----------------------------------------------------------

    /// True if the text or its styling changed since creation or the last
    /// [`mark_saved`](Self::mark_saved).
    #[inline]
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    /// Clear the modified flag, e.g. after the shell persisted the text.
    #[inline]
    pub const fn mark_saved(&mut self) {
        self.modified = false;
    }

    /// Counter bumped by every effective mutation. Shells compare it to
    /// decide whether to refresh a preview.
    #[inline]
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    // -- Internal -----------------------------------------------------------

    fn check_range(&self, range: Range<usize>) -> Result<(), EditError> {
        if range.start > range.end || range.end > self.len() {
            return Err(self.out_of_range(range));
        }
        Ok(())
    }

    fn out_of_range(&self, range: Range<usize>) -> EditError {
        EditError::OutOfRange {
            position: range.start,
            deleted: range.end.saturating_sub(range.start),
            len: self.len(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
