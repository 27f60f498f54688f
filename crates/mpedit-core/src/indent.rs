//! Indentation — the leading whitespace of lines.
//!
//! Two queries drive the editing policies:
//!
//! - [`indent_of`] — the indentation of the line an offset sits on, used to
//!   continue it when Enter is pressed.
//! - [`shorter_indent_of`] — the indentation of the nearest earlier line
//!   that is *shallower* than the current one, used when backspace eats into
//!   an indent. Stepping back to the previous shallower level (instead of
//!   repeating the previous line's indent) is what makes backspace leave a
//!   nested `for ... endfor` block in one keystroke.
//!
//! Lines are separated by `\n` only. Indentation is measured in chars; a tab
//! counts as one.

use crate::buffer::StyledBuffer;

/// Indentation of the line containing `offset`.
///
/// Only the part of the line before `offset` is considered: the result is
/// the whitespace run from the line start up to the first non-whitespace
/// char or `offset`, whichever comes first. `offset` is clamped to the
/// buffer.
#[must_use]
pub fn indent_of(buf: &StyledBuffer, offset: usize) -> String {
    let offset = offset.min(buf.len());
    leading_whitespace(buf, line_start(buf, offset), offset)
}

/// Indentation of the nearest earlier line that is strictly shallower than
/// the line containing `offset`.
///
/// The current line's depth is its [`indent_of`] length. Earlier lines are
/// visited nearest first; a whitespace-only line counts with its full
/// length and an empty line has depth zero. Returns the empty string when
/// no earlier line is shallower.
#[must_use]
pub fn shorter_indent_of(buf: &StyledBuffer, offset: usize) -> String {
    let offset = offset.min(buf.len());
    let mut start = line_start(buf, offset);
    let depth = leading_whitespace(buf, start, offset).chars().count();

    while start > 0 {
        let newline = start - 1;
        let prev = line_start(buf, newline);
        let indent = leading_whitespace(buf, prev, newline);
        if indent.chars().count() < depth {
            return indent;
        }
        start = prev;
    }
    String::new()
}

/// Offset of the first char of the line containing `offset`.
#[must_use]
pub fn line_start(buf: &StyledBuffer, offset: usize) -> usize {
    let mut idx = offset.min(buf.len());
    while idx > 0 && buf.char_at(idx - 1) != Some('\n') {
        idx -= 1;
    }
    idx
}

/// Whether everything between the start of `offset`'s line and `offset`
/// is whitespace (vacuously true at a line start).
#[must_use]
pub fn only_whitespace_before(buf: &StyledBuffer, offset: usize) -> bool {
    let offset = offset.min(buf.len());
    let start = line_start(buf, offset);
    leading_whitespace(buf, start, offset).chars().count() == offset - start
}

/// The whitespace run starting at `start`, stopping at the first
/// non-whitespace char or at `end`.
fn leading_whitespace(buf: &StyledBuffer, start: usize, end: usize) -> String {
    let mut idx = start;
    while idx < end && buf.char_at(idx).is_some_and(char::is_whitespace) {
        idx += 1;
    }
    buf.slice(start..idx).unwrap_or_default()
}
