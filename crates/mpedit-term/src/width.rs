// SPDX-License-Identifier: MIT
//
// Display width — char columns to terminal columns.
//
// The engine counts positions in chars. A terminal counts cells: CJK and
// most emoji take two, combining marks take none, and a tab jumps to the
// next tab stop.

use unicode_width::UnicodeWidthChar;

/// Distance between tab stops.
pub const TAB_WIDTH: usize = 8;

/// Display width of one char when it starts at terminal column `col`.
#[must_use]
pub fn char_width(ch: char, col: usize) -> usize {
    if ch == '\t' {
        TAB_WIDTH - col % TAB_WIDTH
    } else {
        // Other control chars have no width.
        UnicodeWidthChar::width(ch).unwrap_or(0)
    }
}

/// Terminal column of char column `col` in `line`.
///
/// `col` past the end of the line counts the missing chars as one column
/// each, so a caret after the last char lands just after its last cell.
#[must_use]
pub fn display_col(line: &str, col: usize) -> usize {
    let mut width = 0;
    let mut chars = 0;
    for ch in line.chars().take(col) {
        width += char_width(ch, width);
        chars += 1;
    }
    width + (col - chars)
}
