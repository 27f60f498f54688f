// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write SGR sequences to any `impl Write`. No state and
// no decisions about when to emit; that's the `SpanWriter`'s job.

use std::io::{self, Write};

use crate::attr::Attr;
use crate::color::CellColor;

/// Reset all SGR attributes to terminal defaults (SGR 0).
///
/// The stateful writer must invalidate its tracked state after calling this.
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

/// Set the foreground (text) color.
///
/// Uses compact SGR codes for standard colors (30-37, 90-97), the 256-color
/// extended format for palette indices 16-255, and 24-bit `TrueColor` for RGB.
pub fn fg(w: &mut impl Write, color: CellColor) -> io::Result<()> {
    match color {
        CellColor::Default => w.write_all(b"\x1b[39m"),
        CellColor::Ansi256(idx) => {
            if idx < 8 {
                write!(w, "\x1b[{}m", 30 + u16::from(idx))
            } else if idx < 16 {
                write!(w, "\x1b[{}m", 82 + u16::from(idx))
            } else {
                write!(w, "\x1b[38;5;{idx}m")
            }
        }
        CellColor::Rgb(r, g, b) => write!(w, "\x1b[38;2;{r};{g};{b}m"),
    }
}

/// Emit SGR codes for text attributes as a single CSI sequence.
///
/// Multiple attributes are semicolon-separated: `\x1b[1;3m` for bold +
/// italic. Does nothing if no attributes are set.
pub fn attrs(w: &mut impl Write, attr: Attr) -> io::Result<()> {
    if attr.is_empty() {
        return Ok(());
    }

    let codes: Vec<&str> = Attr::SGR_CODES
        .iter()
        .filter(|(flag, _)| attr.contains(*flag))
        .map(|&(_, code)| code)
        .collect();
    write!(w, "\x1b[{}m", codes.join(";"))
}
