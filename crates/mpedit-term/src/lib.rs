// SPDX-License-Identifier: MIT
//
// mpedit-term — terminal presentation for mpedit.
//
// The editing core hands out styled spans; this crate decides what they
// look like. A palette maps each style tag to a color and attribute set,
// and a stateful writer turns spans into text with the fewest SGR escape
// sequences that reproduce that look.

pub mod ansi;
pub mod attr;
pub mod color;
pub mod output;
pub mod palette;
pub mod width;

pub use attr::Attr;
pub use color::CellColor;
pub use output::{SpanWriter, render_to_string};
pub use palette::{Palette, PaletteError, SpanStyle};
pub use width::display_col;
