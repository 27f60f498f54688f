// SPDX-License-Identifier: MIT
//
// Terminal colors.
//
// A span's foreground is one of three things: a 24-bit RGB triple, an index
// into the 256-color palette, or the terminal's own default. The first 16
// palette indices are the classic ANSI colors, which follow the user's
// terminal theme; the default palette only uses those.

use std::fmt;

/// A terminal-ready color.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellColor {
    /// 24-bit `TrueColor`.
    Rgb(u8, u8, u8),

    /// ANSI 256-color palette index.
    Ansi256(u8),

    /// Terminal default color (inherits from terminal settings).
    #[default]
    Default,
}

impl CellColor {
    pub const BLACK: Self = Self::Ansi256(0);
    pub const RED: Self = Self::Ansi256(1);
    pub const GREEN: Self = Self::Ansi256(2);
    pub const YELLOW: Self = Self::Ansi256(3);
    pub const BLUE: Self = Self::Ansi256(4);
    pub const MAGENTA: Self = Self::Ansi256(5);
    pub const CYAN: Self = Self::Ansi256(6);
    pub const WHITE: Self = Self::Ansi256(7);
    /// Bright black, rendered as gray by nearly every terminal.
    pub const GRAY: Self = Self::Ansi256(8);

    /// Parse `#RRGGBB` (the `#` is optional) into an RGB color.
    #[must_use]
    pub fn hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 || !s.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).ok();
        Some(Self::Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Parse a color name: one of the eight ANSI names, `gray`/`grey`,
    /// `default`, a palette index (`0`..=`255`) or a hex triple.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "black" => Some(Self::BLACK),
            "red" => Some(Self::RED),
            "green" => Some(Self::GREEN),
            "yellow" => Some(Self::YELLOW),
            "blue" => Some(Self::BLUE),
            "magenta" => Some(Self::MAGENTA),
            "cyan" => Some(Self::CYAN),
            "white" => Some(Self::WHITE),
            "gray" | "grey" => Some(Self::GRAY),
            "default" | "none" => Some(Self::Default),
            other => other
                .parse::<u8>()
                .ok()
                .map(Self::Ansi256)
                .or_else(|| Self::hex(other)),
        }
    }
}

impl fmt::Debug for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb(r, g, b) => write!(f, "Rgb(#{r:02x}{g:02x}{b:02x})"),
            Self::Ansi256(idx) => write!(f, "Ansi256({idx})"),
            Self::Default => write!(f, "Default"),
        }
    }
}

impl fmt::Display for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Self::Ansi256(idx) => write!(f, "{idx}"),
            Self::Default => write!(f, "default"),
        }
    }
}
