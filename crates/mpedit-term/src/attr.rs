// SPDX-License-Identifier: MIT
//
// Text attributes.
//
// Each flag maps to one SGR (Select Graphic Rendition) parameter. The
// highlighting palette only needs bold and italic, but a user palette may
// ask for any of them.

bitflags::bitflags! {
    /// Text attributes stored as a compact bitfield.
    ///
    /// ```
    /// use mpedit_term::attr::Attr;
    ///
    /// let style = Attr::BOLD | Attr::ITALIC;
    /// assert!(style.contains(Attr::BOLD));
    /// assert!(!style.contains(Attr::DIM));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Attr: u8 {
        /// SGR 1 — increased intensity.
        const BOLD          = 1 << 0;
        /// SGR 2 — decreased intensity (faint).
        const DIM           = 1 << 1;
        /// SGR 3 — italic or oblique.
        const ITALIC        = 1 << 2;
        /// SGR 4 — single underline.
        const UNDERLINE     = 1 << 3;
        /// SGR 7 — swap foreground and background.
        const INVERSE       = 1 << 4;
        /// SGR 9 — crossed-out text.
        const STRIKETHROUGH = 1 << 5;
    }
}

impl Attr {
    /// SGR parameter for each flag, in emission order.
    pub const SGR_CODES: [(Self, &'static str); 6] = [
        (Self::BOLD, "1"),
        (Self::DIM, "2"),
        (Self::ITALIC, "3"),
        (Self::UNDERLINE, "4"),
        (Self::INVERSE, "7"),
        (Self::STRIKETHROUGH, "9"),
    ];

    /// Parse a `+`-separated list such as `bold+italic`. `none` and the
    /// empty string give no attributes.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let mut attrs = Self::empty();
        for part in s.split('+').map(str::trim).filter(|p| !p.is_empty()) {
            attrs |= match part.to_ascii_lowercase().as_str() {
                "bold" => Self::BOLD,
                "dim" => Self::DIM,
                "italic" => Self::ITALIC,
                "underline" => Self::UNDERLINE,
                "inverse" | "reverse" => Self::INVERSE,
                "strikethrough" => Self::STRIKETHROUGH,
                "none" => Self::empty(),
                _ => return None,
            };
        }
        Some(attrs)
    }
}
