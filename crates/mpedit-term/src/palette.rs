// SPDX-License-Identifier: MIT
//
// Palette — how each style tag looks on screen.
//
// The engine only knows style tags. The palette resolves them to a
// terminal-ready foreground and attribute set, so rendering never has to
// look anything up beyond one array index.

use mpedit_core::StyleTag;
use thiserror::Error;

use crate::attr::Attr;
use crate::color::CellColor;

/// Resolved look of one style tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SpanStyle {
    pub fg: CellColor,
    pub attrs: Attr,
}

impl SpanStyle {
    #[must_use]
    pub const fn new(fg: CellColor, attrs: Attr) -> Self {
        Self { fg, attrs }
    }

    /// Whether this style leaves the terminal untouched.
    #[must_use]
    pub fn is_plain(self) -> bool {
        self.fg == CellColor::Default && self.attrs.is_empty()
    }
}

/// Error from [`Palette::set_entry`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    #[error("unknown style: {0}")]
    UnknownTag(String),

    #[error("invalid color: {0}")]
    BadColor(String),

    #[error("invalid attributes: {0}")]
    BadAttrs(String),

    #[error("expected STYLE=COLOR[,ATTRS]: {0}")]
    Malformed(String),
}

/// One [`SpanStyle`] per [`StyleTag`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    styles: [SpanStyle; StyleTag::ALL.len()],
}

impl Default for Palette {
    /// The classic scheme: keywords blue, datatypes green, numbers and
    /// strings magenta (all bold), comments gray italic, everything else in
    /// the terminal's default color.
    fn default() -> Self {
        let mut palette = Self::plain();
        palette.set(StyleTag::Keyword, SpanStyle::new(CellColor::BLUE, Attr::BOLD));
        palette.set(StyleTag::Datatype, SpanStyle::new(CellColor::GREEN, Attr::BOLD));
        palette.set(StyleTag::Digits, SpanStyle::new(CellColor::MAGENTA, Attr::BOLD));
        palette.set(StyleTag::Quoted, SpanStyle::new(CellColor::MAGENTA, Attr::BOLD));
        palette.set(StyleTag::Comment, SpanStyle::new(CellColor::GRAY, Attr::ITALIC));
        palette
    }
}

impl Palette {
    /// A palette that styles nothing.
    #[must_use]
    pub fn plain() -> Self {
        Self {
            styles: [SpanStyle::default(); StyleTag::ALL.len()],
        }
    }

    #[must_use]
    pub const fn get(&self, tag: StyleTag) -> SpanStyle {
        self.styles[tag as usize]
    }

    pub const fn set(&mut self, tag: StyleTag, style: SpanStyle) {
        self.styles[tag as usize] = style;
    }

    /// Override one entry from text of the form `STYLE=COLOR[,ATTRS]`,
    /// e.g. `keyword=cyan,bold` or `comment=#808080,italic`. The style name
    /// is case-insensitive.
    ///
    /// # Errors
    ///
    /// [`PaletteError`] naming the part that did not parse. The palette is
    /// unchanged on error.
    pub fn set_entry(&mut self, entry: &str) -> Result<(), PaletteError> {
        let (name, value) = entry
            .split_once('=')
            .ok_or_else(|| PaletteError::Malformed(entry.to_string()))?;
        let tag = StyleTag::ALL
            .into_iter()
            .find(|tag| tag.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| PaletteError::UnknownTag(name.to_string()))?;
        let (color, attrs) = value.split_once(',').unwrap_or((value, ""));
        let fg = CellColor::parse(color.trim())
            .ok_or_else(|| PaletteError::BadColor(color.to_string()))?;
        let attrs = Attr::parse(attrs).ok_or_else(|| PaletteError::BadAttrs(attrs.to_string()))?;
        self.set(tag, SpanStyle::new(fg, attrs));
        Ok(())
    }
}
