//! Style tags — the display category carried by every char of the buffer.
//!
//! A `StyleTag` is what the shell paints and, just as importantly, what the
//! engine reads back to recover lexical context. The tag of the char just
//! before a re-lexed range decides the classifier's carry-in state, so a
//! tag must always mean the same thing lexically: `Quoted` is string
//! *content*, never a delimiter; `Comment` is comment text up to (not
//! including) the line ending.

use std::fmt;

/// Display category of a single char.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StyleTag {
    /// Plain text: whitespace, punctuation, identifiers, string delimiters.
    #[default]
    Normal,
    /// A reserved MetaPost word (`draw`, `beginfig`, ...).
    Keyword,
    /// A MetaPost type name (`pair`, `path`, ...).
    Datatype,
    /// A run of decimal digits.
    Digits,
    /// The inside of a string literal.
    Quoted,
    /// A `%` comment (only produced with comment highlighting enabled).
    Comment,
}

impl StyleTag {
    /// Every tag, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Normal,
        Self::Keyword,
        Self::Datatype,
        Self::Digits,
        Self::Quoted,
        Self::Comment,
    ];

    /// Upper-case name used in span dumps.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Keyword => "KEYWORD",
            Self::Datatype => "DATATYPE",
            Self::Digits => "DIGITS",
            Self::Quoted => "QUOTED",
            Self::Comment => "COMMENT",
        }
    }
}

impl fmt::Display for StyleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A maximal run of equally-styled text, as handed to the shell for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub text: String,
    pub style: StyleTag,
}

impl StyledSpan {
    #[must_use]
    pub fn new(text: impl Into<String>, style: StyleTag) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}
