//! Token classifier — a small finite-state lexer with explicit carry-in.
//!
//! The classifier turns a run of text into [`Token`]s in a single
//! left-to-right pass. Each char selects the next [`ClassifierState`] from
//! the current state and the char's class; whenever the state changes, the
//! run accumulated so far is emitted as one token.
//!
//! # Carry-in
//!
//! An edit never re-lexes the whole buffer. The engine re-lexes a widened range
//! around each edit, and that range may start inside a string literal (or a
//! comment) that opened earlier in the buffer. The caller passes the state
//! the scan should start in; [`ClassifierState::carry_in`] derives it from
//! the style tag just before the range.
//!
//! # End of input
//!
//! The input is scanned as `Some(ch)` values followed by one `None`
//! terminator. The terminator always moves the machine to `Done`, which
//! flushes the pending run without a special case after the loop.
//!
//! # Strings and delimiters
//!
//! The opening `"` is its own `LQuote` run and the closing `"` its own
//! `RQuote` run; both are styled `Normal`. Only the content between them
//! is `Quoted`, so a `Quoted` tag in the buffer always means "inside a
//! string", which is exactly what carry-in needs.

use std::iter;

use crate::lexicon::{is_datatype, is_keyword};
use crate::style::StyleTag;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// State of the classifier between two chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClassifierState {
    /// Whitespace, punctuation, anything without a category.
    #[default]
    Normal,
    /// Inside a run of letters.
    Word,
    /// Inside a run of decimal digits.
    Digits,
    /// Inside a string literal, after the opening quote.
    Quoted,
    /// On the opening `"` of a string literal.
    LQuote,
    /// On the closing `"` of a string literal.
    RQuote,
    /// Inside a `%` comment.
    Comment,
    /// Past the end of input.
    Done,
}

impl ClassifierState {
    /// Starting state for a range whose preceding char carries `tag`.
    ///
    /// `None` (no preceding char) starts in `Normal`.
    #[must_use]
    pub const fn carry_in(tag: Option<StyleTag>) -> Self {
        match tag {
            Some(StyleTag::Quoted) => Self::Quoted,
            Some(StyleTag::Comment) => Self::Comment,
            _ => Self::Normal,
        }
    }

    /// Whether the machine is between a pair of quotes.
    #[inline]
    #[must_use]
    pub const fn in_string(self) -> bool {
        matches!(self, Self::Quoted | Self::LQuote)
    }
}

// ---------------------------------------------------------------------------
// Token
// ---------------------------------------------------------------------------

/// A classified run of text.
///
/// `start` and `len` are in chars, relative to the start of the text that
/// was classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub style: StyleTag,
    pub text: String,
    pub start: usize,
    pub len: usize,
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// Classifier configuration.
///
/// The default configuration never enters the `Comment` state: `%` is an
/// ordinary char. Set `comments` to highlight `%` up to the end of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classifier {
    pub comments: bool,
}

impl Classifier {
    #[must_use]
    pub const fn new(comments: bool) -> Self {
        Self { comments }
    }

    /// Classify `text` starting in `initial`.
    ///
    /// Returns the tokens in order. Their lengths sum to the char length of
    /// `text`; empty runs are never emitted, so empty input yields no
    /// tokens.
    #[must_use]
    pub fn classify(self, text: &str, initial: ClassifierState) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut state = initial;
        let mut run = String::new();
        let mut run_start = 0;
        let mut run_len = 0;

        for ch in text.chars().map(Some).chain(iter::once(None)) {
            let next = self.transition(state, ch);
            if next != state {
                if run_len > 0 {
                    tokens.push(Token {
                        style: style_for(state, &run),
                        text: std::mem::take(&mut run),
                        start: run_start,
                        len: run_len,
                    });
                }
                run_start += run_len;
                run_len = 0;
                state = next;
            }
            if let Some(ch) = ch {
                run.push(ch);
                run_len += 1;
            }
        }

        tracing::trace!(
            chars = run_start,
            tokens = tokens.len(),
            ?initial,
            "classified"
        );
        tokens
    }

    /// Next state after reading `ch` (`None` = terminator) in `state`.
    fn transition(self, state: ClassifierState, ch: Option<char>) -> ClassifierState {
        let Some(ch) = ch else {
            return ClassifierState::Done;
        };
        if state.in_string() {
            return if ch == '"' {
                ClassifierState::RQuote
            } else {
                ClassifierState::Quoted
            };
        }
        if state == ClassifierState::Comment && self.comments {
            return if ch == '\n' {
                ClassifierState::Normal
            } else {
                ClassifierState::Comment
            };
        }
        if ch.is_numeric() {
            ClassifierState::Digits
        } else if ch.is_alphabetic() {
            ClassifierState::Word
        } else if ch == '"' {
            ClassifierState::LQuote
        } else if ch == '%' && self.comments {
            ClassifierState::Comment
        } else {
            ClassifierState::Normal
        }
    }
}

/// Classify with comment highlighting off.
#[must_use]
pub fn classify(text: &str, initial: ClassifierState) -> Vec<Token> {
    Classifier::default().classify(text, initial)
}

/// Style of a completed run that was lexed in `state`.
fn style_for(state: ClassifierState, run: &str) -> StyleTag {
    match state {
        ClassifierState::Digits => StyleTag::Digits,
        ClassifierState::Word if is_keyword(run) => StyleTag::Keyword,
        ClassifierState::Word if is_datatype(run) => StyleTag::Datatype,
        ClassifierState::Quoted => StyleTag::Quoted,
        ClassifierState::Comment => StyleTag::Comment,
        _ => StyleTag::Normal,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
