// SPDX-License-Identifier: MIT
//
// Stateful span rendering.
//
// SpanWriter tracks the terminal's current foreground and attributes and
// skips redundant escape sequences. Two adjacent spans that resolve to the
// same look (a keyword followed by a keyword, or two differently tagged
// runs that share a palette entry) are written as one stretch of text.
//
// Escapes never straddle a line break in a way that matters: SGR state
// survives `\n`, so text is written through verbatim.

use std::io::{self, Write};

use mpedit_core::StyledSpan;

use crate::ansi;
use crate::attr::Attr;
use crate::color::CellColor;
use crate::palette::{Palette, SpanStyle};

/// Stateful span writer that tracks terminal state to skip redundant escapes.
///
/// - **Attributes**: on change, reset (SGR 0) + re-emit. This invalidates
///   color tracking, forcing a re-emit. Going from no attributes to some
///   skips the reset.
/// - **Colors**: skipped if unchanged since the last emit.
#[derive(Debug, Clone, Default)]
pub struct SpanWriter {
    last_fg: Option<CellColor>,
    last_attrs: Attr,
}

impl SpanWriter {
    /// A writer that assumes the terminal is in its default state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_fg: None,
            last_attrs: Attr::empty(),
        }
    }

    /// Write one span in the look `palette` gives its tag.
    ///
    /// # Errors
    ///
    /// Propagates write errors from `w`.
    pub fn write_span(
        &mut self,
        w: &mut impl Write,
        span: &StyledSpan,
        palette: &Palette,
    ) -> io::Result<()> {
        if span.text.is_empty() {
            return Ok(());
        }
        self.apply_style(w, palette.get(span.style))?;
        w.write_all(span.text.as_bytes())
    }

    /// Write every span, then restore the terminal's default look.
    ///
    /// # Errors
    ///
    /// Propagates write errors from `w`.
    pub fn write_spans<'a>(
        &mut self,
        w: &mut impl Write,
        spans: impl IntoIterator<Item = &'a StyledSpan>,
        palette: &Palette,
    ) -> io::Result<()> {
        for span in spans {
            self.write_span(w, span, palette)?;
        }
        self.finish(w)
    }

    /// Reset the terminal if anything is still styled.
    ///
    /// # Errors
    ///
    /// Propagates write errors from `w`.
    pub fn finish(&mut self, w: &mut impl Write) -> io::Result<()> {
        let styled = !self.last_attrs.is_empty()
            || self.last_fg.is_some_and(|fg| fg != CellColor::Default);
        if styled {
            ansi::reset(w)?;
        }
        *self = Self::new();
        Ok(())
    }

    fn apply_style(&mut self, w: &mut impl Write, style: SpanStyle) -> io::Result<()> {
        if style.attrs != self.last_attrs {
            if !self.last_attrs.is_empty() {
                // SGR 0 clears everything, colors included.
                ansi::reset(w)?;
                self.last_fg = None;
            }
            self.last_attrs = style.attrs;
            ansi::attrs(w, style.attrs)?;
        }

        // The terminal starts in its default color, so a default foreground
        // only needs emitting after something else was set.
        let current = self.last_fg.unwrap_or(CellColor::Default);
        if current != style.fg {
            ansi::fg(w, style.fg)?;
        }
        self.last_fg = Some(style.fg);
        Ok(())
    }
}

/// Render `spans` to a `String` with ANSI styling.
#[must_use]
pub fn render_to_string(spans: &[StyledSpan], palette: &Palette) -> String {
    let mut out = Vec::new();
    // Writing to a Vec cannot fail.
    let _ = SpanWriter::new().write_spans(&mut out, spans, palette);
    String::from_utf8_lossy(&out).into_owned()
}
