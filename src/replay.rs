// SPDX-License-Identifier: MIT
//
// Feeding a file through the engine.
//
// Pasting hands the whole text to the engine as one insertion, which is how
// a shell loads a file. Typing replays it the way a person would: one char
// per edit, Enter for each line break, and backspace whenever the engine's
// automatic indentation is deeper than (or different from) what the file
// has. Typing a file must reproduce it exactly; any difference is reported
// as an error.

use anyhow::{Result, ensure};
use mpedit_core::Engine;
use mpedit_core::indent::indent_of;
use tracing::debug;

/// Keystroke counts from a typed replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TypingStats {
    pub chars: usize,
    pub enters: usize,
    pub backspaces: usize,
}

/// Insert `text` at the caret as a single paste.
///
/// # Errors
///
/// Propagates engine errors.
pub fn paste(engine: &mut Engine, text: &str) -> Result<()> {
    engine.insert(engine.caret(), text)?;
    Ok(())
}

/// Type `text` at the caret one keystroke at a time.
///
/// # Errors
///
/// Engine errors, or a final buffer that differs from the original contents
/// with `text` spliced in at the caret.
pub fn type_text(engine: &mut Engine, text: &str) -> Result<TypingStats> {
    let expected = splice_at_caret(engine, text);
    let mut typist = Typist {
        engine: &mut *engine,
        stats: TypingStats::default(),
    };

    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            typist.enter()?;
        }
        let content = line.trim_start_matches(char::is_whitespace);
        let target = &line[..line.len() - content.len()];
        typist.match_indent(target)?;
        typist.type_str(content)?;
    }

    let stats = typist.stats;
    debug!(?stats, "typed replay finished");
    ensure!(
        engine.text() == expected,
        "typed replay diverged from the input"
    );
    Ok(stats)
}

fn splice_at_caret(engine: &Engine, text: &str) -> String {
    let contents = engine.text();
    let at = contents
        .char_indices()
        .nth(engine.caret())
        .map_or(contents.len(), |(i, _)| i);
    let mut spliced = String::with_capacity(contents.len() + text.len());
    spliced.push_str(&contents[..at]);
    spliced.push_str(text);
    spliced.push_str(&contents[at..]);
    spliced
}

struct Typist<'a> {
    engine: &'a mut Engine,
    stats: TypingStats,
}

impl Typist<'_> {
    fn type_str(&mut self, text: &str) -> Result<()> {
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            let caret = self.engine.caret();
            self.engine.insert(caret, ch.encode_utf8(&mut buf))?;
            self.stats.chars += 1;
        }
        Ok(())
    }

    fn enter(&mut self) -> Result<()> {
        let caret = self.engine.caret();
        self.engine.insert(caret, "\n")?;
        self.stats.enters += 1;
        Ok(())
    }

    fn backspace(&mut self) -> Result<()> {
        let caret = self.engine.caret();
        ensure!(caret > 0, "backspace at start of buffer");
        self.engine.delete(caret - 1, 1)?;
        self.stats.backspaces += 1;
        Ok(())
    }

    /// Bring the indentation before the caret to `target`: keep whatever
    /// prefix already matches, backspace the rest, type what is missing.
    ///
    /// Each backspace shortens the indent, so this ends at the latest when
    /// the indent is empty.
    fn match_indent(&mut self, target: &str) -> Result<()> {
        loop {
            let current = indent_of(self.engine.buffer(), self.engine.caret());
            if let Some(missing) = target.strip_prefix(current.as_str()) {
                return self.type_str(missing);
            }
            self.backspace()?;
        }
    }
}
