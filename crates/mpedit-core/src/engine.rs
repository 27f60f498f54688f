//! Edit coordinator — applies edits and keeps the styling consistent.
//!
//! [`Engine`] owns the [`StyledBuffer`], the [`Options`] and the undo
//! [`History`]. Every [`Edit`] from the shell goes through
//! [`Engine::apply_edit`], which picks one of three paths:
//!
//! 1. **Backspace over indentation.** A pure deletion of whitespace that
//!    leaves only whitespace between the line start and the deletion point
//!    replaces that whitespace with the previous shallower indent.
//! 2. **Enter.** Inserting exactly `"\n"` appends the current line's
//!    indentation after the break. A newline inside a paste is never
//!    auto-indented.
//! 3. **Everything else.** The edit point is widened to whitespace
//!    boundaries, the widened text is classified with the carry-in state
//!    read from the tag before it, and the range is replaced with the
//!    styled result. Whitespace at either end of the insertion also
//!    re-lexes the word beside it, since it may have split that word.
//!
//! # Atomicity
//!
//! The range is validated before anything is touched. If a later step
//! fails, the changes already made by the same call are rolled back, so the
//! shell always sees either the whole edit or none of it.

use std::ops::Range;

use tracing::{debug, error, warn};

use crate::boundary::expand;
use crate::buffer::{Change, StyledBuffer};
use crate::classify::{Classifier, ClassifierState};
use crate::edit::Edit;
use crate::error::{EditError, OptionError};
use crate::history::{History, Restored};
use crate::indent::{indent_of, line_start, only_whitespace_before, shorter_indent_of};
use crate::options::Options;
use crate::position::Position;
use crate::style::{StyleTag, StyledSpan};

/// The incremental lexing and indentation engine.
#[derive(Debug)]
pub struct Engine {
    buffer: StyledBuffer,
    options: Options,
    history: History,
    caret: usize,
    /// Changes made by the edit currently being applied.
    pending: Vec<Change>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_options(Options::default())
    }
}

impl Engine {
    // -- Construction -------------------------------------------------------

    /// An empty engine with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: Options) -> Self {
        Self {
            buffer: StyledBuffer::new(),
            history: History::new(options.undolevels),
            options,
            caret: 0,
            pending: Vec::new(),
        }
    }

    /// An engine holding `text`, fully classified and unmodified.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut engine = Self::new();
        engine.load(text);
        engine
    }

    /// Replace the whole buffer with `text`, classify it from scratch and
    /// forget the undo history. The buffer counts as unmodified afterwards.
    pub fn load(&mut self, text: &str) {
        self.buffer = StyledBuffer::from_text(text);
        self.restyle_all();
        self.buffer.mark_saved();
        self.history = History::new(self.options.undolevels);
        self.caret = 0;
    }

    // -- Queries ------------------------------------------------------------

    /// The whole text.
    #[must_use]
    pub fn text(&self) -> String {
        self.buffer.contents()
    }

    /// Length in chars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Runs of equal style in `range`, for rendering.
    ///
    /// # Errors
    ///
    /// [`EditError::OutOfRange`] if the range is reversed or past the end.
    pub fn styled_spans(&self, range: Range<usize>) -> Result<Vec<StyledSpan>, EditError> {
        self.buffer.spans(range)
    }

    /// The style of the char at `idx`.
    #[must_use]
    pub fn style_at(&self, idx: usize) -> Option<StyleTag> {
        self.buffer.style_at(idx)
    }

    #[must_use]
    pub const fn buffer(&self) -> &StyledBuffer {
        &self.buffer
    }

    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    /// Caret after the last edit, undo or redo.
    #[must_use]
    pub const fn caret(&self) -> usize {
        self.caret
    }

    /// The caret as (line, col).
    #[must_use]
    pub fn caret_position(&self) -> Position {
        self.buffer.char_idx_to_pos(self.caret).unwrap_or_default()
    }

    /// Convert a char offset to (line, col).
    #[must_use]
    pub fn char_idx_to_pos(&self, idx: usize) -> Option<Position> {
        self.buffer.char_idx_to_pos(idx)
    }

    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.buffer.is_modified()
    }

    pub const fn mark_saved(&mut self) {
        self.buffer.mark_saved();
    }

    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.buffer.revision()
    }

    // -- Options ------------------------------------------------------------

    /// Apply `:set`-style arguments. Turning comment highlighting on or off
    /// restyles the whole buffer.
    ///
    /// # Errors
    ///
    /// The first [`OptionError`]; earlier directives stay applied.
    pub fn set(&mut self, args: &str) -> Result<Option<String>, OptionError> {
        let before = self.options;
        let result = self.options.set(args);
        if self.options.undolevels != before.undolevels {
            self.history.set_limit(self.options.undolevels);
        }
        if self.options.comments != before.comments {
            self.restyle_all();
        }
        result
    }

    // -- Editing ------------------------------------------------------------

    /// Apply one edit and return the new caret.
    ///
    /// # Errors
    ///
    /// [`EditError::OutOfRange`] if `position + deleted` is past the end of
    /// the buffer. The buffer is unchanged on any error.
    pub fn apply_edit(&mut self, edit: &Edit) -> Result<usize, EditError> {
        let len = self.buffer.len();
        let end = edit
            .position
            .checked_add(edit.deleted)
            .filter(|&end| end <= len)
            .ok_or(EditError::OutOfRange {
                position: edit.position,
                deleted: edit.deleted,
                len,
            })?;

        self.pending.clear();
        match self.dispatch(edit, end) {
            Ok(caret) => {
                self.history.begin(self.caret, self.options.comments);
                for change in self.pending.drain(..) {
                    self.history.record(change);
                }
                self.history.commit(caret);
                debug!(
                    position = edit.position,
                    deleted = edit.deleted,
                    inserted = edit.inserted.chars().count(),
                    caret,
                    "applied edit"
                );
                self.caret = caret;
                Ok(caret)
            }
            Err(err) => {
                self.roll_back();
                Err(err)
            }
        }
    }

    /// Insert `text` at `position`.
    ///
    /// # Errors
    ///
    /// See [`apply_edit`](Self::apply_edit).
    pub fn insert(&mut self, position: usize, text: &str) -> Result<usize, EditError> {
        self.apply_edit(&Edit::insert(position, text))
    }

    /// Delete `len` chars at `position`.
    ///
    /// # Errors
    ///
    /// See [`apply_edit`](Self::apply_edit).
    pub fn delete(&mut self, position: usize, len: usize) -> Result<usize, EditError> {
        self.apply_edit(&Edit::delete(position, len))
    }

    /// Undo the last edit. Returns the restored caret, `None` if there was
    /// nothing to undo.
    ///
    /// Tags recorded under the other comment mode are re-lexed.
    ///
    /// # Errors
    ///
    /// A buffer error if the history no longer matches the buffer.
    pub fn undo(&mut self) -> Result<Option<usize>, EditError> {
        let restored = self.history.undo(&mut self.buffer)?;
        Ok(restored.map(|r| self.restore(r)))
    }

    /// Redo the last undone edit. Returns the restored caret, `None` if
    /// there was nothing to redo.
    ///
    /// # Errors
    ///
    /// A buffer error if the history no longer matches the buffer.
    pub fn redo(&mut self) -> Result<Option<usize>, EditError> {
        let restored = self.history.redo(&mut self.buffer)?;
        Ok(restored.map(|r| self.restore(r)))
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // -- Paths --------------------------------------------------------------

    fn dispatch(&mut self, edit: &Edit, end: usize) -> Result<usize, EditError> {
        if edit.is_deletion() {
            return self.backspace(edit.position, end);
        }
        if edit.deleted > 0 {
            self.replace_raw(edit.position..end, "", &[])?;
        }
        if edit.is_single_newline() && self.options.autoindent {
            return self.newline(edit.position);
        }
        self.insert_text(edit.position, &edit.inserted)
    }

    /// Relex an insertion, then the word beside any whitespace at its ends.
    fn insert_text(&mut self, position: usize, inserted: &str) -> Result<usize, EditError> {
        let caret = self.relex_insert(position, inserted)?;
        if inserted.starts_with(char::is_whitespace) {
            self.relex_insert(position, "")?;
        }
        if inserted.ends_with(char::is_whitespace) {
            self.relex_insert(position + inserted.chars().count(), "")?;
        }
        Ok(caret)
    }

    /// Widen, classify and replace. Returns the caret just after
    /// `inserted`.
    fn relex_insert(&mut self, position: usize, inserted: &str) -> Result<usize, EditError> {
        let widened = expand(&self.buffer, position, inserted, self.options.comments);
        let carry_in = self.carry_in(widened.range.start);
        let text = widened.splice(inserted);
        let tokens = self.classifier().classify(&text, carry_in);
        let change = self.buffer.replace(widened.range.clone(), &tokens)?;
        self.pending.push(change);

        let caret = widened.range.start + text.chars().count() - widened.suffix_len();
        debug!(
            start = widened.range.start,
            end = widened.range.end,
            ?carry_in,
            tokens = tokens.len(),
            "relexed"
        );
        Ok(caret)
    }

    /// Enter: break the line and repeat its indentation.
    fn newline(&mut self, position: usize) -> Result<usize, EditError> {
        let indent = indent_of(&self.buffer, position);
        let text = format!("\n{indent}");
        let tokens = self.classifier().classify(&text, self.carry_in(position));
        let change = self.buffer.replace(position..position, &tokens)?;
        self.pending.push(change);

        let caret = position + text.chars().count();
        // Enter may have split a word; restyle both halves.
        self.relex_insert(position, "")?;
        self.relex_insert(caret, "")?;
        Ok(caret)
    }

    /// Deletion with the backspace-over-indent policy.
    fn backspace(&mut self, position: usize, end: usize) -> Result<usize, EditError> {
        let removing_white = self
            .buffer
            .slice(position..end)
            .is_some_and(|removed| removed.chars().all(char::is_whitespace));
        self.replace_raw(position..end, "", &[])?;

        if self.options.outdent
            && removing_white
            && !indent_of(&self.buffer, position).is_empty()
            && only_whitespace_before(&self.buffer, position)
        {
            let start = line_start(&self.buffer, position);
            let shorter = shorter_indent_of(&self.buffer, position);
            let tokens = self.classifier().classify(&shorter, self.carry_in(start));
            let change = self.buffer.replace(start..position, &tokens)?;
            self.pending.push(change);
            debug!(line_start = start, indent = shorter.chars().count(), "outdented");
            return Ok(start + shorter.chars().count());
        }

        self.relex_insert(position, "")
    }

    // -- Helpers ------------------------------------------------------------

    const fn classifier(&self) -> Classifier {
        Classifier::new(self.options.comments)
    }

    /// Classifier state at `start`, read from the tags before it.
    ///
    /// Normally the char before `start` is whitespace and its tag is the
    /// answer. When `start` directly follows string delimiters (which are
    /// tagged `Normal`), each delimiter flips in/out of the string, so the
    /// run of quotes is counted and applied to the state before it.
    fn carry_in(&self, start: usize) -> ClassifierState {
        let mut idx = start;
        let mut quotes = 0usize;
        while idx > 0
            && self.buffer.char_at(idx - 1) == Some('"')
            && self.buffer.style_at(idx - 1) == Some(StyleTag::Normal)
        {
            quotes += 1;
            idx -= 1;
        }

        let before = if idx == 0 {
            ClassifierState::Normal
        } else if let Some(tag) = self.buffer.style_at(idx - 1) {
            ClassifierState::carry_in(Some(tag))
        } else {
            let err = EditError::InconsistentState { offset: idx };
            warn!(%err, "assuming normal carry-in");
            ClassifierState::Normal
        };

        match (quotes % 2, before) {
            (0, state) => state,
            (_, ClassifierState::Quoted) => ClassifierState::Normal,
            (_, ClassifierState::Normal) => ClassifierState::Quoted,
            (_, state) => state,
        }
    }

    fn replace_raw(
        &mut self,
        range: Range<usize>,
        text: &str,
        styles: &[StyleTag],
    ) -> Result<(), EditError> {
        let change = self.buffer.replace_raw(range, text, styles)?;
        self.pending.push(change);
        Ok(())
    }

    /// Undo the changes of a failed edit.
    fn roll_back(&mut self) {
        while let Some(change) = self.pending.pop() {
            let end = change.start + change.inserted.chars().count();
            if let Err(err) =
                self.buffer
                    .replace_raw(change.start..end, &change.removed, &change.removed_styles)
            {
                error!(%err, "rollback failed");
                self.pending.clear();
                return;
            }
        }
    }

    /// Caret and tags after an undo or redo.
    fn restore(&mut self, restored: Restored) -> usize {
        if restored.comments != self.options.comments {
            debug!(comments = self.options.comments, "restyling restored tags");
            self.restyle_all();
        }
        self.caret = restored.caret.min(self.buffer.len());
        self.caret
    }

    /// Classify the whole buffer from scratch, keeping the text.
    fn restyle_all(&mut self) {
        let text = self.buffer.contents();
        let tokens = self.classifier().classify(&text, ClassifierState::Normal);
        let len = self.buffer.len();
        if let Err(err) = self.buffer.restyle(0..len, &tokens) {
            error!(%err, "full restyle failed");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn spans(engine: &Engine) -> Vec<(String, StyleTag)> {
        engine
            .styled_spans(0..engine.len())
            .unwrap()
            .into_iter()
            .map(|s| (s.text, s.style))
            .collect()
    }

    fn s(text: &str, style: StyleTag) -> (String, StyleTag) {
        (text.to_string(), style)
    }

    /// Type `text` one char at a time at the caret.
    fn type_str(engine: &mut Engine, text: &str) {
        for ch in text.chars() {
            let caret = engine.caret();
            engine.insert(caret, &ch.to_string()).unwrap();
        }
    }

    fn backspace(engine: &mut Engine) -> usize {
        let caret = engine.caret();
        engine.delete(caret - 1, 1).unwrap()
    }

    // -- Loading --------------------------------------------------------------

    #[test]
    fn from_text_classifies_and_is_unmodified() {
        let engine = Engine::from_text("beginfig(1);\npair a;");
        assert!(!engine.is_modified());
        assert_eq!(engine.style_at(0), Some(StyleTag::Keyword));
        assert_eq!(engine.style_at(9), Some(StyleTag::Digits));
        assert_eq!(engine.style_at(13), Some(StyleTag::Datatype));
        assert!(!engine.can_undo());
    }

    // -- Range checks ---------------------------------------------------------

    #[test]
    fn out_of_range_leaves_buffer_unchanged() {
        let mut engine = Engine::from_text("draw");
        let before = spans(&engine);
        let err = engine.apply_edit(&Edit::replace(2, 3, "x"));
        assert_eq!(
            err,
            Err(EditError::OutOfRange {
                position: 2,
                deleted: 3,
                len: 4
            })
        );
        assert_eq!(engine.insert(5, "x").unwrap_err(), EditError::OutOfRange {
            position: 5,
            deleted: 0,
            len: 4
        });
        assert!(engine.apply_edit(&Edit::delete(usize::MAX, 2)).is_err());
        assert_eq!(spans(&engine), before);
        assert!(!engine.is_modified());
    }

    #[test]
    fn styled_spans_range_check() {
        let engine = Engine::from_text("abc");
        assert!(engine.styled_spans(0..4).is_err());
        assert_eq!(
            engine.styled_spans(1..2).unwrap(),
            vec![StyledSpan::new("b", StyleTag::Normal)]
        );
    }

    // -- Idempotence ----------------------------------------------------------

    #[test]
    fn empty_edit_is_a_noop_everywhere() {
        let text = "beginfig(1);\n  draw (0,0)--(1,1) withcolor red;\n  label(\"a b\", z1);\nendfig;";
        let mut engine = Engine::from_text(text);
        let before = spans(&engine);
        for position in 0..=engine.len() {
            let caret = engine.apply_edit(&Edit::insert(position, "")).unwrap();
            assert_eq!(caret, position);
            assert_eq!(engine.text(), text);
            assert_eq!(spans(&engine), before, "at {position}");
        }
        assert!(!engine.is_modified());
        assert!(!engine.can_undo());
    }

    // -- Word boundaries ------------------------------------------------------

    #[test]
    fn typing_inside_a_word_restyles_the_whole_word() {
        let mut engine = Engine::from_text("x daw;");
        assert_eq!(engine.style_at(2), Some(StyleTag::Normal));

        let caret = engine.insert(3, "r").unwrap();
        assert_eq!(caret, 4);
        assert_eq!(engine.text(), "x draw;");
        assert_eq!(
            spans(&engine),
            vec![
                s("x ", StyleTag::Normal),
                s("draw", StyleTag::Keyword),
                s(";", StyleTag::Normal),
            ]
        );
    }

    #[test]
    fn typing_a_keyword_char_by_char() {
        let mut engine = Engine::new();
        type_str(&mut engine, "fill");
        assert_eq!(spans(&engine), vec![s("fill", StyleTag::Keyword)]);
        type_str(&mut engine, "draw");
        assert_eq!(spans(&engine), vec![s("filldraw", StyleTag::Keyword)]);
        type_str(&mut engine, "x");
        assert_eq!(spans(&engine), vec![s("filldrawx", StyleTag::Normal)]);
    }

    #[test]
    fn space_typed_inside_a_word_restyles_both_halves() {
        let mut engine = Engine::from_text("drawfill");
        let caret = engine.insert(4, " ").unwrap();
        assert_eq!(caret, 5);
        assert_eq!(
            spans(&engine),
            vec![
                s("draw", StyleTag::Keyword),
                s(" ", StyleTag::Normal),
                s("fill", StyleTag::Keyword),
            ]
        );
        engine.undo().unwrap();
        assert_eq!(spans(&engine), vec![s("drawfill", StyleTag::Normal)]);
    }

    #[test]
    fn paste_with_inner_space_restyles_neighbours() {
        let mut engine = Engine::from_text("xdrawy");
        engine.insert(5, " ;x ").unwrap();
        assert_eq!(engine.text(), "xdraw ;x y");
        assert_eq!(
            spans(&engine),
            vec![s("xdraw ;x y", StyleTag::Normal)]
        );
        engine.insert(1, " ").unwrap();
        assert_eq!(engine.style_at(2), Some(StyleTag::Keyword));
    }

    #[test]
    fn enter_without_autoindent_splits_a_word() {
        let mut engine = Engine::from_text("fillpair");
        engine.set("noai").unwrap();
        engine.insert(4, "\n").unwrap();
        assert_eq!(
            spans(&engine),
            vec![
                s("fill", StyleTag::Keyword),
                s("\n", StyleTag::Normal),
                s("pair", StyleTag::Datatype),
            ]
        );
    }

    #[test]
    fn deleting_inside_a_word_restyles_it() {
        let mut engine = Engine::from_text("drawn x");
        assert_eq!(engine.style_at(0), Some(StyleTag::Normal));
        let caret = engine.delete(4, 1).unwrap();
        assert_eq!(caret, 4);
        assert_eq!(spans(&engine)[0], s("draw", StyleTag::Keyword));
    }

    #[test]
    fn deleting_a_space_joins_words() {
        let mut engine = Engine::from_text("un draw");
        engine.delete(2, 1).unwrap();
        assert_eq!(spans(&engine), vec![s("undraw", StyleTag::Keyword)]);
    }

    #[test]
    fn deleting_at_buffer_start_restyles() {
        let mut engine = Engine::from_text("xpair");
        engine.delete(0, 1).unwrap();
        assert_eq!(spans(&engine), vec![s("pair", StyleTag::Datatype)]);
    }

    #[test]
    fn replace_restyles_both_sides() {
        let mut engine = Engine::from_text("withpen x");
        let caret = engine.apply_edit(&Edit::replace(4, 3, "color")).unwrap();
        assert_eq!(caret, 9);
        assert_eq!(engine.text(), "withcolor x");
        assert_eq!(spans(&engine)[0], s("withcolor", StyleTag::Keyword));
    }

    #[test]
    fn caret_stops_before_reattached_suffix() {
        let mut engine = Engine::from_text("ab");
        let caret = engine.insert(1, "xyz").unwrap();
        assert_eq!(caret, 4);
        assert_eq!(engine.text(), "axyzb");
    }

    // -- Strings --------------------------------------------------------------

    #[test]
    fn quote_persists_across_edits() {
        let mut engine = Engine::new();
        type_str(&mut engine, "\"abc");
        assert_eq!(
            spans(&engine),
            vec![s("\"", StyleTag::Normal), s("abc", StyleTag::Quoted)]
        );

        type_str(&mut engine, " def\" draw");
        assert_eq!(
            spans(&engine),
            vec![
                s("\"", StyleTag::Normal),
                s("abc def", StyleTag::Quoted),
                s("\" ", StyleTag::Normal),
                s("draw", StyleTag::Keyword),
            ]
        );
    }

    #[test]
    fn whitespace_typed_after_opening_quote_stays_quoted() {
        let mut engine = Engine::from_text("\"abc\"");
        engine.insert(1, " ").unwrap();
        assert_eq!(
            spans(&engine),
            vec![
                s("\"", StyleTag::Normal),
                s(" abc", StyleTag::Quoted),
                s("\"", StyleTag::Normal),
            ]
        );
    }

    #[test]
    fn whitespace_typed_after_closing_quote_is_normal() {
        let mut engine = Engine::from_text("\"a\"x");
        engine.insert(3, " ").unwrap();
        assert_eq!(
            spans(&engine),
            vec![
                s("\"", StyleTag::Normal),
                s("a", StyleTag::Quoted),
                s("\" x", StyleTag::Normal),
            ]
        );
    }

    // -- Enter ----------------------------------------------------------------

    #[test]
    fn enter_repeats_indentation() {
        let mut engine = Engine::from_text("beginfig(1);\n    draw p;");
        let end = engine.len();
        let caret = engine.insert(end, "\n").unwrap();
        assert_eq!(engine.text(), "beginfig(1);\n    draw p;\n    ");
        assert_eq!(caret, engine.len());
    }

    #[test]
    fn enter_without_autoindent() {
        let mut engine = Engine::from_text("    draw p;");
        engine.set("noai").unwrap();
        let end = engine.len();
        let caret = engine.insert(end, "\n").unwrap();
        assert_eq!(engine.text(), "    draw p;\n");
        assert_eq!(caret, engine.len());
    }

    #[test]
    fn enter_splitting_a_word_restyles_both_halves() {
        let mut engine = Engine::from_text("  drawfill");
        let caret = engine.insert(6, "\n").unwrap();
        assert_eq!(engine.text(), "  draw\n  fill");
        assert_eq!(caret, 9);
        assert_eq!(
            spans(&engine),
            vec![
                s("  ", StyleTag::Normal),
                s("draw", StyleTag::Keyword),
                s("\n  ", StyleTag::Normal),
                s("fill", StyleTag::Keyword),
            ]
        );
    }

    #[test]
    fn enter_inside_a_string_keeps_it_quoted() {
        let mut engine = Engine::from_text("\"ab cd\"");
        engine.insert(3, "\n").unwrap();
        assert_eq!(
            spans(&engine),
            vec![
                s("\"", StyleTag::Normal),
                s("ab\n cd", StyleTag::Quoted),
                s("\"", StyleTag::Normal),
            ]
        );
    }

    #[test]
    fn paste_keeps_its_own_indentation() {
        let mut engine = Engine::from_text("    x");
        let pasted = "\ndraw a;\n  fill b;\n\tc";
        let caret = engine.insert(5, pasted).unwrap();
        assert_eq!(engine.text(), format!("    x{pasted}"));
        assert_eq!(caret, engine.len());
    }

    #[test]
    fn replace_with_newline_auto_indents() {
        let mut engine = Engine::from_text("  ab");
        engine.apply_edit(&Edit::replace(3, 1, "\n")).unwrap();
        assert_eq!(engine.text(), "  a\n  ");
    }

    // -- Backspace ------------------------------------------------------------

    #[test]
    fn backspace_in_indent_steps_back_one_level() {
        let mut engine = Engine::from_text("for i=1 upto 3:\n    if x:\n        ");
        let end = engine.len();
        engine.apply_edit(&Edit::insert(end, "")).unwrap();
        let caret = backspace(&mut engine);
        assert_eq!(engine.text(), "for i=1 upto 3:\n    if x:\n    ");
        assert_eq!(caret, engine.len());

        let caret = backspace(&mut engine);
        assert_eq!(engine.text(), "for i=1 upto 3:\n    if x:\n");
        assert_eq!(caret, engine.len());
    }

    #[test]
    fn backspace_before_content_outdents_line() {
        let mut engine = Engine::from_text("a\n    b\n        c");
        // Backspace with the caret right before `c`.
        let caret = engine.delete(15, 1).unwrap();
        assert_eq!(engine.text(), "a\n    b\n    c");
        assert_eq!(caret, 12);
        assert_eq!(engine.style_at(12), Some(StyleTag::Normal));
    }

    #[test]
    fn backspace_after_content_is_plain() {
        let mut engine = Engine::from_text("a\n    b  ");
        let end = engine.len();
        let caret = engine.delete(end - 1, 1).unwrap();
        assert_eq!(engine.text(), "a\n    b ");
        assert_eq!(caret, end - 1);
    }

    #[test]
    fn deleting_non_whitespace_in_indent_is_plain() {
        let mut engine = Engine::from_text("x\n    ab");
        engine.delete(6, 1).unwrap();
        assert_eq!(engine.text(), "x\n    b");
    }

    #[test]
    fn deleting_whole_indent_leaves_column_zero() {
        let mut engine = Engine::from_text("a\n    b\n        c");
        engine.delete(8, 8).unwrap();
        assert_eq!(engine.text(), "a\n    b\nc");
    }

    #[test]
    fn outdent_can_be_disabled() {
        let mut engine = Engine::from_text("a\n    b\n        ");
        engine.set("nooutdent").unwrap();
        let end = engine.len();
        engine.delete(end - 1, 1).unwrap();
        assert_eq!(engine.text(), "a\n    b\n       ");
    }

    // -- Typing a whole block ---------------------------------------------------

    #[test]
    fn typing_a_nested_block() {
        let mut engine = Engine::new();
        type_str(&mut engine, "for i=1 upto 3:\n");
        type_str(&mut engine, "    draw p;\n");
        assert_eq!(engine.text(), "for i=1 upto 3:\n    draw p;\n    ");
        backspace(&mut engine);
        type_str(&mut engine, "endfor");
        assert_eq!(engine.text(), "for i=1 upto 3:\n    draw p;\nendfor");
        let last = spans(&engine).pop().unwrap();
        assert_eq!(last, s("endfor", StyleTag::Keyword));
    }

    // -- Comments -------------------------------------------------------------

    #[test]
    fn percent_is_plain_text_by_default() {
        let engine = Engine::from_text("% draw");
        assert_eq!(engine.style_at(0), Some(StyleTag::Normal));
        assert_eq!(engine.style_at(2), Some(StyleTag::Keyword));
    }

    #[test]
    fn enabling_comments_restyles_buffer() {
        let mut engine = Engine::from_text("draw p; % draw q\nfill r;");
        engine.set("comments").unwrap();
        assert_eq!(
            spans(&engine),
            vec![
                s("draw", StyleTag::Keyword),
                s(" p; ", StyleTag::Normal),
                s("% draw q", StyleTag::Comment),
                s("\n", StyleTag::Normal),
                s("fill", StyleTag::Keyword),
                s(" r;", StyleTag::Normal),
            ]
        );
        engine.set("nocomments").unwrap();
        assert_eq!(engine.style_at(10), Some(StyleTag::Keyword));
    }

    #[test]
    fn typing_percent_comments_out_rest_of_line() {
        let mut engine = Engine::from_text("draw p; fill q;\nx");
        engine.set("com").unwrap();
        engine.insert(8, "%").unwrap();
        assert_eq!(
            spans(&engine),
            vec![
                s("draw", StyleTag::Keyword),
                s(" p; ", StyleTag::Normal),
                s("%fill q;", StyleTag::Comment),
                s("\nx", StyleTag::Normal),
            ]
        );

        engine.delete(8, 1).unwrap();
        assert_eq!(engine.style_at(8), Some(StyleTag::Keyword));
    }

    #[test]
    fn typing_inside_a_comment_stays_comment() {
        let mut engine = Engine::from_text("% a b");
        engine.set("comments").unwrap();
        engine.insert(4, "draw ").unwrap();
        assert_eq!(spans(&engine), vec![s("% a draw b", StyleTag::Comment)]);
    }

    // -- Undo / redo ----------------------------------------------------------

    #[test]
    fn undo_restores_text_styles_and_caret() {
        let mut engine = Engine::from_text("x daw;");
        let before = spans(&engine);
        engine.insert(3, "r").unwrap();
        let after = spans(&engine);

        assert_eq!(engine.undo(), Ok(Some(0)));
        assert_eq!(engine.text(), "x daw;");
        assert_eq!(spans(&engine), before);

        assert_eq!(engine.redo(), Ok(Some(4)));
        assert_eq!(spans(&engine), after);
        assert_eq!(engine.caret(), 4);
    }

    #[test]
    fn undo_after_disabling_comments_restyles_as_code() {
        let mut engine = Engine::from_text("% draw");
        engine.set("comments").unwrap();
        engine.insert(6, "x").unwrap();
        engine.set("nocomments").unwrap();

        engine.undo().unwrap();
        assert_eq!(engine.text(), "% draw");
        assert_eq!(
            spans(&engine),
            vec![s("% ", StyleTag::Normal), s("draw", StyleTag::Keyword)]
        );

        engine.set("comments").unwrap();
        engine.redo().unwrap();
        assert_eq!(engine.text(), "% drawx");
        assert_eq!(spans(&engine), vec![s("% drawx", StyleTag::Comment)]);
    }

    #[test]
    fn undo_after_enabling_comments_restyles_as_comment() {
        let mut engine = Engine::from_text("fill");
        engine.insert(0, "% ").unwrap();
        engine.insert(6, " q").unwrap();
        engine.set("comments").unwrap();

        engine.undo().unwrap();
        assert_eq!(spans(&engine), vec![s("% fill", StyleTag::Comment)]);
    }

    #[test]
    fn undo_of_auto_indent_is_one_step() {
        let mut engine = Engine::from_text("  drawfill");
        engine.insert(6, "\n").unwrap();
        engine.undo().unwrap();
        assert_eq!(engine.text(), "  drawfill");
        assert_eq!(spans(&engine), vec![s("  drawfill", StyleTag::Normal)]);
        assert!(!engine.can_undo());
        assert!(engine.can_redo());
    }

    #[test]
    fn undo_of_outdent_is_one_step() {
        let mut engine = Engine::from_text("a\n    b\n        ");
        let end = engine.len();
        engine.delete(end - 1, 1).unwrap();
        engine.undo().unwrap();
        assert_eq!(engine.text(), "a\n    b\n        ");
    }

    #[test]
    fn undolevels_limits_history() {
        let mut engine = Engine::new();
        engine.set("ul=2").unwrap();
        type_str(&mut engine, "abc");
        assert!(engine.undo().unwrap().is_some());
        assert!(engine.undo().unwrap().is_some());
        assert_eq!(engine.undo(), Ok(None));
        assert_eq!(engine.text(), "a");
    }

    // -- Metadata -------------------------------------------------------------

    #[test]
    fn edits_mark_modified_and_bump_revision() {
        let mut engine = Engine::from_text("a");
        let rev = engine.revision();
        engine.insert(1, "b").unwrap();
        assert!(engine.is_modified());
        assert!(engine.revision() > rev);
        engine.mark_saved();
        assert!(!engine.is_modified());
    }

    #[test]
    fn caret_position_reports_line_and_column() {
        let mut engine = Engine::from_text("ab\n  c");
        engine.insert(6, "d").unwrap();
        assert_eq!(engine.caret_position(), Position::new(1, 4));
    }
}
