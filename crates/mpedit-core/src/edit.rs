//! Edits — the one kind of input the engine accepts.

/// One atomic change requested by the shell: delete `deleted` chars at
/// `position`, then insert `inserted` there.
///
/// A keystroke is an insert of one char, a paste an insert of many,
/// backspace a delete of one, and typing over a selection a replace.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Edit {
    pub position: usize,
    pub deleted: usize,
    pub inserted: String,
}

impl Edit {
    #[must_use]
    pub fn insert(position: usize, text: impl Into<String>) -> Self {
        Self {
            position,
            deleted: 0,
            inserted: text.into(),
        }
    }

    #[must_use]
    pub const fn delete(position: usize, len: usize) -> Self {
        Self {
            position,
            deleted: len,
            inserted: String::new(),
        }
    }

    #[must_use]
    pub fn replace(position: usize, len: usize, text: impl Into<String>) -> Self {
        Self {
            position,
            deleted: len,
            inserted: text.into(),
        }
    }

    /// True when the edit neither deletes nor inserts. Such an edit still
    /// re-lexes the word at `position`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deleted == 0 && self.inserted.is_empty()
    }

    /// True for a pure deletion (backspace/delete key).
    #[must_use]
    pub fn is_deletion(&self) -> bool {
        self.deleted > 0 && self.inserted.is_empty()
    }

    /// True for exactly one typed line break.
    #[must_use]
    pub fn is_single_newline(&self) -> bool {
        self.inserted == "\n"
    }
}
