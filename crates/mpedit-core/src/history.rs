//! Undo/redo history — transaction-based change tracking.
//!
//! Every buffer mutation the engine performs comes back from the
//! [`StyledBuffer`] as a [`Change`] carrying both text and tags. One
//! `apply_edit` call is one [`Transaction`], even when it made several
//! changes (an outdent is a delete followed by a replacement of the
//! indentation, an Enter re-lexes both sides of the break).
//!
//! # Usage
//!
//! ```text
//! history.begin(caret, comments);
//! // mutate the buffer, recording each change:
//! history.record(change);
//! // finalize:
//! history.commit(caret);
//! ```
//!
//! Because changes store the tags they removed, undo restores styling
//! exactly. Each transaction also remembers whether comment highlighting
//! was on when it was recorded; if the mode has changed since, the tags it
//! restores are stale and the caller has to re-lex.

use crate::buffer::{Change, StyledBuffer};
use crate::error::EditError;

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A group of changes that undo/redo as one unit, with the caret before and
/// after.
#[derive(Debug, Clone)]
struct Transaction {
    changes: Vec<Change>,
    caret_before: usize,
    caret_after: usize,
    comments: bool,
}

impl Transaction {
    /// Apply this transaction's changes in reverse to undo them.
    fn undo(&self, buf: &mut StyledBuffer) -> Result<(), EditError> {
        for change in self.changes.iter().rev() {
            let end = change.start + change.inserted.chars().count();
            buf.replace_raw(change.start..end, &change.removed, &change.removed_styles)?;
        }
        Ok(())
    }

    /// Re-apply this transaction's changes in forward order.
    fn redo(&self, buf: &mut StyledBuffer) -> Result<(), EditError> {
        for change in &self.changes {
            let end = change.start + change.removed.chars().count();
            buf.replace_raw(change.start..end, &change.inserted, &change.inserted_styles)?;
        }
        Ok(())
    }
}

/// What an undo or redo put back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Restored {
    /// Caret to restore.
    pub caret: usize,
    /// Comment highlighting in effect when the tags were recorded.
    pub comments: bool,
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// Undo/redo history for a buffer.
///
/// Two stacks: transactions that can be undone and transactions that can
/// be redone. A new transaction clears the redo stack (no branching
/// history). The undo stack holds at most `limit` transactions; the oldest
/// are dropped first.
#[derive(Debug)]
pub struct History {
    undo_stack: Vec<Transaction>,
    redo_stack: Vec<Transaction>,
    pending: Option<Transaction>,
    limit: usize,
}

impl History {
    /// Create an empty history keeping at most `limit` transactions.
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            pending: None,
            limit,
        }
    }

    /// Change the transaction limit, dropping the oldest entries if the
    /// stack is over it.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
        self.enforce_limit();
    }

    /// Start a new transaction. `caret` is the caret before any change,
    /// `comments` the comment mode its tags are computed under.
    pub fn begin(&mut self, caret: usize, comments: bool) {
        self.pending = Some(Transaction {
            changes: Vec::new(),
            caret_before: caret,
            caret_after: caret,
            comments,
        });
    }

    /// Record a change already applied to the buffer. No-op changes and
    /// changes outside a transaction are ignored.
    pub fn record(&mut self, change: Change) {
        if change.is_empty() || change.is_noop() {
            return;
        }
        if let Some(txn) = &mut self.pending {
            txn.changes.push(change);
        }
    }

    /// Finalize the pending transaction with the caret after it.
    ///
    /// Empty transactions are discarded and leave the redo stack alone.
    pub fn commit(&mut self, caret: usize) {
        if let Some(mut txn) = self.pending.take() {
            if txn.changes.is_empty() {
                return;
            }
            txn.caret_after = caret;
            self.redo_stack.clear();
            self.undo_stack.push(txn);
            self.enforce_limit();
        }
    }

    /// Undo the last transaction, or return `None` if there's nothing to
    /// undo.
    ///
    /// # Errors
    ///
    /// Propagates a buffer error if a recorded change no longer fits the
    /// buffer, which means the buffer was mutated behind the history's
    /// back.
    pub fn undo(&mut self, buf: &mut StyledBuffer) -> Result<Option<Restored>, EditError> {
        let Some(txn) = self.undo_stack.pop() else {
            return Ok(None);
        };
        txn.undo(buf)?;
        let restored = Restored {
            caret: txn.caret_before,
            comments: txn.comments,
        };
        self.redo_stack.push(txn);
        Ok(Some(restored))
    }

    /// Redo the last undone transaction, or return `None` if there's
    /// nothing to redo.
    ///
    /// # Errors
    ///
    /// Same as [`undo`](Self::undo).
    pub fn redo(&mut self, buf: &mut StyledBuffer) -> Result<Option<Restored>, EditError> {
        let Some(txn) = self.redo_stack.pop() else {
            return Ok(None);
        };
        txn.redo(buf)?;
        let restored = Restored {
            caret: txn.caret_after,
            comments: txn.comments,
        };
        self.undo_stack.push(txn);
        Ok(Some(restored))
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    fn enforce_limit(&mut self) {
        if self.undo_stack.len() > self.limit {
            let excess = self.undo_stack.len() - self.limit;
            self.undo_stack.drain(..excess);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
