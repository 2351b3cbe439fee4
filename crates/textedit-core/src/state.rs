//! Document state management.
//!
//! [`DocumentSession`] is the host-facing wrapper around one document: it
//! owns the [`TextBuffer`] and [`FoldEngine`] pair, routes edits through the
//! bookkeeping that keeps fold records consistent with the buffer, tracks a
//! version number and modified flag, and notifies subscribers on change.
//!
//! # Example
//!
//! ```rust
//! use textedit_core::DocumentSession;
//!
//! let mut session = DocumentSession::new("# Notes\nfirst\nsecond");
//! session.subscribe(|change| {
//!     println!("changed: {:?} (v{})", change.change_type, change.version);
//! });
//! session.fold(0).unwrap();
//! assert!(session.folding().is_folded(0));
//! ```

use crate::buffer::TextBuffer;
use crate::error::{BufferError, FoldError};
use crate::folding::FoldEngine;

/// What kind of state changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChangeType {
    /// Buffer content changed through the session.
    DocumentModified,
    /// A fold or expand mutated the buffer.
    FoldingChanged,
}

/// A change notification delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    /// What changed.
    pub change_type: StateChangeType,
    /// The session version after the change.
    pub version: u64,
}

type StateChangeCallback = Box<dyn Fn(&StateChange)>;

/// Owns one document's buffer and fold state.
///
/// Edits made through the session keep the fold records aligned with the
/// buffer: line-count changes shift later records, and records whose header
/// line an edit destroyed are dropped (with a `tracing` warning) rather than
/// left dangling.
#[derive(Default)]
pub struct DocumentSession {
    buffer: TextBuffer,
    folding: FoldEngine,
    version: u64,
    modified: bool,
    subscribers: Vec<StateChangeCallback>,
}

impl DocumentSession {
    /// Create a session over the given initial text.
    pub fn new(text: &str) -> Self {
        Self::from_buffer(TextBuffer::from_text(text))
    }

    /// Create a session over an existing buffer.
    pub fn from_buffer(buffer: TextBuffer) -> Self {
        Self {
            buffer,
            folding: FoldEngine::new(),
            version: 0,
            modified: false,
            subscribers: Vec::new(),
        }
    }

    /// The underlying buffer.
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// The fold engine's state (read-only; mutate through the session).
    pub fn folding(&self) -> &FoldEngine {
        &self.folding
    }

    /// The whole document as one LF-joined string.
    pub fn full_text(&self) -> String {
        self.buffer.full_text()
    }

    /// Session version; incremented by every state-changing operation.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Whether the document changed since creation or the last
    /// [`DocumentSession::mark_saved`].
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Reset the modified flag (e.g. after the host saved the document).
    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    /// Register a callback invoked after every state change.
    pub fn subscribe(&mut self, callback: impl Fn(&StateChange) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    /// Insert text at an absolute char offset, keeping fold records aligned.
    pub fn insert_text(&mut self, offset: usize, text: &str) -> Result<(), BufferError> {
        let (line, column) = self.buffer.position_of(offset)?;
        self.buffer.insert_text(offset, text)?;

        let newlines = text.matches('\n').count();
        if newlines > 0 {
            let from = if column == 0 { line } else { line + 1 };
            self.folding.apply_line_delta(from, newlines as isize);
        }

        self.notify(StateChangeType::DocumentModified);
        Ok(())
    }

    /// Delete the text in `[start, end)`, keeping fold records aligned.
    ///
    /// A folded header whose line is removed by the deletion loses its record
    /// (its hidden text is unrecoverable at that point); records on later
    /// lines shift up.
    pub fn delete_text(&mut self, start: usize, end: usize) -> Result<(), BufferError> {
        let removed = self.buffer.text_range(start, end)?;
        let (start_line, start_col) = self.buffer.position_of(start)?;
        self.buffer.delete_text(start, end)?;

        let newlines = removed.matches('\n').count();
        if newlines > 0 {
            let end_line = start_line + newlines;
            let destroyed: Vec<usize> = self
                .folding
                .folded_paragraphs()
                .into_iter()
                .filter(|&p| {
                    if start_col == 0 {
                        p >= start_line && p < end_line
                    } else {
                        p > start_line && p <= end_line
                    }
                })
                .collect();
            for paragraph in destroyed {
                if self.folding.discard(paragraph) {
                    tracing::warn!(paragraph, "external edit removed a folded header");
                }
            }
            let shift_from = if start_col == 0 { end_line } else { end_line + 1 };
            self.folding.apply_line_delta(shift_from, -(newlines as isize));
        }
        self.folding.clamp_to_paragraph_count(self.buffer.paragraph_count());

        self.notify(StateChangeType::DocumentModified);
        Ok(())
    }

    /// Fold the range owned by `paragraph`. See [`FoldEngine::fold`].
    pub fn fold(&mut self, paragraph: usize) -> Result<bool, FoldError> {
        let changed = self.folding.fold(&mut self.buffer, paragraph)?;
        if changed {
            self.notify(StateChangeType::FoldingChanged);
        }
        Ok(changed)
    }

    /// Expand a folded paragraph. See [`FoldEngine::expand`].
    pub fn expand(&mut self, paragraph: usize) -> Result<bool, FoldError> {
        let changed = self.folding.expand(&mut self.buffer, paragraph)?;
        if changed {
            self.notify(StateChangeType::FoldingChanged);
        }
        Ok(changed)
    }

    /// Toggle the fold state at `paragraph`. See [`FoldEngine::toggle`].
    pub fn toggle_fold(&mut self, paragraph: usize) -> Result<bool, FoldError> {
        let changed = self.folding.toggle(&mut self.buffer, paragraph)?;
        if changed {
            self.notify(StateChangeType::FoldingChanged);
        }
        Ok(changed)
    }

    /// Expand every folded paragraph. See [`FoldEngine::clear_all_folding`].
    pub fn clear_all_folding(&mut self) -> Result<(), FoldError> {
        let had_folds = !self.folding.folded_paragraphs().is_empty();
        let result = self.folding.clear_all_folding(&mut self.buffer);
        if had_folds {
            self.notify(StateChangeType::FoldingChanged);
        }
        result
    }

    fn notify(&mut self, change_type: StateChangeType) {
        self.version += 1;
        self.modified = true;
        let change = StateChange {
            change_type,
            version: self.version,
        };
        for callback in &self.subscribers {
            callback(&change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_subscribers_see_changes_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);

        let mut session = DocumentSession::new("# A\nbody\ntail");
        session.subscribe(move |change| {
            sink.borrow_mut().push((change.change_type, change.version));
        });

        session.insert_text(0, "x").unwrap();
        session.fold(0).unwrap();

        assert_eq!(
            log.borrow().as_slice(),
            &[
                (StateChangeType::DocumentModified, 1),
                (StateChangeType::FoldingChanged, 2),
            ]
        );
        assert!(session.is_modified());
        assert_eq!(session.version(), 2);
    }

    #[test]
    fn test_noop_fold_does_not_notify() {
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);

        let mut session = DocumentSession::new("only");
        session.subscribe(move |_| *sink.borrow_mut() += 1);

        assert!(!session.fold(0).unwrap());
        assert_eq!(*count.borrow(), 0);
        assert_eq!(session.version(), 0);
    }

    #[test]
    fn test_mark_saved_clears_modified() {
        let mut session = DocumentSession::new("a");
        session.insert_text(0, "b").unwrap();
        assert!(session.is_modified());
        session.mark_saved();
        assert!(!session.is_modified());
    }

    #[test]
    fn test_insert_above_fold_shifts_record() {
        let mut session = DocumentSession::new("# A\nx\n# B\ny");
        session.fold(2).unwrap();
        assert_eq!(session.full_text(), "# A\nx\n# B [...]");

        session.insert_text(0, "top\n").unwrap();
        assert_eq!(session.full_text(), "top\n# A\nx\n# B [...]");
        assert!(session.folding().is_folded(3));

        session.expand(3).unwrap();
        assert_eq!(session.full_text(), "top\n# A\nx\n# B\ny");
    }

    #[test]
    fn test_mid_line_insert_does_not_shift_own_header() {
        let mut session = DocumentSession::new("# A\nx\n# B\ny");
        session.fold(0).unwrap();
        assert_eq!(session.full_text(), "# A [...]\n# B\ny");

        // Appending to the folded header's own line must not move its record.
        session.insert_text(3, "!").unwrap();
        assert!(session.folding().is_folded(0));
        assert_eq!(session.full_text(), "# A! [...]\n# B\ny");

        session.expand(0).unwrap();
        assert_eq!(session.full_text(), "# A!\nx\n# B\ny");
    }

    #[test]
    fn test_deleting_lines_above_fold_shifts_record() {
        let mut session = DocumentSession::new("top\n# A\nx\n# B\ny");
        session.fold(3).unwrap();
        assert_eq!(session.full_text(), "top\n# A\nx\n# B [...]");

        session.delete_text(0, 4).unwrap();
        assert_eq!(session.full_text(), "# A\nx\n# B [...]");
        assert!(session.folding().is_folded(2));

        session.expand(2).unwrap();
        assert_eq!(session.full_text(), "# A\nx\n# B\ny");
    }

    #[test]
    fn test_deleting_folded_header_drops_record() {
        let mut session = DocumentSession::new("a\n# B\nc");
        session.fold(1).unwrap();
        assert_eq!(session.full_text(), "a\n# B [...]");

        // Delete from mid-line 0 through the end of the header line.
        session.delete_text(1, session.full_text().chars().count()).unwrap();
        assert_eq!(session.full_text(), "a");
        assert!(session.folding().folded_paragraphs().is_empty());
    }
}
