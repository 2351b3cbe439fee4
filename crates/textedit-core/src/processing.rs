//! Generic document processing interfaces.
//!
//! Derived state (syntax highlighting today, anything span-shaped tomorrow)
//! is produced by external crates through [`DocumentProcessor`] and handed
//! back to the host as [`ProcessingEdit`] values. The host applies the edits
//! to its presentation layer; the kernel never interprets them.
//!
//! Recomputation is expected to run on a debounce boundary:
//! [`SnapshotCoalescer`] keeps only the most recent pending text snapshot, so
//! snapshots superseded during a burst of edits are discarded rather than
//! queued. The host supplies the quiescent-interval timer and calls
//! [`SnapshotCoalescer::take_latest`] when it fires.

use crate::state::DocumentSession;
use crate::style::StyleSpan;

/// A change to derived editor state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingEdit {
    /// Replace the full set of style spans for the document.
    ReplaceSpans {
        /// Contiguous spans covering the whole document (char offsets).
        spans: Vec<StyleSpan>,
    },
}

/// A processor that derives state from a document.
pub trait DocumentProcessor {
    /// The error type returned by [`DocumentProcessor::process`].
    type Error;

    /// Compute derived-state updates for the session's current content.
    ///
    /// Implementations must not mutate the session; they return edits for the
    /// caller to apply.
    fn process(&mut self, session: &DocumentSession) -> Result<Vec<ProcessingEdit>, Self::Error>;
}

/// A text snapshot pending recomputation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Monotonically increasing submission counter.
    pub revision: u64,
    /// The full document text at submission time.
    pub text: String,
}

/// Keeps only the latest submitted snapshot.
#[derive(Debug, Clone, Default)]
pub struct SnapshotCoalescer {
    pending: Option<Snapshot>,
    submitted: u64,
}

impl SnapshotCoalescer {
    /// Create an empty coalescer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit a snapshot, replacing any pending one. Returns its revision.
    pub fn submit(&mut self, text: impl Into<String>) -> u64 {
        self.submitted += 1;
        self.pending = Some(Snapshot {
            revision: self.submitted,
            text: text.into(),
        });
        self.submitted
    }

    /// Hand the most recent snapshot to the recompute step, clearing the cell.
    pub fn take_latest(&mut self) -> Option<Snapshot> {
        self.pending.take()
    }

    /// Whether a snapshot is waiting to be recomputed.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Revision of the most recently submitted snapshot (0 before the first).
    pub fn last_revision(&self) -> u64 {
        self.submitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_superseded_snapshots_are_discarded() {
        let mut coalescer = SnapshotCoalescer::new();
        coalescer.submit("one");
        coalescer.submit("two");
        let third = coalescer.submit("three");

        let taken = coalescer.take_latest().unwrap();
        assert_eq!(taken.revision, third);
        assert_eq!(taken.text, "three");
        assert!(coalescer.take_latest().is_none());
        assert!(!coalescer.has_pending());
    }

    #[test]
    fn test_revisions_are_monotonic_across_takes() {
        let mut coalescer = SnapshotCoalescer::new();
        assert_eq!(coalescer.last_revision(), 0);
        assert_eq!(coalescer.submit("a"), 1);
        coalescer.take_latest();
        assert_eq!(coalescer.submit("b"), 2);
    }
}
