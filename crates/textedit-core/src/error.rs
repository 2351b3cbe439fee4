//! Error taxonomy for buffer and folding operations.
//!
//! Conditions that mean "nothing to do" (folding an already-folded paragraph,
//! expanding a visible one, an out-of-bounds fold trigger) are *not* errors:
//! the fold engine swallows them and reports `Ok(false)`. Everything defined
//! here reflects either a host-side offset bug or fold state that no longer
//! agrees with the buffer content.

use thiserror::Error;

/// Errors produced by [`TextBuffer`](crate::TextBuffer) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BufferError {
    /// A paragraph index outside the current buffer bounds.
    #[error("paragraph {index} out of range (buffer has {count} paragraphs)")]
    OutOfRange {
        /// The offending paragraph index.
        index: usize,
        /// The buffer's paragraph count at the time of the call.
        count: usize,
    },

    /// An offset range outside `[0, len]`, or with `start > end`.
    #[error("invalid range {start}..{end} (buffer length {len})")]
    InvalidRange {
        /// Inclusive start offset (characters).
        start: usize,
        /// Exclusive end offset (characters).
        end: usize,
        /// The buffer's character length at the time of the call.
        len: usize,
    },
}

/// Errors produced by [`FoldEngine`](crate::FoldEngine) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FoldError {
    /// A buffer mutation inside a fold/expand step failed.
    #[error(transparent)]
    Buffer(#[from] BufferError),

    /// The engine's record of a folded paragraph disagrees with the buffer.
    ///
    /// The paragraph's folded flag is set but its saved content is missing,
    /// its header no longer carries the fold marker, or the header paragraph
    /// no longer exists. The operation that detected this left both the
    /// buffer and the fold state untouched.
    #[error("fold state for paragraph {paragraph} is inconsistent: {detail}")]
    InconsistentFoldState {
        /// The folded header paragraph index.
        paragraph: usize,
        /// What disagreed.
        detail: &'static str,
    },
}
