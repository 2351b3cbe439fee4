#![warn(missing_docs)]
//! Headless document-editor kernel.
//!
//! # Overview
//!
//! `textedit-core` is the engine of a desktop document editor with the whole
//! UI shell cut away: no rendering, no themes, no dialogs, no input handling.
//! What remains is the part that has to stay correct under continuous
//! editing — a paragraph-addressable text buffer and a structural folding
//! engine that collapses heading sections, lists, and plain-text blocks while
//! guaranteeing the hidden content comes back byte for byte.
//!
//! Syntax highlighting lives in the companion crate
//! `textedit-core-highlight`, which produces [`StyleSpan`] values through the
//! [`processing`] seam defined here.
//!
//! # Core Features
//!
//! - **Paragraph buffer**: rope-backed char-offset addressing with
//!   offset↔(paragraph, column) conversion and LF normalization
//! - **Structural folding**: heading/list/plain-block range computation,
//!   marker handling, exact restore, and index remapping across intermixed
//!   fold/expand/edit sequences
//! - **Edit operations**: inline marker wrapping and line indent/unindent
//! - **State tracking**: version numbers and change notifications
//! - **Processing seam**: span vocabulary, processor trait, and snapshot
//!   coalescing for debounced recomputation
//!
//! # Quick Start
//!
//! ```rust
//! use textedit_core::{DocumentSession, FOLD_MARKER};
//!
//! let mut session = DocumentSession::new("# Title\nbody one\nbody two");
//!
//! session.fold(0).unwrap();
//! assert!(session.buffer().paragraph_text(0).unwrap().ends_with(FOLD_MARKER));
//!
//! session.expand(0).unwrap();
//! assert_eq!(session.full_text(), "# Title\nbody one\nbody two");
//! ```
//!
//! # Module Description
//!
//! - [`buffer`] - paragraph-addressable text buffer
//! - [`folding`] - fold range computation and the fold/expand state machine
//! - [`editing`] - selection-based edit operations
//! - [`state`] - per-document session with change notifications
//! - [`processing`] - processor seam and snapshot coalescing
//! - [`style`] - span vocabulary shared with span producers
//! - [`error`] - error taxonomy
//!
//! # Concurrency
//!
//! Everything here is single-threaded and synchronous: one logical thread of
//! control owns a session, and each operation runs to completion (or reports
//! failure) before the next. Highlight recomputation may run elsewhere as
//! long as it works on a text snapshot (see
//! [`processing::SnapshotCoalescer`]).

pub mod buffer;
pub mod editing;
pub mod error;
pub mod folding;
pub mod processing;
pub mod state;
pub mod style;

pub use buffer::{LineEnding, TextBuffer};
pub use editing::{apply_inline_wrap, indent_selection, unindent_selection};
pub use error::{BufferError, FoldError};
pub use folding::{FOLD_MARKER, FoldEngine, FoldRange, compute_range};
pub use processing::{DocumentProcessor, ProcessingEdit, Snapshot, SnapshotCoalescer};
pub use state::{DocumentSession, StateChange, StateChangeType};
pub use style::{StyleLabel, StyleSpan};
