//! Processor bridge into the kernel's processing seam.

use crate::{Highlighter, Mode};
use std::convert::Infallible;
use textedit_core::processing::{DocumentProcessor, ProcessingEdit};
use textedit_core::state::DocumentSession;

/// Runs a [`Highlighter`] over a session's text through the kernel's generic
/// processing interface.
#[derive(Debug, Clone)]
pub struct HighlightProcessor {
    highlighter: Highlighter,
}

impl HighlightProcessor {
    /// Wrap an existing highlighter.
    pub fn new(highlighter: Highlighter) -> Self {
        Self { highlighter }
    }

    /// Build a processor starting in the given mode.
    pub fn with_mode(mode: Mode) -> Result<Self, regex::Error> {
        Ok(Self::new(Highlighter::with_mode(mode)?))
    }

    /// The wrapped highlighter.
    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    /// Mutable access to the wrapped highlighter (e.g. to switch modes).
    pub fn highlighter_mut(&mut self) -> &mut Highlighter {
        &mut self.highlighter
    }
}

impl DocumentProcessor for HighlightProcessor {
    type Error = Infallible;

    fn process(&mut self, session: &DocumentSession) -> Result<Vec<ProcessingEdit>, Self::Error> {
        let spans = self.highlighter.compute_highlighting(&session.full_text());
        Ok(vec![ProcessingEdit::ReplaceSpans { spans }])
    }
}
