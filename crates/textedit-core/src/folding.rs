//! Structural paragraph folding.
//!
//! A fold hides the paragraphs that structurally belong to a header paragraph
//! (the rest of a heading's section, the rest of a list, the rest of a plain
//! text block), appends the fold marker to the header, and keeps the hidden
//! text so the buffer can be restored byte for byte on expand.
//!
//! The engine never owns the buffer it operates on; every operation borrows
//! one. One engine instance tracks the fold state of exactly one document.
//!
//! Hidden text does not exist in the buffer while folded, so it cannot be
//! edited. Edits to the *visible* part of the document shift paragraph
//! indices, and the engine remaps its own records after every fold/expand;
//! for edits made directly by the host, see [`FoldEngine::apply_line_delta`]
//! and [`FoldEngine::clamp_to_paragraph_count`] (driven automatically by
//! [`DocumentSession`](crate::DocumentSession)).

use crate::buffer::TextBuffer;
use crate::error::{BufferError, FoldError};
use std::collections::{BTreeMap, BTreeSet};

/// Literal appended to a folded header paragraph.
pub const FOLD_MARKER: &str = " [...]";

/// Inclusive paragraph range computed for a fold trigger.
///
/// `start` is the header paragraph; `start + 1 ..= end` is the range that
/// folding would hide. `end == start` means there is nothing to hide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoldRange {
    /// The header paragraph the trigger landed on.
    pub start: usize,
    /// The last paragraph belonging to the header (inclusive).
    pub end: usize,
}

impl FoldRange {
    /// Whether folding this range would hide at least one paragraph.
    pub fn hides_anything(&self) -> bool {
        self.end > self.start
    }

    /// Number of paragraphs the fold would hide.
    pub fn hidden_count(&self) -> usize {
        self.end - self.start
    }
}

/// Compute the fold range owned by a header paragraph.
///
/// Classification is by the trimmed text of `start`:
///
/// - **Heading** (`#` prefix): absorbs forward until a heading of the same or
///   a shallower level (fewer or equally many `#`); deeper headings and
///   non-headings are absorbed.
/// - **List item** (`-`/`*`/`+` or `N.` prefix followed by whitespace):
///   absorbs consecutive list items; the first blank or non-list paragraph
///   ends the range.
/// - **Anything else**: absorbs until a blank or structural paragraph
///   (heading, list item, `>` quote); when that absorbs nothing, the
///   immediately following paragraph (if any) is included so a plain-text
///   fold always hides at least one line.
pub fn compute_range(buffer: &TextBuffer, start: usize) -> Result<FoldRange, BufferError> {
    let count = buffer.paragraph_count();
    let header = buffer.paragraph_text(start)?;
    let header = header.trim();
    let mut end = start;

    if header.starts_with('#') {
        let level = heading_level(header);
        for i in start + 1..count {
            let text = buffer.paragraph_text(i)?;
            let text = text.trim();
            if text.starts_with('#') && heading_level(text) <= level {
                break;
            }
            end = i;
        }
    } else if is_list_item(header) {
        for i in start + 1..count {
            let text = buffer.paragraph_text(i)?;
            if !is_list_item(text.trim()) {
                break;
            }
            end = i;
        }
    } else {
        for i in start + 1..count {
            let text = buffer.paragraph_text(i)?;
            let text = text.trim();
            if text.is_empty() || is_structural(text) {
                break;
            }
            end = i;
        }
        if end == start && start + 1 < count {
            end = start + 1;
        }
    }

    Ok(FoldRange { start, end })
}

fn heading_level(text: &str) -> usize {
    text.chars().take_while(|&c| c == '#').count()
}

fn is_list_item(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some('-' | '*' | '+') => chars.next().is_some_and(char::is_whitespace),
        Some(c) if c.is_ascii_digit() => {
            let rest = text.trim_start_matches(|c: char| c.is_ascii_digit());
            rest.strip_prefix('.')
                .is_some_and(|after| after.starts_with(char::is_whitespace))
        }
        _ => false,
    }
}

fn is_structural(text: &str) -> bool {
    text.starts_with('#') || text.starts_with('>') || is_list_item(text)
}

/// Per-document fold state and the fold/expand operations over it.
///
/// The folded flag and the saved hidden text are tracked separately; a
/// paragraph is consistently folded exactly when it appears in both, its
/// header carries the fold marker, and the hidden paragraphs are absent from
/// the buffer. Operations that detect a disagreement surface
/// [`FoldError::InconsistentFoldState`] without mutating anything.
#[derive(Debug, Clone, Default)]
pub struct FoldEngine {
    folded: BTreeSet<usize>,
    saved: BTreeMap<usize, String>,
}

impl FoldEngine {
    /// Create an engine with no folds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a paragraph is currently folded.
    pub fn is_folded(&self, paragraph: usize) -> bool {
        self.folded.contains(&paragraph)
    }

    /// Snapshot of the folded header indices.
    ///
    /// Mutating the returned set does not affect the engine.
    pub fn folded_paragraphs(&self) -> BTreeSet<usize> {
        self.folded.clone()
    }

    /// Fold the range owned by `paragraph`.
    ///
    /// Returns `Ok(true)` when the buffer changed. Out-of-bounds triggers,
    /// already-folded headers, empty ranges, empty header text, and ranges
    /// that would swallow another folded header are all no-ops
    /// (`Ok(false)`).
    pub fn fold(&mut self, buffer: &mut TextBuffer, paragraph: usize) -> Result<bool, FoldError> {
        let count = buffer.paragraph_count();
        if paragraph >= count || self.folded.contains(&paragraph) {
            return Ok(false);
        }

        let range = compute_range(buffer, paragraph)?;
        if !range.hides_anything() {
            return Ok(false);
        }

        let header_text = buffer.paragraph_text(paragraph)?;
        if header_text.is_empty() {
            return Ok(false);
        }

        if self
            .folded
            .range(range.start + 1..=range.end)
            .next()
            .is_some()
        {
            tracing::debug!(
                paragraph,
                end = range.end,
                "fold rejected: range contains a folded header"
            );
            return Ok(false);
        }

        let mut saved = String::new();
        for i in range.start + 1..=range.end {
            if i > range.start + 1 {
                saved.push('\n');
            }
            saved.push_str(&buffer.paragraph_text(i)?);
        }

        let hidden_start = buffer.absolute_offset(range.start + 1, 0)?;
        let (del_start, del_end) = if range.end + 1 < count {
            (hidden_start, buffer.absolute_offset(range.end + 1, 0)?)
        } else {
            // The range reaches the last paragraph: consume the separator
            // before it instead of a (nonexistent) trailing one, so the
            // deleted text is always `saved` plus exactly one newline.
            (hidden_start - 1, buffer.len())
        };

        let deleted = buffer.text_range(del_start, del_end)?;
        buffer.delete_text(del_start, del_end)?;

        let marker_at = buffer.absolute_offset(range.start, header_text.chars().count())?;
        if let Err(err) = buffer.insert_text(marker_at, FOLD_MARKER) {
            let _ = buffer.insert_text(del_start, &deleted);
            tracing::warn!(paragraph, %err, "fold rolled back: marker insertion failed");
            return Err(err.into());
        }

        self.saved.insert(paragraph, saved);
        self.folded.insert(paragraph);
        self.shift_records_from(range.end + 1, -(range.hidden_count() as isize));
        Ok(true)
    }

    /// Expand a folded paragraph, restoring its hidden text.
    ///
    /// Returns `Ok(false)` when `paragraph` is not folded. The last
    /// occurrence of the fold marker in the header is the one removed, so a
    /// header that legitimately contains the marker substring elsewhere
    /// survives intact.
    pub fn expand(&mut self, buffer: &mut TextBuffer, paragraph: usize) -> Result<bool, FoldError> {
        if !self.folded.contains(&paragraph) {
            return Ok(false);
        }
        let Some(saved) = self.saved.get(&paragraph) else {
            return Err(FoldError::InconsistentFoldState {
                paragraph,
                detail: "saved content is missing",
            });
        };
        if paragraph >= buffer.paragraph_count() {
            return Err(FoldError::InconsistentFoldState {
                paragraph,
                detail: "header paragraph no longer exists",
            });
        }

        let header_text = buffer.paragraph_text(paragraph)?;
        let Some(marker_byte) = header_text.rfind(FOLD_MARKER) else {
            return Err(FoldError::InconsistentFoldState {
                paragraph,
                detail: "fold marker not found in header",
            });
        };

        let restore = format!("\n{saved}");
        let marker_col = header_text[..marker_byte].chars().count();
        let marker_len = FOLD_MARKER.chars().count();
        let marker_start = buffer.absolute_offset(paragraph, marker_col)?;
        buffer.delete_text(marker_start, marker_start + marker_len)?;

        let stripped_len = header_text.chars().count() - marker_len;
        let insert_at = buffer.absolute_offset(paragraph, stripped_len)?;
        if let Err(err) = buffer.insert_text(insert_at, &restore) {
            let _ = buffer.insert_text(marker_start, FOLD_MARKER);
            tracing::warn!(paragraph, %err, "expand rolled back: content insertion failed");
            return Err(err.into());
        }

        let restored_lines = restore.matches('\n').count();
        self.folded.remove(&paragraph);
        self.saved.remove(&paragraph);
        self.shift_records_from(paragraph + 1, restored_lines as isize);
        Ok(true)
    }

    /// Fold `paragraph` if visible, expand it if folded.
    pub fn toggle(&mut self, buffer: &mut TextBuffer, paragraph: usize) -> Result<bool, FoldError> {
        if self.is_folded(paragraph) {
            self.expand(buffer, paragraph)
        } else {
            self.fold(buffer, paragraph)
        }
    }

    /// Expand every folded paragraph, leaving the folded set empty.
    ///
    /// Safe to call with no folds. A paragraph that fails to expand has its
    /// record dropped anyway (and its hidden text lost); the first such error
    /// is returned after the sweep finishes.
    pub fn clear_all_folding(&mut self, buffer: &mut TextBuffer) -> Result<(), FoldError> {
        let mut first_error = None;
        for paragraph in self.folded.iter().copied().rev().collect::<Vec<_>>() {
            if let Err(err) = self.expand(buffer, paragraph) {
                tracing::warn!(paragraph, %err, "dropping fold record that failed to expand");
                self.folded.remove(&paragraph);
                self.saved.remove(&paragraph);
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Shift fold records after an external edit changed the line count.
    ///
    /// `edit_line` is the first paragraph index affected by the edit;
    /// `line_delta` is the net change in paragraph count. Records at or after
    /// `edit_line` move by `line_delta`.
    pub fn apply_line_delta(&mut self, edit_line: usize, line_delta: isize) {
        self.shift_records_from(edit_line, line_delta);
    }

    /// Drop records whose header index fell outside the buffer.
    pub fn clamp_to_paragraph_count(&mut self, paragraph_count: usize) {
        for paragraph in self
            .folded
            .iter()
            .copied()
            .filter(|&i| i >= paragraph_count)
            .collect::<Vec<_>>()
        {
            tracing::warn!(paragraph, "dropping fold record past end of buffer");
            self.folded.remove(&paragraph);
            self.saved.remove(&paragraph);
        }
    }

    /// Drop the record for one paragraph without touching the buffer.
    ///
    /// For hosts reconciling after a destructive external edit removed a
    /// folded header. Returns whether a record existed.
    pub fn discard(&mut self, paragraph: usize) -> bool {
        let existed = self.folded.remove(&paragraph);
        self.saved.remove(&paragraph);
        existed
    }

    fn shift_records_from(&mut self, from: usize, delta: isize) {
        if delta == 0 {
            return;
        }
        let mut moved = Vec::new();
        for index in self
            .folded
            .iter()
            .copied()
            .filter(|&i| i >= from)
            .collect::<Vec<_>>()
        {
            self.folded.remove(&index);
            moved.push((index, self.saved.remove(&index)));
        }
        for (index, saved) in moved {
            let shifted = (index as isize + delta).max(0) as usize;
            self.folded.insert(shifted);
            if let Some(saved) = saved {
                self.saved.insert(shifted, saved);
            }
        }
    }
}
