//! Paragraph-level edit operations.
//!
//! The transformations behind a host's formatting actions (wrap the selection
//! in `**`/`*`/`` ` ``, indent or unindent the selected lines), expressed as
//! buffer mutations. Selections are char-offset ranges; reversed selections
//! (`start > end`) are accepted and normalized. Each operation returns the
//! selection the host should show afterwards.

use crate::buffer::TextBuffer;
use crate::error::BufferError;
use std::ops::Range;

const INDENT: &str = "    ";

/// Wrap the selection in `open`/`close` markers.
///
/// With an empty selection the marker pair is inserted and the returned
/// (empty) selection is the caret position between the markers. Otherwise the
/// returned selection covers the wrapped text, exclusive of the markers.
pub fn apply_inline_wrap(
    buffer: &mut TextBuffer,
    open: &str,
    close: &str,
    selection: Range<usize>,
) -> Result<Range<usize>, BufferError> {
    let (start, end) = normalize(buffer, &selection);

    buffer.insert_text(end, close)?;
    buffer.insert_text(start, open)?;

    let open_len = open.chars().count();
    Ok(start + open_len..end + open_len)
}

/// Indent every line touched by the selection by four spaces.
pub fn indent_selection(
    buffer: &mut TextBuffer,
    selection: Range<usize>,
) -> Result<Range<usize>, BufferError> {
    let (start, end) = normalize(buffer, &selection);
    let (first_line, _) = buffer.position_of(start)?;
    let (last_line, _) = buffer.position_of(end)?;

    for line in (first_line..=last_line).rev() {
        let at = buffer.absolute_offset(line, 0)?;
        buffer.insert_text(at, INDENT)?;
    }

    let width = INDENT.len();
    let lines = last_line - first_line + 1;
    Ok(start + width..end + width * lines)
}

/// Remove one leading tab, or up to four leading spaces, from every line
/// touched by the selection.
pub fn unindent_selection(
    buffer: &mut TextBuffer,
    selection: Range<usize>,
) -> Result<Range<usize>, BufferError> {
    let (start, end) = normalize(buffer, &selection);
    let (first_line, first_col) = buffer.position_of(start)?;
    let (last_line, _) = buffer.position_of(end)?;

    let mut removed_total = 0;
    let mut removed_first = 0;
    for line in (first_line..=last_line).rev() {
        let removed = leading_indent_width(&buffer.paragraph_text(line)?);
        if removed > 0 {
            let at = buffer.absolute_offset(line, 0)?;
            buffer.delete_text(at, at + removed)?;
        }
        removed_total += removed;
        if line == first_line {
            removed_first = removed;
        }
    }

    let new_start = start - removed_first.min(first_col);
    let new_end = end.saturating_sub(removed_total).max(new_start);
    Ok(new_start..new_end)
}

fn normalize(buffer: &TextBuffer, selection: &Range<usize>) -> (usize, usize) {
    let len = buffer.len();
    let a = selection.start.min(len);
    let b = selection.end.min(len);
    (a.min(b), a.max(b))
}

fn leading_indent_width(text: &str) -> usize {
    if text.starts_with('\t') {
        return 1;
    }
    text.chars().take(4).take_while(|&c| c == ' ').count()
}
