//! Paragraph-addressable text buffer.
//!
//! The buffer stores the document as a `ropey::Rope` and exposes the
//! paragraph/offset contract the rest of the kernel is written against:
//! paragraphs are single lines (no embedded terminator), the absolute offset
//! space is the LF-joined concatenation of all paragraphs, and every public
//! offset is a **character** offset.
//!
//! Text is normalized to LF on the way in; the dominant line ending of the
//! source text is detected on load and kept so hosts can restore it when
//! saving (see [`LineEnding`]).

use crate::error::BufferError;
use ropey::Rope;

/// The preferred newline sequence for saving a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// Unix-style LF (`'\n'`).
    #[default]
    Lf,
    /// Windows-style CRLF (`"\r\n"`).
    Crlf,
}

impl LineEnding {
    /// Detect the dominant line ending of a source text.
    ///
    /// Any CRLF occurrence makes the whole document CRLF; everything else is
    /// treated as LF.
    pub fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            Self::Crlf
        } else {
            Self::Lf
        }
    }

    /// Convert LF-normalized text back to this line ending for saving.
    pub fn restore(self, text: &str) -> String {
        match self {
            Self::Lf => text.to_string(),
            Self::Crlf => text.replace('\n', "\r\n"),
        }
    }
}

/// An ordered sequence of paragraphs with char-offset addressing.
///
/// An empty buffer has exactly one (empty) paragraph, and a trailing `'\n'`
/// implies a trailing empty paragraph — the same line semantics the rope
/// itself uses.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    rope: Rope,
    line_ending: LineEnding,
}

impl TextBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a buffer from source text, normalizing CRLF to LF.
    pub fn from_text(text: &str) -> Self {
        let line_ending = LineEnding::detect(text);
        let normalized = match line_ending {
            LineEnding::Lf => Rope::from_str(text),
            LineEnding::Crlf => Rope::from_str(&text.replace("\r\n", "\n")),
        };
        Self {
            rope: normalized,
            line_ending,
        }
    }

    /// The line ending detected when the buffer was created.
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Total number of paragraphs.
    pub fn paragraph_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Text of one paragraph, without its line terminator.
    pub fn paragraph_text(&self, index: usize) -> Result<String, BufferError> {
        if index >= self.rope.len_lines() {
            return Err(BufferError::OutOfRange {
                index,
                count: self.rope.len_lines(),
            });
        }
        let mut text = self.rope.line(index).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        Ok(text)
    }

    /// Char length of one paragraph, without its line terminator.
    pub fn paragraph_len(&self, index: usize) -> Result<usize, BufferError> {
        if index >= self.rope.len_lines() {
            return Err(BufferError::OutOfRange {
                index,
                count: self.rope.len_lines(),
            });
        }
        let start = self.rope.line_to_char(index);
        let len = if index + 1 < self.rope.len_lines() {
            self.rope.line_to_char(index + 1) - start - 1
        } else {
            self.rope.len_chars() - start
        };
        Ok(len)
    }

    /// Absolute char offset of `(paragraph, column)`.
    ///
    /// The column is clamped to the paragraph length; host cursors routinely
    /// sit past end-of-line.
    pub fn absolute_offset(&self, paragraph: usize, column: usize) -> Result<usize, BufferError> {
        let len = self.paragraph_len(paragraph)?;
        Ok(self.rope.line_to_char(paragraph) + column.min(len))
    }

    /// `(paragraph, column)` of an absolute char offset.
    pub fn position_of(&self, offset: usize) -> Result<(usize, usize), BufferError> {
        if offset > self.rope.len_chars() {
            return Err(BufferError::InvalidRange {
                start: offset,
                end: offset,
                len: self.rope.len_chars(),
            });
        }
        let paragraph = self.rope.char_to_line(offset);
        let column = offset - self.rope.line_to_char(paragraph);
        Ok((paragraph, column))
    }

    /// Total char length of the document.
    pub fn len(&self) -> usize {
        self.rope.len_chars()
    }

    /// Whether the document is empty.
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// The whole document as one LF-joined string.
    pub fn full_text(&self) -> String {
        self.rope.to_string()
    }

    /// The text in `[start, end)`.
    pub fn text_range(&self, start: usize, end: usize) -> Result<String, BufferError> {
        self.check_range(start, end)?;
        Ok(self.rope.slice(start..end).to_string())
    }

    /// Insert text at an absolute char offset.
    ///
    /// Inserted text is LF-normalized, so the char count of what lands in the
    /// buffer may be smaller than `text.chars().count()` for CRLF input.
    pub fn insert_text(&mut self, offset: usize, text: &str) -> Result<(), BufferError> {
        if offset > self.rope.len_chars() {
            return Err(BufferError::InvalidRange {
                start: offset,
                end: offset,
                len: self.rope.len_chars(),
            });
        }
        if text.contains("\r\n") {
            self.rope.insert(offset, &text.replace("\r\n", "\n"));
        } else {
            self.rope.insert(offset, text);
        }
        Ok(())
    }

    /// Delete the text in `[start, end)`.
    pub fn delete_text(&mut self, start: usize, end: usize) -> Result<(), BufferError> {
        self.check_range(start, end)?;
        if start < end {
            self.rope.remove(start..end);
        }
        Ok(())
    }

    fn check_range(&self, start: usize, end: usize) -> Result<(), BufferError> {
        if start > end || end > self.rope.len_chars() {
            return Err(BufferError::InvalidRange {
                start,
                end,
                len: self.rope.len_chars(),
            });
        }
        Ok(())
    }
}
