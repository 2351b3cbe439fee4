#![warn(missing_docs)]
//! `textedit-core-highlight` - regex-table syntax highlighting for
//! `textedit-core`.
//!
//! One fixed, ordered pattern table per language mode, and a scanner that
//! walks the document finding, at each step, the leftmost position where any
//! rule matches; ties at the same position go to the rule declared first.
//! This is deliberately *not* longest-match: `**bold**` beats `*italic*`
//! at the same `*` only because bold is declared earlier.
//!
//! The output is a list of [`StyleSpan`]s that is contiguous, non-overlapping
//! and covers the whole text: a [`StyleLabel::Plain`] gap span is emitted
//! before every match and after the last one, zero-length gaps included, so
//! the spans strictly alternate plain/match. Offsets are char offsets,
//! matching the buffer addressing in `textedit-core`.
//!
//! # Example
//!
//! ```rust
//! use textedit_core::StyleLabel;
//! use textedit_core_highlight::{Highlighter, Mode};
//!
//! let highlighter = Highlighter::new().unwrap();
//! let spans = highlighter.compute_highlighting("**important**");
//!
//! let bold: Vec<_> = spans.iter().filter(|s| !s.is_empty()).collect();
//! assert_eq!(bold.len(), 1);
//! assert_eq!(bold[0].label, StyleLabel::Bold);
//! assert_eq!((bold[0].start, bold[0].len), (0, 13));
//! # assert_eq!(Mode::default(), Mode::Markdown);
//! ```

mod patterns;
mod processor;

pub use processor::HighlightProcessor;
pub use textedit_core::style::{StyleLabel, StyleSpan};

use patterns::RuleSet;

/// The active language grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Markdown document mode.
    #[default]
    Markdown,
    /// Java source mode.
    Java,
    /// Go source mode.
    Go,
    /// C/C++ source mode.
    Cpp,
    /// Haskell source mode.
    Haskell,
    /// No grammar; the whole text is one plain span.
    Plain,
}

impl Mode {
    /// All modes, in a fixed order (handy for exhaustive tests).
    pub const ALL: [Mode; 6] = [
        Mode::Markdown,
        Mode::Java,
        Mode::Go,
        Mode::Cpp,
        Mode::Haskell,
        Mode::Plain,
    ];
}

/// A mode-switching lexical highlighter.
///
/// Construction compiles every mode's table once; switching modes afterwards
/// is just a stored enum. [`Highlighter::compute_highlighting`] is pure and
/// reentrant: it reads `self` immutably and touches nothing else, so it may
/// run against a text snapshot on another thread.
#[derive(Debug, Clone)]
pub struct Highlighter {
    mode: Mode,
    markdown: RuleSet,
    java: RuleSet,
    go: RuleSet,
    cpp: RuleSet,
    haskell: RuleSet,
    plain: RuleSet,
}

impl Highlighter {
    /// Compile all pattern tables, starting in [`Mode::Markdown`].
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            mode: Mode::default(),
            markdown: RuleSet::markdown()?,
            java: RuleSet::java()?,
            go: RuleSet::go()?,
            cpp: RuleSet::cpp()?,
            haskell: RuleSet::haskell()?,
            plain: RuleSet::plain()?,
        })
    }

    /// Compile all pattern tables, starting in the given mode.
    pub fn with_mode(mode: Mode) -> Result<Self, regex::Error> {
        let mut highlighter = Self::new()?;
        highlighter.set_mode(mode);
        Ok(highlighter)
    }

    /// Switch the active mode.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// The active mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Classify `text` under the active mode.
    ///
    /// The returned spans are contiguous, non-overlapping, and their lengths
    /// sum to `text.chars().count()` exactly.
    pub fn compute_highlighting(&self, text: &str) -> Vec<StyleSpan> {
        let rules = match self.mode {
            Mode::Markdown => &self.markdown,
            Mode::Java => &self.java,
            Mode::Go => &self.go,
            Mode::Cpp => &self.cpp,
            Mode::Haskell => &self.haskell,
            Mode::Plain => &self.plain,
        };
        scan(text, rules)
    }
}

/// Walk `text` emitting alternating plain/match spans.
///
/// Each rule's next match is cached and re-searched only once the scan
/// position passes it; a rule that reports no further match is never searched
/// again. Matches are byte ranges from the regex engine; spans are emitted in
/// char offsets, converted incrementally.
fn scan(text: &str, rules: &RuleSet) -> Vec<StyleSpan> {
    let rules = rules.rules();
    let mut spans = Vec::new();
    let mut byte_pos = 0usize;
    let mut char_pos = 0usize;

    let mut pending: Vec<Option<(usize, usize)>> = rules
        .iter()
        .map(|rule| rule.regex.find(text).map(|m| (m.start(), m.end())))
        .collect();

    loop {
        let mut best: Option<(usize, usize, usize)> = None;
        for (idx, rule) in rules.iter().enumerate() {
            let entry = match pending[idx] {
                Some((start, _)) if start < byte_pos => {
                    let refreshed = rule
                        .regex
                        .find_at(text, byte_pos)
                        .map(|m| (m.start(), m.end()));
                    pending[idx] = refreshed;
                    refreshed
                }
                cached => cached,
            };
            if let Some((start, end)) = entry {
                if best.is_none_or(|(best_start, _, _)| start < best_start) {
                    best = Some((start, end, idx));
                }
            }
        }

        let Some((start, end, idx)) = best else {
            let rest = text[byte_pos..].chars().count();
            spans.push(StyleSpan::new(char_pos, rest, StyleLabel::Plain));
            break;
        };

        let gap = text[byte_pos..start].chars().count();
        spans.push(StyleSpan::new(char_pos, gap, StyleLabel::Plain));
        char_pos += gap;

        let matched = text[start..end].chars().count();
        debug_assert!(matched > 0, "pattern tables never produce empty matches");
        spans.push(StyleSpan::new(char_pos, matched, rules[idx].label));
        char_pos += matched;
        byte_pos = end;
    }

    spans
}
