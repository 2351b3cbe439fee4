//! Ordered pattern tables for the language modes.
//!
//! Each table is a list of `(label, pattern)` pairs whose order *is* the
//! precedence: when two rules match at the same position, the one declared
//! first wins. The tables are fixed; they compile once when a
//! [`Highlighter`](crate::Highlighter) is built.
//!
//! All patterns compile in multi-line mode, so `^`/`$` anchor at line
//! boundaries. Fenced code blocks and block comments use `[\s\S]*?` and
//! therefore run across line terminators.

use regex::{Regex, RegexBuilder};
use textedit_core::StyleLabel;

/// A single highlighting rule: a label and the pattern that produces it.
#[derive(Debug, Clone)]
pub(crate) struct Rule {
    pub(crate) label: StyleLabel,
    pub(crate) regex: Regex,
}

/// The ordered rule list for one mode.
#[derive(Debug, Clone)]
pub(crate) struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    fn compile(table: &[(StyleLabel, &str)]) -> Result<Self, regex::Error> {
        let mut rules = Vec::with_capacity(table.len());
        for &(label, pattern) in table {
            rules.push(Rule {
                label,
                regex: RegexBuilder::new(pattern).multi_line(true).build()?,
            });
        }
        Ok(Self { rules })
    }

    pub(crate) fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub(crate) fn markdown() -> Result<Self, regex::Error> {
        Self::compile(MARKDOWN)
    }

    pub(crate) fn java() -> Result<Self, regex::Error> {
        Self::compile(JAVA)
    }

    pub(crate) fn go() -> Result<Self, regex::Error> {
        Self::compile(GO)
    }

    pub(crate) fn cpp() -> Result<Self, regex::Error> {
        Self::compile(CPP)
    }

    pub(crate) fn haskell() -> Result<Self, regex::Error> {
        Self::compile(HASKELL)
    }

    pub(crate) fn plain() -> Result<Self, regex::Error> {
        Self::compile(&[])
    }
}

const MARKDOWN: &[(StyleLabel, &str)] = &[
    (StyleLabel::Heading1, r"^#\s+.*$"),
    (StyleLabel::Heading2, r"^##\s+.*$"),
    (StyleLabel::Heading3, r"^###\s+.*$"),
    (StyleLabel::Heading4, r"^#{4,6}\s+.*$"),
    (StyleLabel::Bold, r"\*\*[^*]+\*\*"),
    (StyleLabel::Italic, r"\*[^*]+\*"),
    (StyleLabel::Code, r"`[^`]+`"),
    (StyleLabel::CodeBlock, r"```[\s\S]*?```"),
    (StyleLabel::Quote, r"^>.*$"),
    (StyleLabel::Link, r"\[[^\]]*\]\([^)]*\)"),
    (StyleLabel::Image, r"!\[[^\]]*\]\([^)]*\)"),
    (StyleLabel::List, r"^\s*[*+-]\s+.*$"),
    (StyleLabel::NumList, r"^\s*\d+\.\s+.*$"),
    (StyleLabel::Strikethrough, r"~~[^~]+~~"),
    (StyleLabel::HorizontalRule, r"^[-*_]{3,}$"),
];

const JAVA: &[(StyleLabel, &str)] = &[
    (
        StyleLabel::Keyword,
        r"\b(abstract|assert|boolean|break|byte|case|catch|char|class|const|continue|default|do|double|else|enum|extends|final|finally|float|for|goto|if|implements|import|instanceof|int|interface|long|native|new|package|private|protected|public|return|short|static|strictfp|super|switch|synchronized|this|throw|throws|transient|try|void|volatile|while)\b",
    ),
    (StyleLabel::String, r#""([^"\\]|\\.)*""#),
    (StyleLabel::Comment, r"//[^\r\n]*|/\*[\s\S]*?\*/"),
    (StyleLabel::Number, r"\b\d+(\.\d+)?[fFdDlL]?\b"),
];

const GO: &[(StyleLabel, &str)] = &[
    (
        StyleLabel::Keyword,
        r"\b(break|case|chan|const|continue|default|defer|else|fallthrough|for|func|go|goto|if|import|interface|map|package|range|return|select|struct|switch|type|var)\b",
    ),
    (StyleLabel::String, r#""([^"\\]|\\.)*"|`[^`]*`"#),
    (StyleLabel::Comment, r"//[^\r\n]*|/\*[\s\S]*?\*/"),
    (StyleLabel::Number, r"\b\d+(\.\d+)?\b"),
];

const CPP: &[(StyleLabel, &str)] = &[
    (
        StyleLabel::Keyword,
        r"\b(auto|break|case|char|const|continue|default|do|double|else|enum|extern|float|for|goto|if|inline|int|long|register|return|short|signed|sizeof|static|struct|switch|typedef|union|unsigned|void|volatile|while|class|namespace|template|typename|virtual|public|private|protected|using|try|catch|throw|new|delete|this|nullptr)\b",
    ),
    (StyleLabel::String, r#""([^"\\]|\\.)*"|'([^'\\]|\\.)*'"#),
    (StyleLabel::Comment, r"//[^\r\n]*|/\*[\s\S]*?\*/"),
    (StyleLabel::Number, r"\b\d+(\.\d+)?[fFlLuU]*\b"),
    (StyleLabel::Preprocessor, r"#[^\r\n]*"),
];

const HASKELL: &[(StyleLabel, &str)] = &[
    (
        StyleLabel::Keyword,
        r"\b(case|class|data|default|deriving|do|else|foreign|if|import|in|infix|infixl|infixr|instance|let|module|newtype|of|then|type|where|as|qualified|hiding)\b",
    ),
    (StyleLabel::String, r#""([^"\\]|\\.)*""#),
    (StyleLabel::Comment, r"--[^\r\n]*|\{-[\s\S]*?-\}"),
    (StyleLabel::Number, r"\b\d+(\.\d+)?\b"),
    (StyleLabel::Operator, r"[=><+\-*/&|!@#$%^&*()\[\]{}.,;:]"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tables_compile() {
        assert!(RuleSet::markdown().is_ok());
        assert!(RuleSet::java().is_ok());
        assert!(RuleSet::go().is_ok());
        assert!(RuleSet::cpp().is_ok());
        assert!(RuleSet::haskell().is_ok());
        assert!(RuleSet::plain().is_ok());
    }

    #[test]
    fn test_heading_patterns_anchor_per_level() {
        let rules = RuleSet::markdown().unwrap();
        let heading1 = &rules.rules()[0].regex;
        assert!(heading1.is_match("# title"));
        assert!(!heading1.is_match("## title"));
        assert!(!heading1.is_match("#title"));

        let heading4 = &rules.rules()[3].regex;
        assert!(heading4.is_match("#### title"));
        assert!(heading4.is_match("###### title"));
        assert!(!heading4.is_match("####### title"));
    }

    #[test]
    fn test_block_patterns_cross_lines() {
        let rules = RuleSet::markdown().unwrap();
        let codeblock = &rules.rules()[7].regex;
        assert!(codeblock.is_match("```\ncode\n```"));

        let rules = RuleSet::haskell().unwrap();
        let comment = &rules.rules()[2].regex;
        assert!(comment.is_match("{- spans\nlines -}"));
    }
}
