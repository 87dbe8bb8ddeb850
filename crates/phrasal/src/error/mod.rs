//! # Error Types
//!
//! The two disjoint error classes of the parser.
//!
//! ## Overview
//!
//! - **Programmer errors** ([`ParserError`], and
//!   [`GrammarError`](crate::grammar::GrammarError) at build time) are returned
//!   as `Err` and never recorded as diagnostics.
//! - **Input errors** ([`BrokenContent`]) never abort a parse. Each rejected
//!   phrase is recorded once, with its position, its text, a
//!   [`ParseErrorReason`] and the trail of rule contexts that were tried.
//!
//! ## Usage
//!
//! ```rust
//! use phrasal::error::{Severity, has_fatal};
//! use phrasal::grammar::{DefinitionPart, GrammarBuilder};
//!
//! let grammar = GrammarBuilder::new()
//!     .top_level([DefinitionPart::rules("items", ["Item"]).optional()])
//!     .rule("Item", [DefinitionPart::keyword("*")])
//!     .build()?;
//!
//! let output = phrasal::parse(&grammar, "* € *");
//! assert_eq!(output.broken_content.len(), 1);
//! assert_eq!(output.broken_content[0].severity(), Severity::Advisory);
//! assert!(!has_fatal(&output.broken_content));
//! # Ok::<(), phrasal::grammar::GrammarError>(())
//! ```

pub mod diagnostics;

use crate::syntax::Position;
use compact_str::CompactString;
use smallvec::SmallVec;
use std::fmt;

/// Misuse of a [`Parser`](crate::parser::Parser) instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParserError {
    #[error("Parsing not started yet")]
    NotStarted,

    #[error("Parsing not finished yet")]
    NotFinished,

    #[error("A parser instance can only run once, create a new one instead")]
    AlreadyUsed,
}

/// A rule instance and the last part it recorded
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsePartRef {
    /// Rule name
    pub rule: CompactString,
    /// Index of the last recorded part, 0 when nothing was recorded yet
    pub part: usize,
}

impl ParsePartRef {
    #[must_use]
    pub fn new(rule: impl Into<CompactString>, part: usize) -> Self {
        Self {
            rule: rule.into(),
            part,
        }
    }
}

impl fmt::Display for ParsePartRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.rule, self.part)
    }
}

/// Why a phrase was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum ParseErrorReason {
    /// A character that is neither whitespace nor part of any class
    #[error("unknown character")]
    UnknownCharacter,

    /// A rule lost control before all its required parts were matched
    #[error("unfinished rule {0}")]
    UnfinishedRule(ParsePartRef),

    /// No rule on the active chain could take the phrase
    #[error("unexpected phrase for {0}")]
    UnexpectedPhrase(ParsePartRef),
}

impl ParseErrorReason {
    /// The implicated rule instance, if any
    #[must_use]
    pub const fn part_ref(&self) -> Option<&ParsePartRef> {
        match self {
            Self::UnknownCharacter => None,
            Self::UnfinishedRule(part) | Self::UnexpectedPhrase(part) => Some(part),
        }
    }

    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::UnknownCharacter => Severity::Advisory,
            Self::UnfinishedRule(_) | Self::UnexpectedPhrase(_) => Severity::Fatal,
        }
    }
}

/// How downstream processing should treat a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// The rest of the parse is unaffected
    Advisory,
    /// The parse tree does not reflect the input faithfully
    Fatal,
}

/// A recorded, non-fatal parse failure
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BrokenContent {
    pub position: Position,
    /// The literal offending text
    pub content: CompactString,
    pub reason: ParseErrorReason,
    /// Rule contexts visited while trying to place the phrase, innermost
    /// first. Empty for unknown characters.
    pub trail: SmallVec<[ParsePartRef; 4]>,
}

impl BrokenContent {
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.reason.severity()
    }

    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self.severity(), Severity::Fatal)
    }
}

impl fmt::Display for BrokenContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {:?}", self.position, self.reason, self.content.as_str())
    }
}

/// Whether any entry should stop downstream processing
#[must_use]
pub fn has_fatal(entries: &[BrokenContent]) -> bool {
    entries.iter().any(BrokenContent::is_fatal)
}
