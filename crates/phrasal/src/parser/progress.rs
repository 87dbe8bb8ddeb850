//! Match progress recorded by a rule parser, one entry per matched part

use crate::parser::ParserId;
use crate::syntax::{Cursor, Position};
use compact_str::CompactString;
use smallvec::SmallVec;

/// Discriminant of a [`ParsedPart`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParsedPartKind {
    Simple,
    Rule,
    Paths,
}

/// Progress for one definition part of one rule instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedPart {
    Simple(ParsedSimplePart),
    Rule(ParsedRule),
    Paths(ParsedPaths),
}

impl ParsedPart {
    /// Index of the definition part this progress belongs to
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::Simple(part) => part.index,
            Self::Rule(part) => part.index,
            Self::Paths(part) => part.index,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ParsedPartKind {
        match self {
            Self::Simple(_) => ParsedPartKind::Simple,
            Self::Rule(_) => ParsedPartKind::Rule,
            Self::Paths(_) => ParsedPartKind::Paths,
        }
    }

    /// Whether no further phrase can extend this part.
    ///
    /// Rule and paths progress never finish on their own: another instance or
    /// path step can always be attempted.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        match self {
            Self::Simple(part) => part.finished,
            Self::Rule(_) | Self::Paths(_) => false,
        }
    }

    /// Whether every following character goes to this part verbatim
    #[must_use]
    pub const fn text_mode(&self) -> bool {
        match self {
            Self::Simple(part) => part.text_mode,
            Self::Paths(part) => part.text_mode,
            Self::Rule(_) => false,
        }
    }

    /// Accumulated phrase values of a simple part; empty for other kinds
    #[must_use]
    pub fn values(&self) -> &[CompactString] {
        match self {
            Self::Simple(part) => &part.values,
            Self::Rule(_) | Self::Paths(_) => &[],
        }
    }

    /// Span of a simple or paths part. Rule progress spans its child parser,
    /// see [`ParseTree::position`](crate::parser::ParseTree::position).
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::Simple(part) => Some(part.position),
            Self::Paths(part) => part.position(),
            Self::Rule(_) => None,
        }
    }

    #[must_use]
    pub const fn as_simple(&self) -> Option<&ParsedSimplePart> {
        match self {
            Self::Simple(part) => Some(part),
            Self::Rule(_) | Self::Paths(_) => None,
        }
    }

    #[must_use]
    pub const fn as_rule(&self) -> Option<&ParsedRule> {
        match self {
            Self::Rule(part) => Some(part),
            Self::Simple(_) | Self::Paths(_) => None,
        }
    }

    #[must_use]
    pub const fn as_paths(&self) -> Option<&ParsedPaths> {
        match self {
            Self::Paths(part) => Some(part),
            Self::Simple(_) | Self::Rule(_) => None,
        }
    }

    /// Take the excluded end phrase a text span closed on, together with
    /// the cursor it started at
    pub(crate) fn take_reoffer(&mut self) -> Option<(CompactString, Cursor)> {
        match self {
            Self::Simple(part) => part.take_reoffer(),
            Self::Paths(part) => part
                .progress
                .iter_mut()
                .filter_map(|path| path.parts.last_mut())
                .fold(None, |found, part| {
                    let taken = part.take_reoffer();
                    found.or(taken)
                }),
            Self::Rule(_) => None,
        }
    }
}

/// Progress of a keyword, identifier, number, modifiers or text part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSimplePart {
    pub(crate) index: usize,
    pub(crate) values: SmallVec<[CompactString; 1]>,
    pub(crate) position: Position,
    pub(crate) finished: bool,
    pub(crate) text_mode: bool,
    /// Length of the phrase a text span opened with
    pub(crate) opening_len: usize,
    /// Excluded end phrase still to be classified
    pub(crate) reoffer: Option<CompactString>,
}

impl ParsedSimplePart {
    pub(crate) fn new(index: usize, value: impl Into<CompactString>, position: Position) -> Self {
        let mut values = SmallVec::new();
        values.push(value.into());
        Self {
            index,
            values,
            position,
            finished: false,
            text_mode: false,
            opening_len: 0,
            reoffer: None,
        }
    }

    pub(crate) fn finished(mut self) -> Self {
        self.finished = true;
        self
    }

    pub(crate) fn in_text_mode(mut self) -> Self {
        self.text_mode = true;
        self.opening_len = self.value().len();
        self
    }

    fn take_reoffer(&mut self) -> Option<(CompactString, Cursor)> {
        let start = self.position.end;
        self.reoffer.take().map(|phrase| (phrase, start))
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// All accumulated values; modifiers collect one entry per phrase
    #[must_use]
    pub fn values(&self) -> &[CompactString] {
        &self.values
    }

    /// The first value, which is the whole value for every kind but modifiers
    #[must_use]
    pub fn value(&self) -> &str {
        self.values.first().map_or("", CompactString::as_str)
    }

    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub const fn text_mode(&self) -> bool {
        self.text_mode
    }
}

/// Progress of a rule-reference part: one matched child rule instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedRule {
    pub(crate) index: usize,
    pub(crate) child: ParserId,
    pub(crate) successful: ParserId,
    pub(crate) separator_satisfied: bool,
    pub(crate) separator_optional: bool,
}

impl ParsedRule {
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The direct child rule parser
    #[must_use]
    pub const fn child(&self) -> ParserId {
        self.child
    }

    /// The deepest rule parser that absorbed the phrase which created this
    /// instance
    #[must_use]
    pub const fn successful(&self) -> ParserId {
        self.successful
    }

    #[must_use]
    pub const fn separator_satisfied(&self) -> bool {
        self.separator_satisfied
    }
}

/// The simple parts matched so far along one alternative path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathProgress {
    pub(crate) path: usize,
    pub(crate) parts: SmallVec<[ParsedSimplePart; 2]>,
}

impl PathProgress {
    /// Index of the alternative inside its paths part
    #[must_use]
    pub const fn path(&self) -> usize {
        self.path
    }

    #[must_use]
    pub fn parts(&self) -> &[ParsedSimplePart] {
        &self.parts
    }
}

/// Progress of a paths part: the alternatives still alive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPaths {
    pub(crate) index: usize,
    pub(crate) progress: SmallVec<[PathProgress; 2]>,
    pub(crate) has_satisfied_path: bool,
    pub(crate) text_mode: bool,
}

impl ParsedPaths {
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn progress(&self) -> &[PathProgress] {
        &self.progress
    }

    /// Whether at least one alive path has all its required parts
    #[must_use]
    pub const fn has_satisfied_path(&self) -> bool {
        self.has_satisfied_path
    }

    /// Span of the first alive path
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        let parts = &self.progress.first()?.parts;
        let first = parts.first()?;
        let last = parts.last()?;
        Some(first.position.cover(last.position))
    }
}
