//! Character classes that decide how characters group into phrases
//!
//! Words and numbers each have a "start" set and an optional "continue" set.
//! When the continue set is not configured it falls back to the start set,
//! so an identifier class can allow interior hyphens without allowing a
//! leading one:
//!
//! ```rust
//! use phrasal::grammar::{CharClasses, CharRange};
//!
//! let mut word_continue = CharClasses::default().word_start().clone();
//! word_continue.push(CharRange::single('-'));
//!
//! let classes = CharClasses::default().with_word_continue(word_continue);
//! assert!(!classes.starts_word('-'));
//! assert!(classes.continues_word('-'));
//! ```

use crate::parser::PhraseKind;
use smallvec::{SmallVec, smallvec};
use std::fmt;

/// An inclusive range of characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharRange {
    pub start: char,
    pub end: char,
}

impl CharRange {
    /// Create a new inclusive range
    #[must_use]
    pub const fn new(start: char, end: char) -> Self {
        Self { start, end }
    }

    /// A range holding exactly one character
    #[must_use]
    pub const fn single(ch: char) -> Self {
        Self { start: ch, end: ch }
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        self.start <= ch && ch <= self.end
    }

    /// A range whose start lies after its end matches nothing
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }
}

impl From<char> for CharRange {
    fn from(ch: char) -> Self {
        Self::single(ch)
    }
}

impl From<(char, char)> for CharRange {
    fn from((start, end): (char, char)) -> Self {
        Self::new(start, end)
    }
}

impl fmt::Display for CharRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{:?}", self.start)
        } else {
            write!(f, "{:?}..={:?}", self.start, self.end)
        }
    }
}

/// A set of character ranges
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CharSet {
    ranges: SmallVec<[CharRange; 4]>,
}

impl CharSet {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// ASCII letters and the underscore
    #[must_use]
    pub fn word() -> Self {
        Self {
            ranges: smallvec![
                CharRange::new('A', 'Z'),
                CharRange::new('a', 'z'),
                CharRange::single('_'),
            ],
        }
    }

    /// ASCII digits
    #[must_use]
    pub fn digits() -> Self {
        Self {
            ranges: smallvec![CharRange::new('0', '9')],
        }
    }

    /// Printable ASCII without the space
    #[must_use]
    pub fn printable() -> Self {
        Self {
            ranges: smallvec![CharRange::new('!', '~')],
        }
    }

    /// Add a range to the set
    pub fn push(&mut self, range: impl Into<CharRange>) {
        self.ranges.push(range.into());
    }

    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        self.ranges.iter().any(|range| range.contains(ch))
    }

    #[must_use]
    pub fn ranges(&self) -> &[CharRange] {
        &self.ranges
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

impl<R: Into<CharRange>> FromIterator<R> for CharSet {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self {
            ranges: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// The configured character classes of a grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharClasses {
    word_start: CharSet,
    word_continue: Option<CharSet>,
    number_start: CharSet,
    number_continue: Option<CharSet>,
    valid: CharSet,
}

impl Default for CharClasses {
    fn default() -> Self {
        Self {
            word_start: CharSet::word(),
            word_continue: None,
            number_start: CharSet::digits(),
            number_continue: None,
            valid: CharSet::printable(),
        }
    }
}

impl CharClasses {
    #[must_use]
    pub fn with_word_start(mut self, set: CharSet) -> Self {
        self.word_start = set;
        self
    }

    #[must_use]
    pub fn with_word_continue(mut self, set: CharSet) -> Self {
        self.word_continue = Some(set);
        self
    }

    #[must_use]
    pub fn with_number_start(mut self, set: CharSet) -> Self {
        self.number_start = set;
        self
    }

    #[must_use]
    pub fn with_number_continue(mut self, set: CharSet) -> Self {
        self.number_continue = Some(set);
        self
    }

    #[must_use]
    pub fn with_valid(mut self, set: CharSet) -> Self {
        self.valid = set;
        self
    }

    #[must_use]
    pub const fn word_start(&self) -> &CharSet {
        &self.word_start
    }

    #[must_use]
    pub fn word_continue(&self) -> &CharSet {
        self.word_continue.as_ref().unwrap_or(&self.word_start)
    }

    #[must_use]
    pub const fn number_start(&self) -> &CharSet {
        &self.number_start
    }

    #[must_use]
    pub fn number_continue(&self) -> &CharSet {
        self.number_continue.as_ref().unwrap_or(&self.number_start)
    }

    #[must_use]
    pub const fn valid(&self) -> &CharSet {
        &self.valid
    }

    /// Every configured range, used for validation
    pub(crate) fn all_ranges(&self) -> impl Iterator<Item = &CharRange> {
        [
            Some(&self.word_start),
            self.word_continue.as_ref(),
            Some(&self.number_start),
            self.number_continue.as_ref(),
            Some(&self.valid),
        ]
        .into_iter()
        .flatten()
        .flat_map(CharSet::ranges)
    }

    #[must_use]
    pub fn starts_word(&self, ch: char) -> bool {
        self.word_start.contains(ch)
    }

    #[must_use]
    pub fn continues_word(&self, ch: char) -> bool {
        self.word_continue().contains(ch)
    }

    #[must_use]
    pub fn starts_number(&self, ch: char) -> bool {
        self.number_start.contains(ch)
    }

    #[must_use]
    pub fn continues_number(&self, ch: char) -> bool {
        self.number_continue().contains(ch)
    }

    /// A valid character that can start neither a word nor a number.
    ///
    /// These become one-character phrases of kind [`PhraseKind::Chars`].
    #[must_use]
    pub fn is_other_valid(&self, ch: char) -> bool {
        !self.starts_word(ch) && !self.starts_number(ch) && self.valid.contains(ch)
    }

    /// The kind of phrase `ch` opens, if it can open one at all
    #[must_use]
    pub fn starting_kind(&self, ch: char) -> Option<PhraseKind> {
        if self.starts_word(ch) {
            Some(PhraseKind::Word)
        } else if self.starts_number(ch) {
            Some(PhraseKind::Number)
        } else if self.valid.contains(ch) {
            Some(PhraseKind::Chars)
        } else {
            None
        }
    }

    /// Whether `ch` can be appended to an open phrase of `kind`.
    ///
    /// Characters that start a number may continue a word, never the other
    /// way around.
    #[must_use]
    pub fn continues(&self, kind: PhraseKind, ch: char) -> bool {
        match kind {
            PhraseKind::Word => self.continues_word(ch) || self.starts_number(ch),
            PhraseKind::Number => self.continues_number(ch),
            PhraseKind::Chars => self.is_other_valid(ch),
        }
    }
}
