//! Definition parts: the vocabulary rules are written in
//!
//! A rule is an ordered sequence of [`DefinitionPart`]s. Seven kinds exist,
//! split in two layers:
//!
//! - [`SimplePart`]: `keyword`, `identifier`, `number`, `modifiers`, `text`.
//!   These match phrases directly and never recurse.
//! - [`RulesPart`] and [`PathsPart`]: references to other rules, and bounded
//!   sets of alternative simple-part sequences.
//!
//! Paths can only hold simple parts, so a path can never recurse into a
//! rule.

use crate::grammar::RuleId;
use compact_str::CompactString;
use smallvec::SmallVec;

/// One grammar-authored matching unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionPart {
    Simple(SimplePart),
    Rules(RulesPart),
    Paths(PathsPart),
}

/// The part kinds that match phrases without descending into other rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimplePart {
    /// A fixed, required phrase
    Keyword { phrase: CompactString },
    /// One word phrase, bound to `key`
    Identifier { key: CompactString },
    /// One number phrase, bound to `key`
    Number { key: CompactString },
    Modifiers(ModifiersPart),
    Text(TextPart),
}

/// An unordered set of literal phrases; each may appear at most once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifiersPart {
    pub phrases: SmallVec<[CompactString; 4]>,
    /// Only one of the phrases may appear
    pub singular: bool,
    pub optional: bool,
}

/// A verbatim span, delimited by a start phrase (or its first phrase) and an
/// end phrase.
///
/// The end phrase only closes the span once it lies entirely after the
/// opening phrase. With end phrase `"b"` and no start phrase, an opening
/// word `"ab"` leaves the span open until a later `"b"` arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPart {
    pub key: CompactString,
    /// `None` means the text starts at the first phrase offered to it
    pub start_phrase: Option<CompactString>,
    pub end_phrase: CompactString,
    /// Leave the end phrase out of the captured value and hand every one of
    /// its characters back to the parser
    pub exclude_end_phrase: bool,
    pub optional: bool,
}

/// References to candidate child rules, tried in declared order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulesPart {
    pub key: CompactString,
    pub(crate) names: SmallVec<[CompactString; 4]>,
    /// Filled in when the grammar is built
    pub(crate) resolved: SmallVec<[RuleId; 4]>,
    pub optional: bool,
    /// At most one child rule instance
    pub singular: bool,
    pub separator_phrase: Option<CompactString>,
    /// Repeated instances may also follow each other without the separator
    pub separator_optional: bool,
}

/// Alternative simple-part sequences evaluated side by side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathsPart {
    pub paths: Vec<Vec<SimplePart>>,
    pub optional: bool,
}

/// Anything that can sit in a matchable sequence
pub trait Optionality {
    /// Whether the sequence may skip this part
    fn is_optional(&self) -> bool;
}

impl Optionality for SimplePart {
    fn is_optional(&self) -> bool {
        match self {
            Self::Keyword { .. } | Self::Identifier { .. } | Self::Number { .. } => false,
            Self::Modifiers(part) => part.optional,
            Self::Text(part) => part.optional,
        }
    }
}

impl Optionality for DefinitionPart {
    fn is_optional(&self) -> bool {
        match self {
            Self::Simple(part) => part.is_optional(),
            Self::Rules(part) => part.optional,
            Self::Paths(part) => part.optional,
        }
    }
}

impl SimplePart {
    #[must_use]
    pub fn keyword(phrase: impl Into<CompactString>) -> Self {
        Self::Keyword {
            phrase: phrase.into(),
        }
    }

    #[must_use]
    pub fn identifier(key: impl Into<CompactString>) -> Self {
        Self::Identifier { key: key.into() }
    }

    #[must_use]
    pub fn number(key: impl Into<CompactString>) -> Self {
        Self::Number { key: key.into() }
    }

    /// The key external consumers read the matched value under
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Identifier { key } | Self::Number { key } => Some(key.as_str()),
            Self::Text(part) => Some(part.key.as_str()),
            Self::Keyword { .. } | Self::Modifiers(_) => None,
        }
    }

    /// Mark a modifiers or text part optional. Keywords, identifiers and
    /// numbers are always required, so they are returned unchanged.
    #[must_use]
    pub fn optional(mut self) -> Self {
        match &mut self {
            Self::Modifiers(part) => part.optional = true,
            Self::Text(part) => part.optional = true,
            Self::Keyword { .. } | Self::Identifier { .. } | Self::Number { .. } => {}
        }
        self
    }

    /// Short description used in diagnostics
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Keyword { phrase } => format!("\"{phrase}\""),
            Self::Identifier { key } => format!("'{key}' identifier"),
            Self::Number { key } => format!("'{key}' number"),
            Self::Modifiers(part) => {
                let phrases: Vec<String> =
                    part.phrases.iter().map(|p| format!("\"{p}\"")).collect();
                format!("one of [{}]", phrases.join(", "))
            }
            Self::Text(part) => match &part.start_phrase {
                Some(start) => format!("'{start}' ... '{}'", part.end_phrase),
                None => format!("text until '{}'", part.end_phrase),
            },
        }
    }
}

impl DefinitionPart {
    /// A fixed required phrase
    #[must_use]
    pub fn keyword(phrase: impl Into<CompactString>) -> Self {
        Self::Simple(SimplePart::Keyword {
            phrase: phrase.into(),
        })
    }

    #[must_use]
    pub fn identifier(key: impl Into<CompactString>) -> Self {
        Self::Simple(SimplePart::Identifier { key: key.into() })
    }

    #[must_use]
    pub fn number(key: impl Into<CompactString>) -> Self {
        Self::Simple(SimplePart::Number { key: key.into() })
    }

    #[must_use]
    pub fn modifiers<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CompactString>,
    {
        Self::Simple(SimplePart::Modifiers(ModifiersPart::new(phrases)))
    }

    /// A text span from `start_phrase` (or the first phrase) to `end_phrase`
    #[must_use]
    pub fn text(
        key: impl Into<CompactString>,
        start_phrase: Option<&str>,
        end_phrase: impl Into<CompactString>,
    ) -> Self {
        Self::Simple(SimplePart::Text(TextPart::new(key, start_phrase, end_phrase)))
    }

    #[must_use]
    pub fn rules<I, S>(key: impl Into<CompactString>, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CompactString>,
    {
        Self::Rules(RulesPart::new(key, rules))
    }

    #[must_use]
    pub fn paths<I>(paths: I) -> Self
    where
        I: IntoIterator<Item = Vec<SimplePart>>,
    {
        Self::Paths(PathsPart::new(paths))
    }

    /// Mark this part optional, where its kind allows it
    #[must_use]
    pub fn optional(self) -> Self {
        match self {
            Self::Simple(part) => Self::Simple(part.optional()),
            Self::Rules(part) => Self::Rules(part.optional()),
            Self::Paths(mut part) => {
                part.optional = true;
                Self::Paths(part)
            }
        }
    }

    /// The key external consumers read the matched value under
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Simple(part) => part.key(),
            Self::Rules(part) => Some(part.key.as_str()),
            Self::Paths(_) => None,
        }
    }

    /// The simple part, if this is one
    #[must_use]
    pub const fn as_simple(&self) -> Option<&SimplePart> {
        match self {
            Self::Simple(part) => Some(part),
            Self::Rules(_) | Self::Paths(_) => None,
        }
    }
}

impl From<SimplePart> for DefinitionPart {
    fn from(part: SimplePart) -> Self {
        Self::Simple(part)
    }
}

impl From<RulesPart> for DefinitionPart {
    fn from(part: RulesPart) -> Self {
        Self::Rules(part)
    }
}

impl From<PathsPart> for DefinitionPart {
    fn from(part: PathsPart) -> Self {
        Self::Paths(part)
    }
}

impl ModifiersPart {
    #[must_use]
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CompactString>,
    {
        Self {
            phrases: phrases.into_iter().map(Into::into).collect(),
            singular: false,
            optional: false,
        }
    }

    #[must_use]
    pub fn singular(mut self) -> Self {
        self.singular = true;
        self
    }

    #[must_use]
    pub fn contains(&self, phrase: &str) -> bool {
        self.phrases.iter().any(|p| p.as_str() == phrase)
    }
}

impl From<ModifiersPart> for SimplePart {
    fn from(part: ModifiersPart) -> Self {
        Self::Modifiers(part)
    }
}

impl From<ModifiersPart> for DefinitionPart {
    fn from(part: ModifiersPart) -> Self {
        Self::Simple(SimplePart::Modifiers(part))
    }
}

impl TextPart {
    #[must_use]
    pub fn new(
        key: impl Into<CompactString>,
        start_phrase: Option<&str>,
        end_phrase: impl Into<CompactString>,
    ) -> Self {
        Self {
            key: key.into(),
            start_phrase: start_phrase.map(CompactString::from),
            end_phrase: end_phrase.into(),
            exclude_end_phrase: false,
            optional: false,
        }
    }

    #[must_use]
    pub fn exclude_end_phrase(mut self) -> Self {
        self.exclude_end_phrase = true;
        self
    }
}

impl From<TextPart> for SimplePart {
    fn from(part: TextPart) -> Self {
        Self::Text(part)
    }
}

impl From<TextPart> for DefinitionPart {
    fn from(part: TextPart) -> Self {
        Self::Simple(SimplePart::Text(part))
    }
}

impl RulesPart {
    #[must_use]
    pub fn new<I, S>(key: impl Into<CompactString>, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CompactString>,
    {
        Self {
            key: key.into(),
            names: rules.into_iter().map(Into::into).collect(),
            resolved: SmallVec::new(),
            optional: false,
            singular: false,
            separator_phrase: None,
            separator_optional: false,
        }
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    #[must_use]
    pub fn singular(mut self) -> Self {
        self.singular = true;
        self
    }

    #[must_use]
    pub fn separator(mut self, phrase: impl Into<CompactString>) -> Self {
        self.separator_phrase = Some(phrase.into());
        self
    }

    #[must_use]
    pub fn separator_optional(mut self) -> Self {
        self.separator_optional = true;
        self
    }

    /// Names of the candidate rules, in the order they are tried
    #[must_use]
    pub fn rule_names(&self) -> &[CompactString] {
        &self.names
    }

    /// Resolved candidate rules. Empty until the grammar is built.
    #[must_use]
    pub fn candidates(&self) -> &[RuleId] {
        &self.resolved
    }
}

impl PathsPart {
    #[must_use]
    pub fn new<I>(paths: I) -> Self
    where
        I: IntoIterator<Item = Vec<SimplePart>>,
    {
        Self {
            paths: paths.into_iter().collect(),
            optional: false,
        }
    }

    #[must_use]
    pub fn describe(&self) -> String {
        let paths: Vec<String> = self
            .paths
            .iter()
            .map(|path| {
                path.iter()
                    .map(SimplePart::describe)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        format!("either of the following: {}", paths.join(" , "))
    }
}
