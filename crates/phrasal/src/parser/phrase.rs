use crate::syntax::Position;
use compact_str::CompactString;
use std::fmt;

/// How the characters of a phrase were classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PhraseKind {
    /// Starts with a word character, continues with word or number start characters
    Word,
    /// Number characters only
    Number,
    /// Valid characters that are neither words nor numbers
    Chars,
}

impl fmt::Display for PhraseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Word => "word",
            Self::Number => "number",
            Self::Chars => "chars",
        })
    }
}

/// A run of characters offered to the matchers as one unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    pub text: CompactString,
    pub kind: PhraseKind,
    pub position: Position,
}

impl Phrase {
    #[must_use]
    pub fn new(text: impl Into<CompactString>, kind: PhraseKind, position: Position) -> Self {
        Self {
            text: text.into(),
            kind,
            position,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}
