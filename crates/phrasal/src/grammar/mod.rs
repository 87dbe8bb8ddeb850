//! # Grammar Module
//!
//! Declarative grammars for the phrase parser.
//!
//! ## Overview
//!
//! A [`Grammar`] is a set of named [`Rule`]s, each an ordered list of
//! [`DefinitionPart`]s, plus:
//!
//! - a distinguished top-level rule where parsing starts,
//! - a `global` reference list tried whenever normal matching fails (for
//!   content like comments that may appear almost anywhere),
//! - the [`CharClasses`] deciding how characters group into phrases.
//!
//! Rules reference each other by name. Names are resolved to [`RuleId`]s
//! when the grammar is built, so rules may be recursive and may be declared
//! in any order.
//!
//! ## Usage
//!
//! ```rust
//! use phrasal::grammar::{DefinitionPart, GrammarBuilder, RulesPart};
//!
//! let grammar = GrammarBuilder::new()
//!     .top_level([DefinitionPart::rules("children", ["Import"]).optional()])
//!     .rule("Import", [
//!         DefinitionPart::keyword("import"),
//!         DefinitionPart::identifier("name"),
//!     ])
//!     .build()?;
//!
//! assert!(grammar.rule_by_name("Import").is_some());
//! # Ok::<(), phrasal::grammar::GrammarError>(())
//! ```
//!
//! Candidate order inside a reference list matters: the first rule that
//! accepts a phrase wins, so a stricter rule has to be listed before a looser
//! one that would otherwise shadow it.

pub mod builder;
pub mod char_class;
pub mod part;
pub mod validate;

pub use builder::*;
pub use char_class::*;
pub use part::*;
pub use validate::*;

use compact_str::CompactString;
use hashbrown::HashMap;
use lasso::{RodeoReader, Spur};
use std::fmt;

/// Name of the rule parsing starts from
pub const TOP_LEVEL_RULE: &str = "TopLevel";

/// Dense index of a rule inside its [`Grammar`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleId(u32);

impl RuleId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// `None` once `index` no longer fits the id
    pub(crate) fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok().map(Self)
    }

    pub(crate) const TOP_LEVEL: Self = Self(0);
}

/// A named, ordered sequence of definition parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    name: CompactString,
    definition: Vec<DefinitionPart>,
}

impl Rule {
    #[must_use]
    pub fn new(name: impl Into<CompactString>, definition: Vec<DefinitionPart>) -> Self {
        Self {
            name: name.into(),
            definition,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn definition(&self) -> &[DefinitionPart] {
        &self.definition
    }

    pub(crate) fn definition_mut(&mut self) -> &mut [DefinitionPart] {
        &mut self.definition
    }
}

/// A validated grammar, ready to drive a [`Parser`](crate::parser::Parser)
pub struct Grammar {
    rules: Vec<Rule>,
    names: RodeoReader,
    by_name: HashMap<Spur, RuleId, ahash::RandomState>,
    top_level: RuleId,
    global: RulesPart,
    char_classes: CharClasses,
}

impl Grammar {
    #[must_use]
    pub fn rule(&self, id: RuleId) -> &Rule {
        &self.rules[id.index()]
    }

    /// Look up a rule id by name
    #[must_use]
    pub fn rule_id(&self, name: &str) -> Option<RuleId> {
        let key = self.names.get(name)?;
        self.by_name.get(&key).copied()
    }

    #[must_use]
    pub fn rule_by_name(&self, name: &str) -> Option<&Rule> {
        self.rule_id(name).map(|id| self.rule(id))
    }

    #[must_use]
    pub const fn top_level(&self) -> RuleId {
        self.top_level
    }

    /// The grammar-wide fallback reference list
    #[must_use]
    pub const fn global(&self) -> &RulesPart {
        &self.global
    }

    #[must_use]
    pub const fn char_classes(&self) -> &CharClasses {
        &self.char_classes
    }

    /// All rules, the top-level rule first
    pub fn rules(&self) -> impl Iterator<Item = (RuleId, &Rule)> {
        (0..).map(RuleId).zip(&self.rules)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("rules", &self.rules)
            .field("top_level", &self.top_level)
            .field("global", &self.global)
            .field("char_classes", &self.char_classes)
            .finish_non_exhaustive()
    }
}
