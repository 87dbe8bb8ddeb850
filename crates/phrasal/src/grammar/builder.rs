use crate::grammar::{
    CharClasses, CharSet, DefinitionPart, Grammar, Rule, RuleId, RulesPart, TOP_LEVEL_RULE,
    validate_grammar,
};
use compact_str::CompactString;
use hashbrown::HashMap;
use lasso::{Rodeo, Spur};
use smallvec::SmallVec;

/// Key of the grammar-wide fallback reference list
pub const GLOBAL_KEY: &str = "global";

/// Builder for [`Grammar`].
///
/// Rules may be added in any order and may reference rules that are added
/// later; names are only resolved by [`build`](Self::build).
///
/// # Example
///
/// ```rust
/// use phrasal::grammar::{DefinitionPart, GrammarBuilder, RulesPart};
///
/// let grammar = GrammarBuilder::new()
///     .top_level([DefinitionPart::rules("statements", ["Statement"]).optional()])
///     .global(RulesPart::new("comments", ["Comment"]))
///     .rule("Statement", [
///         DefinitionPart::identifier("name"),
///         DefinitionPart::keyword(";"),
///     ])
///     .rule("Comment", [DefinitionPart::text("value", Some("#"), "\n")])
///     .build()
///     .expect("valid grammar");
///
/// assert_eq!(grammar.len(), 3);
/// ```
#[derive(Debug, Default)]
pub struct GrammarBuilder {
    top_level: Option<Vec<DefinitionPart>>,
    global: Option<RulesPart>,
    rules: Vec<Rule>,
    char_classes: CharClasses,
}

impl GrammarBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the parts of the rule parsing starts from
    #[must_use]
    pub fn top_level(mut self, parts: impl IntoIterator<Item = DefinitionPart>) -> Self {
        self.top_level = Some(parts.into_iter().collect());
        self
    }

    /// Set the reference list tried whenever a phrase fits nowhere else
    #[must_use]
    pub fn global(mut self, part: RulesPart) -> Self {
        self.global = Some(part);
        self
    }

    #[must_use]
    pub fn rule(
        mut self,
        name: impl Into<CompactString>,
        parts: impl IntoIterator<Item = DefinitionPart>,
    ) -> Self {
        self.rules.push(Rule::new(name, parts.into_iter().collect()));
        self
    }

    /// Replace all character classes at once
    #[must_use]
    pub fn char_classes(mut self, classes: CharClasses) -> Self {
        self.char_classes = classes;
        self
    }

    /// Characters that start (and by default continue) a word
    #[must_use]
    pub fn word_chars(mut self, set: CharSet) -> Self {
        self.char_classes = self.char_classes.with_word_start(set);
        self
    }

    #[must_use]
    pub fn word_continue_chars(mut self, set: CharSet) -> Self {
        self.char_classes = self.char_classes.with_word_continue(set);
        self
    }

    /// Characters that start (and by default continue) a number
    #[must_use]
    pub fn number_chars(mut self, set: CharSet) -> Self {
        self.char_classes = self.char_classes.with_number_start(set);
        self
    }

    #[must_use]
    pub fn number_continue_chars(mut self, set: CharSet) -> Self {
        self.char_classes = self.char_classes.with_number_continue(set);
        self
    }

    /// Characters that may form one-character phrases of their own
    #[must_use]
    pub fn valid_chars(mut self, set: CharSet) -> Self {
        self.char_classes = self.char_classes.with_valid(set);
        self
    }

    /// Build the grammar from the configured rules.
    ///
    /// # Errors
    ///
    /// Returns an error if the top-level rule is missing, a rule name is used
    /// twice, a referenced rule does not exist, a rule can reach itself
    /// without consuming a phrase, or a character range is empty.
    pub fn build(self) -> Result<Grammar, GrammarError> {
        let top_level = self.top_level.ok_or(GrammarError::MissingTopLevel)?;

        let mut rules = Vec::with_capacity(self.rules.len() + 1);
        rules.push(Rule::new(TOP_LEVEL_RULE, top_level));
        rules.extend(self.rules);

        let mut interner = Rodeo::default();
        let mut by_name: HashMap<Spur, RuleId, ahash::RandomState> =
            HashMap::with_capacity_and_hasher(rules.len(), ahash::RandomState::new());
        for (index, rule) in rules.iter().enumerate() {
            let id = RuleId::from_index(index).ok_or(GrammarError::TooManyRules(rules.len()))?;
            let key = interner.get_or_intern(rule.name());
            if by_name.insert(key, id).is_some() {
                return Err(GrammarError::DuplicateRule(rule.name().into()));
            }
        }

        let lookup = |name: &str| interner.get(name).and_then(|key| by_name.get(&key).copied());

        for rule in &mut rules {
            let referenced_by = CompactString::from(rule.name());
            for part in rule.definition_mut() {
                if let DefinitionPart::Rules(part) = part {
                    resolve(part, &referenced_by, &lookup)?;
                }
            }
        }

        let mut global = self
            .global
            .unwrap_or_else(|| RulesPart::new(GLOBAL_KEY, std::iter::empty::<&str>()).optional());
        resolve(&mut global, GLOBAL_KEY, &lookup)?;

        validate_grammar(&rules, &self.char_classes)?;

        log::debug!(
            "built grammar with {} rules, {} global candidates",
            rules.len(),
            global.candidates().len()
        );

        Ok(Grammar {
            rules,
            names: interner.into_reader(),
            by_name,
            top_level: RuleId::TOP_LEVEL,
            global,
            char_classes: self.char_classes,
        })
    }
}

fn resolve(
    part: &mut RulesPart,
    referenced_by: &str,
    lookup: impl Fn(&str) -> Option<RuleId>,
) -> Result<(), GrammarError> {
    let resolved = part
        .names
        .iter()
        .map(|name| {
            lookup(name.as_str()).ok_or_else(|| GrammarError::UndefinedRule {
                rule: name.clone(),
                referenced_by: referenced_by.into(),
            })
        })
        .collect::<Result<SmallVec<[RuleId; 4]>, _>>()?;
    part.resolved = resolved;
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error("Missing top-level rule")]
    MissingTopLevel,

    #[error("Rule {0:?} is defined more than once")]
    DuplicateRule(CompactString),

    #[error("Undefined rule {rule:?} referenced by {referenced_by:?}")]
    UndefinedRule {
        rule: CompactString,
        referenced_by: CompactString,
    },

    #[error("Left recursion detected: {}", .0.join(" -> "))]
    LeftRecursion(Vec<CompactString>),

    #[error("Invalid character range {start:?}..={end:?}")]
    InvalidCharRange { start: char, end: char },

    #[error("Grammar has {0} rules, more than a rule id can address")]
    TooManyRules(usize),
}
