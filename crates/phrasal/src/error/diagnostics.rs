//! # Diagnostic Utilities
//!
//! Readable messages for [`BrokenContent`] entries.
//!
//! The expected continuation is read from the grammar: starting after the part
//! a diagnostic refers to, parts are described until the first required one.

use crate::error::{BrokenContent, ParseErrorReason, ParsePartRef};
use crate::grammar::{DefinitionPart, Grammar, Optionality};

/// Describe one definition part the way it appears in messages
#[must_use]
pub fn describe_part(grammar: &Grammar, part: &DefinitionPart) -> String {
    match part {
        DefinitionPart::Simple(simple) => simple.describe(),
        DefinitionPart::Paths(paths) => paths.describe(),
        DefinitionPart::Rules(rules) => {
            let names: Vec<&str> = rules
                .candidates()
                .iter()
                .map(|&id| grammar.rule(id).name())
                .collect();
            names.join(" | ")
        }
    }
}

/// What the referenced rule instance could have taken next
///
/// # Example
///
/// ```rust
/// use phrasal::error::ParsePartRef;
/// use phrasal::error::diagnostics::expected_text;
/// use phrasal::grammar::{DefinitionPart, GrammarBuilder};
///
/// let grammar = GrammarBuilder::new()
///     .top_level([DefinitionPart::rules("items", ["Import"]).optional()])
///     .rule("Import", [
///         DefinitionPart::keyword("import"),
///         DefinitionPart::identifier("name"),
///     ])
///     .build()?;
///
/// let expected = expected_text(&grammar, &ParsePartRef::new("Import", 0));
/// assert_eq!(expected, "'name' identifier");
/// # Ok::<(), phrasal::grammar::GrammarError>(())
/// ```
#[must_use]
pub fn expected_text(grammar: &Grammar, part_ref: &ParsePartRef) -> String {
    let Some(rule) = grammar.rule_by_name(&part_ref.rule) else {
        return String::from("nothing (unknown rule)");
    };

    let mut expected = Vec::new();
    for part in rule.definition().iter().skip(part_ref.part + 1) {
        expected.push(describe_part(grammar, part));
        if !part.is_optional() {
            break;
        }
    }

    if expected.is_empty() {
        String::from("nothing (rule should be complete)")
    } else {
        expected.join(", then ")
    }
}

impl BrokenContent {
    /// A readable description of this entry
    #[must_use]
    pub fn message(&self, grammar: &Grammar) -> String {
        match &self.reason {
            ParseErrorReason::UnknownCharacter => {
                format!("Unknown character encountered: \"{}\"", self.content)
            }
            ParseErrorReason::UnfinishedRule(part_ref) => format!(
                "Unfinished rule \"{}\". Expected: {}, received: \"{}\"",
                part_ref.rule,
                expected_text(grammar, part_ref),
                self.content
            ),
            ParseErrorReason::UnexpectedPhrase(part_ref) => format!(
                "Unexpected phrase encountered for rule \"{}\". Expected: {}, received: \"{}\"",
                part_ref.rule,
                expected_text(grammar, part_ref),
                self.content
            ),
        }
    }
}
