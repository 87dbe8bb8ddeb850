//! # Rule Parsers
//!
//! A [`RuleParser`] is one instantiated attempt to match one rule. All rule
//! parsers of a parse live in a [`ParseTree`] arena and refer to each other by
//! [`ParserId`]:
//!
//! - a parent owns its children through the [`ParsedRule`] entries of its
//!   progress list,
//! - a child points back at its parent with a plain id, used only to walk
//!   upwards when a phrase does not fit the active parser.
//!
//! Matching a phrase may instantiate a chain of child parsers before a leaf
//! part accepts it. When no candidate accepts, every parser created during the
//! attempt is dropped again by truncating the arena to the length it had
//! before. Existing parsers are only modified once a match has succeeded, so
//! truncation restores the previous state exactly.

use crate::error::ParsePartRef;
use crate::grammar::{DefinitionPart, Grammar, Optionality, RuleId, RulesPart};
use crate::parser::matchers::{match_paths, match_simple, rest_optional};
use crate::parser::{ParseStats, ParsedPart, ParsedRule, Phrase};
use crate::syntax::{Cursor, Position};
use compact_str::CompactString;

/// Index of a [`RuleParser`] inside its [`ParseTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParserId(u32);

impl ParserId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// # Panics
    ///
    /// Panics when a single parse instantiates more than `u32::MAX` rule
    /// parsers.
    fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).expect("rule parser count exceeds u32::MAX"))
    }
}

/// Progress of one rule instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleParser {
    rule: RuleId,
    parent: Option<ParserId>,
    parts: Vec<ParsedPart>,
    global_parts: Vec<ParsedRule>,
}

impl RuleParser {
    #[must_use]
    pub const fn rule(&self) -> RuleId {
        self.rule
    }

    #[must_use]
    pub const fn parent(&self) -> Option<ParserId> {
        self.parent
    }

    /// Matched parts, in input order. Definition indices never decrease; a
    /// repeated rules part appears once per matched instance.
    #[must_use]
    pub fn parts(&self) -> &[ParsedPart] {
        &self.parts
    }

    /// Rule instances matched through the grammar's global reference list
    #[must_use]
    pub fn global_parts(&self) -> &[ParsedRule] {
        &self.global_parts
    }
}

/// Outcome of offering a phrase to the last recorded part
enum Extension {
    /// The part took the phrase; holds the parser that absorbed it
    Absorbed(ParserId),
    /// The part cannot take the phrase, later parts may
    Rejected,
    /// The part cannot take the phrase and nothing after it may be tried
    Blocked,
}

/// Arena holding every rule parser of one parse
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseTree {
    nodes: Vec<RuleParser>,
}

impl ParseTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a rule parser.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    #[must_use]
    pub fn get(&self, id: ParserId) -> &RuleParser {
        &self.nodes[id.index()]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Direct children: rule instances of the progress list, then the ones
    /// matched through the global reference list
    pub fn children(&self, id: ParserId) -> impl Iterator<Item = ParserId> + '_ {
        let node = self.get(id);
        node.parts
            .iter()
            .filter_map(ParsedPart::as_rule)
            .chain(node.global_parts.iter())
            .map(ParsedRule::child)
    }

    /// Parents of `id`, nearest first
    pub fn ancestors(&self, id: ParserId) -> impl Iterator<Item = ParserId> + '_ {
        std::iter::successors(self.get(id).parent, move |&parent| self.get(parent).parent)
    }

    /// Where the first recorded part starts
    #[must_use]
    pub fn start_cursor(&self, id: ParserId) -> Option<Cursor> {
        match self.get(id).parts.first()? {
            ParsedPart::Simple(part) => Some(part.position.start),
            ParsedPart::Paths(part) => part.position().map(|position| position.start),
            ParsedPart::Rule(part) => self.start_cursor(part.child),
        }
    }

    /// Where the last recorded part ends
    #[must_use]
    pub fn end_cursor(&self, id: ParserId) -> Option<Cursor> {
        match self.get(id).parts.last()? {
            ParsedPart::Simple(part) => Some(part.position.end),
            ParsedPart::Paths(part) => part.position().map(|position| position.end),
            ParsedPart::Rule(part) => self.end_cursor(part.child),
        }
    }

    /// Span covered by the recorded parts; `None` while nothing was matched
    #[must_use]
    pub fn position(&self, id: ParserId) -> Option<Position> {
        Some(Position::new(self.start_cursor(id)?, self.end_cursor(id)?))
    }

    /// Whether the rule still needs a phrase before it may be left
    #[must_use]
    pub fn has_required_parts_left(&self, grammar: &Grammar, id: ParserId) -> bool {
        let node = self.get(id);
        let definition = grammar.rule(node.rule).definition();
        match node.parts.last() {
            Some(ParsedPart::Paths(paths)) if !paths.has_satisfied_path => true,
            last => !rest_optional(definition, last.map_or(0, |part| part.index() + 1)),
        }
    }

    /// Reference to the rule of `id` and its last recorded part
    #[must_use]
    pub fn part_ref(&self, grammar: &Grammar, id: ParserId) -> ParsePartRef {
        let node = self.get(id);
        ParsePartRef::new(
            grammar.rule(node.rule).name(),
            node.parts.last().map_or(0, ParsedPart::index),
        )
    }

    pub(crate) fn push(&mut self, rule: RuleId, parent: Option<ParserId>) -> ParserId {
        let id = ParserId::from_index(self.nodes.len());
        self.nodes.push(RuleParser {
            rule,
            parent,
            parts: Vec::new(),
            global_parts: Vec::new(),
        });
        id
    }

    /// Take the excluded end phrase the last part of `id` closed on, with
    /// the cursor it started at
    pub(crate) fn take_reoffer(&mut self, id: ParserId) -> Option<(CompactString, Cursor)> {
        self.node_mut(id)
            .parts
            .last_mut()
            .and_then(ParsedPart::take_reoffer)
    }

    fn node_mut(&mut self, id: ParserId) -> &mut RuleParser {
        &mut self.nodes[id.index()]
    }

    /// Offer a phrase to the rule parser `id`.
    ///
    /// The last recorded part gets the first chance to extend itself. After
    /// that the following definition parts are tried in order; the first one
    /// that matches wins, and a required part that does not match ends the
    /// attempt. Returns the parser that absorbed the phrase: `id` itself for
    /// simple and paths parts, the deepest new child for rule parts.
    pub(crate) fn parse_phrase(
        &mut self,
        grammar: &Grammar,
        id: ParserId,
        phrase: &Phrase,
        stats: &mut ParseStats,
    ) -> Option<ParserId> {
        let definition = grammar.rule(self.get(id).rule).definition();

        let last = self
            .get(id)
            .parts
            .last()
            .map(|part| (part.index(), part.is_finished()));

        if let Some((index, false)) = last {
            let part = definition.get(index)?;
            match self.extend(grammar, id, part, phrase, stats) {
                Extension::Absorbed(absorbed) => return Some(absorbed),
                Extension::Blocked => return None,
                Extension::Rejected => {}
            }
        }

        let start = last.map_or(0, |(index, _)| index + 1);
        for (index, part) in definition.iter().enumerate().skip(start) {
            if let Some(absorbed) = self.start_part(grammar, id, part, index, phrase, stats) {
                return Some(absorbed);
            }
            if !part.is_optional() {
                return None;
            }
        }
        None
    }

    fn extend(
        &mut self,
        grammar: &Grammar,
        id: ParserId,
        definition: &DefinitionPart,
        phrase: &Phrase,
        stats: &mut ParseStats,
    ) -> Extension {
        let Some(last) = self.get(id).parts.last() else {
            return Extension::Rejected;
        };

        match (definition, last) {
            (DefinitionPart::Simple(simple), ParsedPart::Simple(previous)) => {
                match match_simple(simple, previous.index, phrase, Some(previous)) {
                    Some(updated) => {
                        self.replace_last(id, ParsedPart::Simple(updated));
                        Extension::Absorbed(id)
                    }
                    None => Extension::Rejected,
                }
            }
            (DefinitionPart::Paths(paths), ParsedPart::Paths(previous)) => {
                let satisfied = previous.has_satisfied_path;
                match match_paths(paths, previous.index, phrase, Some(previous)) {
                    Some(updated) => {
                        self.replace_last(id, ParsedPart::Paths(updated));
                        Extension::Absorbed(id)
                    }
                    None if satisfied => Extension::Rejected,
                    None => Extension::Blocked,
                }
            }
            (DefinitionPart::Rules(rules), ParsedPart::Rule(previous)) => {
                let previous = *previous;
                self.extend_rules(grammar, id, rules, previous, phrase, stats)
            }
            _ => Extension::Rejected,
        }
    }

    /// Repeat a rules part: consume its separator, or add another instance
    fn extend_rules(
        &mut self,
        grammar: &Grammar,
        id: ParserId,
        rules: &RulesPart,
        previous: ParsedRule,
        phrase: &Phrase,
        stats: &mut ParseStats,
    ) -> Extension {
        if !previous.separator_satisfied {
            if rules.separator_phrase.as_deref() == Some(phrase.as_str()) {
                if let Some(ParsedPart::Rule(last)) = self.node_mut(id).parts.last_mut() {
                    last.separator_satisfied = true;
                }
                return Extension::Absorbed(id);
            }
            if !previous.separator_optional {
                return Extension::Rejected;
            }
        }

        if rules.singular {
            return Extension::Rejected;
        }

        match self.match_rules(grammar, id, rules.candidates(), phrase, stats) {
            Some((child, successful)) => {
                self.node_mut(id)
                    .parts
                    .push(ParsedPart::Rule(new_instance(rules, previous.index, child, successful)));
                Extension::Absorbed(successful)
            }
            None => Extension::Rejected,
        }
    }

    fn start_part(
        &mut self,
        grammar: &Grammar,
        id: ParserId,
        definition: &DefinitionPart,
        index: usize,
        phrase: &Phrase,
        stats: &mut ParseStats,
    ) -> Option<ParserId> {
        let part = match definition {
            DefinitionPart::Simple(simple) => {
                ParsedPart::Simple(match_simple(simple, index, phrase, None)?)
            }
            DefinitionPart::Paths(paths) => ParsedPart::Paths(match_paths(paths, index, phrase, None)?),
            DefinitionPart::Rules(rules) => {
                let (child, successful) =
                    self.match_rules(grammar, id, rules.candidates(), phrase, stats)?;
                self.node_mut(id)
                    .parts
                    .push(ParsedPart::Rule(new_instance(rules, index, child, successful)));
                return Some(successful);
            }
        };
        self.node_mut(id).parts.push(part);
        Some(id)
    }

    /// Try each candidate rule in order as a new child of `parent`.
    ///
    /// Returns the new child and the deepest parser that absorbed the phrase.
    pub(crate) fn match_rules(
        &mut self,
        grammar: &Grammar,
        parent: ParserId,
        candidates: &[RuleId],
        phrase: &Phrase,
        stats: &mut ParseStats,
    ) -> Option<(ParserId, ParserId)> {
        for &rule in candidates {
            let mark = self.nodes.len();
            let child = self.push(rule, Some(parent));
            stats.parsers_created += 1;

            if let Some(successful) = self.parse_phrase(grammar, child, phrase, stats) {
                return Some((child, successful));
            }

            self.nodes.truncate(mark);
            stats.rollbacks += 1;
        }
        None
    }

    /// Offer a phrase to the grammar's global reference list on behalf of `id`
    pub(crate) fn match_global(
        &mut self,
        grammar: &Grammar,
        id: ParserId,
        phrase: &Phrase,
        stats: &mut ParseStats,
    ) -> Option<ParserId> {
        let global = grammar.global();
        let (child, successful) = self.match_rules(grammar, id, global.candidates(), phrase, stats)?;
        self.node_mut(id)
            .global_parts
            .push(new_instance(global, 0, child, successful));
        Some(successful)
    }

    fn replace_last(&mut self, id: ParserId, part: ParsedPart) {
        let parts = &mut self.node_mut(id).parts;
        match parts.last_mut() {
            Some(last) => *last = part,
            None => parts.push(part),
        }
    }
}

fn new_instance(rules: &RulesPart, index: usize, child: ParserId, successful: ParserId) -> ParsedRule {
    ParsedRule {
        index,
        child,
        successful,
        separator_satisfied: rules.separator_phrase.is_none(),
        separator_optional: rules.separator_optional,
    }
}
