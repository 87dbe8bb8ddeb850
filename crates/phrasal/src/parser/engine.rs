//! # Parser Engine
//!
//! Turns a character stream into phrases and places every phrase in the
//! tree of rule parsers.
//!
//! ## Phrases
//!
//! Characters are grouped by the grammar's [`CharClasses`]. A word phrase
//! runs while word continue or number start characters follow, a number
//! phrase while number continue characters follow, and a run of other valid
//! characters forms a chars phrase. Chars phrases are offered eagerly after every character and
//! may fail silently while they grow. Word and number phrases are offered once
//! the next character cannot extend them, and must then be placed.
//!
//! While the active rule parser captures a text span, characters skip
//! classification and are offered one by one. A span closed by an excluded
//! end phrase hands that phrase back, and its characters are classified again
//! from where it started.
//!
//! ## Placement
//!
//! A phrase is offered, in order, to:
//!
//! 1. the active rule parser, extending its last part or advancing to a
//!    following part,
//! 2. the grammar's global reference list, on behalf of the active parser,
//! 3. each ancestor of the active parser, nearest first.
//!
//! Whoever absorbs the phrase becomes the active parser. A phrase that must be
//! placed but fits nowhere is recorded as an unexpected phrase. A rule left
//! behind with required parts missing is recorded as unfinished.
//!
//! [`CharClasses`]: crate::grammar::CharClasses

use crate::error::{BrokenContent, ParseErrorReason, ParsePartRef, ParserError};
use crate::grammar::Grammar;
use crate::parser::{
    ParseStats, ParseTree, ParsedPart, ParserConfig, ParserId, Phrase, PhraseKind, RuleParser,
};
use crate::syntax::{Cursor, Position};
use compact_str::CompactString;
use smallvec::SmallVec;

type Trail = SmallVec<[ParsePartRef; 4]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    NotStarted,
    Parsing,
    Done,
}

/// The result of a completed parse
#[derive(Debug, Clone)]
pub struct ParseOutput {
    pub tree: ParseTree,
    pub top_level: ParserId,
    pub broken_content: Vec<BrokenContent>,
    /// `None` when statistics collection was disabled
    pub stats: Option<ParseStats>,
}

impl ParseOutput {
    #[must_use]
    pub fn top_level_parser(&self) -> &RuleParser {
        self.tree.get(self.top_level)
    }

    /// Whether any broken content should stop downstream processing
    #[must_use]
    pub fn has_fatal(&self) -> bool {
        crate::error::has_fatal(&self.broken_content)
    }
}

/// Single-use phrase parser for one text.
///
/// # Example
///
/// ```rust
/// use phrasal::grammar::{DefinitionPart, GrammarBuilder};
/// use phrasal::parser::Parser;
///
/// let grammar = GrammarBuilder::new()
///     .top_level([DefinitionPart::rules("items", ["Item"]).optional()])
///     .rule("Item", [DefinitionPart::keyword("*")])
///     .build()?;
///
/// let mut parser = Parser::new(&grammar);
/// parser.parse_text("* *")?;
///
/// let top_level = parser.top_level()?;
/// assert_eq!(parser.tree().get(top_level).parts().len(), 2);
/// assert!(parser.broken_content().is_empty());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Parser<'g> {
    grammar: &'g Grammar,
    config: ParserConfig,
    state: ParserState,
    tree: ParseTree,
    top_level: ParserId,
    current: ParserId,
    phrase: CompactString,
    phrase_kind: PhraseKind,
    phrase_start: Cursor,
    cursor: Cursor,
    broken_content: Vec<BrokenContent>,
    stats: ParseStats,
}

impl<'g> Parser<'g> {
    #[must_use]
    pub fn new(grammar: &'g Grammar) -> Self {
        Self::with_config(grammar, ParserConfig::default())
    }

    #[must_use]
    pub fn with_config(grammar: &'g Grammar, config: ParserConfig) -> Self {
        let mut tree = ParseTree::new();
        let top_level = tree.push(grammar.top_level(), None);
        Self {
            grammar,
            config,
            state: ParserState::NotStarted,
            tree,
            top_level,
            current: top_level,
            phrase: CompactString::default(),
            phrase_kind: PhraseKind::Chars,
            phrase_start: Cursor::start(),
            cursor: Cursor::start(),
            broken_content: Vec::new(),
            stats: ParseStats::new(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse one complete text.
    ///
    /// # Errors
    ///
    /// Returns [`ParserError::AlreadyUsed`] when called more than once.
    ///
    /// # Panics
    ///
    /// Panics when the text needs more than `u32::MAX` rule parsers.
    pub fn parse_text(&mut self, text: &str) -> Result<(), ParserError> {
        if self.state != ParserState::NotStarted {
            return Err(ParserError::AlreadyUsed);
        }
        self.run(text);
        Ok(())
    }

    /// The top-level rule parser of a finished parse.
    ///
    /// # Errors
    ///
    /// Returns an error when parsing has not started or not finished yet.
    pub fn top_level(&self) -> Result<ParserId, ParserError> {
        match self.state {
            ParserState::NotStarted => Err(ParserError::NotStarted),
            ParserState::Parsing => Err(ParserError::NotFinished),
            ParserState::Done => Ok(self.top_level),
        }
    }

    #[must_use]
    pub const fn tree(&self) -> &ParseTree {
        &self.tree
    }

    /// Broken content recorded so far, in input order
    #[must_use]
    pub fn broken_content(&self) -> &[BrokenContent] {
        &self.broken_content
    }

    #[must_use]
    pub fn stats(&self) -> Option<&ParseStats> {
        self.config.collect_stats.then_some(&self.stats)
    }

    /// Take the results of a finished parse.
    ///
    /// # Errors
    ///
    /// Returns an error when parsing has not started or not finished yet.
    pub fn into_output(self) -> Result<ParseOutput, ParserError> {
        self.top_level()?;
        Ok(self.finish())
    }

    fn finish(self) -> ParseOutput {
        let stats = self.config.collect_stats.then_some(self.stats);
        ParseOutput {
            tree: self.tree,
            top_level: self.top_level,
            broken_content: self.broken_content,
            stats,
        }
    }

    fn run(&mut self, text: &str) {
        self.state = ParserState::Parsing;

        for ch in text.chars() {
            self.parse_char(ch);
        }

        if !self.phrase.is_empty() {
            self.parse_current_phrase(true);
        }

        if self.config.report_unfinished_at_end {
            self.report_unfinished_at_end();
        }

        self.state = ParserState::Done;
        log::debug!(
            "parsed {} phrases into {} rule parsers, {} broken content entries",
            self.stats.phrases_offered,
            self.tree.len(),
            self.broken_content.len()
        );
    }

    fn parse_char(&mut self, ch: char) {
        if self.in_text_mode() {
            let start = self.cursor;
            self.cursor.advance(ch);
            let mut buf = [0; 4];
            let phrase = Phrase::new(
                &*ch.encode_utf8(&mut buf),
                PhraseKind::Chars,
                Position::new(start, self.cursor),
            );
            self.resolve(&phrase, true);

            // An excluded end phrase closed the text; classify it again
            if let Some((end_phrase, end_start)) = self.tree.take_reoffer(self.current) {
                self.cursor = end_start;
                for ch in end_phrase.chars() {
                    self.parse_char(ch);
                }
            }
            return;
        }

        let grammar = self.grammar;
        let classes = grammar.char_classes();
        let kind = if self.phrase.is_empty() {
            classes.starting_kind(ch)
        } else {
            classes
                .continues(self.phrase_kind, ch)
                .then_some(self.phrase_kind)
        };
        if let Some(kind) = kind {
            self.push_char(ch, kind);
            return;
        }

        if !self.phrase.is_empty() {
            self.parse_current_phrase(true);

            if self.in_text_mode() {
                self.parse_char(ch);
                return;
            }
            if let Some(kind) = classes.starting_kind(ch) {
                self.push_char(ch, kind);
                return;
            }
        }

        let start = self.cursor;
        self.cursor.advance(ch);
        if !ch.is_whitespace() {
            let mut buf = [0; 4];
            self.report(
                Position::new(start, self.cursor),
                ch.encode_utf8(&mut buf),
                ParseErrorReason::UnknownCharacter,
                Trail::new(),
            );
        }
    }

    fn push_char(&mut self, ch: char, kind: PhraseKind) {
        if self.phrase.is_empty() {
            self.phrase_start = self.cursor;
            self.phrase_kind = kind;
        }
        self.phrase.push(ch);
        self.cursor.advance(ch);

        if kind == PhraseKind::Chars {
            self.parse_current_phrase(false);
        }
    }

    fn in_text_mode(&self) -> bool {
        self.tree
            .get(self.current)
            .parts()
            .last()
            .is_some_and(ParsedPart::text_mode)
    }

    fn parse_current_phrase(&mut self, must: bool) {
        let phrase = Phrase::new(
            self.phrase.clone(),
            self.phrase_kind,
            Position::new(self.phrase_start, self.cursor),
        );

        if self.resolve(&phrase, must) || must {
            self.phrase.clear();
            self.phrase_kind = PhraseKind::Chars;
        }
    }

    /// Place a phrase; returns whether some rule parser absorbed it
    fn resolve(&mut self, phrase: &Phrase, must: bool) -> bool {
        let grammar = self.grammar;
        self.stats.phrases_offered += 1;

        let origin = self.current;
        if let Some(absorbed) = self.tree.parse_phrase(grammar, origin, phrase, &mut self.stats) {
            log::trace!("{:?} at {} absorbed", phrase.as_str(), phrase.position);
            self.current = absorbed;
            return true;
        }

        if let Some(absorbed) = self.tree.match_global(grammar, origin, phrase, &mut self.stats) {
            log::trace!("{:?} at {} absorbed by global rule", phrase.as_str(), phrase.position);
            self.stats.global_fallbacks += 1;
            self.current = absorbed;
            return true;
        }

        let mut trail = Trail::new();
        self.push_trail(&mut trail, origin);

        let mut unfinished = self
            .tree
            .has_required_parts_left(grammar, origin)
            .then_some(origin);
        let mut absorbed = None;

        let mut next = self.tree.get(origin).parent();
        while let Some(ancestor) = next {
            let result = self.tree.parse_phrase(grammar, ancestor, phrase, &mut self.stats);
            self.push_trail(&mut trail, ancestor);

            if result.is_some() {
                absorbed = result;
                break;
            }
            if unfinished.is_none() && self.tree.has_required_parts_left(grammar, ancestor) {
                unfinished = Some(ancestor);
            }
            next = self.tree.get(ancestor).parent();
        }

        if let Some(absorbed) = absorbed {
            log::trace!(
                "{:?} at {} absorbed after {} fallback steps",
                phrase.as_str(),
                phrase.position,
                trail.len().saturating_sub(1)
            );
            self.stats.ancestor_fallbacks += 1;
            self.current = absorbed;
        }

        if must && absorbed.is_none() {
            let reason = ParseErrorReason::UnexpectedPhrase(self.tree.part_ref(grammar, origin));
            self.report(phrase.position, phrase.as_str(), reason, trail.clone());
        }

        if let Some(unfinished) = unfinished {
            if absorbed.is_some() || must {
                let reason = ParseErrorReason::UnfinishedRule(self.tree.part_ref(grammar, unfinished));
                self.report(phrase.position, phrase.as_str(), reason, trail);
            }
        }

        absorbed.is_some()
    }

    fn push_trail(&self, trail: &mut Trail, id: ParserId) {
        if trail.len() < self.config.max_trail_len {
            trail.push(self.tree.part_ref(self.grammar, id));
        }
    }

    fn report_unfinished_at_end(&mut self) {
        let grammar = self.grammar;
        let chain: Vec<ParserId> = std::iter::once(self.current)
            .chain(self.tree.ancestors(self.current))
            .collect();

        let Some(&unfinished) = chain
            .iter()
            .find(|&&id| self.tree.has_required_parts_left(grammar, id))
        else {
            return;
        };

        let mut trail = Trail::new();
        for &id in &chain {
            self.push_trail(&mut trail, id);
        }
        let reason = ParseErrorReason::UnfinishedRule(self.tree.part_ref(grammar, unfinished));
        self.report(Position::empty(self.cursor), "", reason, trail);
    }

    fn report(&mut self, position: Position, content: &str, reason: ParseErrorReason, trail: Trail) {
        log::debug!("broken content at {position}: {reason} {content:?}");
        self.stats.broken_content += 1;
        self.broken_content.push(BrokenContent {
            position,
            content: content.into(),
            reason,
            trail,
        });
    }
}

/// Parse `text` with a fresh [`Parser`] and default configuration
#[must_use]
pub fn parse(grammar: &Grammar, text: &str) -> ParseOutput {
    let mut parser = Parser::new(grammar);
    parser.run(text);
    parser.finish()
}
