//! # Parser Module
//!
//! The single-pass phrase parser.
//!
//! ## Overview
//!
//! - [`Parser`] reads characters, groups them into [`Phrase`]s and places
//!   each phrase in a tree of rule parsers.
//! - [`ParseTree`] is the arena of [`RuleParser`]s; every rule parser records
//!   its matched parts as [`ParsedPart`]s.
//! - Input that fits nowhere is recorded as
//!   [`BrokenContent`](crate::error::BrokenContent) and parsing continues.
//!
//! ## Usage
//!
//! ```rust
//! use phrasal::grammar::{DefinitionPart, GrammarBuilder};
//! use phrasal::parser::{parse, ParsedPart};
//!
//! let grammar = GrammarBuilder::new()
//!     .top_level([DefinitionPart::rules("imports", ["Import"]).optional()])
//!     .rule("Import", [
//!         DefinitionPart::keyword("import"),
//!         DefinitionPart::identifier("name"),
//!     ])
//!     .build()?;
//!
//! let output = parse(&grammar, "import a import b");
//! assert!(output.broken_content.is_empty());
//!
//! let imports = output.top_level_parser().parts();
//! assert_eq!(imports.len(), 2);
//! let second = imports[1].as_rule().map(|rule| rule.child());
//! let name = second.and_then(|id| output.tree.get(id).parts()[1].as_simple());
//! assert_eq!(name.map(|part| part.value()), Some("b"));
//! # Ok::<(), phrasal::grammar::GrammarError>(())
//! ```

pub mod config;
pub mod engine;
pub mod matchers;
pub mod phrase;
pub mod progress;
pub mod rule_parser;

pub use config::{ParseStats, ParserConfig};
pub use engine::{parse, ParseOutput, Parser};
pub use phrase::{Phrase, PhraseKind};
pub use progress::{
    ParsedPart, ParsedPartKind, ParsedPaths, ParsedRule, ParsedSimplePart, PathProgress,
};
pub use rule_parser::{ParseTree, ParserId, RuleParser};
