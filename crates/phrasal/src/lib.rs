//! # Phrasal
//!
//! A grammar-driven, single-pass phrase parser with recoverable diagnostics.
//!
//! ## Overview
//!
//! Phrasal parses text against a declarative grammar in one left-to-right
//! pass, without a separate lexer and without backtracking over input:
//!
//! - **Grammars** are named rules built from keywords, identifiers, numbers,
//!   modifier sets, free text spans, references to other rules and sequences
//!   of alternative paths ([`grammar`]).
//! - **Phrases** are runs of word, number or other characters, classified by
//!   configurable character classes ([`parser::Phrase`]).
//! - **Recovery** happens by handing a rejected phrase to the enclosing rules,
//!   so one mistake never ends the parse ([`error::BrokenContent`]).
//!
//! ## Quick Start
//!
//! ```rust
//! use phrasal::error::{ParseErrorReason, ParsePartRef};
//! use phrasal::grammar::{DefinitionPart, GrammarBuilder, RulesPart};
//!
//! let grammar = GrammarBuilder::new()
//!     .top_level([DefinitionPart::rules("imports", ["Import"]).optional()])
//!     .rule("Asterisk", [DefinitionPart::keyword("*")])
//!     .rule("Import", [
//!         DefinitionPart::keyword("import"),
//!         RulesPart::new("target", ["Asterisk"]).singular().into(),
//!         DefinitionPart::keyword("from"),
//!         DefinitionPart::text("path", Some("\""), "\""),
//!     ])
//!     .build()?;
//!
//! let output = phrasal::parse(&grammar, "import * from import * from \"path\"");
//!
//! assert_eq!(output.broken_content.len(), 1);
//! let broken = &output.broken_content[0];
//! assert_eq!(broken.position.to_string(), "1:15-1:21");
//! assert_eq!(
//!     broken.reason,
//!     ParseErrorReason::UnfinishedRule(ParsePartRef::new("Import", 2))
//! );
//! assert_eq!(broken.content.as_str(), "import");
//! # Ok::<(), phrasal::grammar::GrammarError>(())
//! ```

pub mod error;
pub mod grammar;
pub mod parser;
pub mod syntax;

pub use error::{BrokenContent, ParseErrorReason, ParsePartRef, ParserError, Severity};
pub use grammar::{DefinitionPart, Grammar, GrammarBuilder, GrammarError};
pub use parser::{parse, ParseOutput, ParseStats, Parser, ParserConfig};
