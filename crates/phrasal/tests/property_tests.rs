//! Property-based tests for the phrase parser
//!
//! These tests use proptest to generate inputs and verify invariants that
//! must hold for every text, not just the hand-picked fixtures.

mod common;

use common::{grammar_with, top_level_children};
use phrasal::grammar::{DefinitionPart, GrammarBuilder};
use phrasal::parser::parse;
use phrasal::syntax::{Cursor, Position};
use proptest::prelude::*;

fn whitespace() -> impl Strategy<Value = String> {
    proptest::collection::vec(prop_oneof![Just(' '), Just('\t'), Just('\n'), Just('\r')], 0..64)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Separators of one or more spaces or newlines
fn separator() -> impl Strategy<Value = String> {
    proptest::collection::vec(prop_oneof![Just(' '), Just('\n')], 1..4)
        .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn test_whitespace_only_input(text in whitespace()) {
        let grammar = grammar_with(&["Import", "ClassDefinition", "AnyText"]);
        let output = parse(&grammar, &text);

        prop_assert!(output.broken_content.is_empty());
        prop_assert!(output.top_level_parser().parts().is_empty());
    }

    #[test]
    fn test_asterisk_positions(separators in proptest::collection::vec(separator(), 1..16)) {
        let grammar = grammar_with(&["Asterisk"]);

        let mut text = String::new();
        let mut expected = Vec::new();
        let mut cursor = Cursor::start();
        for separator in &separators {
            expected.push(Position::new(cursor, cursor.advanced('*')));
            text.push('*');
            cursor.advance('*');
            for ch in separator.chars() {
                text.push(ch);
                cursor.advance(ch);
            }
        }

        let output = parse(&grammar, &text);
        prop_assert!(output.broken_content.is_empty());

        let positions: Vec<_> = top_level_children(&output)
            .into_iter()
            .filter_map(|id| output.tree.position(id))
            .collect();
        prop_assert_eq!(positions, expected);
    }

    #[test]
    fn test_text_positions(body in "[a-z \n]{0,40}") {
        let grammar = grammar_with(&["StringLiteral"]);
        let text = format!("\"{body}\"");

        let output = parse(&grammar, &text);
        prop_assert!(output.broken_content.is_empty());

        let end = text.chars().fold(Cursor::start(), Cursor::advanced);
        let literal = top_level_children(&output)[0];
        prop_assert_eq!(
            output.tree.position(literal),
            Some(Position::new(Cursor::start(), end))
        );

        let value = output.tree.get(literal).parts()[0].as_simple().map(|part| part.value().to_owned());
        prop_assert_eq!(value, Some(text));
    }

    #[test]
    fn test_modifiers_any_order(order in Just(vec!["abstract", "public", "static"]).prop_shuffle()) {
        let grammar = GrammarBuilder::new()
            .top_level([DefinitionPart::rules("classes", ["Class"]).optional()])
            .rule("Class", [
                DefinitionPart::modifiers(["abstract", "public", "static"]).optional(),
                DefinitionPart::keyword("class"),
                DefinitionPart::identifier("name"),
            ])
            .build()
            .unwrap();

        let text = format!("{} class Foo", order.join(" "));
        let output = parse(&grammar, &text);
        prop_assert!(output.broken_content.is_empty());

        let class = top_level_children(&output)[0];
        let modifiers = output.tree.get(class).parts()[0].as_simple().unwrap();
        prop_assert!(modifiers.is_finished());

        let values: Vec<&str> = modifiers.values().iter().map(|value| value.as_str()).collect();
        prop_assert_eq!(values, order);
    }

    #[test]
    fn test_parser_never_panics(text in "\\PC{0,64}") {
        let grammar = grammar_with(&["Import", "ClassDefinition", "AnyText"]);
        let output = parse(&grammar, &text);

        for broken in &output.broken_content {
            prop_assert!(broken.position.start <= broken.position.end);
        }
    }
}
