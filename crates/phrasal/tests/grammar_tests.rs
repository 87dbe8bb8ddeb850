//! Grammar construction and character class tests

mod common;

use common::{fixture_rules, grammar_with, top_level_children};
use phrasal::grammar::{
    CharRange, CharSet, DefinitionPart, GrammarBuilder, GrammarError, RulesPart, TOP_LEVEL_RULE,
};
use phrasal::parser::{parse, ParsedPart, PhraseKind};

#[test]
fn test_fixture_grammar() {
    let grammar = grammar_with(&["Import", "ClassDefinition"]);

    assert_eq!(grammar.len(), 11);
    assert_eq!(grammar.rule(grammar.top_level()).name(), TOP_LEVEL_RULE);

    let import = grammar.rule_by_name("Import").unwrap();
    let target = match &import.definition()[1] {
        DefinitionPart::Rules(part) => part,
        other => panic!("unexpected part {other:?}"),
    };
    let names: Vec<&str> = target
        .candidates()
        .iter()
        .map(|&id| grammar.rule(id).name())
        .collect();
    assert_eq!(names, ["ImportParts", "Asterisk"]);
    assert!(grammar.global().candidates().is_empty());
}

#[test]
fn test_rule_ids_follow_declaration_order() {
    let grammar = grammar_with(&["Import"]);
    let names: Vec<&str> = grammar.rules().map(|(_, rule)| rule.name()).collect();
    assert_eq!(names[0], TOP_LEVEL_RULE);
    assert_eq!(names[1], "Asterisk");
    assert_eq!(grammar.rule_id("Asterisk").map(|id| id.index()), Some(1));
    assert_eq!(grammar.rule_id("Missing"), None);
}

#[test]
fn test_recursive_rules() {
    let grammar = GrammarBuilder::new()
        .top_level([DefinitionPart::rules("blocks", ["Block"]).optional()])
        .rule("Block", [
            DefinitionPart::keyword("{"),
            DefinitionPart::rules("children", ["Block"]).optional(),
            DefinitionPart::keyword("}"),
        ])
        .build()
        .unwrap();

    let output = parse(&grammar, "{ { {} } {} }");

    assert!(output.broken_content.is_empty());
    let outer = top_level_children(&output);
    assert_eq!(outer.len(), 1);
    let inner: Vec<_> = output.tree.children(outer[0]).collect();
    assert_eq!(inner.len(), 2);
    assert_eq!(output.tree.children(inner[0]).count(), 1);
    assert_eq!(output.tree.children(inner[1]).count(), 0);
}

#[test]
fn test_left_recursion_is_rejected() {
    let result = GrammarBuilder::new()
        .top_level([DefinitionPart::rules("content", ["Expression"]).optional()])
        .rule("Expression", [
            DefinitionPart::rules("left", ["Sum", "NumberLiteral"]),
        ])
        .rule("Sum", [
            DefinitionPart::rules("left", ["Expression"]),
            DefinitionPart::keyword("+"),
        ])
        .rule("NumberLiteral", [DefinitionPart::number("value")])
        .build();

    match result {
        Err(GrammarError::LeftRecursion(cycle)) => {
            let cycle: Vec<&str> = cycle.iter().map(|name| name.as_str()).collect();
            assert_eq!(cycle, ["Expression", "Sum", "Expression"]);
        }
        other => panic!("expected left recursion, got {other:?}"),
    }
}

#[test]
fn test_undefined_rule_message() {
    let error = fixture_rules(GrammarBuilder::new())
        .top_level([DefinitionPart::rules("content", ["Export"]).optional()])
        .build()
        .unwrap_err();

    assert_eq!(
        error.to_string(),
        "Undefined rule \"Export\" referenced by \"TopLevel\""
    );
}

#[test]
fn test_global_rules_resolved() {
    let grammar = fixture_rules(GrammarBuilder::new())
        .top_level([DefinitionPart::rules("content", ["Import"]).optional()])
        .global(RulesPart::new("comments", ["AnyText"]).optional())
        .build()
        .unwrap();

    let names: Vec<&str> = grammar.global().rule_names().iter().map(|name| name.as_str()).collect();
    assert_eq!(names, ["AnyText"]);
    assert_eq!(grammar.global().candidates(), [grammar.rule_id("AnyText").unwrap()]);
}

#[test]
fn test_custom_word_chars() {
    let grammar = GrammarBuilder::new()
        .top_level([DefinitionPart::rules("tags", ["Tag"]).optional()])
        .rule("Tag", [
            DefinitionPart::keyword("<"),
            DefinitionPart::identifier("name"),
            DefinitionPart::keyword(">"),
        ])
        .word_continue_chars(
            [
                CharRange::new('a', 'z'),
                CharRange::new('A', 'Z'),
                CharRange::single('-'),
            ]
            .into_iter()
            .collect(),
        )
        .build()
        .unwrap();

    let output = parse(&grammar, "<my-element>");

    assert!(output.broken_content.is_empty());
    let tag = top_level_children(&output)[0];
    let name = output.tree.get(tag).parts()[1].as_simple().unwrap();
    assert_eq!(name.value(), "my-element");
    assert!(grammar.char_classes().continues(PhraseKind::Word, '-'));
    assert!(!grammar.char_classes().starts_word('-'));
}

#[test]
fn test_custom_number_continue_chars() {
    let grammar = GrammarBuilder::new()
        .top_level([DefinitionPart::rules("content", ["Number", "Access"]).optional()])
        .rule("Number", [DefinitionPart::number("value")])
        .rule("Access", [
            DefinitionPart::identifier("object"),
            DefinitionPart::keyword("."),
            DefinitionPart::identifier("member"),
        ])
        .number_continue_chars(
            [CharRange::new('0', '9'), CharRange::single('.')]
                .into_iter()
                .collect(),
        )
        .build()
        .unwrap();

    let output = parse(&grammar, "1.5 a.b");

    assert!(output.broken_content.is_empty(), "{:?}", output.broken_content);
    let children = top_level_children(&output);
    assert_eq!(children.len(), 2);

    let number = output.tree.get(children[0]).parts()[0].as_simple().unwrap();
    assert_eq!(number.value(), "1.5");

    let access: Vec<&str> = output
        .tree
        .get(children[1])
        .parts()
        .iter()
        .filter_map(ParsedPart::as_simple)
        .map(|part| part.value())
        .collect();
    assert_eq!(access, ["a", ".", "b"]);
}

#[test]
fn test_custom_valid_chars() {
    let grammar = GrammarBuilder::new()
        .top_level([DefinitionPart::rules("items", ["Item"]).optional()])
        .rule("Item", [DefinitionPart::keyword("*")])
        .valid_chars([CharRange::single('*')].into_iter().collect::<CharSet>())
        .build()
        .unwrap();

    let output = parse(&grammar, "* + *");

    assert_eq!(top_level_children(&output).len(), 2);
    assert_eq!(output.broken_content.len(), 1);
    assert_eq!(output.broken_content[0].content.as_str(), "+");
    assert!(!output.has_fatal());
}
