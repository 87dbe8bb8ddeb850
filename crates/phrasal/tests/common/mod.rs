//! Fixture grammars shared by the integration tests

#![allow(dead_code)]

use phrasal::grammar::{
    DefinitionPart, Grammar, GrammarBuilder, RulesPart, SimplePart, TextPart,
};
use phrasal::parser::{ParseOutput, ParserId};

/// Add the fixture rules to a builder
pub fn fixture_rules(builder: GrammarBuilder) -> GrammarBuilder {
    builder
        .rule("Asterisk", [DefinitionPart::keyword("*")])
        .rule("Identifier", [DefinitionPart::identifier("name")])
        .rule("StringLiteral", [DefinitionPart::text("value", Some("\""), "\"")])
        .rule("AnyText", [DefinitionPart::from(
            TextPart::new("any", None, "*").exclude_end_phrase(),
        )])
        .rule("NumberLiteral", [DefinitionPart::number("number")])
        .rule("ImportParts", [
            DefinitionPart::keyword("{"),
            RulesPart::new("values", ["Identifier"]).separator(",").into(),
            DefinitionPart::keyword("}"),
        ])
        .rule("Import", [
            DefinitionPart::keyword("import"),
            RulesPart::new("target", ["ImportParts", "Asterisk"])
                .singular()
                .into(),
            DefinitionPart::keyword("from"),
            RulesPart::new("source", ["StringLiteral"]).singular().into(),
        ])
        .rule("ValueAssignment", [
            DefinitionPart::keyword("="),
            RulesPart::new("value", ["StringLiteral", "NumberLiteral"])
                .singular()
                .into(),
        ])
        .rule("ClassProperty", [
            DefinitionPart::identifier("name"),
            DefinitionPart::paths([vec![
                SimplePart::keyword(":"),
                SimplePart::identifier("type"),
            ]])
            .optional(),
            RulesPart::new("defaultValue", ["ValueAssignment"])
                .singular()
                .optional()
                .into(),
        ])
        .rule("ClassDefinition", [
            DefinitionPart::modifiers(["abstract"]).optional(),
            DefinitionPart::keyword("class"),
            DefinitionPart::identifier("name"),
            DefinitionPart::paths([vec![
                SimplePart::keyword("extends"),
                SimplePart::identifier("extends"),
            ]])
            .optional(),
            DefinitionPart::keyword("{"),
            RulesPart::new("properties", ["ClassProperty"])
                .optional()
                .into(),
            DefinitionPart::keyword("}"),
        ])
}

/// Fixture grammar whose top level repeats the given rules
pub fn grammar_with(top_level: &[&str]) -> Grammar {
    fixture_rules(GrammarBuilder::new())
        .top_level([DefinitionPart::rules("content", top_level.iter().copied()).optional()])
        .build()
        .unwrap()
}

/// Rule instances recorded on the top level, in input order
pub fn top_level_children(output: &ParseOutput) -> Vec<ParserId> {
    output.tree.children(output.top_level).collect()
}

/// Name of the rule a parser instantiates
pub fn rule_name<'g>(grammar: &'g Grammar, output: &ParseOutput, id: ParserId) -> &'g str {
    grammar.rule(output.tree.get(id).rule()).name()
}
