#![no_main]
use libfuzzer_sys::fuzz_target;
use phrasal::grammar::{DefinitionPart, Grammar, GrammarBuilder, RulesPart, SimplePart, TextPart};
use phrasal::parser::{Parser, ParserConfig};

fn grammar() -> Option<Grammar> {
    GrammarBuilder::new()
        .top_level([DefinitionPart::rules("content", ["Import", "Block", "Words"]).optional()])
        .rule("Asterisk", [DefinitionPart::keyword("*")])
        .rule("Identifier", [DefinitionPart::identifier("name")])
        .rule("StringLiteral", [DefinitionPart::text("value", Some("\""), "\"")])
        .rule("Words", [DefinitionPart::from(
            TextPart::new("words", None, ";").exclude_end_phrase(),
        )])
        .rule("Comment", [DefinitionPart::text("comment", Some("//"), "\n")])
        .rule("Import", [
            DefinitionPart::keyword("import"),
            RulesPart::new("target", ["Asterisk", "Identifier"])
                .separator(",")
                .separator_optional()
                .into(),
            DefinitionPart::paths([
                vec![SimplePart::keyword("from"), SimplePart::number("version")],
                vec![SimplePart::keyword("from")],
            ]),
            RulesPart::new("source", ["StringLiteral"]).singular().into(),
        ])
        .rule("Block", [
            DefinitionPart::modifiers(["pub", "mut"]).optional(),
            DefinitionPart::keyword("{"),
            RulesPart::new("children", ["Block", "Import"]).optional().into(),
            DefinitionPart::keyword("}"),
        ])
        .global(RulesPart::new("comments", ["Comment"]).optional())
        .build()
        .ok()
}

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Some(grammar) = grammar() else {
        return;
    };

    let config = ParserConfig {
        report_unfinished_at_end: true,
        ..ParserConfig::default()
    };
    let mut parser = Parser::with_config(&grammar, config);
    if parser.parse_text(input).is_err() {
        return;
    }

    for broken in parser.broken_content() {
        assert!(broken.position.start <= broken.position.end);
        let _ = broken.message(&grammar);
    }
});
