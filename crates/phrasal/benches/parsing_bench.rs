use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use phrasal::grammar::{DefinitionPart, Grammar, GrammarBuilder, RulesPart, SimplePart};
use phrasal::parser::{parse, Parser, ParserConfig};
use std::hint::black_box;

fn setup_grammar() -> Grammar {
    GrammarBuilder::new()
        .top_level([DefinitionPart::rules("content", ["Import", "ClassDefinition"]).optional()])
        .rule("Asterisk", [DefinitionPart::keyword("*")])
        .rule("Identifier", [DefinitionPart::identifier("name")])
        .rule("StringLiteral", [DefinitionPart::text("value", Some("\""), "\"")])
        .rule("NumberLiteral", [DefinitionPart::number("number")])
        .rule("Comment", [DefinitionPart::text("comment", Some("#"), "\n")])
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
            DefinitionPart::modifiers(["abstract", "export"]).optional(),
            DefinitionPart::keyword("class"),
            DefinitionPart::identifier("name"),
            DefinitionPart::keyword("{"),
            RulesPart::new("properties", ["ClassProperty"])
                .optional()
                .into(),
            DefinitionPart::keyword("}"),
        ])
        .global(RulesPart::new("comments", ["Comment"]).optional())
        .build()
        .unwrap()
}

fn create_source(classes: usize) -> String {
    let mut source = String::from("import { a, b, c } from \"lib\"\n# classes follow\n");
    for index in 0..classes {
        source.push_str(&format!(
            "export class Item{index} {{\n  name: string = \"item\"\n  count = {index}\n}}\n"
        ));
    }
    source
}

fn bench_full_parse(c: &mut Criterion) {
    let grammar = setup_grammar();
    let source = create_source(4);

    c.bench_function("full_parse_small", |b| {
        b.iter(|| black_box(parse(&grammar, black_box(&source))));
    });
}

fn bench_parse_scaling(c: &mut Criterion) {
    let grammar = setup_grammar();
    let mut group = c.benchmark_group("parse_scaling");

    for classes in [16, 128, 1024] {
        let source = create_source(classes);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(classes), &source, |b, source| {
            b.iter(|| black_box(parse(&grammar, source)));
        });
    }
    group.finish();
}

fn bench_error_recovery(c: &mut Criterion) {
    let grammar = setup_grammar();
    let source = "import * from import { a b } from class Foo { = } ".repeat(64);
    let config = ParserConfig {
        collect_stats: false,
        ..ParserConfig::default()
    };

    c.bench_function("error_recovery", |b| {
        b.iter(|| {
            let mut parser = Parser::with_config(&grammar, config.clone());
            let _ = parser.parse_text(black_box(&source));
            black_box(parser.broken_content().len());
        });
    });
}

criterion_group!(
    benches,
    bench_full_parse,
    bench_parse_scaling,
    bench_error_recovery
);
criterion_main!(benches);
