//! Benchmarks for the shorthand pipeline.
//!
//! Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};

use hdoc::dom::{parse_html, parse_xml, to_string};
use hdoc::{ExpandOptions, Syntax, expand, process};

const GLOSSARY: &str = include_str!("../tests/fixtures/glossary.html");

/// A long document: many terms, each defined once and referenced often.
fn synthetic_document(terms: usize, references_per_term: usize) -> String {
    let mut doc = String::from("<html><body>\n");
    for i in 0..terms {
        doc.push_str(&format!(
            "<p>A <dfn>term {i}</dfn> and its <abbr title=\"expansion {i}\">T{i}</abbr>.</p>\n"
        ));
    }
    for _ in 0..references_per_term {
        doc.push_str("<p>");
        for i in 0..terms {
            doc.push_str(&format!("<dfn w=\"term {i}\"/> <abbr w=\"T{i}\"/> "));
        }
        doc.push_str("</p>\n");
    }
    doc.push_str("</body></html>\n");
    doc
}

// ============================================================================
// Parsing
// ============================================================================

fn bench_parse(c: &mut Criterion) {
    let doc = synthetic_document(200, 5);

    c.bench_function("parse_xml", |b| {
        b.iter(|| parse_xml(&doc).unwrap());
    });
    c.bench_function("parse_html", |b| {
        b.iter(|| parse_html(&doc));
    });
}

// ============================================================================
// Expansion
// ============================================================================

fn bench_expand(c: &mut Criterion) {
    let doc = synthetic_document(200, 5);
    let options = ExpandOptions::default();

    c.bench_function("expand", |b| {
        b.iter_batched(
            || parse_xml(&doc).unwrap(),
            |mut dom| expand(&mut dom, &options).unwrap(),
            criterion::BatchSize::SmallInput,
        );
    });
}

fn bench_process(c: &mut Criterion) {
    let options = ExpandOptions::default();

    c.bench_function("process_glossary", |b| {
        b.iter(|| process(GLOSSARY, Syntax::Xml, &options).unwrap());
    });
}

fn bench_serialize(c: &mut Criterion) {
    let mut dom = parse_xml(&synthetic_document(200, 5)).unwrap();
    expand(&mut dom, &ExpandOptions::default()).unwrap();

    c.bench_function("serialize", |b| {
        b.iter(|| to_string(&dom, Syntax::Xml));
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_expand,
    bench_process,
    bench_serialize,
);
criterion_main!(benches);
