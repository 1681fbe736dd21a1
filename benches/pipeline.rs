//! Benchmarks for the structuring and rendering pipeline.
//!
//! Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};

use bookpress::{Template, structure_text, write_docx, write_epub, write_pdf};

/// Build a synthetic manuscript: 40 chapters of 30 paragraphs each.
fn sample_manuscript() -> String {
    let mut text = String::from("The Benchmark Book\n\n");
    for chapter in 1..=40 {
        text.push_str(&format!("Chapter {chapter}\n\n"));
        for paragraph in 0..30 {
            text.push_str(&format!(
                "Paragraph {paragraph} of chapter {chapter} has enough words to look like real \
                 prose, wrapping across a few rendered lines without being remarkable.\n\n"
            ));
        }
    }
    text
}

// ============================================================================
// Structuring Benchmarks
// ============================================================================

fn bench_structure_text(c: &mut Criterion) {
    let text = sample_manuscript();

    c.bench_function("structure_text", |b| {
        b.iter(|| structure_text(&text));
    });
}

// ============================================================================
// Render Benchmarks
// ============================================================================

fn bench_write_epub(c: &mut Criterion) {
    let book = structure_text(&sample_manuscript());

    c.bench_function("write_epub", |b| {
        b.iter(|| write_epub(&book, Template::Classic).unwrap());
    });
}

fn bench_write_pdf(c: &mut Criterion) {
    let book = structure_text(&sample_manuscript());

    c.bench_function("write_pdf", |b| {
        b.iter(|| write_pdf(&book, Template::Classic).unwrap());
    });
}

fn bench_write_docx(c: &mut Criterion) {
    let book = structure_text(&sample_manuscript());

    c.bench_function("write_docx", |b| {
        b.iter(|| write_docx(&book, Template::Classic).unwrap());
    });
}

criterion_group!(
    benches,
    // Structuring
    bench_structure_text,
    // Render
    bench_write_epub,
    bench_write_pdf,
    bench_write_docx,
);
criterion_main!(benches);
