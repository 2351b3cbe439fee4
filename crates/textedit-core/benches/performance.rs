use criterion::{Criterion, criterion_group, criterion_main};
use textedit_core::{FoldEngine, TextBuffer, compute_range};

fn build_document(sections: usize) -> String {
    let mut lines = Vec::new();
    for section in 0..sections {
        lines.push(format!("# Section {section}"));
        lines.push("intro paragraph text".to_string());
        lines.push(format!("## Detail {section}"));
        lines.push("- list item one".to_string());
        lines.push("- list item two".to_string());
        lines.push(String::new());
    }
    lines.join("\n")
}

fn bench_fold_expand_sweep(c: &mut Criterion) {
    let text = build_document(200);

    c.bench_function("fold_expand_sweep_200_sections", |b| {
        b.iter(|| {
            let mut buffer = TextBuffer::from_text(&text);
            let mut engine = FoldEngine::new();
            for paragraph in (0..buffer.paragraph_count()).step_by(6) {
                let _ = engine.fold(&mut buffer, paragraph);
            }
            engine.clear_all_folding(&mut buffer).unwrap();
            buffer.len()
        })
    });
}

fn bench_compute_range(c: &mut Criterion) {
    let text = build_document(200);
    let buffer = TextBuffer::from_text(&text);

    c.bench_function("compute_range_every_paragraph", |b| {
        b.iter(|| {
            let mut total = 0;
            for paragraph in 0..buffer.paragraph_count() {
                total += compute_range(&buffer, paragraph).unwrap().end;
            }
            total
        })
    });
}

criterion_group!(benches, bench_fold_expand_sweep, bench_compute_range);
criterion_main!(benches);
