use criterion::{Criterion, criterion_group, criterion_main};
use refbook_engine::ReferenceResolver;
mod common;

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    group.sample_size(10);

    let resolver = ReferenceResolver::new();
    for sections in [10, 100] {
        let template = common::generate_chapter(sections, 4);
        group.bench_function(format!("chapter_{sections}_sections"), |b| {
            b.iter(|| {
                let mut doc = template.clone();
                let report = resolver.resolve(&mut doc);
                std::hint::black_box(report);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
