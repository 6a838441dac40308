use criterion::{black_box, criterion_group, criterion_main, Criterion};

use subshift::generate::GraphGenerator;
use subshift::graph::Node;
use subshift::minimization::minimize;
use subshift::prune::prune;

fn forbidden() -> Vec<Node> {
    vec![Node::new("0120", 0), Node::new("2101", 1), Node::new("0011", 2)]
}

fn beal_generation(c: &mut Criterion) {
    let generator = GraphGenerator::beal(3, 3);
    let forbidden = forbidden();
    c.bench_function("beal generate", |b| {
        b.iter(|| generator.generate(black_box(&forbidden)))
    });
}

fn de_bruijn_generation(c: &mut Criterion) {
    let generator = GraphGenerator::de_bruijn(3, 4, 3);
    let forbidden = forbidden();
    c.bench_function("de bruijn generate", |b| {
        b.iter(|| generator.generate(black_box(&forbidden)))
    });
}

fn reduction_pipeline(c: &mut Criterion) {
    let graph = GraphGenerator::beal(3, 3).generate(&forbidden());
    c.bench_function("prune and minimize", |b| {
        b.iter(|| minimize(&prune(black_box(&graph))))
    });
}

criterion_group!(benches, beal_generation, de_bruijn_generation, reduction_pipeline);
criterion_main!(benches);
