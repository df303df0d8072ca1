use criterion::{Criterion, criterion_group, criterion_main};
use dnary_huffman::{BernoulliSource, DnaryHuffmanBuilder, sweep};
use std::hint::black_box;

const BLOCK_LENGTHS: &[usize] = &[8, 12, 14];
const RADICES: &[usize] = &[2, 3, 5];

fn superletter_codes(c: &mut Criterion) {
    let source = BernoulliSource::new(0.8).unwrap();
    for &n in BLOCK_LENGTHS {
        let symbols = source.superletters(n).unwrap();
        for &radix in RADICES {
            let builder = DnaryHuffmanBuilder::new(radix).unwrap();
            c.bench_function(&format!("build n={n} D={radix}"), |b| {
                b.iter(|| builder.build(black_box(&symbols)).unwrap());
            });
        }
    }
}

fn block_length_sweep(c: &mut Criterion) {
    let source = BernoulliSource::new(0.8).unwrap();
    c.bench_function("sweep 1..=14 D=2", |b| {
        b.iter(|| sweep(black_box(&source), 1..=14, 2).unwrap());
    });
}

criterion_group!(regression, superletter_codes);
criterion_group! {
    name = reporting;
    config = Criterion::default().sample_size(10);
    targets = block_length_sweep
}
criterion_main!(regression, reporting);
