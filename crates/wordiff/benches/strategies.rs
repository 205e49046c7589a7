use criterion::{black_box, criterion_group, criterion_main, Criterion};

use wordiff::{CharDiffer, TokenDiffer, WordDiffer};

const PAIRS: &[(&str, &str)] = &[
    ("hello world", "hello universe"),
    (
        "function calculate(x, y) {",
        "function calculate(x, y, z) {",
    ),
    (
        "    let total = items.iter().map(|i| i.price * i.quantity).sum::<f64>();",
        "    let total: f64 = items.iter().map(|item| item.price * item.qty).sum();",
    ),
    (
        "The quick brown fox jumps over the lazy dog.",
        "A slow grey wolf walks around the sleeping cat!",
    ),
];

fn bench_strategies(c: &mut Criterion) {
    let token = TokenDiffer::new();
    let chars = CharDiffer::new();

    c.bench_function("token_differ", |b| {
        b.iter(|| {
            for (old, new) in PAIRS {
                black_box(token.diff(black_box(old), black_box(new)));
            }
        })
    });

    c.bench_function("char_differ", |b| {
        b.iter(|| {
            for (old, new) in PAIRS {
                black_box(chars.diff(black_box(old), black_box(new)));
            }
        })
    });
}

criterion_group!(benches, bench_strategies);
criterion_main!(benches);
