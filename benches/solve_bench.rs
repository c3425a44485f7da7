use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use herding::parser::parse_puzzles;
use herding::search::solve_puzzle;

const PUZZLE: &str = "\
# bench
.....b
.+....
o..u..
pieces: B@0,0 W@2,1 W@4,2
optimal: 6
";

fn bench_solve(c: &mut Criterion) {
    let puzzles = parse_puzzles(PUZZLE).puzzles;
    c.bench_function("solve_small", |b| {
        b.iter(|| solve_puzzle(black_box(&puzzles[0])))
    });
}

criterion_group!(benches, bench_solve);
criterion_main!(benches);
