use criterion::{Criterion, criterion_group, criterion_main};
use sapper_core::*;
use std::hint::black_box;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for (name, config) in [
        ("beginner", GameConfig::beginner()),
        ("intermediate", GameConfig::intermediate()),
    ] {
        let mut generator = RandomBoardGenerator::new(0xdead_beef);
        group.bench_function(name, |b| {
            b.iter(|| generator.generate(black_box(config), black_box((0, 0))))
        });
    }

    group.finish();
}

fn bench_cascade(c: &mut Criterion) {
    let mut group = c.benchmark_group("cascade");

    // a lone mine in the corner makes the first reveal open the whole board
    for map_size in [16, 64, 255] {
        let grid = Grid::from_mine_coords(map_size, &[(0, 0)]).expect("valid board");
        let center = (map_size / 2, map_size / 2);
        group.bench_function(format!("open_{map_size}"), |b| {
            b.iter(|| reveal(black_box(&grid), black_box(center)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generate, bench_cascade);
criterion_main!(benches);
