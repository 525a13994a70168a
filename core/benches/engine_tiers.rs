use clisweeper_core::*;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for difficulty in Difficulty::ALL {
        let config = difficulty.config();
        let start = (config.size.0 / 2, config.size.1 / 2);
        group.bench_with_input(BenchmarkId::from_parameter(difficulty), &config, |b, &config| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                black_box(RandomMinefieldGenerator::new(seed, start).generate(config))
            })
        });
    }
    group.finish();
}

fn bench_first_reveal(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_reveal");
    for difficulty in Difficulty::ALL {
        group.bench_function(BenchmarkId::from_parameter(difficulty), |b| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                let Ok(mut board) = Board::new(difficulty.config(), seed) else {
                    return;
                };
                black_box(board.apply(Action::Reveal));
            })
        });
    }
    group.finish();
}

fn bench_open_board_flood(c: &mut Criterion) {
    // no mines at all: one reveal floods the whole board
    let size = Difficulty::Hard.config().size;
    c.bench_function("flood_empty_hard", |b| {
        b.iter(|| {
            let mut board = Board::with_minefield(Minefield::from_mine_coords(size, &[]).unwrap()).unwrap();
            black_box(board.apply(Action::Reveal))
        })
    });
}

criterion_group!(benches, bench_generate, bench_first_reveal, bench_open_board_flood);
criterion_main!(benches);
