use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use damson_chess::game_state::board::Board;
use damson_chess::search::board_scoring::MaterialScorer;
use damson_chess::search::iterative_deepening::{find_best_move, SearchConfig, SearchOutcome};

struct BenchCase {
    name: &'static str,
    fen: &'static str,
    depth: u8,
}

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "startpos",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        depth: 3,
    },
    BenchCase {
        name: "italian",
        fen: "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3",
        depth: 3,
    },
    BenchCase {
        name: "rook_endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        depth: 4,
    },
];

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_fixed_depth");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(6));
    group.sample_size(10);

    for case in CASES {
        let (board, side) = Board::from_fen(case.fen).expect("benchmark FEN should parse");
        let config = SearchConfig::fixed_depth(case.depth);

        // Correctness guard: a best move must exist in every bench case.
        let mut warmup_board = board.clone();
        let warmup = find_best_move(&mut warmup_board, side, &MaterialScorer, &config)
            .expect("search should run");
        assert!(matches!(warmup, SearchOutcome::BestMove(_)));

        let bench_name = format!("{}_d{}", case.name, case.depth);
        group.bench_function(BenchmarkId::from_parameter(bench_name), |b| {
            b.iter(|| {
                let mut bench_board = board.clone();
                let outcome = find_best_move(
                    black_box(&mut bench_board),
                    black_box(side),
                    &MaterialScorer,
                    &config,
                )
                .expect("search should run");
                black_box(outcome)
            });
        });
    }

    group.finish();
}

criterion_group!(search_benches, bench_search);
criterion_main!(search_benches);
