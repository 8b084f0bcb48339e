//! Runs a small head-to-head series between the iterative engine and the
//! random baseline, printing per-game outcomes and a summary report.

use damson_chess::engines::engine_iterative::IterativeEngine;
use damson_chess::engines::engine_random::RandomEngine;
use damson_chess::engines::engine_trait::{Engine, GoParams};
use damson_chess::utils::engine_match_harness::{run_series, MatchConfig};

fn main() {
    let mut iterative = IterativeEngine::new();
    let mut random = RandomEngine::new();

    let config = MatchConfig {
        max_plies: 160,
        opening_plies: 4,
        go_params: GoParams {
            depth: Some(2),
            movetime_ms: Some(500),
        },
    };

    println!(
        "running series: {} (white) vs {} (black)",
        iterative.name(),
        random.name()
    );

    match run_series(&mut iterative, &mut random, 5, 42, &config) {
        Ok(stats) => {
            for (game, outcome) in stats.outcomes.iter().enumerate() {
                println!("game {game}: {outcome:?}");
            }
            println!("{}", stats.report());
        }
        Err(err) => {
            eprintln!("series aborted: {err}");
            std::process::exit(1);
        }
    }
}
