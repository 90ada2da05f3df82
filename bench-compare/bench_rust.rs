// Latency harness for launcher-sized lists.
// Prints JSON timings to stdout so runs can be diffed across changes.
//
// Build and run:
//   cargo build --release --example bench_compare
//   ./target/release/examples/bench_compare

use std::time::Instant;

use serde_json::{Value, json};
use tasksift::{Candidate, RankOptions, Ranker, rank};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn generate_candidates(n: usize) -> Vec<Candidate<usize>> {
    const TITLES: [&str; 5] = [
        "Review release notes",
        "Fix login bug",
        "Plan sprint backlog",
        "Update pricingPage copy",
        "Caf\u{00e9} offsite logistics",
    ];
    (0..n)
        .map(|i| Candidate::new(i, format!("{} {i}", TITLES[i % TITLES.len()])))
        .collect()
}

/// Run `f` `iterations` times after `warmup` discarded runs and summarise
/// the per-run latency in microseconds.
fn benchmark<F: FnMut()>(mut f: F, iterations: usize, warmup: usize) -> Value {
    for _ in 0..warmup {
        f();
    }

    let mut times_us = Vec::with_capacity(iterations);
    for _ in 0..iterations {
        let start = Instant::now();
        f();
        times_us.push(start.elapsed().as_secs_f64() * 1_000_000.0);
    }
    times_us.sort_by(f64::total_cmp);

    json!({
        "median_us": times_us[iterations / 2],
        "min_us": times_us[0],
        "max_us": times_us[iterations - 1],
        "p25_us": times_us[iterations / 4],
        "p75_us": times_us[iterations * 3 / 4],
    })
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    let opts = RankOptions::default();

    // 1. Cold ranking at launcher list sizes.
    let mut cold = serde_json::Map::new();
    for size in [100usize, 300, 1_000, 10_000] {
        let items = generate_candidates(size);
        let result = benchmark(
            || {
                let _ = rank("rln", &items, &opts);
            },
            50,
            10,
        );
        cold.insert(size.to_string(), result);
    }

    // 2. A typing session against a warm ranker.
    let items = generate_candidates(300);
    let mut ranker = match Ranker::new(opts.clone()) {
        Ok(ranker) => ranker,
        Err(err) => {
            eprintln!("invalid options: {err}");
            std::process::exit(1);
        }
    };
    let session = ["r", "re", "rel", "rele", "relea", "releas", "release"];
    let typing = benchmark(
        || {
            for query in session {
                let _ = ranker.rank(query, &items);
            }
        },
        50,
        10,
    );

    // 3. Empty query (every candidate returned).
    let empty = benchmark(
        || {
            let _ = rank("", &items, &opts);
        },
        50,
        10,
    );

    let report = json!({
        "cold": cold,
        "typing_session_300": typing,
        "empty_query_300": empty,
    });
    match serde_json::to_string_pretty(&report) {
        Ok(text) => println!("{text}"),
        Err(err) => eprintln!("failed to encode report: {err}"),
    }
}
