//! Benchmarks for the crossword solver.
//!
//! Each puzzle is solved once per [`Propagation`] mode so the cost of the
//! look-ahead can be compared against the nodes it saves.
//!
//! # Test Data
//!
//! - **`square_3x3`**: a fully open 3x3 grid over every 3-letter word on
//!   `A`..`E`.
//! - **`blocked_5x5`**: a 5x5 grid with four blocked cells over every 4- and
//!   5-letter word on `A`..`D`.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench solver
//! ```

use std::{hint, time::Duration};

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use xwfill_core::{Crossword, Dictionary};
use xwfill_solver::{CrosswordSolver, Propagation, SolverConfig};

const MODES: [Propagation; 3] = [
    Propagation::None,
    Propagation::ForwardChecking,
    Propagation::MaintainArcConsistency,
];

/// Every word of `length` letters drawn from `alphabet`.
fn all_words(alphabet: &[char], length: usize) -> Vec<String> {
    (0..length).fold(vec![String::new()], |prefixes, _| {
        prefixes
            .iter()
            .flat_map(|prefix| {
                alphabet.iter().map(move |&c| {
                    let mut word = prefix.clone();
                    word.push(c);
                    word
                })
            })
            .collect()
    })
}

fn puzzles() -> Vec<(&'static str, Crossword, Dictionary)> {
    let square = "___\n___\n___".parse().unwrap();
    let square_words = Dictionary::new(all_words(&['A', 'B', 'C', 'D', 'E'], 3));

    let blocked = "_____\n_#_#_\n_____\n_#_#_\n_____".parse().unwrap();
    let abcd = ['A', 'B', 'C', 'D'];
    let blocked_words = Dictionary::new(
        all_words(&abcd, 4)
            .into_iter()
            .chain(all_words(&abcd, 5)),
    );

    vec![
        ("square_3x3", square, square_words),
        ("blocked_5x5", blocked, blocked_words),
    ]
}

fn bench_solve(c: &mut Criterion) {
    for (name, crossword, dictionary) in puzzles() {
        for propagation in MODES {
            let config = SolverConfig::new()
                .with_propagation(propagation)
                .with_time_limit(Duration::from_secs(10));
            let solver = CrosswordSolver::with_config(&crossword, &dictionary, config);
            c.bench_with_input(
                BenchmarkId::new(format!("solve_{name}"), propagation),
                &solver,
                |b, solver| {
                    b.iter(|| hint::black_box(solver.solve()));
                },
            );
        }
    }
}

criterion_group!(benches, bench_solve);
criterion_main!(benches);
