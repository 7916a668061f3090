//! Count the words of text files with each container strategy.
//!
//! ```text
//! cargo run -p cdata-bench --example count_words -- -t -n 5 book.txt
//! RUST_LOG=debug cargo run -p cdata-bench --example count_words -- book.txt
//! ```
//!
//! One arena serves every run: it is rewound after each file/strategy pair
//! and released at exit.

use std::process::ExitCode;
use std::time::Instant;

use cdata_arena::Arena;
use cdata_bench::cli::Cli;
use cdata_bench::count_words;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    run(&Cli::parse())
}

fn run(cli: &Cli) -> ExitCode {
    let strategies = cli.strategies();
    let mut arena = Arena::new();
    for file in &cli.files {
        let text = match std::fs::read_to_string(file) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("Error: Could not open file \"{file}\": {e}");
                return ExitCode::FAILURE;
            }
        };
        for (run_index, &strategy) in strategies.iter().enumerate() {
            let started = Instant::now();
            let count = match count_words(strategy, &arena, &text) {
                Ok(count) => count,
                Err(e) => {
                    eprintln!("Error: {file}: {e}");
                    return ExitCode::FAILURE;
                }
            };
            let elapsed = started.elapsed();

            if run_index == 0 {
                println!("File: {file}");
                println!("  lines: {}", count.lines);
                println!("  chars: {}", count.chars);
                println!("  words: {}", count.words);
            }
            println!("  algorithm: {}", strategy.name());
            println!("    execution time: {}s", elapsed.as_secs_f64());
            println!("    unique words: {}", count.unique());
            let top = count.top(cli.top);
            if !top.is_empty() {
                println!("    top {} words:", top.len());
                for (rank, word) in top.iter().enumerate() {
                    println!("      {:02}. {:<15} {:>6}", rank + 1, word.word, word.count);
                }
            }
            drop(count);
            arena.free_all();
        }
    }
    arena.delete();
    ExitCode::SUCCESS
}
