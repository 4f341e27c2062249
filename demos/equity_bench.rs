//! Benchmark equity calculations across board states and player counts.
//!
//! Usage:
//!   cargo run --release --example equity_bench
//!
//! This measures:
//! - Heads-up and multi-way equity
//! - Exact vs Monte Carlo
//! - Different board states (preflop, flop, turn, river)
//! - Batch hand evaluation

use std::time::Instant;

use holdem_equity::{
    evaluate_batch, parse_board, parse_cards, parse_hole_cards, Deck, EquityCalculator, Hole,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn format_duration(nanos: u128) -> String {
    if nanos < 1_000 {
        format!("{} ns", nanos)
    } else if nanos < 1_000_000 {
        format!("{:.1} μs", nanos as f64 / 1_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.2} ms", nanos as f64 / 1_000_000.0)
    } else {
        format!("{:.3} s", nanos as f64 / 1_000_000_000.0)
    }
}

fn bench<F>(name: &str, iterations: u64, mut f: F)
where
    F: FnMut(),
{
    // Warmup
    f();

    let start = Instant::now();
    for _ in 0..iterations {
        f();
    }
    let duration = start.elapsed();

    let total_ns = duration.as_nanos();
    let per_iter_ns = total_ns / iterations as u128;
    let per_sec = (iterations as f64) / duration.as_secs_f64();

    println!("{:50} {:>12}  ({:>10.0} /s)",
        name,
        format_duration(per_iter_ns),
        per_sec
    );
}

fn holes(list: &[&str]) -> Vec<Hole> {
    list.iter().map(|s| parse_hole_cards(s).unwrap()).collect()
}

fn main() {
    env_logger::init();
    let calc = EquityCalculator::default().with_seed(42);

    println!("=== Equity Calculator Benchmarks ({} workers) ===\n", calc.workers());
    println!("{:50} {:>12}  {:>13}", "Scenario", "Time/Iter", "Throughput");
    println!("{:-<78}", "");

    let hu = holes(&["AsAh", "KsKh"]);
    let three = holes(&["AsAh", "KsKh", "QsQh"]);
    let six = holes(&["AsAh", "KsKh", "QsQh", "JsJh", "TcTd", "9c9d"]);

    let flop = parse_board("KcQd2h").unwrap();
    let turn = parse_board("KcQd2h3s").unwrap();
    let river = parse_board("KcQd2h3s4c").unwrap();

    println!("\n--- Heads-Up Exact Equity ---");

    bench("HU Exact: River (complete board)", 100, || {
        let _ = calc.calculate_exact(&hu, &river, u64::MAX).unwrap();
    });

    bench("HU Exact: Turn (4 board cards)", 100, || {
        let _ = calc.calculate_exact(&hu, &turn, u64::MAX).unwrap();
    });

    bench("HU Exact: Flop (3 board cards)", 10, || {
        let _ = calc.calculate_exact(&hu, &flop, u64::MAX).unwrap();
    });

    println!("\n--- Heads-Up Monte Carlo (10k trials) ---");

    bench("HU MC 10k: Preflop", 10, || {
        let _ = calc.calculate(&hu, &[], 10_000).unwrap();
    });

    bench("HU MC 10k: Flop", 10, || {
        let _ = calc.calculate(&hu, &flop, 10_000).unwrap();
    });

    bench("HU MC 10k: Turn", 10, || {
        let _ = calc.calculate(&hu, &turn, 10_000).unwrap();
    });

    println!("\n--- Multi-Way ---");

    bench("3-way Exact: Turn", 100, || {
        let _ = calc.calculate_exact(&three, &turn, u64::MAX).unwrap();
    });

    bench("3-way Exact: Flop", 10, || {
        let _ = calc.calculate_exact(&three, &flop, u64::MAX).unwrap();
    });

    bench("3-way MC 10k: Preflop", 10, || {
        let _ = calc.calculate(&three, &[], 10_000).unwrap();
    });

    bench("6-way MC 10k: Preflop", 10, || {
        let _ = calc.calculate(&six, &[], 10_000).unwrap();
    });

    println!("\n--- MC Trial Scaling (Preflop HU) ---");

    bench("MC 1k trials", 100, || {
        let _ = calc.calculate(&hu, &[], 1_000).unwrap();
    });

    bench("MC 10k trials", 10, || {
        let _ = calc.calculate(&hu, &[], 10_000).unwrap();
    });

    bench("MC 100k trials", 1, || {
        let _ = calc.calculate(&hu, &[], 100_000).unwrap();
    });

    println!("\n--- Batch Evaluation ---");

    let mut rng = SmallRng::seed_from_u64(7);
    let candidates: Vec<Vec<_>> = (0..100_000)
        .map(|_| {
            let mut deck = Deck::full();
            deck.shuffle(&mut rng);
            deck.draw_many(5).unwrap()
        })
        .collect();

    bench("Batch 100k random hands", 10, || {
        let _ = evaluate_batch(&candidates, calc.workers()).unwrap();
    });

    let royal = parse_cards("AsKsQsJsTs").unwrap();
    bench("Batch 1 hand (pool overhead)", 1000, || {
        let _ = evaluate_batch(&[royal.clone()], 1).unwrap();
    });

    println!("\n{:-<78}", "");
}
