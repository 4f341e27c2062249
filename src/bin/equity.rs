//! Equity Calculator Binary
//!
//! Computes each player's equity for a set of hole cards and an optional
//! partial board.
//!
//! Usage:
//!   equity AsAh KsKh --board 2c5d9h --trials 100000
//!   equity AsAh KsKh --board 2c5d9hJs --exact

use clap::Parser;
use holdem_equity::*;

#[derive(Parser)]
#[command(author, version, about = "Texas Hold'em equity calculator", long_about = None)]
struct Args {
    /// Hole cards for each player, e.g. `AsAh KsKh`
    #[arg(required = true)]
    holes: Vec<String>,

    /// Known community cards, e.g. `2c5d9h`
    #[arg(short, long, default_value = "")]
    board: String,

    /// Number of sampled runouts
    #[arg(short, long, default_value_t = 10_000)]
    trials: u64,

    /// Worker threads (0 = one per CPU)
    #[arg(short, long, default_value_t = 0)]
    workers: usize,

    /// Fixed seed for reproducible sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Enumerate every runout instead of sampling
    #[arg(long)]
    exact: bool,

    /// Largest number of runouts `--exact` will enumerate
    #[arg(long, default_value_t = 100_000)]
    ceiling: u64,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let holes = args
        .holes
        .iter()
        .map(|s| parse_hole_cards(s))
        .collect::<Result<Vec<Hole>>>()?;
    let board = parse_board(&args.board)?;

    let mut calc = EquityCalculator::new(args.workers);
    if let Some(seed) = args.seed {
        calc = calc.with_seed(seed);
    }

    let exact = if args.exact {
        let out = calc.calculate_exact(&holes, &board, args.ceiling)?;
        if out.is_none() {
            log::warn!(
                "more than {} runouts to enumerate, sampling {} trials instead",
                args.ceiling,
                args.trials
            );
        }
        out
    } else {
        None
    };
    let results = match exact {
        Some(results) => results,
        None => calc.calculate(&holes, &board, args.trials)?,
    };

    log::info!(
        "{} players, board [{}], {} workers",
        holes.len(),
        board.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" "),
        calc.workers()
    );
    println!(
        "{:<8} {:>10} {:>10} {:>10} {:>10} {:>9}",
        "hole", "wins", "ties", "losses", "total", "equity"
    );
    for (hole, r) in holes.iter().zip(&results) {
        println!(
            "{:<8} {:>10} {:>10} {:>10} {:>10} {:>8.2}%",
            hole.to_string(),
            r.wins,
            r.ties,
            r.losses,
            r.total,
            r.equity * 100.0
        );
    }
    Ok(())
}
