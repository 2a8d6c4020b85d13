//! Round-robin tournament between the computer players.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Duration;
use tiers_othello::Player;
use tiers_player::{Difficulty, Engine, Tournament};

#[derive(Parser, Debug)]
#[command(author, version, about = "Pit the Othello AIs against each other", long_about = None)]
struct Args {
    /// Games played per matchup
    #[arg(long, default_value_t = 50)]
    games: u32,

    /// Where to write the results
    #[arg(long, default_value = "tournament_results.txt")]
    output: PathBuf,

    /// Engines to enter, comma-separated
    #[arg(long, value_delimiter = ',', default_value = "easy,medium,hard")]
    engines: Vec<Difficulty>,

    /// Per-move time limit in seconds for the timed engines
    #[arg(long)]
    time_limit: Option<f64>,

    /// Random moves played at the start of every game
    #[arg(long, default_value_t = 0)]
    opening_plies: usize,

    /// Seed for the random openings
    #[arg(long, default_value_t = 1u64)]
    seed: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.engines.len() < 2 {
        anyhow::bail!("need at least two engines, got {}", args.engines.len());
    }
    let time_limit = match args.time_limit {
        Some(secs) if !secs.is_finite() || secs <= 0.0 => {
            anyhow::bail!("time limit must be a positive number of seconds")
        }
        Some(secs) => Some(Duration::from_secs_f64(secs)),
        None => None,
    };

    let mut engines: Vec<Box<dyn Engine>> = args
        .engines
        .iter()
        .map(|difficulty| difficulty.engine_with_time_limit(Player::Black, time_limit))
        .collect();

    let pairings = (engines.len() * (engines.len() - 1) / 2) as u64;
    let progress = ProgressBar::new(pairings * u64::from(args.games));
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")?,
    );

    println!("=== Othello AI Tournament ===");
    println!("Games per matchup: {}\n", args.games);

    let file = File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    let mut out = BufWriter::new(file);

    let records = Tournament::new(args.seed)
        .with_opening_plies(args.opening_plies)
        .full_tournament_with_progress(&mut engines, args.games, &mut out, |matchup, _| {
            progress.set_message(matchup.to_owned());
            progress.inc(1);
        })?;
    progress.finish_and_clear();

    for record in &records {
        println!("--- {} ---", record.matchup());
        println!("{}", record);
    }
    println!("Results written to {}", args.output.display());

    Ok(())
}
