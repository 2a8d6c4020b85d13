//! Play Othello in the terminal against a computer player or another human.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use tiers_othello::{GameState, Location, Player};
use tiers_player::{Difficulty, Engine};

#[derive(Parser, Debug)]
#[command(author, version, about = "Play Othello against the AI", long_about = None)]
struct Args {
    /// Opponent: easy, medium, hard or human
    #[arg(long, default_value = "medium")]
    opponent: String,

    /// Your colour: B or W
    #[arg(long, default_value = "B")]
    color: Player,
}

/// Accepts algebraic notation ("D3") or a zero-based "row col" pair ("2 3").
fn parse_move(input: &str) -> Option<Location> {
    let input = input.trim();
    if let Ok(loc) = input.parse() {
        return Some(loc);
    }

    let mut parts = input.split_whitespace().map(str::parse::<usize>);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(row)), Some(Ok(col)), None) => Location::from_coords(row, col),
        _ => None,
    }
}

fn read_human_move<I>(state: &GameState, lines: &mut I) -> Result<Location>
where
    I: Iterator<Item = io::Result<String>>,
{
    let legal = state.legal_moves();
    println!("Legal moves: {}", legal);

    loop {
        print!("{} to move: ", state.current_player());
        io::stdout().flush()?;

        let line = lines.next().context("input closed")??;
        match parse_move(&line) {
            Some(mv) if legal.contains(mv) => return Ok(mv),
            Some(mv) => println!("{} is not a legal move. Legal moves: {}", mv, legal),
            None => println!("Enter a square like D3, or a row and column 0-7 like `2 3`."),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let human = args.color;
    let opponent_name = args.opponent.to_ascii_lowercase();
    let mut opponent: Option<Box<dyn Engine>> = match opponent_name.as_str() {
        "human" => None,
        other => {
            let difficulty: Difficulty = other
                .parse()
                .with_context(|| format!("unknown opponent {:?}", other))?;
            Some(difficulty.engine(!human))
        }
    };

    match &opponent {
        Some(engine) => println!("Playing {} as {}.", engine.name(), human),
        None => println!("Human vs human."),
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut state = GameState::new();

    while !state.is_game_over() {
        println!("\n{}", state);

        let engine = match opponent.as_mut() {
            Some(engine) if state.current_player() != human => Some(engine),
            _ => None,
        };

        let mv = match engine {
            Some(engine) => {
                println!("{} is thinking...", engine.name());
                match engine.get_move(&state) {
                    Some(mv) => {
                        let stats = engine.stats();
                        println!(
                            "{} plays {} ({:.2}s, {} positions, depth {})",
                            engine.name(),
                            mv,
                            stats.thinking_time.as_secs_f64(),
                            stats.moves_evaluated,
                            stats.max_depth_reached
                        );
                        mv
                    }
                    None => {
                        println!("{} has no move and passes.", engine.name());
                        state.pass();
                        continue;
                    }
                }
            }
            None => read_human_move(&state, &mut lines)?,
        };

        state.apply_move(mv)?;
    }

    println!("\n{}", state);
    let (black, white) = state.score();
    println!("Final score: Black {} - {} White", black, white);
    match state.winner() {
        Some(winner) if opponent.is_none() => println!("{} wins!", winner),
        Some(winner) if winner == human => println!("You win!"),
        Some(_) => println!("You lose."),
        None => println!("Draw."),
    }

    Ok(())
}
