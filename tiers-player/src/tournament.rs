//! Engine-versus-engine matches and round-robin tournaments.

use crate::engine::Engine;
use derive_more::{Display, Error};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::io::{self, Write};
use tiers_othello::{GameState, Location, MoveError, Player, NUM_SPACES};

#[derive(Debug, Display, Error)]
pub enum TournamentError {
    #[display(fmt = "{} played illegal move {}: {}", engine, mv, source)]
    IllegalMove {
        engine: String,
        mv: Location,
        source: MoveError,
    },
    #[display(fmt = "both engines passed with moves available")]
    Stalled,
    #[display(fmt = "could not write report: {}", source)]
    Io { source: io::Error },
}

impl From<io::Error> for TournamentError {
    fn from(err: io::Error) -> Self {
        TournamentError::Io { source: err }
    }
}

/// One engine's results over a match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineTally {
    pub name: String,
    pub wins: u32,
    /// Sum over games of (own discs - opponent discs).
    pub disc_diff: i32,
    /// Sum over games of own final discs.
    pub total_discs: u32,
}

impl EngineTally {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Self::default()
        }
    }

    fn record(&mut self, own: u8, other: u8) {
        self.disc_diff += i32::from(own) - i32::from(other);
        self.total_discs += u32::from(own);
    }
}

/// The outcome of a match between two engines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchRecord {
    pub first: EngineTally,
    pub second: EngineTally,
    pub draws: u32,
    pub num_games: u32,
}

impl MatchRecord {
    pub fn matchup(&self) -> String {
        format!("{} vs {}", self.first.name, self.second.name)
    }

    fn percent(&self, count: u32) -> f64 {
        if self.num_games == 0 {
            0.0
        } else {
            f64::from(count) / f64::from(self.num_games) * 100.0
        }
    }

    fn average_discs(&self, tally: &EngineTally) -> f64 {
        if self.num_games == 0 {
            0.0
        } else {
            f64::from(tally.total_discs) / f64::from(self.num_games)
        }
    }
}

impl fmt::Display for MatchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (first, second) = (&self.first, &self.second);
        writeln!(
            f,
            "{}: {} wins ({:.1}%),  {}: {} wins ({:.1}%),  Draws: {} ({:.1}%)",
            first.name,
            first.wins,
            self.percent(first.wins),
            second.name,
            second.wins,
            self.percent(second.wins),
            self.draws,
            self.percent(self.draws),
        )?;
        writeln!(
            f,
            "Disc differential: {} {:+} | {} {:+}",
            first.name, first.disc_diff, second.name, second.disc_diff
        )?;
        writeln!(
            f,
            "Average final discs: {} {:.1}/{} | {} {:.1}/{}",
            first.name,
            self.average_discs(first),
            NUM_SPACES,
            second.name,
            self.average_discs(second),
            NUM_SPACES
        )
    }
}

/// Runs matches and keeps every record.
///
/// Games may open with `opening_plies` uniformly random moves drawn from a seeded
/// generator, so deterministic engines still see varied positions.
pub struct Tournament {
    rng: StdRng,
    opening_plies: usize,
    results: Vec<MatchRecord>,
}

impl Default for Tournament {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Tournament {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            opening_plies: 0,
            results: Vec::new(),
        }
    }

    pub fn with_opening_plies(mut self, opening_plies: usize) -> Self {
        self.opening_plies = opening_plies;
        self
    }

    pub fn results(&self) -> &[MatchRecord] {
        &self.results
    }

    fn random_opening(&mut self, state: &mut GameState) -> Result<(), TournamentError> {
        for _ in 0..self.opening_plies {
            let mut moves = state.legal_moves();
            if moves.is_empty() {
                break;
            }

            let choice = self.rng.gen_range(0..moves.len());
            if let Some(mv) = moves.nth(choice) {
                state
                    .apply_move(mv)
                    .map_err(|source| TournamentError::IllegalMove {
                        engine: "random opening".to_owned(),
                        mv,
                        source,
                    })?;
            }
        }
        Ok(())
    }

    /// Play one game to the end. An engine that returns no move passes the turn.
    pub fn play_game(
        &mut self,
        black: &mut dyn Engine,
        white: &mut dyn Engine,
    ) -> Result<GameState, TournamentError> {
        black.set_player(Player::Black);
        white.set_player(Player::White);

        let mut state = GameState::new();
        self.random_opening(&mut state)?;

        let mut consecutive_passes = 0;
        while !state.is_game_over() {
            let engine: &mut dyn Engine = match state.current_player() {
                Player::Black => &mut *black,
                Player::White => &mut *white,
            };

            match engine.get_move(&state) {
                Some(mv) => {
                    state
                        .apply_move(mv)
                        .map_err(|source| TournamentError::IllegalMove {
                            engine: engine.name().to_owned(),
                            mv,
                            source,
                        })?;
                    consecutive_passes = 0;
                }
                None => {
                    consecutive_passes += 1;
                    if consecutive_passes >= 2 {
                        return Err(TournamentError::Stalled);
                    }
                    state.pass();
                }
            }
        }

        Ok(state)
    }

    /// Play `num_games` between two engines, swapping colours every game:
    /// `first` plays Black in the even-numbered games.
    pub fn run_match(
        &mut self,
        first: &mut dyn Engine,
        second: &mut dyn Engine,
        num_games: u32,
    ) -> Result<MatchRecord, TournamentError> {
        self.run_match_with_progress(first, second, num_games, |_| {})
    }

    /// Like [`Tournament::run_match`], calling `progress` with the number of games
    /// finished after each one.
    pub fn run_match_with_progress<F>(
        &mut self,
        first: &mut dyn Engine,
        second: &mut dyn Engine,
        num_games: u32,
        mut progress: F,
    ) -> Result<MatchRecord, TournamentError>
    where
        F: FnMut(u32),
    {
        let mut record = MatchRecord {
            first: EngineTally::new(first.name()),
            second: EngineTally::new(second.name()),
            draws: 0,
            num_games,
        };

        for game in 0..num_games {
            let first_is_black = game % 2 == 0;
            let state = if first_is_black {
                self.play_game(first, second)?
            } else {
                self.play_game(second, first)?
            };

            let (black_discs, white_discs) = state.score();
            let first_color = if first_is_black {
                Player::Black
            } else {
                Player::White
            };
            let (first_discs, second_discs) = if first_is_black {
                (black_discs, white_discs)
            } else {
                (white_discs, black_discs)
            };

            match state.winner() {
                Some(winner) if winner == first_color => record.first.wins += 1,
                Some(_) => record.second.wins += 1,
                None => record.draws += 1,
            }
            record.first.record(first_discs, second_discs);
            record.second.record(second_discs, first_discs);

            debug!(
                "game {} of {}: Black {} White {}",
                game + 1,
                record.matchup(),
                black_discs,
                white_discs
            );
            progress(game + 1);
        }

        self.results.push(record.clone());
        Ok(record)
    }

    /// Every engine plays every later engine once, `num_games` games per pairing.
    /// A header and each match report are written to `out`.
    pub fn full_tournament<W: Write>(
        &mut self,
        engines: &mut [Box<dyn Engine>],
        num_games: u32,
        out: &mut W,
    ) -> Result<Vec<MatchRecord>, TournamentError> {
        self.full_tournament_with_progress(engines, num_games, out, |_, _| {})
    }

    /// Like [`Tournament::full_tournament`], calling `progress` with the matchup name
    /// and games finished after each game.
    pub fn full_tournament_with_progress<W, F>(
        &mut self,
        engines: &mut [Box<dyn Engine>],
        num_games: u32,
        out: &mut W,
        mut progress: F,
    ) -> Result<Vec<MatchRecord>, TournamentError>
    where
        W: Write,
        F: FnMut(&str, u32),
    {
        writeln!(out, "=== Othello AI Tournament ===")?;
        writeln!(out, "Games per matchup: {}", num_games)?;
        writeln!(out)?;

        let mut records = Vec::new();
        for i in 0..engines.len() {
            for j in (i + 1)..engines.len() {
                // Split so both engines can be borrowed mutably at once.
                let (left, right) = engines.split_at_mut(j);
                let first = left[i].as_mut();
                let second = right[0].as_mut();

                let matchup = format!("{} vs {}", first.name(), second.name());
                info!("starting {} ({} games)", matchup, num_games);
                writeln!(out, "--- {} ---", matchup)?;

                let record = self.run_match_with_progress(first, second, num_games, |done| {
                    progress(&matchup, done)
                })?;
                info!("finished {}", matchup);

                writeln!(out, "{}", record)?;
                records.push(record);
            }
        }

        out.flush()?;
        Ok(records)
    }
}
