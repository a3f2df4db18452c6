//! Headless round simulator.
//!
//! Seats a table of numbered players and drives the controller through
//! complete rounds with no human input: every reveal is opened and closed,
//! and the vote is decided by a coin flip.

use chameleon_core::{
    BoardProvider, GameController, GameError, Phase, Player, ResolutionStyle, RoundOptions,
    RoundSummary,
};
use derive_getters::Getters;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Result of a simulation run.
#[derive(Debug, Clone, Getters, Serialize)]
pub struct SimulationReport {
    /// One summary per completed round, in order.
    rounds: Vec<RoundSummary>,
    /// Final roster.
    standings: Vec<Player>,
}

/// Drives automated rounds against a board provider.
#[derive(Debug)]
pub struct Simulation<P> {
    provider: P,
    options: RoundOptions,
    players: usize,
    seed: Option<u64>,
}

impl<P: BoardProvider> Simulation<P> {
    /// Creates a simulation for `players` players.
    pub fn new(provider: P, options: RoundOptions, players: usize, seed: Option<u64>) -> Self {
        Self {
            provider,
            options,
            players,
            seed,
        }
    }

    /// Plays `rounds` rounds with the same table.
    ///
    /// # Errors
    ///
    /// Fails on the first rejected event, typically
    /// [`GameError::InsufficientPlayers`] or [`GameError::BoardUnavailable`].
    #[instrument(skip(self), fields(players = self.players, seed = ?self.seed))]
    pub async fn run(&self, rounds: u32) -> Result<SimulationReport, GameError> {
        let (mut game, mut votes) = match self.seed {
            Some(seed) => (
                GameController::seeded(seed),
                StdRng::seed_from_u64(seed.wrapping_add(1)),
            ),
            None => (GameController::new(), StdRng::from_entropy()),
        };

        for seat in 1..=self.players {
            game.add_player(&format!("Player {}", seat))?;
        }

        let mut summaries = Vec::new();
        for round in 0..rounds {
            let request = if round == 0 {
                game.start_game(self.options.clone())?
            } else {
                game.play_again()?
            };
            game.load_board(&self.provider, request).await?;
            let summary = play_out(&mut game, &mut votes)?;
            info!(round = *summary.round(), outcome = %summary.outcome(), "Simulated round");
            summaries.push(summary);
        }

        Ok(SimulationReport {
            rounds: summaries,
            standings: game.state().players().clone(),
        })
    }
}

/// Drives a freshly started round to GAME_OVER.
fn play_out<R: Rng>(
    game: &mut GameController,
    votes: &mut R,
) -> Result<RoundSummary, GameError> {
    while game.phase().is_revealing() {
        game.reveal_role()?;
        game.finish_reveal()?;
    }
    debug!(starter = ?game.starter().map(|p| p.name()), "Discussion skipped");
    game.start_voting()?;

    match game.state().options().resolution() {
        ResolutionStyle::Accusation => game.cast_vote(votes.gen_bool(0.5))?,
        ResolutionStyle::RevealOnly => game.reveal_chameleon()?,
    };

    debug_assert_eq!(game.phase(), Phase::GameOver);
    game.summary()
        .ok_or_else(|| GameError::InvariantViolation("no summary at game over".to_string()))
}
