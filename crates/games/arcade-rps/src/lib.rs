use serde::{Deserialize, Serialize};

use arcade_core::arcade_game_boilerplate;
use arcade_core::error::InvalidMove;
use arcade_core::game_trait::{ArcadeGame, GameEvent, GameMetadata};
use arcade_core::outcome::GameOutcome;
use arcade_core::rng::GameRng;

/// A throw. Rock beats scissors, paper beats rock, scissors beats paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

/// All throws, in the order the machine draws from.
pub const CHOICES: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

impl Choice {
    pub fn beats(self) -> Choice {
        match self {
            Self::Rock => Self::Scissors,
            Self::Paper => Self::Rock,
            Self::Scissors => Self::Paper,
        }
    }
}

/// The player's throw for this round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpsInput {
    pub choice: Choice,
}

/// Serializable snapshot of an RPS session. The win tallies persist across
/// rounds and clear on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpsState {
    pub player_choice: Option<Choice>,
    pub cpu_choice: Option<Choice>,
    pub player_score: u32,
    pub cpu_score: u32,
    pub outcome: GameOutcome,
}

/// The rock-paper-scissors game core. Each round is a one-shot state
/// machine: a single throw immediately produces a terminal outcome, and
/// `next_round` opens a fresh round keeping the tallies.
pub struct Rps {
    state: RpsState,
    pending_choice: Option<Choice>,
    rng: GameRng,
}

impl Rps {
    pub fn new() -> Self {
        Self {
            state: initial_state(),
            pending_choice: None,
            rng: GameRng::from_seed(0),
        }
    }

    pub fn state(&self) -> &RpsState {
        &self.state
    }

    /// Resolve a round: draw the machine's throw and score the comparison.
    pub fn play(&mut self, choice: Choice) -> Result<GameOutcome, InvalidMove> {
        if self.state.outcome.is_terminal() {
            return Err(InvalidMove::GameFinished);
        }
        let cpu = *self.rng.pick(&CHOICES).expect("choice table is non-empty");
        self.state.player_choice = Some(choice);
        self.state.cpu_choice = Some(cpu);
        self.state.outcome = if choice == cpu {
            GameOutcome::Draw
        } else if choice.beats() == cpu {
            self.state.player_score += 1;
            GameOutcome::Won
        } else {
            self.state.cpu_score += 1;
            GameOutcome::Lost
        };
        Ok(self.state.outcome)
    }

    /// Clear the round while keeping both tallies.
    pub fn next_round(&mut self) {
        self.state.player_choice = None;
        self.state.cpu_choice = None;
        self.state.outcome = GameOutcome::Running;
    }
}

impl Default for Rps {
    fn default() -> Self {
        Self::new()
    }
}

fn initial_state() -> RpsState {
    RpsState {
        player_choice: None,
        cpu_choice: None,
        player_score: 0,
        cpu_score: 0,
        outcome: GameOutcome::Running,
    }
}

impl ArcadeGame for Rps {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Rock Paper Scissors".to_string(),
            description: "Beat the computer.".to_string(),
            controls: "Pick rock, paper, or scissors".to_string(),
        }
    }

    fn reset(&mut self, seed: u64) {
        self.state = initial_state();
        self.pending_choice = None;
        self.rng = GameRng::from_seed(seed);
    }

    fn tick(&mut self, _dt: f32) -> Vec<GameEvent> {
        if self.state.outcome.is_terminal() {
            return Vec::new();
        }
        let mut events = Vec::new();
        if let Some(choice) = self.pending_choice.take()
            && let Ok(outcome) = self.play(choice)
        {
            if outcome == GameOutcome::Won {
                events.push(GameEvent::ScoreUpdate {
                    score: self.state.player_score,
                });
            }
            events.push(GameEvent::GameOver { outcome });
        }
        events
    }

    fn apply_input(&mut self, input: &[u8]) {
        match rmp_serde::from_slice::<RpsInput>(input) {
            Ok(i) => self.pending_choice = Some(i.choice),
            Err(e) => {
                tracing::debug!(error = %e, "Dropped malformed rps input");
            },
        }
    }

    fn score(&self) -> u32 {
        self.state.player_score
    }

    arcade_game_boilerplate!(state_type: RpsState);
}
