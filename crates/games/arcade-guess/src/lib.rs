use serde::{Deserialize, Serialize};

use arcade_core::arcade_game_boilerplate;
use arcade_core::error::InvalidMove;
use arcade_core::game_trait::{ArcadeGame, GameEvent, GameMetadata};
use arcade_core::outcome::GameOutcome;
use arcade_core::rng::GameRng;

/// Inclusive bounds of the hidden target.
pub const TARGET_MIN: u32 = 1;
pub const TARGET_MAX: u32 = 100;

/// A guess at the hidden number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessInput {
    pub value: u32,
}

/// How a guess compared against the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Answer {
    TooLow,
    TooHigh,
    Correct,
}

/// Serializable snapshot of a guessing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessState {
    /// The hidden number, drawn at reset.
    pub target: u32,
    pub attempts: u32,
    /// Past guesses with their answers, newest first.
    pub history: Vec<(u32, Answer)>,
    pub score: u32,
    pub outcome: GameOutcome,
}

/// The number-guessing game core. A degenerate one-shot state machine: each
/// guess resolves immediately, and a correct guess ends the session.
pub struct GuessGame {
    state: GuessState,
    pending_guesses: Vec<u32>,
}

impl GuessGame {
    pub fn new() -> Self {
        let mut rng = GameRng::from_seed(0);
        Self {
            state: initial_state(&mut rng),
            pending_guesses: Vec::new(),
        }
    }

    pub fn state(&self) -> &GuessState {
        &self.state
    }

    /// Compare a guess against the target and record it.
    pub fn guess(&mut self, value: u32) -> Result<Answer, InvalidMove> {
        if self.state.outcome.is_terminal() {
            return Err(InvalidMove::GameFinished);
        }
        self.state.attempts += 1;
        let answer = match value.cmp(&self.state.target) {
            std::cmp::Ordering::Less => Answer::TooLow,
            std::cmp::Ordering::Greater => Answer::TooHigh,
            std::cmp::Ordering::Equal => Answer::Correct,
        };
        self.state.history.insert(0, (value, answer));
        if answer == Answer::Correct {
            self.state.score += 1;
            self.state.outcome = GameOutcome::Won;
        }
        Ok(answer)
    }
}

impl Default for GuessGame {
    fn default() -> Self {
        Self::new()
    }
}

fn initial_state(rng: &mut GameRng) -> GuessState {
    GuessState {
        target: rng.range_u32(TARGET_MIN, TARGET_MAX + 1),
        attempts: 0,
        history: Vec::new(),
        score: 0,
        outcome: GameOutcome::Running,
    }
}

impl ArcadeGame for GuessGame {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Number Guessing".to_string(),
            description: "Find the secret number.".to_string(),
            controls: "Type a number from 1 to 100".to_string(),
        }
    }

    fn reset(&mut self, seed: u64) {
        let mut rng = GameRng::from_seed(seed);
        self.state = initial_state(&mut rng);
        self.pending_guesses.clear();
    }

    fn tick(&mut self, _dt: f32) -> Vec<GameEvent> {
        if self.state.outcome.is_terminal() {
            return Vec::new();
        }
        let mut events = Vec::new();
        for value in std::mem::take(&mut self.pending_guesses) {
            match self.guess(value) {
                Ok(Answer::Correct) => {
                    events.push(GameEvent::ScoreUpdate {
                        score: self.state.score,
                    });
                    events.push(GameEvent::GameOver {
                        outcome: GameOutcome::Won,
                    });
                    break;
                },
                Ok(_) => {},
                Err(e) => {
                    tracing::debug!(value, error = %e, "Rejected guess");
                },
            }
        }
        events
    }

    fn apply_input(&mut self, input: &[u8]) {
        match rmp_serde::from_slice::<GuessInput>(input) {
            Ok(i) => self.pending_guesses.push(i.value),
            Err(e) => {
                tracing::debug!(error = %e, "Dropped malformed guess input");
            },
        }
    }

    arcade_game_boilerplate!(state_type: GuessState, scored);
}
