use serde::{Deserialize, Serialize};

use arcade_core::arcade_game_boilerplate;
use arcade_core::game_trait::{ArcadeGame, GameEvent, GameMetadata};
use arcade_core::outcome::GameOutcome;
use arcade_core::rng::GameRng;
use arcade_core::time::{Countdown, NOMINAL_FRAME_MS};

/// Distinct symbols; each appears on exactly two cards.
pub const PAIR_COUNT: u8 = 8;
/// Total cards on the table.
pub const CARD_COUNT: usize = (PAIR_COUNT as usize) * 2;
/// Delay before a matched pair locks in.
pub const MATCH_DELAY_MS: f32 = 500.0;
/// Delay before a mismatched pair flips back.
pub const FLIP_BACK_DELAY_MS: f32 = 1000.0;

/// Flip the card at `index`. Ignored while a pair is pending resolution or
/// when the card is already face-up or matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryInput {
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub symbol: u8,
    pub face_up: bool,
    pub matched: bool,
}

/// A face-up pair waiting on its reveal delay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingPair {
    pub first: usize,
    pub second: usize,
    pub timer: Countdown,
}

/// Serializable snapshot of a memory run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryState {
    pub cards: Vec<Card>,
    /// Index of a single face-up card with no partner yet.
    pub first_flip: Option<usize>,
    pub pending: Option<PendingPair>,
    pub moves: u32,
    /// Matched pair count.
    pub score: u32,
    pub outcome: GameOutcome,
}

/// The memory card-matching game core.
pub struct Memory {
    state: MemoryState,
    pending_flips: Vec<usize>,
}

impl Memory {
    pub fn new() -> Self {
        let mut rng = GameRng::from_seed(0);
        Self {
            state: initial_state(&mut rng),
            pending_flips: Vec::new(),
        }
    }

    pub fn state(&self) -> &MemoryState {
        &self.state
    }

    fn flip(&mut self, index: usize) {
        if self.state.pending.is_some() || index >= self.state.cards.len() {
            return;
        }
        let card = self.state.cards[index];
        if card.face_up || card.matched {
            return;
        }
        self.state.cards[index].face_up = true;
        match self.state.first_flip.take() {
            None => self.state.first_flip = Some(index),
            Some(first) => {
                self.state.moves += 1;
                let matched =
                    self.state.cards[first].symbol == self.state.cards[index].symbol;
                let delay = if matched {
                    MATCH_DELAY_MS
                } else {
                    FLIP_BACK_DELAY_MS
                };
                self.state.pending = Some(PendingPair {
                    first,
                    second: index,
                    timer: Countdown::new(delay),
                });
            },
        }
    }

    fn resolve_pending(&mut self, pair: PendingPair) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let matched = self.state.cards[pair.first].symbol == self.state.cards[pair.second].symbol;
        if matched {
            self.state.cards[pair.first].matched = true;
            self.state.cards[pair.second].matched = true;
            self.state.score += 1;
            events.push(GameEvent::ScoreUpdate {
                score: self.state.score,
            });
            if self.state.cards.iter().all(|c| c.matched) {
                self.state.outcome = GameOutcome::Won;
                events.push(GameEvent::GameOver {
                    outcome: GameOutcome::Won,
                });
            }
        } else {
            self.state.cards[pair.first].face_up = false;
            self.state.cards[pair.second].face_up = false;
        }
        events
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

fn initial_state(rng: &mut GameRng) -> MemoryState {
    let mut symbols: Vec<u8> = (0..PAIR_COUNT).chain(0..PAIR_COUNT).collect();
    rng.shuffle(&mut symbols);
    MemoryState {
        cards: symbols
            .into_iter()
            .map(|symbol| Card {
                symbol,
                face_up: false,
                matched: false,
            })
            .collect(),
        first_flip: None,
        pending: None,
        moves: 0,
        score: 0,
        outcome: GameOutcome::Running,
    }
}

impl ArcadeGame for Memory {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Memory Card Match".to_string(),
            description: "Test your memory skills.".to_string(),
            controls: "Click cards to flip".to_string(),
        }
    }

    fn reset(&mut self, seed: u64) {
        let mut rng = GameRng::from_seed(seed);
        self.state = initial_state(&mut rng);
        self.pending_flips.clear();
    }

    fn tick(&mut self, dt: f32) -> Vec<GameEvent> {
        if self.state.outcome.is_terminal() {
            return Vec::new();
        }
        let mut events = Vec::new();

        for index in std::mem::take(&mut self.pending_flips) {
            self.flip(index);
        }

        let fired = self
            .state
            .pending
            .as_mut()
            .is_some_and(|pair| pair.timer.tick(dt * NOMINAL_FRAME_MS));
        if fired
            && let Some(pair) = self.state.pending.take()
        {
            events.extend(self.resolve_pending(pair));
        }

        events
    }

    fn apply_input(&mut self, input: &[u8]) {
        match rmp_serde::from_slice::<MemoryInput>(input) {
            Ok(i) => self.pending_flips.push(i.index),
            Err(e) => {
                tracing::debug!(error = %e, "Dropped malformed memory input");
            },
        }
    }

    arcade_game_boilerplate!(state_type: MemoryState, scored);
}
