use serde::{Deserialize, Serialize};

use crate::outcome::GameOutcome;

/// Core trait that every arcade game core implements.
///
/// The presentation shell owns the tick scheduler and raw input devices;
/// the game only advances its own simulation state and reports events.
pub trait ArcadeGame: Send + Sync {
    /// Game metadata for the launcher catalog.
    fn metadata(&self) -> GameMetadata;

    /// Reinitialize every actor, timer, score, and the outcome from the
    /// start configuration. All randomness for the new run derives from
    /// `seed`, so equal seeds reproduce a run exactly.
    fn reset(&mut self, seed: u64);

    /// Advance one simulation step, consuming any queued input.
    ///
    /// `dt` is measured in nominal frames, not wall-clock seconds: the shell
    /// passes 1.0 per scheduled callback and all physics constants are tuned
    /// for one nominal unit per tick. Once the outcome is terminal, `tick`
    /// is a no-op returning no events until the next `reset`.
    fn tick(&mut self, dt: f32) -> Vec<GameEvent>;

    /// Queue a decoded logical input signal (the game's input type,
    /// MessagePack-encoded). Malformed payloads are dropped.
    fn apply_input(&mut self, input: &[u8]);

    fn outcome(&self) -> GameOutcome;

    /// Current score. Games without a score counter keep the default.
    fn score(&self) -> u32 {
        0
    }

    /// Serialize the current state snapshot for rendering.
    fn serialize_state(&self) -> Vec<u8>;

    /// Replace the current state with a previously serialized snapshot.
    fn apply_state(&mut self, state: &[u8]);

    /// Tick rate in Hz the shell should drive this game at.
    fn tick_rate(&self) -> f32 {
        60.0
    }
}

/// Game metadata for the launcher catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMetadata {
    pub name: String,
    pub description: String,
    /// Human-readable control hint shown on the start overlay.
    pub controls: String,
}

/// Events emitted by a game during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreUpdate { score: u32 },
    GameOver { outcome: GameOutcome },
}

/// Generates the `ArcadeGame` methods that are identical across games:
/// `serialize_state`, `apply_state`, and `outcome`. The `scored` form also
/// generates `score`.
///
/// Requires the implementing struct to have a `state: $StateType` field and
/// `$StateType` to have an `outcome: GameOutcome` field (plus `score: u32`
/// for the `scored` form).
#[macro_export]
macro_rules! arcade_game_boilerplate {
    (state_type: $StateType:ty) => {
        fn serialize_state(&self) -> Vec<u8> {
            rmp_serde::to_vec(&self.state).expect("game state serialization must succeed")
        }

        fn apply_state(&mut self, state: &[u8]) {
            if let Ok(s) = rmp_serde::from_slice::<$StateType>(state) {
                self.state = s;
            }
        }

        fn outcome(&self) -> $crate::outcome::GameOutcome {
            self.state.outcome
        }
    };
    (state_type: $StateType:ty, scored) => {
        $crate::arcade_game_boilerplate!(state_type: $StateType);

        fn score(&self) -> u32 {
            self.state.score
        }
    };
}
