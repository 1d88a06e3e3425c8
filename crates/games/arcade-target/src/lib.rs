use serde::{Deserialize, Serialize};

use arcade_core::arcade_game_boilerplate;
use arcade_core::game_trait::{ArcadeGame, GameEvent, GameMetadata};
use arcade_core::geom::Rect;
use arcade_core::outcome::GameOutcome;
use arcade_core::rng::GameRng;
use arcade_core::time::{Countdown, IntervalTimer, NOMINAL_FRAME_MS};

/// Play-field dimensions.
pub const FIELD_WIDTH: f32 = 600.0;
pub const FIELD_HEIGHT: f32 = 400.0;
/// Round length.
pub const ROUND_MS: f32 = 30_000.0;
/// Milliseconds between spawn attempts.
pub const SPAWN_MS: f32 = 600.0;
/// Concurrent target cap; spawn attempts above it are skipped.
pub const MAX_TARGETS: usize = 5;
/// Target lifetime before it expires on its own.
pub const TARGET_LIFETIME_MS: f32 = 2000.0;
/// Random target size range.
pub const SIZE_MIN: f32 = 30.0;
pub const SIZE_MAX: f32 = 70.0;
/// Points per hit.
pub const HIT_POINTS: u32 = 10;

/// A shot at field coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetInput {
    pub x: f32,
    pub y: f32,
}

/// A live target. Expires when its lifetime countdown ends regardless of
/// where it sits in the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub lifetime: Countdown,
}

impl Target {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }
}

/// Serializable snapshot of a target-shooting round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetState {
    pub targets: Vec<Target>,
    /// Monotonic id source for spawned targets.
    pub next_id: u64,
    pub spawner: IntervalTimer,
    pub round: Countdown,
    pub score: u32,
    pub outcome: GameOutcome,
}

/// The target-shooting game core.
pub struct TargetRange {
    state: TargetState,
    pending_shots: Vec<TargetInput>,
    rng: GameRng,
}

impl TargetRange {
    pub fn new() -> Self {
        Self {
            state: initial_state(),
            pending_shots: Vec::new(),
            rng: GameRng::from_seed(0),
        }
    }

    pub fn state(&self) -> &TargetState {
        &self.state
    }

    /// Whole seconds left on the round clock.
    pub fn seconds_left(&self) -> u32 {
        (self.state.round.remaining_ms() / 1000.0).ceil() as u32
    }

    fn resolve_shot(&mut self, shot: TargetInput) -> Option<u64> {
        let hit = self
            .state
            .targets
            .iter()
            .position(|t| t.bounds().contains_point(shot.x, shot.y))?;
        let id = self.state.targets.remove(hit).id;
        self.state.score += HIT_POINTS;
        Some(id)
    }

    fn spawn_target(&mut self) {
        let size = self.rng.range_f32(SIZE_MIN, SIZE_MAX);
        let target = Target {
            id: self.state.next_id,
            x: self.rng.range_f32(0.0, FIELD_WIDTH - size),
            y: self.rng.range_f32(0.0, FIELD_HEIGHT - size),
            size,
            lifetime: Countdown::new(TARGET_LIFETIME_MS),
        };
        self.state.next_id += 1;
        self.state.targets.push(target);
    }
}

impl Default for TargetRange {
    fn default() -> Self {
        Self::new()
    }
}

fn initial_state() -> TargetState {
    TargetState {
        targets: Vec::new(),
        next_id: 0,
        spawner: IntervalTimer::new(SPAWN_MS),
        round: Countdown::new(ROUND_MS),
        score: 0,
        outcome: GameOutcome::Running,
    }
}

impl ArcadeGame for TargetRange {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Shooting Target".to_string(),
            description: "Hit the moving targets.".to_string(),
            controls: "Click targets to shoot".to_string(),
        }
    }

    fn reset(&mut self, seed: u64) {
        self.state = initial_state();
        self.pending_shots.clear();
        self.rng = GameRng::from_seed(seed);
    }

    fn tick(&mut self, dt: f32) -> Vec<GameEvent> {
        if self.state.outcome.is_terminal() {
            return Vec::new();
        }
        let dt_ms = dt * NOMINAL_FRAME_MS;
        let mut events = Vec::new();

        for shot in std::mem::take(&mut self.pending_shots) {
            if self.resolve_shot(shot).is_some() {
                events.push(GameEvent::ScoreUpdate {
                    score: self.state.score,
                });
            }
        }

        // The round clock ends the game with whatever score stands.
        if self.state.round.tick(dt_ms) {
            self.state.outcome = GameOutcome::Won;
            events.push(GameEvent::GameOver {
                outcome: GameOutcome::Won,
            });
            return events;
        }

        for target in &mut self.state.targets {
            target.lifetime.tick(dt_ms);
        }
        self.state.targets.retain(|t| !t.lifetime.is_expired());

        if self.state.spawner.tick(dt_ms) && self.state.targets.len() < MAX_TARGETS {
            self.spawn_target();
        }

        events
    }

    fn apply_input(&mut self, input: &[u8]) {
        match rmp_serde::from_slice::<TargetInput>(input) {
            Ok(shot) => self.pending_shots.push(shot),
            Err(e) => {
                tracing::debug!(error = %e, "Dropped malformed target input");
            },
        }
    }

    arcade_game_boilerplate!(state_type: TargetState, scored);
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_core::test_helpers;

    fn shot(x: f32, y: f32) -> Vec<u8> {
        rmp_serde::to_vec(&TargetInput { x, y }).unwrap()
    }

    /// Ticks equivalent to the given simulated milliseconds, rounded up.
    fn ticks_for_ms(ms: f32) -> usize {
        (ms / NOMINAL_FRAME_MS).ceil() as usize + 1
    }

    #[test]
    fn reset_starts_an_empty_field() {
        let mut game = TargetRange::new();
        game.reset(0);
        assert!(game.state.targets.is_empty());
        assert_eq!(game.score(), 0);
        assert_eq!(game.seconds_left(), 30);
    }

    #[test]
    fn targets_spawn_on_the_interval() {
        let mut game = TargetRange::new();
        game.reset(0);
        test_helpers::run_ticks(&mut game, ticks_for_ms(SPAWN_MS), 1.0);
        assert_eq!(game.state.targets.len(), 1);
        let target = &game.state.targets[0];
        assert!((SIZE_MIN..SIZE_MAX).contains(&target.size));
        assert!(target.x >= 0.0 && target.x + target.size <= FIELD_WIDTH);
        assert!(target.y >= 0.0 && target.y + target.size <= FIELD_HEIGHT);
    }

    #[test]
    fn concurrent_targets_cap_at_five() {
        let mut game = TargetRange::new();
        game.reset(0);
        // Keep every target alive forever; only the cap limits the count.
        for _ in 0..ticks_for_ms(SPAWN_MS * 12.0) {
            for target in &mut game.state.targets {
                target.lifetime = Countdown::new(TARGET_LIFETIME_MS);
            }
            game.tick(1.0);
        }
        assert_eq!(game.state.targets.len(), MAX_TARGETS);
    }

    #[test]
    fn targets_expire_after_their_lifetime() {
        let mut game = TargetRange::new();
        game.reset(0);
        test_helpers::run_ticks(&mut game, ticks_for_ms(SPAWN_MS), 1.0);
        let id = game.state.targets[0].id;
        test_helpers::run_ticks(&mut game, ticks_for_ms(TARGET_LIFETIME_MS), 1.0);
        assert!(
            game.state.targets.iter().all(|t| t.id != id),
            "the first target must expire after its 2s lifetime"
        );
    }

    #[test]
    fn a_hit_scores_and_removes_the_target() {
        let mut game = TargetRange::new();
        game.reset(0);
        test_helpers::run_ticks(&mut game, ticks_for_ms(SPAWN_MS), 1.0);
        let target = game.state.targets[0].clone();
        game.apply_input(&shot(
            target.x + target.size / 2.0,
            target.y + target.size / 2.0,
        ));
        let events = game.tick(1.0);
        assert_eq!(game.score(), HIT_POINTS);
        assert!(game.state.targets.iter().all(|t| t.id != target.id));
        assert!(events.contains(&GameEvent::ScoreUpdate { score: HIT_POINTS }));
    }

    #[test]
    fn a_miss_scores_nothing() {
        let mut game = TargetRange::new();
        game.reset(0);
        test_helpers::run_ticks(&mut game, ticks_for_ms(SPAWN_MS), 1.0);
        let target = game.state.targets[0].clone();
        // Shoot well away from the target.
        let miss_x = if target.x > 300.0 { 1.0 } else { 599.0 };
        game.apply_input(&shot(miss_x, 1.0));
        game.tick(1.0);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn round_expiry_completes_the_game() {
        let mut game = TargetRange::new();
        game.reset(0);
        let events = (0..ticks_for_ms(ROUND_MS))
            .flat_map(|_| game.tick(1.0))
            .collect::<Vec<_>>();
        assert_eq!(game.outcome(), GameOutcome::Won);
        assert!(events.contains(&GameEvent::GameOver {
            outcome: GameOutcome::Won
        }));
    }

    #[test]
    fn target_ids_are_unique_and_monotonic() {
        let mut game = TargetRange::new();
        game.reset(0);
        let mut seen = Vec::new();
        for _ in 0..ticks_for_ms(SPAWN_MS * 10.0) {
            game.tick(1.0);
            for target in &game.state.targets {
                if !seen.contains(&target.id) {
                    seen.push(target.id);
                }
            }
        }
        let mut sorted = seen.clone();
        sorted.sort_unstable();
        assert_eq!(seen, sorted, "ids must be issued in increasing order");
        assert!(seen.len() > 1);
    }

    // ================================================================
    // Game contract tests
    // ================================================================

    #[test]
    fn contract_reset_is_deterministic() {
        let mut game = TargetRange::new();
        test_helpers::contract_reset_is_deterministic(&mut game, 6);
        test_helpers::contract_reset_reproduces_start(&mut game, 6);
    }

    #[test]
    fn contract_terminal_tick_is_noop() {
        let mut game = TargetRange::new();
        game.reset(0);
        test_helpers::run_ticks(&mut game, ticks_for_ms(ROUND_MS), 1.0);
        test_helpers::contract_terminal_tick_is_noop(&mut game);
    }

    #[test]
    fn contract_state_and_input_io() {
        let mut game = TargetRange::new();
        game.reset(0);
        test_helpers::contract_state_roundtrip_preserves(&mut game);
        test_helpers::contract_garbage_input_no_panic(&mut game);
        test_helpers::contract_truncated_state_no_panic(&mut game);
        // Any shot advances the round clock through the tick it rides on.
        test_helpers::contract_input_changes_state(&mut game, &shot(10.0, 10.0));
    }

    // ================================================================
    // Property-based tests
    // ================================================================

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn spawned_targets_always_fit_the_field(seed in 0u64..300) {
                let mut game = TargetRange::new();
                game.reset(seed);
                for _ in 0..500 {
                    game.tick(1.0);
                    for target in &game.state.targets {
                        prop_assert!(target.x >= 0.0);
                        prop_assert!(target.x + target.size <= FIELD_WIDTH);
                        prop_assert!(target.y >= 0.0);
                        prop_assert!(target.y + target.size <= FIELD_HEIGHT);
                    }
                }
            }

            #[test]
            fn target_count_never_exceeds_the_cap(seed in 0u64..300) {
                let mut game = TargetRange::new();
                game.reset(seed);
                for _ in 0..1000 {
                    game.tick(1.0);
                    prop_assert!(game.state.targets.len() <= MAX_TARGETS);
                }
            }
        }
    }
}
