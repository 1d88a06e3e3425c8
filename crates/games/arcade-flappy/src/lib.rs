pub mod config;

use serde::{Deserialize, Serialize};

use arcade_core::arcade_game_boilerplate;
use arcade_core::game_trait::{ArcadeGame, GameEvent, GameMetadata};
use arcade_core::outcome::GameOutcome;
use arcade_core::rng::GameRng;
use arcade_core::time::{IntervalTimer, NOMINAL_FRAME_MS};

use config::FlappyConfig;

/// The only input signal: a flap. Flaps overwrite the vertical velocity;
/// queuing several before a tick is the same as queuing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flap;

/// A pipe pair, tracked by the top edge of its gap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    pub x: f32,
    pub gap_top: f32,
    pub passed: bool,
}

/// Serializable snapshot of a flappy run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlappyState {
    pub bird_y: f32,
    pub velocity: f32,
    pub pipes: Vec<Pipe>,
    pub spawn_timer: IntervalTimer,
    pub score: u32,
    pub outcome: GameOutcome,
}

/// The flappy-bird clone game core.
pub struct Flappy {
    state: FlappyState,
    pending_flap: bool,
    rng: GameRng,
    game_config: FlappyConfig,
}

impl Flappy {
    pub fn new() -> Self {
        Self::with_config(FlappyConfig::load())
    }

    pub fn with_config(config: FlappyConfig) -> Self {
        Self {
            state: initial_state(&config),
            pending_flap: false,
            rng: GameRng::from_seed(0),
            game_config: config,
        }
    }

    pub fn state(&self) -> &FlappyState {
        &self.state
    }

    pub fn config(&self) -> &FlappyConfig {
        &self.game_config
    }

    fn bird_hits_pipe(&self, pipe: &Pipe) -> bool {
        let config = &self.game_config;
        let bird_left = config.bird_x;
        let bird_right = config.bird_x + config.bird_size;
        let bird_top = self.state.bird_y;
        let bird_bottom = self.state.bird_y + config.bird_size;
        bird_right > pipe.x
            && bird_left < pipe.x + config.pipe_width
            && (bird_top < pipe.gap_top || bird_bottom > pipe.gap_top + config.gap_size)
    }
}

impl Default for Flappy {
    fn default() -> Self {
        Self::with_config(FlappyConfig::default())
    }
}

fn initial_state(config: &FlappyConfig) -> FlappyState {
    FlappyState {
        bird_y: config.bird_start_y,
        velocity: 0.0,
        pipes: Vec::new(),
        spawn_timer: IntervalTimer::new(config.pipe_spawn_ms),
        score: 0,
        outcome: GameOutcome::Running,
    }
}

impl ArcadeGame for Flappy {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Flappy Bird Clone".to_string(),
            description: "Fly through the pipes.".to_string(),
            controls: "Space or click to flap".to_string(),
        }
    }

    fn reset(&mut self, seed: u64) {
        self.state = initial_state(&self.game_config);
        self.pending_flap = false;
        self.rng = GameRng::from_seed(seed);
    }

    fn tick(&mut self, dt: f32) -> Vec<GameEvent> {
        if self.state.outcome.is_terminal() {
            return Vec::new();
        }
        let config = &self.game_config;
        let mut events = Vec::new();

        if std::mem::take(&mut self.pending_flap) {
            self.state.velocity = config.flap_velocity;
        }

        // Integrate, then floor/ceiling: the bird holds its last position on
        // a fatal step.
        let new_y = self.state.bird_y + self.state.velocity * dt;
        if new_y > config.field_height || new_y < 0.0 {
            self.state.outcome = GameOutcome::Lost;
            events.push(GameEvent::GameOver {
                outcome: GameOutcome::Lost,
            });
            return events;
        }
        self.state.bird_y = new_y;
        self.state.velocity += config.gravity * dt;

        if self.state.spawn_timer.tick(dt * NOMINAL_FRAME_MS) {
            let gap_top = self.rng.range_f32(config.gap_top_min, config.gap_top_max);
            self.state.pipes.push(Pipe {
                x: config.field_width,
                gap_top,
                passed: false,
            });
        }

        for pipe in &mut self.state.pipes {
            pipe.x -= config.pipe_speed * dt;
        }
        self.state.pipes.retain(|p| p.x > config.despawn_x);

        let hit = self
            .state
            .pipes
            .iter()
            .any(|pipe| self.bird_hits_pipe(pipe));
        if hit {
            self.state.outcome = GameOutcome::Lost;
            events.push(GameEvent::GameOver {
                outcome: GameOutcome::Lost,
            });
            return events;
        }

        for pipe in &mut self.state.pipes {
            if !pipe.passed && config.bird_x > pipe.x + config.pipe_width {
                pipe.passed = true;
                self.state.score += 1;
                events.push(GameEvent::ScoreUpdate {
                    score: self.state.score,
                });
            }
        }

        events
    }

    fn apply_input(&mut self, input: &[u8]) {
        match rmp_serde::from_slice::<Flap>(input) {
            Ok(Flap) => self.pending_flap = true,
            Err(e) => {
                tracing::debug!(error = %e, "Dropped malformed flappy input");
            },
        }
    }

    arcade_game_boilerplate!(state_type: FlappyState, scored);
}
