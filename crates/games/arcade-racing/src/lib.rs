pub mod config;
pub mod spawn;

use serde::{Deserialize, Serialize};

use arcade_core::arcade_game_boilerplate;
use arcade_core::game_trait::{ArcadeGame, GameEvent, GameMetadata};
use arcade_core::geom::Rect;
use arcade_core::outcome::GameOutcome;
use arcade_core::rng::GameRng;

use config::RacingConfig;
use spawn::Enemy;

/// Steering input: one lane nudge left or right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RacingInput {
    SteerLeft,
    SteerRight,
}

/// Serializable snapshot of a racing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RacingState {
    /// Left edge of the player car.
    pub player_x: f32,
    pub enemies: Vec<Enemy>,
    /// Global speed, raised by the difficulty ramp.
    pub speed: f32,
    /// Elapsed ticks since reset; drives the ramp schedule.
    pub ticks: u64,
    pub score: u32,
    pub outcome: GameOutcome,
}

/// The traffic-dodging racing game core.
pub struct Racing {
    state: RacingState,
    pending_inputs: Vec<RacingInput>,
    rng: GameRng,
    game_config: RacingConfig,
}

impl Racing {
    pub fn new() -> Self {
        Self::with_config(RacingConfig::load())
    }

    pub fn with_config(config: RacingConfig) -> Self {
        Self {
            state: initial_state(&config),
            pending_inputs: Vec::new(),
            rng: GameRng::from_seed(0),
            game_config: config,
        }
    }

    pub fn state(&self) -> &RacingState {
        &self.state
    }

    pub fn config(&self) -> &RacingConfig {
        &self.game_config
    }

    fn steer(&mut self, input: RacingInput) {
        let step = self.game_config.steer_step;
        let x = match input {
            RacingInput::SteerLeft => self.state.player_x - step,
            RacingInput::SteerRight => self.state.player_x + step,
        };
        self.state.player_x = x.clamp(0.0, self.game_config.max_car_x());
    }

    fn player_rect(&self) -> Rect {
        Rect::new(
            self.state.player_x,
            self.game_config.player_y,
            self.game_config.car_width,
            self.game_config.car_height,
        )
    }
}

impl Default for Racing {
    fn default() -> Self {
        Self::with_config(RacingConfig::default())
    }
}

fn initial_state(config: &RacingConfig) -> RacingState {
    RacingState {
        player_x: config.road_width / 2.0 - config.car_width / 2.0,
        enemies: Vec::new(),
        speed: config.initial_speed,
        ticks: 0,
        score: 0,
        outcome: GameOutcome::Running,
    }
}

impl ArcadeGame for Racing {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Car Racing".to_string(),
            description: "Dodge traffic and speed up.".to_string(),
            controls: "Left/Right arrows to steer".to_string(),
        }
    }

    fn reset(&mut self, seed: u64) {
        self.state = initial_state(&self.game_config);
        self.pending_inputs.clear();
        self.rng = GameRng::from_seed(seed);
    }

    fn tick(&mut self, dt: f32) -> Vec<GameEvent> {
        if self.state.outcome.is_terminal() {
            return Vec::new();
        }
        let mut events = Vec::new();

        for input in std::mem::take(&mut self.pending_inputs) {
            self.steer(input);
        }

        if let Some(enemy) = spawn::maybe_spawn(&mut self.rng, self.state.speed, &self.game_config)
        {
            self.state.enemies.push(enemy);
        }

        spawn::advance(&mut self.state.enemies, dt, &self.game_config);

        let player = self.player_rect();
        let car_w = self.game_config.car_width;
        let car_h = self.game_config.car_height;
        let crashed = self
            .state
            .enemies
            .iter()
            .any(|e| player.overlaps(&Rect::new(e.x, e.y, car_w, car_h)));
        if crashed {
            self.state.outcome = GameOutcome::Lost;
            events.push(GameEvent::GameOver {
                outcome: GameOutcome::Lost,
            });
            return events;
        }

        self.state.ticks += 1;
        if self.state.ticks % self.game_config.ramp_interval_ticks == 0 {
            self.state.score += 1;
            self.state.speed =
                (self.state.speed + self.game_config.speed_increment).min(self.game_config.max_speed);
            events.push(GameEvent::ScoreUpdate {
                score: self.state.score,
            });
        }

        events
    }

    fn apply_input(&mut self, input: &[u8]) {
        match rmp_serde::from_slice::<RacingInput>(input) {
            Ok(i) => self.pending_inputs.push(i),
            Err(e) => {
                tracing::debug!(error = %e, "Dropped malformed racing input");
            },
        }
    }

    arcade_game_boilerplate!(state_type: RacingState, scored);
}
