pub mod bricks;
pub mod config;
pub mod physics;

use serde::{Deserialize, Serialize};

use arcade_core::arcade_game_boilerplate;
use arcade_core::game_trait::{ArcadeGame, GameEvent, GameMetadata};
use arcade_core::outcome::GameOutcome;

use bricks::Brick;
use config::BreakoutConfig;
use physics::{Ball, FloorHit};

/// Input from the player: a pointer position in field coordinates; the
/// paddle centers under it. Out-of-range targets are clamped, not rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakoutInput {
    pub pointer_x: f32,
}

/// Serializable snapshot of a Breakout run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakoutState {
    pub ball: Ball,
    /// Left edge of the paddle.
    pub paddle_x: f32,
    pub bricks: Vec<Brick>,
    pub score: u32,
    pub outcome: GameOutcome,
}

/// The Breakout game core.
pub struct Breakout {
    state: BreakoutState,
    pending_input: Option<BreakoutInput>,
    game_config: BreakoutConfig,
}

impl Breakout {
    pub fn new() -> Self {
        Self::with_config(BreakoutConfig::load())
    }

    pub fn with_config(config: BreakoutConfig) -> Self {
        Self {
            state: initial_state(&config),
            pending_input: None,
            game_config: config,
        }
    }

    pub fn state(&self) -> &BreakoutState {
        &self.state
    }

    pub fn config(&self) -> &BreakoutConfig {
        &self.game_config
    }

    fn move_paddle(&mut self, pointer_x: f32) {
        let half = self.game_config.paddle_width / 2.0;
        let max_x = self.game_config.field_width - self.game_config.paddle_width;
        self.state.paddle_x = (pointer_x - half).clamp(0.0, max_x);
    }
}

impl Default for Breakout {
    fn default() -> Self {
        Self::with_config(BreakoutConfig::default())
    }
}

fn initial_state(config: &BreakoutConfig) -> BreakoutState {
    BreakoutState {
        ball: Ball {
            x: config.ball_start_x,
            y: config.ball_start_y,
            dx: config.ball_start_dx,
            dy: config.ball_start_dy,
        },
        paddle_x: config.field_width / 2.0 - config.paddle_width / 2.0,
        bricks: bricks::build_grid(config),
        score: 0,
        outcome: GameOutcome::Running,
    }
}

impl ArcadeGame for Breakout {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Breakout".to_string(),
            description: "Smash all the bricks.".to_string(),
            controls: "Move pointer to control paddle".to_string(),
        }
    }

    fn reset(&mut self, _seed: u64) {
        self.state = initial_state(&self.game_config);
        self.pending_input = None;
    }

    fn tick(&mut self, dt: f32) -> Vec<GameEvent> {
        if self.state.outcome.is_terminal() {
            return Vec::new();
        }
        let mut events = Vec::new();

        if let Some(input) = self.pending_input.take() {
            self.move_paddle(input.pointer_x);
        }

        // Collision phases run against the current position; the ball moves
        // only after every phase has had its say.
        physics::collide_walls(&mut self.state.ball, &self.game_config);

        match physics::collide_floor(&mut self.state.ball, self.state.paddle_x, &self.game_config)
        {
            FloorHit::Missed => {
                self.state.outcome = GameOutcome::Lost;
                events.push(GameEvent::GameOver {
                    outcome: GameOutcome::Lost,
                });
                return events;
            },
            FloorHit::PaddleBounce | FloorHit::None => {},
        }

        let destroyed =
            bricks::collide_ball(&mut self.state.ball, &mut self.state.bricks, &self.game_config);
        if destroyed > 0 {
            self.state.score += destroyed * self.game_config.brick_points;
            events.push(GameEvent::ScoreUpdate {
                score: self.state.score,
            });
        }

        // Exhaustion check runs after the collision pass, so clearing the
        // last brick wins on the same tick.
        if bricks::live_count(&self.state.bricks) == 0 {
            self.state.outcome = GameOutcome::Won;
            events.push(GameEvent::GameOver {
                outcome: GameOutcome::Won,
            });
            return events;
        }

        physics::integrate(&mut self.state.ball, dt);
        events
    }

    fn apply_input(&mut self, input: &[u8]) {
        match rmp_serde::from_slice::<BreakoutInput>(input) {
            Ok(i) => self.pending_input = Some(i),
            Err(e) => {
                tracing::debug!(error = %e, "Dropped malformed breakout input");
            },
        }
    }

    arcade_game_boilerplate!(state_type: BreakoutState, scored);
}
