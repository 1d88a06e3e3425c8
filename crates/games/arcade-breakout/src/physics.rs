use serde::{Deserialize, Serialize};

use crate::config::BreakoutConfig;

/// The ball's kinematic state. Velocity is in units per nominal frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
}

/// Result of the floor phase for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorHit {
    None,
    /// The ball bounced off the paddle.
    PaddleBounce,
    /// The ball reached the floor outside the paddle.
    Missed,
}

/// Reflect off the side walls and ceiling. Checks are predictive (against
/// the position one velocity step ahead) so the ball never tunnels past an
/// edge before the sign flip.
pub fn collide_walls(ball: &mut Ball, config: &BreakoutConfig) {
    let r = config.ball_radius;
    if ball.x + ball.dx > config.field_width - r || ball.x + ball.dx < r {
        ball.dx = -ball.dx;
    }
    if ball.y + ball.dy < r {
        ball.dy = -ball.dy;
    }
}

/// Floor phase: when the ball would cross the floor line, either bounce off
/// the paddle (with spin proportional to the offset from the paddle center)
/// or report a miss. Must run after `collide_walls` so a ceiling reflection
/// this tick cannot also reach the floor.
pub fn collide_floor(ball: &mut Ball, paddle_x: f32, config: &BreakoutConfig) -> FloorHit {
    if ball.y + ball.dy <= config.field_height - config.ball_radius {
        return FloorHit::None;
    }
    if ball.x > paddle_x && ball.x < paddle_x + config.paddle_width {
        ball.dy = -ball.dy;
        let hit_point = ball.x - (paddle_x + config.paddle_width / 2.0);
        ball.dx = hit_point * config.spin_factor;
        FloorHit::PaddleBounce
    } else {
        FloorHit::Missed
    }
}

/// Advance the ball by its velocity.
pub fn integrate(ball: &mut Ball, dt: f32) {
    ball.x += ball.dx * dt;
    ball.y += ball.dy * dt;
}
