use serde::{Deserialize, Serialize};

use crate::config::BreakoutConfig;
use crate::physics::Ball;

/// A destructible brick. Dead bricks stay in the list so collision order is
/// stable, but they never re-collide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub x: f32,
    pub y: f32,
    pub alive: bool,
}

/// Lay out the full brick grid, column-major as the field renders it.
pub fn build_grid(config: &BreakoutConfig) -> Vec<Brick> {
    let w = config.brick_width();
    let mut bricks = Vec::with_capacity((config.brick_cols * config.brick_rows) as usize);
    for col in 0..config.brick_cols {
        for row in 0..config.brick_rows {
            bricks.push(Brick {
                x: col as f32 * (w + config.brick_gap) + config.brick_gap,
                y: row as f32 * (config.brick_height + config.brick_gap)
                    + config.brick_gap
                    + config.brick_top_offset,
                alive: true,
            });
        }
    }
    bricks
}

/// Collide the ball against live bricks in insertion order. Each hit kills
/// the brick and reflects the ball vertically. Liveness is checked before
/// the overlap test. Returns the number of bricks destroyed.
pub fn collide_ball(ball: &mut Ball, bricks: &mut [Brick], config: &BreakoutConfig) -> u32 {
    let w = config.brick_width();
    let mut destroyed = 0;
    for brick in bricks.iter_mut() {
        if !brick.alive {
            continue;
        }
        let inside = ball.x > brick.x
            && ball.x < brick.x + w
            && ball.y > brick.y
            && ball.y < brick.y + config.brick_height;
        if inside {
            ball.dy = -ball.dy;
            brick.alive = false;
            destroyed += 1;
        }
    }
    destroyed
}

pub fn live_count(bricks: &[Brick]) -> usize {
    bricks.iter().filter(|b| b.alive).count()
}
