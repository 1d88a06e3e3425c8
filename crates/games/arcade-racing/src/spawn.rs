use serde::{Deserialize, Serialize};

use arcade_core::rng::GameRng;

use crate::config::RacingConfig;

/// An oncoming enemy car. Speed is fixed at spawn time (units per nominal
/// frame); the global ramp only affects cars spawned after it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
}

/// Roll the independent per-tick spawn chance. A spawned enemy starts above
/// the road at a random lane position, slightly faster than the current
/// global speed.
pub fn maybe_spawn(rng: &mut GameRng, global_speed: f32, config: &RacingConfig) -> Option<Enemy> {
    if !rng.chance(config.spawn_chance) {
        return None;
    }
    Some(Enemy {
        x: rng.range_f32(0.0, config.max_car_x()),
        y: config.spawn_y,
        speed: global_speed + rng.range_f32(0.0, config.spawn_speed_jitter),
    })
}

/// Advance every enemy and drop the ones past the despawn line.
pub fn advance(enemies: &mut Vec<Enemy>, dt: f32, config: &RacingConfig) {
    for enemy in enemies.iter_mut() {
        enemy.y += enemy.speed * dt;
    }
    enemies.retain(|e| e.y < config.despawn_y);
}
