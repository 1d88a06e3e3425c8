use serde::{Deserialize, Serialize};

/// Data-driven configuration for the racing game.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RacingConfig {
    /// Road width.
    pub road_width: f32,
    /// Car width (player and enemies).
    pub car_width: f32,
    /// Car height (player and enemies).
    pub car_height: f32,
    /// Fixed vertical position of the player car.
    pub player_y: f32,
    /// Horizontal distance one steer input moves the player.
    pub steer_step: f32,
    /// Enemies past this line are despawned.
    pub despawn_y: f32,
    /// Vertical spawn position above the road.
    pub spawn_y: f32,
    /// Independent per-tick enemy spawn probability.
    pub spawn_chance: f32,
    /// Upper bound of the random speed bonus added to spawned enemies.
    pub spawn_speed_jitter: f32,
    /// Global speed at the start of a run.
    pub initial_speed: f32,
    /// Speed added at each ramp step.
    pub speed_increment: f32,
    /// Global speed cap.
    pub max_speed: f32,
    /// Ticks between ramp steps (speed up + score).
    pub ramp_interval_ticks: u64,
}

impl Default for RacingConfig {
    fn default() -> Self {
        Self {
            road_width: 300.0,
            car_width: 40.0,
            car_height: 70.0,
            player_y: 400.0,
            steer_step: 20.0,
            despawn_y: 600.0,
            spawn_y: -100.0,
            spawn_chance: 0.02,
            spawn_speed_jitter: 2.0,
            initial_speed: 5.0,
            speed_increment: 0.1,
            max_speed: 15.0,
            ramp_interval_ticks: 100,
        }
    }
}

impl RacingConfig {
    /// Load config from environment or TOML file, falling back to defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("ARCADE_RACING_CONFIG")
            && let Ok(contents) = std::fs::read_to_string(&path)
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }
        if let Ok(contents) = std::fs::read_to_string("config/racing.toml")
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }
        Self::default()
    }

    /// Rightmost x a car's left edge can occupy.
    pub fn max_car_x(&self) -> f32 {
        self.road_width - self.car_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let config: RacingConfig = toml::from_str("max_speed = 20.0").unwrap();
        assert_eq!(config.max_speed, 20.0);
        assert_eq!(config.initial_speed, 5.0);
        assert_eq!(config.ramp_interval_ticks, 100);
    }

    #[test]
    fn max_car_x_leaves_room_for_the_car() {
        let config = RacingConfig::default();
        assert_eq!(config.max_car_x(), 260.0);
    }
}
