use serde::{Deserialize, Serialize};

/// Data-driven configuration for the flappy game.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlappyConfig {
    /// Play-field width.
    pub field_width: f32,
    /// Play-field height (floor line).
    pub field_height: f32,
    /// Fixed horizontal position of the bird's left edge.
    pub bird_x: f32,
    /// Bird bounding-box side length.
    pub bird_size: f32,
    /// Bird start height.
    pub bird_start_y: f32,
    /// Downward acceleration per nominal frame.
    pub gravity: f32,
    /// Velocity a flap sets (overwrites, never stacks).
    pub flap_velocity: f32,
    /// Horizontal pipe speed per nominal frame.
    pub pipe_speed: f32,
    /// Milliseconds between pipe spawns.
    pub pipe_spawn_ms: f32,
    /// Pipe width.
    pub pipe_width: f32,
    /// Vertical gap between the pipe halves.
    pub gap_size: f32,
    /// Random range for the gap's top edge.
    pub gap_top_min: f32,
    pub gap_top_max: f32,
    /// Pipes past this x are despawned.
    pub despawn_x: f32,
}

impl Default for FlappyConfig {
    fn default() -> Self {
        Self {
            field_width: 400.0,
            field_height: 500.0,
            bird_x: 50.0,
            bird_size: 30.0,
            bird_start_y: 250.0,
            gravity: 0.6,
            flap_velocity: -8.0,
            pipe_speed: 3.0,
            pipe_spawn_ms: 1500.0,
            pipe_width: 50.0,
            gap_size: 150.0,
            gap_top_min: 50.0,
            gap_top_max: 300.0,
            despawn_x: -50.0,
        }
    }
}

impl FlappyConfig {
    /// Load config from environment or TOML file, falling back to defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("ARCADE_FLAPPY_CONFIG")
            && let Ok(contents) = std::fs::read_to_string(&path)
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }
        if let Ok(contents) = std::fs::read_to_string("config/flappy.toml")
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }
        Self::default()
    }
}
