use serde::{Deserialize, Serialize};

/// Data-driven configuration for the Breakout game.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakoutConfig {
    /// Play-field width.
    pub field_width: f32,
    /// Play-field height. The floor line doubles as the paddle line.
    pub field_height: f32,
    /// Paddle width.
    pub paddle_width: f32,
    /// Ball radius.
    pub ball_radius: f32,
    /// Ball start position.
    pub ball_start_x: f32,
    pub ball_start_y: f32,
    /// Ball start velocity (units per nominal frame).
    pub ball_start_dx: f32,
    pub ball_start_dy: f32,
    /// Brick grid dimensions.
    pub brick_rows: u32,
    pub brick_cols: u32,
    /// Brick height.
    pub brick_height: f32,
    /// Gap between bricks (and between the grid and the field edges).
    pub brick_gap: f32,
    /// Vertical offset of the first brick row from the field top.
    pub brick_top_offset: f32,
    /// Points per destroyed brick.
    pub brick_points: u32,
    /// Horizontal spin imparted per unit of paddle-center offset.
    pub spin_factor: f32,
}

impl Default for BreakoutConfig {
    fn default() -> Self {
        Self {
            field_width: 400.0,
            field_height: 500.0,
            paddle_width: 80.0,
            ball_radius: 6.0,
            ball_start_x: 200.0,
            ball_start_y: 300.0,
            ball_start_dx: 4.0,
            ball_start_dy: -4.0,
            brick_rows: 5,
            brick_cols: 8,
            brick_height: 20.0,
            brick_gap: 5.0,
            brick_top_offset: 30.0,
            brick_points: 10,
            spin_factor: 0.15,
        }
    }
}

impl BreakoutConfig {
    /// Brick width derived from the field width, column count, and gaps.
    pub fn brick_width(&self) -> f32 {
        let cols = self.brick_cols as f32;
        (self.field_width - (cols + 1.0) * self.brick_gap) / cols
    }

    /// Load config from environment or TOML file, falling back to defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("ARCADE_BREAKOUT_CONFIG")
            && let Ok(contents) = std::fs::read_to_string(&path)
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }
        if let Ok(contents) = std::fs::read_to_string("config/breakout.toml")
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }
        Self::default()
    }
}
