pub mod r#gen;

use serde::{Deserialize, Serialize};

use arcade_core::arcade_game_boilerplate;
use arcade_core::game_trait::{ArcadeGame, GameEvent, GameMetadata};
use arcade_core::outcome::GameOutcome;
use arcade_core::rng::GameRng;

use r#gen::{Maze, MAZE_SIZE};

/// One-cell step input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MazeInput {
    Up,
    Down,
    Left,
    Right,
}

impl MazeInput {
    fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Serializable snapshot of a maze run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MazeState {
    pub maze: Maze,
    pub player_x: i32,
    pub player_y: i32,
    pub goal_x: i32,
    pub goal_y: i32,
    pub outcome: GameOutcome,
}

/// The maze escape game core. Ticks only apply queued steps, so the shell
/// drives it from input events rather than a fixed clock.
pub struct MazeEscape {
    state: MazeState,
    pending_steps: Vec<MazeInput>,
}

impl MazeEscape {
    pub fn new() -> Self {
        let mut rng = GameRng::from_seed(0);
        Self {
            state: initial_state(&mut rng),
            pending_steps: Vec::new(),
        }
    }

    pub fn state(&self) -> &MazeState {
        &self.state
    }

    fn step(&mut self, input: MazeInput) -> bool {
        let (dx, dy) = input.delta();
        let nx = self.state.player_x + dx;
        let ny = self.state.player_y + dy;
        if !self.state.maze.is_path(nx, ny) {
            return false;
        }
        self.state.player_x = nx;
        self.state.player_y = ny;
        nx == self.state.goal_x && ny == self.state.goal_y
    }
}

impl Default for MazeEscape {
    fn default() -> Self {
        Self::new()
    }
}

fn initial_state(rng: &mut GameRng) -> MazeState {
    MazeState {
        maze: r#gen::generate(rng),
        player_x: 0,
        player_y: 0,
        goal_x: MAZE_SIZE - 1,
        goal_y: MAZE_SIZE - 1,
        outcome: GameOutcome::Running,
    }
}

impl ArcadeGame for MazeEscape {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Maze Escape".to_string(),
            description: "Find your way out.".to_string(),
            controls: "Arrow keys to move".to_string(),
        }
    }

    fn reset(&mut self, seed: u64) {
        let mut rng = GameRng::from_seed(seed);
        self.state = initial_state(&mut rng);
        self.pending_steps.clear();
    }

    fn tick(&mut self, _dt: f32) -> Vec<GameEvent> {
        if self.state.outcome.is_terminal() {
            return Vec::new();
        }
        let mut events = Vec::new();
        for step in std::mem::take(&mut self.pending_steps) {
            if self.step(step) {
                self.state.outcome = GameOutcome::Won;
                events.push(GameEvent::GameOver {
                    outcome: GameOutcome::Won,
                });
                break;
            }
        }
        events
    }

    fn apply_input(&mut self, input: &[u8]) {
        match rmp_serde::from_slice::<MazeInput>(input) {
            Ok(step) => self.pending_steps.push(step),
            Err(e) => {
                tracing::debug!(error = %e, "Dropped malformed maze input");
            },
        }
    }

    arcade_game_boilerplate!(state_type: MazeState);
}
