use serde::{Deserialize, Serialize};

use arcade_core::arcade_game_boilerplate;
use arcade_core::game_trait::{ArcadeGame, GameEvent, GameMetadata};
use arcade_core::outcome::GameOutcome;
use arcade_core::rng::GameRng;

/// Grid side length in cells.
pub const GRID_SIZE: i32 = 20;
/// Milliseconds between snake steps; one tick is one step.
pub const STEP_MS: f32 = 150.0;

/// A cell on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

/// Heading of the snake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }
}

/// Turn input. Turns parallel to the current heading (including reversals)
/// are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakeInput {
    pub turn: Direction,
}

/// Serializable snapshot of a snake run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnakeState {
    /// Body cells, head first.
    pub snake: Vec<Cell>,
    pub direction: Direction,
    pub food: Cell,
    pub score: u32,
    pub outcome: GameOutcome,
}

/// The snake game core. One tick advances the snake one cell, so the shell
/// drives it at the step rate rather than the frame rate.
pub struct Snake {
    state: SnakeState,
    pending_turn: Option<Direction>,
    rng: GameRng,
}

impl Snake {
    pub fn new() -> Self {
        let mut rng = GameRng::from_seed(0);
        Self {
            state: initial_state(&mut rng),
            pending_turn: None,
            rng,
        }
    }

    pub fn state(&self) -> &SnakeState {
        &self.state
    }

    fn random_food(rng: &mut GameRng) -> Cell {
        // Uniform over the whole grid; the draw may land on the body.
        Cell {
            x: rng.range_u32(0, GRID_SIZE as u32) as i32,
            y: rng.range_u32(0, GRID_SIZE as u32) as i32,
        }
    }
}

impl Default for Snake {
    fn default() -> Self {
        Self::new()
    }
}

fn initial_state(rng: &mut GameRng) -> SnakeState {
    SnakeState {
        snake: vec![Cell { x: 10, y: 10 }],
        direction: Direction::Up,
        food: Snake::random_food(rng),
        score: 0,
        outcome: GameOutcome::Running,
    }
}

impl ArcadeGame for Snake {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Snake Game".to_string(),
            description: "Eat apples and grow longer!".to_string(),
            controls: "Arrow keys to move".to_string(),
        }
    }

    fn reset(&mut self, seed: u64) {
        self.rng = GameRng::from_seed(seed);
        self.state = initial_state(&mut self.rng);
        self.pending_turn = None;
    }

    fn tick(&mut self, _dt: f32) -> Vec<GameEvent> {
        if self.state.outcome.is_terminal() {
            return Vec::new();
        }
        let mut events = Vec::new();

        if let Some(turn) = self.pending_turn.take()
            && turn.is_vertical() != self.state.direction.is_vertical()
        {
            self.state.direction = turn;
        }

        let (dx, dy) = self.state.direction.delta();
        let head = self.state.snake[0];
        let new_head = Cell {
            x: head.x + dx,
            y: head.y + dy,
        };

        let off_grid = new_head.x < 0
            || new_head.x >= GRID_SIZE
            || new_head.y < 0
            || new_head.y >= GRID_SIZE;
        if off_grid || self.state.snake.contains(&new_head) {
            self.state.outcome = GameOutcome::Lost;
            events.push(GameEvent::GameOver {
                outcome: GameOutcome::Lost,
            });
            return events;
        }

        self.state.snake.insert(0, new_head);
        if new_head == self.state.food {
            self.state.score += 1;
            self.state.food = Self::random_food(&mut self.rng);
            events.push(GameEvent::ScoreUpdate {
                score: self.state.score,
            });
        } else {
            self.state.snake.pop();
        }

        events
    }

    fn apply_input(&mut self, input: &[u8]) {
        match rmp_serde::from_slice::<SnakeInput>(input) {
            Ok(i) => self.pending_turn = Some(i.turn),
            Err(e) => {
                tracing::debug!(error = %e, "Dropped malformed snake input");
            },
        }
    }

    fn tick_rate(&self) -> f32 {
        1000.0 / STEP_MS
    }

    arcade_game_boilerplate!(state_type: SnakeState, scored);
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_core::test_helpers;

    fn turn(direction: Direction) -> Vec<u8> {
        rmp_serde::to_vec(&SnakeInput { turn: direction }).unwrap()
    }

    #[test]
    fn reset_starts_a_single_cell_heading_up() {
        let mut game = Snake::new();
        game.reset(0);
        assert_eq!(game.state.snake, vec![Cell { x: 10, y: 10 }]);
        assert_eq!(game.state.direction, Direction::Up);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn snake_advances_one_cell_per_tick() {
        let mut game = Snake::new();
        game.reset(0);
        game.tick(1.0);
        assert_eq!(game.state.snake[0], Cell { x: 10, y: 9 });
        assert_eq!(game.state.snake.len(), 1);
    }

    #[test]
    fn perpendicular_turn_is_applied() {
        let mut game = Snake::new();
        game.reset(0);
        game.apply_input(&turn(Direction::Left));
        game.tick(1.0);
        assert_eq!(game.state.direction, Direction::Left);
        assert_eq!(game.state.snake[0], Cell { x: 9, y: 10 });
    }

    #[test]
    fn reversal_is_ignored() {
        let mut game = Snake::new();
        game.reset(0);
        game.apply_input(&turn(Direction::Down));
        game.tick(1.0);
        assert_eq!(game.state.direction, Direction::Up);
    }

    #[test]
    fn parallel_turn_is_ignored() {
        let mut game = Snake::new();
        game.reset(0);
        game.apply_input(&turn(Direction::Up));
        game.tick(1.0);
        assert_eq!(game.state.direction, Direction::Up);
        assert_eq!(game.state.snake[0], Cell { x: 10, y: 9 });
    }

    #[test]
    fn wall_collision_loses() {
        let mut game = Snake::new();
        game.reset(0);
        // Head starts at y=10 heading up: the 11th step would leave the grid.
        for _ in 0..10 {
            game.tick(1.0);
            assert_eq!(game.outcome(), GameOutcome::Running);
        }
        let events = game.tick(1.0);
        assert_eq!(game.outcome(), GameOutcome::Lost);
        assert!(events.contains(&GameEvent::GameOver {
            outcome: GameOutcome::Lost
        }));
    }

    #[test]
    fn eating_food_grows_and_scores() {
        let mut game = Snake::new();
        game.reset(0);
        game.state.food = Cell { x: 10, y: 9 };
        let events = game.tick(1.0);
        assert_eq!(game.score(), 1);
        assert_eq!(game.state.snake.len(), 2);
        assert!(events.contains(&GameEvent::ScoreUpdate { score: 1 }));
        assert!((0..GRID_SIZE).contains(&game.state.food.x));
        assert!((0..GRID_SIZE).contains(&game.state.food.y));
    }

    #[test]
    fn self_collision_loses() {
        let mut game = Snake::new();
        game.reset(0);
        // A hook shape: head at (5,5) heading right into its own body.
        game.state.snake = vec![
            Cell { x: 5, y: 5 },
            Cell { x: 5, y: 6 },
            Cell { x: 6, y: 6 },
            Cell { x: 6, y: 5 },
        ];
        game.state.direction = Direction::Right;
        game.tick(1.0);
        assert_eq!(game.outcome(), GameOutcome::Lost);
    }

    #[test]
    fn same_seed_reproduces_food_sequence() {
        let mut a = Snake::new();
        let mut b = Snake::new();
        a.reset(5);
        b.reset(5);
        assert_eq!(a.state.food, b.state.food);
        a.state.food = Cell { x: 10, y: 9 };
        b.state.food = Cell { x: 10, y: 9 };
        a.tick(1.0);
        b.tick(1.0);
        assert_eq!(a.state.food, b.state.food);
    }

    // ================================================================
    // Game contract tests
    // ================================================================

    #[test]
    fn contract_reset_is_deterministic() {
        let mut game = Snake::new();
        test_helpers::contract_reset_is_deterministic(&mut game, 8);
        test_helpers::contract_reset_reproduces_start(&mut game, 8);
    }

    #[test]
    fn contract_terminal_tick_is_noop() {
        let mut game = Snake::new();
        game.reset(0);
        test_helpers::run_until_terminal(&mut game, 50, 1.0);
        test_helpers::contract_terminal_tick_is_noop(&mut game);
    }

    #[test]
    fn contract_state_and_input_io() {
        let mut game = Snake::new();
        game.reset(0);
        test_helpers::contract_state_roundtrip_preserves(&mut game);
        test_helpers::contract_garbage_input_no_panic(&mut game);
        test_helpers::contract_truncated_state_no_panic(&mut game);
        test_helpers::contract_input_changes_state(&mut game, &turn(Direction::Left));
    }

    // ================================================================
    // Property-based tests
    // ================================================================

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arbitrary_direction() -> impl Strategy<Value = Direction> {
            prop_oneof![
                Just(Direction::Up),
                Just(Direction::Down),
                Just(Direction::Left),
                Just(Direction::Right),
            ]
        }

        proptest! {
            #[test]
            fn live_snake_stays_on_the_grid(
                turns in proptest::collection::vec(arbitrary_direction(), 1..100),
                seed in 0u64..100,
            ) {
                let mut game = Snake::new();
                game.reset(seed);
                for t in turns {
                    game.apply_input(&rmp_serde::to_vec(&SnakeInput { turn: t }).unwrap());
                    game.tick(1.0);
                    if game.outcome().is_terminal() {
                        break;
                    }
                    for cell in &game.state.snake {
                        prop_assert!((0..GRID_SIZE).contains(&cell.x));
                        prop_assert!((0..GRID_SIZE).contains(&cell.y));
                    }
                }
            }

            #[test]
            fn body_length_is_score_plus_one(
                seed in 0u64..100,
                ticks in 1usize..40,
            ) {
                let mut game = Snake::new();
                game.reset(seed);
                for _ in 0..ticks {
                    // Feed the snake every step to exercise growth.
                    let head = game.state.snake[0];
                    game.state.food = Cell { x: head.x, y: head.y - 1 };
                    game.state.direction = Direction::Up;
                    game.tick(1.0);
                    if game.outcome().is_terminal() {
                        break;
                    }
                    prop_assert_eq!(game.state.snake.len() as u32, game.score() + 1);
                }
            }
        }
    }
}
