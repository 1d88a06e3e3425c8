pub mod board;
pub mod oracle;

use serde::{Deserialize, Serialize};

use arcade_core::arcade_game_boilerplate;
use arcade_core::error::InvalidMove;
use arcade_core::game_trait::{ArcadeGame, GameEvent, GameMetadata};
use arcade_core::outcome::GameOutcome;
use arcade_core::rng::GameRng;

use board::{Board, Marker};
use oracle::Difficulty;

/// Play mode, chosen at session start. In computer mode the human is X and
/// the oracle answers for O; the difficulty is immutable for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    PlayerVsPlayer,
    PlayerVsComputer { difficulty: Difficulty },
}

/// A move request for the active player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicTacToeInput {
    pub cell: usize,
}

/// Serializable snapshot of a tic-tac-toe game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicTacToeState {
    pub board: Board,
    /// Marker to move next while the game runs.
    pub next: Marker,
    /// Set once a line is completed.
    pub winner: Option<Marker>,
    pub outcome: GameOutcome,
}

/// The tic-tac-toe game core.
pub struct TicTacToe {
    state: TicTacToeState,
    mode: GameMode,
    pending_moves: Vec<usize>,
    rng: GameRng,
}

impl TicTacToe {
    pub fn new(mode: GameMode) -> Self {
        Self {
            state: initial_state(),
            mode,
            pending_moves: Vec::new(),
            rng: GameRng::from_seed(0),
        }
    }

    pub fn state(&self) -> &TicTacToeState {
        &self.state
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Apply the active player's move. In computer mode a successful human
    /// move is followed synchronously by the oracle's reply, routed through
    /// the same placement path.
    pub fn apply_move(&mut self, cell: usize) -> Result<(), InvalidMove> {
        self.place(cell)?;
        if let GameMode::PlayerVsComputer { difficulty } = self.mode
            && self.state.outcome == GameOutcome::Running
            && self.state.next == Marker::O
            && let Some(reply) = oracle::best_move(&self.state.board, difficulty, &mut self.rng)
        {
            self.place(reply)
                .expect("oracle replies are legal by construction");
        }
        Ok(())
    }

    fn place(&mut self, cell: usize) -> Result<(), InvalidMove> {
        if self.state.outcome.is_terminal() {
            return Err(InvalidMove::GameFinished);
        }
        self.state.board.place(cell, self.state.next)?;
        if let Some(winner) = self.state.board.winner() {
            self.state.winner = Some(winner);
            self.state.outcome = match self.mode {
                GameMode::PlayerVsPlayer => GameOutcome::Won,
                GameMode::PlayerVsComputer { .. } => {
                    if winner == Marker::X {
                        GameOutcome::Won
                    } else {
                        GameOutcome::Lost
                    }
                },
            };
        } else if self.state.board.is_full() {
            self.state.outcome = GameOutcome::Draw;
        } else {
            self.state.next = self.state.next.other();
        }
        Ok(())
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new(GameMode::PlayerVsPlayer)
    }
}

fn initial_state() -> TicTacToeState {
    TicTacToeState {
        board: Board::new(),
        next: Marker::X,
        winner: None,
        outcome: GameOutcome::Running,
    }
}

impl ArcadeGame for TicTacToe {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Tic Tac Toe".to_string(),
            description: "Classic X and O strategy game.".to_string(),
            controls: "Click a cell to place your marker".to_string(),
        }
    }

    fn reset(&mut self, seed: u64) {
        self.state = initial_state();
        self.pending_moves.clear();
        self.rng = GameRng::from_seed(seed);
    }

    fn tick(&mut self, _dt: f32) -> Vec<GameEvent> {
        if self.state.outcome.is_terminal() {
            return Vec::new();
        }
        let mut events = Vec::new();
        for cell in std::mem::take(&mut self.pending_moves) {
            match self.apply_move(cell) {
                Ok(()) => {
                    if self.state.outcome.is_terminal() {
                        events.push(GameEvent::GameOver {
                            outcome: self.state.outcome,
                        });
                        break;
                    }
                },
                Err(e) => {
                    tracing::debug!(cell, error = %e, "Rejected tic-tac-toe move");
                },
            }
        }
        events
    }

    fn apply_input(&mut self, input: &[u8]) {
        match rmp_serde::from_slice::<TicTacToeInput>(input) {
            Ok(i) => self.pending_moves.push(i.cell),
            Err(e) => {
                tracing::debug!(error = %e, "Dropped malformed tic-tac-toe input");
            },
        }
    }

    arcade_game_boilerplate!(state_type: TicTacToeState);
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_core::test_helpers;

    fn pvp() -> TicTacToe {
        let mut game = TicTacToe::new(GameMode::PlayerVsPlayer);
        game.reset(0);
        game
    }

    fn pvc(difficulty: Difficulty) -> TicTacToe {
        let mut game = TicTacToe::new(GameMode::PlayerVsComputer { difficulty });
        game.reset(0);
        game
    }

    #[test]
    fn x_moves_first_then_players_alternate() {
        let mut game = pvp();
        game.apply_move(4).unwrap();
        assert_eq!(game.state.board.cell(4), Some(Marker::X));
        assert_eq!(game.state.next, Marker::O);
        game.apply_move(0).unwrap();
        assert_eq!(game.state.board.cell(0), Some(Marker::O));
        assert_eq!(game.state.next, Marker::X);
    }

    #[test]
    fn occupied_cell_is_rejected_without_toggling() {
        let mut game = pvp();
        game.apply_move(4).unwrap();
        let before = game.state;
        assert_eq!(game.apply_move(4), Err(InvalidMove::CellOccupied(4)));
        assert_eq!(game.state, before);
    }

    #[test]
    fn out_of_range_cell_is_rejected() {
        let mut game = pvp();
        assert_eq!(game.apply_move(9), Err(InvalidMove::OutOfRange(9)));
        assert_eq!(game.state.board.move_count(), 0);
    }

    #[test]
    fn completing_the_top_row_wins_for_x() {
        // Board [X, X, ., O, O, ., ., ., .] with X to move at 2.
        let mut game = pvp();
        game.apply_move(0).unwrap(); // X
        game.apply_move(3).unwrap(); // O
        game.apply_move(1).unwrap(); // X
        game.apply_move(4).unwrap(); // O
        game.apply_move(2).unwrap(); // X completes the top row
        assert_eq!(game.state.winner, Some(Marker::X));
        assert_eq!(game.outcome(), GameOutcome::Won);
    }

    #[test]
    fn full_board_without_a_line_draws() {
        let mut game = pvp();
        // X: 0 1 5 6 8, O: 2 3 4 7 — no three in a row.
        for cell in [0, 2, 1, 4, 5, 3, 6, 7, 8] {
            game.apply_move(cell).unwrap();
        }
        assert_eq!(game.outcome(), GameOutcome::Draw);
        assert_eq!(game.state.winner, None);
    }

    #[test]
    fn moves_after_the_game_ends_are_rejected() {
        let mut game = pvp();
        for cell in [0, 3, 1, 4, 2] {
            game.apply_move(cell).unwrap();
        }
        assert_eq!(game.outcome(), GameOutcome::Won);
        assert_eq!(game.apply_move(5), Err(InvalidMove::GameFinished));
    }

    #[test]
    fn computer_answers_a_human_move_in_the_same_call() {
        let mut game = pvc(Difficulty::Hard);
        game.apply_move(4).unwrap();
        assert_eq!(game.state.board.move_count(), 2);
        assert_eq!(game.state.next, Marker::X);
        let o_cells: Vec<usize> = (0..9)
            .filter(|&i| game.state.board.cell(i) == Some(Marker::O))
            .collect();
        assert_eq!(o_cells.len(), 1);
    }

    #[test]
    fn hard_computer_blocks_the_obvious_double_attack() {
        let mut game = pvc(Difficulty::Hard);
        game.apply_move(0).unwrap();
        // Perfect play against a corner opening takes the center.
        assert_eq!(game.state.board.cell(4), Some(Marker::O));
    }

    #[test]
    fn human_win_reads_as_won_and_computer_win_as_lost() {
        // Easy mode with a seed steering O away is too fragile; drive the
        // board directly through the shared placement path instead.
        let mut game = pvc(Difficulty::Hard);
        game.state.board = Board::new();
        for (cell, marker) in [(0, Marker::X), (3, Marker::O), (1, Marker::X), (4, Marker::O)] {
            game.state.board.place(cell, marker).unwrap();
        }
        game.state.next = Marker::X;
        game.place(2).unwrap();
        assert_eq!(game.outcome(), GameOutcome::Won);

        let mut game = pvc(Difficulty::Hard);
        for (cell, marker) in [(0, Marker::X), (3, Marker::O), (1, Marker::X), (4, Marker::O)] {
            game.state.board.place(cell, marker).unwrap();
        }
        game.state.next = Marker::O;
        game.place(5).unwrap();
        assert_eq!(game.outcome(), GameOutcome::Lost);
        assert_eq!(game.state.winner, Some(Marker::O));
    }

    #[test]
    fn hard_computer_never_loses_a_full_game_of_corner_grabbing() {
        // A naive strategy: the human always takes the lowest free cell.
        let mut game = pvc(Difficulty::Hard);
        while game.outcome() == GameOutcome::Running {
            let cell = (0..9)
                .find(|&i| game.state.board.is_empty_cell(i))
                .expect("running game has empty cells");
            game.apply_move(cell).unwrap();
        }
        assert_ne!(
            game.outcome(),
            GameOutcome::Won,
            "a lowest-cell human must never beat the hard oracle"
        );
    }

    #[test]
    fn queued_moves_flow_through_tick() {
        let mut game = pvp();
        game.apply_input(&rmp_serde::to_vec(&TicTacToeInput { cell: 4 }).unwrap());
        game.tick(1.0);
        assert_eq!(game.state.board.cell(4), Some(Marker::X));
    }

    #[test]
    fn reset_keeps_the_mode_and_clears_the_board() {
        let mut game = pvc(Difficulty::Easy);
        game.apply_move(4).unwrap();
        game.reset(1);
        assert_eq!(game.state.board.move_count(), 0);
        assert_eq!(game.state.next, Marker::X);
        assert!(matches!(
            game.mode(),
            GameMode::PlayerVsComputer {
                difficulty: Difficulty::Easy
            }
        ));
    }

    // ================================================================
    // Game contract tests
    // ================================================================

    #[test]
    fn contract_reset_is_deterministic() {
        let mut game = TicTacToe::default();
        test_helpers::contract_reset_is_deterministic(&mut game, 17);
        test_helpers::contract_reset_reproduces_start(&mut game, 17);
    }

    #[test]
    fn contract_terminal_tick_is_noop() {
        let mut game = pvp();
        for cell in [0, 3, 1, 4, 2] {
            game.apply_move(cell).unwrap();
        }
        test_helpers::contract_terminal_tick_is_noop(&mut game);
    }

    #[test]
    fn contract_state_and_input_io() {
        let mut game = TicTacToe::default();
        game.reset(0);
        test_helpers::contract_state_roundtrip_preserves(&mut game);
        test_helpers::contract_garbage_input_no_panic(&mut game);
        test_helpers::contract_truncated_state_no_panic(&mut game);
        let input = rmp_serde::to_vec(&TicTacToeInput { cell: 8 }).unwrap();
        test_helpers::contract_input_changes_state(&mut game, &input);
    }

    // ================================================================
    // Property-based tests
    // ================================================================

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn marker_count_always_matches_moves_played(
                cells in proptest::collection::vec(0usize..9, 1..20),
            ) {
                let mut game = pvp();
                let mut accepted = 0;
                for cell in cells {
                    if game.apply_move(cell).is_ok() {
                        accepted += 1;
                    }
                }
                prop_assert_eq!(game.state.board.move_count(), accepted);
            }

            #[test]
            fn hard_computer_never_loses_to_random_play(
                picks in proptest::collection::vec(0usize..9, 5..9),
            ) {
                let mut game = pvc(Difficulty::Hard);
                let mut cursor = 0;
                while game.outcome() == GameOutcome::Running && cursor < picks.len() {
                    let empty: Vec<usize> = (0..9)
                        .filter(|&i| game.state.board.is_empty_cell(i))
                        .collect();
                    if empty.is_empty() {
                        break;
                    }
                    let cell = empty[picks[cursor] % empty.len()];
                    cursor += 1;
                    game.apply_move(cell).unwrap();
                }
                prop_assert_ne!(game.outcome(), GameOutcome::Won);
            }
        }
    }
}
