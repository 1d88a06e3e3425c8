use serde::{Deserialize, Serialize};

use arcade_core::rng::GameRng;

use crate::board::{Board, Marker, CELL_COUNT};

/// Opponent strength, fixed for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Hard,
}

/// Terminal-node scores from O's perspective. Scores carry no depth
/// adjustment: equally-scored wins at different depths are indistinguishable,
/// which can delay a forced win but never concedes one.
const O_WIN_SCORE: i32 = 10;
const X_WIN_SCORE: i32 = -10;
const DRAW_SCORE: i32 = 0;

/// Choose a move for O on the given board. Returns `None` only when no empty
/// cell remains; callers must not consult the oracle on a full board.
pub fn best_move(board: &Board, difficulty: Difficulty, rng: &mut GameRng) -> Option<usize> {
    match difficulty {
        Difficulty::Easy => rng.pick(&board.empty_cells()).copied(),
        Difficulty::Hard => {
            // Root scan in ascending cell order with strict improvement, so
            // the lowest index among equal-best moves wins.
            let mut best_score = i32::MIN;
            let mut best = None;
            for index in 0..CELL_COUNT {
                if !board.is_empty_cell(index) {
                    continue;
                }
                let mut next = *board;
                next.set(index, Marker::O);
                let score = minimax(&next, false);
                if score > best_score {
                    best_score = score;
                    best = Some(index);
                }
            }
            best
        },
    }
}

/// Exhaustive game-tree search; O maximizes, X minimizes.
fn minimax(board: &Board, maximizing: bool) -> i32 {
    if let Some(winner) = board.winner() {
        return match winner {
            Marker::O => O_WIN_SCORE,
            Marker::X => X_WIN_SCORE,
        };
    }
    if board.is_full() {
        return DRAW_SCORE;
    }

    let (marker, fold, start) = if maximizing {
        (Marker::O, i32::max as fn(i32, i32) -> i32, i32::MIN)
    } else {
        (Marker::X, i32::min as fn(i32, i32) -> i32, i32::MAX)
    };
    let mut best = start;
    for index in 0..CELL_COUNT {
        if !board.is_empty_cell(index) {
            continue;
        }
        let mut next = *board;
        next.set(index, marker);
        best = fold(best, minimax(&next, !maximizing));
    }
    best
}
