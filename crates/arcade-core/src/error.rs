/// Rejection reasons for a turn-based move. A rejected move leaves the game
/// state unchanged and does not toggle the active player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidMove {
    /// The target index does not exist on the board.
    OutOfRange(usize),
    /// The target cell already holds a marker.
    CellOccupied(usize),
    /// The game has reached a terminal outcome; reset to play again.
    GameFinished,
}

impl std::fmt::Display for InvalidMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange(idx) => write!(f, "cell index out of range: {idx}"),
            Self::CellOccupied(idx) => write!(f, "cell already occupied: {idx}"),
            Self::GameFinished => write!(f, "game already finished"),
        }
    }
}

impl std::error::Error for InvalidMove {}
