use serde::{Deserialize, Serialize};

/// Result of a game instance. Terminal values are absorbing: once a game
/// leaves `Running` it stays there until an explicit reset creates a fresh
/// instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    #[default]
    Running,
    Won,
    Lost,
    Draw,
}

impl GameOutcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}
