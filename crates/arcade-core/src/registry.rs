use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game_trait::{ArcadeGame, GameMetadata};

/// Unique identifier for a registered game type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameId(pub String);

/// A registered game entry in the launcher catalog.
#[derive(Debug, Clone)]
pub struct GameEntry {
    pub id: GameId,
    pub metadata: GameMetadata,
}

impl GameEntry {
    pub fn new(id: impl Into<String>, metadata: GameMetadata) -> Self {
        Self {
            id: GameId(id.into()),
            metadata,
        }
    }
}

/// One live game instance behind a launcher screen.
///
/// A session is created when the player enters a game screen and dropped on
/// navigation away. Every timer lives inside the game state, so replacing
/// the instance (restart) or dropping the session voids all outstanding
/// timers; no stale callback can reach a superseded state.
pub struct GameSession {
    id: Uuid,
    game: Box<dyn ArcadeGame>,
}

impl GameSession {
    /// Enter a game screen: take ownership of the core and start a fresh run.
    pub fn start(mut game: Box<dyn ArcadeGame>, seed: u64) -> Self {
        game.reset(seed);
        let id = Uuid::new_v4();
        tracing::debug!(%id, game = %game.metadata().name, seed, "Game session started");
        Self { id, game }
    }

    /// Instance identity; changes on every restart.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn game(&self) -> &dyn ArcadeGame {
        self.game.as_ref()
    }

    pub fn game_mut(&mut self) -> &mut dyn ArcadeGame {
        self.game.as_mut()
    }

    /// Explicit reset: reinitializes the core and issues a new instance id.
    pub fn restart(&mut self, seed: u64) {
        self.game.reset(seed);
        self.id = Uuid::new_v4();
        tracing::debug!(id = %self.id, seed, "Game session restarted");
    }

    pub fn entry(&self) -> GameEntry {
        let metadata = self.game.metadata();
        let slug = metadata.name.to_lowercase().replace(' ', "-");
        GameEntry::new(slug, metadata)
    }
}
