use serde::{Deserialize, Serialize};

/// Mutable state of the game currently being played
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub score: i32,
    pub is_game_active: bool,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add points, saturating instead of wrapping
    pub fn add_score(&mut self, points: i32) {
        self.score = self.score.saturating_add(points);
    }
}
