//! Health and score display strings

use crate::consts::{HEALTH_PREFIX, SCORE_PREFIX};
use crate::sim::Arena;

/// Display strings, rebuilt only when the number behind them changes
#[derive(Debug, Clone)]
pub struct Hud {
    pub health_text: String,
    pub score_text: String,
    health: i32,
    score: u32,
}

impl Hud {
    pub fn new(arena: &Arena) -> Self {
        let health = arena.player().health();
        let score = arena.score();
        Self {
            health_text: format!("{HEALTH_PREFIX}{health}"),
            score_text: format!("{SCORE_PREFIX}{score}"),
            health,
            score,
        }
    }

    /// Rebuild stale strings. Returns true if anything changed.
    pub fn refresh(&mut self, arena: &Arena) -> bool {
        let mut changed = false;
        let health = arena.player().health();
        if health != self.health {
            self.health = health;
            self.health_text = format!("{HEALTH_PREFIX}{health}");
            changed = true;
        }
        let score = arena.score();
        if score != self.score {
            self.score = score;
            self.score_text = format!("{SCORE_PREFIX}{score}");
            changed = true;
        }
        changed
    }
}
