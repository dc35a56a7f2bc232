//! Game balance
//!
//! Every named constant the simulation reads, in one serializable struct.
//! Missing JSON fields fall back to the defaults in `consts`.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading or validating tuning
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(&'static str),
}

/// Tunable constants, fixed for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,
    /// Hostile pool target size
    pub max_hostile_agents: usize,

    // === Player ===
    pub player_size: Vec2,
    pub player_initial_health: i32,
    /// Units per millisecond
    pub player_speed: f32,
    pub player_fire_cooldown_ms: f32,

    // === Projectiles ===
    pub friendly_projectile_speed: f32,
    /// Gap between the player's top edge and a new projectile's center
    pub friendly_projectile_offset: f32,
    pub friendly_projectile_size: Vec2,
    pub hostile_projectile_speed: f32,
    /// Gap between an agent's bottom edge and a new projectile's center
    pub hostile_projectile_offset: f32,
    pub hostile_projectile_size: Vec2,

    // === Hostile agents ===
    pub hostile_agent_size: Vec2,
    pub hostile_agent_min_speed: f32,
    pub hostile_agent_speed_range: f32,
    pub hostile_fire_min_cooldown_ms: f32,
    pub hostile_fire_cooldown_range_ms: f32,

    // === Interaction rules ===
    pub hostile_agent_damage: i32,
    pub hostile_projectile_damage: i32,
    pub hostile_agent_reward: u32,

    // === Spawning ===
    pub spawn_margin: f32,
    /// Placement attempts per agent before giving up for this step; `None` retries forever
    pub spawn_retry_limit: Option<u32>,

    // === Effects ===
    pub effect_size: Vec2,
    pub effect_duration_ms: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            max_hostile_agents: MAX_HOSTILE_AGENTS,

            player_size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            player_initial_health: PLAYER_INITIAL_HEALTH,
            player_speed: PLAYER_SPEED,
            player_fire_cooldown_ms: PLAYER_FIRE_COOLDOWN_MS,

            friendly_projectile_speed: FRIENDLY_PROJECTILE_SPEED,
            friendly_projectile_offset: FRIENDLY_PROJECTILE_OFFSET,
            friendly_projectile_size: Vec2::new(FRIENDLY_PROJECTILE_WIDTH, FRIENDLY_PROJECTILE_HEIGHT),
            hostile_projectile_speed: HOSTILE_PROJECTILE_SPEED,
            hostile_projectile_offset: HOSTILE_PROJECTILE_OFFSET,
            hostile_projectile_size: Vec2::splat(HOSTILE_PROJECTILE_SIZE),

            hostile_agent_size: Vec2::splat(HOSTILE_AGENT_SIZE),
            hostile_agent_min_speed: HOSTILE_AGENT_MIN_SPEED,
            hostile_agent_speed_range: HOSTILE_AGENT_SPEED_RANGE,
            hostile_fire_min_cooldown_ms: HOSTILE_FIRE_MIN_COOLDOWN_MS,
            hostile_fire_cooldown_range_ms: HOSTILE_FIRE_COOLDOWN_RANGE_MS,

            hostile_agent_damage: HOSTILE_AGENT_DAMAGE,
            hostile_projectile_damage: HOSTILE_PROJECTILE_DAMAGE,
            hostile_agent_reward: HOSTILE_AGENT_REWARD,

            spawn_margin: SPAWN_MARGIN,
            spawn_retry_limit: None,

            effect_size: Vec2::splat(EFFECT_SIZE),
            effect_duration_ms: EFFECT_DURATION_MS,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.arena_width > 0.0 && self.arena_height > 0.0) {
            return Err(TuningError::Invalid("arena dimensions must be positive"));
        }
        if !positive(self.player_size) || !positive(self.hostile_agent_size) {
            return Err(TuningError::Invalid("entity sizes must be positive"));
        }
        if !positive(self.friendly_projectile_size) || !positive(self.hostile_projectile_size) {
            return Err(TuningError::Invalid("projectile sizes must be positive"));
        }
        if self.player_size.x > self.arena_width || self.player_size.y > self.arena_height {
            return Err(TuningError::Invalid("player does not fit in the arena"));
        }
        if self.player_initial_health <= 0 {
            return Err(TuningError::Invalid("player_initial_health must be positive"));
        }
        if self.hostile_agent_damage < 0 || self.hostile_projectile_damage < 0 {
            return Err(TuningError::Invalid("damage amounts must not be negative"));
        }
        let rates = [
            self.player_speed,
            self.player_fire_cooldown_ms,
            self.friendly_projectile_speed,
            self.hostile_projectile_speed,
            self.hostile_agent_min_speed,
            self.hostile_agent_speed_range,
            self.hostile_fire_min_cooldown_ms,
            self.hostile_fire_cooldown_range_ms,
            self.spawn_margin,
        ];
        if rates.iter().any(|v| !(*v >= 0.0)) {
            return Err(TuningError::Invalid("speeds, cooldowns and margins must not be negative"));
        }
        if self.arena_width - 2.0 * self.spawn_margin < self.hostile_agent_size.x
            || self.arena_height - 2.0 * self.spawn_margin < self.hostile_agent_size.y
        {
            return Err(TuningError::Invalid("spawn margin leaves no room for a hostile agent"));
        }
        if self.spawn_retry_limit == Some(0) {
            return Err(TuningError::Invalid("spawn_retry_limit must be at least 1"));
        }
        if !(self.effect_duration_ms > 0.0) || !positive(self.effect_size) {
            return Err(TuningError::Invalid("effects need a positive size and duration"));
        }
        Ok(())
    }
}

fn positive(size: Vec2) -> bool {
    size.x > 0.0 && size.y > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "max_hostile_agents": 4, "spawn_retry_limit": 500 }"#)
            .expect("valid tuning");
        assert_eq!(tuning.max_hostile_agents, 4);
        assert_eq!(tuning.spawn_retry_limit, Some(500));
        assert_eq!(tuning.arena_width, ARENA_WIDTH);
        assert_eq!(tuning.hostile_agent_damage, HOSTILE_AGENT_DAMAGE);
    }

    #[test]
    fn test_json_roundtrip() {
        let tuning = Tuning {
            player_size: Vec2::new(32.0, 16.0),
            ..Tuning::default()
        };
        let json = tuning.to_json().expect("serializes");
        assert_eq!(Tuning::from_json(&json).expect("parses"), tuning);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_invalid_values() {
        let cases = [
            Tuning { arena_width: 0.0, ..Tuning::default() },
            Tuning { player_initial_health: 0, ..Tuning::default() },
            Tuning { hostile_agent_damage: -1, ..Tuning::default() },
            Tuning { spawn_margin: 290.0, ..Tuning::default() },
            Tuning { spawn_retry_limit: Some(0), ..Tuning::default() },
            Tuning { effect_duration_ms: 0.0, ..Tuning::default() },
            Tuning { hostile_agent_min_speed: f32::NAN, ..Tuning::default() },
        ];
        for tuning in cases {
            assert!(matches!(tuning.validate(), Err(TuningError::Invalid(_))), "{tuning:?}");
        }
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Tuning::load("/nonexistent/burger-arena/tuning.json"),
            Err(TuningError::Io(_))
        ));
    }
}
