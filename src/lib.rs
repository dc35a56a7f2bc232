//! Burger Arena - a small bounded 2D arcade arena
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (collision math, entities, spawn placement, step)
//! - `tuning`: Named tunable constants, loadable from JSON
//! - `hud`: Health/score display strings derived from the arena
//! - `audio`: Host-side consumer of the audio cues raised by the simulation

pub mod audio;
pub mod hud;
pub mod sim;
pub mod tuning;

pub use audio::AudioManager;
pub use hud::Hud;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Default tunables. All velocities are in arena units per millisecond.
pub mod consts {
    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Hostile pool target size
    pub const MAX_HOSTILE_AGENTS: usize = 10;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const PLAYER_INITIAL_HEALTH: i32 = 100;
    pub const PLAYER_SPEED: f32 = 0.5;
    pub const PLAYER_FIRE_COOLDOWN_MS: f32 = 500.0;

    /// Friendly projectile (fired upward by the player)
    pub const FRIENDLY_PROJECTILE_SPEED: f32 = 0.4;
    pub const FRIENDLY_PROJECTILE_OFFSET: f32 = 20.0;
    pub const FRIENDLY_PROJECTILE_WIDTH: f32 = 8.0;
    pub const FRIENDLY_PROJECTILE_HEIGHT: f32 = 24.0;

    /// Hostile projectile (fired downward by agents)
    pub const HOSTILE_PROJECTILE_SPEED: f32 = 0.3;
    pub const HOSTILE_PROJECTILE_OFFSET: f32 = 20.0;
    pub const HOSTILE_PROJECTILE_SIZE: f32 = 12.0;

    /// Hostile agent defaults
    pub const HOSTILE_AGENT_SIZE: f32 = 48.0;
    pub const HOSTILE_AGENT_MIN_SPEED: f32 = 0.1;
    pub const HOSTILE_AGENT_SPEED_RANGE: f32 = 0.2;
    pub const HOSTILE_FIRE_MIN_COOLDOWN_MS: f32 = 1000.0;
    pub const HOSTILE_FIRE_COOLDOWN_RANGE_MS: f32 = 2000.0;

    /// Interaction rules
    pub const HOSTILE_AGENT_DAMAGE: i32 = 10;
    pub const HOSTILE_PROJECTILE_DAMAGE: i32 = 5;
    pub const HOSTILE_AGENT_REWARD: u32 = 10;

    /// Distance kept between spawned agents and the arena edge
    pub const SPAWN_MARGIN: f32 = 100.0;

    /// Explosion effect
    pub const EFFECT_SIZE: f32 = 64.0;
    pub const EFFECT_DURATION_MS: f32 = 270.0;

    /// Extra push applied on top of half the penetration so resolved pairs are disjoint
    pub const SEPARATION_SLOP: f32 = 0.01;

    /// HUD prefixes
    pub const HEALTH_PREFIX: &str = "Health: ";
    pub const SCORE_PREFIX: &str = "Score: ";
}

/// Convert a speed and heading (radians, y down) to a velocity vector
#[inline]
pub fn velocity_from_heading(speed: f32, theta: f32) -> Vec2 {
    Vec2::new(speed * theta.cos(), speed * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_velocity_from_heading() {
        let v = velocity_from_heading(2.0, 0.0);
        assert!((v.x - 2.0).abs() < 1e-6);
        assert!(v.y.abs() < 1e-6);

        // Straight down the screen
        let v = velocity_from_heading(0.5, FRAC_PI_2);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 0.5).abs() < 1e-6);
    }
}
