//! Arena state and entity records
//!
//! Entities are plain state holders. The only behavior they carry is their own
//! per-step integration; every interaction between them is decided in `tick`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::rng::RandomSource;
use super::spawn::replenish_hostile_agents;
use crate::tuning::Tuning;

/// Sound the host should play. The simulation only reports intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioCue {
    /// Player fired a projectile
    ShotFired,
    /// A hostile agent fired a projectile
    HostileShot,
    /// Hostile agent bounced off a wall or another agent
    Bounce,
    /// Player took damage
    Damage,
    /// A hostile agent was destroyed (explosion)
    Kill,
    /// Player health reached zero
    Death,
}

/// The player-controlled agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    health: i32,
    /// Milliseconds left before the trigger latch may release on its own
    pub cooldown_ms: f32,
    /// Set when a shot fires; cleared by cooldown expiry or releasing fire
    pub trigger_held: bool,
}

impl Player {
    pub fn new(center: Vec2, size: Vec2, health: i32) -> Self {
        Self {
            rect: Rect::from_center(center, size),
            health: health.max(0),
            cooldown_ms: 0.0,
            trigger_held: false,
        }
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    /// Write health. Negative values are rejected and the previous value is
    /// kept; returns whether the write was accepted.
    pub fn set_health(&mut self, value: i32) -> bool {
        if value < 0 {
            return false;
        }
        self.health = value;
        true
    }

    /// Deduct damage through `set_health`. A hit that would take health
    /// below zero is rejected like any other negative write; returns whether
    /// the new value was stored.
    pub fn apply_damage(&mut self, amount: i32) -> bool {
        self.set_health(self.health.saturating_sub(amount.max(0)))
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Move by `delta` and clamp into the arena
    pub fn move_by(&mut self, delta: Vec2, arena_width: f32, arena_height: f32) {
        self.rect = self.rect.translated(delta).clamped_to(arena_width, arena_height);
    }
}

/// An autonomously moving hostile agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostileAgent {
    pub rect: Rect,
    pub velocity: Vec2,
    pub active: bool,
    pub bounce_cue: AudioCue,
    pub shoot_cue: AudioCue,
    /// Milliseconds until the next shot
    pub fire_cooldown_ms: f32,
}

impl HostileAgent {
    pub fn new(rect: Rect, velocity: Vec2, fire_cooldown_ms: f32) -> Self {
        Self {
            rect,
            velocity,
            active: true,
            bounce_cue: AudioCue::Bounce,
            shoot_cue: AudioCue::HostileShot,
            fire_cooldown_ms,
        }
    }

    /// Center of the agent; effects and shots originate here
    pub fn location(&self) -> Vec2 {
        self.rect.center()
    }

    /// Apply velocity, bouncing off the arena edges.
    ///
    /// Returns true if the agent hit a wall this step.
    pub fn integrate(&mut self, elapsed_ms: f32, arena_width: f32, arena_height: f32) -> bool {
        self.rect = self.rect.translated(self.velocity * elapsed_ms);

        let mut bounced = false;
        if self.rect.left() < 0.0 {
            self.velocity.x = self.velocity.x.abs();
            bounced = true;
        } else if self.rect.right() > arena_width {
            self.velocity.x = -self.velocity.x.abs();
            bounced = true;
        }
        if self.rect.top() < 0.0 {
            self.velocity.y = self.velocity.y.abs();
            bounced = true;
        } else if self.rect.bottom() > arena_height {
            self.velocity.y = -self.velocity.y.abs();
            bounced = true;
        }
        if bounced {
            self.rect = self.rect.clamped_to(arena_width, arena_height);
        }
        bounced
    }

    /// Count down the fire timer; true when a shot is due
    pub fn advance_fire_timer(&mut self, elapsed_ms: f32) -> bool {
        self.fire_cooldown_ms -= elapsed_ms;
        self.fire_cooldown_ms <= 0.0
    }

    /// Apply one side of a pairwise collision outcome
    pub fn apply_resolution(&mut self, out_of_bounds: bool, velocity: Vec2, rect: Rect) {
        if out_of_bounds {
            self.deactivate();
        } else {
            self.velocity = velocity;
            self.rect = rect;
        }
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

/// Who fired a projectile, which decides what it can hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Fired by the player; hits hostile agents
    Friendly,
    /// Fired by a hostile agent; hits the player
    Hostile,
}

/// A short-lived projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub rect: Rect,
    pub velocity: Vec2,
    pub active: bool,
}

impl Projectile {
    pub fn new(kind: ProjectileKind, center: Vec2, size: Vec2, velocity: Vec2) -> Self {
        Self {
            kind,
            rect: Rect::from_center(center, size),
            velocity,
            active: true,
        }
    }

    /// Apply velocity; a projectile that has left the arena is deactivated
    pub fn integrate(&mut self, elapsed_ms: f32, arena_width: f32, arena_height: f32) {
        self.rect = self.rect.translated(self.velocity * elapsed_ms);
        if !self.rect.intersects_arena(arena_width, arena_height) {
            self.active = false;
        }
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

/// Explosion marker left behind by a destroyed agent. Never collides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Effect {
    pub rect: Rect,
    pub elapsed_ms: f32,
    pub duration_ms: f32,
    pub finished: bool,
}

impl Effect {
    pub fn new(center: Vec2, size: Vec2, duration_ms: f32) -> Self {
        Self {
            rect: Rect::from_center(center, size),
            elapsed_ms: 0.0,
            duration_ms,
            finished: false,
        }
    }

    pub fn advance(&mut self, elapsed_ms: f32) {
        if self.finished {
            return;
        }
        self.elapsed_ms += elapsed_ms;
        if self.elapsed_ms >= self.duration_ms {
            self.finished = true;
        }
    }
}

/// Everything one session owns. Only `tick` mutates it after construction.
#[derive(Debug, Clone)]
pub struct Arena {
    pub(crate) tuning: Tuning,
    pub(crate) rng: RandomSource,
    pub(crate) player: Player,
    pub(crate) hostile_agents: Vec<HostileAgent>,
    pub(crate) projectiles: Vec<Projectile>,
    pub(crate) effects: Vec<Effect>,
    pub(crate) score: u32,
    pub(crate) defeated: bool,
    pub(crate) frame: u64,
}

impl Arena {
    /// Start a session: player near the bottom center, hostile pool filled to target
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let player = Player::new(
            Vec2::new(tuning.arena_width / 2.0, tuning.arena_height * 7.0 / 8.0),
            tuning.player_size,
            tuning.player_initial_health,
        );
        let mut arena = Self {
            tuning,
            rng: RandomSource::new(seed),
            player,
            hostile_agents: Vec::new(),
            projectiles: Vec::new(),
            effects: Vec::new(),
            score: 0,
            defeated: false,
            frame: 0,
        };
        replenish_hostile_agents(&mut arena);
        log::info!(
            "Arena {}x{} started with seed {} and {} hostile agents",
            arena.tuning.arena_width,
            arena.tuning.arena_height,
            seed,
            arena.hostile_agents.len()
        );
        arena
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Set once, on the step the player's health reached zero
    pub fn defeated(&self) -> bool {
        self.defeated
    }

    /// Number of completed steps
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn hostile_agents(&self) -> impl Iterator<Item = &HostileAgent> {
        self.hostile_agents.iter().filter(|a| a.active)
    }

    pub fn projectiles(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter().filter(|p| p.active)
    }

    pub fn effects(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter().filter(|e| !e.finished)
    }

    /// Rectangles of every live entity, effects included
    pub fn collision_rects(&self) -> Vec<Rect> {
        std::iter::once(self.player.rect)
            .chain(self.hostile_agents().map(|a| a.rect))
            .chain(self.projectiles().map(|p| p.rect))
            .chain(self.effects().map(|e| e.rect))
            .collect()
    }

    /// Leave an explosion at `center`
    pub(crate) fn add_effect(&mut self, center: Vec2) {
        self.effects.push(Effect::new(
            center,
            self.tuning.effect_size,
            self.tuning.effect_duration_ms,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_health_write_is_rejected() {
        let mut player = Player::new(Vec2::new(400.0, 500.0), Vec2::new(60.0, 40.0), 100);
        assert!(!player.set_health(-5));
        assert_eq!(player.health(), 100);

        assert!(player.set_health(0));
        assert_eq!(player.health(), 0);
        assert!(!player.is_alive());
    }

    #[test]
    fn test_damage_below_zero_is_rejected() {
        let mut player = Player::new(Vec2::new(400.0, 500.0), Vec2::new(60.0, 40.0), 15);
        assert!(player.apply_damage(10));
        assert_eq!(player.health(), 5);

        // 5 - 10 is a negative write: previous value kept
        assert!(!player.apply_damage(10));
        assert_eq!(player.health(), 5);

        let mut player = Player::new(Vec2::new(400.0, 500.0), Vec2::new(60.0, 40.0), 3);
        assert!(!player.apply_damage(5));
        assert_eq!(player.health(), 3);

        assert!(player.apply_damage(3));
        assert_eq!(player.health(), 0);
        assert!(!player.is_alive());

        // Negative damage never heals
        assert!(player.apply_damage(-20));
        assert_eq!(player.health(), 0);
    }

    #[test]
    fn test_player_clamped_to_arena() {
        let mut player = Player::new(Vec2::new(40.0, 300.0), Vec2::new(60.0, 40.0), 100);
        player.move_by(Vec2::new(-100.0, 0.0), 800.0, 600.0);
        assert_eq!(player.rect.left(), 0.0);
        player.move_by(Vec2::new(2000.0, 2000.0), 800.0, 600.0);
        assert_eq!(player.rect.right(), 800.0);
        assert_eq!(player.rect.bottom(), 600.0);
    }

    #[test]
    fn test_agent_bounces_off_walls() {
        let mut agent = HostileAgent::new(
            Rect::new(790.0, 300.0, 48.0, 48.0),
            Vec2::new(0.2, 0.0),
            1000.0,
        );
        assert!(agent.integrate(16.0, 800.0, 600.0));
        assert!(agent.velocity.x < 0.0);
        assert!(agent.rect.contained_in(800.0, 600.0));

        // Free flight does not bounce
        let mut agent = HostileAgent::new(
            Rect::new(300.0, 300.0, 48.0, 48.0),
            Vec2::new(0.2, 0.1),
            1000.0,
        );
        assert!(!agent.integrate(16.0, 800.0, 600.0));
        assert!((agent.rect.pos - Vec2::new(303.2, 301.6)).length() < 1e-3);
    }

    #[test]
    fn test_agent_fire_timer() {
        let mut agent = HostileAgent::new(Rect::new(0.0, 0.0, 48.0, 48.0), Vec2::ZERO, 30.0);
        assert!(!agent.advance_fire_timer(16.0));
        assert!(agent.advance_fire_timer(16.0));
    }

    #[test]
    fn test_projectile_leaving_arena_deactivates() {
        let mut p = Projectile::new(
            ProjectileKind::Friendly,
            Vec2::new(400.0, 10.0),
            Vec2::new(8.0, 24.0),
            Vec2::new(0.0, -0.4),
        );
        p.integrate(16.0, 800.0, 600.0);
        assert!(p.active, "still partly on screen");
        p.integrate(100.0, 800.0, 600.0);
        assert!(!p.active);
        // Deactivation is idempotent
        p.deactivate();
        assert!(!p.active);
    }

    #[test]
    fn test_effect_finishes() {
        let mut effect = Effect::new(Vec2::new(100.0, 100.0), Vec2::splat(64.0), 270.0);
        effect.advance(200.0);
        assert!(!effect.finished);
        assert_eq!(effect.elapsed_ms, 200.0);
        effect.advance(70.0);
        assert!(effect.finished);
        // Finished effects stop counting
        effect.advance(50.0);
        assert_eq!(effect.elapsed_ms, 270.0);
    }

    #[test]
    fn test_new_arena_fills_pool() {
        let arena = Arena::new(Tuning::default(), 1);
        assert_eq!(arena.seed(), 1);
        assert_eq!(arena.hostile_agents().count(), arena.tuning().max_hostile_agents);
        assert_eq!(arena.player().health(), arena.tuning().player_initial_health);
        assert_eq!(arena.score(), 0);
        assert!(!arena.defeated());
        assert_eq!(arena.collision_rects().len(), 1 + arena.tuning().max_hostile_agents);
    }
}
