//! Per-frame simulation step
//!
//! Advances every entity and resolves interactions in a fixed order. Later
//! passes see the flag changes made by earlier ones. Nothing is removed from a
//! pool until the final maintenance pass, so no pass iterates a collection
//! that is changing shape underneath it.

use glam::Vec2;

use super::collision::{overlaps, resolve_pairwise};
use super::spawn::{random_fire_cooldown, replenish_hostile_agents};
use super::state::{Arena, AudioCue, Projectile, ProjectileKind};

/// Control snapshot sampled by the host for one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire control pressed or held
    pub fire: bool,
}

impl ControlState {
    /// Unnormalized movement direction (each axis in -1, 0, 1; y down)
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i32 - neg as i32) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Advance the arena by one step of `elapsed_ms` milliseconds.
///
/// Returns the audio cues raised during the step, in the order they happened.
pub fn tick(arena: &mut Arena, input: &ControlState, elapsed_ms: f32) -> Vec<AudioCue> {
    // NaN and negative deltas advance nothing
    let elapsed_ms = elapsed_ms.max(0.0);
    let mut cues = Vec::new();

    arena.frame += 1;

    integrate(arena, input, elapsed_ms, &mut cues);
    resolve_player_fire(arena, input, elapsed_ms, &mut cues);
    resolve_agent_collisions(arena, elapsed_ms, &mut cues);
    resolve_player_agent_collisions(arena, &mut cues);
    resolve_player_projectile_collisions(arena, &mut cues);
    resolve_agent_projectile_collisions(arena, &mut cues);
    maintain_pools(arena);

    cues
}

/// Move everything one step. Agents may fire while moving.
fn integrate(arena: &mut Arena, input: &ControlState, elapsed_ms: f32, cues: &mut Vec<AudioCue>) {
    let width = arena.tuning.arena_width;
    let height = arena.tuning.arena_height;

    if arena.player.is_alive() {
        let delta = input.direction() * arena.tuning.player_speed * elapsed_ms;
        arena.player.move_by(delta, width, height);
    }

    // Collect new shots so existing projectiles are integrated exactly once
    let mut fired: Vec<Projectile> = Vec::new();
    for agent in arena.hostile_agents.iter_mut().filter(|a| a.active) {
        if agent.integrate(elapsed_ms, width, height) {
            cues.push(agent.bounce_cue);
        }
        if agent.advance_fire_timer(elapsed_ms) {
            agent.fire_cooldown_ms = random_fire_cooldown(&mut arena.rng, &arena.tuning);
            let muzzle = Vec2::new(
                agent.location().x,
                agent.rect.bottom() + arena.tuning.hostile_projectile_offset,
            );
            fired.push(Projectile::new(
                ProjectileKind::Hostile,
                muzzle,
                arena.tuning.hostile_projectile_size,
                Vec2::new(0.0, arena.tuning.hostile_projectile_speed),
            ));
            cues.push(agent.shoot_cue);
        }
    }

    for projectile in arena.projectiles.iter_mut().filter(|p| p.active) {
        projectile.integrate(elapsed_ms, width, height);
    }
    arena.projectiles.extend(fired);

    for effect in &mut arena.effects {
        effect.advance(elapsed_ms);
    }
}

/// Cooldown, trigger latch and the player's shot
fn resolve_player_fire(
    arena: &mut Arena,
    input: &ControlState,
    elapsed_ms: f32,
    cues: &mut Vec<AudioCue>,
) {
    let player = &mut arena.player;

    if player.trigger_held {
        player.cooldown_ms -= elapsed_ms;
        if player.cooldown_ms <= 0.0 || !input.fire {
            player.trigger_held = false;
            player.cooldown_ms = 0.0;
        }
    }

    if input.fire && !player.trigger_held && player.is_alive() {
        player.trigger_held = true;
        player.cooldown_ms = arena.tuning.player_fire_cooldown_ms;

        let muzzle = Vec2::new(
            player.rect.center().x,
            player.rect.top() - arena.tuning.friendly_projectile_offset,
        );
        arena.projectiles.push(Projectile::new(
            ProjectileKind::Friendly,
            muzzle,
            arena.tuning.friendly_projectile_size,
            Vec2::new(0.0, -arena.tuning.friendly_projectile_speed),
        ));
        cues.push(AudioCue::ShotFired);
    }
}

/// Bounce or knock out every overlapping pair of live agents
fn resolve_agent_collisions(arena: &mut Arena, elapsed_ms: f32, cues: &mut Vec<AudioCue>) {
    let width = arena.tuning.arena_width;
    let height = arena.tuning.arena_height;
    let count = arena.hostile_agents.len();

    for i in 0..count {
        for j in (i + 1)..count {
            let first = &arena.hostile_agents[i];
            let second = &arena.hostile_agents[j];
            if !(first.active && second.active) {
                continue;
            }

            let Some(info) = resolve_pairwise(
                elapsed_ms,
                width,
                height,
                first.velocity,
                first.rect,
                second.velocity,
                second.rect,
            ) else {
                continue;
            };
            let bounce_cue = first.bounce_cue;

            arena.hostile_agents[i].apply_resolution(
                info.first_out_of_bounds,
                info.first_velocity,
                info.first_rect,
            );
            arena.hostile_agents[j].apply_resolution(
                info.second_out_of_bounds,
                info.second_velocity,
                info.second_rect,
            );
            cues.push(bounce_cue);
        }
    }
}

/// Agents that ram the player hurt it and explode
fn resolve_player_agent_collisions(arena: &mut Arena, cues: &mut Vec<AudioCue>) {
    for i in 0..arena.hostile_agents.len() {
        let agent = &arena.hostile_agents[i];
        if !agent.active || !overlaps(&agent.rect, &arena.player.rect) {
            continue;
        }
        let location = agent.location();

        if !arena.player.apply_damage(arena.tuning.hostile_agent_damage) {
            log::trace!("Frame {}: ram damage would drop health below zero", arena.frame);
        }
        arena.hostile_agents[i].deactivate();
        arena.add_effect(location);
        cues.push(AudioCue::Kill);
        cues.push(AudioCue::Damage);
        log::debug!(
            "Frame {}: hostile agent rammed player, health now {}",
            arena.frame,
            arena.player.health()
        );
        check_defeat(arena, cues);
    }
}

/// Hostile shots that reach the player
fn resolve_player_projectile_collisions(arena: &mut Arena, cues: &mut Vec<AudioCue>) {
    for i in 0..arena.projectiles.len() {
        let projectile = &arena.projectiles[i];
        if projectile.kind != ProjectileKind::Hostile
            || !projectile.active
            || !overlaps(&projectile.rect, &arena.player.rect)
        {
            continue;
        }

        arena.projectiles[i].deactivate();
        if !arena.player.apply_damage(arena.tuning.hostile_projectile_damage) {
            log::trace!("Frame {}: shot damage would drop health below zero", arena.frame);
        }
        cues.push(AudioCue::Damage);
        log::debug!(
            "Frame {}: player shot, health now {}",
            arena.frame,
            arena.player.health()
        );
        check_defeat(arena, cues);
    }
}

/// Friendly shots that reach an agent. Each shot kills at most one agent.
fn resolve_agent_projectile_collisions(arena: &mut Arena, cues: &mut Vec<AudioCue>) {
    for j in 0..arena.hostile_agents.len() {
        for i in 0..arena.projectiles.len() {
            let agent = &arena.hostile_agents[j];
            let projectile = &arena.projectiles[i];
            if !agent.active
                || !projectile.active
                || projectile.kind != ProjectileKind::Friendly
                || !overlaps(&projectile.rect, &agent.rect)
            {
                continue;
            }
            let location = agent.location();

            arena.hostile_agents[j].deactivate();
            arena.projectiles[i].deactivate();
            arena.score = arena.score.saturating_add(arena.tuning.hostile_agent_reward);
            arena.add_effect(location);
            cues.push(AudioCue::Kill);
            log::debug!("Frame {}: hostile agent destroyed, score {}", arena.frame, arena.score);
        }
    }
}

/// Raise the death cue once, on the step health first reaches zero
fn check_defeat(arena: &mut Arena, cues: &mut Vec<AudioCue>) {
    if arena.player.health() <= 0 && !arena.defeated {
        arena.defeated = true;
        cues.push(AudioCue::Death);
        log::info!(
            "Player defeated on frame {} with score {}",
            arena.frame,
            arena.score
        );
    }
}

/// Drop everything flagged dead, then refill the hostile pool
fn maintain_pools(arena: &mut Arena) {
    arena.hostile_agents.retain(|a| a.active);
    arena.projectiles.retain(|p| p.active);
    arena.effects.retain(|e| !e.finished);
    replenish_hostile_agents(arena);
}
