//! Hostile agent spawn placement
//!
//! New agents get a random heading in [0, π) (so they start drifting down the
//! screen) and a speed from the tuned band. Position is drawn inside the
//! spawn margin and re-drawn until the agent overlaps nothing live.

use glam::Vec2;

use super::collision::is_collision_free;
use super::rect::Rect;
use super::rng::RandomSource;
use super::state::{Arena, HostileAgent};
use crate::tuning::Tuning;
use crate::velocity_from_heading;

/// Draw a velocity: speed in `[min, min + range)`, heading in `[0, π)`
pub fn random_agent_velocity(rng: &mut RandomSource, tuning: &Tuning) -> Vec2 {
    let speed = tuning.hostile_agent_min_speed + rng.next_float(tuning.hostile_agent_speed_range);
    let theta = rng.next_float(std::f32::consts::PI);
    velocity_from_heading(speed, theta)
}

/// Draw the delay before an agent's next shot
pub fn random_fire_cooldown(rng: &mut RandomSource, tuning: &Tuning) -> f32 {
    tuning.hostile_fire_min_cooldown_ms + rng.next_float(tuning.hostile_fire_cooldown_range_ms)
}

/// Top-left corner for a candidate agent, on whole units inside the spawn margin
fn random_agent_position(rng: &mut RandomSource, tuning: &Tuning) -> Vec2 {
    let margin = tuning.spawn_margin;
    let span_x = (tuning.arena_width - 2.0 * margin - tuning.hostile_agent_size.x).max(0.0);
    let span_y = (tuning.arena_height - 2.0 * margin - tuning.hostile_agent_size.y).max(0.0);
    // Float-to-int casts saturate; spans past u32::MAX draw from [0, u32::MAX)
    Vec2::new(
        margin + rng.next_int((span_x as u32).saturating_add(1)) as f32,
        margin + rng.next_int((span_y as u32).saturating_add(1)) as f32,
    )
}

/// Build a hostile agent whose rectangle overlaps none of `occupied`.
///
/// Velocity and fire timer are drawn once; only the position is re-drawn on
/// a failed attempt. With `max_attempts == None` this loops until a free
/// spot turns up, which never happens in a packed arena.
pub fn place_hostile_agent(
    rng: &mut RandomSource,
    tuning: &Tuning,
    occupied: &[Rect],
    max_attempts: Option<u32>,
) -> Option<HostileAgent> {
    let velocity = random_agent_velocity(rng, tuning);
    let fire_cooldown = random_fire_cooldown(rng, tuning);

    let mut attempts: u32 = 0;
    loop {
        let rect = Rect {
            pos: random_agent_position(rng, tuning),
            size: tuning.hostile_agent_size,
        };
        attempts = attempts.saturating_add(1);

        if is_collision_free(&rect, occupied) {
            if attempts > 1 {
                log::trace!("Placed hostile agent after {} attempts", attempts);
            }
            return Some(HostileAgent::new(rect, velocity, fire_cooldown));
        }
        if max_attempts.is_some_and(|limit| attempts >= limit) {
            return None;
        }
    }
}

/// Spawn agents until the pool is back at its target size.
///
/// Returns how many were spawned. Stops early only when a retry limit is
/// configured and exhausted; the next maintenance pass tries again.
pub fn replenish_hostile_agents(arena: &mut Arena) -> usize {
    let mut spawned = 0;
    while arena.hostile_agents.len() < arena.tuning.max_hostile_agents {
        let occupied = arena.collision_rects();
        let limit = arena.tuning.spawn_retry_limit;
        match place_hostile_agent(&mut arena.rng, &arena.tuning, &occupied, limit) {
            Some(agent) => {
                log::debug!(
                    "Spawned hostile agent at ({:.0}, {:.0}) vel ({:.3}, {:.3})",
                    agent.rect.pos.x,
                    agent.rect.pos.y,
                    agent.velocity.x,
                    agent.velocity.y
                );
                arena.hostile_agents.push(agent);
                spawned += 1;
            }
            None => {
                log::warn!(
                    "No free spot for a hostile agent after {} attempts; pool at {}/{}",
                    limit.unwrap_or(0),
                    arena.hostile_agents.len(),
                    arena.tuning.max_hostile_agents
                );
                break;
            }
        }
    }
    spawned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::overlaps;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_velocity_band_and_heading() {
        let tuning = Tuning::default();
        let mut rng = RandomSource::new(3);
        let max_speed = tuning.hostile_agent_min_speed + tuning.hostile_agent_speed_range;
        for _ in 0..1000 {
            let v = random_agent_velocity(&mut rng, &tuning);
            let speed = v.length();
            assert!(speed >= tuning.hostile_agent_min_speed - 1e-5);
            assert!(speed <= max_speed + 1e-5);
            // Heading in [0, π) never points up the screen
            assert!(v.y >= -1e-6);
        }
    }

    #[test]
    fn test_placement_inside_margin() {
        let tuning = Tuning::default();
        let mut rng = RandomSource::new(11);
        for _ in 0..200 {
            let agent = place_hostile_agent(&mut rng, &tuning, &[], None).expect("empty arena");
            assert!(agent.rect.left() >= tuning.spawn_margin);
            assert!(agent.rect.top() >= tuning.spawn_margin);
            assert!(agent.rect.right() <= tuning.arena_width - tuning.spawn_margin);
            assert!(agent.rect.bottom() <= tuning.arena_height - tuning.spawn_margin);
            assert!(agent.active);
        }
    }

    #[test]
    fn test_retry_redraws_position_not_velocity() {
        let tuning = Tuning::default();
        let mut rng = RandomSource::new(5);
        let mut probe = rng.clone();
        let expected = random_agent_velocity(&mut probe, &tuning);

        // Block the left three quarters of the arena so early draws fail
        let blocker = Rect::new(0.0, 0.0, tuning.arena_width * 0.75, tuning.arena_height);
        let agent = place_hostile_agent(&mut rng, &tuning, &[blocker], None).expect("free strip");
        assert_eq!(agent.velocity, expected);
        assert!(!overlaps(&agent.rect, &blocker));
    }

    #[test]
    fn test_oversized_arena_spawns_inside_margin() {
        let tuning = Tuning {
            arena_width: 5.0e9,
            ..Tuning::default()
        };
        tuning.validate().expect("wide arena is a valid tuning");

        let arena = Arena::new(tuning, 17);
        assert_eq!(arena.hostile_agents().count(), arena.tuning().max_hostile_agents);
        for agent in arena.hostile_agents() {
            assert!(agent.rect.left() >= arena.tuning().spawn_margin);
            assert!(agent.rect.contained_in(arena.tuning().arena_width, arena.tuning().arena_height));
        }
    }

    #[test]
    fn test_spawned_agents_are_disjoint() {
        for seed in 0..20 {
            let arena = Arena::new(Tuning::default(), seed);
            let rects = arena.collision_rects();
            for i in 0..rects.len() {
                for j in (i + 1)..rects.len() {
                    assert!(!overlaps(&rects[i], &rects[j]), "seed {seed}: {i} overlaps {j}");
                }
            }
        }
    }

    #[test]
    fn test_packed_arena_bounded_attempts_give_up() {
        let tuning = Tuning::default();
        let mut rng = RandomSource::new(9);
        let everything = [Rect::new(0.0, 0.0, tuning.arena_width, tuning.arena_height)];
        assert!(place_hostile_agent(&mut rng, &tuning, &everything, Some(10_000)).is_none());
    }

    #[test]
    fn test_packed_arena_unbounded_never_returns() {
        let tuning = Tuning::default();
        let everything = [Rect::new(0.0, 0.0, tuning.arena_width, tuning.arena_height)];
        let (tx, rx) = mpsc::channel();

        // The worker spins forever; it is abandoned when the test binary exits
        thread::spawn(move || {
            let mut rng = RandomSource::new(13);
            let placed = place_hostile_agent(&mut rng, &tuning, &everything, None);
            let _ = tx.send(placed.is_some());
        });

        assert!(matches!(
            rx.recv_timeout(Duration::from_millis(300)),
            Err(mpsc::RecvTimeoutError::Timeout)
        ));
    }

    #[test]
    fn test_retry_limit_leaves_pool_short() {
        let tuning = Tuning {
            // Room for only a handful of agents, so a large pool cannot fit
            arena_width: 300.0,
            arena_height: 300.0,
            spawn_margin: 0.0,
            player_size: Vec2::new(10.0, 10.0),
            max_hostile_agents: 200,
            spawn_retry_limit: Some(50),
            ..Tuning::default()
        };
        let arena = Arena::new(tuning, 21);
        let count = arena.hostile_agents().count();
        assert!(count > 0);
        assert!(count < 200);
    }
}
