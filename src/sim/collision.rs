//! Collision detection and response for axis-aligned rectangles
//!
//! Pure functions over positions, sizes and velocities. Nothing here knows
//! which kind of entity a rectangle belongs to. Collisions are resolved once
//! per discrete step from current-frame overlap, not from time of impact.

use glam::Vec2;

use super::rect::Rect;
use crate::consts::SEPARATION_SLOP;

/// Outcome of resolving one overlapping pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResolution {
    /// Advancing the first body would carry it out of the arena
    pub first_out_of_bounds: bool,
    /// Outgoing velocity of the first body
    pub first_velocity: Vec2,
    /// Corrected rectangle of the first body
    pub first_rect: Rect,
    /// Advancing the second body would carry it out of the arena
    pub second_out_of_bounds: bool,
    /// Outgoing velocity of the second body
    pub second_velocity: Vec2,
    /// Corrected rectangle of the second body
    pub second_rect: Rect,
}

/// True iff the two rectangles intersect. Touching edges do not count.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && b.left() < a.right() && a.top() < b.bottom() && b.top() < a.bottom()
}

/// True iff the rectangle lies entirely inside the arena
#[inline]
pub fn in_bounds(rect: &Rect, arena_width: f32, arena_height: f32) -> bool {
    rect.contained_in(arena_width, arena_height)
}

/// True iff `candidate` overlaps none of `existing`
pub fn is_collision_free(candidate: &Rect, existing: &[Rect]) -> bool {
    !existing.iter().any(|rect| overlaps(candidate, rect))
}

/// Resolve a collision between two moving bodies
///
/// Returns `None` when the rectangles do not overlap. Otherwise each body is
/// checked independently: if moving it for `elapsed_ms` at its velocity would
/// leave the arena it is flagged out of bounds and returned unchanged (the
/// caller removes it). A body that stays in bounds takes the other body's
/// incoming velocity (equal-mass elastic exchange) and is pushed back along
/// the axis of least penetration so the pair no longer overlaps. Pushed
/// rectangles never leave the arena.
pub fn resolve_pairwise(
    elapsed_ms: f32,
    arena_width: f32,
    arena_height: f32,
    first_velocity: Vec2,
    first_rect: Rect,
    second_velocity: Vec2,
    second_rect: Rect,
) -> Option<CollisionResolution> {
    if !overlaps(&first_rect, &second_rect) {
        return None;
    }

    let first_out_of_bounds = !in_bounds(
        &first_rect.translated(first_velocity * elapsed_ms),
        arena_width,
        arena_height,
    );
    let second_out_of_bounds = !in_bounds(
        &second_rect.translated(second_velocity * elapsed_ms),
        arena_width,
        arena_height,
    );

    // Push that moves the second body clear of the first; each side takes half
    let push = separation(&first_rect, &second_rect);
    let half_push = Vec2::new(half_with_slop(push.x), half_with_slop(push.y));

    let mut resolution = CollisionResolution {
        first_out_of_bounds,
        first_velocity,
        first_rect,
        second_out_of_bounds,
        second_velocity,
        second_rect,
    };

    let (first_moved, second_moved) = push_apart_within(
        first_rect.translated(-half_push),
        second_rect.translated(half_push),
        !(first_out_of_bounds || second_out_of_bounds),
        arena_width,
        arena_height,
    );
    if !first_out_of_bounds {
        resolution.first_velocity = second_velocity;
        resolution.first_rect = first_moved;
    }
    if !second_out_of_bounds {
        resolution.second_velocity = first_velocity;
        resolution.second_rect = second_moved;
    }

    Some(resolution)
}

/// Keep both pushed rectangles inside the arena.
///
/// When both bodies stay in play, whatever a wall takes off one body's push
/// is added to the other's so the pair still ends up apart. Only an arena
/// too small to hold both side by side leaves them overlapping.
fn push_apart_within(
    first: Rect,
    second: Rect,
    hand_off: bool,
    arena_width: f32,
    arena_height: f32,
) -> (Rect, Rect) {
    let first_pinned = first.clamped_to(arena_width, arena_height);
    let second_pinned = second.clamped_to(arena_width, arena_height);
    if !hand_off {
        return (first_pinned, second_pinned);
    }

    let first_shortfall = first_pinned.pos - first.pos;
    let second_shortfall = second_pinned.pos - second.pos;
    (
        first_pinned
            .translated(second_shortfall)
            .clamped_to(arena_width, arena_height),
        second_pinned
            .translated(first_shortfall)
            .clamped_to(arena_width, arena_height),
    )
}

#[inline]
fn half_with_slop(push: f32) -> f32 {
    if push == 0.0 {
        0.0
    } else {
        push / 2.0 + push.signum() * SEPARATION_SLOP
    }
}

/// Minimum translation of `second` that ends the overlap with `first`.
///
/// Only one component is non-zero: the axis with the smaller penetration.
fn separation(first: &Rect, second: &Rect) -> Vec2 {
    // Penetration if second is pushed right/down vs left/up
    let push_right = first.right() - second.left();
    let push_left = second.right() - first.left();
    let push_down = first.bottom() - second.top();
    let push_up = second.bottom() - first.top();

    let x = if push_right <= push_left { push_right } else { -push_left };
    let y = if push_down <= push_up { push_down } else { -push_up };

    if x.abs() <= y.abs() {
        Vec2::new(x, 0.0)
    } else {
        Vec2::new(0.0, y)
    }
}
