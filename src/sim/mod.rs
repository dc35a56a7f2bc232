//! Frame-stepped arena simulation
//!
//! All gameplay logic lives here. Rules for this module:
//! - One step runs to completion before the next begins
//! - Seeded RNG only, owned by the arena and never reseeded mid-session
//! - Interaction passes only clear flags; removal happens in maintenance
//! - No rendering, audio playback, or input polling

pub mod collision;
pub mod rect;
pub mod rng;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CollisionResolution, in_bounds, is_collision_free, overlaps, resolve_pairwise};
pub use rect::Rect;
pub use rng::RandomSource;
pub use spawn::{place_hostile_agent, random_agent_velocity};
pub use state::{Arena, AudioCue, Effect, HostileAgent, Player, Projectile, ProjectileKind};
pub use tick::{ControlState, tick};
