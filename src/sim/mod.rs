//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (insertion order, retain-based removal)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, resolve_bullet_hits, resolve_collisions, resolve_player_hits};
pub use spawner::Spawner;
pub use state::{Bullet, Enemy, Explosion, GameEvent, GamePhase, GameState, Particle, Player};
pub use tick::{TickInput, tick};
