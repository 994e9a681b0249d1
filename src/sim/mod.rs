//! Simulation module
//!
//! All gameplay logic lives here:
//! - Caller-supplied timestep
//! - Seeded RNG only, passed explicitly to anything random
//! - Stable iteration order (bricks by grid position, power-ups by spawn)
//! - No graphics API or platform dependencies

pub mod collision;
pub mod entity;
pub mod level;
pub mod particles;
pub mod powerup;
pub mod resolve;
pub mod state;
pub mod tick;

pub use collision::{Contact, Direction, circle_aabb, classify_direction, intersects_aabb};
pub use entity::{Ball, Entity};
pub use level::{Level, TileGrid};
pub use particles::{Particle, ParticlePool};
pub use powerup::{EffectTargets, PowerUp, PowerUpKind, PowerUps};
pub use resolve::resolve_collisions;
pub use state::{GameEvent, GameMode, GameState, World};
pub use tick::{process_input, render, tick};
