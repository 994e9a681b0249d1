//! Breakout - A classic brick-breaking arcade game
//!
//! Core modules:
//! - `sim`: Simulation (entities, levels, collisions, power-ups, particles, game state)
//! - `input`: Key-state table with edge-triggered press tracking
//! - `render`: Renderer interface and a recording draw list
//! - `settings`: Data-driven configuration
//! - `error`: Crate error type

pub mod error;
pub mod input;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::Error;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::{Vec2, Vec3};

    /// Default window dimensions
    pub const SCREEN_WIDTH: u32 = 800;
    pub const SCREEN_HEIGHT: u32 = 600;

    /// Maximum frame delta accepted by the runner (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Paddle defaults
    pub const PLAYER_SIZE: Vec2 = Vec2::new(100.0, 20.0);
    /// Paddle speed (pixels/s)
    pub const PLAYER_VELOCITY: f32 = 500.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.5;
    pub const INITIAL_BALL_VELOCITY: Vec2 = Vec2::new(100.0, -350.0);
    /// Horizontal deflection strength on paddle hits
    pub const PADDLE_BOUNCE_STRENGTH: f32 = 2.0;

    /// Lives at the start of a level
    pub const STARTING_LIVES: u32 = 3;

    /// Screen shake duration after hitting a solid brick (seconds)
    pub const SHAKE_DURATION: f32 = 0.05;

    /// Power-up sprite size and fall speed
    pub const POWERUP_SIZE: Vec2 = Vec2::new(60.0, 20.0);
    pub const POWERUP_VELOCITY: Vec2 = Vec2::new(0.0, 150.0);
    /// Speed power-up multiplier
    pub const SPEED_BOOST: f32 = 1.2;
    /// Paddle growth per size power-up
    pub const PAD_SIZE_INCREMENT: f32 = 50.0;

    /// Particle trail defaults
    pub const DEFAULT_PARTICLE_CAPACITY: usize = 500;
    pub const PARTICLES_PER_FRAME: usize = 2;

    pub const WHITE: Vec3 = Vec3::ONE;
}

/// Center point of an axis-aligned box given its top-left corner and size
#[inline]
pub fn box_center(position: Vec2, size: Vec2) -> Vec2 {
    position + size * 0.5
}
