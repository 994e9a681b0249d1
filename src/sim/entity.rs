//! Game entities
//!
//! Paddle, bricks, power-ups and the ball all share one [`Entity`] body.
//! Behavioural differences are data (solid flag, sprite tag, ball flags),
//! so drawing is uniform.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Error;
use crate::render::{Renderer, Sprite};

/// A drawable, movable rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Top-left corner
    pub position: Vec2,
    pub size: Vec2,
    pub velocity: Vec2,
    pub color: Vec3,
    /// Degrees; carried through to the renderer only
    pub rotation: f32,
    /// Indestructible brick
    pub solid: bool,
    /// Removed from play; skipped by update and draw
    pub destroyed: bool,
    pub sprite: Sprite,
}

impl Entity {
    pub fn new(sprite: Sprite, position: Vec2, size: Vec2, color: Vec3) -> Self {
        Self {
            position,
            size,
            velocity: Vec2::ZERO,
            color,
            rotation: 0.0,
            solid: false,
            destroyed: false,
            sprite,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        crate::box_center(self.position, self.size)
    }

    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.draw_sprite(self.sprite, self.position, self.size, self.rotation, self.color);
    }
}

/// The player's paddle at the bottom of the playfield
pub fn paddle(width: f32, height: f32) -> Entity {
    Entity::new(Sprite::Paddle, paddle_start(width, height), PLAYER_SIZE, WHITE)
}

/// Paddle spawn position: bottom center
pub fn paddle_start(width: f32, height: f32) -> Vec2 {
    Vec2::new(width / 2.0 - PLAYER_SIZE.x / 2.0, height - PLAYER_SIZE.y)
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub body: Entity,
    pub radius: f32,
    /// Glued to the paddle; moves only with it
    pub stuck: bool,
    /// Re-stick on paddle contact
    pub sticky: bool,
    /// Cross non-solid bricks without bouncing
    pub pass_through: bool,
}

impl Ball {
    pub fn new(position: Vec2, radius: f32, velocity: Vec2) -> Result<Self, Error> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(Error::InvalidGeometry {
                what: "ball radius",
                value: radius,
            });
        }
        Ok(Self {
            body: Entity::new(Sprite::Ball, position, Vec2::splat(radius * 2.0), WHITE)
                .with_velocity(velocity),
            radius,
            stuck: true,
            sticky: false,
            pass_through: false,
        })
    }

    /// Ball resting on top of the paddle, centered
    pub fn on_paddle(paddle: &Entity) -> Self {
        Self {
            body: Entity::new(
                Sprite::Ball,
                rest_position(paddle, BALL_RADIUS),
                Vec2::splat(BALL_RADIUS * 2.0),
                WHITE,
            )
            .with_velocity(INITIAL_BALL_VELOCITY),
            radius: BALL_RADIUS,
            stuck: true,
            sticky: false,
            pass_through: false,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.body.position + Vec2::splat(self.radius)
    }

    /// Integrate velocity and bounce off the left, right and top walls.
    ///
    /// The bottom edge is open. A stuck ball does not move.
    pub fn advance(&mut self, dt: f32, window_width: f32) -> Vec2 {
        if self.stuck {
            return self.body.position;
        }

        let body = &mut self.body;
        body.position += body.velocity * dt;

        if body.position.x <= 0.0 {
            body.velocity.x = -body.velocity.x;
            body.position.x = 0.0;
        } else if body.position.x + body.size.x >= window_width {
            body.velocity.x = -body.velocity.x;
            body.position.x = window_width - body.size.x;
        }
        if body.position.y <= 0.0 {
            body.velocity.y = -body.velocity.y;
            body.position.y = 0.0;
        }

        body.position
    }

    /// Put the ball back on the paddle with the given velocity
    pub fn reset(&mut self, position: Vec2, velocity: Vec2) {
        self.body.position = position;
        self.body.velocity = velocity;
        self.stuck = true;
    }
}

/// Where a ball of `radius` sits when resting on top of `paddle`
pub fn rest_position(paddle: &Entity, radius: f32) -> Vec2 {
    paddle.position + Vec2::new(paddle.size.x / 2.0 - radius, -radius * 2.0)
}
