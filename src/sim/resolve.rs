//! Per-frame collision response
//!
//! Runs in a fixed order: ball vs bricks, falling power-ups vs the board and
//! paddle, then ball vs paddle. Every overlapping brick is resolved on its
//! own, so a ball wedged between two bricks can flip twice in one frame.

use rand::Rng;

use super::collision::{Contact, Direction, circle_aabb, intersects_aabb};
use super::entity::{Ball, Entity};
use super::powerup::{EffectTargets, activate};
use super::state::{GameEvent, World};
use crate::consts::*;

/// Run every collision check for one frame
pub fn resolve_collisions<R: Rng + ?Sized>(
    world: &mut World,
    bricks: &mut [Entity],
    rng: &mut R,
    board_height: f32,
    events: &mut Vec<GameEvent>,
) {
    ball_vs_bricks(world, bricks, rng, events);
    power_ups_vs_paddle(world, board_height, events);
    ball_vs_paddle(world, events);
}

fn ball_vs_bricks<R: Rng + ?Sized>(
    world: &mut World,
    bricks: &mut [Entity],
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    for (index, brick) in bricks.iter_mut().enumerate() {
        if brick.destroyed {
            continue;
        }
        let ball = &world.ball;
        let Some(contact) = circle_aabb(ball.center(), ball.radius, brick.position, brick.size) else {
            continue;
        };

        if brick.solid {
            world.shake_time = SHAKE_DURATION;
            world.effects.shake = true;
            events.push(GameEvent::SolidBrickHit { index });
        } else {
            brick.destroyed = true;
            let spawned = world.power_ups.spawn(rng, brick.position);
            events.push(GameEvent::BrickDestroyed { index });
            events.push(GameEvent::PowerUpRoll {
                position: brick.position,
                spawned,
            });
        }

        if world.ball.pass_through && !brick.solid {
            continue;
        }
        bounce(&mut world.ball, contact);
    }
}

/// Reflect the ball off a box face and push it out of the overlap
pub fn bounce(ball: &mut Ball, contact: Contact) {
    let body = &mut ball.body;
    if contact.direction.is_horizontal() {
        body.velocity.x = -body.velocity.x;
        let depth = ball.radius - contact.penetration.x.abs();
        if contact.direction == Direction::Left {
            body.position.x += depth;
        } else {
            body.position.x -= depth;
        }
    } else {
        body.velocity.y = -body.velocity.y;
        let depth = ball.radius - contact.penetration.y.abs();
        if contact.direction == Direction::Up {
            body.position.y -= depth;
        } else {
            body.position.y += depth;
        }
    }
}

fn power_ups_vs_paddle(world: &mut World, board_height: f32, events: &mut Vec<GameEvent>) {
    let mut targets = EffectTargets {
        ball: &mut world.ball,
        paddle: &mut world.paddle,
        effects: &mut world.effects,
    };
    for p in world.power_ups.iter_mut() {
        if p.body.destroyed {
            continue;
        }
        if p.body.position.y >= board_height {
            p.body.destroyed = true;
        }
        if intersects_aabb(
            targets.paddle.position,
            targets.paddle.size,
            p.body.position,
            p.body.size,
        ) {
            activate(p.kind, &mut targets);
            p.body.destroyed = true;
            p.activated = true;
            log::debug!("Collected {:?}", p.kind);
            events.push(GameEvent::PowerUpCollected(p.kind));
        }
    }
}

fn ball_vs_paddle(world: &mut World, events: &mut Vec<GameEvent>) {
    let ball = &mut world.ball;
    let paddle = &world.paddle;
    if ball.stuck || circle_aabb(ball.center(), ball.radius, paddle.position, paddle.size).is_none() {
        return;
    }

    // Where on the paddle it landed, -1 (left edge) to 1 (right edge)
    let half_width = paddle.size.x / 2.0;
    let paddle_center = paddle.position.x + half_width;
    let percentage = (ball.body.position.x + ball.radius - paddle_center) / half_width;

    let velocity = &mut ball.body.velocity;
    let speed = velocity.length();
    velocity.x = INITIAL_BALL_VELOCITY.x * percentage * PADDLE_BOUNCE_STRENGTH;
    *velocity = velocity.normalize_or_zero() * speed;
    // Always leave upward, even on a side graze
    velocity.y = -velocity.y.abs();

    ball.stuck = ball.sticky;
    events.push(GameEvent::PaddleHit { percentage });
}
