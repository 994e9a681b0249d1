//! Power-ups
//!
//! Destroying a brick rolls an independent chance per kind. Spawned
//! power-ups drift down; catching one with the paddle applies its effect.
//! Timed effects count down and are reverted on expiry unless another
//! power-up of the same kind is still running.

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Ball, Entity};
use crate::consts::*;
use crate::render::{PostEffects, Renderer, Sprite};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Speed,
    Sticky,
    PassThrough,
    PadSizeIncrease,
    Confuse,
    Chaos,
}

/// Static tuning for one kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindSpec {
    /// Spawn chance is 1 in `one_in`
    pub one_in: u32,
    /// Effect duration in seconds; 0 means instantaneous
    pub duration: f32,
    pub color: Vec3,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::Speed,
        PowerUpKind::Sticky,
        PowerUpKind::PassThrough,
        PowerUpKind::PadSizeIncrease,
        PowerUpKind::Confuse,
        PowerUpKind::Chaos,
    ];

    pub const fn spec(self) -> KindSpec {
        match self {
            PowerUpKind::Speed => KindSpec {
                one_in: 75,
                duration: 0.0,
                color: Vec3::new(0.5, 0.5, 1.0),
            },
            PowerUpKind::Sticky => KindSpec {
                one_in: 75,
                duration: 20.0,
                color: Vec3::new(1.0, 0.5, 1.0),
            },
            PowerUpKind::PassThrough => KindSpec {
                one_in: 75,
                duration: 10.0,
                color: Vec3::new(0.5, 1.0, 0.5),
            },
            PowerUpKind::PadSizeIncrease => KindSpec {
                one_in: 75,
                duration: 0.0,
                color: Vec3::new(1.0, 0.6, 0.4),
            },
            PowerUpKind::Confuse => KindSpec {
                one_in: 15,
                duration: 15.0,
                color: Vec3::new(1.0, 0.3, 0.3),
            },
            PowerUpKind::Chaos => KindSpec {
                one_in: 15,
                duration: 15.0,
                color: Vec3::new(0.9, 0.25, 0.25),
            },
        }
    }
}

/// Paddle tint while sticky is active
const STICKY_PADDLE_COLOR: Vec3 = Vec3::new(1.0, 0.5, 1.0);
/// Ball tint while pass-through is active
const PASS_THROUGH_BALL_COLOR: Vec3 = Vec3::new(1.0, 0.5, 0.5);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub body: Entity,
    pub kind: PowerUpKind,
    /// Seconds of effect left once activated
    pub duration: f32,
    /// Effect currently applied
    pub activated: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, position: Vec2) -> Self {
        let spec = kind.spec();
        Self {
            body: Entity::new(Sprite::PowerUp(kind), position, POWERUP_SIZE, spec.color)
                .with_velocity(POWERUP_VELOCITY),
            kind,
            duration: spec.duration,
            activated: false,
        }
    }

    /// Safe to drop: gone from the board and not ticking
    #[inline]
    pub fn is_spent(&self) -> bool {
        self.body.destroyed && !self.activated
    }
}

/// What power-up effects act on
pub struct EffectTargets<'a> {
    pub ball: &'a mut Ball,
    pub paddle: &'a mut Entity,
    pub effects: &'a mut PostEffects,
}

/// Apply a kind's effect immediately
pub fn activate(kind: PowerUpKind, targets: &mut EffectTargets<'_>) {
    match kind {
        PowerUpKind::Speed => targets.ball.body.velocity *= SPEED_BOOST,
        PowerUpKind::Sticky => {
            targets.ball.sticky = true;
            targets.paddle.color = STICKY_PADDLE_COLOR;
        }
        PowerUpKind::PassThrough => {
            targets.ball.pass_through = true;
            targets.ball.body.color = PASS_THROUGH_BALL_COLOR;
        }
        PowerUpKind::PadSizeIncrease => targets.paddle.size.x += PAD_SIZE_INCREMENT,
        PowerUpKind::Confuse => {
            if !targets.effects.chaos {
                targets.effects.confuse = true;
            }
        }
        PowerUpKind::Chaos => {
            if !targets.effects.confuse {
                targets.effects.chaos = true;
            }
        }
    }
}

/// Undo a timed effect; instantaneous kinds have nothing to undo
fn revert(kind: PowerUpKind, targets: &mut EffectTargets<'_>) {
    match kind {
        PowerUpKind::Sticky => {
            targets.ball.sticky = false;
            targets.paddle.color = WHITE;
        }
        PowerUpKind::PassThrough => {
            targets.ball.pass_through = false;
            targets.ball.body.color = WHITE;
        }
        PowerUpKind::Confuse => targets.effects.confuse = false,
        PowerUpKind::Chaos => targets.effects.chaos = false,
        PowerUpKind::Speed | PowerUpKind::PadSizeIncrease => {}
    }
}

/// Live power-ups, in spawn order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PowerUps {
    items: Vec<PowerUp>,
}

impl PowerUps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Roll every kind once at `position`; returns how many spawned
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R, position: Vec2) -> usize {
        let mut spawned = 0;
        for kind in PowerUpKind::ALL {
            if rng.random_ratio(1, kind.spec().one_in) {
                log::debug!("Spawned {kind:?} power-up at {position}");
                self.items.push(PowerUp::new(kind, position));
                spawned += 1;
            }
        }
        spawned
    }

    pub fn push(&mut self, power_up: PowerUp) {
        self.items.push(power_up);
    }

    /// Move, count down active effects, expire them, then drop spent entries.
    ///
    /// Returns the kinds whose effect was reverted this tick.
    pub fn tick(&mut self, dt: f32, targets: &mut EffectTargets<'_>) -> Vec<PowerUpKind> {
        let mut reverted = Vec::new();
        for i in 0..self.items.len() {
            let p = &mut self.items[i];
            p.body.position += p.body.velocity * dt;
            if !p.activated {
                continue;
            }
            p.duration -= dt;
            if p.duration > 0.0 {
                continue;
            }
            p.activated = false;
            let kind = p.kind;
            if !self.is_active(kind) {
                revert(kind, targets);
                log::debug!("{kind:?} expired");
                reverted.push(kind);
            }
        }
        self.items.retain(|p| !p.is_spent());
        reverted
    }

    /// Some power-up of this kind is currently applied
    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.items.iter().any(|p| p.activated && p.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PowerUp> + '_ {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PowerUp> + '_ {
        self.items.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        for p in self.items.iter().filter(|p| !p.body.destroyed) {
            p.body.draw(renderer);
        }
    }
}
