//! Renderer interface
//!
//! The simulation never touches a graphics API. Each frame it pushes sprite,
//! particle and text draws through [`Renderer`], then hands over the
//! post-processing flags. [`DrawList`] records those calls so a frame can be
//! inspected, diffed or dumped as JSON.

use glam::{Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::sim::PowerUpKind;

/// Texture handles the renderer is expected to have loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sprite {
    Background,
    Block,
    BlockSolid,
    Paddle,
    Ball,
    PowerUp(PowerUpKind),
}

/// Screen-space shader effects toggled by gameplay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostEffects {
    pub shake: bool,
    pub confuse: bool,
    pub chaos: bool,
}

pub trait Renderer {
    fn draw_sprite(&mut self, sprite: Sprite, position: Vec2, size: Vec2, rotation: f32, color: Vec3);

    fn draw_particle(&mut self, position: Vec2, color: Vec4);

    fn draw_text(&mut self, text: &str, position: Vec2, scale: f32, color: Vec3);

    /// Composite the frame with the given effects; `time` drives shader animation
    fn post_process(&mut self, effects: PostEffects, time: f32);
}

/// A recorded renderer call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Sprite {
        sprite: Sprite,
        position: Vec2,
        size: Vec2,
        rotation: f32,
        color: Vec3,
    },
    Particle {
        position: Vec2,
        color: Vec4,
    },
    Text {
        text: String,
        position: Vec2,
        scale: f32,
        color: Vec3,
    },
    PostProcess {
        effects: PostEffects,
        time: f32,
    },
}

/// Renderer that records every call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn sprites(&self) -> impl Iterator<Item = Sprite> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Sprite { sprite, .. } => Some(*sprite),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn particle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Particle { .. }))
            .count()
    }
}

impl Renderer for DrawList {
    fn draw_sprite(&mut self, sprite: Sprite, position: Vec2, size: Vec2, rotation: f32, color: Vec3) {
        self.commands.push(DrawCommand::Sprite {
            sprite,
            position,
            size,
            rotation,
            color,
        });
    }

    fn draw_particle(&mut self, position: Vec2, color: Vec4) {
        self.commands.push(DrawCommand::Particle { position, color });
    }

    fn draw_text(&mut self, text: &str, position: Vec2, scale: f32, color: Vec3) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            scale,
            color,
        });
    }

    fn post_process(&mut self, effects: PostEffects, time: f32) {
        self.commands.push(DrawCommand::PostProcess { effects, time });
    }
}
