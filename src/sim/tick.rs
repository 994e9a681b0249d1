//! Frame loop
//!
//! A frame is `process_input` → `tick` → `render`. The caller owns timing
//! and supplies `dt`.

use glam::{Vec2, Vec3};

use super::powerup::EffectTargets;
use super::resolve::resolve_collisions;
use super::state::{GameEvent, GameMode, GameState};
use crate::consts::*;
use crate::input::{Key, Keyboard};
use crate::render::{Renderer, Sprite};

/// Apply one frame of keyboard input. Starts the frame's event log.
pub fn process_input(state: &mut GameState, keys: &mut Keyboard, dt: f32) {
    state.begin_frame();
    if keys.take_press(Key::Escape) {
        state.quit_requested = true;
    }

    match state.mode {
        GameMode::Menu => {
            if keys.take_press(Key::Enter) {
                state.set_mode(GameMode::Active);
            }
            if keys.take_press(Key::W) {
                state.select_next_level();
            }
            if keys.take_press(Key::S) {
                state.select_prev_level();
            }
        }
        GameMode::Win => {
            if keys.take_press(Key::Enter) {
                state.world.effects.chaos = false;
                state.set_mode(GameMode::Menu);
            }
        }
        GameMode::Active => {
            let step = PLAYER_VELOCITY * dt;
            let world = &mut state.world;
            if keys.is_down(Key::A) && world.paddle.position.x >= 0.0 {
                world.paddle.position.x -= step;
                if world.ball.stuck {
                    world.ball.body.position.x -= step;
                }
            }
            if keys.is_down(Key::D) && world.paddle.position.x <= state.width - world.paddle.size.x {
                world.paddle.position.x += step;
                if world.ball.stuck {
                    world.ball.body.position.x += step;
                }
            }
            if keys.is_down(Key::Space) {
                world.ball.stuck = false;
            }
        }
    }
}

/// Advance the simulation by `dt` seconds.
///
/// Ball movement, collisions and win/loss checks only run while active;
/// particles, power-up timers and screen shake keep running in every mode.
/// Events are appended to the log opened by [`process_input`].
pub fn tick(state: &mut GameState, dt: f32) {
    state.time += dt;
    let active = state.mode == GameMode::Active;

    if active {
        state.world.ball.advance(dt, state.width);
        let bricks = &mut state.levels[state.level].bricks;
        resolve_collisions(
            &mut state.world,
            bricks,
            &mut state.rng,
            state.height,
            &mut state.events,
        );

        let ball = &state.world.ball;
        state.particles.spawn(
            &mut state.rng,
            PARTICLES_PER_FRAME,
            &ball.body,
            Vec2::splat(ball.radius / 2.0),
        );
    }
    state.particles.tick(dt);

    let world = &mut state.world;
    let mut targets = EffectTargets {
        ball: &mut world.ball,
        paddle: &mut world.paddle,
        effects: &mut world.effects,
    };
    for kind in world.power_ups.tick(dt, &mut targets) {
        state.events.push(GameEvent::PowerUpExpired(kind));
    }
    // Chaos stays on for the whole win screen
    if state.mode == GameMode::Win {
        world.effects.chaos = true;
    }
    world.tick_shake(dt);

    if !active {
        return;
    }

    if state.world.ball.body.position.y >= state.height {
        state.lives = state.lives.saturating_sub(1);
        log::info!("Ball lost, {} lives left", state.lives);
        state.events.push(GameEvent::LifeLost {
            remaining: state.lives,
        });
        if state.lives == 0 {
            state.reset_level();
            state.set_mode(GameMode::Menu);
        }
        state.reset_player();
    }

    if state.mode == GameMode::Active && state.current_level().is_completed() {
        log::info!("Level {} cleared", state.level + 1);
        state.reset_level();
        state.reset_player();
        state.world.effects.chaos = true;
        state.set_mode(GameMode::Win);
    }
}

/// Push the whole frame to the renderer
pub fn render<R: Renderer + ?Sized>(state: &GameState, renderer: &mut R) {
    let world = &state.world;
    renderer.draw_sprite(
        Sprite::Background,
        Vec2::ZERO,
        Vec2::new(state.width, state.height),
        0.0,
        WHITE,
    );
    state.current_level().draw(renderer);
    world.paddle.draw(renderer);
    world.power_ups.draw(renderer);
    state.particles.draw(renderer);
    world.ball.body.draw(renderer);
    renderer.post_process(world.effects, state.time);

    renderer.draw_text(&format!("Lives: {}", state.lives), Vec2::new(5.0, 5.0), 1.0, WHITE);

    let mid = state.height / 2.0;
    match state.mode {
        GameMode::Menu => {
            renderer.draw_text("Press ENTER to start", Vec2::new(250.0, mid), 1.0, WHITE);
            renderer.draw_text(
                "Press W or S to select level",
                Vec2::new(245.0, mid + 20.0),
                0.75,
                WHITE,
            );
        }
        GameMode::Win => {
            renderer.draw_text("You WON!!!", Vec2::new(320.0, mid - 20.0), 1.0, Vec3::new(0.0, 1.0, 0.0));
            renderer.draw_text(
                "Press ENTER to retry or ESC to quit",
                Vec2::new(130.0, mid),
                1.0,
                Vec3::new(1.0, 1.0, 0.0),
            );
        }
        GameMode::Active => {}
    }
}
