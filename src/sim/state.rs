//! Game session state
//!
//! One [`GameState`] owns everything a running game needs. Collision and
//! power-up code receive explicit borrows of the pieces they touch.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{self, Ball, Entity};
use super::level::Level;
use super::particles::ParticlePool;
use super::powerup::{PowerUpKind, PowerUps};
use crate::consts::*;
use crate::error::Error;
use crate::render::PostEffects;
use crate::settings::Settings;

/// Top-level game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Level select, waiting for Enter
    Menu,
    /// Playing
    Active,
    /// Level cleared, waiting for Enter
    Win,
}

/// Something notable that happened during a frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BrickDestroyed { index: usize },
    SolidBrickHit { index: usize },
    /// One roll of every power-up kind at a destroyed brick
    PowerUpRoll { position: Vec2, spawned: usize },
    PaddleHit { percentage: f32 },
    PowerUpCollected(PowerUpKind),
    PowerUpExpired(PowerUpKind),
    LifeLost { remaining: u32 },
    LevelReset { level: usize },
    PlayerReset,
    ModeChanged { from: GameMode, to: GameMode },
}

/// The moving parts of the playfield
#[derive(Debug, Clone)]
pub struct World {
    pub paddle: Entity,
    pub ball: Ball,
    pub power_ups: PowerUps,
    /// Flags mirrored to the post-processing pass
    pub effects: PostEffects,
    /// Seconds of screen shake left
    pub shake_time: f32,
}

impl World {
    pub fn new(width: f32, height: f32) -> Self {
        let paddle = entity::paddle(width, height);
        let ball = Ball::on_paddle(&paddle);
        Self {
            paddle,
            ball,
            power_ups: PowerUps::new(),
            effects: PostEffects::default(),
            shake_time: 0.0,
        }
    }

    /// Count down the shake timer, clearing the flag when it runs out
    pub fn tick_shake(&mut self, dt: f32) {
        if self.shake_time > 0.0 {
            self.shake_time -= dt;
            if self.shake_time <= 0.0 {
                self.effects.shake = false;
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub mode: GameMode,
    /// Index into `levels`
    pub level: usize,
    pub lives: u32,
    pub levels: Vec<Level>,
    pub world: World,
    pub particles: ParticlePool,
    /// Playfield size
    pub width: f32,
    pub height: f32,
    /// Seconds of simulated time, fed to the post-processing pass
    pub time: f32,
    /// Escape was pressed
    pub quit_requested: bool,
    /// Events from the most recent frame
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Load every configured level from disk and start in the menu
    pub fn new(settings: &Settings) -> Result<Self, Error> {
        settings.validate()?;
        let (w, h) = (settings.width_f32(), settings.height_f32());
        let levels = settings
            .levels
            .iter()
            .map(|path| Level::load(path, w, h / 2.0))
            .collect();
        Self::with_levels(settings, levels)
    }

    /// Start a session from already built levels.
    ///
    /// Levels without a destructible brick could never be won and are
    /// dropped.
    pub fn with_levels(settings: &Settings, levels: Vec<Level>) -> Result<Self, Error> {
        settings.validate()?;
        let total = levels.len();
        let levels: Vec<Level> = levels
            .into_iter()
            .enumerate()
            .filter_map(|(i, level)| {
                if level.destructible_count() == 0 {
                    log::warn!("Skipping level {} with no destructible bricks", i + 1);
                    None
                } else {
                    Some(level)
                }
            })
            .collect();
        if levels.is_empty() {
            return Err(Error::NoPlayableLevels);
        }
        log::info!("Starting session with {}/{} levels", levels.len(), total);

        let (width, height) = (settings.width_f32(), settings.height_f32());
        Ok(Self {
            mode: GameMode::Menu,
            level: 0,
            lives: STARTING_LIVES,
            levels,
            world: World::new(width, height),
            particles: ParticlePool::new(settings.particle_capacity),
            width,
            height,
            time: 0.0,
            quit_requested: false,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(settings.seed),
        })
    }

    pub fn current_level(&self) -> &Level {
        &self.levels[self.level]
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn set_mode(&mut self, mode: GameMode) {
        if mode != self.mode {
            log::info!("Mode {:?} -> {:?}", self.mode, mode);
            self.events.push(GameEvent::ModeChanged {
                from: self.mode,
                to: mode,
            });
            self.mode = mode;
        }
    }

    /// Jump to a level, wrapping out-of-range indices
    pub fn select_level(&mut self, index: usize) {
        self.level = index % self.levels.len();
    }

    /// Cycle forward through levels
    pub fn select_next_level(&mut self) {
        self.level = (self.level + 1) % self.levels.len();
    }

    /// Cycle backward through levels
    pub fn select_prev_level(&mut self) {
        self.level = if self.level > 0 {
            self.level - 1
        } else {
            self.levels.len() - 1
        };
    }

    /// Rebuild the current level and restore lives
    pub fn reset_level(&mut self) {
        self.levels[self.level].reset();
        self.lives = STARTING_LIVES;
        self.events.push(GameEvent::LevelReset { level: self.level });
    }

    /// Paddle back to bottom center, ball stuck on it, all effects cleared.
    ///
    /// Falling and running power-ups are left alone.
    pub fn reset_player(&mut self) {
        let world = &mut self.world;
        world.paddle.size = PLAYER_SIZE;
        world.paddle.position = entity::paddle_start(self.width, self.height);
        world.paddle.color = WHITE;

        let rest = entity::rest_position(&world.paddle, world.ball.radius);
        world.ball.reset(rest, INITIAL_BALL_VELOCITY);
        world.ball.sticky = false;
        world.ball.pass_through = false;
        world.ball.body.color = WHITE;

        world.effects.chaos = false;
        world.effects.confuse = false;
        self.events.push(GameEvent::PlayerReset);
    }

    /// Start a new frame's event log
    pub fn begin_frame(&mut self) {
        self.events.clear();
    }

    /// Count of events of one shape in the last frame
    pub fn count_events(&self, pred: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        let levels = vec![
            Level::from_text("2 2\n1 3\n", 800.0, 300.0),
            Level::from_text("0 0\n", 800.0, 300.0),
            Level::from_text("4\n", 800.0, 300.0),
        ];
        GameState::with_levels(&Settings::default(), levels).unwrap()
    }

    #[test]
    fn test_new_session_starts_in_menu() {
        let state = state();
        assert_eq!(state.mode, GameMode::Menu);
        assert_eq!(state.lives, STARTING_LIVES);
        assert!(state.world.ball.stuck);
        assert_eq!(state.particles.capacity(), DEFAULT_PARTICLE_CAPACITY);
    }

    #[test]
    fn test_unwinnable_levels_are_dropped() {
        let state = state();
        assert_eq!(state.level_count(), 2);

        let empty = vec![Level::from_text("1 1\n", 800.0, 300.0)];
        assert!(matches!(
            GameState::with_levels(&Settings::default(), empty),
            Err(Error::NoPlayableLevels)
        ));
    }

    #[test]
    fn test_level_selection_wraps() {
        let mut state = state();
        state.select_prev_level();
        assert_eq!(state.level, 1);
        state.select_next_level();
        assert_eq!(state.level, 0);
        state.select_next_level();
        assert_eq!(state.level, 1);
        state.select_level(5);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_reset_player_is_idempotent() {
        let mut state = state();
        state.world.paddle.position.x = 10.0;
        state.world.paddle.size.x = 150.0;
        state.world.ball.stuck = false;
        state.world.ball.sticky = true;
        state.world.ball.body.velocity = Vec2::new(-40.0, 300.0);
        state.world.effects.confuse = true;

        state.reset_player();
        let first = (
            state.world.paddle.clone(),
            state.world.ball.clone(),
            state.world.effects,
        );
        state.reset_player();
        let second = (
            state.world.paddle.clone(),
            state.world.ball.clone(),
            state.world.effects,
        );

        assert_eq!(first, second);
        assert_eq!(first.0.position, Vec2::new(350.0, 580.0));
        assert_eq!(first.1.body.velocity, INITIAL_BALL_VELOCITY);
        assert!(first.1.stuck && !first.1.sticky);
        assert!(!first.2.confuse && !first.2.chaos);
    }

    #[test]
    fn test_reset_level_restores_bricks_and_lives() {
        let mut state = state();
        state.lives = 1;
        for brick in &mut state.levels[0].bricks {
            brick.destroyed = true;
        }
        state.reset_level();
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.current_level().remaining(), 3);
        assert_eq!(
            state.count_events(|e| matches!(e, GameEvent::LevelReset { level: 0 })),
            1
        );
    }

    #[test]
    fn test_shake_timer_clears_flag() {
        let mut world = World::new(800.0, 600.0);
        world.effects.shake = true;
        world.shake_time = SHAKE_DURATION;
        world.tick_shake(0.03);
        assert!(world.effects.shake);
        world.tick_shake(0.03);
        assert!(!world.effects.shake);
    }
}
