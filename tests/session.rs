//! Full sessions over the shipped level files

use breakout::Settings;
use breakout::input::{Key, Keyboard};
use breakout::render::DrawList;
use breakout::sim::{GameEvent, GameMode, GameState, process_input, render, tick};

const DT: f32 = 1.0 / 60.0;

/// Start the level and keep the paddle under the ball
fn drive(state: &GameState, keys: &mut Keyboard, frame: u32) {
    if frame % 2 == 0 {
        keys.release_all();
        return;
    }
    match state.mode {
        GameMode::Menu | GameMode::Win => keys.press(Key::Enter),
        GameMode::Active => {
            let ball = state.world.ball.center().x;
            let paddle = state.world.paddle.center().x;
            keys.set(Key::A, ball < paddle - 10.0);
            keys.set(Key::D, ball > paddle + 10.0);
            keys.set(Key::Space, state.world.ball.stuck);
        }
    }
}

fn play(seed: u64, frames: u32) -> (GameState, Vec<GameEvent>) {
    let settings = Settings {
        seed,
        ..Default::default()
    };
    let mut state = GameState::new(&settings).expect("shipped levels load");
    let mut keys = Keyboard::new();
    let mut list = DrawList::new();
    let mut events = Vec::new();
    for frame in 0..frames {
        drive(&state, &mut keys, frame);
        process_input(&mut state, &mut keys, DT);
        tick(&mut state, DT);
        list.clear();
        render(&state, &mut list);
        events.extend(state.events.iter().copied());
    }
    (state, events)
}

#[test]
fn test_shipped_levels_load() {
    let state = GameState::new(&Settings::default()).unwrap();
    assert_eq!(state.level_count(), 4);
    for level in &state.levels {
        assert!(level.destructible_count() > 0);
        assert!(!level.is_completed());
        // Bricks fill the top half of the playfield
        assert!(level.bricks.iter().all(|b| b.position.y + b.size.y <= 300.0 + 1e-3));
    }
}

#[test]
fn test_autopilot_session_makes_progress() {
    let (state, events) = play(7, 1_800);
    assert!(
        events
            .iter()
            .any(|e| matches!(e, GameEvent::ModeChanged { to: GameMode::Active, .. }))
    );
    assert!(events.iter().any(|e| matches!(e, GameEvent::PaddleHit { .. })));
    assert!(events.iter().any(|e| matches!(e, GameEvent::BrickDestroyed { .. })));
    assert!(state.particles.alive_count() <= state.particles.capacity());
}

#[test]
fn test_same_seed_same_session() {
    let (a, events_a) = play(99_999, 600);
    let (b, events_b) = play(99_999, 600);
    assert_eq!(events_a, events_b);
    assert_eq!(a.world.ball, b.world.ball);
    assert_eq!(a.world.paddle, b.world.paddle);
    assert_eq!(a.lives, b.lives);
}
