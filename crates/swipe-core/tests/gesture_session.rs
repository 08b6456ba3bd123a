use std::time::{Duration, Instant};

use swipe_core::{GameState, RasterCanvas, SeededRandom, SwipeConfig, SwipeGame};
use swipe_platform::{MutedCues, PointerEvent};

fn session() -> SwipeGame<SeededRandom> {
    let config = SwipeConfig::default();
    let mut game = SwipeGame::new(&config, SeededRandom::new(11), Box::new(MutedCues));
    game.start();
    game
}

#[test]
fn swipe_draws_then_fades_out() {
    let mut game = session();
    let mut canvas = RasterCanvas::new(200, 120, 1.0);
    let start = Instant::now();

    game.handle(PointerEvent::Down { x: 20.0, y: 60.0 }, start);
    for step in 1..=16 {
        let x = 20.0 + step as f32 * 10.0;
        game.handle(PointerEvent::Move { x, y: 60.0 }, start);
    }
    game.handle(PointerEvent::Up, start);

    assert_eq!(game.particles().len(), 16 * 2);
    assert_eq!(game.trails().len(), 1);
    assert_eq!(game.trails()[0].points().len(), 17);

    assert!(game.frame(start, &mut canvas));
    let lit = canvas
        .as_bytes()
        .chunks_exact(4)
        .filter(|px| px[0] > 0 || px[1] > 0 || px[2] > 0)
        .count();
    assert!(lit > 50, "only {lit} pixels lit");

    // Slowest decay is 0.02, so every particle is gone within 50 frames.
    let mut now = start;
    for _ in 0..50 {
        now += Duration::from_millis(16);
        game.frame(now, &mut canvas);
    }
    assert!(game.particles().is_empty());
    assert_eq!(game.trails().len(), 1);

    game.frame(start + Duration::from_secs(5), &mut canvas);
    assert!(game.trails().is_empty());
}

#[test]
fn returning_home_freezes_the_session() {
    let mut game = session();
    let mut canvas = RasterCanvas::new(64, 64, 1.0);
    let now = Instant::now();

    game.handle(PointerEvent::Down { x: 0.0, y: 0.0 }, now);
    game.handle(PointerEvent::Move { x: 60.0, y: 60.0 }, now);
    assert!(!game.particles().is_empty());

    game.go_home();
    assert_eq!(game.state(), GameState::Home);
    assert!(game.particles().is_empty());
    assert!(!game.frame(now, &mut canvas));
    assert!(canvas.as_bytes().iter().all(|&b| b == 0));

    game.handle(PointerEvent::Move { x: 10.0, y: 10.0 }, now);
    assert!(game.particles().is_empty());

    game.start();
    assert_eq!(game.state(), GameState::Playing);
    assert!(game.trails().is_empty());
}

#[test]
fn seeded_sessions_replay_identically() {
    let run = || {
        let mut game = session();
        let now = Instant::now();
        game.handle(PointerEvent::Down { x: 5.0, y: 5.0 }, now);
        game.handle(PointerEvent::Move { x: 45.0, y: 25.0 }, now);
        game.particles().to_vec()
    };
    assert_eq!(run(), run());
}
