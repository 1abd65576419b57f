mod common;

use broccoli_runner::backend::{InputEvent, Key, Sprite};
use broccoli_runner::flow::{Flow, Game, Phase};
use broccoli_runner::render::{LOSE_MESSAGE, START_PROMPT, TITLE, WIN_MESSAGE};
use common::{ScriptedBackend, quiet_settings, settings_with};
use serde_json::json;

fn is_playing(game: &Game) -> bool {
    matches!(game.phase(), Phase::Playing(_))
}

fn is_finished(game: &Game) -> bool {
    matches!(game.phase(), Phase::Finished { .. })
}

/// Press jump on the start screen and wait out the first countdown
fn start_first_level(game: &mut Game, backend: &mut ScriptedBackend) {
    backend.press(Key::Jump);
    backend.frame(game);
    backend.run_until(game, 1000, |g, _| is_playing(g));
}

#[test]
fn test_start_screen_waits_for_jump() {
    let mut game = Game::new(quiet_settings(), 1);
    let mut backend = ScriptedBackend::new(16);

    for _ in 0..50 {
        backend.frame(&mut game);
        assert!(matches!(game.phase(), Phase::Start));
    }
    assert!(backend.shows(TITLE));
    assert!(backend.shows(START_PROMPT));
    assert!(backend.shows("Jump: Spacebar"));
    assert!(backend.shows("Move Left: Left Arrow"));
    assert!(backend.shows("Move Right: Right Arrow"));

    // Held keys don't start the game, only a jump press does
    backend.held.insert(Key::Left);
    backend.press(Key::Right);
    backend.frame(&mut game);
    assert!(matches!(game.phase(), Phase::Start));

    backend.press(Key::Jump);
    backend.frame(&mut game);
    assert!(matches!(game.phase(), Phase::Countdown { level: 0, .. }));
    assert!(backend.shows("Level 1"));
    assert!(backend.shows("Starting in 3 seconds"));
    assert!(backend.shows("Health: 100"));
}

#[test]
fn test_countdown_lasts_three_seconds() {
    let mut game = Game::new(quiet_settings(), 1);
    let mut backend = ScriptedBackend::new(100);

    backend.press(Key::Jump);
    backend.frame(&mut game);
    let started = backend.now - backend.frame_ms;

    let mut seen = Vec::new();
    while !is_playing(&game) {
        backend.frame(&mut game);
        for n in 1..=3 {
            let text = format!("Starting in {} seconds", n);
            if backend.shows(&text) && !seen.contains(&n) {
                seen.push(n);
            }
        }
    }
    // Switched on the first frame at or past 3000ms
    assert_eq!(backend.now - backend.frame_ms - started, 3000);
    assert_eq!(seen, vec![3, 2, 1]);
}

#[test]
fn test_countdown_text_matches_frame_time_on_live_clock() {
    let mut game = Game::new(quiet_settings(), 1);
    let mut backend = ScriptedBackend::new(16);
    backend.clock_drift = 1;

    backend.press(Key::Jump);
    backend.frame(&mut game);

    // One ms short of the hand-off; a second clock read would see 3000
    backend.now = 2999;
    backend.frame(&mut game);
    assert!(matches!(game.phase(), Phase::Countdown { level: 0, .. }));
    assert!(backend.shows("Starting in 1 seconds"));
    assert!(!backend.shows("Starting in 0 seconds"));

    backend.now = 3000;
    backend.frame(&mut game);
    assert!(is_playing(&game));
}

#[test]
fn test_clearing_every_level_wins() {
    let settings = settings_with(json!({
        "num_levels": 2,
        "initial_health": 40,
        "health_regen": 0
    }));
    let mut game = Game::new(settings, 1);
    let mut backend = ScriptedBackend::new(16);

    start_first_level(&mut game, &mut backend);
    let mut saw_level_two = false;
    backend.run_until(&mut game, 5000, |g, b| {
        saw_level_two |= b.shows("Level 2");
        is_finished(g)
    });

    assert!(saw_level_two);
    assert!(matches!(game.phase(), Phase::Finished { won: true }));
    assert_eq!(game.run().player.health, 40);
    assert!(backend.shows(WIN_MESSAGE));

    // The end screen stays up until quit
    for _ in 0..100 {
        assert_eq!(backend.frame(&mut game), Flow::Continue);
        assert!(backend.shows(WIN_MESSAGE));
    }
}

#[test]
fn test_regen_bonus_between_levels() {
    let settings = settings_with(json!({ "num_levels": 2 }));
    let mut game = Game::new(settings, 1);
    let mut backend = ScriptedBackend::new(16);

    start_first_level(&mut game, &mut backend);
    backend.run_until(&mut game, 500, |g, _| {
        matches!(g.phase(), Phase::Countdown { level: 1, .. })
    });
    assert_eq!(game.run().player.health, 105);
    assert!(backend.shows("Health: 105"));
}

#[test]
fn test_death_mid_level_is_game_over() {
    let settings = settings_with(json!({
        "num_levels": 3,
        "obstacle_spawn_rate": 1.0,
        "health_loss": 100
    }));
    let mut game = Game::new(settings, 1);
    let mut backend = ScriptedBackend::new(16);

    start_first_level(&mut game, &mut backend);
    let mut saw_level_two = false;
    backend.run_until(&mut game, 500, |g, b| {
        saw_level_two |= b.shows("Level 2");
        is_finished(g)
    });

    assert!(!saw_level_two);
    assert!(matches!(game.phase(), Phase::Finished { won: false }));
    assert_eq!(game.run().player.health, 0);
    assert!(backend.shows(LOSE_MESSAGE));
    assert!(!backend.shows(WIN_MESSAGE));
}

#[test]
fn test_zero_levels_goes_straight_to_end() {
    let settings = settings_with(json!({ "num_levels": 0 }));
    let mut game = Game::new(settings, 1);
    let mut backend = ScriptedBackend::new(16);

    backend.press(Key::Jump);
    backend.frame(&mut game);
    assert!(matches!(game.phase(), Phase::Finished { won: true }));
    assert!(backend.shows(WIN_MESSAGE));
}

#[test]
fn test_quit_from_any_phase() {
    let mut game = Game::new(quiet_settings(), 1);
    let mut backend = ScriptedBackend::new(16);
    backend.pending.push(InputEvent::Quit);
    assert_eq!(backend.frame(&mut game), Flow::Quit);

    let mut game = Game::new(quiet_settings(), 1);
    let mut backend = ScriptedBackend::new(16);
    start_first_level(&mut game, &mut backend);
    backend.pending.push(InputEvent::Quit);
    backend.press(Key::Jump);
    assert_eq!(backend.frame(&mut game), Flow::Quit);
}

#[test]
fn test_hud_and_hints_in_level() {
    let settings = settings_with(json!({ "level_length": 100000 }));
    let mut game = Game::new(settings, 1);
    let mut backend = ScriptedBackend::new(16);

    start_first_level(&mut game, &mut backend);
    backend.frame(&mut game);
    assert!(backend.shows("Lvl 1  Health: 100  Regen: 5"));
    assert!(backend.shows("Jump: Spacebar"));
    assert!(backend.shows("Left: Arrow"));
    assert!(backend.shows("Right: Arrow"));

    backend.held.insert(Key::Left);
    backend.frame(&mut game);
    let triggered = backend.now - backend.frame_ms;
    backend.held.clear();

    backend.run_until(&mut game, 1000, |_, b| !b.shows("Left: Arrow"));
    let hidden_at = backend.now - backend.frame_ms;
    assert!(hidden_at > triggered + 3000);
    assert!(hidden_at <= triggered + 3000 + backend.frame_ms);
    assert!(backend.shows("Right: Arrow"));
    assert!(backend.shows("Jump: Spacebar"));

    // Gone for good
    for _ in 0..50 {
        backend.frame(&mut game);
        assert!(!backend.shows("Left: Arrow"));
    }
}

#[test]
fn test_missing_sprites_fall_back_to_rects() {
    let settings = quiet_settings();
    let player_color = settings.player_color;
    let bg_color = settings.bg_color;
    let mut game = Game::new(settings, 1);
    let mut backend = ScriptedBackend::new(16);

    start_first_level(&mut game, &mut backend);
    backend.frame(&mut game);
    assert_eq!(backend.clears, vec![bg_color]);
    assert!(backend.rects.iter().any(|(_, c)| *c == player_color));
    assert!(backend.sprite_draws.is_empty());

    backend.sprites.insert(Sprite::Player);
    backend.sprites.insert(Sprite::Background);
    backend.frame(&mut game);
    assert!(backend.clears.is_empty());
    assert!(!backend.rects.iter().any(|(_, c)| *c == player_color));
    let drawn: Vec<Sprite> = backend.sprite_draws.iter().map(|(s, _)| *s).collect();
    assert_eq!(drawn, vec![Sprite::Background, Sprite::Player]);
}
