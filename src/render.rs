//! Screen drawing
//!
//! Sprites are used when loaded; otherwise entities are drawn as solid
//! rectangles in their configured colors.

use glam::Vec2;

use crate::backend::{Backend, Sprite};
use crate::flow::Phase;
use crate::settings::{Color, Settings, TextLayout};
use crate::sim::{Control, ControlHints, ItemKind, Level, Player, Rect, RunState};

/// Player sprite toggles every this many ms while invulnerable
pub const BLINK_PERIOD_MS: u64 = 200;

const HUD_POS: Vec2 = Vec2::new(10.0, 10.0);
const HUD_SCALE: f32 = 24.0;

pub const TITLE: &str = "Broccoli Runner!";
pub const START_PROMPT: &str = "Press spacebar to start";
pub const WIN_MESSAGE: &str = "You Win!";
pub const LOSE_MESSAGE: &str = "Game Over";

/// Hint labels (start screen, in-level)
fn hint_label(control: Control, in_level: bool) -> &'static str {
    match (control, in_level) {
        (Control::Jump, _) => "Jump: Spacebar",
        (Control::Left, false) => "Move Left: Left Arrow",
        (Control::Right, false) => "Move Right: Right Arrow",
        (Control::Left, true) => "Left: Arrow",
        (Control::Right, true) => "Right: Arrow",
    }
}

/// Draw the whole frame for the current phase at frame time `now_ms`
pub fn draw(
    backend: &mut impl Backend,
    phase: &Phase,
    run: &RunState,
    now_ms: u64,
    settings: &Settings,
) {
    draw_background(backend, settings);
    match phase {
        Phase::Start => draw_start(backend, &run.hints, settings),
        Phase::Countdown { level, .. } => {
            let remaining = phase.countdown_remaining(now_ms).unwrap_or(0);
            draw_countdown(backend, *level, remaining, run.player.health, settings);
        }
        Phase::Playing(level) => draw_level(backend, level, run, now_ms, settings),
        Phase::Finished { won } => {
            let msg = if *won { WIN_MESSAGE } else { LOSE_MESSAGE };
            draw_text_at(backend, &settings.text.end_message, msg, Color::WHITE);
        }
    }
}

fn draw_background(backend: &mut impl Backend, settings: &Settings) {
    if backend.has_sprite(Sprite::Background) {
        let screen = Rect::new(0, 0, settings.screen_width, settings.screen_height);
        backend.draw_sprite(Sprite::Background, screen);
    } else {
        backend.clear(settings.bg_color);
    }
}

fn draw_entity(backend: &mut impl Backend, sprite: Sprite, rect: Rect, fallback: Color) {
    if backend.has_sprite(sprite) {
        backend.draw_sprite(sprite, rect);
    } else {
        backend.draw_rect(rect, fallback);
    }
}

/// Draw text using a configured layout, centering on `pos` if requested
pub fn draw_text_at(backend: &mut impl Backend, layout: &TextLayout, text: &str, color: Color) {
    let mut pos = Vec2::from(layout.pos);
    if layout.center {
        pos -= backend.measure_text(text, layout.scale) / 2.0;
    }
    backend.draw_text(text, pos, layout.scale, color);
}

fn draw_hints(backend: &mut impl Backend, hints: &ControlHints, settings: &Settings, in_level: bool) {
    for control in Control::ALL {
        if !hints.is_visible(control) {
            continue;
        }
        let layout = match control {
            Control::Jump => &settings.text.control_jump,
            Control::Left => &settings.text.control_left,
            Control::Right => &settings.text.control_right,
        };
        draw_text_at(backend, layout, hint_label(control, in_level), Color::WHITE);
    }
}

fn draw_start(backend: &mut impl Backend, hints: &ControlHints, settings: &Settings) {
    draw_text_at(backend, &settings.text.start_title, TITLE, Color::WHITE);
    draw_text_at(backend, &settings.text.start_prompt, START_PROMPT, Color::WHITE);
    draw_hints(backend, hints, settings, false);
}

fn draw_countdown(
    backend: &mut impl Backend,
    level: u32,
    remaining: u32,
    health: i32,
    settings: &Settings,
) {
    let text = &settings.text;
    draw_text_at(backend, &text.level_title, &format!("Level {}", level + 1), Color::WHITE);
    draw_text_at(
        backend,
        &text.level_countdown,
        &format!("Starting in {} seconds", remaining),
        Color::WHITE,
    );
    draw_text_at(backend, &text.level_health, &format!("Health: {}", health), Color::WHITE);
}

/// Player is hidden on alternate blink phases while invulnerable
pub fn player_visible(player: &Player, now_ms: u64) -> bool {
    !(player.is_invuln(now_ms) && (now_ms / BLINK_PERIOD_MS) % 2 == 0)
}

fn draw_level(
    backend: &mut impl Backend,
    level: &Level,
    run: &RunState,
    now_ms: u64,
    settings: &Settings,
) {
    for obstacle in &level.obstacles {
        draw_entity(backend, Sprite::Obstacle, obstacle.rect, settings.obstacle_color);
    }
    for item in &level.items {
        let (sprite, color) = match item.kind {
            ItemKind::Healthy => (Sprite::Healthy, settings.healthy_color),
            ItemKind::Unhealthy => (Sprite::Unhealthy, settings.unhealthy_color),
        };
        draw_entity(backend, sprite, item.rect, color);
    }

    let player = &run.player;
    if player_visible(player, now_ms) {
        draw_entity(backend, Sprite::Player, player.rect, settings.player_color);
    }

    let hud = format!(
        "Lvl {}  Health: {}  Regen: {}",
        level.params.index + 1,
        player.health,
        player.regen
    );
    backend.draw_text(&hud, HUD_POS, HUD_SCALE, Color::WHITE);

    draw_hints(backend, &run.hints, settings, true);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::tests::sample;

    #[test]
    fn test_player_blinks_only_while_invulnerable() {
        let settings = sample();
        let mut player = Player::new(&settings);
        assert!(player_visible(&player, 0));
        assert!(player_visible(&player, 150));

        player.take_hit(1_000, &settings);
        // 1000/200 = 5 (odd) -> shown, 1200/200 = 6 (even) -> hidden
        assert!(player_visible(&player, 1_000));
        assert!(!player_visible(&player, 1_200));
        assert!(player_visible(&player, 1_400));
        // Window over
        assert!(player_visible(&player, 2_000));
    }

    #[test]
    fn test_hint_labels_differ_by_screen() {
        assert_eq!(hint_label(Control::Left, false), "Move Left: Left Arrow");
        assert_eq!(hint_label(Control::Left, true), "Left: Arrow");
        assert_eq!(hint_label(Control::Jump, true), hint_label(Control::Jump, false));
    }
}
