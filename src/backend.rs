//! Rendering/input backend abstraction
//!
//! The game only talks to the window through this trait, so the flow and
//! simulation can be driven headless in tests.

use glam::Vec2;

use crate::settings::Color;
use crate::sim::Rect;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Jump,
    Left,
    Right,
}

/// Discrete input events, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
}

/// Optional sprite slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Player,
    Obstacle,
    Healthy,
    Unhealthy,
    Background,
}

pub trait Backend {
    /// Events since the previous call
    fn poll_events(&mut self) -> Vec<InputEvent>;

    fn key_held(&self, key: Key) -> bool;

    /// Monotonic milliseconds
    fn now_ms(&self) -> u64;

    /// Whether a sprite was loaded for this slot
    fn has_sprite(&self, sprite: Sprite) -> bool;

    fn clear(&mut self, color: Color);

    fn draw_rect(&mut self, rect: Rect, color: Color);

    /// Draw a sprite scaled to `rect`. No-op when the sprite is missing.
    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect);

    /// Draw text with its top-left corner at `pos`
    fn draw_text(&mut self, text: &str, pos: Vec2, scale: f32, color: Color);

    /// Width and height of rendered text
    fn measure_text(&self, text: &str, scale: f32) -> Vec2;
}
