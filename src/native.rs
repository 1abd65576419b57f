//! macroquad backend
//!
//! Window, keyboard, textures and text come from macroquad. Sprite paths
//! that fail to load are logged and drawn as solid rectangles instead.

use std::collections::HashMap;

use macroquad::prelude as mq;

use crate::backend::{Backend, InputEvent, Key, Sprite};
use crate::settings::{Color, Settings};
use crate::sim::Rect;

fn to_mq_color(color: Color) -> mq::Color {
    mq::Color::from_rgba(color.0, color.1, color.2, 255)
}

fn key_code(key: Key) -> mq::KeyCode {
    match key {
        Key::Jump => mq::KeyCode::Space,
        Key::Left => mq::KeyCode::Left,
        Key::Right => mq::KeyCode::Right,
    }
}

fn from_key_code(code: mq::KeyCode) -> Option<Key> {
    match code {
        mq::KeyCode::Space => Some(Key::Jump),
        mq::KeyCode::Left => Some(Key::Left),
        mq::KeyCode::Right => Some(Key::Right),
        _ => None,
    }
}

pub struct MacroquadBackend {
    sprites: HashMap<Sprite, mq::Texture2D>,
}

impl MacroquadBackend {
    /// Take over window close handling and load the configured sprites
    pub async fn load(settings: &Settings) -> Self {
        mq::prevent_quit();

        let slots = [
            (Sprite::Player, &settings.player_sprite),
            (Sprite::Obstacle, &settings.obstacle_sprite),
            (Sprite::Healthy, &settings.healthy_sprite),
            (Sprite::Unhealthy, &settings.unhealthy_sprite),
            (Sprite::Background, &settings.background_sprite),
        ];
        let mut sprites = HashMap::new();
        for (sprite, path) in slots {
            let Some(path) = path.as_deref().filter(|p| !p.is_empty()) else {
                continue;
            };
            match mq::load_texture(path).await {
                Ok(texture) => {
                    texture.set_filter(mq::FilterMode::Nearest);
                    log::info!("Loaded {:?} sprite from {}", sprite, path);
                    sprites.insert(sprite, texture);
                }
                Err(e) => {
                    log::warn!("Failed to load {:?} sprite from {}: {}", sprite, path, e);
                }
            }
        }

        Self { sprites }
    }
}

impl Backend for MacroquadBackend {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events: Vec<InputEvent> = mq::get_keys_pressed()
            .into_iter()
            .filter_map(from_key_code)
            .map(InputEvent::KeyDown)
            .collect();
        if mq::is_quit_requested() {
            events.push(InputEvent::Quit);
        }
        events
    }

    fn key_held(&self, key: Key) -> bool {
        mq::is_key_down(key_code(key))
    }

    fn now_ms(&self) -> u64 {
        (mq::get_time() * 1000.0) as u64
    }

    fn has_sprite(&self, sprite: Sprite) -> bool {
        self.sprites.contains_key(&sprite)
    }

    fn clear(&mut self, color: Color) {
        mq::clear_background(to_mq_color(color));
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        mq::draw_rectangle(
            rect.x as f32,
            rect.y as f32,
            rect.w as f32,
            rect.h as f32,
            to_mq_color(color),
        );
    }

    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect) {
        if let Some(texture) = self.sprites.get(&sprite) {
            mq::draw_texture_ex(
                texture,
                rect.x as f32,
                rect.y as f32,
                mq::WHITE,
                mq::DrawTextureParams {
                    dest_size: Some(mq::vec2(rect.w as f32, rect.h as f32)),
                    ..Default::default()
                },
            );
        }
    }

    fn draw_text(&mut self, text: &str, pos: glam::Vec2, scale: f32, color: Color) {
        // macroquad positions text by its baseline
        let dims = mq::measure_text(text, None, scale as u16, 1.0);
        mq::draw_text(text, pos.x, pos.y + dims.offset_y, scale, to_mq_color(color));
    }

    fn measure_text(&self, text: &str, scale: f32) -> glam::Vec2 {
        let dims = mq::measure_text(text, None, scale as u16, 1.0);
        glam::Vec2::new(dims.width, dims.height)
    }
}

/// Caps the frame rate at the configured fps
///
/// Sleeps for the bulk of the remaining frame time, then spins for the last
/// couple of milliseconds.
pub struct FrameLimiter {
    target_frame_time: f64,
    frame_start: f64,
}

impl FrameLimiter {
    const SPIN_MARGIN: f64 = 0.002;

    pub fn new(settings: &Settings) -> Self {
        Self {
            target_frame_time: settings.frame_time(),
            frame_start: mq::get_time(),
        }
    }

    pub fn begin_frame(&mut self) {
        self.frame_start = mq::get_time();
    }

    /// Block until the frame's time slice is used up
    pub fn wait(&self) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            while mq::get_time() - self.frame_start + Self::SPIN_MARGIN < self.target_frame_time {
                std::thread::sleep(std::time::Duration::from_millis(1));
            }
        }
        while mq::get_time() - self.frame_start < self.target_frame_time {
            std::hint::spin_loop();
        }
    }
}
