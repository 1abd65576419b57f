//! Headless backend and settings helpers shared by the integration tests

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::HashSet;

use broccoli_runner::backend::{Backend, InputEvent, Key, Sprite};
use broccoli_runner::flow::{Flow, Game};
use broccoli_runner::settings::{Color, Settings};
use broccoli_runner::sim::Rect;
use glam::Vec2;
use serde_json::{Value, json};

pub const BASE_SETTINGS: &str = r#"{
    "screen_width": 800,
    "screen_height": 600,
    "fps": 60,
    "player_start_pos": [100, 500],
    "player_size": [50, 50],
    "initial_health": 100,
    "health_regen": 5,
    "gravity": 1.0,
    "jump_strength": -20.0,
    "ground_control": 5,
    "air_control": 3,
    "level_length": 1000,
    "player_speed": 10,
    "speed_increase": 0,
    "obstacle_spawn_rate": 0.0,
    "obstacle_rate_increase": 0.0,
    "item_spawn_rate": 0.0,
    "item_rate_increase": 0.0,
    "health_loss": 20,
    "invuln_time": 1000,
    "num_levels": 3,
    "seed": 1234
}"#;

/// Base settings (no spawning) with some fields replaced
pub fn settings_with(overrides: Value) -> Settings {
    let mut base: Value = serde_json::from_str(BASE_SETTINGS).unwrap();
    let fields = base.as_object_mut().unwrap();
    for (key, value) in overrides.as_object().unwrap() {
        fields.insert(key.clone(), value.clone());
    }
    Settings::from_json(&base.to_string()).unwrap()
}

pub fn quiet_settings() -> Settings {
    settings_with(json!({}))
}

/// In-memory backend with a virtual clock
///
/// Records everything drawn during the most recent frame.
pub struct ScriptedBackend {
    pub now: u64,
    pub frame_ms: u64,
    /// Extra ms each further clock read within a frame returns, like a live clock
    pub clock_drift: u64,
    clock_reads: Cell<u64>,
    pub pending: Vec<InputEvent>,
    pub held: HashSet<Key>,
    pub sprites: HashSet<Sprite>,
    pub texts: Vec<String>,
    pub rects: Vec<(Rect, Color)>,
    pub sprite_draws: Vec<(Sprite, Rect)>,
    pub clears: Vec<Color>,
}

impl ScriptedBackend {
    pub fn new(frame_ms: u64) -> Self {
        Self {
            now: 0,
            frame_ms,
            clock_drift: 0,
            clock_reads: Cell::new(0),
            pending: Vec::new(),
            held: HashSet::new(),
            sprites: HashSet::new(),
            texts: Vec::new(),
            rects: Vec::new(),
            sprite_draws: Vec::new(),
            clears: Vec::new(),
        }
    }

    pub fn press(&mut self, key: Key) {
        self.pending.push(InputEvent::KeyDown(key));
    }

    pub fn shows(&self, text: &str) -> bool {
        self.texts.iter().any(|t| t == text)
    }

    /// Run one frame and advance the clock
    pub fn frame(&mut self, game: &mut Game) -> Flow {
        self.texts.clear();
        self.rects.clear();
        self.sprite_draws.clear();
        self.clears.clear();
        self.clock_reads.set(0);
        let flow = game.frame(self);
        self.now += self.frame_ms;
        flow
    }

    /// Run frames until `done` holds, panicking after `max_frames`
    pub fn run_until(
        &mut self,
        game: &mut Game,
        max_frames: usize,
        mut done: impl FnMut(&Game, &Self) -> bool,
    ) -> usize {
        for frame in 0..max_frames {
            assert_eq!(self.frame(game), Flow::Continue);
            if done(&*game, &*self) {
                return frame + 1;
            }
        }
        panic!("condition not reached in {} frames", max_frames);
    }
}

impl Backend for ScriptedBackend {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.pending)
    }

    fn key_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    fn now_ms(&self) -> u64 {
        let reads = self.clock_reads.get();
        self.clock_reads.set(reads + 1);
        self.now + reads * self.clock_drift
    }

    fn has_sprite(&self, sprite: Sprite) -> bool {
        self.sprites.contains(&sprite)
    }

    fn clear(&mut self, color: Color) {
        self.clears.push(color);
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.rects.push((rect, color));
    }

    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect) {
        if self.sprites.contains(&sprite) {
            self.sprite_draws.push((sprite, rect));
        }
    }

    fn draw_text(&mut self, text: &str, _pos: Vec2, _scale: f32, _color: Color) {
        self.texts.push(text.to_string());
    }

    fn measure_text(&self, text: &str, scale: f32) -> Vec2 {
        Vec2::new(text.len() as f32 * scale * 0.5, scale)
    }
}
