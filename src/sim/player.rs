//! The runner
//!
//! Physics are integrated once per frame (not a fixed timestep), so jump
//! height and fall speed scale with the achieved frame rate.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::spawn::ItemKind;
use crate::settings::Settings;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Vertical velocity in pixels/frame (negative is up)
    pub vy: f32,
    pub health: i32,
    /// Health granted when a level is cleared
    pub regen: i32,
    /// Collisions are ignored until this time (ms)
    pub invuln_until: u64,
}

impl Player {
    pub fn new(settings: &Settings) -> Self {
        Self {
            rect: Rect::from_pos_size(settings.player_start_pos, settings.player_size),
            vy: 0.0,
            health: settings.initial_health,
            regen: settings.health_regen,
            invuln_until: 0,
        }
    }

    /// Start a jump. Callers must check `is_grounded` first.
    pub fn jump(&mut self, settings: &Settings) {
        self.vy = settings.jump_strength;
    }

    /// Apply gravity and land on the floor
    pub fn update(&mut self, settings: &Settings) {
        self.vy += settings.gravity;
        // Truncates toward zero, so sub-pixel velocities don't move the box
        self.rect.y += self.vy as i32;
        if self.rect.bottom() > settings.screen_height {
            self.rect.set_bottom(settings.screen_height);
            self.vy = 0.0;
        }
    }

    /// Bottom edge at or below the floor
    pub fn is_grounded(&self, settings: &Settings) -> bool {
        self.rect.bottom() >= settings.screen_height
    }

    pub fn is_invuln(&self, now_ms: u64) -> bool {
        now_ms < self.invuln_until
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Lose health from an obstacle and start the invulnerability window
    pub fn take_hit(&mut self, now_ms: u64, settings: &Settings) {
        self.health -= settings.health_loss;
        self.invuln_until = now_ms.saturating_add(settings.invuln_time);
    }

    /// Eat an item
    pub fn consume(&mut self, kind: ItemKind) {
        match kind {
            ItemKind::Healthy => self.regen += 1,
            ItemKind::Unhealthy => self.regen = (self.regen - 1).max(0),
        }
    }

    /// Level-completion bonus
    pub fn apply_regen_bonus(&mut self) {
        self.health += self.regen;
    }
}
