//! Obstacle and item spawning
//!
//! One Bernoulli trial per entity type per frame, so the expected number of
//! spawns per second scales with the frame rate.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::settings::Settings;

/// Something to jump over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    pub rect: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Raises regen by one
    Healthy,
    /// Lowers regen by one (never below zero)
    Unhealthy,
}

/// Something to eat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub rect: Rect,
    pub kind: ItemKind,
}

/// Seeded entity spawner
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: Pcg32,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Roll for an obstacle this frame
    ///
    /// Obstacles are square: one side length drawn from the width range.
    pub fn maybe_obstacle(&mut self, rate: f64, settings: &Settings) -> Option<Obstacle> {
        if self.rng.random::<f64>() >= rate {
            return None;
        }
        let size = self
            .rng
            .random_range(settings.obstacle_min_size.x..=settings.obstacle_max_size.x);
        Some(Obstacle {
            rect: Rect::square_on_floor(settings.screen_width, settings.screen_height, size),
        })
    }

    /// Roll for an item this frame
    pub fn maybe_item(&mut self, rate: f64, settings: &Settings) -> Option<Item> {
        if self.rng.random::<f64>() >= rate {
            return None;
        }
        let kind = if self.rng.random::<f64>() < 0.5 {
            ItemKind::Healthy
        } else {
            ItemKind::Unhealthy
        };
        let size = self
            .rng
            .random_range(settings.item_min_size.x..=settings.item_max_size.x);
        let top = settings.screen_height - settings.item_spawn_max_height;
        let bottom = settings.screen_height - settings.item_spawn_min_height;
        let y = self.rng.random_range(top..=bottom);
        Some(Item {
            rect: Rect::new(settings.screen_width, y, size, size),
            kind,
        })
    }
}
