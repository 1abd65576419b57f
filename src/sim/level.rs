//! Per-frame level simulation
//!
//! A level runs until the player has covered its length (cleared) or health
//! drops to zero (failed). Each call to [`Level::step`] advances exactly one
//! frame.

use super::hints::{Control, ControlHints};
use super::player::Player;
use super::spawn::{Item, ItemKind, Obstacle, Spawner};
use crate::settings::Settings;

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Jump key went down this frame
    pub jump: bool,
    /// Left key is held
    pub left: bool,
    /// Right key is held
    pub right: bool,
}

/// State that survives from one level to the next
#[derive(Debug, Clone)]
pub struct RunState {
    pub player: Player,
    pub hints: ControlHints,
    pub spawner: Spawner,
}

impl RunState {
    pub fn new(settings: &Settings, seed: u64) -> Self {
        Self {
            player: Player::new(settings),
            hints: ControlHints::new(),
            spawner: Spawner::new(seed),
        }
    }
}

/// Difficulty for one level, scaled linearly by level index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelParams {
    /// 0-based level index
    pub index: u32,
    pub length: i32,
    /// Scroll speed (pixels/frame); also the progress gained per frame
    pub speed: i32,
    pub obstacle_rate: f64,
    pub item_rate: f64,
}

impl LevelParams {
    pub fn for_level(index: u32, settings: &Settings) -> Self {
        let i = index as i32;
        let f = index as f64;
        Self {
            index,
            length: settings
                .level_length
                .saturating_add(i.saturating_mul(settings.level_length_increase)),
            speed: settings
                .player_speed
                .saturating_add(i.saturating_mul(settings.speed_increase)),
            obstacle_rate: settings.obstacle_spawn_rate + f * settings.obstacle_rate_increase,
            item_rate: settings.item_spawn_rate + f * settings.item_rate_increase,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelStatus {
    Running,
    /// Level length covered; regen bonus applied
    Cleared,
    /// Health reached zero
    Failed,
}

/// Notable things that happened during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelEvent {
    Jumped,
    Hit { health: i32 },
    Ate(ItemKind),
    Cleared { bonus: i32 },
    Failed,
}

/// A level in progress
#[derive(Debug, Clone)]
pub struct Level {
    pub params: LevelParams,
    pub progress: i32,
    /// Frames simulated so far
    pub frames: u32,
    pub obstacles: Vec<Obstacle>,
    pub items: Vec<Item>,
    pub status: LevelStatus,
}

impl Level {
    pub fn new(index: u32, settings: &Settings) -> Self {
        let params = LevelParams::for_level(index, settings);
        log::info!(
            "Level {}: length={}, speed={}, obstacle_rate={:.3}, item_rate={:.3}",
            index + 1,
            params.length,
            params.speed,
            params.obstacle_rate,
            params.item_rate
        );
        Self {
            params,
            progress: 0,
            frames: 0,
            obstacles: Vec::new(),
            items: Vec::new(),
            status: LevelStatus::Running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == LevelStatus::Running
    }

    /// Advance the level by one frame
    ///
    /// Returns the events of this frame. Does nothing once the level has
    /// finished.
    pub fn step(
        &mut self,
        run: &mut RunState,
        input: &FrameInput,
        now_ms: u64,
        settings: &Settings,
    ) -> Vec<LevelEvent> {
        let mut events = Vec::new();
        if !self.is_running() {
            return events;
        }
        // A level entered with no health fails without simulating
        if !run.player.is_alive() {
            self.finish(run, &mut events);
            return events;
        }

        self.frames += 1;
        self.progress = self.progress.saturating_add(self.params.speed);

        let player = &mut run.player;
        let hints = &mut run.hints;

        if input.jump && player.is_grounded(settings) {
            player.jump(settings);
            hints.trigger(Control::Jump, now_ms);
            events.push(LevelEvent::Jumped);
        }

        let step = if player.is_grounded(settings) {
            settings.ground_control
        } else {
            settings.air_control
        };
        if input.left {
            player.rect.x -= step;
            hints.trigger(Control::Left, now_ms);
        }
        if input.right {
            player.rect.x += step;
            hints.trigger(Control::Right, now_ms);
        }

        hints.update(now_ms);

        if let Some(obstacle) = run.spawner.maybe_obstacle(self.params.obstacle_rate, settings) {
            self.obstacles.push(obstacle);
        }
        if let Some(item) = run.spawner.maybe_item(self.params.item_rate, settings) {
            self.items.push(item);
        }

        let speed = self.params.speed;
        for obstacle in &mut self.obstacles {
            obstacle.rect.shift(-speed, 0);
        }
        self.obstacles.retain(|o| o.rect.right() > 0);
        for item in &mut self.items {
            item.rect.shift(-speed, 0);
        }
        self.items.retain(|i| i.rect.right() > 0);

        player.update(settings);

        // One hit per frame no matter how many obstacles overlap
        if !player.is_invuln(now_ms)
            && self.obstacles.iter().any(|o| player.rect.intersects(&o.rect))
        {
            player.take_hit(now_ms, settings);
            log::debug!(
                "Hit at {}ms, health {} (invulnerable until {}ms)",
                now_ms,
                player.health,
                player.invuln_until
            );
            events.push(LevelEvent::Hit {
                health: player.health,
            });
        }

        self.items.retain(|item| {
            if player.rect.intersects(&item.rect) {
                player.consume(item.kind);
                events.push(LevelEvent::Ate(item.kind));
                false
            } else {
                true
            }
        });
        if events.iter().any(|e| matches!(e, LevelEvent::Ate(_))) {
            log::debug!("Regen now {}", player.regen);
        }

        if !player.is_alive() || self.progress >= self.params.length {
            self.finish(run, &mut events);
        }
        events
    }

    fn finish(&mut self, run: &mut RunState, events: &mut Vec<LevelEvent>) {
        let player = &mut run.player;
        if player.is_alive() {
            let bonus = player.regen;
            player.apply_regen_bonus();
            self.status = LevelStatus::Cleared;
            log::info!(
                "Level {} cleared after {} frames: +{} health, now {}",
                self.params.index + 1,
                self.frames,
                bonus,
                player.health
            );
            events.push(LevelEvent::Cleared { bonus });
        } else {
            self.status = LevelStatus::Failed;
            log::info!(
                "Level {} failed after {} frames",
                self.params.index + 1,
                self.frames
            );
            events.push(LevelEvent::Failed);
        }
    }
}
