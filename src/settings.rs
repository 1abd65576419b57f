//! Game settings
//!
//! Loaded once from `settings.json` at startup and never mutated afterwards.
//! Required fields have no defaults: a missing one is a fatal startup error.

use std::fmt;
use std::path::Path;

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Default settings file, relative to the working directory
pub const SETTINGS_PATH: &str = "settings.json";

/// RGB color as it appears in the settings file (`[r, g, b]`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const WHITE: Color = Color(255, 255, 255);
}

/// Placement of one piece of screen text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextLayout {
    /// Font size in pixels
    pub scale: f32,
    /// Top-left corner, or the center when `center` is set
    pub pos: [f32; 2],
    #[serde(default)]
    pub center: bool,
}

impl TextLayout {
    const fn at(x: f32, y: f32, scale: f32) -> Self {
        Self {
            scale,
            pos: [x, y],
            center: false,
        }
    }

    const fn centered(x: f32, y: f32, scale: f32) -> Self {
        Self {
            scale,
            pos: [x, y],
            center: true,
        }
    }
}

/// Layout for every text key the screens draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextLayouts {
    pub start_title: TextLayout,
    pub start_prompt: TextLayout,
    pub control_jump: TextLayout,
    pub control_left: TextLayout,
    pub control_right: TextLayout,
    pub level_title: TextLayout,
    pub level_countdown: TextLayout,
    pub level_health: TextLayout,
    pub end_message: TextLayout,
}

impl Default for TextLayouts {
    fn default() -> Self {
        Self {
            start_title: TextLayout::centered(400.0, 200.0, 72.0),
            start_prompt: TextLayout::centered(400.0, 300.0, 36.0),
            control_jump: TextLayout::at(10.0, 40.0, 24.0),
            control_left: TextLayout::at(10.0, 64.0, 24.0),
            control_right: TextLayout::at(10.0, 88.0, 24.0),
            level_title: TextLayout::centered(400.0, 200.0, 64.0),
            level_countdown: TextLayout::centered(400.0, 280.0, 36.0),
            level_health: TextLayout::centered(400.0, 330.0, 36.0),
            end_message: TextLayout::centered(400.0, 300.0, 72.0),
        }
    }
}

/// Static game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // === Screen ===
    pub screen_width: i32,
    pub screen_height: i32,
    pub fps: u32,

    // === Player ===
    pub player_start_pos: IVec2,
    pub player_size: IVec2,
    pub initial_health: i32,
    /// Starting regen (health bonus granted per cleared level)
    pub health_regen: i32,
    /// Added to vertical velocity every frame (pixels/frame²)
    pub gravity: f32,
    /// Vertical velocity set by a jump, negative is up
    pub jump_strength: f32,
    /// Horizontal step per frame while grounded
    pub ground_control: i32,
    /// Horizontal step per frame while airborne
    pub air_control: i32,

    // === Levels ===
    pub level_length: i32,
    #[serde(default)]
    pub level_length_increase: i32,
    pub player_speed: i32,
    pub speed_increase: i32,
    pub num_levels: u32,

    // === Spawning (probability per frame) ===
    pub obstacle_spawn_rate: f64,
    pub obstacle_rate_increase: f64,
    pub item_spawn_rate: f64,
    pub item_rate_increase: f64,
    #[serde(default = "default_obstacle_min_size")]
    pub obstacle_min_size: IVec2,
    #[serde(default = "default_obstacle_max_size")]
    pub obstacle_max_size: IVec2,
    #[serde(default = "default_item_min_size")]
    pub item_min_size: IVec2,
    #[serde(default = "default_item_max_size")]
    pub item_max_size: IVec2,
    /// Lowest item top edge, measured up from the floor
    #[serde(default = "default_item_spawn_min_height")]
    pub item_spawn_min_height: i32,
    /// Highest item top edge, measured up from the floor
    #[serde(default = "default_item_spawn_max_height")]
    pub item_spawn_max_height: i32,

    // === Health ===
    pub health_loss: i32,
    /// Invulnerability after a hit (ms)
    pub invuln_time: u64,

    // === Presentation ===
    #[serde(default = "default_bg_color")]
    pub bg_color: Color,
    #[serde(default = "default_player_color")]
    pub player_color: Color,
    #[serde(default = "default_obstacle_color")]
    pub obstacle_color: Color,
    #[serde(default = "default_healthy_color")]
    pub healthy_color: Color,
    #[serde(default = "default_unhealthy_color")]
    pub unhealthy_color: Color,
    #[serde(default)]
    pub text: TextLayouts,

    // === Sprites (missing or unreadable files fall back to solid colors) ===
    #[serde(default)]
    pub player_sprite: Option<String>,
    #[serde(default)]
    pub obstacle_sprite: Option<String>,
    #[serde(default)]
    pub healthy_sprite: Option<String>,
    #[serde(default)]
    pub unhealthy_sprite: Option<String>,
    #[serde(default)]
    pub background_sprite: Option<String>,

    /// Fixed RNG seed for reproducible runs (wall clock when absent)
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_obstacle_min_size() -> IVec2 {
    IVec2::new(30, 30)
}

fn default_obstacle_max_size() -> IVec2 {
    IVec2::new(60, 60)
}

fn default_item_min_size() -> IVec2 {
    IVec2::new(20, 20)
}

fn default_item_max_size() -> IVec2 {
    IVec2::new(30, 30)
}

fn default_item_spawn_min_height() -> i32 {
    60
}

fn default_item_spawn_max_height() -> i32 {
    160
}

fn default_bg_color() -> Color {
    Color(135, 206, 235)
}

fn default_player_color() -> Color {
    Color(34, 139, 34)
}

fn default_obstacle_color() -> Color {
    Color(139, 69, 19)
}

fn default_healthy_color() -> Color {
    Color(50, 205, 50)
}

fn default_unhealthy_color() -> Color {
    Color(220, 20, 60)
}

/// Settings loading errors
#[derive(Debug)]
pub enum SettingsError {
    /// Settings file could not be read
    Io(std::io::Error),
    /// File is not valid JSON or a required field is missing/mistyped
    Parse(serde_json::Error),
    /// Fields parsed but describe an unplayable game
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "cannot read settings: {}", e),
            SettingsError::Parse(e) => write!(f, "malformed settings: {}", e),
            SettingsError::Invalid(msg) => write!(f, "invalid settings: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

impl Settings {
    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!(
            "Loaded settings from {} ({}x{} @ {} fps, {} levels)",
            path.display(),
            settings.screen_width,
            settings.screen_height,
            settings.fps,
            settings.num_levels
        );
        Ok(settings)
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn invalid(msg: impl Into<String>) -> Result<(), SettingsError> {
            Err(SettingsError::Invalid(msg.into()))
        }

        if self.fps == 0 {
            return invalid("fps must be positive");
        }
        if self.screen_width <= 0 || self.screen_height <= 0 {
            return invalid("screen dimensions must be positive");
        }
        if self.player_size.x <= 0 || self.player_size.y <= 0 {
            return invalid("player_size must be positive");
        }
        // Spawned entities are square, sized from the width range
        if self.obstacle_min_size.x <= 0 || self.obstacle_min_size.x > self.obstacle_max_size.x {
            return invalid("obstacle_min_size must be positive and <= obstacle_max_size");
        }
        if self.item_min_size.x <= 0 || self.item_min_size.x > self.item_max_size.x {
            return invalid("item_min_size must be positive and <= item_max_size");
        }
        if self.item_spawn_min_height > self.item_spawn_max_height {
            return invalid("item_spawn_min_height must be <= item_spawn_max_height");
        }
        let rates = [
            self.obstacle_spawn_rate,
            self.obstacle_rate_increase,
            self.item_spawn_rate,
            self.item_rate_increase,
        ];
        if rates.iter().any(|r| !r.is_finite()) {
            return invalid("spawn rates must be finite numbers");
        }
        Ok(())
    }

    /// Frame duration for the target frame rate (seconds)
    pub fn frame_time(&self) -> f64 {
        1.0 / self.fps as f64
    }
}
