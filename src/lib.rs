//! Broccoli Runner - a side-scrolling arcade runner
//!
//! Core modules:
//! - `settings`: Static configuration loaded from `settings.json`
//! - `sim`: Per-frame simulation (player physics, spawning, collisions)
//! - `flow`: Start screen, countdowns, levels and end screen
//! - `render`: Drawing each phase through the backend
//! - `backend`: Rendering/input abstraction
//! - `native`: macroquad implementation of the backend

pub mod backend;
pub mod flow;
pub mod native;
pub mod render;
pub mod settings;
pub mod sim;

pub use flow::{Flow, Game, Phase};
pub use settings::{Settings, SettingsError};
