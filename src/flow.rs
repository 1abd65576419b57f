//! Game flow: start screen, countdowns, levels, end screen
//!
//! [`Game::frame`] is called once per rendered frame. It polls input,
//! advances whichever phase is active and draws the result.

use crate::backend::{Backend, InputEvent, Key};
use crate::render;
use crate::settings::Settings;
use crate::sim::{FrameInput, Level, LevelEvent, LevelStatus, RunState};

/// Countdown steps before each level
pub const COUNTDOWN_STEPS: u32 = 3;
/// Duration of one countdown step (ms)
pub const COUNTDOWN_STEP_MS: u64 = 1000;

/// Current phase of the run
#[derive(Debug, Clone)]
pub enum Phase {
    /// Title screen, waiting for the jump key
    Start,
    /// Pre-level countdown
    Countdown { level: u32, started_at: u64 },
    /// Level in progress
    Playing(Level),
    /// Run over, shown until quit
    Finished { won: bool },
}

impl Phase {
    /// Countdown number to display, or None outside a countdown
    pub fn countdown_remaining(&self, now_ms: u64) -> Option<u32> {
        match self {
            Phase::Countdown { started_at, .. } => {
                let elapsed_steps = (now_ms.saturating_sub(*started_at) / COUNTDOWN_STEP_MS) as u32;
                Some(COUNTDOWN_STEPS.saturating_sub(elapsed_steps))
            }
            _ => None,
        }
    }
}

/// Whether the main loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A complete run of the game
pub struct Game {
    settings: Settings,
    run: RunState,
    phase: Phase,
}

impl Game {
    pub fn new(settings: Settings, seed: u64) -> Self {
        log::info!("New run with seed {}", seed);
        let run = RunState::new(&settings, seed);
        Self {
            settings,
            run,
            phase: Phase::Start,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Run one frame: input, simulation, drawing
    ///
    /// The clock is read once; simulation and drawing share that timestamp.
    pub fn frame(&mut self, backend: &mut impl Backend) -> Flow {
        let now = backend.now_ms();
        let events = backend.poll_events();
        if events.contains(&InputEvent::Quit) {
            log::info!("Quit requested");
            return Flow::Quit;
        }
        let jump = events.contains(&InputEvent::KeyDown(Key::Jump));

        if let Some(next) = self.advance(&*backend, now, jump) {
            self.enter(next);
        }

        render::draw(backend, &self.phase, &self.run, now, &self.settings);
        Flow::Continue
    }

    /// Advance the current phase, returning the phase to switch to
    fn advance(&mut self, backend: &impl Backend, now: u64, jump: bool) -> Option<Phase> {
        match &mut self.phase {
            Phase::Start => jump.then(|| first_level(&self.settings, &self.run, now)),
            Phase::Countdown { level, started_at } => {
                let elapsed = now.saturating_sub(*started_at);
                (elapsed >= COUNTDOWN_STEPS as u64 * COUNTDOWN_STEP_MS)
                    .then(|| Phase::Playing(Level::new(*level, &self.settings)))
            }
            Phase::Playing(level) => {
                let input = FrameInput {
                    jump,
                    left: backend.key_held(Key::Left),
                    right: backend.key_held(Key::Right),
                };
                for event in level.step(&mut self.run, &input, now, &self.settings) {
                    if let LevelEvent::Hit { health } = event {
                        log::info!("Ouch! Health {}", health);
                    }
                }
                match level.status {
                    LevelStatus::Running => None,
                    LevelStatus::Failed => Some(Phase::Finished { won: false }),
                    LevelStatus::Cleared => {
                        let next = level.params.index + 1;
                        if next < self.settings.num_levels {
                            Some(Phase::Countdown {
                                level: next,
                                started_at: now,
                            })
                        } else {
                            Some(Phase::Finished {
                                won: self.run.player.is_alive(),
                            })
                        }
                    }
                }
            }
            Phase::Finished { .. } => None,
        }
    }

    fn enter(&mut self, phase: Phase) {
        match &phase {
            Phase::Start => {}
            Phase::Countdown { level, .. } => {
                log::info!(
                    "Level {} starting (health {})",
                    level + 1,
                    self.run.player.health
                );
            }
            Phase::Playing(_) => log::debug!("Countdown finished"),
            Phase::Finished { won } => {
                log::info!(
                    "Run over: {} with health {}",
                    if *won { "won" } else { "lost" },
                    self.run.player.health
                );
            }
        }
        self.phase = phase;
    }
}

/// Phase after the start screen; zero levels means straight to the end
fn first_level(settings: &Settings, run: &RunState, now: u64) -> Phase {
    if settings.num_levels == 0 {
        Phase::Finished {
            won: run.player.is_alive(),
        }
    } else {
        Phase::Countdown {
            level: 0,
            started_at: now,
        }
    }
}
