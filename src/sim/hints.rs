//! On-screen control hints
//!
//! Each hint stays up until its control is first used, lingers for
//! [`HINT_LINGER_MS`], then disappears for the rest of the run.

use serde::{Deserialize, Serialize};

/// How long a hint stays visible after first use (ms)
pub const HINT_LINGER_MS: u64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Control {
    Jump,
    Left,
    Right,
}

impl Control {
    pub const ALL: [Control; 3] = [Control::Jump, Control::Left, Control::Right];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintState {
    /// First use (ms), if any
    pub triggered_at: Option<u64>,
    pub visible: bool,
}

impl Default for HintState {
    fn default() -> Self {
        Self {
            triggered_at: None,
            visible: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ControlHints {
    jump: HintState,
    left: HintState,
    right: HintState,
}

impl ControlHints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, control: Control) -> &HintState {
        match control {
            Control::Jump => &self.jump,
            Control::Left => &self.left,
            Control::Right => &self.right,
        }
    }

    fn state_mut(&mut self, control: Control) -> &mut HintState {
        match control {
            Control::Jump => &mut self.jump,
            Control::Left => &mut self.left,
            Control::Right => &mut self.right,
        }
    }

    pub fn is_visible(&self, control: Control) -> bool {
        self.state(control).visible
    }

    /// Record first use of a control. Later uses are ignored.
    pub fn trigger(&mut self, control: Control, now_ms: u64) {
        let hint = self.state_mut(control);
        if hint.visible && hint.triggered_at.is_none() {
            hint.triggered_at = Some(now_ms);
        }
    }

    /// Hide hints whose linger window has passed
    pub fn update(&mut self, now_ms: u64) {
        for control in Control::ALL {
            let hint = self.state_mut(control);
            if let Some(t) = hint.triggered_at {
                if now_ms.saturating_sub(t) > HINT_LINGER_MS {
                    hint.visible = false;
                }
            }
        }
    }
}
