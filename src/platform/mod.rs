//! Platform layer
//!
//! Owns the frame loop: turns host timestamps into capped frame deltas,
//! folds key events into a `TickInput` snapshot, runs one tick and one
//! draw per frame.

use serde::{Deserialize, Serialize};

use crate::consts::FRAME_MS;
use crate::renderer::{self, Surface};
use crate::settings::Settings;
use crate::sim::{GameState, TickInput, tick};

/// Semantic input actions, decoupled from physical keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Crouch,
    Jump,
    Run,
    Throw,
    PauseMenu,
    ToggleHelp,
    Confirm,
}

impl Action {
    /// Fires once per press rather than while held
    pub fn is_one_shot(self) -> bool {
        matches!(self, Action::Confirm | Action::PauseMenu | Action::ToggleHelp)
    }
}

/// Game instance plus the scheduling around it
pub struct GameLoop {
    pub state: GameState,
    pub settings: Settings,
    input: TickInput,
    /// Jump was pressed since the last tick, even if already released
    jump_latched: bool,
    running: bool,
    last_time: Option<f64>,
}

impl GameLoop {
    pub fn new(settings: Settings) -> Self {
        let state = GameState::with_tuning(settings.seed, settings.tuning);
        Self {
            state,
            settings,
            input: TickInput::default(),
            jump_latched: false,
            running: false,
            last_time: None,
        }
    }

    pub fn start(&mut self) {
        if !self.running {
            log::info!("Game loop started");
        }
        self.running = true;
        self.last_time = None;
    }

    pub fn stop(&mut self) {
        if self.running {
            log::info!("Game loop stopped");
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current input snapshot (what the next tick will see)
    pub fn input(&self) -> &TickInput {
        &self.input
    }

    /// Apply a press or release. One-shot actions latch on press and
    /// ignore releases; they clear after the next tick. A jump tapped
    /// between two frames is still seen as held for one tick.
    pub fn handle_input(&mut self, action: Action, pressed: bool) {
        if action.is_one_shot() && !pressed {
            return;
        }
        if action == Action::Jump && pressed {
            self.jump_latched = true;
        }
        let input = &mut self.input;
        match action {
            Action::MoveLeft => input.left = pressed,
            Action::MoveRight => input.right = pressed,
            Action::Crouch => input.crouch = pressed,
            Action::Jump => input.jump = pressed,
            Action::Run => input.run = pressed,
            Action::Throw => input.throw = pressed,
            Action::Confirm => input.confirm = true,
            Action::PauseMenu => input.pause = true,
            Action::ToggleHelp => input.toggle_help = true,
        }
    }

    /// Route a host key name through the bindings. Returns false for unbound keys.
    pub fn handle_key(&mut self, key: &str, pressed: bool) -> bool {
        match self.settings.action_for_key(key) {
            Some(action) => {
                self.handle_input(action, pressed);
                true
            }
            None => false,
        }
    }

    /// Run one frame at host time `now_ms`. Returns false while stopped.
    pub fn frame(&mut self, now_ms: f64, surface: &mut dyn Surface) -> bool {
        if !self.running {
            return false;
        }

        let dt = match self.last_time {
            Some(last) => ((now_ms - last) as f32).clamp(0.0, self.settings.frame_cap()),
            None => FRAME_MS,
        };
        self.last_time = Some(now_ms);

        let mut input = self.input;
        input.jump |= self.jump_latched;
        tick(&mut self.state, &input, dt);

        // Clear one-shot inputs after processing
        self.jump_latched = false;
        self.input.confirm = false;
        self.input.pause = false;
        self.input.toggle_help = false;

        renderer::draw_frame(&self.state, surface);
        true
    }
}
