//! Runtime settings
//!
//! Key bindings, the frame-delta cap, the RNG seed and gameplay tuning,
//! read from JSON. Missing fields fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_FRAME_MS;
use crate::platform::Action;
use crate::tuning::Tuning;

/// Maps one key name (as reported by the host, e.g. "ArrowLeft") to an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    pub key: String,
    pub action: Action,
}

impl KeyBinding {
    fn new(key: &str, action: Action) -> Self {
        Self {
            key: key.to_string(),
            action,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub key_bindings: Vec<KeyBinding>,
    /// Upper bound on the per-frame delta fed to the sim
    pub max_frame_ms: f32,
    pub seed: u64,
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            key_bindings: default_bindings(),
            max_frame_ms: MAX_FRAME_MS,
            seed: 0x0b51_c0de,
            tuning: Tuning::default(),
        }
    }
}

fn valid_frame_cap(ms: f32) -> bool {
    ms.is_finite() && ms > 0.0
}

fn default_bindings() -> Vec<KeyBinding> {
    use Action::*;
    [
        ("ArrowLeft", MoveLeft),
        ("a", MoveLeft),
        ("ArrowRight", MoveRight),
        ("d", MoveRight),
        ("ArrowDown", Crouch),
        ("s", Crouch),
        ("ArrowUp", Jump),
        ("w", Jump),
        ("k", Jump),
        (" ", Jump),
        ("Shift", Run),
        ("l", Run),
        ("j", Throw),
        ("Enter", Confirm),
        ("Escape", PauseMenu),
        ("m", PauseMenu),
        ("c", ToggleHelp),
    ]
    .into_iter()
    .map(|(key, action)| KeyBinding::new(key, action))
    .collect()
}

impl Settings {
    /// Parse settings. Out-of-range values are replaced with defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    fn sanitized(mut self) -> Self {
        if !valid_frame_cap(self.max_frame_ms) {
            log::warn!(
                "max_frame_ms {} must be positive, using {MAX_FRAME_MS}",
                self.max_frame_ms
            );
            self.max_frame_ms = MAX_FRAME_MS;
        }
        self
    }

    /// Frame-delta cap, falling back to the default if the field holds garbage
    pub fn frame_cap(&self) -> f32 {
        if valid_frame_cap(self.max_frame_ms) {
            self.max_frame_ms
        } else {
            MAX_FRAME_MS
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse settings, falling back to defaults on malformed input
    pub fn load_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(err) => {
                log::warn!("Ignoring malformed settings: {err}");
                Self::default()
            }
        }
    }

    /// Load from a file if one is given and readable
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match std::fs::read_to_string(path) {
            Ok(json) => Self::load_or_default(&json),
            Err(err) => {
                log::warn!("Could not read settings from {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Action bound to `key`. Single-character keys match case-insensitively
    /// so a held Shift doesn't break letter bindings.
    pub fn action_for_key(&self, key: &str) -> Option<Action> {
        self.key_bindings
            .iter()
            .find(|b| b.key == key || (key.chars().count() == 1 && b.key.eq_ignore_ascii_case(key)))
            .map(|b| b.action)
    }
}
