//! Game settings and rule variants
//!
//! Loaded from an optional JSON file; command-line flags are applied on top.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::consts::GAME_OVER_DISPLAY_MS;
use crate::sim::Difficulty;

/// What happens after the loss screen appears
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameOverPolicy {
    /// Show the loss screen for `ms`, then start the next run
    Countdown { ms: u32 },
    /// Wait on the loss screen until confirm is pressed
    Confirm,
}

impl Default for GameOverPolicy {
    fn default() -> Self {
        GameOverPolicy::Countdown {
            ms: GAME_OVER_DISPLAY_MS,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Startup ===
    /// Difficulty used when the menu is skipped, and highlighted first otherwise
    pub difficulty: Difficulty,
    /// Start directly in gameplay, bypassing the title and difficulty screens
    pub skip_menu: bool,
    /// Fixed RNG seed (random when absent)
    pub seed: Option<u64>,

    // === Rules ===
    /// Keep the player's circle inside the playfield
    pub clamp_player: bool,
    /// Kills between shoot cooldown reductions (3 or 5 in the shipped variants)
    pub kills_per_cooldown_step: u32,
    /// Loss screen behavior
    pub game_over: GameOverPolicy,

    // === HUD ===
    /// Draw a line showing the aim direction
    pub show_aim_line: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            skip_menu: false,
            seed: None,

            clamp_player: true,
            kills_per_cooldown_step: 3,
            game_over: GameOverPolicy::default(),

            show_aim_line: true,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&json)
            .with_context(|| format!("parsing settings in {}", path.display()))?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values the simulation cannot use
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.kills_per_cooldown_step > 0,
            "kills_per_cooldown_step must be at least 1"
        );
        Ok(())
    }

    /// Serialize to pretty JSON (used to print a template config)
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing settings")
    }
}
