//! Circle vs Squares - a small arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, spawning, modes)
//! - `renderer`: Scene building and terminal drawing
//! - `platform`: Terminal input and event plumbing
//! - `settings`: Startup options and rule variants

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{GameOverPolicy, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per displayed frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Player defaults (distances are per tick)
    pub const PLAYER_RADIUS: f32 = 30.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Facing change per tick while a rotation key is held (degrees)
    pub const ROTATION_STEP_DEG: f32 = 5.0;

    /// Bullet defaults
    pub const BULLET_RADIUS: f32 = PLAYER_RADIUS / 3.0;
    pub const BULLET_SPEED: f32 = 7.0;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 40.0;
    pub const ENEMY_SPEED: f32 = 2.0;
    /// Smallest band used when spawn parameters are degenerate
    pub const MIN_SPAWN_BAND: f32 = 1.0;

    /// Shooting cooldown (ms)
    pub const INITIAL_SHOOT_COOLDOWN_MS: u32 = 1000;
    pub const COOLDOWN_REDUCTION_MS: u32 = 50;
    pub const MIN_SHOOT_COOLDOWN_MS: u32 = 100;

    /// Enemy spawn interval (ms)
    pub const INITIAL_SPAWN_INTERVAL_MS: u32 = 3000;
    pub const SPAWN_INTERVAL_STEP_MS: u32 = 250;
    pub const MIN_SPAWN_INTERVAL_MS: u32 = 750;
    /// Session time between spawn interval reductions
    pub const SPAWN_RAMP_PERIOD_MS: f64 = 10_000.0;

    /// How long the loss screen stays up before the next run
    pub const GAME_OVER_DISPLAY_MS: u32 = 2000;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(365.0), 5.0);
        assert_eq!(normalize_degrees(-5.0), 355.0);
        assert_eq!(normalize_degrees(720.0), 0.0);
    }
}
