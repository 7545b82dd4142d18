//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order for enemies, firing order for bullets)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{first_hit, touches_player};
pub use geometry::{Square, rotate_point, unit_toward};
pub use spawner::{spawn_position, update_spawner};
pub use state::{
    Bullet, Difficulty, Enemy, GameEvent, GameState, Mode, Player, Playfield, Session,
};
pub use tick::{TickInput, apply_movement, simulate, tick, try_shoot};
