//! Rendering module
//!
//! `scene` turns a read-only game state into draw commands in playfield
//! coordinates. `terminal` rasterizes those commands to braille cells and
//! hands them to ratatui.

pub mod scene;
pub mod shapes;
pub mod terminal;

pub use scene::{DrawCommand, Scene, TextAnchor, build_scene};
pub use terminal::BrailleCanvas;

/// RGBA color, components in 0..=1
pub type Rgba = [f32; 4];

/// Colors for game elements
pub mod colors {
    use super::Rgba;

    pub const BACKGROUND: Rgba = [1.0, 1.0, 1.0, 1.0];
    pub const PLAYER: Rgba = [0.0, 0.8, 0.0, 1.0];
    pub const AIM_LINE: Rgba = [0.1, 0.4, 0.1, 1.0];
    pub const BULLET: Rgba = [0.0, 0.0, 0.0, 1.0];
    pub const ENEMY: Rgba = [0.9, 0.0, 0.0, 1.0];
    pub const TEXT: Rgba = [0.0, 0.0, 0.0, 1.0];
    pub const TEXT_DIM: Rgba = [0.45, 0.45, 0.5, 1.0];
    pub const HIGHLIGHT: Rgba = [0.8, 0.1, 0.1, 1.0];
}
