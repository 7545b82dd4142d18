//! Draw-command scene built from the game state
//!
//! Pure: reads `GameState`, never mutates it. Coordinates are playfield
//! units with the origin at the top-left.

use glam::Vec2;

use super::{Rgba, colors};
use crate::sim::tick::awaiting_confirm;
use crate::sim::{Difficulty, GameState, Mode, Square};

/// Where a text command's position sits relative to the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    TopLeft,
    Center,
}

/// One drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    FilledSquare {
        square: Square,
        color: Rgba,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Rgba,
    },
    Text {
        pos: Vec2,
        text: String,
        color: Rgba,
        anchor: TextAnchor,
        bold: bool,
    },
}

/// A frame's worth of draw commands, painted in order
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub clear: Rgba,
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            clear: colors::BACKGROUND,
            commands: Vec::new(),
        }
    }

    fn text(&mut self, pos: Vec2, text: impl Into<String>, color: Rgba, anchor: TextAnchor) {
        self.commands.push(DrawCommand::Text {
            pos,
            text: text.into(),
            color,
            anchor,
            bold: false,
        });
    }

    fn heading(&mut self, pos: Vec2, text: impl Into<String>, color: Rgba) {
        self.commands.push(DrawCommand::Text {
            pos,
            text: text.into(),
            color,
            anchor: TextAnchor::Center,
            bold: true,
        });
    }

    /// Text commands only, in paint order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Build the scene for the current mode
pub fn build_scene(state: &GameState) -> Scene {
    let mut scene = Scene::new(state.playfield.width, state.playfield.height);
    match state.mode {
        Mode::Welcome => welcome(&mut scene, state),
        Mode::DifficultySelect { highlighted } => difficulty_menu(&mut scene, highlighted),
        Mode::Playing => arena(&mut scene, state),
        Mode::GameOver { remaining_ms } => game_over(&mut scene, state, remaining_ms),
    }
    scene
}

/// Vertical spacing between stacked lines of text
fn line_gap(scene: &Scene) -> f32 {
    scene.height * 0.08
}

fn welcome(scene: &mut Scene, state: &GameState) {
    let center = Vec2::new(scene.width / 2.0, scene.height / 2.0);
    let gap = line_gap(scene);

    scene.heading(center - Vec2::Y * gap, "Circle vs Squares", colors::ENEMY);
    scene.text(center, "Press Enter to start", colors::TEXT, TextAnchor::Center);
    scene.text(
        center + Vec2::Y * gap * 2.0,
        "WASD move  J/K rotate  Space shoot",
        colors::TEXT_DIM,
        TextAnchor::Center,
    );
    if state.runs > 0 {
        scene.text(
            center + Vec2::Y * gap * 3.0,
            format!("Best: {}", state.best_score),
            colors::TEXT_DIM,
            TextAnchor::Center,
        );
    }
}

fn difficulty_menu(scene: &mut Scene, highlighted: Difficulty) {
    let center = Vec2::new(scene.width / 2.0, scene.height / 2.0);
    let gap = line_gap(scene);
    let top = center.y - gap * 2.0;

    scene.heading(Vec2::new(center.x, top), "Select difficulty", colors::TEXT);
    for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
        let field = difficulty.playfield();
        let pos = Vec2::new(center.x, top + gap * (i as f32 + 1.0));
        if *difficulty == highlighted {
            scene.heading(
                pos,
                format!("> {} ({}x{}) <", difficulty.as_str(), field.width, field.height),
                colors::HIGHLIGHT,
            );
        } else {
            scene.text(
                pos,
                format!("{} ({}x{})", difficulty.as_str(), field.width, field.height),
                colors::TEXT,
                TextAnchor::Center,
            );
        }
    }
    scene.text(
        Vec2::new(center.x, top + gap * 5.0),
        "Up/Down choose  Enter confirm",
        colors::TEXT_DIM,
        TextAnchor::Center,
    );
}

fn arena(scene: &mut Scene, state: &GameState) {
    let player = &state.player;

    if state.settings.show_aim_line {
        if let Some(dir) = player.aim_direction() {
            scene.commands.push(DrawCommand::Line {
                from: player.pos,
                to: player.pos + dir * player.radius * 2.0,
                color: colors::AIM_LINE,
            });
        }
    }

    scene.commands.push(DrawCommand::Circle {
        center: player.pos,
        radius: player.radius,
        color: colors::PLAYER,
    });

    for bullet in &state.bullets {
        scene.commands.push(DrawCommand::Circle {
            center: bullet.pos,
            radius: bullet.radius,
            color: colors::BULLET,
        });
    }

    for enemy in &state.enemies {
        scene.commands.push(DrawCommand::FilledSquare {
            square: enemy.square,
            color: colors::ENEMY,
        });
    }

    scene.text(
        Vec2::new(10.0, 10.0),
        format!("Score: {}", state.session.score),
        colors::TEXT,
        TextAnchor::TopLeft,
    );
}

fn game_over(scene: &mut Scene, state: &GameState, remaining_ms: Option<f64>) {
    let center = Vec2::new(scene.width / 2.0, scene.height / 2.0);
    let gap = line_gap(scene);

    scene.heading(center - Vec2::Y * gap, "You Lost", colors::TEXT);
    scene.text(
        center,
        format!("Score: {}", state.session.score),
        colors::TEXT,
        TextAnchor::Center,
    );
    scene.text(
        center + Vec2::Y * gap,
        format!("Best: {}", state.best_score),
        colors::TEXT_DIM,
        TextAnchor::Center,
    );

    let prompt = match remaining_ms {
        Some(ms) if !awaiting_confirm(state) => {
            format!("Next run in {:.1}s", (ms.max(0.0) / 1000.0))
        }
        _ => "Press Enter to play again".to_string(),
    };
    scene.text(
        center + Vec2::Y * gap * 2.0,
        prompt,
        colors::TEXT_DIM,
        TextAnchor::Center,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{GameOverPolicy, Settings};
    use crate::sim::{Bullet, Enemy};

    fn playing() -> GameState {
        GameState::new(
            5,
            Settings {
                skip_menu: true,
                ..Settings::default()
            },
        )
    }

    #[test]
    fn test_welcome_shows_title() {
        let state = GameState::new(1, Settings::default());
        let scene = build_scene(&state);
        assert!(scene.texts().any(|t| t == "Circle vs Squares"));
        assert_eq!(scene.clear, colors::BACKGROUND);
    }

    #[test]
    fn test_menu_marks_highlighted_entry() {
        let mut state = GameState::new(1, Settings::default());
        state.mode = Mode::DifficultySelect {
            highlighted: Difficulty::Hard,
        };
        let scene = build_scene(&state);
        let marked: Vec<_> = scene.texts().filter(|t| t.starts_with('>')).collect();
        assert_eq!(marked, vec!["> Hard (300x200) <"]);
    }

    #[test]
    fn test_arena_draws_every_entity() {
        let mut state = playing();
        state.session.score = 4;
        state.bullets.push(Bullet::new(Vec2::new(100.0, 100.0), Vec2::X));
        state.enemies.push(Enemy::new(1, Vec2::new(-50.0, 10.0), 40.0));
        state.enemies.push(Enemy::new(2, Vec2::new(900.0, 10.0), 40.0));

        let scene = build_scene(&state);
        let circles = scene
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count();
        let squares = scene
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FilledSquare { .. }))
            .count();
        assert_eq!(circles, 2);
        assert_eq!(squares, 2);
        assert!(scene.texts().any(|t| t == "Score: 4"));
        assert!(
            scene
                .commands
                .iter()
                .any(|c| matches!(c, DrawCommand::Line { .. }))
        );
    }

    #[test]
    fn test_aim_line_can_be_hidden() {
        let mut state = playing();
        state.settings.show_aim_line = false;
        let scene = build_scene(&state);
        assert!(
            !scene
                .commands
                .iter()
                .any(|c| matches!(c, DrawCommand::Line { .. }))
        );
    }

    #[test]
    fn test_game_over_countdown_and_confirm_prompts() {
        let mut state = playing();
        state.session.score = 7;
        state.mode = Mode::GameOver {
            remaining_ms: Some(1500.0),
        };
        let scene = build_scene(&state);
        assert!(scene.texts().any(|t| t == "You Lost"));
        assert!(scene.texts().any(|t| t == "Score: 7"));
        assert!(scene.texts().any(|t| t == "Next run in 1.5s"));

        state.settings.game_over = GameOverPolicy::Confirm;
        state.mode = Mode::GameOver { remaining_ms: None };
        let scene = build_scene(&state);
        assert!(scene.texts().any(|t| t == "Press Enter to play again"));
    }
}
