//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{Square, rotate_point, unit_toward};
use crate::consts::*;
use crate::normalize_degrees;
use crate::settings::{GameOverPolicy, Settings};

/// Difficulty preset, picks the playfield size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Playfield dimensions for this preset
    pub fn playfield(&self) -> Playfield {
        match self {
            Difficulty::Easy => Playfield::new(1000.0, 750.0),
            Difficulty::Normal => Playfield::new(800.0, 600.0),
            Difficulty::Hard => Playfield::new(300.0, 200.0),
        }
    }

    /// Next entry in menu order (wraps)
    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Normal,
            Difficulty::Normal => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    /// Previous entry in menu order (wraps)
    pub fn prev(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Normal => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Normal,
        }
    }
}

/// The visible simulation rectangle `[0, width] x [0, height]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Closed containment, the edges count as inside
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }

    /// Clamp a circle's center so the whole circle stays inside.
    /// A playfield narrower than the circle pins it to the middle.
    pub fn clamp_circle(&self, center: Vec2, radius: f32) -> Vec2 {
        let clamp_axis = |v: f32, extent: f32| {
            if extent < radius * 2.0 {
                extent / 2.0
            } else {
                v.clamp(radius, extent - radius)
            }
        };
        Vec2::new(clamp_axis(center.x, self.width), clamp_axis(center.y, self.height))
    }
}

/// Which screen the game is on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Mode {
    /// Title screen, waiting for confirm
    Welcome,
    /// Difficulty menu with the currently highlighted entry
    DifficultySelect { highlighted: Difficulty },
    /// Active gameplay
    Playing,
    /// Run ended. `remaining_ms` counts down to the next run;
    /// `None` means the next run waits for confirm.
    GameOver { remaining_ms: Option<f64> },
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Welcome => "Welcome",
            Mode::DifficultySelect { .. } => "DifficultySelect",
            Mode::Playing => "Playing",
            Mode::GameOver { .. } => "GameOver",
        }
    }
}

/// The player's circle
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    /// Facing angle in degrees, counterclockwise, kept in [0, 360)
    pub angle: f32,
    pub radius: f32,
    /// Distance moved per tick per held direction
    pub speed: f32,
    /// Current minimum time between shots
    pub shoot_cooldown_ms: u32,
    /// Session time of the last successful shot
    pub last_shot_ms: Option<f64>,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            angle: 0.0,
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
            shoot_cooldown_ms: INITIAL_SHOOT_COOLDOWN_MS,
            last_shot_ms: None,
        }
    }

    /// Turn by `delta` degrees
    pub fn rotate(&mut self, delta: f32) {
        self.angle = normalize_degrees(self.angle + delta);
    }

    /// Unit vector the player is aiming along.
    ///
    /// Angle 0 points up the screen; the "up" point one radius away is rotated
    /// by the facing angle and the offset normalized.
    pub fn aim_direction(&self) -> Option<Vec2> {
        let up = Vec2::new(self.pos.x, self.pos.y - self.radius);
        let tip = rotate_point(self.pos, up, self.angle);
        unit_toward(self.pos, tip)
    }

    /// Whether the cooldown has elapsed at session time `now_ms`
    pub fn can_shoot(&self, now_ms: f64) -> bool {
        match self.last_shot_ms {
            None => true,
            Some(last) => now_ms - last >= self.shoot_cooldown_ms as f64,
        }
    }
}

/// A bullet in flight
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
    /// Unit travel direction
    pub dir: Vec2,
    pub speed: f32,
    pub radius: f32,
}

impl Bullet {
    pub fn new(pos: Vec2, dir: Vec2) -> Self {
        Self {
            pos,
            dir,
            speed: BULLET_SPEED,
            radius: BULLET_RADIUS,
        }
    }

    pub fn advance(&mut self) {
        self.pos += self.dir * self.speed;
    }
}

/// A homing square
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub id: u32,
    /// Position and hitbox
    pub square: Square,
    pub speed: f32,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, size: f32) -> Self {
        Self {
            id,
            square: Square { pos, size },
            speed: ENEMY_SPEED,
        }
    }

    /// Step from the square's center toward `target`
    pub fn advance_toward(&mut self, target: Vec2) {
        if let Some(dir) = unit_toward(self.square.center(), target) {
            self.square.pos += dir * self.speed;
        }
    }
}

/// Per-run counters, all reset between runs
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// +1 per enemy destroyed
    pub score: u32,
    /// Drives cooldown reduction
    pub kills: u32,
    /// Current time between spawns
    pub spawn_interval_ms: u32,
    /// Spawn interval reductions applied so far
    pub spawn_ramp_steps: u32,
    /// Session clock, advanced by dt each Playing tick
    pub clock_ms: f64,
    /// Session time of the last spawn
    pub last_spawn_ms: f64,
    /// Terminal condition reached this run
    pub game_over: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            score: 0,
            kills: 0,
            spawn_interval_ms: INITIAL_SPAWN_INTERVAL_MS,
            spawn_ramp_steps: 0,
            clock_ms: 0.0,
            last_spawn_ms: 0.0,
            game_over: false,
        }
    }
}

/// Things that happened during the last tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Shot { pos: Vec2, dir: Vec2 },
    EnemySpawned { id: u32, pos: Vec2 },
    EnemyKilled { id: u32 },
    CooldownReduced { cooldown_ms: u32 },
    SpawnIntervalReduced { interval_ms: u32 },
    PlayerHit { enemy_id: u32 },
    ModeChanged { from: Mode, to: Mode },
    DifficultySelected { difficulty: Difficulty },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawner randomness
    pub rng: Pcg32,
    /// Rule variants and startup options
    pub settings: Settings,
    pub mode: Mode,
    /// Chosen preset, sticky for the process once committed
    pub difficulty: Difficulty,
    pub playfield: Playfield,
    pub player: Player,
    /// Live bullets in firing order
    pub bullets: Vec<Bullet>,
    /// Live enemies in spawn order
    pub enemies: Vec<Enemy>,
    pub session: Session,
    /// Best score seen by this process
    pub best_score: u32,
    /// Completed runs
    pub runs: u32,
    /// Events emitted by the most recent tick
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, settings: Settings) -> Self {
        let difficulty = settings.difficulty;
        let playfield = difficulty.playfield();
        let mode = if settings.skip_menu {
            Mode::Playing
        } else {
            Mode::Welcome
        };

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            settings,
            mode,
            difficulty,
            playfield,
            player: Player::new(playfield.center()),
            bullets: Vec::new(),
            enemies: Vec::new(),
            session: Session::default(),
            best_score: 0,
            runs: 0,
            events: Vec::new(),
            next_id: 1,
        };
        state.reset();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Put the current run back to its starting point.
    ///
    /// Difficulty, playfield, RNG and process-level tallies are untouched, so
    /// calling this repeatedly yields the same state.
    pub fn reset(&mut self) {
        self.session = Session::default();
        self.bullets.clear();
        self.enemies.clear();
        self.player = Player::new(self.playfield.center());
        log::debug!(
            "Run reset ({} {}x{})",
            self.difficulty.as_str(),
            self.playfield.width,
            self.playfield.height
        );
    }

    /// Commit a difficulty: new playfield, fresh run
    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.playfield = difficulty.playfield();
        self.reset();
        log::info!(
            "Difficulty {} selected, playfield {}x{}",
            difficulty.as_str(),
            self.playfield.width,
            self.playfield.height
        );
        self.events.push(GameEvent::DifficultySelected { difficulty });
    }

    /// Switch modes, recording the transition
    pub fn set_mode(&mut self, to: Mode) {
        let from = self.mode;
        self.mode = to;
        log::info!("Mode {} -> {}", from.name(), to.name());
        self.events.push(GameEvent::ModeChanged { from, to });
    }

    /// Mode to enter when a run ends
    pub fn game_over_mode(&self) -> Mode {
        let remaining_ms = match self.settings.game_over {
            GameOverPolicy::Countdown { ms } => Some(ms as f64),
            GameOverPolicy::Confirm => None,
        };
        Mode::GameOver { remaining_ms }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_on_welcome() {
        let state = GameState::new(1, Settings::default());
        assert_eq!(state.mode, Mode::Welcome);
        assert_eq!(state.playfield, Playfield::new(800.0, 600.0));
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_skip_menu_starts_playing() {
        let settings = Settings {
            skip_menu: true,
            ..Settings::default()
        };
        let state = GameState::new(1, settings);
        assert_eq!(state.mode, Mode::Playing);
    }

    #[test]
    fn test_difficulty_cycle_wraps() {
        assert_eq!(Difficulty::Hard.next(), Difficulty::Easy);
        assert_eq!(Difficulty::Easy.prev(), Difficulty::Hard);
        for d in Difficulty::ALL {
            assert_eq!(d.next().prev(), d);
            assert_eq!(Difficulty::parse(d.as_str()), Some(d));
        }
    }

    #[test]
    fn test_select_hard_resets_run() {
        let mut state = GameState::new(7, Settings::default());
        state.session.score = 12;
        state.session.kills = 12;
        state.player.shoot_cooldown_ms = 300;
        state.bullets.push(Bullet::new(Vec2::ZERO, Vec2::X));
        let id = state.next_entity_id();
        state.enemies.push(Enemy::new(id, Vec2::ZERO, ENEMY_SIZE));

        state.select_difficulty(Difficulty::Hard);

        assert_eq!(state.playfield, Playfield::new(300.0, 200.0));
        assert_eq!(state.session.score, 0);
        assert_eq!(state.session.kills, 0);
        assert!(state.bullets.is_empty());
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.shoot_cooldown_ms, 1000);
        assert_eq!(state.player.pos, Vec2::new(150.0, 100.0));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut state = GameState::new(3, Settings::default());
        state.session.score = 5;
        state.session.clock_ms = 1234.0;
        state.player.pos = Vec2::new(10.0, 10.0);
        state.player.angle = 45.0;
        state.player.last_shot_ms = Some(1000.0);

        state.reset();
        let (player, session) = (state.player.clone(), state.session.clone());
        state.reset();

        assert_eq!(state.player, player);
        assert_eq!(state.session, session);
        assert_eq!(state.session, Session::default());
        assert!(state.bullets.is_empty() && state.enemies.is_empty());
    }

    #[test]
    fn test_clamp_circle() {
        let field = Playfield::new(800.0, 600.0);
        assert_eq!(
            field.clamp_circle(Vec2::new(-50.0, 700.0), 30.0),
            Vec2::new(30.0, 570.0)
        );
        assert_eq!(
            field.clamp_circle(Vec2::new(400.0, 300.0), 30.0),
            Vec2::new(400.0, 300.0)
        );
        let tiny = Playfield::new(40.0, 40.0);
        assert_eq!(tiny.clamp_circle(Vec2::ZERO, 30.0), Vec2::new(20.0, 20.0));
    }

    #[test]
    fn test_aim_direction_default_points_up() {
        let player = Player::new(Vec2::new(400.0, 300.0));
        let dir = player.aim_direction().unwrap();
        assert!((dir - Vec2::new(0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_enemy_moves_from_center() {
        let mut enemy = Enemy::new(1, Vec2::new(-40.0, -40.0), 40.0);
        // Center (-20, -20) heading straight right
        enemy.advance_toward(Vec2::new(100.0, -20.0));
        assert_eq!(enemy.square.center(), Vec2::new(-18.0, -20.0));

        // Target already at the center: no movement
        let before = enemy.square;
        enemy.advance_toward(before.center());
        assert_eq!(enemy.square, before);
    }
}
