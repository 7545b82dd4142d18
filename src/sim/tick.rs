//! Fixed timestep simulation tick
//!
//! One call advances the mode state machine and, while playing, the whole
//! arena: input, bullets, spawning, enemies. A run that ends mid-tick still
//! finishes the tick; the switch to the loss screen happens afterwards.

use glam::Vec2;

use super::collision;
use super::spawner;
use super::state::{Bullet, GameEvent, GameState, Mode, Player, Playfield};
use crate::consts::*;
use crate::settings::GameOverPolicy;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    // Held keys, applied every tick they are down
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Turn counterclockwise (facing angle increases)
    pub rotate_ccw: bool,
    /// Turn clockwise (facing angle decreases)
    pub rotate_cw: bool,
    pub shoot: bool,

    // One-shot presses, cleared after the first tick that sees them
    pub confirm: bool,
    /// Menu highlight up
    pub select_prev: bool,
    /// Menu highlight down
    pub select_next: bool,
}

impl TickInput {
    /// Drop the one-shot presses so substeps don't repeat them
    pub fn clear_one_shots(&mut self) {
        self.confirm = false;
        self.select_prev = false;
        self.select_next = false;
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    match state.mode {
        Mode::Welcome => {
            if input.confirm {
                let highlighted = state.difficulty;
                state.set_mode(Mode::DifficultySelect { highlighted });
            }
        }

        Mode::DifficultySelect { highlighted } => {
            if input.confirm {
                state.select_difficulty(highlighted);
                state.set_mode(Mode::Playing);
            } else if input.select_prev {
                state.mode = Mode::DifficultySelect {
                    highlighted: highlighted.prev(),
                };
            } else if input.select_next {
                state.mode = Mode::DifficultySelect {
                    highlighted: highlighted.next(),
                };
            }
        }

        Mode::Playing => {
            simulate(state, input, dt);
            if state.session.game_over {
                end_run(state);
            }
        }

        Mode::GameOver { remaining_ms } => match remaining_ms {
            Some(ms) => {
                let left = ms - dt as f64 * 1000.0;
                if left <= 0.0 {
                    start_next_run(state);
                } else {
                    state.mode = Mode::GameOver {
                        remaining_ms: Some(left),
                    };
                }
            }
            None => {
                if input.confirm {
                    start_next_run(state);
                }
            }
        },
    }
}

/// One gameplay tick: input, bullets, spawning, enemies
pub fn simulate(state: &mut GameState, input: &TickInput, dt: f32) {
    state.session.clock_ms += dt as f64 * 1000.0;
    let now = state.session.clock_ms;

    apply_movement(
        &mut state.player,
        input,
        state.playfield,
        state.settings.clamp_player,
    );

    if input.shoot {
        if let Some(bullet) = try_shoot(now, &mut state.player) {
            state.events.push(GameEvent::Shot {
                pos: bullet.pos,
                dir: bullet.dir,
            });
            state.bullets.push(bullet);
        }
    }

    update_bullets(state);
    spawner::update_spawner(state);
    update_enemies(state);
}

/// Apply held movement and rotation keys to the player.
///
/// Each held direction moves the full speed on its axis, so diagonals are
/// faster than straight lines.
pub fn apply_movement(player: &mut Player, input: &TickInput, playfield: Playfield, clamp: bool) {
    let mut delta = Vec2::ZERO;
    if input.up {
        delta.y -= player.speed;
    }
    if input.down {
        delta.y += player.speed;
    }
    if input.left {
        delta.x -= player.speed;
    }
    if input.right {
        delta.x += player.speed;
    }
    player.pos += delta;

    if input.rotate_ccw {
        player.rotate(ROTATION_STEP_DEG);
    }
    if input.rotate_cw {
        player.rotate(-ROTATION_STEP_DEG);
    }

    if clamp {
        player.pos = playfield.clamp_circle(player.pos, player.radius);
    }
}

/// Fire a bullet if the cooldown has elapsed at `now_ms`.
///
/// A degenerate aim direction skips the shot and leaves the cooldown alone.
pub fn try_shoot(now_ms: f64, player: &mut Player) -> Option<Bullet> {
    if !player.can_shoot(now_ms) {
        return None;
    }
    let dir = player.aim_direction()?;
    player.last_shot_ms = Some(now_ms);
    Some(Bullet::new(player.pos, dir))
}

/// Move bullets, drop the ones that left the playfield, resolve hits.
/// Each bullet destroys at most one enemy, the earliest spawned it is inside.
fn update_bullets(state: &mut GameState) {
    let playfield = state.playfield;
    let mut bullets = std::mem::take(&mut state.bullets);

    bullets.retain_mut(|bullet| {
        bullet.advance();
        if !playfield.contains(bullet.pos) {
            return false;
        }
        match collision::first_hit(bullet.pos, &state.enemies) {
            Some(idx) => {
                let enemy = state.enemies.remove(idx);
                register_kill(state, enemy.id);
                false
            }
            None => true,
        }
    });

    state.bullets = bullets;
}

/// Score a kill and step the shoot cooldown down every few kills
fn register_kill(state: &mut GameState, enemy_id: u32) {
    state.session.kills += 1;
    state.session.score += 1;
    log::debug!("Enemy {} destroyed, score {}", enemy_id, state.session.score);
    state.events.push(GameEvent::EnemyKilled { id: enemy_id });

    let step = state.settings.kills_per_cooldown_step.max(1);
    let player = &mut state.player;
    if state.session.kills % step == 0 && player.shoot_cooldown_ms > MIN_SHOOT_COOLDOWN_MS {
        player.shoot_cooldown_ms = player
            .shoot_cooldown_ms
            .saturating_sub(COOLDOWN_REDUCTION_MS)
            .max(MIN_SHOOT_COOLDOWN_MS);
        log::debug!("Shoot cooldown now {} ms", player.shoot_cooldown_ms);
        state.events.push(GameEvent::CooldownReduced {
            cooldown_ms: player.shoot_cooldown_ms,
        });
    }
}

/// Steer every enemy at the player and check for contact
fn update_enemies(state: &mut GameState) {
    let target = state.player.pos;
    let radius = state.player.radius;

    for enemy in &mut state.enemies {
        enemy.advance_toward(target);
        if collision::touches_player(&enemy.square, target, radius) {
            state.session.game_over = true;
            state.events.push(GameEvent::PlayerHit { enemy_id: enemy.id });
        }
    }
}

/// Record the finished run and show the loss screen
fn end_run(state: &mut GameState) {
    state.runs += 1;
    state.best_score = state.best_score.max(state.session.score);
    log::info!(
        "Run {} over: score {}, best {}",
        state.runs,
        state.session.score,
        state.best_score
    );
    let mode = state.game_over_mode();
    state.set_mode(mode);
}

/// Fresh run on the same difficulty
fn start_next_run(state: &mut GameState) {
    state.reset();
    state.set_mode(Mode::Playing);
}

/// Whether the loss screen is waiting on input rather than a timer
pub fn awaiting_confirm(state: &GameState) -> bool {
    match state.mode {
        Mode::Welcome | Mode::DifficultySelect { .. } => true,
        Mode::GameOver { .. } => state.settings.game_over == GameOverPolicy::Confirm,
        Mode::Playing => false,
    }
}
