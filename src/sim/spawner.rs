//! Enemy spawning and the spawn-rate ramp
//!
//! Enemies appear just beyond the playfield: for each axis a coin flip picks
//! the band before zero or the band past the far edge, then a uniform offset
//! inside that band places the square. The square never overlaps the visible
//! rectangle when it appears.

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, GameEvent, GameState, Playfield, Session};
use crate::consts::*;

/// Top-left corner for a new enemy square of side `size`
pub fn spawn_position(rng: &mut impl Rng, playfield: Playfield, size: f32) -> Vec2 {
    let size = if size.is_finite() && size > 0.0 {
        size
    } else {
        MIN_SPAWN_BAND
    };
    Vec2::new(
        spawn_axis(rng, playfield.width, size),
        spawn_axis(rng, playfield.height, size),
    )
}

/// One coordinate: the square sits entirely in `(-inf, 0)` or `(extent, inf)`
fn spawn_axis(rng: &mut impl Rng, extent: f32, size: f32) -> f32 {
    let extent = if extent.is_finite() { extent.max(0.0) } else { 0.0 };
    // Band width equals the square size, kept one unit clear of the edge
    let band = size.max(MIN_SPAWN_BAND);
    let offset = MIN_SPAWN_BAND + rng.random_range(0.0..band);
    if rng.random_bool(0.5) {
        -size - offset
    } else {
        extent + offset
    }
}

/// Apply any spawn interval reductions due at the current session time.
/// Returns the new interval if it changed.
pub fn ramp_spawn_interval(session: &mut Session) -> Option<u32> {
    let due_steps = (session.clock_ms / SPAWN_RAMP_PERIOD_MS).floor() as u32;
    let before = session.spawn_interval_ms;
    while session.spawn_ramp_steps < due_steps {
        session.spawn_ramp_steps += 1;
        session.spawn_interval_ms = session
            .spawn_interval_ms
            .saturating_sub(SPAWN_INTERVAL_STEP_MS)
            .max(MIN_SPAWN_INTERVAL_MS);
    }
    (session.spawn_interval_ms != before).then_some(session.spawn_interval_ms)
}

/// Whether the spawn timer has run out
#[inline]
pub fn spawn_due(session: &Session) -> bool {
    session.clock_ms - session.last_spawn_ms >= session.spawn_interval_ms as f64
}

/// Ramp the interval and spawn one enemy if the timer has run out.
/// Returns the new enemy's ID.
pub fn update_spawner(state: &mut GameState) -> Option<u32> {
    if let Some(interval_ms) = ramp_spawn_interval(&mut state.session) {
        log::debug!("Spawn interval now {} ms", interval_ms);
        state
            .events
            .push(GameEvent::SpawnIntervalReduced { interval_ms });
    }

    if !spawn_due(&state.session) {
        return None;
    }

    let pos = spawn_position(&mut state.rng, state.playfield, ENEMY_SIZE);
    let id = state.next_entity_id();
    state.enemies.push(Enemy::new(id, pos, ENEMY_SIZE));
    state.session.last_spawn_ms = state.session.clock_ms;
    log::debug!("Enemy {} spawned at ({:.1}, {:.1})", id, pos.x, pos.y);
    state.events.push(GameEvent::EnemySpawned { id, pos });
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::geometry::Square;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn outside(square: &Square, field: Playfield) -> bool {
        let x_out = square.right() < 0.0 || square.left() > field.width;
        let y_out = square.bottom() < 0.0 || square.top() > field.height;
        x_out && y_out
    }

    #[test]
    fn test_spawn_position_outside_playfield() {
        let mut rng = Pcg32::seed_from_u64(42);
        let field = Playfield::new(800.0, 600.0);
        for _ in 0..1000 {
            let pos = spawn_position(&mut rng, field, ENEMY_SIZE);
            let square = Square { pos, size: ENEMY_SIZE };
            assert!(outside(&square, field), "square {:?} overlaps", square);
            // Stays within one band width of the edge
            let reach = ENEMY_SIZE + MIN_SPAWN_BAND;
            assert!(pos.x >= -ENEMY_SIZE - reach && pos.x <= field.width + reach);
            assert!(pos.y >= -ENEMY_SIZE - reach && pos.y <= field.height + reach);
        }
    }

    #[test]
    fn test_spawn_uses_both_bands() {
        let mut rng = Pcg32::seed_from_u64(9);
        let field = Playfield::new(800.0, 600.0);
        let positions: Vec<Vec2> = (0..200)
            .map(|_| spawn_position(&mut rng, field, ENEMY_SIZE))
            .collect();
        assert!(positions.iter().any(|p| p.x < 0.0));
        assert!(positions.iter().any(|p| p.x > field.width));
        assert!(positions.iter().any(|p| p.y < 0.0));
        assert!(positions.iter().any(|p| p.y > field.height));
    }

    #[test]
    fn test_degenerate_parameters_do_not_panic() {
        let mut rng = Pcg32::seed_from_u64(1);
        let pos = spawn_position(&mut rng, Playfield::new(10.0, 10.0), 0.0);
        assert!(pos.x.is_finite() && pos.y.is_finite());
        let pos = spawn_position(&mut rng, Playfield::new(-5.0, f32::NAN), f32::NAN);
        assert!(pos.x.is_finite() && pos.y.is_finite());
    }

    #[test]
    fn test_ramp_floors_at_minimum() {
        let mut session = Session::default();
        session.clock_ms = 9_999.0;
        assert_eq!(ramp_spawn_interval(&mut session), None);

        session.clock_ms = 10_000.0;
        assert_eq!(ramp_spawn_interval(&mut session), Some(2750));
        // Applying again at the same time is a no-op
        assert_eq!(ramp_spawn_interval(&mut session), None);

        session.clock_ms = 1_000_000.0;
        assert_eq!(ramp_spawn_interval(&mut session), Some(MIN_SPAWN_INTERVAL_MS));
        assert_eq!(session.spawn_interval_ms, MIN_SPAWN_INTERVAL_MS);
    }

    #[test]
    fn test_update_spawner_waits_for_interval() {
        let mut state = GameState::new(5, Settings::default());
        state.session.clock_ms = 2_999.0;
        assert_eq!(update_spawner(&mut state), None);
        assert!(state.enemies.is_empty());

        state.session.clock_ms = 3_000.0;
        let id = update_spawner(&mut state).unwrap();
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].id, id);
        assert_eq!(state.session.last_spawn_ms, 3_000.0);
        assert!(matches!(state.events[..], [GameEvent::EnemySpawned { .. }]));

        // Timer restarted
        state.session.clock_ms = 4_000.0;
        assert_eq!(update_spawner(&mut state), None);
    }

    proptest! {
        #[test]
        fn spawned_squares_never_overlap_playfield(
            seed in any::<u64>(),
            width in 1.0f32..2000.0,
            height in 1.0f32..2000.0,
            size in 1.0f32..200.0,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let field = Playfield::new(width, height);
            for _ in 0..16 {
                let pos = spawn_position(&mut rng, field, size);
                let square = Square { pos, size };
                prop_assert!(outside(&square, field));
            }
        }
    }
}
