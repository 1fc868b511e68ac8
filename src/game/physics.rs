//! Physics and collision update, one tick at a time.

use super::spawn::maybe_spawn;
use super::types::{Entity, Obstacle, RunState, Session, SoundEvent, TickResult};
use rand::Rng;

/// Axis-aligned test of the entity box against one obstacle pair.
///
/// Uses the un-rotated box; the tilt drawn on screen never affects hits.
pub fn collides(entity: &Entity, obstacle: &Obstacle) -> bool {
    let overlaps_horizontally =
        entity.right() > obstacle.x && entity.left() < obstacle.trailing_edge();
    let outside_gap =
        entity.top() < obstacle.gap_top() || entity.bottom() > obstacle.gap_bottom();
    overlaps_horizontally && outside_gap
}

/// True when the entity has left the viewport through the floor or ceiling.
pub fn out_of_bounds(entity: &Entity, viewport_height: f64) -> bool {
    entity.bottom() > viewport_height || entity.top() < 0.0
}

/// Advance the session one tick. Does nothing unless the run is active.
pub fn tick<R: Rng>(session: &mut Session, now_ms: u64, rng: &mut R) -> TickResult {
    let mut result = TickResult::default();
    if session.run_state != RunState::Running {
        return result;
    }

    session.entity.velocity += session.config.gravity;
    session.entity.y += session.entity.velocity;

    result.spawned = maybe_spawn(session, now_ms, rng);

    let speed = session.config.pipe_speed;
    let mut hit = false;
    {
        let Session {
            entity,
            obstacles,
            score,
            ..
        } = session;

        // Stable filter-and-compact: every obstacle is visited once, in order.
        // After a hit the rest are kept untouched.
        obstacles.retain_mut(|obstacle| {
            if hit {
                return true;
            }

            obstacle.x -= speed;

            if collides(entity, obstacle) {
                hit = true;
                return true;
            }

            if !obstacle.passed && obstacle.trailing_edge() < entity.x {
                obstacle.passed = true;
                *score += 1;
                result.events.push(SoundEvent::Point);
            }

            obstacle.trailing_edge() >= 0.0
        });
    }

    if hit || out_of_bounds(&session.entity, session.config.viewport_height) {
        end_run(session, &mut result);
    }

    result
}

fn end_run(session: &mut Session, result: &mut TickResult) {
    session.run_state = RunState::Over;
    result.ended = true;
    result.events.push(SoundEvent::Hit);
    result.new_high_score = session.record_high_score();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// A run whose opening spawn already happened at t=0.
    fn running_session() -> Session {
        let mut session = Session::new(GameConfig::default(), 0);
        session.run_state = RunState::Running;
        session.last_spawn_ms = Some(0);
        session
    }

    fn obstacle(x: f64, y: f64) -> Obstacle {
        Obstacle {
            x,
            y,
            width: 52.0,
            height: 480.0,
            gap: 120.0,
            passed: false,
        }
    }

    /// A clock value that never triggers a spawn against `last_spawn_ms = Some(0)`.
    const NO_SPAWN: u64 = 0;

    #[test]
    fn test_tick_is_noop_when_idle() {
        let mut session = Session::new(GameConfig::default(), 0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = tick(&mut session, 10_000, &mut rng);
        assert_eq!(result, TickResult::default());
        assert!((session.entity.y - 240.0).abs() < f64::EPSILON);
        assert!(session.obstacles.is_empty());
    }

    #[test]
    fn test_tick_is_noop_when_over() {
        let mut session = running_session();
        session.run_state = RunState::Over;
        session.obstacles.push(obstacle(200.0, -200.0));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        tick(&mut session, 10_000, &mut rng);
        assert!((session.obstacles[0].x - 200.0).abs() < f64::EPSILON);
        assert_eq!(session.obstacles.len(), 1);
    }

    #[test]
    fn test_gravity_then_velocity() {
        let mut session = running_session();
        session.entity.velocity = -5.0;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        tick(&mut session, NO_SPAWN, &mut rng);
        assert!((session.entity.velocity - (-4.75)).abs() < f64::EPSILON);
        assert!((session.entity.y - (240.0 - 4.75)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tick_spawns_when_interval_elapsed() {
        let mut session = running_session();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = tick(&mut session, 5_000, &mut rng);
        assert!(result.spawned);
        assert_eq!(session.obstacles.len(), 1);
        // Spawned obstacles scroll in the same tick.
        assert!((session.obstacles[0].x - 318.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_first_tick_of_run_spawns() {
        let mut session = Session::new(GameConfig::default(), 0);
        session.run_state = RunState::Running;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = tick(&mut session, 0, &mut rng);
        assert!(result.spawned);
        assert_eq!(session.last_spawn_ms, Some(0));
        assert!(!tick(&mut session, 16, &mut rng).spawned);
    }

    #[test]
    fn test_obstacles_scroll_left() {
        let mut session = running_session();
        session.obstacles.push(obstacle(200.0, -200.0));
        session.obstacles.push(obstacle(260.0, -200.0));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        tick(&mut session, NO_SPAWN, &mut rng);
        assert!((session.obstacles[0].x - 198.0).abs() < f64::EPSILON);
        assert!((session.obstacles[1].x - 258.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_collision_with_upper_barrier_ends_run() {
        let mut session = running_session();
        session.score = 3;
        // Gap spans 280..400, entity sits at 240.
        session.obstacles.push(obstacle(40.0, -200.0));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = tick(&mut session, NO_SPAWN, &mut rng);
        assert_eq!(session.run_state, RunState::Over);
        assert!(result.ended);
        assert_eq!(result.events, vec![SoundEvent::Hit]);
        assert_eq!(result.new_high_score, Some(3));
        assert_eq!(session.high_score, 3);
    }

    #[test]
    fn test_collision_stops_processing_later_obstacles() {
        let mut session = running_session();
        session.obstacles.push(obstacle(40.0, -200.0));
        session.obstacles.push(obstacle(200.0, -200.0));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        tick(&mut session, NO_SPAWN, &mut rng);
        assert_eq!(session.run_state, RunState::Over);
        // First advanced, second left alone.
        assert!((session.obstacles[0].x - 38.0).abs() < f64::EPSILON);
        assert!((session.obstacles[1].x - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_earlier_removals_survive_a_later_hit() {
        let mut session = running_session();
        let mut gone = obstacle(-51.0, -200.0);
        gone.passed = true;
        session.obstacles.push(gone);
        session.obstacles.push(obstacle(40.0, -200.0));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        tick(&mut session, NO_SPAWN, &mut rng);
        assert_eq!(session.run_state, RunState::Over);
        assert_eq!(session.obstacles.len(), 1);
        assert!((session.obstacles[0].x - 38.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_no_collision_inside_gap() {
        let mut session = running_session();
        session.entity.y = 300.0;
        session.obstacles.push(obstacle(42.0, -200.0));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        tick(&mut session, NO_SPAWN, &mut rng);
        assert_eq!(session.run_state, RunState::Running);
        assert!(!session.obstacles[0].passed);
    }

    #[test]
    fn test_passing_awards_one_point_once() {
        let mut session = running_session();
        // Trailing edge 52 + x; after one tick it is left of entity.x = 50.
        session.obstacles.push(obstacle(-1.0, -200.0));
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let result = tick(&mut session, NO_SPAWN, &mut rng);
        assert_eq!(session.score, 1);
        assert!(session.obstacles[0].passed);
        assert_eq!(result.events, vec![SoundEvent::Point]);

        session.entity.velocity = -0.25;
        let result = tick(&mut session, NO_SPAWN, &mut rng);
        assert_eq!(session.score, 1);
        assert!(result.events.is_empty());
    }

    #[test]
    fn test_offscreen_obstacle_removed() {
        let mut session = running_session();
        // Trailing edge lands at -1 after this tick.
        let mut o = obstacle(-51.0, -200.0);
        o.passed = true;
        session.obstacles.push(o);
        session.obstacles.push(obstacle(250.0, -200.0));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        tick(&mut session, NO_SPAWN, &mut rng);
        assert_eq!(session.obstacles.len(), 1);
        assert!((session.obstacles[0].x - 248.0).abs() < f64::EPSILON);
        assert_eq!(session.score, 0);
    }

    #[test]
    fn test_ceiling_ends_run() {
        let mut session = running_session();
        session.entity.y = -1.0;
        session.entity.velocity = -0.25;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = tick(&mut session, NO_SPAWN, &mut rng);
        assert_eq!(session.run_state, RunState::Over);
        assert_eq!(result.events, vec![SoundEvent::Hit]);
        assert_eq!(result.new_high_score, None);
    }

    #[test]
    fn test_floor_ends_run() {
        let mut session = running_session();
        session.entity.y = 455.0;
        session.entity.velocity = 1.0;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        tick(&mut session, NO_SPAWN, &mut rng);
        assert_eq!(session.run_state, RunState::Over);
    }

    #[test]
    fn test_single_hit_event_when_obstacle_and_bounds_both_fail() {
        let mut session = running_session();
        session.entity.y = -10.0;
        session.obstacles.push(obstacle(40.0, -200.0));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = tick(&mut session, NO_SPAWN, &mut rng);
        assert_eq!(result.events, vec![SoundEvent::Hit]);
    }

    #[test]
    fn test_collides_requires_horizontal_overlap() {
        let entity = Entity {
            x: 50.0,
            y: 0.0,
            width: 34.0,
            height: 24.0,
            velocity: 0.0,
        };
        assert!(!collides(&entity, &obstacle(84.0, -200.0)));
        assert!(collides(&entity, &obstacle(83.0, -200.0)));
        assert!(!collides(&entity, &obstacle(-2.0, -200.0)));
        assert!(collides(&entity, &obstacle(-1.0, -200.0)));
    }

    #[test]
    fn test_collides_at_gap_edges() {
        let mut entity = Entity {
            x: 50.0,
            y: 280.0,
            width: 34.0,
            height: 24.0,
            velocity: 0.0,
        };
        let o = obstacle(50.0, -200.0);
        assert!(!collides(&entity, &o));
        entity.y = 376.0;
        assert!(!collides(&entity, &o));
        entity.y = 376.5;
        assert!(collides(&entity, &o));
        entity.y = 279.5;
        assert!(collides(&entity, &o));
    }
}
