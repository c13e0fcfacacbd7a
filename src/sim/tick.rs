//! Fixed-interval simulation tick
//!
//! One call advances a running session by one step. Calling it in any other
//! phase does nothing, so a scheduler callback that fires late after a pause
//! or game over is harmless.

use super::collision::barrier_hit;
use super::state::{GamePhase, Session};
use crate::persistence::HighScoreStore;

/// Advance the session by one tick
pub fn tick<S: HighScoreStore>(session: &mut Session<S>) {
    if session.phase != GamePhase::Running {
        return;
    }
    session.ticks += 1;

    session.entity.integrate(session.config.gravity);

    // Pass cue while the obstacle center sweeps by the entity
    let to_midpoint = (session.entity.x - session.obstacle.midpoint()).abs();
    if to_midpoint < session.config.midpoint_tolerance {
        session.on_obstacle_midpoint_reached();
    }

    let speed = session.current_speed();
    session.obstacle.advance(speed);
    if session
        .obstacle
        .respawn_if_needed(session.viewport, &mut session.rng)
    {
        session.passed_midpoint = false;
        session.on_obstacle_passed();
    }

    let hit = barrier_hit(
        &session.entity,
        session.config.collision_radius,
        &session.obstacle,
        session.config.hitbox_offset,
        session.viewport.height,
    );
    if let Some(barrier) = hit {
        log::debug!("Hit {:?} barrier at y={}", barrier, session.entity.y);
        session.game_over();
    } else if session.entity.out_of_bounds(session.viewport.height) {
        log::debug!("Left the viewport at y={}", session.entity.y);
        session.game_over();
    }
}
