//! Idle/demo mode controller
//!
//! Looks only at a [`Snapshot`], so it drives a game exactly like a player
//! tapping the screen would.

use crate::sim::{GamePhase, Snapshot};
use crate::variant::VariantConfig;

/// Should the demo player flap this tick?
///
/// Aims for a point slightly below the gap center and flaps once the entity
/// is falling and would sink past it on the next step.
pub fn should_flap(snapshot: &Snapshot, config: &VariantConfig) -> bool {
    if snapshot.phase != GamePhase::Running {
        return false;
    }
    let entity = &snapshot.entity;
    let gap_center = snapshot.obstacle.upper_height + snapshot.obstacle.gap / 2.0;
    // An impulse lifts about v²/2g before gravity wins; aim so the apex lands mid-gap
    let lift = config.upward_impulse * config.upward_impulse / (2.0 * config.gravity);
    let target = (gap_center + lift / 2.0)
        .min(snapshot.viewport.height - entity.radius - lift / 2.0)
        .max(entity.radius + lift);
    entity.velocity >= 0.0 && entity.y + entity.velocity > target
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::sim::{GameEvent, Session, Viewport, tick};
    use crate::variant::Variant;

    #[test]
    fn test_never_flaps_unless_running() {
        let config = Variant::Classic.config();
        let s = Session::new(config.clone(), Viewport::new(1080.0, 1920.0), MemoryStore::new(), 1);
        assert!(!should_flap(&s.snapshot(), &config));
    }

    #[test]
    fn test_demo_player_scores() {
        for variant in Variant::ALL {
            let config = variant.config();
            let mut s = Session::new(
                config.clone(),
                Viewport::new(1080.0, 1920.0),
                MemoryStore::new(),
                2024,
            );
            s.start();
            for _ in 0..1_500 {
                if should_flap(&s.snapshot(), &config) {
                    s.move_up();
                }
                tick(&mut s);
                if s.phase() != GamePhase::Running {
                    break;
                }
            }
            let passed = s
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::ObstaclePassed { .. }))
                .count();
            assert!(passed >= 3, "{} passed only {}", variant.as_str(), passed);
        }
    }
}
