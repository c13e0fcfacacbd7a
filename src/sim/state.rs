//! Session state and lifecycle commands
//!
//! A [`Session`] owns one game screen's worth of state: the entity, the
//! obstacle pair, the score and the phase. Every method must be called from
//! the same execution context; there is no internal locking.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::entity::Entity;
use super::obstacle::ObstaclePair;
use super::scoring::{GameOverSummary, Rating, Scoreboard, speed_for_score};
use crate::persistence::HighScoreStore;
use crate::variant::VariantConfig;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Waiting for the start gesture
    #[default]
    NotStarted,
    /// Ticks advance the simulation
    Running,
    Paused,
    /// Terminal until `reset`
    Over,
}

/// Discrete notifications for the audio/UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    /// Entity lined up with the obstacle center (pass cue)
    MidpointReached,
    /// Obstacle wrapped around; score already incremented
    ObstaclePassed { score: u32 },
    NewHighScore(u32),
    SpeedChanged { speed: f32 },
    GameOver(GameOverSummary),
    Reset,
}

/// Drawable area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Negative or non-finite dimensions become 0
    pub fn sanitized(self) -> Self {
        let clean = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        let out = Self::new(clean(self.width), clean(self.height));
        if out != self {
            log::warn!("Clamped viewport {:?} to {:?}", self, out);
        }
        out
    }
}

impl Default for Viewport {
    fn default() -> Self {
        crate::consts::DEFAULT_VIEWPORT
    }
}

/// Read-only view of a session for rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub viewport: Viewport,
    pub entity: Entity,
    pub obstacle: ObstaclePair,
    /// Full sprite rectangles (not hitboxes)
    pub upper_rect: Rect,
    pub lower_rect: Rect,
    pub score: u32,
    pub high_score: u32,
    pub speed: f32,
    pub passed_midpoint: bool,
    pub ticks: u64,
}

/// One game screen
#[derive(Debug)]
pub struct Session<S> {
    pub(crate) config: VariantConfig,
    pub(crate) viewport: Viewport,
    pub(crate) entity: Entity,
    pub(crate) obstacle: ObstaclePair,
    pub(crate) scoreboard: Scoreboard,
    /// Pass cue already fired for the live obstacle
    pub(crate) passed_midpoint: bool,
    /// A new best was set during this run
    pub(crate) set_new_best: bool,
    pub(crate) phase: GamePhase,
    /// Ticks simulated since the last reset
    pub(crate) ticks: u64,
    pub(crate) rng: Pcg32,
    pub(crate) store: S,
    events: Vec<GameEvent>,
}

impl<S: HighScoreStore> Session<S> {
    /// Create a session; the high score is loaded from `store` immediately
    pub fn new(config: VariantConfig, viewport: Viewport, store: S, seed: u64) -> Self {
        let viewport = viewport.sanitized();
        let high_score = store.load(&config.storage_key);
        log::info!(
            "New session '{}' {}x{}, high score {}",
            config.storage_key,
            viewport.width,
            viewport.height,
            high_score
        );
        Self {
            entity: Entity::new(&config),
            obstacle: ObstaclePair::new(&config, viewport),
            scoreboard: Scoreboard::new(high_score),
            passed_midpoint: false,
            set_new_best: false,
            phase: GamePhase::NotStarted,
            ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            store,
            events: Vec::new(),
            config,
            viewport,
        }
    }

    // === Commands ===

    /// NotStarted -> Running
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::NotStarted {
            log::debug!("start ignored in {:?}", self.phase);
            return false;
        }
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::Started);
        log::info!("Game started");
        true
    }

    /// Running <-> Paused
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Running => {
                self.phase = GamePhase::Paused;
                self.events.push(GameEvent::Paused);
                log::info!("Game paused");
                true
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Running;
                self.events.push(GameEvent::Resumed);
                log::info!("Game resumed");
                true
            }
            _ => {
                log::debug!("toggle_pause ignored in {:?}", self.phase);
                false
            }
        }
    }

    /// Pause only if running (host suspended)
    pub fn pause(&mut self) -> bool {
        self.phase == GamePhase::Running && self.toggle_pause()
    }

    pub fn move_up(&mut self) {
        if self.phase != GamePhase::Running {
            log::debug!("move_up ignored in {:?}", self.phase);
            return;
        }
        self.entity.apply_upward_impulse(self.config.upward_impulse);
    }

    pub fn move_down(&mut self) {
        if self.phase != GamePhase::Running {
            log::debug!("move_down ignored in {:?}", self.phase);
            return;
        }
        self.entity.apply_downward_nudge(self.config.downward_nudge);
    }

    /// Any phase -> NotStarted, with a fresh board and the stored high score
    pub fn reset(&mut self) {
        self.entity = Entity::new(&self.config);
        self.obstacle = ObstaclePair::new(&self.config, self.viewport);
        self.scoreboard = Scoreboard::new(self.store.load(&self.config.storage_key));
        self.passed_midpoint = false;
        self.set_new_best = false;
        self.phase = GamePhase::NotStarted;
        self.ticks = 0;
        self.events.push(GameEvent::Reset);
        log::info!("Game reset, high score {}", self.scoreboard.high_score);
    }

    /// Viewport size notification. Before the game starts the obstacle is
    /// re-parked at the new right edge; afterwards the live gap is clamped
    /// into the new height.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        let viewport = viewport.sanitized();
        if viewport == self.viewport {
            return;
        }
        log::debug!("Viewport {:?} -> {:?}", self.viewport, viewport);
        self.viewport = viewport;
        if self.phase == GamePhase::NotStarted {
            self.obstacle = ObstaclePair::new(&self.config, viewport);
        } else {
            self.obstacle.fit_to(viewport.height);
        }
    }

    // === Scoring ===

    /// Count an obstacle that wrapped around, persisting a new best.
    /// Ignored unless running.
    pub fn on_obstacle_passed(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            log::debug!("on_obstacle_passed ignored in {:?}", self.phase);
            return false;
        }
        let before = self.current_speed();
        if let Some(best) = self.scoreboard.on_obstacle_passed() {
            self.persist_high_score(best);
        }
        let score = self.scoreboard.score;
        self.events.push(GameEvent::ObstaclePassed { score });

        let speed = self.current_speed();
        if speed != before {
            log::info!("Speed {} -> {} at score {}", before, speed, score);
            self.events.push(GameEvent::SpeedChanged { speed });
        }
        true
    }

    /// Fire the pass cue at most once per obstacle
    pub fn on_obstacle_midpoint_reached(&mut self) -> bool {
        if self.passed_midpoint {
            return false;
        }
        self.passed_midpoint = true;
        self.events.push(GameEvent::MidpointReached);
        true
    }

    /// Scroll speed for the current score
    pub fn current_speed(&self) -> f32 {
        speed_for_score(
            self.config.base_speed,
            &self.config.speed_tiers,
            self.scoreboard.score,
        )
    }

    fn persist_high_score(&mut self, best: u32) {
        self.set_new_best = true;
        self.store.save(&self.config.storage_key, best);
        self.events.push(GameEvent::NewHighScore(best));
        log::info!("New high score: {}", best);
    }

    /// Running -> Over
    pub(crate) fn game_over(&mut self) {
        if let Some(best) = self.scoreboard.record_best() {
            self.persist_high_score(best);
        }
        self.phase = GamePhase::Over;
        let summary = GameOverSummary {
            score: self.scoreboard.score,
            high_score: self.scoreboard.high_score,
            new_best: self.set_new_best,
            rating: Rating::for_score(self.scoreboard.score, self.config.great_score_threshold),
        };
        self.events.push(GameEvent::GameOver(summary));
        log::info!("Game over, score {}", summary.score);
    }

    // === Queries ===

    pub fn snapshot(&self) -> Snapshot {
        let (upper_rect, lower_rect) = self.obstacle.sprite_rects(self.viewport.height);
        Snapshot {
            phase: self.phase,
            viewport: self.viewport,
            entity: self.entity,
            obstacle: self.obstacle,
            upper_rect,
            lower_rect,
            score: self.scoreboard.score,
            high_score: self.scoreboard.high_score,
            speed: self.current_speed(),
            passed_midpoint: self.passed_midpoint,
            ticks: self.ticks,
        }
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn score(&self) -> u32 {
        self.scoreboard.score
    }

    pub fn high_score(&self) -> u32 {
        self.scoreboard.high_score
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn obstacle(&self) -> &ObstaclePair {
        &self.obstacle
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &VariantConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::variant::Variant;

    const VIEWPORT: Viewport = Viewport::new(1080.0, 1920.0);

    fn session(store: MemoryStore) -> Session<MemoryStore> {
        Session::new(Variant::Classic.config(), VIEWPORT, store, 42)
    }

    #[test]
    fn test_new_loads_high_score() {
        let s = session(MemoryStore::with_score("highScore", 11));
        assert_eq!(s.high_score(), 11);
        assert_eq!(s.score(), 0);
        assert_eq!(s.phase(), GamePhase::NotStarted);
        assert_eq!(s.obstacle().x, 1080.0);
        assert_eq!(s.current_speed(), 17.0);
    }

    #[test]
    fn test_start_only_from_not_started() {
        let mut s = session(MemoryStore::new());
        assert!(s.start());
        assert_eq!(s.phase(), GamePhase::Running);
        assert!(!s.start());
        assert_eq!(s.drain_events(), vec![GameEvent::Started]);
    }

    #[test]
    fn test_toggle_pause_round_trip_only_touches_phase() {
        let mut s = session(MemoryStore::new());
        assert!(!s.toggle_pause());
        assert_eq!(s.phase(), GamePhase::NotStarted);

        s.start();
        let before = s.snapshot();
        assert!(s.toggle_pause());
        assert_eq!(s.phase(), GamePhase::Paused);
        assert!(s.toggle_pause());
        assert_eq!(s.snapshot(), before);
    }

    #[test]
    fn test_moves_ignored_unless_running() {
        let mut s = session(MemoryStore::new());
        s.move_up();
        s.move_down();
        assert_eq!(s.entity().velocity, 0.0);

        s.start();
        s.move_up();
        assert_eq!(s.entity().velocity, -19.0);
        s.move_down();
        assert_eq!(s.entity().velocity, -9.0);

        s.toggle_pause();
        s.move_up();
        assert_eq!(s.entity().velocity, -9.0);
    }

    #[test]
    fn test_pause_only_when_running() {
        let mut s = session(MemoryStore::new());
        assert!(!s.pause());
        s.start();
        assert!(s.pause());
        assert!(!s.pause());
        assert_eq!(s.phase(), GamePhase::Paused);
    }

    #[test]
    fn test_speed_reaches_top_tier_at_35() {
        let mut s = session(MemoryStore::new());
        s.start();
        let mut speeds = vec![s.current_speed()];
        for _ in 0..35 {
            s.on_obstacle_passed();
            speeds.push(s.current_speed());
        }
        assert_eq!(speeds[0], 17.0);
        assert_eq!(speeds[34], 27.0);
        assert_eq!(speeds[35], 30.0);
        assert_eq!(speeds.iter().position(|&v| v == 30.0), Some(35));
        assert!(speeds.windows(2).all(|w| w[1] >= w[0]));

        let changes: Vec<_> = s
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::SpeedChanged { speed } => Some(speed),
                _ => None,
            })
            .collect();
        assert_eq!(changes, vec![22.0, 27.0, 30.0]);
    }

    #[test]
    fn test_new_best_is_persisted() {
        let store = MemoryStore::with_score("highScore", 1);
        let mut s = session(store.clone());
        s.start();
        s.on_obstacle_passed();
        assert_eq!(store.get("highScore"), Some(1));
        s.on_obstacle_passed();
        assert_eq!(s.high_score(), 2);
        assert_eq!(store.get("highScore"), Some(2));
        assert!(s.drain_events().contains(&GameEvent::NewHighScore(2)));
    }

    #[test]
    fn test_obstacle_passed_ignored_unless_running() {
        let store = MemoryStore::new();
        let mut s = session(store.clone());
        assert!(!s.on_obstacle_passed());
        assert_eq!(s.score(), 0);

        s.start();
        assert!(s.on_obstacle_passed());
        s.toggle_pause();
        assert!(!s.on_obstacle_passed());
        s.toggle_pause();
        s.game_over();
        s.drain_events();

        assert!(!s.on_obstacle_passed());
        assert_eq!(s.score(), 1);
        assert_eq!(s.high_score(), 1);
        assert_eq!(store.get("highScore"), Some(1));
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn test_midpoint_cue_fires_once() {
        let mut s = session(MemoryStore::new());
        assert!(s.on_obstacle_midpoint_reached());
        assert!(!s.on_obstacle_midpoint_reached());
        assert_eq!(s.drain_events(), vec![GameEvent::MidpointReached]);
    }

    #[test]
    fn test_game_over_summary() {
        let store = MemoryStore::new();
        let mut s = session(store.clone());
        s.start();
        for _ in 0..21 {
            s.on_obstacle_passed();
        }
        s.drain_events();
        s.game_over();
        assert_eq!(s.phase(), GamePhase::Over);
        assert_eq!(
            s.drain_events(),
            vec![GameEvent::GameOver(GameOverSummary {
                score: 21,
                high_score: 21,
                new_best: true,
                rating: Rating::Great,
            })]
        );
        assert_eq!(store.get("highScore"), Some(21));
    }

    #[test]
    fn test_reset_reloads_high_score() {
        let mut store = MemoryStore::new();
        let mut s = session(store.clone());
        s.start();
        s.on_obstacle_passed();
        store.save("highScore", 50);

        s.reset();
        assert_eq!(s.phase(), GamePhase::NotStarted);
        assert_eq!(s.score(), 0);
        assert_eq!(s.high_score(), 50);
        assert_eq!(s.drain_events().last(), Some(&GameEvent::Reset));
    }

    #[test]
    fn test_viewport_resize_reparks_obstacle_before_start() {
        let mut s = session(MemoryStore::new());
        s.set_viewport(Viewport::new(720.0, 1280.0));
        assert_eq!(s.obstacle().x, 720.0);

        s.start();
        s.set_viewport(Viewport::new(1080.0, 1920.0));
        assert_eq!(s.obstacle().x, 720.0);
        assert_eq!(s.viewport(), VIEWPORT);
    }

    #[test]
    fn test_viewport_shrink_while_running_clamps_gap() {
        let mut s = session(MemoryStore::new());
        s.start();
        s.obstacle.upper_height = 760.0;
        let x = s.obstacle().x;

        s.set_viewport(Viewport::new(1080.0, 1000.0));
        let snap = s.snapshot();
        assert_eq!(snap.obstacle.upper_height, 300.0);
        assert!(snap.obstacle.lower_top() <= 1000.0);
        assert_eq!(snap.obstacle.lower_height, 300.0);
        assert_eq!(snap.lower_rect.height(), snap.obstacle.lower_height);
        assert_eq!(snap.obstacle.x, x);

        // Paused sessions are fitted too
        s.toggle_pause();
        s.obstacle.upper_height = 300.0;
        s.set_viewport(Viewport::new(1080.0, 800.0));
        assert_eq!(s.obstacle().upper_height, 200.0);
        assert_eq!(s.obstacle().lower_height, 200.0);
    }

    #[test]
    fn test_viewport_sanitized() {
        let v = Viewport::new(-5.0, f32::NAN).sanitized();
        assert_eq!(v, Viewport::new(0.0, 0.0));
    }
}
