//! Thin adapter between a platform host and the simulation
//!
//! The host forwards raw callbacks (gestures, frame timestamps, suspend and
//! resume, resizes) and gets back events to act on. Tick scheduling lives
//! here: the scheduler is armed only while the session is running, so no
//! tick is ever delivered to a paused, finished or suspended game.

use crate::assets::AssetManifest;
use crate::consts::{MAX_CATCHUP_TICKS, TICK_INTERVAL_MS};
use crate::persistence::HighScoreStore;
use crate::sim::{GameEvent, GamePhase, Session, Snapshot, Viewport, tick};

/// Recognized user gestures (recognition itself is the host's job)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Single tap: flap
    Tap,
    /// Double tap: start a new game
    DoubleTap,
    /// Pause/play button
    PauseButton,
    /// Downward swipe: dive
    SwipeDown,
}

/// Fixed-interval tick clock driven by host frame deltas
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    interval_ms: f64,
    accumulator_ms: f64,
    armed: bool,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new(TICK_INTERVAL_MS)
    }
}

impl FrameScheduler {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms: interval_ms.max(1.0),
            accumulator_ms: 0.0,
            armed: false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Start delivering ticks. The first one lands a full interval later.
    pub fn arm(&mut self) {
        if !self.armed {
            self.armed = true;
            self.accumulator_ms = 0.0;
        }
    }

    /// Drop any pending tick
    pub fn disarm(&mut self) {
        self.armed = false;
        self.accumulator_ms = 0.0;
    }

    /// Number of ticks due after `elapsed_ms`, capped to avoid a spiral of death
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        if !self.armed || !(elapsed_ms > 0.0) {
            return 0;
        }
        let max_ms = self.interval_ms * f64::from(MAX_CATCHUP_TICKS);
        self.accumulator_ms = (self.accumulator_ms + elapsed_ms).min(max_ms);
        let due = (self.accumulator_ms / self.interval_ms).floor();
        self.accumulator_ms -= due * self.interval_ms;
        due as u32
    }
}

/// Translates host callbacks into session commands
#[derive(Debug)]
pub struct HostAdapter<S> {
    session: Session<S>,
    scheduler: FrameScheduler,
    pub assets: AssetManifest,
    suspended: bool,
}

impl<S: HighScoreStore> HostAdapter<S> {
    pub fn new(session: Session<S>) -> Self {
        let mut host = Self {
            session,
            scheduler: FrameScheduler::default(),
            assets: AssetManifest::new(),
            suspended: false,
        };
        host.sync_scheduler();
        host
    }

    pub fn on_gesture(&mut self, gesture: Gesture) -> bool {
        let handled = match gesture {
            Gesture::Tap if self.session.is_running() => {
                self.session.move_up();
                true
            }
            Gesture::SwipeDown if self.session.is_running() => {
                self.session.move_down();
                true
            }
            Gesture::DoubleTap if self.session.phase() == GamePhase::NotStarted => {
                self.session.start()
            }
            Gesture::PauseButton => self.session.toggle_pause(),
            _ => false,
        };
        self.sync_scheduler();
        handled
    }

    /// Frame callback. Runs due ticks and returns every event raised since the last frame.
    pub fn on_frame(&mut self, elapsed_ms: f64) -> Vec<GameEvent> {
        let due = self.scheduler.advance(elapsed_ms);
        for _ in 0..due {
            tick(&mut self.session);
            if !self.session.is_running() {
                break;
            }
        }
        self.sync_scheduler();
        self.session.drain_events()
    }

    /// Host view hidden: pause a running game and stop ticking
    pub fn on_suspend(&mut self) {
        self.suspended = true;
        if self.session.pause() {
            log::info!("Auto-paused (host suspended)");
        }
        self.sync_scheduler();
    }

    /// Host view visible again: ticks resume only if the game is still running
    pub fn on_resume(&mut self) {
        self.suspended = false;
        self.sync_scheduler();
    }

    pub fn on_viewport_resized(&mut self, width: f32, height: f32) {
        self.session.set_viewport(Viewport::new(width, height));
    }

    /// Restart button on the game-over dialog
    pub fn restart(&mut self) {
        self.session.reset();
        self.sync_scheduler();
    }

    pub fn snapshot(&self) -> Snapshot {
        self.session.snapshot()
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn is_ticking(&self) -> bool {
        self.scheduler.is_armed()
    }

    fn sync_scheduler(&mut self) {
        if self.session.is_running() && !self.suspended {
            self.scheduler.arm();
        } else {
            self.scheduler.disarm();
        }
    }
}
