//! Flappy Ball entry point
//!
//! Native builds run a headless demo game: the autopilot plays one round of
//! the chosen variant and the result is logged. High scores persist to a
//! JSON file between runs.
//!
//! Usage: `flappy-ball [variant] [seed]` (set `RUST_LOG=info` to see the game log)

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flappy_ball::autopilot::should_flap;
    use flappy_ball::consts::{DEFAULT_VIEWPORT, TICK_INTERVAL_MS};
    use flappy_ball::persistence::JsonFileStore;
    use flappy_ball::{GameEvent, Gesture, HostAdapter, Session, Variant};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let variant = match args.next() {
        Some(name) => match Variant::from_str(&name) {
            Some(v) => v,
            None => {
                log::warn!("Unknown variant '{}', playing Classic", name);
                Variant::Classic
            }
        },
        None => Variant::Classic,
    };
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(rand::random);

    let path = std::env::var_os("FLAPPY_BALL_SCORES")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("flappy-ball-scores.json"));
    let store = JsonFileStore::open(path);

    let config = variant.config();
    log::info!("Flappy Ball (native) {} mode, seed {}", variant.as_str(), seed);

    let session = Session::new(config.clone(), DEFAULT_VIEWPORT, store, seed);
    let mut host = HostAdapter::new(session);
    host.on_gesture(Gesture::DoubleTap);

    // Ten minutes of game time at most
    let max_frames = (10.0 * 60.0 * 1000.0 / TICK_INTERVAL_MS) as u32;
    for _ in 0..max_frames {
        if should_flap(&host.snapshot(), &config) {
            host.on_gesture(Gesture::Tap);
        }
        for event in host.on_frame(TICK_INTERVAL_MS) {
            match event {
                GameEvent::MidpointReached => log::debug!("*coin*"),
                GameEvent::NewHighScore(best) => log::info!("New best: {}", best),
                GameEvent::GameOver(summary) => {
                    println!(
                        "{}: scored {} (best {}){} - {:?}",
                        variant.as_str(),
                        summary.score,
                        summary.high_score,
                        if summary.new_best { ", new record!" } else { "" },
                        summary.rating
                    );
                    return;
                }
                _ => {}
            }
        }
    }

    let snapshot = host.snapshot();
    println!(
        "{}: still flying after {} ticks, score {}",
        variant.as_str(),
        snapshot.ticks,
        snapshot.score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The host page drives `HostAdapter` directly
}
