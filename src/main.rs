//! Orb Arena entry point
//!
//! Native: headless run that logs cues instead of playing them.
//! Web: installs logging; the page drives `OrbArena` directly.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    orb_arena::web::init();
    log::info!("Orb Arena (web) loaded");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Usage: `orb-arena [SETTINGS.json|-] [ORBS] [TICKS] [SEED]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::cell::RefCell;
    use std::rc::Rc;

    use orb_arena::{LogCueSink, Settings, SimulationEngine};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Orb Arena (native) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();

    let settings = match args.first().map(String::as_str) {
        None | Some("-") => Settings::default(),
        Some(path) => Settings::load(path).unwrap_or_else(|e| {
            log::warn!("{}; using default settings", e);
            Settings::default()
        }),
    };
    let orbs: usize = parse_arg(&args, 1, 12);
    let ticks: u32 = parse_arg(&args, 2, 600);
    let seed: u64 = parse_arg(&args, 3, time_seed());

    let mut engine = SimulationEngine::new(settings, seed);
    let sink = Rc::new(RefCell::new(LogCueSink::new(engine.settings().catalog())));
    engine.attach_cue_sink(sink.clone());
    log::info!("Engine initialized with seed: {}", seed);

    for _ in 0..orbs {
        engine.spawn();
    }

    // Drive the clock the way a host frame loop would, one interval per frame
    let frame = engine.settings().tick_interval();
    let mut wall_hits = 0usize;
    let mut orb_hits = 0usize;
    engine.start();
    while engine.tick_count() < u64::from(ticks) {
        for event in engine.advance(frame) {
            match event.kind {
                orb_arena::CollisionKind::Wall => wall_hits += 1,
                orb_arena::CollisionKind::Body => orb_hits += 1,
            }
        }
    }
    engine.stop();

    log::info!(
        "{} orbs, {} ticks: {} wall hits, {} orb hits, {} cues played",
        engine.body_count(),
        engine.tick_count(),
        wall_hits,
        orb_hits,
        sink.borrow().played()
    );
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_arg<T: std::str::FromStr>(args: &[String], index: usize, default: T) -> T {
    match args.get(index) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Ignoring unparsable argument {:?}", raw);
            default
        }),
        None => default,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
