//! Browser host binding
//!
//! Exposes the engine to JavaScript. The page owns the frame loop and the
//! drawing; it calls `advance` each animation frame and reads the flat
//! instance array back.

use std::time::Duration;

use js_sys::Float32Array;
use wasm_bindgen::prelude::*;

use crate::audio::WebAudioCueSink;
use crate::engine::SimulationEngine;
use crate::render;
use crate::settings::Settings;

/// Orb arena handle for JS
#[wasm_bindgen]
pub struct OrbArena {
    engine: SimulationEngine,
}

#[wasm_bindgen]
impl OrbArena {
    /// Create an arena with default settings and Web Audio cues.
    /// `settings_json` may be empty.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: f64, settings_json: &str) -> OrbArena {
        let settings = if settings_json.trim().is_empty() {
            Settings::default()
        } else {
            Settings::from_json(settings_json).unwrap_or_else(|e| {
                log::warn!("{}; using default settings", e);
                Settings::default()
            })
        };

        let mut engine = SimulationEngine::new(settings, seed as u64);
        let sink = WebAudioCueSink::new(engine.settings().catalog());
        engine.attach_cue_sink(sink);
        engine.start();
        log::info!("Orb arena initialized with seed: {}", engine.seed());
        OrbArena { engine }
    }

    /// Speed slider input (affects future spawns only)
    pub fn set_speed(&mut self, value: f32) {
        self.engine.set_speed_param(value);
    }

    /// Spawn button input; returns the new orb id
    pub fn spawn(&mut self) -> u32 {
        self.engine.spawn().id.0
    }

    pub fn start(&mut self) {
        self.engine.start();
    }

    pub fn stop(&mut self) {
        self.engine.stop();
    }

    /// Advance by `elapsed_ms` of wall time; returns the number of collision events
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        let elapsed = Duration::from_secs_f64(elapsed_ms.max(0.0) / 1000.0);
        self.engine.advance(elapsed).len() as u32
    }

    pub fn orb_count(&self) -> u32 {
        self.engine.body_count() as u32
    }

    /// Flat `[x, y, size, pad, r, g, b, a]` per orb
    pub fn instances(&self) -> Float32Array {
        let list = render::instances(self.engine.bodies());
        let floats: &[f32] = bytemuck::cast_slice(list.as_slice());
        Float32Array::from(floats)
    }
}

/// Install logging and the panic hook
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
}
