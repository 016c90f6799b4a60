//! Orb Arena - bouncing orbs with elastic collisions and audio cues
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, arena walls, collisions, tick step)
//! - `engine`: Body ownership, fixed-interval tick clock, spawning, event fan-out
//! - `audio`: Cue sink contract and the collision-to-cue adapter
//! - `render`: GPU-ready instance records built from body snapshots
//! - `settings`: Data-driven tuning loaded from JSON
//! - `web`: Browser binding (wasm32 only)

pub mod audio;
pub mod engine;
pub mod error;
pub mod render;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use audio::{CueSink, CueTrigger, LogCueSink, SoundCatalog};
pub use engine::{CollisionListener, SimulationEngine, SubscriptionId, TickClock};
pub use error::ConfigError;
pub use settings::Settings;
pub use sim::{Arena, Body, BodyId, CollisionEvent, CollisionKind, CueLatch, SoundRef};

/// Simulation configuration constants
pub mod consts {
    /// Side length of the square arena (pixels)
    pub const ARENA_SIZE: f32 = 800.0;

    /// Fixed tick interval (~60 Hz)
    pub const TICK_INTERVAL_MS: u64 = 16;
    /// Maximum ticks run per `advance` call to prevent spiral of death
    pub const MAX_CATCH_UP: u32 = 8;

    /// Orb diameter range, [min, max)
    pub const MIN_ORB_SIZE: f32 = 10.0;
    pub const MAX_ORB_SIZE: f32 = 60.0;
    /// Spawn positions are drawn from [0, SPAWN_EXTENT) on both axes
    pub const SPAWN_EXTENT: f32 = 700.0;

    /// Speed slider defaults
    pub const DEFAULT_SPEED: f32 = 1.0;
    pub const MAX_SPEED: f32 = 10.0;

    /// Cue volume = size / VOLUME_DIVISOR
    pub const VOLUME_DIVISOR: f32 = 60.0;
    /// Number of cue sounds in the catalog
    pub const SOUND_COUNT: u32 = 20;
}
