//! Simulation engine
//!
//! Owns the orb collection, the seeded spawn RNG, the speed parameter and the
//! tick clock, and fans collision events out to subscribed listeners.

mod clock;

pub use clock::TickClock;

use std::fmt;
use std::time::Duration;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::audio::{CueSink, CueTrigger};
use crate::settings::Settings;
use crate::sim::{Arena, Body, BodyId, CollisionEvent, SoundRef, StepRules, step};

/// Receives every collision event produced by a tick
pub trait CollisionListener {
    fn on_collision(&mut self, event: &CollisionEvent);
}

impl<F: FnMut(&CollisionEvent)> CollisionListener for F {
    fn on_collision(&mut self, event: &CollisionEvent) {
        self(event)
    }
}

/// Handle returned by [`SimulationEngine::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// The orb simulation
pub struct SimulationEngine {
    settings: Settings,
    arena: Arena,
    rules: StepRules,
    /// Orbs in spawn order (ids ascending)
    bodies: Vec<Body>,
    /// Speed multiplier applied to future spawns
    speed: f32,
    seed: u64,
    rng: Pcg32,
    next_id: u32,
    tick_count: u64,
    clock: TickClock,
    listeners: Vec<(SubscriptionId, Box<dyn CollisionListener>)>,
    next_subscription: u64,
}

impl fmt::Debug for SimulationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulationEngine")
            .field("seed", &self.seed)
            .field("speed", &self.speed)
            .field("bodies", &self.bodies.len())
            .field("tick_count", &self.tick_count)
            .field("running", &self.clock.is_running())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl SimulationEngine {
    /// Create an engine with the given seed
    ///
    /// Invalid settings are logged and replaced by the defaults.
    pub fn new(settings: Settings, seed: u64) -> Self {
        let settings = match settings.validate() {
            Ok(()) => settings,
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Settings::default()
            }
        };

        let clock = TickClock::new(settings.tick_interval(), settings.max_catch_up);
        let speed = settings.initial_speed.clamp(0.0, settings.max_speed);

        Self {
            arena: settings.arena(),
            rules: settings.step_rules(),
            bodies: Vec::new(),
            speed,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            tick_count: 0,
            clock,
            listeners: Vec::new(),
            next_subscription: 1,
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Read-only view of all orbs, for rendering
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn speed_param(&self) -> f32 {
        self.speed
    }

    /// Set the speed used by future spawns; existing orbs keep their velocity
    pub fn set_speed_param(&mut self, value: f32) {
        let max = self.settings.max_speed;
        let clamped = if value.is_nan() { 0.0 } else { value.clamp(0.0, max) };
        if clamped != value {
            log::warn!("Speed {} outside [0, {}], using {}", value, max, clamped);
        }
        self.speed = clamped;
    }

    /// Allocate a new orb id
    fn next_body_id(&mut self) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawn one orb using the current speed parameter
    pub fn spawn(&mut self) -> Body {
        self.spawn_with_speed(self.speed)
    }

    /// Spawn one orb with velocity scaled by `speed`
    ///
    /// Size, position, hue and sound are drawn from the seeded RNG. Existing
    /// orbs are not touched.
    pub fn spawn_with_speed(&mut self, speed: f32) -> Body {
        let id = self.next_body_id();
        let s = &self.settings;

        let size = self.rng.random_range(s.min_size..s.max_size);
        let pos = Vec2::new(
            self.rng.random_range(0.0..s.spawn_extent),
            self.rng.random_range(0.0..s.spawn_extent),
        );
        let vel = Vec2::new(
            (self.rng.random::<f32>() - 0.5) * speed,
            (self.rng.random::<f32>() - 0.5) * speed,
        );
        let hue = self.rng.random_range(0.0..360.0);
        let sound = SoundRef(self.rng.random_range(0..s.sound_count));

        let body = Body::new(id, pos, vel, size, hue, sound);
        log::debug!("Spawned {} size {:.1} at {:?} vel {:?}", id, size, pos, vel);
        self.bodies.push(body.clone());
        body
    }

    /// Run one simulation step and publish its events
    pub fn tick(&mut self) -> Vec<CollisionEvent> {
        let events = step(&mut self.bodies, &self.arena, &self.rules);
        self.tick_count += 1;

        if !events.is_empty() {
            log::trace!("Tick {}: {} collision events", self.tick_count, events.len());
        }
        for event in &events {
            for (_, listener) in self.listeners.iter_mut() {
                listener.on_collision(event);
            }
        }

        events
    }

    /// Start the fixed-interval clock
    pub fn start(&mut self) {
        if !self.clock.is_running() {
            log::info!("Simulation started ({:?} ticks)", self.clock.interval());
        }
        self.clock.start();
    }

    /// Stop the clock; `advance` runs no ticks until `start` is called again
    pub fn stop(&mut self) {
        if self.clock.is_running() {
            log::info!("Simulation stopped after {} ticks", self.tick_count);
        }
        self.clock.stop();
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Feed elapsed host time, running every tick that is due
    pub fn advance(&mut self, elapsed: Duration) -> Vec<CollisionEvent> {
        let due = self.clock.due_ticks(elapsed);
        let mut events = Vec::new();
        for _ in 0..due {
            events.extend(self.tick());
        }
        events
    }

    /// Register a collision listener
    pub fn subscribe(&mut self, listener: impl CollisionListener + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    /// Route collision cues to an audio sink using the configured volume
    pub fn attach_cue_sink(&mut self, sink: impl CueSink + 'static) -> SubscriptionId {
        let trigger = CueTrigger::from_settings(sink, &self.settings);
        self.subscribe(trigger)
    }
}
