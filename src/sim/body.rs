//! Orb bodies and the collision events they produce
//!
//! Everything the step mutates lives on [`Body`]; everything the step reports
//! to audio/telemetry listeners is a [`CollisionEvent`].

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable orb identifier, assigned at spawn and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "orb#{}", self.0)
    }
}

/// Opaque reference into the sound catalog (0-based index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoundRef(pub u32);

/// A single orb
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    /// Top-left corner of the bounding square (arena pixels)
    pub pos: Vec2,
    /// Pixels per tick. Speed is baked in at spawn, never rescaled.
    pub vel: Vec2,
    /// Diameter
    pub size: f32,
    /// Display hue in degrees [0, 360), opaque to the simulation
    pub hue: f32,
    /// Cue played when this orb collides
    pub sound: SoundRef,
    /// Set when the orb collided during the most recent tick
    #[serde(skip)]
    pub collided: bool,
}

impl Body {
    pub fn new(id: BodyId, pos: Vec2, vel: Vec2, size: f32, hue: f32, sound: SoundRef) -> Self {
        Self {
            id,
            pos,
            vel,
            size,
            hue,
            sound,
            collided: false,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    /// Center of the orb's bounding circle
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.radius())
    }

    /// Suggested cue loudness, proportional to size
    #[inline]
    pub fn volume_hint(&self, divisor: f32) -> f32 {
        self.size / divisor
    }
}

/// What the orb collided with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollisionKind {
    /// Arena boundary
    Wall,
    /// Another orb
    Body,
}

/// One cue-worthy collision of one orb during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionEvent {
    pub body: BodyId,
    pub kind: CollisionKind,
    pub sound: SoundRef,
    pub volume: f32,
}

impl CollisionEvent {
    pub fn for_body(body: &Body, kind: CollisionKind, volume_divisor: f32) -> Self {
        Self {
            body: body.id,
            kind,
            sound: body.sound,
            volume: body.volume_hint(volume_divisor),
        }
    }
}
