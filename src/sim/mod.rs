//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed tick only (velocities are pixels per tick)
//! - No RNG (spawning happens in the engine)
//! - Pair resolution independent of body order
//! - No rendering, audio or platform dependencies

pub mod arena;
pub mod body;
pub mod collision;
pub mod step;

pub use arena::{Arena, AxisReflection, WallHit};
pub use body::{Body, BodyId, CollisionEvent, CollisionKind, SoundRef};
pub use collision::{Contact, Resolution, circle_contact, exchange_along_normal, resolve_elastic};
pub use step::{CueLatch, StepRules, step};
