//! Fixed tick simulation step
//!
//! One call advances every orb by one tick:
//! 1. integrate position, reset the collided flag, reflect off walls
//! 2. resolve every overlapping pair against a frozen snapshot
//! 3. apply the accumulated pair corrections and reconcile into the arena
//!
//! Pair resolution never reads state written earlier in the same pass, so the
//! result does not depend on body order.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::body::{Body, CollisionEvent, CollisionKind};
use super::collision::{circle_contact, resolve_elastic};
use crate::consts::VOLUME_DIVISOR;

/// How many cues one orb may trigger per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CueLatch {
    /// One wall cue and one orb cue, independently
    #[default]
    PerKind,
    /// A single cue per orb, first trigger wins
    Single,
}

/// Parameters that shape event emission
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRules {
    pub latch: CueLatch,
    pub volume_divisor: f32,
}

impl Default for StepRules {
    fn default() -> Self {
        Self {
            latch: CueLatch::PerKind,
            volume_divisor: VOLUME_DIVISOR,
        }
    }
}

/// Per-orb cue latch, reset every tick
#[derive(Debug, Clone, Copy, Default)]
struct Latch {
    wall: bool,
    body: bool,
}

impl Latch {
    /// Mark a trigger; returns true if it should produce a cue
    fn trip(&mut self, kind: CollisionKind, policy: CueLatch) -> bool {
        let already = match policy {
            CueLatch::PerKind => match kind {
                CollisionKind::Wall => self.wall,
                CollisionKind::Body => self.body,
            },
            CueLatch::Single => self.wall || self.body,
        };
        match kind {
            CollisionKind::Wall => self.wall = true,
            CollisionKind::Body => self.body = true,
        }
        !already
    }
}

/// Frozen per-orb state used for pair checks
#[derive(Debug, Clone, Copy)]
struct Snapshot {
    center: Vec2,
    size: f32,
    vel: Vec2,
}

/// Accumulated pair corrections for one orb
#[derive(Debug, Clone, Copy, Default)]
struct Correction {
    vel: Vec2,
    pos: Vec2,
    touched: bool,
}

/// Advance all orbs by one tick, returning the cues produced
///
/// Wall cues come first (in body order), then orb-orb cues (in body order).
/// Never fails: degenerate geometry is handled inside the collision math.
pub fn step(bodies: &mut [Body], arena: &Arena, rules: &StepRules) -> Vec<CollisionEvent> {
    let mut events = Vec::new();
    let mut latches = vec![Latch::default(); bodies.len()];

    // Integrate + walls
    for (body, latch) in bodies.iter_mut().zip(latches.iter_mut()) {
        body.pos += body.vel;
        body.collided = false;

        let (pos, vel, hit) = arena.reflect(body.pos, body.size, body.vel);
        body.pos = pos;
        body.vel = vel;

        if hit.any() {
            body.collided = true;
            if latch.trip(CollisionKind::Wall, rules.latch) {
                events.push(CollisionEvent::for_body(body, CollisionKind::Wall, rules.volume_divisor));
            }
        }
    }

    // Orb-orb pairs against the post-wall snapshot
    let snapshot: Vec<Snapshot> = bodies
        .iter()
        .map(|b| Snapshot {
            center: b.center(),
            size: b.size,
            vel: b.vel,
        })
        .collect();
    let mut corrections = vec![Correction::default(); bodies.len()];

    for i in 0..snapshot.len() {
        for j in (i + 1)..snapshot.len() {
            let (a, b) = (snapshot[i], snapshot[j]);
            let Some(contact) = circle_contact(a.center, a.size, b.center, b.size) else {
                continue;
            };
            let res = resolve_elastic(a.vel, b.vel, &contact);

            corrections[i].vel += res.vel_a - a.vel;
            corrections[i].pos += res.shift_a;
            corrections[i].touched = true;
            corrections[j].vel += res.vel_b - b.vel;
            corrections[j].pos += res.shift_b;
            corrections[j].touched = true;
        }
    }

    for ((body, latch), fix) in bodies.iter_mut().zip(latches.iter_mut()).zip(&corrections) {
        if !fix.touched {
            continue;
        }
        body.vel += fix.vel;
        body.pos = arena.clamp(body.pos + fix.pos, body.size);
        body.collided = true;
        if latch.trip(CollisionKind::Body, rules.latch) {
            events.push(CollisionEvent::for_body(body, CollisionKind::Body, rules.volume_divisor));
        }
    }

    events
}
