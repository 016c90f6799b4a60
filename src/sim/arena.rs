//! Square arena bounds and the wall reflection rule
//!
//! Bodies are axis-aligned squares for wall purposes: a body at `pos` with
//! diameter `size` must stay within `[0, arena - size]` on each axis.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::ARENA_SIZE;

/// Result of reflecting one axis against the walls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisReflection {
    pub pos: f32,
    pub vel: f32,
    pub hit: bool,
}

/// Which walls were hit this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHit {
    pub x: bool,
    pub y: bool,
}

impl WallHit {
    #[inline]
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

/// Fixed square arena with its top-left corner at the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub size: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self { size: ARENA_SIZE }
    }
}

impl Arena {
    pub fn new(size: f32) -> Self {
        Self { size }
    }

    /// Largest valid coordinate for a body of the given diameter
    #[inline]
    pub fn max_coord(&self, body_size: f32) -> f32 {
        (self.size - body_size).max(0.0)
    }

    /// Clamp one axis into bounds, negating velocity on a hit
    pub fn reflect_axis(&self, pos: f32, body_size: f32, vel: f32) -> AxisReflection {
        if pos < 0.0 {
            AxisReflection {
                pos: 0.0,
                vel: -vel,
                hit: true,
            }
        } else if pos > self.max_coord(body_size) {
            AxisReflection {
                pos: self.max_coord(body_size),
                vel: -vel,
                hit: true,
            }
        } else {
            AxisReflection {
                pos,
                vel,
                hit: false,
            }
        }
    }

    /// Reflect both axes independently (x first, then y)
    pub fn reflect(&self, pos: Vec2, body_size: f32, vel: Vec2) -> (Vec2, Vec2, WallHit) {
        let x = self.reflect_axis(pos.x, body_size, vel.x);
        let y = self.reflect_axis(pos.y, body_size, vel.y);
        (
            Vec2::new(x.pos, y.pos),
            Vec2::new(x.vel, y.vel),
            WallHit { x: x.hit, y: y.hit },
        )
    }

    /// Position-only reconciliation, no reflection
    pub fn clamp(&self, pos: Vec2, body_size: f32) -> Vec2 {
        let max = self.max_coord(body_size);
        Vec2::new(pos.x.max(0.0).min(max), pos.y.max(0.0).min(max))
    }

    pub fn contains(&self, pos: Vec2, body_size: f32) -> bool {
        let max = self.max_coord(body_size);
        (0.0..=max).contains(&pos.x) && (0.0..=max).contains(&pos.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect_axis_left_wall() {
        let arena = Arena::default();
        let r = arena.reflect_axis(-2.0, 20.0, -2.0);
        assert!(r.hit);
        assert_eq!(r.pos, 0.0);
        assert_eq!(r.vel, 2.0);
    }

    #[test]
    fn test_reflect_axis_right_wall() {
        let arena = Arena::default();
        let r = arena.reflect_axis(785.0, 20.0, 3.0);
        assert!(r.hit);
        assert_eq!(r.pos, 780.0);
        assert_eq!(r.vel, -3.0);
    }

    #[test]
    fn test_reflect_axis_inside() {
        let arena = Arena::default();
        let r = arena.reflect_axis(400.0, 20.0, 3.0);
        assert!(!r.hit);
        assert_eq!(r.pos, 400.0);
        assert_eq!(r.vel, 3.0);

        // Touching the far wall exactly is still inside
        let r = arena.reflect_axis(780.0, 20.0, 3.0);
        assert!(!r.hit);
    }

    #[test]
    fn test_reflect_corner_hits_both_axes() {
        let arena = Arena::default();
        let (pos, vel, hit) = arena.reflect(Vec2::new(-1.0, 795.0), 10.0, Vec2::new(-1.0, 4.0));
        assert_eq!(hit, WallHit { x: true, y: true });
        assert_eq!(pos, Vec2::new(0.0, 790.0));
        assert_eq!(vel, Vec2::new(1.0, -4.0));
    }

    #[test]
    fn test_clamp_and_contains() {
        let arena = Arena::new(100.0);
        assert!(!arena.contains(Vec2::new(95.0, -3.0), 10.0));
        let clamped = arena.clamp(Vec2::new(95.0, -3.0), 10.0);
        assert_eq!(clamped, Vec2::new(90.0, 0.0));
        assert!(arena.contains(clamped, 10.0));
    }

    #[test]
    fn test_oversized_body_pins_to_origin() {
        let arena = Arena::new(50.0);
        assert_eq!(arena.clamp(Vec2::new(10.0, 10.0), 80.0), Vec2::ZERO);
    }
}
