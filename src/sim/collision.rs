//! Orb-orb collision detection and response
//!
//! Orbs are equal-mass circles. A hit exchanges the velocity components along
//! the contact normal and pushes both orbs apart so they stop overlapping.

use glam::Vec2;

/// Distance below which two centers are treated as coincident
const COINCIDENT_EPSILON: f32 = 1e-6;

/// Geometry of an overlapping pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from B toward A
    pub normal: Vec2,
    /// Distance between centers
    pub distance: f32,
    /// How far the circles interpenetrate ((size_a + size_b) / 2 - distance)
    pub overlap: f32,
}

/// New velocities and position corrections for both orbs of a pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub vel_a: Vec2,
    pub vel_b: Vec2,
    pub shift_a: Vec2,
    pub shift_b: Vec2,
}

/// Check whether two circles overlap
///
/// Orbs touching exactly (distance == sum of radii) do not collide. Coincident
/// centers use the +X axis as the normal so the result is always finite.
pub fn circle_contact(center_a: Vec2, size_a: f32, center_b: Vec2, size_b: f32) -> Option<Contact> {
    let delta = center_a - center_b;
    let distance = delta.length();
    let reach = (size_a + size_b) / 2.0;

    if distance >= reach {
        return None;
    }

    let normal = if distance <= COINCIDENT_EPSILON {
        Vec2::X
    } else {
        let theta = delta.y.atan2(delta.x);
        Vec2::new(theta.cos(), theta.sin())
    };

    Some(Contact {
        normal,
        distance,
        overlap: reach - distance,
    })
}

/// Swap the along-normal velocity components of two equal-mass orbs
///
/// Velocities are rotated into the (normal, tangent) frame, the normal
/// components are exchanged, then rotated back. Tangential components are kept.
pub fn exchange_along_normal(vel_a: Vec2, vel_b: Vec2, normal: Vec2) -> (Vec2, Vec2) {
    let tangent = normal.perp();

    let a_n = vel_a.dot(normal);
    let a_t = vel_a.dot(tangent);
    let b_n = vel_b.dot(normal);
    let b_t = vel_b.dot(tangent);

    (normal * b_n + tangent * a_t, normal * a_n + tangent * b_t)
}

/// Full elastic response for an overlapping pair
pub fn resolve_elastic(vel_a: Vec2, vel_b: Vec2, contact: &Contact) -> Resolution {
    let (new_a, new_b) = exchange_along_normal(vel_a, vel_b, contact.normal);
    let push = contact.normal * contact.overlap;

    Resolution {
        vel_a: new_a,
        vel_b: new_b,
        shift_a: push,
        shift_b: -push,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_no_contact_when_apart_or_touching() {
        assert!(circle_contact(Vec2::ZERO, 20.0, Vec2::new(30.0, 0.0), 20.0).is_none());
        // Exactly touching
        assert!(circle_contact(Vec2::ZERO, 20.0, Vec2::new(20.0, 0.0), 20.0).is_none());
    }

    #[test]
    fn test_contact_normal_points_from_b_to_a() {
        let contact = circle_contact(Vec2::new(0.0, 10.0), 20.0, Vec2::ZERO, 20.0).unwrap();
        assert!(approx(contact.normal, Vec2::Y));
        assert!((contact.overlap - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_coincident_centers_use_x_axis() {
        let contact = circle_contact(Vec2::splat(5.0), 10.0, Vec2::splat(5.0), 30.0).unwrap();
        assert_eq!(contact.normal, Vec2::X);
        assert_eq!(contact.distance, 0.0);
        assert!((contact.overlap - 20.0).abs() < 1e-6);
        assert!(contact.normal.is_finite());
    }

    #[test]
    fn test_head_on_swap() {
        let v = 3.0;
        let contact = circle_contact(Vec2::new(100.0, 50.0), 20.0, Vec2::new(115.0, 50.0), 20.0).unwrap();
        let res = resolve_elastic(Vec2::new(v, 0.0), Vec2::new(-v, 0.0), &contact);

        assert!(approx(res.vel_a, Vec2::new(-v, 0.0)));
        assert!(approx(res.vel_b, Vec2::new(v, 0.0)));

        let before = 2.0 * v * v;
        let after = res.vel_a.length_squared() + res.vel_b.length_squared();
        assert!((before - after).abs() < 1e-4);
    }

    #[test]
    fn test_tangential_component_kept() {
        // Normal along X, A slides along Y while B is still
        let (a, b) = exchange_along_normal(Vec2::new(2.0, 5.0), Vec2::ZERO, Vec2::X);
        assert!(approx(a, Vec2::new(0.0, 5.0)));
        assert!(approx(b, Vec2::new(2.0, 0.0)));
    }

    #[test]
    fn test_oblique_energy_conserved() {
        let contact = circle_contact(Vec2::new(10.0, 10.0), 30.0, Vec2::new(0.0, 0.0), 30.0).unwrap();
        let va = Vec2::new(-1.5, 0.25);
        let vb = Vec2::new(2.0, 3.0);
        let res = resolve_elastic(va, vb, &contact);

        let before = va.length_squared() + vb.length_squared();
        let after = res.vel_a.length_squared() + res.vel_b.length_squared();
        assert!((before - after).abs() < 1e-4);
        // Momentum is conserved for equal masses
        assert!(approx(va + vb, res.vel_a + res.vel_b));
    }

    #[test]
    fn test_shift_separates_pair() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(12.0, 0.0);
        let contact = circle_contact(a, 20.0, b, 20.0).unwrap();
        let res = resolve_elastic(Vec2::ZERO, Vec2::ZERO, &contact);

        let separated = ((a + res.shift_a) - (b + res.shift_b)).length();
        assert!(separated >= 20.0 - 1e-4);
    }
}
