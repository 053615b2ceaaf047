//! Shared kinetic-body record and the circle-circle collision test.
//!
//! Every simulated entity embeds a [`KineticBody`]. An inactive body
//! participates in no physics, collision, or render pass; its fields are
//! garbage until the slot is reactivated.

use bevy::prelude::Vec2;

/// Position / velocity / facing / radius record common to all entities.
///
/// Angles are in degrees, 0 = up (+Y), increasing clockwise. Velocity is in
/// world units per simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KineticBody {
    pub pos: Vec2,
    pub vel: Vec2,
    pub angle_deg: f32,
    pub radius: f32,
    pub active: bool,
}

impl Default for KineticBody {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            angle_deg: 0.0,
            radius: 0.0,
            active: false,
        }
    }
}

impl KineticBody {
    /// Unit direction vector for this body's facing angle.
    pub fn facing(&self) -> Vec2 {
        heading(self.angle_deg)
    }
}

/// Unit vector for an angle in degrees (0 = up, clockwise).
pub fn heading(angle_deg: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(rad.sin(), rad.cos())
}

/// Facing angle in degrees (0 = up, clockwise) for a direction vector.
/// A zero vector maps to 0°.
pub fn angle_of(dir: Vec2) -> f32 {
    if dir.length_squared() <= f32::EPSILON {
        return 0.0;
    }
    dir.x.atan2(dir.y).to_degrees()
}

/// Two bodies collide iff the distance between centers is strictly less than
/// the sum of their radii. Exact tangency is not a collision. Inactive bodies
/// never collide, and a body never collides with itself.
pub fn collides(a: &KineticBody, b: &KineticBody) -> bool {
    if std::ptr::eq(a, b) {
        return false;
    }
    if !a.active || !b.active {
        return false;
    }
    let r = a.radius + b.radius;
    a.pos.distance_squared(b.pos) < r * r
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_at(x: f32, y: f32, radius: f32) -> KineticBody {
        KineticBody {
            pos: Vec2::new(x, y),
            radius,
            active: true,
            ..Default::default()
        }
    }

    #[test]
    fn heading_zero_points_up() {
        let dir = heading(0.0);
        assert!((dir - Vec2::Y).length() < 1e-6);
    }

    #[test]
    fn heading_increases_clockwise() {
        // 90° clockwise from up is +X.
        let dir = heading(90.0);
        assert!((dir - Vec2::X).length() < 1e-5);
    }

    #[test]
    fn angle_of_roundtrips_heading() {
        for deg in [0.0_f32, 45.0, 90.0, 135.0, 179.0, -90.0] {
            let back = angle_of(heading(deg));
            let diff = (back - deg).rem_euclid(360.0);
            assert!(
                diff < 1e-3 || diff > 359.999,
                "angle {deg} came back as {back}"
            );
        }
    }

    #[test]
    fn overlapping_bodies_collide() {
        let a = body_at(0.0, 0.0, 10.0);
        let b = body_at(15.0, 0.0, 10.0);
        assert!(collides(&a, &b));
    }

    #[test]
    fn collision_is_symmetric() {
        let a = body_at(0.0, 0.0, 10.0);
        let b = body_at(15.0, 0.0, 10.0);
        let c = body_at(100.0, 100.0, 1.0);
        assert_eq!(collides(&a, &b), collides(&b, &a));
        assert_eq!(collides(&a, &c), collides(&c, &a));
    }

    #[test]
    fn exact_tangency_is_not_a_collision() {
        let a = body_at(0.0, 0.0, 10.0);
        let b = body_at(20.0, 0.0, 10.0);
        assert!(!collides(&a, &b));
    }

    #[test]
    fn body_never_collides_with_itself() {
        let a = body_at(0.0, 0.0, 10.0);
        assert!(!collides(&a, &a));
    }

    #[test]
    fn inactive_body_never_collides() {
        let a = body_at(0.0, 0.0, 10.0);
        let mut b = body_at(5.0, 0.0, 10.0);
        b.active = false;
        assert!(!collides(&a, &b));
    }
}
