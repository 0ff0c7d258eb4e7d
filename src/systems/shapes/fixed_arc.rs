use crate::core::{vector, Vector};
use crate::systems::collision::{Collision, CollisionPoint};

use super::{Body, BodyId, Collidable};

/// Immovable ring segment that pushes corners back towards its centre.
///
/// Angles are measured counter-clockwise from the positive x axis in
/// `[0, 2π)`. The band does not wrap past 2π; model such an arc as two arcs.
#[derive(Clone, Debug)]
pub struct FixedArc {
    id: BodyId,
    origin: Vector,
    radius: f64,
    /// Thickness outward from `radius`
    width: f64,
    start_angle: f64,
    end_angle: f64,
}

impl FixedArc {
    pub fn new(
        id: BodyId,
        origin: Vector,
        radius: f64,
        width: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> Self {
        Self { id, origin, radius, width, start_angle, end_angle }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    /// True if `p` lies in the radial band and strictly inside the angle range.
    pub fn contains(&self, p: Vector) -> bool {
        let diff = p - self.origin;
        let distance = diff.length();
        let angle = vector::angle(diff.x, diff.y);
        distance >= self.radius
            && distance < self.radius + self.width
            && angle > self.start_angle
            && angle < self.end_angle
    }

    pub fn collide_body(&self, colliding: &Body, restitution: f64) -> Option<Collision> {
        let mut collision = Collision::new(restitution);
        for vertex in colliding.corners() {
            if !self.contains(vertex) {
                continue;
            }
            let diff = self.origin - vertex;
            let distance = diff.length();
            collision.push(CollisionPoint::new(
                colliding.id(),
                self.id,
                diff * (1.0 / distance),
                vertex,
                distance - self.radius,
            ));
        }

        if collision.is_empty() {
            None
        } else {
            Some(collision)
        }
    }
}

impl Collidable for FixedArc {
    fn id(&self) -> BodyId {
        self.id
    }

    fn origin(&self) -> Vector {
        self.origin
    }

    fn velocity(&self) -> Vector {
        Vector::zero()
    }

    fn angular_velocity(&self) -> f64 {
        0.0
    }

    fn inverted_mass(&self) -> f64 {
        0.0
    }

    fn inverted_inertia(&self) -> f64 {
        0.0
    }

    fn add_velocity(&mut self, _velocity: Vector) {}

    fn add_angular_velocity(&mut self, _angular_velocity: f64) {}

    fn collide(&self, colliding: &Body, _timestep: f64, restitution: f64) -> Option<Collision> {
        self.collide_body(colliding, restitution)
    }
}
