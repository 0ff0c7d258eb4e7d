use crate::core::Vector;
use crate::systems::collision::{Collision, CollisionPoint};

use super::{Body, BodyId, Collidable};

/// Immovable disc
#[derive(Clone, Debug)]
pub struct FixedCircle {
    id: BodyId,
    origin: Vector,
    radius: f64,
}

impl FixedCircle {
    pub fn new(id: BodyId, origin: Vector, radius: f64) -> Self {
        Self { id, origin, radius }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Corners inside the disc first; if none, check each edge of the body
    /// along its normal through the circle's centre to catch a graze.
    pub fn collide_body(&self, colliding: &Body, restitution: f64) -> Option<Collision> {
        let mut collision = Collision::new(restitution);

        for vertex in colliding.corners() {
            let diff = vertex - self.origin;
            let distance = diff.length();
            if distance <= self.radius {
                // from centre towards the corner
                let normal = diff * (1.0 / distance);
                collision.push(CollisionPoint::new(
                    colliding.id(),
                    self.id,
                    normal,
                    vertex,
                    self.radius - distance,
                ));
            }
        }

        if collision.is_empty() {
            for edge in 0..4 {
                if let Some(point) = self.edge_contact(colliding, edge) {
                    collision.push(point);
                    break;
                }
            }
        }

        if collision.is_empty() {
            None
        } else {
            Some(collision)
        }
    }

    fn edge_contact(&self, colliding: &Body, edge: usize) -> Option<CollisionPoint> {
        let p1 = colliding.corner(edge);
        let p2 = colliding.corner(edge + 1);

        let direction = p2 - p1;
        let d = direction * (1.0 / direction.length());
        let normal = Vector::new(-d.y, d.x);

        let q1 = self.origin;
        let q2 = self.origin + normal * self.radius;

        // p1 + r (p2 - p1) = q1 + t (q2 - q1)
        let a11 = p2.x - p1.x;
        let a12 = q1.x - q2.x;
        let a21 = p2.y - p1.y;
        let a22 = q1.y - q2.y;
        let b1 = q1.x - p1.x;
        let b2 = q1.y - p1.y;
        let det = 1.0 / (a11 * a22 - a12 * a21);
        let r = det * (a22 * b1 - a12 * b2);
        let t = det * (a11 * b2 - a21 * b1);

        if (0.0..=1.0).contains(&r) && (0.0..=1.0).contains(&t) {
            let contact = p1 + direction * r;
            Some(CollisionPoint::new(colliding.id(), self.id, normal, contact, 0.0))
        } else {
            None
        }
    }
}

impl Collidable for FixedCircle {
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
