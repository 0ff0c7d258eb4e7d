use crate::core::{vector, Vector};
use crate::systems::collision::{Collision, CollisionPoint};

use super::{Body, BodyId, Collidable};

/// Immovable one-sided segment. Corners behind the normal are pushed out.
#[derive(Clone, Debug)]
pub struct FixedLine {
    id: BodyId,
    start: Vector,
    end: Vector,
    /// Unit, left of the direction start -> end
    normal: Vector,
    length: f64,
    angle: f64,
}

/// Which sides of a line a body's corners are on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineOverlap {
    /// At least one corner in front of the line (normal side)
    pub left_of: bool,
    /// At least one corner behind the line
    pub right_of: bool,
    pub overlaps: bool,
}

impl FixedLine {
    pub fn new(id: BodyId, start: Vector, end: Vector) -> Self {
        let diff = end - start;
        let length = diff.length();
        Self {
            id,
            start,
            end,
            normal: Vector::new(-diff.y, diff.x) * (1.0 / length),
            length,
            angle: vector::angle(diff.x, diff.y),
        }
    }

    pub fn start(&self) -> Vector {
        self.start
    }

    pub fn end(&self) -> Vector {
        self.end
    }

    pub fn normal(&self) -> Vector {
        self.normal
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// `p` in the line's frame: x along the line from `start`, y along the normal.
    fn to_local(&self, p: Vector) -> Vector {
        (p - self.start).rotated(-self.angle)
    }

    pub fn collide_body(&self, colliding: &Body, restitution: f64) -> Option<Collision> {
        let mut collision = Collision::new(restitution);
        for vertex in colliding.corners() {
            let local = self.to_local(vertex);
            if local.x >= 0.0 && local.x <= self.length && local.y < 0.0 {
                collision.push(CollisionPoint::new(
                    colliding.id(),
                    self.id,
                    self.normal,
                    vertex,
                    -local.y,
                ));
            }
        }

        if collision.is_empty() {
            None
        } else {
            Some(collision)
        }
    }

    /// Reports whether `body` straddles the line within its extent.
    pub fn overlaps(&self, body: &Body) -> LineOverlap {
        let mut result = LineOverlap::default();
        for vertex in body.corners() {
            let local = self.to_local(vertex);
            if local.x >= 0.0 && local.x <= self.length {
                result.left_of |= local.y >= 0.0;
                result.right_of |= local.y < 0.0;
            }
        }
        result.overlaps = result.left_of && result.right_of;
        result
    }
}

impl Collidable for FixedLine {
    fn id(&self) -> BodyId {
        self.id
    }

    fn origin(&self) -> Vector {
        self.start
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

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> FixedLine {
        // normal points up
        FixedLine::new(7, Vector::new(-1.0, 0.0), Vector::new(1.0, 0.0))
    }

    fn body_at(x: f64, y: f64) -> Body {
        let mut body = Body::new(0);
        body.set_origin(x, y).finalize();
        body
    }

    #[test]
    fn geometry_is_precomputed() {
        let line = floor();
        assert_eq!(line.length(), 2.0);
        assert_eq!(line.angle(), 0.0);
        assert_eq!(line.normal(), Vector::new(-0.0, 1.0));
        assert_eq!(line.origin(), line.start());
    }

    #[test]
    fn corners_below_line_collide() {
        let line = floor();
        assert!(line.collide(&body_at(0.0, 0.2), 0.01, 1.0).is_none());

        let collision = line.collide(&body_at(0.0, 0.03), 0.01, 1.0).expect("sunk");
        assert_eq!(collision.len(), 2);
        for point in collision.points() {
            assert_eq!(point.normal(), line.normal());
            assert!((point.separation() - 0.02).abs() < 1e-12);
        }
    }

    #[test]
    fn corners_beyond_extent_are_ignored() {
        let line = floor();
        assert!(line.collide(&body_at(1.5, -0.01), 0.01, 1.0).is_none());
    }

    #[test]
    fn overlaps_detects_straddling() {
        let line = floor();
        let above = line.overlaps(&body_at(0.0, 0.2));
        assert!(above.left_of && !above.right_of && !above.overlaps);

        let across = line.overlaps(&body_at(0.0, 0.0));
        assert!(across.overlaps);

        let outside = line.overlaps(&body_at(3.0, 0.0));
        assert_eq!(outside, LineOverlap::default());
    }

    #[test]
    fn coincident_endpoints_give_nan_normal() {
        // degenerate geometry is not guarded
        let line = FixedLine::new(1, Vector::new(1.0, 1.0), Vector::new(1.0, 1.0));
        assert_eq!(line.length(), 0.0);
        assert!(line.normal().x.is_nan());
    }
}
