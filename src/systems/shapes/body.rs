use std::f64::consts::PI;

use crate::core::Vector;
use crate::systems::collision::{Collision, CollisionPoint};

use super::{BodyId, Collidable};

/// Tolerance of the corner containment test.
pub const CONTACT_EPSILON: f64 = 1e-5;

/// Mass of a body. Fixed bodies carry `Infinite` and never move when impacted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mass {
    Finite(f64),
    Infinite,
}

impl Mass {
    pub fn inverted(&self) -> f64 {
        match *self {
            Mass::Finite(m) => 1.0 / m,
            Mass::Infinite => 0.0,
        }
    }
}

/// Oriented rectangle. Movable with finite mass, fixed with infinite mass.
///
/// Configure with the setters, then call [`Body::finalize`] once before the
/// body takes part in a simulation step. Corners are cached and only valid
/// after `finalize`, `advance` or `calculate_corners` ran since the last change
/// of origin, angle or dimension.
#[derive(Clone, Debug)]
pub struct Body {
    id: BodyId,
    origin: Vector,
    /// Radians, wrapped into (-π, π] by `advance`
    angle: f64,
    /// Full width and height
    dimension: Vector,
    mass: Mass,
    inertia: f64,
    velocity: Vector,
    angular_velocity: f64,

    // === Drive ===
    force: Vector,
    angular_force: f64,
    target: Option<Vector>,
    thrust: f64,
    target_angle: Option<f64>,
    angle_thrust: f64,

    // === Per-step decay ===
    lateral_friction: f64,
    rotational_friction: f64,

    corners: [Vector; 4],
    finalized: bool,
}

impl Body {
    /// Movable body with unit mass and a 0.1 x 0.1 footprint.
    pub fn new(id: BodyId) -> Self {
        Self {
            id,
            origin: Vector::zero(),
            angle: 0.0,
            dimension: Vector::new(0.1, 0.1),
            mass: Mass::Finite(1.0),
            inertia: 0.0,
            velocity: Vector::zero(),
            angular_velocity: 0.0,
            force: Vector::zero(),
            angular_force: 0.0,
            target: None,
            thrust: 2.0,
            target_angle: None,
            angle_thrust: 0.02,
            lateral_friction: 1.0,
            rotational_friction: 1.0,
            corners: [Vector::zero(); 4],
            finalized: false,
        }
    }

    /// Body with infinite mass.
    pub fn fixed(id: BodyId) -> Self {
        let mut body = Self::new(id);
        body.mass = Mass::Infinite;
        body
    }

    /// Computes inertia and corners. Call after configuring the body.
    pub fn finalize(&mut self) -> &mut Self {
        self.inertia = match self.mass {
            Mass::Finite(m) => {
                (self.dimension.x * self.dimension.x + self.dimension.y * self.dimension.y) * m
                    / 12.0
            }
            Mass::Infinite => f64::INFINITY,
        };
        self.calculate_corners();
        self.finalized = true;
        self
    }

    // === Setters ===

    pub fn set_origin(&mut self, x: f64, y: f64) -> &mut Self {
        self.origin.set(x, y);
        self
    }

    pub fn set_angle(&mut self, angle: f64) -> &mut Self {
        self.angle = angle;
        self
    }

    pub fn set_dimension(&mut self, width: f64, height: f64) -> &mut Self {
        self.dimension.set(width, height);
        self
    }

    /// Sets a finite mass. Use [`Body::fixed`] for an immovable body.
    pub fn set_mass(&mut self, mass: f64) -> &mut Self {
        self.mass = Mass::Finite(mass);
        self
    }

    pub fn set_velocity(&mut self, x: f64, y: f64) -> &mut Self {
        self.velocity.set(x, y);
        self
    }

    pub fn set_angular_velocity(&mut self, w: f64) -> &mut Self {
        self.angular_velocity = w;
        self
    }

    pub fn set_force(&mut self, x: f64, y: f64) -> &mut Self {
        self.force.set(x, y);
        self
    }

    pub fn set_angular_force(&mut self, a: f64) -> &mut Self {
        self.angular_force = a;
        self
    }

    /// Steer towards `(x, y)`. While set, `force` is ignored.
    pub fn set_target(&mut self, x: f64, y: f64) -> &mut Self {
        self.target = Some(Vector::new(x, y));
        self
    }

    pub fn unset_target(&mut self) -> &mut Self {
        self.target = None;
        self
    }

    /// Turn towards `angle`. While set, `angular_force` is ignored.
    pub fn set_target_angle(&mut self, angle: f64) -> &mut Self {
        self.target_angle = Some(angle);
        self
    }

    pub fn unset_target_angle(&mut self) -> &mut Self {
        self.target_angle = None;
        self
    }

    pub fn set_thrust(&mut self, thrust: f64) -> &mut Self {
        self.thrust = thrust;
        self
    }

    pub fn set_angle_thrust(&mut self, thrust: f64) -> &mut Self {
        self.angle_thrust = thrust;
        self
    }

    pub fn set_lateral_friction(&mut self, friction: f64) -> &mut Self {
        self.lateral_friction = friction;
        self
    }

    pub fn set_rotational_friction(&mut self, friction: f64) -> &mut Self {
        self.rotational_friction = friction;
        self
    }

    // === Getters ===

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn origin(&self) -> Vector {
        self.origin
    }

    pub fn velocity(&self) -> Vector {
        self.velocity
    }

    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn dimension(&self) -> Vector {
        self.dimension
    }

    pub fn mass(&self) -> Mass {
        self.mass
    }

    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    pub fn force(&self) -> Vector {
        self.force
    }

    pub fn angular_force(&self) -> f64 {
        self.angular_force
    }

    pub fn target(&self) -> Option<Vector> {
        self.target
    }

    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    pub fn target_angle(&self) -> Option<f64> {
        self.target_angle
    }

    pub fn has_target_angle(&self) -> bool {
        self.target_angle.is_some()
    }

    pub fn lateral_friction(&self) -> f64 {
        self.lateral_friction
    }

    pub fn rotational_friction(&self) -> f64 {
        self.rotational_friction
    }

    pub fn is_fixed(&self) -> bool {
        self.mass == Mass::Infinite
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn corners(&self) -> [Vector; 4] {
        self.corners
    }

    pub fn corner(&self, index: usize) -> Vector {
        self.corners[index & 3]
    }

    /// Outward unit normal of edge `index` (corner `index` to `index + 1`).
    ///
    /// Edges 0..4 are top, left, bottom, right in the body's frame. A zero
    /// length edge yields NaN components.
    pub fn edge_normal(&self, index: usize) -> Vector {
        let c1 = self.corners[index & 3];
        let c2 = self.corners[(index + 1) & 3];
        let edge = c1 - c2;
        let n = edge * (1.0 / edge.length());
        Vector::new(-n.y, n.x)
    }

    /// True if `p` lies inside the rectangle (borders included).
    pub fn contains_point(&self, p: Vector) -> bool {
        let local = (p - self.origin).rotated(-self.angle);
        local.x.abs() <= self.dimension.x * 0.5 && local.y.abs() <= self.dimension.y * 0.5
    }

    // === Stepping ===

    /// Accumulates drive forces into velocity, then applies friction decay.
    pub fn apply_forces(&mut self, timestep: f64) {
        let inverted_mass = self.inverted_mass();
        match self.target {
            Some(target) => {
                let mut force = target - self.origin;
                let len = force.length();
                // already there
                if len > 0.0 {
                    force.scale(self.thrust / len);
                    self.velocity += force * (timestep * inverted_mass);
                }
            }
            None => self.velocity += self.force * (timestep * inverted_mass),
        }

        let inverted_inertia = self.inverted_inertia();
        match self.target_angle {
            Some(target_angle) => {
                let delta = target_angle - self.angle;
                if delta != 0.0 {
                    let force = self.angle_thrust * delta.signum();
                    self.angular_velocity += force * timestep * inverted_inertia;
                }
            }
            None => self.angular_velocity += self.angular_force * timestep * inverted_inertia,
        }

        self.velocity.scale((1.0 - timestep * self.lateral_friction).max(0.0));
        self.angular_velocity *= (1.0 - timestep * self.rotational_friction).max(0.0);
    }

    /// Integrates origin and angle over `timestep`, then refreshes corners.
    pub fn advance(&mut self, timestep: f64) {
        self.origin += self.velocity * timestep;

        self.angle += self.angular_velocity * timestep;
        if self.angle > PI {
            self.angle -= 2.0 * PI;
        } else if self.angle <= -PI {
            self.angle += 2.0 * PI;
        }

        self.calculate_corners();
    }

    pub fn calculate_corners(&mut self) {
        let (sin, cos) = self.angle.sin_cos();
        let direction = Vector::new(cos, sin);
        let tangent = Vector::new(-sin, cos);
        let along = direction * (self.dimension.x * 0.5);
        let across = tangent * (self.dimension.y * 0.5);

        self.corners[0] = self.origin + along + across;
        self.corners[1] = self.origin - along + across;
        self.corners[2] = self.origin - along - across;
        self.corners[3] = self.origin + along - across;
    }

    // === Collision ===

    /// Tests `colliding`'s corners against this body, then the reverse if
    /// fewer than two contacts were found. `self` is the impacted body.
    pub fn collide_body(
        &self,
        colliding: &Body,
        timestep: f64,
        restitution: f64,
    ) -> Option<Collision> {
        let mut collision = Collision::new(restitution);
        self.collide_all_corners(&mut collision, colliding, timestep);

        if collision.len() < 2 {
            colliding.collide_all_corners(&mut collision, self, timestep);
        }

        if collision.is_empty() {
            None
        } else {
            Some(collision)
        }
    }

    fn collide_all_corners(&self, collision: &mut Collision, colliding: &Body, timestep: f64) {
        for corner in 0..4 {
            if let Some(point) = self.collide_single_corner(colliding, corner, timestep) {
                collision.push(point);
            }
        }
    }

    /// Contact of one corner of `colliding` with this body, if any.
    ///
    /// The normal is picked from the edges the corner moves towards during
    /// `timestep`; if it moves towards none, the nearest edge wins.
    pub fn collide_single_corner(
        &self,
        colliding: &Body,
        corner: usize,
        timestep: f64,
    ) -> Option<CollisionPoint> {
        let vertex = colliding.corner(corner);

        // this body's frame
        let local = (vertex - self.origin).rotated(-self.angle);

        let half_length = self.dimension.x * 0.5;
        let half_width = self.dimension.y * 0.5;
        if local.x < -half_length - CONTACT_EPSILON
            || local.x > half_length + CONTACT_EPSILON
            || local.y < -half_width - CONTACT_EPSILON
            || local.y > half_width + CONTACT_EPSILON
        {
            return None;
        }

        let r1 = vertex - colliding.origin;
        let r2 = vertex - self.origin;
        let relative_velocity = colliding.velocity + r1.spin(colliding.angular_velocity)
            - self.velocity
            - r2.spin(self.angular_velocity);
        let relative_move = (relative_velocity * timestep).rotated(-self.angle);

        // top
        let mut separation = half_width - local.y;
        let mut min_separation = separation;
        let mut min_edge = 0;
        let mut approaching = 0u8;
        if separation < -relative_move.y {
            approaching = 1;
        }

        // left
        separation = half_length + local.x;
        if separation < relative_move.x {
            approaching |= 2;
        }
        if separation < min_separation {
            min_separation = separation;
            min_edge = 1;
        }

        // bottom
        separation = half_width + local.y;
        if separation < relative_move.y {
            approaching |= 4;
        }
        if separation < min_separation {
            min_separation = separation;
            min_edge = 2;
        }

        // right
        separation = half_length - local.x;
        if separation < -relative_move.x {
            approaching |= 8;
        }
        if separation < min_separation {
            min_separation = separation;
            min_edge = 3;
        }

        let normal = if approaching > 0 {
            let mut normal = Vector::zero();
            for edge in (0..4).filter(|edge| approaching & (1 << edge) != 0) {
                normal += self.edge_normal(edge);
            }
            if approaching.count_ones() > 1 {
                normal.scale(1.0 / normal.length());
            }
            normal
        } else {
            self.edge_normal(min_edge)
        };

        Some(CollisionPoint::new(
            colliding.id,
            self.id,
            normal,
            vertex,
            min_separation,
        ))
    }
}

impl Body {
    pub fn inverted_mass(&self) -> f64 {
        self.mass.inverted()
    }

    pub fn inverted_inertia(&self) -> f64 {
        if self.is_fixed() || self.inertia == 0.0 {
            0.0
        } else {
            1.0 / self.inertia
        }
    }

    pub fn add_velocity(&mut self, velocity: Vector) {
        self.velocity += velocity;
    }

    pub fn add_angular_velocity(&mut self, angular_velocity: f64) {
        self.angular_velocity += angular_velocity;
    }
}

impl Collidable for Body {
    fn id(&self) -> BodyId {
        self.id
    }

    fn origin(&self) -> Vector {
        self.origin
    }

    fn velocity(&self) -> Vector {
        self.velocity
    }

    fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    fn inverted_mass(&self) -> f64 {
        Body::inverted_mass(self)
    }

    fn inverted_inertia(&self) -> f64 {
        Body::inverted_inertia(self)
    }

    fn add_velocity(&mut self, velocity: Vector) {
        Body::add_velocity(self, velocity);
    }

    fn add_angular_velocity(&mut self, angular_velocity: f64) {
        Body::add_angular_velocity(self, angular_velocity);
    }

    fn collide(&self, colliding: &Body, timestep: f64, restitution: f64) -> Option<Collision> {
        self.collide_body(colliding, timestep, restitution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn finalize_computes_inertia_and_corners() {
        let mut body = Body::new(0);
        body.set_dimension(0.3, 0.4).set_mass(2.0).set_origin(1.0, 1.0).finalize();

        assert!(close(body.inertia(), (0.09 + 0.16) * 2.0 / 12.0));
        assert!(close(body.inverted_inertia(), 1.0 / body.inertia()));
        assert!(close(body.inverted_mass(), 0.5));

        let c = body.corners();
        assert_eq!(c[0], Vector::new(1.15, 1.2));
        assert_eq!(c[1], Vector::new(0.85, 1.2));
        assert_eq!(c[2], Vector::new(0.85, 0.8));
        assert_eq!(c[3], Vector::new(1.15, 0.8));
    }

    #[test]
    fn fixed_body_reports_zero_inverses() {
        let mut body = Body::fixed(3);
        body.set_dimension(1.0, 2.0).finalize();
        assert!(body.is_fixed());
        assert_eq!(body.inverted_mass(), 0.0);
        assert_eq!(body.inverted_inertia(), 0.0);
    }

    #[test]
    fn edge_normals_point_outward() {
        let mut body = Body::new(0);
        body.set_dimension(2.0, 1.0).finalize();
        let expected = [
            Vector::new(0.0, 1.0),
            Vector::new(-1.0, 0.0),
            Vector::new(0.0, -1.0),
            Vector::new(1.0, 0.0),
        ];
        for (edge, want) in expected.iter().enumerate() {
            let n = body.edge_normal(edge);
            assert!(close(n.x, want.x) && close(n.y, want.y), "edge {edge}: {n}");
        }
    }

    #[test]
    fn zero_dimension_edge_normal_is_nan() {
        // degenerate geometry is not guarded
        let mut body = Body::new(0);
        body.set_dimension(0.0, 0.0).finalize();
        assert!(body.edge_normal(0).x.is_nan());
    }

    #[test]
    fn advance_wraps_angle() {
        let mut body = Body::new(0);
        body.set_angle(PI - 0.01).set_angular_velocity(2.0).finalize();
        body.advance(0.01);
        assert!(close(body.angle(), -PI + 0.01));

        let mut body = Body::new(1);
        body.set_angle(-PI + 0.005).set_angular_velocity(-1.0).finalize();
        body.advance(0.01);
        assert!(body.angle() > 0.0 && body.angle() <= PI);
    }

    #[test]
    fn resting_body_stays_put() {
        let mut body = Body::new(0);
        body.set_origin(0.5, -0.25).set_angle(0.3).finalize();
        for _ in 0..100 {
            body.apply_forces(0.01);
            body.advance(0.01);
        }
        assert_eq!(body.origin(), Vector::new(0.5, -0.25));
        assert_eq!(body.angle(), 0.3);
    }

    #[test]
    fn target_overrides_force() {
        let mut body = Body::new(0);
        body.set_force(-100.0, 0.0).set_target(0.0, 1.0).set_lateral_friction(0.0).finalize();
        body.apply_forces(0.5);
        // thrust 2 towards +y for half a second at unit mass
        assert!(close(body.velocity().x, 0.0));
        assert!(close(body.velocity().y, 1.0));

        body.unset_target();
        assert!(!body.has_target());
        body.apply_forces(0.5);
        assert!(close(body.velocity().x, -50.0));
    }

    #[test]
    fn target_angle_turns_towards_goal() {
        let mut body = Body::new(0);
        body.set_target_angle(FRAC_PI_2).set_rotational_friction(0.0).finalize();
        body.apply_forces(0.1);
        assert!(body.angular_velocity() > 0.0);
        assert!(close(body.angular_velocity(), 0.02 * 0.1 * body.inverted_inertia()));
    }

    #[test]
    fn friction_decay_never_reverses_velocity() {
        let mut body = Body::new(0);
        body.set_velocity(1.0, 0.0).set_lateral_friction(500.0).finalize();
        body.apply_forces(0.01);
        assert_eq!(body.velocity(), Vector::zero());
    }

    #[test]
    fn separated_bodies_do_not_collide() {
        let mut a = Body::new(0);
        a.finalize();
        let mut b = Body::new(1);
        b.set_origin(0.5, 0.0).finalize();
        assert!(a.collide(&b, 0.01, 1.0).is_none());
        assert!(b.collide(&a, 0.01, 1.0).is_none());
    }

    #[test]
    fn corner_moving_into_left_edge_gets_left_normal() {
        let mut wall = Body::fixed(1);
        wall.set_origin(0.2, 0.0).set_dimension(0.1, 2.0).finalize();

        // right corners of the box touch the wall's left edge at x = 0.15
        let mut body = Body::new(0);
        body.set_origin(0.1, 0.0).set_velocity(2.0, 0.0).finalize();

        let collision = wall.collide(&body, 0.01, 1.0).expect("touching");
        assert_eq!(collision.len(), 2);
        for point in collision.points() {
            assert_eq!(point.colliding(), 0);
            assert_eq!(point.impacted(), 1);
            assert!(close(point.normal().x, -1.0), "normal {}", point.normal());
            assert!(close(point.normal().y, 0.0));
            assert!(point.separation().abs() < 1e-9);
        }
    }

    #[test]
    fn single_contact_falls_back_to_reverse_test() {
        // a diamond whose tip pokes into the top of a wide box
        let mut floor = Body::fixed(1);
        floor.set_dimension(1.0, 0.1).finalize();
        let mut tip = Body::new(0);
        let half_diagonal = 0.05 * 2f64.sqrt();
        tip.set_origin(0.0, 0.05 + half_diagonal - 0.001)
            .set_angle(PI / 4.0)
            .finalize();

        let collision = floor.collide(&tip, 0.01, 1.0).expect("tip inside floor");
        assert_eq!(collision.len(), 1);
        let point = &collision.points()[0];
        assert!(close(point.normal().y, 1.0));
        assert!(close(point.separation(), 0.001));
    }
}
