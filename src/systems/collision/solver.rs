//! Sequential impulse solver
//!
//! Each iteration computes a normal impulse for every contact against the
//! current velocities, clamps the running sum per contact to stay pushing,
//! buffers the resulting velocity changes and flushes them all at once at the
//! end of the iteration so the outcome does not depend on contact order.
//!
//! The target rebound is fixed on the first iteration as the closing velocity
//! scaled by restitution. Iteration stops once the summed impulse drops below
//! the tolerance, stops shrinking, or the iteration cap is reached.

use crate::core::Vector;
use crate::systems::shapes::{BodyId, Collidable, Shape};

use super::Collision;

/// Resolves contact ids to entities for the duration of one solve.
pub trait ContactEntities {
    fn entity(&self, id: BodyId) -> Option<&dyn Collidable>;
    fn entity_mut(&mut self, id: BodyId) -> Option<&mut dyn Collidable>;
}

impl ContactEntities for [Shape] {
    fn entity(&self, id: BodyId) -> Option<&dyn Collidable> {
        self.iter()
            .find(|shape| shape.id() == id)
            .map(|shape| shape as &dyn Collidable)
    }

    fn entity_mut(&mut self, id: BodyId) -> Option<&mut dyn Collidable> {
        self.iter_mut()
            .find(|shape| shape.id() == id)
            .map(|shape| shape as &mut dyn Collidable)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverParams {
    pub max_iterations: u32,
    /// Summed |impulse| per iteration at or below which the solve is done
    pub impulse_tolerance: f64,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            impulse_tolerance: 0.001,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SolverReport {
    pub iterations: u32,
    /// Sum of the accumulated impulse over all contacts
    pub total_impulse: f64,
    /// Last iteration ended within tolerance
    pub converged: bool,
}

fn missing(id: BodyId) -> String {
    format!("unknown entity id {id}")
}

impl Collision {
    /// Resolves all contacts of this collision by adjusting entity velocities.
    pub fn apply<E>(&mut self, entities: &mut E, params: &SolverParams) -> Result<SolverReport, String>
    where
        E: ContactEntities + ?Sized,
    {
        let restitution = self.restitution;
        let mut original_deltas = vec![Vector::zero(); self.points.len()];
        let mut iteration = 0;
        let mut accumulated = 0.0;
        let mut previous = f64::MAX;

        loop {
            if accumulated > 0.0 {
                previous = accumulated;
            }
            accumulated = 0.0;

            for (j, point) in self.points.iter_mut().enumerate() {
                let colliding = entities.entity(point.colliding()).ok_or_else(|| missing(point.colliding()))?;
                let impacted = entities.entity(point.impacted()).ok_or_else(|| missing(point.impacted()))?;

                let contact = point.contact_point();
                let normal = point.normal();
                let r1 = contact - colliding.origin();
                let r2 = contact - impacted.origin();
                let normal_mass = point.normal_mass(colliding, impacted);

                let delta = colliding.velocity() + r1.spin(colliding.angular_velocity())
                    - impacted.velocity()
                    - r2.spin(impacted.angular_velocity());

                if iteration == 0 {
                    original_deltas[j] = delta * restitution;
                }

                let mut normal_impulse =
                    -(original_deltas[j].dot(normal) + delta.dot(normal)) * normal_mass;

                // clamp: contacts push, never pull
                let before = point.accumulated_impulse;
                point.accumulated_impulse = (before + normal_impulse).max(0.0);
                normal_impulse = point.accumulated_impulse - before;
                accumulated += normal_impulse.abs();

                let impulse = normal * normal_impulse;
                let nv1 = impulse * colliding.inverted_mass();
                let nw1 = colliding.inverted_inertia() * r1.cross(impulse);
                let nv2 = -(impulse * impacted.inverted_mass());
                let nw2 = -impacted.inverted_inertia() * r2.cross(impulse);
                point.add_temp_velocities(nv1, nw1, nv2, nw2);
            }

            for point in self.points.iter_mut() {
                let (v1, w1, v2, w2) = point.take_temp_velocities();
                let colliding = entities
                    .entity_mut(point.colliding())
                    .ok_or_else(|| missing(point.colliding()))?;
                colliding.add_velocity(v1);
                colliding.add_angular_velocity(w1);
                let impacted = entities
                    .entity_mut(point.impacted())
                    .ok_or_else(|| missing(point.impacted()))?;
                impacted.add_velocity(v2);
                impacted.add_angular_velocity(w2);
            }

            iteration += 1;
            if accumulated <= params.impulse_tolerance
                || iteration >= params.max_iterations
                || accumulated > previous
            {
                break;
            }
        }

        let converged = accumulated <= params.impulse_tolerance;
        if !converged && iteration >= params.max_iterations {
            console_warn!(
                "solver hit {} iterations with {} contacts, residual impulse {}",
                iteration,
                self.points.len(),
                accumulated
            );
        }

        Ok(SolverReport {
            iterations: iteration,
            total_impulse: self.points.iter().map(|p| p.accumulated_impulse).sum(),
            converged,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::collision::CollisionPoint;
    use crate::systems::shapes::Body;

    fn body(id: BodyId, x: f64, vx: f64) -> Shape {
        let mut body = Body::new(id);
        body.set_origin(x, 0.0).set_velocity(vx, 0.0).finalize();
        Shape::Body(body)
    }

    fn velocity(shapes: &[Shape], id: BodyId) -> Vector {
        shapes.entity(id).map(|e| e.velocity()).unwrap_or_default()
    }

    #[test]
    fn equal_masses_swap_velocities_elastically() {
        let mut shapes = vec![body(0, 0.0, 1.0), body(1, 0.1, -1.0)];
        let (a, b) = (shapes[0].as_body().cloned(), shapes[1].as_body().cloned());
        let (a, b) = (a.expect("body"), b.expect("body"));

        let mut collision = b.collide_body(&a, 0.01, 1.0).expect("touching");
        assert_eq!(collision.len(), 2);

        let report = collision.apply(shapes.as_mut_slice(), &SolverParams::default()).expect("ids known");
        assert!(report.converged);
        assert!(report.iterations > 1 && report.iterations < 50);

        let va = velocity(&shapes, 0);
        let vb = velocity(&shapes, 1);
        assert!((va.x + 1.0).abs() < 1e-3, "va = {va}");
        assert!((vb.x - 1.0).abs() < 1e-3, "vb = {vb}");
        assert!(va.y.abs() < 1e-9 && vb.y.abs() < 1e-9);
        for shape in &shapes {
            assert!(shape.angular_velocity().abs() < 1e-9);
        }
    }

    #[test]
    fn resting_contact_needs_no_impulse() {
        let mut floor = Body::fixed(1);
        floor.set_origin(0.0, -0.1).set_dimension(1.0, 0.1).finalize();
        let mut shapes = vec![body(0, 0.0, 0.0), Shape::Body(floor)];

        let mut collision = Collision::new(1.0);
        collision.push(CollisionPoint::new(0, 1, Vector::new(0.0, 1.0), Vector::new(0.05, -0.05), 0.0));
        collision.push(CollisionPoint::new(0, 1, Vector::new(0.0, 1.0), Vector::new(-0.05, -0.05), 0.0));

        for _ in 0..3 {
            let report = collision.apply(shapes.as_mut_slice(), &SolverParams::default()).expect("ids known");
            assert_eq!(report.iterations, 1);
            assert_eq!(report.total_impulse, 0.0);
            assert!(report.converged);
        }
        assert_eq!(velocity(&shapes, 0), Vector::zero());
    }

    #[test]
    fn separating_contact_is_not_pulled_back() {
        let mut shapes = vec![body(0, 0.0, -1.0), body(1, 0.1, 1.0)];
        let mut collision = Collision::new(1.0);
        collision.push(CollisionPoint::new(0, 1, Vector::new(-1.0, 0.0), Vector::new(0.05, 0.0), 0.0));

        let report = collision.apply(shapes.as_mut_slice(), &SolverParams::default()).expect("ids known");
        assert_eq!(report.total_impulse, 0.0);
        assert_eq!(velocity(&shapes, 0).x, -1.0);
        assert_eq!(velocity(&shapes, 1).x, 1.0);
    }

    #[test]
    fn fixed_side_never_moves() {
        let mut wall = Body::fixed(1);
        wall.set_origin(0.1, 0.0).finalize();
        let mut shapes = vec![body(0, 0.0, 2.0), Shape::Body(wall)];
        let mut collision = Collision::new(0.5);
        collision.push(CollisionPoint::new(0, 1, Vector::new(-1.0, 0.0), Vector::new(0.05, 0.0), 0.0));

        collision.apply(shapes.as_mut_slice(), &SolverParams::default()).expect("ids known");
        assert_eq!(velocity(&shapes, 1), Vector::zero());
        assert!((velocity(&shapes, 0).x + 1.0).abs() < 1e-3);
    }

    #[test]
    fn iteration_cap_ends_an_unconverged_solve() {
        let mut shapes = vec![body(0, 0.0, 1.0), body(1, 0.1, -1.0)];
        let mut collision = Collision::new(1.0);
        collision.push(CollisionPoint::new(0, 1, Vector::new(-1.0, 0.0), Vector::new(0.05, 0.0), 0.0));

        let params = SolverParams { max_iterations: 1, impulse_tolerance: 0.0 };
        let report = collision.apply(shapes.as_mut_slice(), &params).expect("ids known");
        assert_eq!(report.iterations, 1);
        assert!(!report.converged);
        assert!((report.total_impulse - 2.0).abs() < 1e-12);
    }

    #[test]
    fn growing_impulse_stops_before_the_cap() {
        // box pinned between floor and ceiling; three stacked floor contacts
        // overshoot upwards and the ceiling then pushes back harder
        let mut floor = Body::fixed(1);
        floor.set_origin(0.0, -1.0).finalize();
        let mut ceiling = Body::fixed(2);
        ceiling.set_origin(0.0, 1.0).finalize();
        let mut boxed = Body::new(0);
        boxed.set_velocity(0.0, -1.0).finalize();
        let mut shapes = vec![Shape::Body(boxed), Shape::Body(floor), Shape::Body(ceiling)];

        let mut collision = Collision::new(0.0);
        for _ in 0..3 {
            collision.push(CollisionPoint::new(0, 1, Vector::new(0.0, 1.0), Vector::zero(), 0.0));
        }
        collision.push(CollisionPoint::new(0, 2, Vector::new(0.0, -1.0), Vector::zero(), 0.0));

        let report = collision.apply(shapes.as_mut_slice(), &SolverParams::default()).expect("ids known");
        assert_eq!(report.iterations, 2);
        assert!(!report.converged);
        assert_eq!(velocity(&shapes, 1), Vector::zero());
        assert_eq!(velocity(&shapes, 2), Vector::zero());
    }

    #[test]
    fn unknown_entity_is_an_error() {
        let mut shapes = vec![body(0, 0.0, 1.0)];
        let mut collision = Collision::new(1.0);
        collision.push(CollisionPoint::new(0, 42, Vector::new(-1.0, 0.0), Vector::zero(), 0.0));
        let err = collision.apply(shapes.as_mut_slice(), &SolverParams::default()).unwrap_err();
        assert!(err.contains("42"));
    }
}
