use crate::core::Vector;
use crate::systems::shapes::{BodyId, Collidable};

/// One point of contact between two entities.
///
/// Entities are referenced by id. The normal is a unit vector pointing from
/// the impacted entity towards the colliding one.
#[derive(Clone, Debug)]
pub struct CollisionPoint {
    colliding: BodyId,
    impacted: BodyId,
    normal: Vector,
    contact_point: Vector,
    /// Penetration depth, diagnostic only
    separation: f64,

    /// Clamped impulse sum over the iterations of one solve
    pub(crate) accumulated_impulse: f64,

    // === Velocity changes buffered during one solver iteration ===
    nv1: Vector,
    nw1: f64,
    nv2: Vector,
    nw2: f64,
}

impl CollisionPoint {
    pub fn new(
        colliding: BodyId,
        impacted: BodyId,
        normal: Vector,
        contact_point: Vector,
        separation: f64,
    ) -> Self {
        Self {
            colliding,
            impacted,
            normal,
            contact_point,
            separation,
            accumulated_impulse: 0.0,
            nv1: Vector::zero(),
            nw1: 0.0,
            nv2: Vector::zero(),
            nw2: 0.0,
        }
    }

    pub fn colliding(&self) -> BodyId {
        self.colliding
    }

    pub fn impacted(&self) -> BodyId {
        self.impacted
    }

    pub fn normal(&self) -> Vector {
        self.normal
    }

    pub fn contact_point(&self) -> Vector {
        self.contact_point
    }

    pub fn separation(&self) -> f64 {
        self.separation
    }

    pub fn accumulated_impulse(&self) -> f64 {
        self.accumulated_impulse
    }

    /// Effective mass along the normal for this pair of entities.
    pub fn normal_mass(&self, colliding: &dyn Collidable, impacted: &dyn Collidable) -> f64 {
        let r1 = colliding.origin() - self.contact_point;
        let r2 = impacted.origin() - self.contact_point;

        let cp1 = r1.cross(self.normal);
        let cp2 = r2.cross(self.normal);
        1.0 / (colliding.inverted_mass()
            + impacted.inverted_mass()
            + cp1 * cp1 * colliding.inverted_inertia()
            + cp2 * cp2 * impacted.inverted_inertia())
    }

    pub(crate) fn add_temp_velocities(&mut self, v1: Vector, w1: f64, v2: Vector, w2: f64) {
        self.nv1 += v1;
        self.nw1 += w1;
        self.nv2 += v2;
        self.nw2 += w2;
    }

    /// Hands out the buffered deltas `(v1, w1, v2, w2)` and clears them.
    pub(crate) fn take_temp_velocities(&mut self) -> (Vector, f64, Vector, f64) {
        let deltas = (self.nv1, self.nw1, self.nv2, self.nw2);
        self.nv1.clear();
        self.nw1 = 0.0;
        self.nv2.clear();
        self.nw2 = 0.0;
        deltas
    }
}
