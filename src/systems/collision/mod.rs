//! Collisions and their resolution
//!
//! A `Collision` holds one or more contact points. Straight out of detection
//! it holds the contacts between two entities; after [`Collision::merge_collisions`]
//! it holds every contact of a connected group. With contacts
//!
//! ```text
//! A <-> B
//! B <-> C
//! D <-> E
//! ```
//!
//! detection yields three collisions and merging yields two: `A-B-C` and
//! `D-E`. Each merged collision is then resolved as a unit by
//! [`Collision::apply`], so impulses travel through the whole chain.

mod point;
mod solver;

pub use point::CollisionPoint;
pub use solver::{ContactEntities, SolverParams, SolverReport};

use std::collections::BTreeMap;

use crate::core::UnionFind;
use crate::systems::shapes::BodyId;

#[derive(Clone, Debug)]
pub struct Collision {
    restitution: f64,
    points: Vec<CollisionPoint>,
}

impl Collision {
    pub fn new(restitution: f64) -> Self {
        Self { restitution, points: Vec::new() }
    }

    pub fn restitution(&self) -> f64 {
        self.restitution
    }

    pub fn points(&self) -> &[CollisionPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn push(&mut self, point: CollisionPoint) {
        self.points.push(point);
    }

    /// Appends `other`'s points, keeping this collision's restitution.
    pub fn merge(&mut self, other: Collision) {
        self.points.extend(other.points);
    }

    /// Every id touched by this collision, in first-seen order.
    pub fn entity_ids(&self) -> Vec<BodyId> {
        let mut ids = Vec::new();
        for point in &self.points {
            for id in [point.colliding(), point.impacted()] {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }
        ids
    }

    /// Groups collisions that share an entity into one collision each.
    ///
    /// Components are keyed by the pair in each collision's first point and
    /// come back ordered by root id; within a component points keep their
    /// encounter order.
    pub fn merge_collisions(collisions: Vec<Collision>) -> Vec<Collision> {
        if collisions.len() <= 1 {
            return collisions;
        }

        let mut union_find = UnionFind::new();
        for collision in &collisions {
            if let Some(cp) = collision.points.first() {
                union_find.union(cp.colliding(), cp.impacted());
            }
        }

        let mut merged: BTreeMap<BodyId, Collision> = BTreeMap::new();
        for collision in collisions {
            let Some(cp) = collision.points.first() else {
                continue;
            };
            let component = union_find.find(cp.colliding());
            match merged.get_mut(&component) {
                Some(existing) => existing.merge(collision),
                None => {
                    merged.insert(component, collision);
                }
            }
        }

        merged.into_values().collect()
    }
}
