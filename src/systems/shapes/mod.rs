//! Collidable entities
//!
//! `Body` is an oriented rectangle that moves (finite mass) or stays put
//! (infinite mass). `FixedCircle`, `FixedArc` and `FixedLine` are static
//! obstacles. All of them share the [`Collidable`] capability the solver works
//! against; [`Shape`] packs them into one value for the fixed-shape list.

mod body;
mod fixed_arc;
mod fixed_circle;
mod fixed_line;

pub use body::{Body, Mass, CONTACT_EPSILON};
pub use fixed_arc::FixedArc;
pub use fixed_circle::FixedCircle;
pub use fixed_line::{FixedLine, LineOverlap};

use crate::core::Vector;
use crate::systems::collision::Collision;

/// Host-assigned entity id, unique within one simulation.
pub type BodyId = u32;

/// What the solver needs from an entity taking part in a contact.
pub trait Collidable {
    fn id(&self) -> BodyId;
    fn origin(&self) -> Vector;
    fn velocity(&self) -> Vector;
    fn angular_velocity(&self) -> f64;
    /// Zero for immovable entities
    fn inverted_mass(&self) -> f64;
    /// Zero for entities that cannot rotate
    fn inverted_inertia(&self) -> f64;
    fn add_velocity(&mut self, velocity: Vector);
    fn add_angular_velocity(&mut self, angular_velocity: f64);

    /// Contacts of `colliding`'s geometry with `self`, which is the impacted side.
    fn collide(&self, colliding: &Body, timestep: f64, restitution: f64) -> Option<Collision>;
}

/// Any entity that can sit in the fixed-shape list.
#[derive(Clone, Debug)]
pub enum Shape {
    Body(Body),
    Circle(FixedCircle),
    Arc(FixedArc),
    Line(FixedLine),
}

impl Shape {
    pub fn as_body(&self) -> Option<&Body> {
        match self {
            Shape::Body(body) => Some(body),
            _ => None,
        }
    }

    pub fn as_body_mut(&mut self) -> Option<&mut Body> {
        match self {
            Shape::Body(body) => Some(body),
            _ => None,
        }
    }

    fn inner(&self) -> &dyn Collidable {
        match self {
            Shape::Body(body) => body,
            Shape::Circle(circle) => circle,
            Shape::Arc(arc) => arc,
            Shape::Line(line) => line,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Collidable {
        match self {
            Shape::Body(body) => body,
            Shape::Circle(circle) => circle,
            Shape::Arc(arc) => arc,
            Shape::Line(line) => line,
        }
    }
}

impl Collidable for Shape {
    fn id(&self) -> BodyId {
        self.inner().id()
    }

    fn origin(&self) -> Vector {
        self.inner().origin()
    }

    fn velocity(&self) -> Vector {
        self.inner().velocity()
    }

    fn angular_velocity(&self) -> f64 {
        self.inner().angular_velocity()
    }

    fn inverted_mass(&self) -> f64 {
        self.inner().inverted_mass()
    }

    fn inverted_inertia(&self) -> f64 {
        self.inner().inverted_inertia()
    }

    fn add_velocity(&mut self, velocity: Vector) {
        self.inner_mut().add_velocity(velocity);
    }

    fn add_angular_velocity(&mut self, angular_velocity: f64) {
        self.inner_mut().add_angular_velocity(angular_velocity);
    }

    fn collide(&self, colliding: &Body, timestep: f64, restitution: f64) -> Option<Collision> {
        self.inner().collide(colliding, timestep, restitution)
    }
}

impl From<Body> for Shape {
    fn from(body: Body) -> Self {
        Shape::Body(body)
    }
}

impl From<FixedCircle> for Shape {
    fn from(circle: FixedCircle) -> Self {
        Shape::Circle(circle)
    }
}

impl From<FixedArc> for Shape {
    fn from(arc: FixedArc) -> Self {
        Shape::Arc(arc)
    }
}

impl From<FixedLine> for Shape {
    fn from(line: FixedLine) -> Self {
        Shape::Line(line)
    }
}
