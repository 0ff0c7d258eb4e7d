use std::collections::HashMap;

use crate::systems::collision::ContactEntities;
use crate::systems::shapes::{Body, BodyId, Collidable, Shape};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    Moving(usize),
    Fixed(usize),
}

/// Moving bodies and static shapes of one simulation, addressable by id.
///
/// Registration order is kept; it is the order pairs are tested in.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    moving: Vec<Body>,
    fixed: Vec<Shape>,
    index: HashMap<BodyId, Slot>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_moving_body(&mut self, body: Body) -> Result<(), String> {
        self.check_new(body.id())?;
        if !body.is_finalized() {
            return Err(format!("body {} was not finalized", body.id()));
        }
        self.index.insert(body.id(), Slot::Moving(self.moving.len()));
        self.moving.push(body);
        Ok(())
    }

    pub fn add_fixed_shape(&mut self, shape: Shape) -> Result<(), String> {
        self.check_new(shape.id())?;
        if let Shape::Body(body) = &shape {
            if !body.is_finalized() {
                return Err(format!("body {} was not finalized", body.id()));
            }
            if !body.is_fixed() {
                return Err(format!("fixed body {} must have infinite mass", body.id()));
            }
        }
        self.index.insert(shape.id(), Slot::Fixed(self.fixed.len()));
        self.fixed.push(shape);
        Ok(())
    }

    fn check_new(&self, id: BodyId) -> Result<(), String> {
        if self.index.contains_key(&id) {
            return Err(format!("id {id} is already registered"));
        }
        Ok(())
    }

    /// Takes an entity out of the scene; a moving body comes back as `Shape::Body`.
    pub fn remove(&mut self, id: BodyId) -> Option<Shape> {
        let removed = match self.index.remove(&id)? {
            Slot::Moving(i) => Shape::Body(self.moving.remove(i)),
            Slot::Fixed(i) => self.fixed.remove(i),
        };
        self.reindex();
        Some(removed)
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (i, body) in self.moving.iter().enumerate() {
            self.index.insert(body.id(), Slot::Moving(i));
        }
        for (i, shape) in self.fixed.iter().enumerate() {
            self.index.insert(shape.id(), Slot::Fixed(i));
        }
    }

    pub fn clear(&mut self) {
        self.moving.clear();
        self.fixed.clear();
        self.index.clear();
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn moving_bodies(&self) -> &[Body] {
        &self.moving
    }

    /// Ids are immutable, so handing out the slice keeps the index valid.
    pub fn moving_bodies_mut(&mut self) -> &mut [Body] {
        &mut self.moving
    }

    pub fn fixed_bodies(&self) -> &[Shape] {
        &self.fixed
    }

    pub fn moving_count(&self) -> usize {
        self.moving.len()
    }

    pub fn fixed_count(&self) -> usize {
        self.fixed.len()
    }

    /// Moving body or fixed rectangle with this id.
    pub fn body(&self, id: BodyId) -> Option<&Body> {
        match *self.index.get(&id)? {
            Slot::Moving(i) => self.moving.get(i),
            Slot::Fixed(i) => self.fixed.get(i).and_then(Shape::as_body),
        }
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        match *self.index.get(&id)? {
            Slot::Moving(i) => self.moving.get_mut(i),
            Slot::Fixed(i) => self.fixed.get_mut(i).and_then(Shape::as_body_mut),
        }
    }

    pub fn fixed_shape(&self, id: BodyId) -> Option<&Shape> {
        match *self.index.get(&id)? {
            Slot::Fixed(i) => self.fixed.get(i),
            Slot::Moving(_) => None,
        }
    }
}

impl ContactEntities for Scene {
    fn entity(&self, id: BodyId) -> Option<&dyn Collidable> {
        match *self.index.get(&id)? {
            Slot::Moving(i) => self.moving.get(i).map(|b| b as &dyn Collidable),
            Slot::Fixed(i) => self.fixed.get(i).map(|s| s as &dyn Collidable),
        }
    }

    fn entity_mut(&mut self, id: BodyId) -> Option<&mut dyn Collidable> {
        match *self.index.get(&id)? {
            Slot::Moving(i) => self.moving.get_mut(i).map(|b| b as &mut dyn Collidable),
            Slot::Fixed(i) => self.fixed.get_mut(i).map(|s| s as &mut dyn Collidable),
        }
    }
}
