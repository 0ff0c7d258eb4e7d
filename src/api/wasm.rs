use wasm_bindgen::prelude::*;

use crate::core::Vector;
use crate::simulation::{State, StepStats};
use crate::systems::shapes::{Body, BodyId, FixedArc, FixedCircle, FixedLine};

/// JavaScript handle to one simulation.
///
/// Kinematic setters return `false` for unknown ids and fixed bodies.
#[wasm_bindgen]
pub struct PhysicsWorld {
    state: State,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl PhysicsWorld {
    /// Create an empty world with default settings
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { state: State::new() }
    }

    pub fn load_settings(&mut self, json: String) -> Result<(), JsValue> {
        self.state
            .load_settings_json(&json)
            .map_err(|e| JsValue::from_str(&e))?;
        Ok(())
    }

    pub fn settings_json(&self) -> String {
        self.state.settings().to_json()
    }

    // === REGISTRATION ===

    /// Add a moving box. `mass` must be positive.
    #[allow(clippy::too_many_arguments)]
    pub fn add_body(
        &mut self,
        id: BodyId,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        angle: f64,
        mass: f64,
    ) -> Result<(), JsValue> {
        if !(mass > 0.0) {
            return Err(JsValue::from_str(&format!("body {id} needs a positive mass, got {mass}")));
        }
        let mut body = Body::new(id);
        body.set_origin(x, y)
            .set_dimension(width, height)
            .set_angle(angle)
            .set_mass(mass)
            .finalize();
        self.state
            .add_moving_body(body)
            .map_err(|e| JsValue::from_str(&e))
    }

    /// Add an immovable box
    pub fn add_fixed_body(
        &mut self,
        id: BodyId,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        angle: f64,
    ) -> Result<(), JsValue> {
        let mut body = Body::fixed(id);
        body.set_origin(x, y)
            .set_dimension(width, height)
            .set_angle(angle)
            .finalize();
        self.state
            .add_fixed_shape(body)
            .map_err(|e| JsValue::from_str(&e))
    }

    pub fn add_fixed_circle(&mut self, id: BodyId, x: f64, y: f64, radius: f64) -> Result<(), JsValue> {
        self.state
            .add_fixed_shape(FixedCircle::new(id, Vector::new(x, y), radius))
            .map_err(|e| JsValue::from_str(&e))
    }

    /// Angles in radians within [0, 2π); the band does not wrap past 2π.
    #[allow(clippy::too_many_arguments)]
    pub fn add_fixed_arc(
        &mut self,
        id: BodyId,
        x: f64,
        y: f64,
        radius: f64,
        width: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> Result<(), JsValue> {
        let arc = FixedArc::new(id, Vector::new(x, y), radius, width, start_angle, end_angle);
        self.state
            .add_fixed_shape(arc)
            .map_err(|e| JsValue::from_str(&e))
    }

    /// Bodies collide with the side the left-hand normal of start -> end points away from.
    pub fn add_fixed_line(
        &mut self,
        id: BodyId,
        start_x: f64,
        start_y: f64,
        end_x: f64,
        end_y: f64,
    ) -> Result<(), JsValue> {
        let line = FixedLine::new(id, Vector::new(start_x, start_y), Vector::new(end_x, end_y));
        self.state
            .add_fixed_shape(line)
            .map_err(|e| JsValue::from_str(&e))
    }

    /// Remove a body or shape. Returns false for unknown ids.
    pub fn remove(&mut self, id: BodyId) -> bool {
        self.state.remove(id).is_some()
    }

    pub fn clear(&mut self) {
        self.state.clear();
    }

    // === KINEMATICS ===

    pub fn set_velocity(&mut self, id: BodyId, x: f64, y: f64) -> bool {
        self.with_body(id, |body| {
            body.set_velocity(x, y);
        })
    }

    pub fn set_angular_velocity(&mut self, id: BodyId, w: f64) -> bool {
        self.with_body(id, |body| {
            body.set_angular_velocity(w);
        })
    }

    pub fn set_force(&mut self, id: BodyId, x: f64, y: f64) -> bool {
        self.with_body(id, |body| {
            body.set_force(x, y);
        })
    }

    pub fn set_angular_force(&mut self, id: BodyId, force: f64) -> bool {
        self.with_body(id, |body| {
            body.set_angular_force(force);
        })
    }

    /// Steer towards a point; overrides the force while set
    pub fn set_target(&mut self, id: BodyId, x: f64, y: f64) -> bool {
        self.with_body(id, |body| {
            body.set_target(x, y);
        })
    }

    pub fn clear_target(&mut self, id: BodyId) -> bool {
        self.with_body(id, |body| {
            body.unset_target();
        })
    }

    /// Turn towards an angle; overrides the angular force while set
    pub fn set_target_angle(&mut self, id: BodyId, angle: f64) -> bool {
        self.with_body(id, |body| {
            body.set_target_angle(angle);
        })
    }

    pub fn clear_target_angle(&mut self, id: BodyId) -> bool {
        self.with_body(id, |body| {
            body.unset_target_angle();
        })
    }

    /// Per-second decay of linear and angular velocity
    pub fn set_friction(&mut self, id: BodyId, lateral: f64, rotational: f64) -> bool {
        self.with_body(id, |body| {
            body.set_lateral_friction(lateral).set_rotational_friction(rotational);
        })
    }

    // === STEPPING ===

    /// Step to host time `now` (ms). Returns the number of sub-steps run.
    pub fn advance(&mut self, now: f64) -> Result<u32, JsValue> {
        self.state.advance(now).map_err(|e| JsValue::from_str(&e))
    }

    /// Stats of the last `advance`
    pub fn stats(&self) -> StepStats {
        self.state.stats().clone()
    }

    // === QUERIES ===

    /// `[x, y, angle]` of a body
    pub fn body_pose(&self, id: BodyId) -> Option<Vec<f64>> {
        let body = self.state.body(id)?;
        let origin = body.origin();
        Some(vec![origin.x, origin.y, body.angle()])
    }

    /// Corner positions as `[x0, y0, x1, y1, x2, y2, x3, y3]`
    pub fn body_corners(&self, id: BodyId) -> Option<Vec<f64>> {
        let body = self.state.body(id)?;
        Some(body.corners().iter().flat_map(|c| [c.x, c.y]).collect())
    }

    #[wasm_bindgen(getter)]
    pub fn moving_count(&self) -> u32 {
        self.state.scene().moving_count() as u32
    }

    #[wasm_bindgen(getter)]
    pub fn fixed_count(&self) -> u32 {
        self.state.scene().fixed_count() as u32
    }
}

impl PhysicsWorld {
    fn with_body(&mut self, id: BodyId, f: impl FnOnce(&mut Body)) -> bool {
        match self.state.body_mut(id) {
            Some(body) if !body.is_fixed() => {
                f(body);
                true
            }
            _ => false,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }
}
