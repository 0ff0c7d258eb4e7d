use crate::systems::shapes::Collidable;

use super::Scene;

/// Host callbacks around stepping. Every method has a no-op default.
pub trait StateHooks {
    /// Pair filter, asked in both orders before a pair is tested.
    fn collide_bodies(&self, _a: &dyn Collidable, _b: &dyn Collidable) -> bool {
        true
    }

    /// Before the clock is read, once per `advance`.
    fn pre_advance(&mut self, _now: f64, _scene: &mut Scene) {}

    /// After each fixed sub-step, with its length in seconds.
    fn post_step(&mut self, _timestep: f64, _scene: &mut Scene) {}

    /// Once per `advance`, however many sub-steps ran.
    fn post_advance(&mut self, _now: f64, _scene: &mut Scene) {}
}

impl StateHooks for () {}
