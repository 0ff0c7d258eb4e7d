//! Simulation state - fixed-timestep stepping of one scene
//!
//! Every `advance(now)` turns host time into zero or more fixed sub-steps.
//! A sub-step detects contacts, merges them per connected group, applies
//! forces, resolves the groups with impulses and finally integrates positions.
//!
//! Hosts customize stepping through [`StateHooks`] instead of subclassing.

use crate::domain::Settings;
use crate::systems::collision::Collision;
use crate::systems::shapes::{Body, BodyId, Shape};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/step_stats.rs"]
mod step_stats;
#[path = "scene/scene.rs"]
mod scene;
#[path = "scene/hooks.rs"]
mod hooks;
#[path = "step/clock.rs"]
mod clock;
#[path = "step/narrow_phase.rs"]
mod narrow_phase;
#[path = "step/step.rs"]
mod step;

pub use hooks::StateHooks;
pub use scene::Scene;
pub use step_stats::StepStats;

use clock::Clock;
use perf_timer::PhaseTimer;

pub struct State<H: StateHooks = ()> {
    scene: Scene,
    hooks: H,
    settings: Settings,
    clock: Clock,
    stats: StepStats,
}

impl State {
    pub fn new() -> Self {
        State::with_hooks(())
    }
}

impl Default for State {
    fn default() -> Self {
        State::new()
    }
}

impl<H: StateHooks> State<H> {
    pub fn with_hooks(hooks: H) -> Self {
        State {
            scene: Scene::new(),
            hooks,
            settings: Settings::default(),
            clock: Clock::default(),
            stats: StepStats::default(),
        }
    }

    // === Settings ===

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) -> Result<(), String> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    pub fn load_settings_json(&mut self, json: &str) -> Result<(), String> {
        let settings = Settings::from_json(json)?;
        console_log!(
            "settings loaded: restitution {}, timestep {} ms, {} iterations",
            settings.restitution,
            settings.fixed_timestep_ms,
            settings.max_iterations
        );
        self.settings = settings;
        Ok(())
    }

    // === Scene ===

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Registers a finalized body that will be stepped.
    pub fn add_moving_body(&mut self, body: Body) -> Result<(), String> {
        self.scene.add_moving_body(body).map_err(|e| {
            console_warn!("rejected moving body: {e}");
            e
        })
    }

    /// Registers a static obstacle: a fixed body, circle, arc or line.
    pub fn add_fixed_shape(&mut self, shape: impl Into<Shape>) -> Result<(), String> {
        self.scene.add_fixed_shape(shape.into()).map_err(|e| {
            console_warn!("rejected fixed shape: {e}");
            e
        })
    }

    pub fn remove(&mut self, id: BodyId) -> Option<Shape> {
        self.scene.remove(id)
    }

    pub fn moving_bodies(&self) -> &[Body] {
        self.scene.moving_bodies()
    }

    pub fn moving_bodies_mut(&mut self) -> &mut [Body] {
        self.scene.moving_bodies_mut()
    }

    pub fn fixed_bodies(&self) -> &[Shape] {
        self.scene.fixed_bodies()
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.scene.body(id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.scene.body_mut(id)
    }

    /// Drops every entity and restarts the clock on the next `advance`.
    pub fn clear(&mut self) {
        self.scene.clear();
        self.clock.reset();
        self.stats.reset();
    }

    // === Hooks & stats ===

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    pub fn stats(&self) -> &StepStats {
        &self.stats
    }

    /// Timestamp of the first `advance`, if there was one.
    pub fn started_at(&self) -> Option<f64> {
        self.clock.start()
    }

    // === Stepping ===

    /// Runs as many fixed sub-steps as fit into the time since the last call.
    /// Returns the number of sub-steps.
    pub fn advance(&mut self, now: f64) -> Result<u32, String> {
        step::advance(self, now)
    }

    /// One sub-step of `timestep` seconds. Stats then describe this sub-step.
    pub fn advance_by_timestep(&mut self, timestep: f64) -> Result<(), String> {
        self.stats.reset();
        step::advance_by_timestep(self, timestep)
    }

    /// Detects and merges this sub-step's collisions without resolving them.
    /// Stats then describe this detection pass only.
    pub fn collide(&mut self, timestep: f64) -> Vec<Collision> {
        self.stats.reset();
        step::collide(self, timestep)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
