//! Planar Physics - deterministic 2D rigid-body kernel in WASM
//!
//! Oriented boxes collide with each other and with static boxes, circles,
//! arcs and lines. Simultaneous contacts are grouped per connected set of
//! bodies and resolved by a sequential impulse solver on a fixed timestep.
//!
//! Architecture:
//! - core/        - Vector math, union-find, logging macros
//! - domain/      - Settings
//! - systems/     - Shapes, collision detection and the solver
//! - simulation/  - Scene, hooks and fixed-step orchestration
//! - api/         - Public API

// Logging macros (must be first for macro export!)
#[macro_use]
pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;
pub mod api;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    console_log!("Planar physics {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use api::wasm::PhysicsWorld;
pub use crate::core::{UnionFind, Vector};
pub use domain::Settings;
pub use simulation::{Scene, State, StateHooks, StepStats};
pub use systems::collision::{Collision, CollisionPoint, ContactEntities, SolverParams, SolverReport};
pub use systems::shapes::{
    Body, BodyId, Collidable, FixedArc, FixedCircle, FixedLine, LineOverlap, Mass, Shape,
};
