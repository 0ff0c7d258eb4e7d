use wasm_bindgen::prelude::*;

use crate::systems::collision::SolverReport;

/// Counters of the last `advance` call, summed over its sub-steps.
///
/// A direct `advance_by_timestep` or `collide` call replaces them with the
/// counters of that single pass. Counters saturate at `u32::MAX`.
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepStats {
    pub(super) substeps: u32,
    pub(super) pairwise_collisions: u32,
    pub(super) merged_collisions: u32,
    pub(super) contact_points: u32,
    pub(super) solver_iterations: u32,
    pub(super) unconverged_collisions: u32,
    pub(super) detect_ms: f64,
    pub(super) solve_ms: f64,
    pub(super) advance_ms: f64,
}

impl StepStats {
    pub(crate) fn reset(&mut self) {
        *self = StepStats::default();
    }

    pub(crate) fn record_detection(&mut self, pairwise: usize, merged: usize, points: usize) {
        self.pairwise_collisions = self.pairwise_collisions.saturating_add(count(pairwise));
        self.merged_collisions = self.merged_collisions.saturating_add(count(merged));
        self.contact_points = self.contact_points.saturating_add(count(points));
    }

    pub(crate) fn record_solve(&mut self, report: &SolverReport) {
        self.solver_iterations = self.solver_iterations.saturating_add(report.iterations);
        if !report.converged {
            self.unconverged_collisions = self.unconverged_collisions.saturating_add(1);
        }
    }
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[wasm_bindgen]
impl StepStats {
    #[wasm_bindgen(getter)]
    pub fn substeps(&self) -> u32 { self.substeps }
    #[wasm_bindgen(getter)]
    pub fn pairwise_collisions(&self) -> u32 { self.pairwise_collisions }
    #[wasm_bindgen(getter)]
    pub fn merged_collisions(&self) -> u32 { self.merged_collisions }
    #[wasm_bindgen(getter)]
    pub fn contact_points(&self) -> u32 { self.contact_points }
    #[wasm_bindgen(getter)]
    pub fn solver_iterations(&self) -> u32 { self.solver_iterations }
    #[wasm_bindgen(getter)]
    pub fn unconverged_collisions(&self) -> u32 { self.unconverged_collisions }
    /// Time spent finding and merging contacts
    #[wasm_bindgen(getter)]
    pub fn detect_ms(&self) -> f64 { self.detect_ms }
    /// Time spent applying forces and running the solver
    #[wasm_bindgen(getter)]
    pub fn solve_ms(&self) -> f64 { self.solve_ms }
    /// Whole `advance`, hooks included
    #[wasm_bindgen(getter)]
    pub fn advance_ms(&self) -> f64 { self.advance_ms }
}
