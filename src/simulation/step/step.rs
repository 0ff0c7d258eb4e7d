use crate::systems::collision::Collision;

use super::narrow_phase::{candidate_pairs, detect};
use super::{PhaseTimer, State, StateHooks};

pub(super) fn advance<H: StateHooks>(state: &mut State<H>, now: f64) -> Result<u32, String> {
    let timer = PhaseTimer::start();
    state.stats.reset();
    state.hooks.pre_advance(now, &mut state.scene);

    let step_ms = state.settings.fixed_timestep_ms;
    let timestep = state.settings.fixed_timestep();
    let mut pending = state.clock.pending(now, state.settings.max_frame_ms);

    let mut substeps = 0;
    while pending > step_ms {
        advance_by_timestep(state, timestep)?;
        state.hooks.post_step(timestep, &mut state.scene);
        pending -= step_ms;
        substeps += 1;
    }
    state.clock.finish(now, pending);
    state.stats.substeps = substeps;

    state.hooks.post_advance(now, &mut state.scene);
    state.stats.advance_ms = timer.total_ms();
    Ok(substeps)
}

pub(super) fn advance_by_timestep<H: StateHooks>(
    state: &mut State<H>,
    timestep: f64,
) -> Result<(), String> {
    let mut timer = PhaseTimer::start();
    let collisions = collide(state, timestep);
    state.stats.detect_ms += timer.lap_ms();

    for body in state.scene.moving_bodies_mut() {
        body.apply_forces(timestep);
    }

    let params = state.settings.solver_params();
    for mut collision in collisions {
        let report = collision.apply(&mut state.scene, &params)?;
        state.stats.record_solve(&report);
    }
    state.stats.solve_ms += timer.lap_ms();

    for body in state.scene.moving_bodies_mut() {
        body.advance(timestep);
    }
    Ok(())
}

pub(super) fn collide<H: StateHooks>(state: &mut State<H>, timestep: f64) -> Vec<Collision> {
    let pairs = candidate_pairs(&state.scene, &state.hooks);
    let pairwise = detect(&state.scene, &pairs, timestep, state.settings.restitution);
    let pairwise_count = pairwise.len();

    let merged = Collision::merge_collisions(pairwise);
    let points = merged.iter().map(Collision::len).sum();
    state.stats.record_detection(pairwise_count, merged.len(), points);
    merged
}
