#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::systems::collision::Collision;
use crate::systems::shapes::Collidable;

use super::{Scene, StateHooks};

/// One shape test scheduled for a sub-step. Indices point into the scene's lists;
/// the colliding side is always a moving body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Pair {
    Moving { impacted: usize, colliding: usize },
    Fixed { impacted: usize, colliding: usize },
}

fn allowed<H: StateHooks>(hooks: &H, a: &dyn Collidable, b: &dyn Collidable) -> bool {
    hooks.collide_bodies(a, b) && hooks.collide_bodies(b, a)
}

/// Moving pairs `(i, j)` with `i < j` first, then every fixed shape against every moving body.
pub(crate) fn candidate_pairs<H: StateHooks>(scene: &Scene, hooks: &H) -> Vec<Pair> {
    let moving = scene.moving_bodies();
    let fixed = scene.fixed_bodies();
    let mut pairs = Vec::new();

    for (i, first) in moving.iter().enumerate() {
        for (j, second) in moving.iter().enumerate().skip(i + 1) {
            if allowed(hooks, first, second) {
                pairs.push(Pair::Moving { impacted: i, colliding: j });
            }
        }
    }

    for (i, shape) in fixed.iter().enumerate() {
        for (j, body) in moving.iter().enumerate() {
            if allowed(hooks, shape, body) {
                pairs.push(Pair::Fixed { impacted: i, colliding: j });
            }
        }
    }

    pairs
}

fn test_pair(scene: &Scene, pair: Pair, timestep: f64, restitution: f64) -> Option<Collision> {
    let moving = scene.moving_bodies();
    match pair {
        Pair::Moving { impacted, colliding } => {
            moving[impacted].collide_body(&moving[colliding], timestep, restitution)
        }
        Pair::Fixed { impacted, colliding } => {
            scene.fixed_bodies()[impacted].collide(&moving[colliding], timestep, restitution)
        }
    }
}

/// Runs the shape tests; results come back in `pairs` order.
pub(crate) fn detect(scene: &Scene, pairs: &[Pair], timestep: f64, restitution: f64) -> Vec<Collision> {
    #[cfg(feature = "parallel")]
    {
        pairs
            .par_iter()
            .filter_map(|&pair| test_pair(scene, pair, timestep, restitution))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        pairs
            .iter()
            .filter_map(|&pair| test_pair(scene, pair, timestep, restitution))
            .collect()
    }
}
