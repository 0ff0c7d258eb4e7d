use std::f64::consts::PI;

use planar_physics::{
    Body, BodyId, Collidable, FixedArc, FixedCircle, FixedLine, State, StateHooks, Vector,
};

fn moving(id: BodyId, x: f64, y: f64, vx: f64, vy: f64) -> Body {
    let mut body = Body::new(id);
    body.set_origin(x, y).set_velocity(vx, vy).finalize();
    body
}

fn run(state: &mut State<impl StateHooks>, steps: usize) {
    for _ in 0..steps {
        state.advance_by_timestep(0.01).expect("steps");
    }
}

#[test]
fn separated_scene_has_no_collisions() {
    let mut state = State::new();
    state.add_moving_body(moving(0, 0.0, 0.0, 0.0, 0.0)).expect("unique");
    state.add_moving_body(moving(1, 1.0, 0.0, 0.0, 0.0)).expect("unique");
    state
        .add_fixed_shape(FixedCircle::new(2, Vector::new(0.0, 2.0), 0.5))
        .expect("unique");
    state
        .add_fixed_shape(FixedLine::new(3, Vector::new(-5.0, -1.0), Vector::new(5.0, -1.0)))
        .expect("unique");
    state
        .add_fixed_shape(FixedArc::new(4, Vector::zero(), 3.0, 0.2, 0.0, PI))
        .expect("unique");

    assert!(state.collide(0.01).is_empty());
}

#[test]
fn body_falls_onto_line_and_bounces() {
    let mut state = State::new();
    let mut body = Body::new(0);
    body.set_origin(0.0, 0.5)
        .set_force(0.0, -9.81)
        .set_lateral_friction(0.0)
        .finalize();
    state.add_moving_body(body).expect("unique");
    state
        .add_fixed_shape(FixedLine::new(1, Vector::new(-1.0, 0.0), Vector::new(1.0, 0.0)))
        .expect("unique");

    let mut lowest = f64::MAX;
    let mut bounced = false;
    for _ in 0..60 {
        run(&mut state, 1);
        let body = state.body(0).expect("registered");
        for corner in body.corners() {
            lowest = lowest.min(corner.y);
        }
        bounced |= body.velocity().y > 0.0;
    }

    assert!(bounced);
    // never sinks more than a couple of sub-steps of travel below the line
    assert!(lowest > -0.1, "lowest = {lowest}");
}

#[test]
fn circle_deflects_approaching_body() {
    let mut state = State::new();
    state.add_moving_body(moving(0, -0.5, 0.0, 3.0, 0.0)).expect("unique");
    state
        .add_fixed_shape(FixedCircle::new(1, Vector::zero(), 0.2))
        .expect("unique");

    let mut contacts = 0;
    for _ in 0..40 {
        run(&mut state, 1);
        contacts += state.stats().contact_points();
    }
    assert!(contacts > 0);
    assert!(state.body(0).expect("registered").velocity().x < 0.0);
}

#[test]
fn arc_band_catches_corner_inside_its_angle_range() {
    let arc = FixedArc::new(5, Vector::zero(), 1.0, 0.2, 0.0, PI / 2.0);

    // corner 2 (bottom left) sits at 45 degrees, just past the inner radius
    let corner = Vector::new(1.05, 0.0).rotated(PI / 4.0);
    let mut inside = Body::new(0);
    inside.set_origin(corner.x + 0.05, corner.y + 0.05).finalize();
    let collision = arc.collide(&inside, 0.01, 1.0).expect("corner in band");
    assert!(collision.points().iter().all(|p| p.impacted() == 5));
    // normal points from the corner back to the centre
    let normal = collision.points()[0].normal();
    assert!(normal.x < 0.0 && normal.y < 0.0);

    let past = Vector::new(1.05, 0.0).rotated(PI / 2.0 + 0.05);
    let mut outside = Body::new(1);
    outside
        .set_origin(past.x + 0.005, past.y + 0.005)
        .set_dimension(0.01, 0.01)
        .finalize();
    assert!(arc.collide(&outside, 0.01, 1.0).is_none());
}

#[test]
fn identical_runs_are_identical() {
    fn build() -> State {
        let mut state = State::new();
        for i in 0..6 {
            let x = (i % 3) as f64 * 0.12;
            let y = (i / 3) as f64 * 0.12;
            let mut body = Body::new(i);
            body.set_origin(x, y)
                .set_angle(0.1 * i as f64)
                .set_target(0.12, 0.06)
                .finalize();
            state.add_moving_body(body).expect("unique");
        }
        let mut floor = Body::fixed(100);
        floor.set_origin(0.12, -0.2).set_dimension(1.0, 0.1).finalize();
        state.add_fixed_shape(floor).expect("unique");
        state
    }

    let mut a = build();
    let mut b = build();
    a.advance(0.0).expect("steps");
    b.advance(0.0).expect("steps");
    for frame in 1..=30 {
        let now = frame as f64 * 16.7;
        a.advance(now).expect("steps");
        b.advance(now).expect("steps");
    }

    for (x, y) in a.moving_bodies().iter().zip(b.moving_bodies()) {
        assert_eq!(x.origin(), y.origin());
        assert_eq!(x.angle(), y.angle());
        assert_eq!(x.velocity(), y.velocity());
    }
    let (sa, sb) = (a.stats(), b.stats());
    assert_eq!(sa.substeps(), sb.substeps());
    assert_eq!(sa.contact_points(), sb.contact_points());
    assert_eq!(sa.solver_iterations(), sb.solver_iterations());
}

/// Only bodies in the same group collide.
struct Groups {
    group_of: fn(BodyId) -> u32,
}

impl StateHooks for Groups {
    fn collide_bodies(&self, a: &dyn Collidable, b: &dyn Collidable) -> bool {
        (self.group_of)(a.id()) == (self.group_of)(b.id())
    }
}

#[test]
fn hooks_filter_by_group() {
    let mut state = State::with_hooks(Groups {
        group_of: |id| id % 2,
    });
    // 0 and 1 overlap but are in different groups; 0 and 2 touch
    state.add_moving_body(moving(0, 0.0, 0.0, 0.0, 0.0)).expect("unique");
    state.add_moving_body(moving(1, 0.05, 0.0, 0.0, 0.0)).expect("unique");
    state.add_moving_body(moving(2, -0.1, 0.0, 0.0, 0.0)).expect("unique");

    let collisions = state.collide(0.01);
    assert_eq!(collisions.len(), 1);
    let mut ids = collisions[0].entity_ids();
    ids.sort_unstable();
    assert_eq!(ids, vec![0, 2]);
}
