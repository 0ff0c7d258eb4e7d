//! Browser-side facade tests. Run with `wasm-pack test --headless --chrome`.
#![cfg(target_arch = "wasm32")]

use planar_physics::PhysicsWorld;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn rejected_input_surfaces_as_js_errors() {
    let mut world = PhysicsWorld::new();
    world.add_body(0, 0.0, 0.0, 0.1, 0.1, 0.0, 1.0).expect("unique id");

    let err = world
        .add_fixed_circle(0, 1.0, 1.0, 0.5)
        .expect_err("duplicate id");
    assert!(err.as_string().is_some_and(|e| e.contains('0')));

    assert!(world.add_body(1, 0.0, 0.0, 0.1, 0.1, 0.0, 0.0).is_err());
    assert!(world.load_settings(r#"{"restitution": 2}"#.to_string()).is_err());
    assert!(world.load_settings("not json".to_string()).is_err());
    assert_eq!(world.moving_count(), 1);
    assert_eq!(world.fixed_count(), 0);
}

#[wasm_bindgen_test]
fn advance_steps_in_the_browser() {
    let mut world = PhysicsWorld::new();
    world.add_body(0, 0.0, 0.0, 0.1, 0.1, 0.0, 1.0).expect("unique id");
    world.set_velocity(0, 1.0, 0.0);

    world.advance(0.0).expect("steps");
    assert_eq!(world.advance(50.0).expect("steps"), 4);
    assert!(world.body_pose(0).is_some_and(|pose| pose[0] > 0.0));
}
