mod common;

use approx::assert_relative_eq;
use common::demo_runtime;
use skelvis_rs::{AnimationController, PreviewError, TrackState};

fn elapsed(controller: &AnimationController) -> f32 {
    match controller.state() {
        TrackState::Playing { elapsed, .. } => elapsed,
        TrackState::Idle => panic!("controller is idle"),
    }
}

#[test]
fn looping_clip_wraps_elapsed() {
    let mut runtime = demo_runtime();
    let mut controller = AnimationController::new();
    controller.switch_to(&mut runtime, "idle", true, 0.0).unwrap();

    for _ in 0..10 {
        controller.tick(&mut runtime, 0.5);
        assert!(elapsed(&controller) < 2.0);
    }
    assert_relative_eq!(elapsed(&controller), 1.0, epsilon = 1e-5);
}

#[test]
fn switching_resets_elapsed() {
    let mut runtime = demo_runtime();
    let mut controller = AnimationController::new();
    controller.switch_to(&mut runtime, "idle", true, 0.0).unwrap();
    controller.tick(&mut runtime, 1.3);

    controller.switch_to(&mut runtime, "idle", true, 0.0).unwrap();
    assert_eq!(
        controller.state(),
        TrackState::Playing { clip: "idle".into(), elapsed: 0.0 }
    );

    controller.tick(&mut runtime, 0.4);
    controller.switch_to(&mut runtime, "walk", true, 0.0).unwrap();
    assert_eq!(
        controller.state(),
        TrackState::Playing { clip: "walk".into(), elapsed: 0.0 }
    );
}

#[test]
fn unknown_clip_is_rejected_without_side_effects() {
    let mut runtime = demo_runtime();
    let mut controller = AnimationController::new();

    assert_eq!(
        controller.switch_to(&mut runtime, "not-a-real-clip", true, 0.0),
        Err(PreviewError::ClipNotFound("not-a-real-clip".into()))
    );
    assert_eq!(controller.state(), TrackState::Idle);

    controller.switch_to(&mut runtime, "walk", true, 0.0).unwrap();
    controller.tick(&mut runtime, 0.3);
    let before = controller.state();
    let pose_before = runtime.instance().bones().to_vec();

    assert!(controller.switch_to(&mut runtime, "not-a-real-clip", true, 0.0).is_err());
    assert_eq!(controller.state(), before);
    assert_eq!(runtime.instance().bones(), pose_before.as_slice());
}

#[test]
fn one_shot_clip_stops_at_its_end() {
    let mut runtime = demo_runtime();
    let mut controller = AnimationController::new();
    controller.switch_to(&mut runtime, "walk", false, 0.0).unwrap();

    controller.tick(&mut runtime, 0.75);
    controller.tick(&mut runtime, 0.75);
    assert_eq!(elapsed(&controller), 1.0);
    assert!(controller.track().unwrap().is_complete());
}

#[test]
fn walk_moves_the_hip() {
    let mut runtime = demo_runtime();
    let mut controller = AnimationController::new();
    let hip = runtime.data().find_bone("hip").unwrap();
    let setup_y = runtime.data().bones[hip].y;

    controller.switch_to(&mut runtime, "walk", true, 0.0).unwrap();
    controller.tick(&mut runtime, 0.25);
    runtime.recompute_world_transform();

    let [_, y] = runtime.instance().bones()[hip].world_point([0.0, 0.0]);
    assert_relative_eq!(y, setup_y + 3.0, epsilon = 1e-4);
}
