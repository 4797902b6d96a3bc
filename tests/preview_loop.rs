mod common;

use common::{Recorder, demo_dir, demo_request, tick_until_loaded};
use skelvis_rs::animation::AnimationRequest;
use skelvis_rs::loader::{AssetLoader, LoadRequest};
use skelvis_rs::render_loop::{PreviewEvent, RenderLoop, TickOutcome};
use skelvis_rs::{ManualTime, PreviewError, TrackState};
use approx::assert_relative_eq;
use tokio::runtime::Runtime;

fn elapsed(state: TrackState) -> f32 {
    match state {
        TrackState::Playing { elapsed, .. } => elapsed,
        TrackState::Idle => panic!("idle"),
    }
}

#[test]
fn end_to_end_compose_switch_tick() {
    let rt = Runtime::new().unwrap();
    let dir = demo_dir();
    let loader = AssetLoader::new(rt.handle().clone());
    let mut preview = RenderLoop::new(loader, demo_request(&dir), ManualTime::new(0.5));
    let mut sink = Recorder::default();

    assert_eq!(tick_until_loaded(&mut preview, &mut sink), TickOutcome::Drawn);
    assert_eq!(sink.prepared, 1);
    assert_eq!(sink.lists.len(), 1);

    let events = preview.drain_events();
    let ready = events
        .iter()
        .find_map(|e| match e {
            PreviewEvent::AssetReady(ready) => Some(ready.clone()),
            _ => None,
        })
        .expect("ready event");
    assert_eq!(ready.skin_fragment_names, ["body/a", "body/b", "hair/x"]);
    assert_eq!(ready.animation_clip_names, ["idle", "walk"]);

    let applied = preview
        .apply_skin(&skelvis_rs::SkinRequest::Many(vec!["body/b".into(), "hair/x".into()]))
        .unwrap();
    assert_eq!(applied.fragments.len(), 2);

    preview.switch_animation(&AnimationRequest::new("walk")).unwrap();
    assert_eq!(
        preview.animation().unwrap().state(),
        TrackState::Playing { clip: "walk".into(), elapsed: 0.0 }
    );

    assert_eq!(preview.tick(&mut sink), TickOutcome::Drawn);
    assert_eq!(
        preview.animation().unwrap().state(),
        TrackState::Playing { clip: "walk".into(), elapsed: 0.5 }
    );
    assert_eq!(sink.lists.len(), 2);
}

#[test]
fn every_drawn_tick_draws_once_after_one_recompute() {
    let rt = Runtime::new().unwrap();
    let dir = demo_dir();
    let request = demo_request(&dir).with_skins(["body/a", "hair/x"]).with_animation(AnimationRequest::new("walk"));
    let mut preview = RenderLoop::new(AssetLoader::new(rt.handle().clone()), request, ManualTime::new(0.1));
    let mut sink = Recorder::default();
    tick_until_loaded(&mut preview, &mut sink);

    let handle = preview.handle();
    for i in 0..6 {
        if i == 2 {
            handle.apply_many(["body/b"]).unwrap();
        }
        if i == 4 {
            handle.switch_to("idle", true, 0.0).unwrap();
        }
        let before = preview.runtime().unwrap().instance().world_revision();
        assert_eq!(preview.tick(&mut sink), TickOutcome::Drawn);
        let after = preview.runtime().unwrap().instance().world_revision();

        assert_eq!(after, before + 1, "exactly one recompute per tick");
        assert_eq!(sink.lists.last().unwrap().world_revision, after);
    }
    assert_eq!(sink.lists.len(), 7);
}

#[test]
fn initial_state_is_applied_before_ready_is_announced() {
    let rt = Runtime::new().unwrap();
    let dir = demo_dir();
    let request = demo_request(&dir)
        .with_skins(["body/a", "missing"])
        .with_animation(AnimationRequest::new("idle"));
    let mut preview = RenderLoop::new(AssetLoader::new(rt.handle().clone()), request, ManualTime::new(0.25));
    let mut sink = Recorder::default();
    tick_until_loaded(&mut preview, &mut sink);

    let events = preview.drain_events();
    let skin_at = events.iter().position(|e| matches!(e, PreviewEvent::SkinApplied(_))).unwrap();
    let ready_at = events.iter().position(|e| matches!(e, PreviewEvent::AssetReady(_))).unwrap();
    assert!(skin_at < ready_at);
    assert_eq!(events.iter().filter(|e| matches!(e, PreviewEvent::AssetReady(_))).count(), 1);

    let PreviewEvent::SkinApplied(applied) = &events[skin_at] else { unreachable!() };
    assert_eq!(applied.skipped, ["missing"]);
    assert!(applied.bounds.is_some());

    // the clip starts on the ready tick
    assert_eq!(elapsed(preview.animation().unwrap().state()), 0.0);
    preview.tick(&mut sink);
    assert_relative_eq!(elapsed(preview.animation().unwrap().state()), 0.25);
    assert!(preview.drain_events().iter().all(|e| !matches!(e, PreviewEvent::AssetReady(_))));
}

#[test]
fn commands_sent_while_loading_wait_for_ready() {
    let rt = Runtime::new().unwrap();
    let dir = demo_dir();
    let mut preview = RenderLoop::new(AssetLoader::new(rt.handle().clone()), demo_request(&dir), ManualTime::new(0.0));
    let handle = preview.handle();
    handle.apply_single("hair/x").unwrap();
    handle.switch_to("walk", false, 0.0).unwrap();

    assert_eq!(
        preview.apply_skin(&skelvis_rs::SkinRequest::Single("hair/x".into())),
        Err(PreviewError::NotReady)
    );

    let mut sink = Recorder::default();
    tick_until_loaded(&mut preview, &mut sink);
    let runtime = preview.runtime().unwrap();
    assert_eq!(runtime.instance().skin().unwrap().fragments(), ["hair/x"]);
    assert_eq!(preview.animation().unwrap().current_clip(), Some("walk"));
}

#[test]
fn rejected_commands_keep_state_and_report() {
    let rt = Runtime::new().unwrap();
    let dir = demo_dir();
    let request = demo_request(&dir).with_skin("body/a").with_animation(AnimationRequest::new("walk"));
    let mut preview = RenderLoop::new(AssetLoader::new(rt.handle().clone()), request, ManualTime::new(0.2));
    let mut sink = Recorder::default();
    tick_until_loaded(&mut preview, &mut sink);
    preview.drain_events();

    let handle = preview.handle();
    handle.switch_to("not-a-real-clip", true, 0.0).unwrap();
    handle.apply_single("body/zzz").unwrap();
    assert_eq!(preview.tick(&mut sink), TickOutcome::Drawn);

    let rejected: Vec<PreviewError> = preview
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            PreviewEvent::CommandRejected(err) => Some(err),
            _ => None,
        })
        .collect();
    assert_eq!(
        rejected,
        [
            PreviewError::ClipNotFound("not-a-real-clip".into()),
            PreviewError::FragmentNotFound("body/zzz".into()),
        ]
    );
    assert_eq!(preview.animation().unwrap().current_clip(), Some("walk"));
    assert_relative_eq!(elapsed(preview.animation().unwrap().state()), 0.2);
    assert_eq!(preview.runtime().unwrap().instance().skin().unwrap().fragments(), ["body/a"]);
}

#[test]
fn failed_load_is_terminal() {
    let rt = Runtime::new().unwrap();
    let request = LoadRequest::new("/definitely/missing-pma.atlas", "/definitely/missing-pro.skel");
    let mut preview = RenderLoop::new(AssetLoader::new(rt.handle().clone()), request, ManualTime::new(0.1));
    let mut sink = Recorder::default();

    assert_eq!(tick_until_loaded(&mut preview, &mut sink), TickOutcome::Failed);
    assert_eq!(preview.tick(&mut sink), TickOutcome::Failed);
    assert!(sink.lists.is_empty());
    assert!(preview.failure().is_some());

    let events = preview.drain_events();
    assert!(matches!(events.as_slice(), [PreviewEvent::LoadFailed(_)]));
}

#[test]
fn teardown_stops_ticks_and_detaches_handles() {
    let rt = Runtime::new().unwrap();
    let dir = demo_dir();
    let mut preview = RenderLoop::new(AssetLoader::new(rt.handle().clone()), demo_request(&dir), ManualTime::new(0.1));
    let mut sink = Recorder::default();
    tick_until_loaded(&mut preview, &mut sink);
    let handle = preview.handle();

    preview.teardown();
    assert_eq!(preview.tick(&mut sink), TickOutcome::Stopped);
    assert!(preview.runtime().is_none());
    assert_eq!(handle.apply_single("body/a"), Err(PreviewError::Detached));
    assert_eq!(sink.lists.len(), 1);
}

#[test]
fn dropping_the_loop_detaches_handles() {
    let rt = Runtime::new().unwrap();
    let dir = demo_dir();
    let preview = RenderLoop::new(AssetLoader::new(rt.handle().clone()), demo_request(&dir), ManualTime::new(0.1));
    let handle = preview.handle();
    assert!(handle.is_alive());

    drop(preview);
    assert!(!handle.is_alive());
    assert_eq!(handle.switch_to("walk", true, 0.0), Err(PreviewError::Detached));
}
