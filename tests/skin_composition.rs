mod common;

use common::demo_runtime;
use skelvis_rs::{PreviewError, SkinComposer};

fn visible_paths(runtime: &skelvis_rs::SkeletonRuntime) -> Vec<Option<String>> {
    let instance = runtime.instance();
    (0..instance.slots().len())
        .map(|slot| instance.slot_attachment(slot).map(|a| a.path.clone()))
        .collect()
}

#[test]
fn composing_twice_matches_composing_once() {
    let mut once = demo_runtime();
    let first = SkinComposer::apply_many(&mut once, &["body/a", "hair/x"]);

    let mut twice = demo_runtime();
    SkinComposer::apply_many(&mut twice, &["body/a", "hair/x"]);
    let second = SkinComposer::apply_many(&mut twice, &["body/a", "hair/x"]);

    assert_eq!(first, second);
    assert_eq!(once.instance().skin(), twice.instance().skin());
    assert_eq!(visible_paths(&once), visible_paths(&twice));
}

#[test]
fn later_fragment_wins_the_torso() {
    let mut runtime = demo_runtime();
    SkinComposer::apply_many(&mut runtime, &["body/a", "body/b"]);

    let torso = runtime.data().find_slot("torso").unwrap();
    let attachment = runtime.instance().slot_attachment(torso).unwrap();
    assert_eq!(attachment.path, "body/b/torso");

    // body/b has no head, so body/a's head survives
    let head = runtime.data().find_slot("head").unwrap();
    assert_eq!(runtime.instance().slot_attachment(head).unwrap().path, "body/a/head");
}

#[test]
fn unknown_names_are_skipped() {
    let mut with_unknown = demo_runtime();
    let applied = SkinComposer::apply_many(&mut with_unknown, &["body/a", "nonexistent"]);
    assert_eq!(applied.skipped, ["nonexistent"]);
    assert!(applied.is_partial());

    let mut plain = demo_runtime();
    SkinComposer::apply_many(&mut plain, &["body/a"]);

    assert_eq!(with_unknown.instance().skin(), plain.instance().skin());
    assert_eq!(visible_paths(&with_unknown), visible_paths(&plain));
}

#[test]
fn previous_skin_does_not_leak_into_uncovered_slots() {
    let mut runtime = demo_runtime();
    SkinComposer::apply_many(&mut runtime, &["body/a", "hair/x"]);
    SkinComposer::apply_many(&mut runtime, &["body/b"]);

    let paths = visible_paths(&runtime);
    let head = runtime.data().find_slot("head").unwrap();
    let hair = runtime.data().find_slot("hair").unwrap();
    assert_eq!(paths[head], None);
    assert_eq!(paths[hair], None);
    assert!(paths.iter().flatten().all(|p| !p.starts_with("body/a") && !p.starts_with("hair/")));
}

#[test]
fn no_resolved_names_leaves_a_bare_skeleton() {
    let mut runtime = demo_runtime();
    SkinComposer::apply_many(&mut runtime, &["body/a"]);
    let applied = SkinComposer::apply_many(&mut runtime, &["ghost", "phantom"]);

    assert!(applied.fragments.is_empty());
    assert_eq!(applied.skipped, ["ghost", "phantom"]);
    assert!(runtime.instance().skin().unwrap().is_empty());

    // only the default skin's shadow is left
    let paths: Vec<String> = visible_paths(&runtime).into_iter().flatten().collect();
    assert_eq!(paths, ["shadow"]);
    assert!(applied.bounds.is_some());
}

#[test]
fn single_fragment_requires_a_known_name() {
    let mut runtime = demo_runtime();
    SkinComposer::apply_single(&mut runtime, "body/b").unwrap();

    let err = SkinComposer::apply_single(&mut runtime, "body/zzz").unwrap_err();
    assert_eq!(err, PreviewError::FragmentNotFound("body/zzz".into()));
    assert_eq!(runtime.instance().skin().unwrap().fragments(), ["body/b"]);
}

#[test]
fn two_fragment_composition() {
    let mut runtime = demo_runtime();
    let applied = SkinComposer::apply_many(&mut runtime, &["body/b", "hair/x"]);
    assert_eq!(applied.fragments.len(), 2);
    assert_eq!(runtime.instance().skin().unwrap().fragments(), ["body/b", "hair/x"]);
}
