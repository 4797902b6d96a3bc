mod common;

use common::{demo_dir, demo_request, wait_for_load};
use skelvis_rs::demo;
use skelvis_rs::loader::{AssetLoader, LoadRequest, LoadStatus};
use tokio::runtime::Runtime;

#[test]
fn loads_demo_pair_from_disk() {
    let rt = Runtime::new().unwrap();
    let dir = demo_dir();
    let mut loader = AssetLoader::new(rt.handle().clone());

    let mut handle = loader.begin_load(demo_request(&dir));
    let LoadStatus::Ready(bundle) = wait_for_load(&loader, &mut handle) else {
        panic!("demo asset failed to load");
    };

    let data = &bundle.skeleton_data;
    assert_eq!(data.skin_names(), ["body/a", "body/b", "hair/x"]);
    assert_eq!(data.animation_names(), ["idle", "walk"]);
    assert!(data.default_skin.is_some());

    let page = &bundle.atlas.pages[0];
    let image = page.image.as_ref().expect("page image decoded");
    assert_eq!((image.width(), image.height()), (page.width, page.height));

    for skin in &data.skins {
        for (_, _, attachment) in skin.attachments() {
            assert!(attachment.region.is_some(), "{} not linked", attachment.path);
        }
    }
}

#[test]
fn outcome_is_sticky() {
    let rt = Runtime::new().unwrap();
    let dir = demo_dir();
    let mut loader = AssetLoader::new(rt.handle().clone());
    let mut handle = loader.begin_load(demo_request(&dir));

    let LoadStatus::Ready(first) = wait_for_load(&loader, &mut handle) else {
        panic!("load failed");
    };
    let LoadStatus::Ready(again) = loader.poll_status(&mut handle) else {
        panic!("ready load changed state");
    };
    assert!(std::sync::Arc::ptr_eq(&first, &again));
}

#[test]
fn missing_file_fails() {
    let rt = Runtime::new().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let mut loader = AssetLoader::new(rt.handle().clone());

    let request = LoadRequest::new("nope-pma.atlas", "nope-pro.skel").with_base_path(dir.path().to_string_lossy());
    let mut handle = loader.begin_load(request);
    match wait_for_load(&loader, &mut handle) {
        LoadStatus::Failed(reason) => assert!(reason.contains("io error"), "{reason}"),
        other => panic!("expected failure, got {other:?}"),
    }
    assert!(matches!(loader.poll_status(&mut handle), LoadStatus::Failed(_)));
}

#[test]
fn atlas_without_a_used_region_fails() {
    let rt = Runtime::new().unwrap();
    let dir = demo_dir();
    let atlas = demo::atlas_text().replace("hair/x/hair", "hair/y/hair");
    std::fs::write(dir.path().join(demo::ATLAS_FILE), atlas).unwrap();

    let mut loader = AssetLoader::new(rt.handle().clone());
    let mut handle = loader.begin_load(demo_request(&dir));
    match wait_for_load(&loader, &mut handle) {
        LoadStatus::Failed(reason) => assert!(reason.contains("hair/x/hair"), "{reason}"),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn corrupt_skeleton_fails() {
    let rt = Runtime::new().unwrap();
    let dir = demo_dir();
    std::fs::write(dir.path().join(demo::SKELETON_FILE), b"not a skeleton").unwrap();

    let mut loader = AssetLoader::new(rt.handle().clone());
    let mut handle = loader.begin_load(demo_request(&dir));
    assert!(matches!(wait_for_load(&loader, &mut handle), LoadStatus::Failed(_)));
}

#[test]
fn scale_is_applied_while_loading() {
    let rt = Runtime::new().unwrap();
    let dir = demo_dir();
    let mut loader = AssetLoader::new(rt.handle().clone());

    let mut plain = loader.begin_load(demo_request(&dir));
    let mut scaled = loader.begin_load(demo_request(&dir).with_scale(0.4));
    assert_ne!(plain.id(), scaled.id());

    let (LoadStatus::Ready(plain), LoadStatus::Ready(scaled)) = (
        wait_for_load(&loader, &mut plain),
        wait_for_load(&loader, &mut scaled),
    ) else {
        panic!("load failed");
    };
    let torso = plain.skeleton_data.find_bone("torso").unwrap();
    let expected = plain.skeleton_data.bones[torso].length * 0.4;
    approx::assert_relative_eq!(scaled.skeleton_data.bones[torso].length, expected);
}
