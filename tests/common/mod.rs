#![allow(dead_code)]

use skelvis_rs::demo;
use skelvis_rs::loader::{AssetLoader, LoadHandle, LoadStatus};
use skelvis_rs::render_loop::{DrawList, DrawSink, RenderLoop, TickOutcome};
use skelvis_rs::time::TimeSource;
use skelvis_rs::{AssetBundle, LoadRequest, SkeletonRuntime};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Demo asset written to a fresh temporary directory.
pub fn demo_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    demo::write_to(dir.path()).unwrap();
    dir
}

pub fn demo_request(dir: &TempDir) -> LoadRequest {
    LoadRequest::from_skeleton_file(demo::SKELETON_FILE).with_base_path(dir.path().to_string_lossy())
}

pub fn demo_runtime() -> SkeletonRuntime {
    SkeletonRuntime::construct(Arc::new(demo::bundle().unwrap()))
}

pub fn wait_for_load(loader: &AssetLoader, handle: &mut LoadHandle) -> LoadStatus {
    for _ in 0..500 {
        let status = loader.poll_status(handle);
        if !status.is_pending() {
            return status;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    panic!("load did not finish");
}

/// Ticks until the loop leaves `Loading`, returning that tick's outcome.
pub fn tick_until_loaded<T: TimeSource>(preview: &mut RenderLoop<T>, sink: &mut dyn DrawSink) -> TickOutcome {
    for _ in 0..500 {
        match preview.tick(sink) {
            TickOutcome::Loading => std::thread::sleep(Duration::from_millis(10)),
            outcome => return outcome,
        }
    }
    panic!("preview never left loading");
}

#[derive(Default)]
pub struct Recorder {
    pub prepared: usize,
    pub lists: Vec<DrawList>,
}

impl DrawSink for Recorder {
    fn prepare(&mut self, _bundle: &AssetBundle) {
        self.prepared += 1;
    }

    fn submit(&mut self, list: &DrawList) {
        self.lists.push(list.clone());
    }
}
