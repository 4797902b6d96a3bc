use super::{AssetReadyEvent, DrawList, DrawSink, PreviewCommand, PreviewEvent, PreviewHandle};
use crate::animation::{AnimationController, AnimationRequest};
use crate::error::PreviewError;
use crate::loader::{AssetLoader, LoadHandle, LoadRequest, LoadStatus};
use crate::runtime::SkeletonRuntime;
use crate::skin::{Applied, SkinComposer, SkinRequest};
use crate::time::TimeSource;
use log::{debug, info, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc::{self, UnboundedReceiver};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Assets still loading; nothing was drawn.
    Loading,
    Drawn,
    /// The load failed. Terminal.
    Failed,
    /// The preview was torn down. Terminal.
    Stopped,
}

struct Preview {
    runtime: SkeletonRuntime,
    animation: AnimationController,
}

enum LoopState {
    Loading(LoadHandle),
    Ready(Preview),
    Failed(String),
    Stopped,
}

/// Drives one preview: polls the load, then per tick drains queued commands,
/// advances the animation, recomputes world transforms once and hands a
/// draw list to the sink.
pub struct RenderLoop<T: TimeSource> {
    loader: AssetLoader,
    time: T,
    state: LoopState,
    commands: UnboundedReceiver<PreviewCommand>,
    handle: PreviewHandle,
    alive: Arc<AtomicBool>,
    events: Vec<PreviewEvent>,
    show_bones: bool,
    ticks: u64,
}

impl<T: TimeSource> RenderLoop<T> {
    /// Starts loading right away; ticks are no-ops until the assets arrive.
    pub fn new(mut loader: AssetLoader, request: LoadRequest, time: T) -> Self {
        let load = loader.begin_load(request);
        let (sender, commands) = mpsc::unbounded_channel();
        let alive = Arc::new(AtomicBool::new(true));
        Self {
            loader,
            time,
            state: LoopState::Loading(load),
            commands,
            handle: PreviewHandle::new(sender, alive.clone()),
            alive,
            events: Vec::new(),
            show_bones: false,
            ticks: 0,
        }
    }

    pub fn handle(&self) -> PreviewHandle {
        self.handle.clone()
    }

    pub fn set_show_bones(&mut self, show: bool) {
        self.show_bones = show;
    }

    pub fn show_bones(&self) -> bool {
        self.show_bones
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, LoopState::Ready(_))
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn runtime(&self) -> Option<&SkeletonRuntime> {
        match &self.state {
            LoopState::Ready(preview) => Some(&preview.runtime),
            _ => None,
        }
    }

    pub fn animation(&self) -> Option<&AnimationController> {
        match &self.state {
            LoopState::Ready(preview) => Some(&preview.animation),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match &self.state {
            LoopState::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn drain_events(&mut self) -> Vec<PreviewEvent> {
        std::mem::take(&mut self.events)
    }

    /// Stages a skin change on the tick thread. World transforms follow on
    /// the next tick.
    pub fn apply_skin(&mut self, request: &SkinRequest) -> Result<Applied, PreviewError> {
        let preview = self.preview_mut()?;
        SkinComposer::stage(&mut preview.runtime, request)
    }

    pub fn switch_animation(&mut self, request: &AnimationRequest) -> Result<(), PreviewError> {
        let preview = self.preview_mut()?;
        preview.animation.switch(&mut preview.runtime, request)
    }

    fn preview_mut(&mut self) -> Result<&mut Preview, PreviewError> {
        match &mut self.state {
            LoopState::Ready(preview) => Ok(preview),
            LoopState::Failed(reason) => Err(PreviewError::LoadFailed(reason.clone())),
            LoopState::Stopped => Err(PreviewError::Detached),
            LoopState::Loading(_) => Err(PreviewError::NotReady),
        }
    }

    /// Releases the instance and turns every later tick into a no-op.
    /// Outstanding handles start returning `Detached`.
    pub fn teardown(&mut self) {
        if !matches!(self.state, LoopState::Stopped) {
            info!("Preview torn down after {} ticks", self.ticks);
        }
        self.alive.store(false, Ordering::Release);
        self.state = LoopState::Stopped;
        self.commands.close();
    }

    pub fn tick(&mut self, sink: &mut dyn DrawSink) -> TickOutcome {
        if !self.is_alive() {
            if !matches!(self.state, LoopState::Stopped) {
                self.teardown();
            }
            return TickOutcome::Stopped;
        }

        let mut delta = self.time.advance();
        self.ticks += 1;

        let mut applied = Vec::new();
        let mut ready_event = None;

        if let LoopState::Loading(load) = &mut self.state {
            match self.loader.poll_status(load) {
                LoadStatus::Pending => return TickOutcome::Loading,
                LoadStatus::Failed(reason) => {
                    self.events.push(PreviewEvent::LoadFailed(reason.clone()));
                    self.state = LoopState::Failed(reason);
                }
                LoadStatus::Ready(bundle) => {
                    let request = load.request().clone();
                    let mut preview = Preview {
                        runtime: SkeletonRuntime::construct(bundle.clone()),
                        animation: AnimationController::new(),
                    };
                    self.start(&mut preview, &request, &mut applied);
                    ready_event = Some(AssetReadyEvent {
                        skin_fragment_names: bundle.skeleton_data.skin_names(),
                        animation_clip_names: bundle.skeleton_data.animation_names(),
                    });
                    sink.prepare(&bundle);
                    self.state = LoopState::Ready(preview);
                    // the initial track starts on this tick
                    delta = 0.0;
                }
            }
        }

        let mut pending = Vec::new();
        if matches!(self.state, LoopState::Ready(_)) {
            while let Ok(command) = self.commands.try_recv() {
                pending.push(command);
            }
        }

        let show_bones = &mut self.show_bones;
        let events = &mut self.events;
        let preview = match &mut self.state {
            LoopState::Ready(preview) => preview,
            LoopState::Failed(_) => return TickOutcome::Failed,
            LoopState::Stopped => return TickOutcome::Stopped,
            LoopState::Loading(_) => return TickOutcome::Loading,
        };

        for command in pending {
            debug!("Tick {}: {:?}", self.ticks, command);
            match command {
                PreviewCommand::ApplySkin(request) => {
                    match SkinComposer::stage(&mut preview.runtime, &request) {
                        Ok(result) => applied.push(result),
                        Err(e) => events.push(PreviewEvent::CommandRejected(e)),
                    }
                }
                PreviewCommand::SwitchAnimation(request) => {
                    match preview.animation.switch(&mut preview.runtime, &request) {
                        Ok(()) => events.push(PreviewEvent::AnimationChanged(preview.animation.state())),
                        Err(e) => events.push(PreviewEvent::CommandRejected(e)),
                    }
                }
                PreviewCommand::ShowBones(show) => *show_bones = show,
            }
        }

        // A skin change resets the pose; re-apply the current frame on top.
        if !applied.is_empty() {
            preview.animation.apply(&mut preview.runtime);
        }
        preview.animation.tick(&mut preview.runtime, delta);
        preview.runtime.recompute_world_transform();

        let bounds = preview.runtime.bounds();
        for mut result in applied {
            result.bounds = bounds;
            events.push(PreviewEvent::SkinApplied(result));
        }
        if let Some(event) = ready_event {
            info!(
                "Assets ready: {} fragments, {} clips",
                event.skin_fragment_names.len(),
                event.animation_clip_names.len()
            );
            events.push(PreviewEvent::AssetReady(event));
        }

        let list = DrawList::build(&preview.runtime, *show_bones);
        sink.submit(&list);
        TickOutcome::Drawn
    }

    fn start(&mut self, preview: &mut Preview, request: &LoadRequest, applied: &mut Vec<Applied>) {
        if let Some(skin) = &request.initial_skin {
            match SkinComposer::stage(&mut preview.runtime, skin) {
                Ok(result) => applied.push(result),
                Err(e) => {
                    warn!("Initial skin rejected: {}", e);
                    self.events.push(PreviewEvent::CommandRejected(e));
                }
            }
        }
        if let Some(animation) = &request.initial_animation {
            match preview.animation.switch(&mut preview.runtime, animation) {
                Ok(()) => self
                    .events
                    .push(PreviewEvent::AnimationChanged(preview.animation.state())),
                Err(e) => {
                    warn!("Initial animation rejected: {}", e);
                    self.events.push(PreviewEvent::CommandRejected(e));
                }
            }
        }
    }
}

impl<T: TimeSource> Drop for RenderLoop<T> {
    fn drop(&mut self) {
        self.alive.store(false, Ordering::Release);
    }
}
