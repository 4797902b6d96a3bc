use super::{AnimationRequest, AnimationTrack, TrackState, apply_clip};
use crate::error::PreviewError;
use crate::runtime::SkeletonRuntime;
use log::{info, warn};

/// Single-track animation state machine: `Idle` until the first switch, then
/// `Playing(clip, elapsed)`.
#[derive(Debug, Clone, Default)]
pub struct AnimationController {
    track: Option<AnimationTrack>,
}

impl AnimationController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the track with `clip` from elapsed 0. The pose is reset to setup
    /// (the skin is kept) and the clip's first frame applied. Unknown clips are
    /// rejected and nothing changes.
    pub fn switch_to(
        &mut self,
        runtime: &mut SkeletonRuntime,
        clip: &str,
        looping: bool,
        mix_duration: f32,
    ) -> Result<(), PreviewError> {
        let data = runtime.bundle().skeleton_data.clone();
        let Some(animation) = data.find_animation(clip) else {
            warn!("Animation '{}' not found, keeping current track", clip);
            return Err(PreviewError::ClipNotFound(clip.to_string()));
        };

        info!("Switching animation to '{}' (loop: {})", clip, looping);
        let track = AnimationTrack::new(clip, animation.duration, looping, mix_duration);

        let instance = runtime.instance_mut();
        instance.reset_to_setup_pose();
        apply_clip(instance, &data, animation, track.elapsed());
        self.track = Some(track);
        Ok(())
    }

    pub fn switch(&mut self, runtime: &mut SkeletonRuntime, request: &AnimationRequest) -> Result<(), PreviewError> {
        self.switch_to(runtime, &request.clip, request.looping, request.mix_duration)
    }

    /// Advances the track and poses the skeleton. No-op while idle. World
    /// transforms are left for the caller to recompute.
    pub fn tick(&mut self, runtime: &mut SkeletonRuntime, delta: f32) {
        if self.track.is_none() {
            return;
        }
        self.update(delta);
        self.apply(runtime);
    }

    pub fn update(&mut self, delta: f32) {
        if let Some(track) = &mut self.track {
            track.advance(delta);
        }
    }

    pub fn apply(&self, runtime: &mut SkeletonRuntime) {
        let Some(track) = &self.track else {
            return;
        };
        let data = runtime.bundle().skeleton_data.clone();
        if let Some(animation) = data.find_animation(&track.clip) {
            apply_clip(runtime.instance_mut(), &data, animation, track.elapsed());
        }
    }

    pub fn state(&self) -> TrackState {
        match &self.track {
            None => TrackState::Idle,
            Some(track) => TrackState::Playing {
                clip: track.clip.clone(),
                elapsed: track.elapsed(),
            },
        }
    }

    pub fn track(&self) -> Option<&AnimationTrack> {
        self.track.as_ref()
    }

    pub fn current_clip(&self) -> Option<&str> {
        self.track.as_ref().map(|t| t.clip.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;
    use crate::skin::SkinComposer;
    use std::sync::Arc;

    fn runtime() -> SkeletonRuntime {
        SkeletonRuntime::construct(Arc::new(demo::bundle().unwrap()))
    }

    #[test]
    fn idle_until_first_switch() {
        let mut runtime = runtime();
        let mut controller = AnimationController::new();
        controller.tick(&mut runtime, 1.0);
        assert_eq!(controller.state(), TrackState::Idle);
    }

    #[test]
    fn switching_keeps_the_skin() {
        let mut runtime = runtime();
        let mut controller = AnimationController::new();
        SkinComposer::apply_many(&mut runtime, &["body/b", "hair/x"]);

        controller.switch_to(&mut runtime, "idle", true, 0.0).unwrap();
        controller.tick(&mut runtime, 0.5);
        controller.switch_to(&mut runtime, "walk", true, 0.2).unwrap();

        assert_eq!(runtime.instance().skin().unwrap().fragments(), ["body/b", "hair/x"]);
        assert_eq!(controller.track().unwrap().mix_duration, 0.2);
    }

    #[test]
    fn skin_change_keeps_the_track() {
        let mut runtime = runtime();
        let mut controller = AnimationController::new();
        controller.switch_to(&mut runtime, "walk", true, 0.0).unwrap();
        controller.tick(&mut runtime, 0.25);

        SkinComposer::apply_many(&mut runtime, &["body/a"]);
        assert_eq!(
            controller.state(),
            TrackState::Playing { clip: "walk".into(), elapsed: 0.25 }
        );
    }
}
