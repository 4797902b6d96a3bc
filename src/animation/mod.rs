mod apply;
mod controller;
mod track;

pub use apply::apply_clip;
pub use controller::AnimationController;
pub use track::{AnimationRequest, AnimationTrack, TrackState};
