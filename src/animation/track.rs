use serde::{Deserialize, Serialize};

/// A request to play a clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationRequest {
    pub clip: String,
    pub looping: bool,
    /// Seconds. Kept for callers that pass it; switching is an instant cut.
    pub mix_duration: f32,
}

impl AnimationRequest {
    pub fn new(clip: impl Into<String>) -> Self {
        Self {
            clip: clip.into(),
            looping: true,
            mix_duration: 0.0,
        }
    }

    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn with_mix(mut self, mix_duration: f32) -> Self {
        self.mix_duration = mix_duration;
        self
    }
}

/// The one live track of a controller. Replaced wholesale on every switch.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationTrack {
    pub clip: String,
    pub looping: bool,
    pub mix_duration: f32,
    duration: f32,
    elapsed: f32,
}

impl AnimationTrack {
    pub fn new(clip: impl Into<String>, duration: f32, looping: bool, mix_duration: f32) -> Self {
        Self {
            clip: clip.into(),
            looping,
            mix_duration: if mix_duration.is_finite() { mix_duration.max(0.0) } else { 0.0 },
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Looping tracks wrap with modulo and stay in `[0, duration)`; others
    /// stop at `duration`.
    pub fn advance(&mut self, delta: f32) {
        if !delta.is_finite() || delta <= 0.0 {
            return;
        }
        self.elapsed += delta;
        if self.elapsed >= self.duration {
            self.elapsed = if self.duration <= 0.0 {
                0.0
            } else if self.looping {
                self.elapsed % self.duration
            } else {
                self.duration
            };
        }
    }

    /// A non-looping track that reached its end.
    pub fn is_complete(&self) -> bool {
        !self.looping && self.elapsed >= self.duration
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TrackState {
    Idle,
    Playing { clip: String, elapsed: f32 },
}
