use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoneProperty {
    Rotate,    // value[0] degrees added to setup rotation
    Translate, // value[0..2] added to setup position
    Scale,     // value[0..2] multiplied with setup scale
}

impl BoneProperty {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Rotate),
            1 => Some(Self::Translate),
            2 => Some(Self::Scale),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Self::Rotate => 0,
            Self::Translate => 1,
            Self::Scale => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoneKey {
    pub time: f32,
    pub value: [f32; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoneTimeline {
    pub bone: usize,
    pub property: BoneProperty,
    pub keys: Vec<BoneKey>, // sorted by time
}

impl BoneTimeline {
    /// Linearly interpolated value at `time`. Before the first key the first
    /// value is held, after the last key the last one.
    pub fn sample(&self, time: f32) -> Option<[f32; 2]> {
        let first = self.keys.first()?;
        if time <= first.time {
            return Some(first.value);
        }

        let after_idx = match self.keys.iter().position(|k| k.time >= time) {
            Some(idx) => idx,
            None => return self.keys.last().map(|k| k.value),
        };

        let after = &self.keys[after_idx];
        if after.time == time {
            return Some(after.value);
        }
        let before = &self.keys[after_idx - 1];
        let span = after.time - before.time;
        if span <= 0.0 {
            return Some(after.value);
        }

        let t = (time - before.time) / span;
        Some([
            before.value[0] + (after.value[0] - before.value[0]) * t,
            before.value[1] + (after.value[1] - before.value[1]) * t,
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentKey {
    pub time: f32,
    pub name: Option<String>,
}

/// Switches a slot's attachment by name; `None` hides the slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentTimeline {
    pub slot: usize,
    pub keys: Vec<AttachmentKey>,
}

impl AttachmentTimeline {
    /// Key in effect at `time`, or `None` before the first key.
    pub fn key_at(&self, time: f32) -> Option<&AttachmentKey> {
        self.keys.iter().take_while(|k| k.time <= time).last()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32, // seconds
    pub bone_timelines: Vec<BoneTimeline>,
    pub attachment_timelines: Vec<AttachmentTimeline>,
}

impl AnimationClip {
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration,
            bone_timelines: Vec::new(),
            attachment_timelines: Vec::new(),
        }
    }
}
