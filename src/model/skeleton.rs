use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoneData {
    pub name: String,
    pub parent: Option<usize>, // always a lower index than this bone
    pub x: f32,
    pub y: f32,
    pub rotation: f32, // degrees
    pub scale_x: f32,
    pub scale_y: f32,
    pub length: f32,
}

impl Default for BoneData {
    fn default() -> Self {
        Self {
            name: String::new(),
            parent: None,
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            length: 0.0,
        }
    }
}

impl BoneData {
    pub fn new(name: impl Into<String>, parent: Option<usize>) -> Self {
        Self {
            name: name.into(),
            parent,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotData {
    pub name: String,
    pub bone: usize,
    /// Attachment shown in the setup pose, looked up by name in the applied skin.
    pub attachment: Option<String>,
    pub color: [f32; 4],
}

impl SlotData {
    pub fn new(name: impl Into<String>, bone: usize, attachment: Option<&str>) -> Self {
        Self {
            name: name.into(),
            bone,
            attachment: attachment.map(str::to_string),
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}
