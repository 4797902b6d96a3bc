use crate::loader::AssetBundle;
use crate::runtime::{Bounds, SkeletonRuntime};

/// One textured quad, corners in skeleton space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawQuad {
    pub page: usize,
    pub positions: [[f32; 2]; 4],
    pub uvs: [[f32; 2]; 4],
    pub color: [f32; 4],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoneSegment {
    pub from: [f32; 2],
    pub to: [f32; 2],
}

/// Everything a backend needs to draw one frame, in slot draw order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DrawList {
    pub quads: Vec<DrawQuad>,
    pub bones: Vec<BoneSegment>,
    pub bounds: Option<Bounds>,
    /// World-transform revision the list was built from.
    pub world_revision: u64,
}

impl DrawList {
    /// Reads the current world pose. Attachments without a linked region are
    /// not drawn.
    pub fn build(runtime: &SkeletonRuntime, with_bones: bool) -> Self {
        let instance = runtime.instance();
        let mut list = DrawList {
            bounds: instance.bounds(),
            world_revision: instance.world_revision(),
            ..Default::default()
        };

        for (slot_idx, slot) in instance.slots().iter().enumerate() {
            let Some(region) = instance.slot_attachment(slot_idx).and_then(|a| a.region) else {
                continue;
            };
            let Some(positions) = instance.attachment_corners(slot_idx) else {
                continue;
            };
            list.quads.push(DrawQuad {
                page: region.page,
                positions,
                uvs: region.corners(),
                color: slot.color,
            });
        }

        if with_bones {
            list.bones = instance
                .bone_segments()
                .map(|(from, to)| BoneSegment { from, to })
                .collect();
        }
        list
    }
}

/// Receives one draw list per tick.
pub trait DrawSink {
    /// Called once when the asset becomes ready, before the first submit.
    fn prepare(&mut self, _bundle: &AssetBundle) {}

    fn submit(&mut self, list: &DrawList);
}

/// Discards everything. Used for headless runs.
#[derive(Debug, Default)]
pub struct NullSink;

impl DrawSink for NullSink {
    fn submit(&mut self, _list: &DrawList) {}
}
