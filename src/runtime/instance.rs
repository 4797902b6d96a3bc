use super::Bounds;
use crate::model::{BoneData, RegionAttachment, SkeletonData, SlotData};
use crate::skin::AppliedSkin;
use nalgebra_glm as glm;
use std::sync::Arc;

/// Posed bone. Local fields are what animations write; `world` is only valid
/// after the last `SkeletonInstance::recompute_world_transform`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub world: glm::Mat3,
}

impl Bone {
    fn setup(data: &BoneData) -> Self {
        Self {
            x: data.x,
            y: data.y,
            rotation: data.rotation,
            scale_x: data.scale_x,
            scale_y: data.scale_y,
            world: glm::Mat3::identity(),
        }
    }

    fn local_matrix(&self) -> glm::Mat3 {
        glm::translation2d(&glm::vec2(self.x, self.y))
            * glm::rotation2d(self.rotation.to_radians())
            * glm::scaling2d(&glm::vec2(self.scale_x, self.scale_y))
    }

    pub fn world_point(&self, [x, y]: [f32; 2]) -> [f32; 2] {
        let p = self.world * glm::vec3(x, y, 1.0);
        [p.x, p.y]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    /// Attachment name, resolved through the applied skin then the default skin.
    pub attachment: Option<String>,
    pub color: [f32; 4],
}

impl Slot {
    fn setup(data: &SlotData) -> Self {
        Self {
            attachment: data.attachment.clone(),
            color: data.color,
        }
    }
}

/// Mutable pose of one skeleton: bones, slot attachments and the applied skin.
#[derive(Debug, Clone)]
pub struct SkeletonInstance {
    data: Arc<SkeletonData>,
    bones: Vec<Bone>,
    slots: Vec<Slot>,
    skin: Option<AppliedSkin>,
    world_revision: u64,
}

impl SkeletonInstance {
    pub fn new(data: Arc<SkeletonData>) -> Self {
        let mut instance = Self {
            bones: data.bones.iter().map(Bone::setup).collect(),
            slots: data.slots.iter().map(Slot::setup).collect(),
            data,
            skin: None,
            world_revision: 0,
        };
        instance.recompute_world_transform();
        instance
    }

    pub fn data(&self) -> &Arc<SkeletonData> {
        &self.data
    }

    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    pub fn bone_mut(&mut self, index: usize) -> Option<&mut Bone> {
        self.bones.get_mut(index)
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn set_slot_attachment(&mut self, slot: usize, name: Option<String>) {
        if let Some(slot) = self.slots.get_mut(slot) {
            slot.attachment = name;
        }
    }

    pub fn skin(&self) -> Option<&AppliedSkin> {
        self.skin.as_ref()
    }

    /// Replaces the applied skin. The previous one is dropped, never patched.
    pub fn set_skin(&mut self, skin: AppliedSkin) {
        self.skin = Some(skin);
    }

    /// Bones and slots back to the setup pose. The applied skin is kept.
    pub fn reset_to_setup_pose(&mut self) {
        for (bone, data) in self.bones.iter_mut().zip(&self.data.bones) {
            *bone = Bone::setup(data);
        }
        for (slot, data) in self.slots.iter_mut().zip(&self.data.slots) {
            *slot = Slot::setup(data);
        }
    }

    /// World matrices, parents first. Bone data guarantees a parent precedes
    /// its children.
    pub fn recompute_world_transform(&mut self) {
        for idx in 0..self.bones.len() {
            let local = self.bones[idx].local_matrix();
            let parent = self.data.bones[idx]
                .parent
                .and_then(|p| self.bones.get(p))
                .map(|p| p.world);
            self.bones[idx].world = match parent {
                Some(parent) => parent * local,
                None => local,
            };
        }
        self.world_revision += 1;
    }

    /// Bumped on every world-transform recompute.
    pub fn world_revision(&self) -> u64 {
        self.world_revision
    }

    /// Looks up an attachment by slot and name: applied skin first, then the
    /// default skin.
    pub fn find_attachment(&self, slot: usize, name: &str) -> Option<&RegionAttachment> {
        self.skin
            .as_ref()
            .and_then(|skin| skin.attachment(slot, name))
            .or_else(|| {
                self.data
                    .default_skin
                    .as_ref()
                    .and_then(|skin| skin.attachment(slot, name))
            })
    }

    /// Attachment currently visible in `slot`, if any.
    pub fn slot_attachment(&self, slot: usize) -> Option<&RegionAttachment> {
        let name = self.slots.get(slot)?.attachment.as_deref()?;
        self.find_attachment(slot, name)
    }

    /// World-space corners of the attachment shown in `slot`.
    pub fn attachment_corners(&self, slot: usize) -> Option<[[f32; 2]; 4]> {
        let attachment = self.slot_attachment(slot)?;
        let bone = self.bones.get(self.data.slots[slot].bone)?;
        Some(attachment.local_corners().map(|p| bone.world_point(p)))
    }

    /// World-space origin and tip of every bone.
    pub fn bone_segments(&self) -> impl Iterator<Item = ([f32; 2], [f32; 2])> + '_ {
        self.bones
            .iter()
            .zip(&self.data.bones)
            .map(|(bone, data)| (bone.world_point([0.0, 0.0]), bone.world_point([data.length, 0.0])))
    }

    /// Bounds of every visible attachment; the bone skeleton when nothing is
    /// attached.
    pub fn bounds(&self) -> Option<Bounds> {
        let quads = Bounds::from_points(
            (0..self.slots.len())
                .filter_map(|slot| self.attachment_corners(slot))
                .flatten(),
        );
        quads.or_else(|| Bounds::from_points(self.bone_segments().flat_map(|(a, b)| [a, b])))
    }
}
