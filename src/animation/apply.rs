use crate::model::{AnimationClip, BoneProperty, SkeletonData};
use crate::runtime::SkeletonInstance;

/// Poses `instance` with `clip` at `time`. Timeline values are relative to
/// the setup pose, so applying twice at the same time gives the same pose.
/// Bones and slots without a timeline are left as they are.
pub fn apply_clip(instance: &mut SkeletonInstance, data: &SkeletonData, clip: &AnimationClip, time: f32) {
    for timeline in &clip.bone_timelines {
        let (Some(setup), Some(value)) = (data.bones.get(timeline.bone), timeline.sample(time)) else {
            continue;
        };
        let Some(bone) = instance.bone_mut(timeline.bone) else {
            continue;
        };
        match timeline.property {
            BoneProperty::Rotate => bone.rotation = setup.rotation + value[0],
            BoneProperty::Translate => {
                bone.x = setup.x + value[0];
                bone.y = setup.y + value[1];
            }
            BoneProperty::Scale => {
                bone.scale_x = setup.scale_x * value[0];
                bone.scale_y = setup.scale_y * value[1];
            }
        }
    }

    for timeline in &clip.attachment_timelines {
        if let Some(key) = timeline.key_at(time) {
            instance.set_slot_attachment(timeline.slot, key.name.clone());
        }
    }
}
