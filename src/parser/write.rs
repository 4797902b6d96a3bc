use crate::model::{AnimationClip, SkeletonData, SkinFragment};
use crate::parser::{SKELETON_MAGIC, SKELETON_VERSION};
use byteorder::{LittleEndian, WriteBytesExt};

/// Serializes skeleton data into the binary format read by [`load_skeleton`].
///
/// Writing into a `Vec` cannot fail, so the `io::Result`s of `byteorder` are
/// discarded.
///
/// [`load_skeleton`]: crate::parser::load_skeleton
pub fn write_skeleton(data: &SkeletonData) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(SKELETON_MAGIC);
    put_u32(&mut out, SKELETON_VERSION);

    let mut info = Vec::new();
    put_string(&mut info, &data.name);
    put_chunk(&mut out, b"INFO", &info);

    let mut bones = Vec::new();
    put_u32(&mut bones, data.bones.len() as u32);
    for bone in &data.bones {
        put_string(&mut bones, &bone.name);
        let _ = bones.write_i32::<LittleEndian>(bone.parent.map_or(-1, |p| p as i32));
        for v in [bone.x, bone.y, bone.rotation, bone.scale_x, bone.scale_y, bone.length] {
            put_f32(&mut bones, v);
        }
    }
    put_chunk(&mut out, b"BONE", &bones);

    let mut slots = Vec::new();
    put_u32(&mut slots, data.slots.len() as u32);
    for slot in &data.slots {
        put_string(&mut slots, &slot.name);
        put_u32(&mut slots, slot.bone as u32);
        put_string(&mut slots, slot.attachment.as_deref().unwrap_or(""));
        for c in slot.color {
            slots.push((c.clamp(0.0, 1.0) * 255.0).round() as u8);
        }
    }
    put_chunk(&mut out, b"SLOT", &slots);

    let skins: Vec<&SkinFragment> = data.default_skin.iter().chain(data.skins.iter()).collect();
    let mut skin_bytes = Vec::new();
    put_u32(&mut skin_bytes, skins.len() as u32);
    for skin in skins {
        put_string(&mut skin_bytes, &skin.name);
        put_string(&mut skin_bytes, skin.category.map_or("", |c| c.tag()));
        put_u32(&mut skin_bytes, skin.len() as u32);
        for (slot, key, attachment) in skin.attachments() {
            put_u32(&mut skin_bytes, slot as u32);
            put_string(&mut skin_bytes, key);
            put_string(&mut skin_bytes, if attachment.path == key { "" } else { &attachment.path });
            for v in [
                attachment.x,
                attachment.y,
                attachment.rotation,
                attachment.scale_x,
                attachment.scale_y,
                attachment.width,
                attachment.height,
            ] {
                put_f32(&mut skin_bytes, v);
            }
        }
    }
    put_chunk(&mut out, b"SKIN", &skin_bytes);

    let mut anims = Vec::new();
    put_u32(&mut anims, data.animations.len() as u32);
    for clip in &data.animations {
        write_animation(&mut anims, clip);
    }
    put_chunk(&mut out, b"ANIM", &anims);

    out
}

fn write_animation(out: &mut Vec<u8>, clip: &AnimationClip) {
    put_string(out, &clip.name);
    put_f32(out, clip.duration);

    put_u32(out, clip.bone_timelines.len() as u32);
    for timeline in &clip.bone_timelines {
        put_u32(out, timeline.bone as u32);
        out.push(timeline.property.code());
        put_u32(out, timeline.keys.len() as u32);
        for key in &timeline.keys {
            put_f32(out, key.time);
            put_f32(out, key.value[0]);
            put_f32(out, key.value[1]);
        }
    }

    put_u32(out, clip.attachment_timelines.len() as u32);
    for timeline in &clip.attachment_timelines {
        put_u32(out, timeline.slot as u32);
        put_u32(out, timeline.keys.len() as u32);
        for key in &timeline.keys {
            put_f32(out, key.time);
            put_string(out, key.name.as_deref().unwrap_or(""));
        }
    }
}

fn put_chunk(out: &mut Vec<u8>, tag: &[u8; 4], payload: &[u8]) {
    out.extend_from_slice(tag);
    put_u32(out, payload.len() as u32);
    out.extend_from_slice(payload);
}

fn put_u32(out: &mut Vec<u8>, v: u32) {
    let _ = out.write_u32::<LittleEndian>(v);
}

fn put_f32(out: &mut Vec<u8>, v: f32) {
    let _ = out.write_f32::<LittleEndian>(v);
}

fn put_string(out: &mut Vec<u8>, s: &str) {
    let bytes = s.as_bytes();
    let len = bytes.len().min(u16::MAX as usize);
    let _ = out.write_u16::<LittleEndian>(len as u16);
    out.extend_from_slice(&bytes[..len]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;
    use crate::parser::load_skeleton;

    #[test]
    fn written_skeleton_reads_back() {
        let data = demo::skeleton_data();
        let parsed = load_skeleton(&write_skeleton(&data), 1.0).unwrap();

        assert_eq!(parsed.name, data.name);
        assert_eq!(parsed.bones, data.bones);
        assert_eq!(parsed.skin_names(), data.skin_names());
        assert_eq!(parsed.animation_names(), data.animation_names());
        assert!(parsed.default_skin.is_some());
        assert_eq!(parsed.find_skin("hair/x").unwrap().category, data.find_skin("hair/x").unwrap().category);
    }
}
