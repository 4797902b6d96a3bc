use crate::error::ParseError;
use crate::model::{
    AnimationClip, AttachmentKey, AttachmentTimeline, BoneData, BoneKey, BoneProperty,
    BoneTimeline, RegionAttachment, SkeletonData, SkinCategory, SkinFragment, SlotData,
};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};

/// Reads primitives out of one chunk payload, reporting failures against the chunk tag.
pub(crate) struct ChunkReader<'a> {
    tag: [u8; 4],
    cursor: Cursor<&'a [u8]>,
}

impl<'a> ChunkReader<'a> {
    pub(crate) fn new(tag: [u8; 4], payload: &'a [u8]) -> Self {
        Self {
            tag,
            cursor: Cursor::new(payload),
        }
    }

    pub(crate) fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(&self.tag, message)
    }

    fn eof(&self) -> ParseError {
        self.error(format!("unexpected end of chunk at byte {}", self.cursor.position()))
    }

    pub(crate) fn u8(&mut self) -> Result<u8, ParseError> {
        self.cursor.read_u8().map_err(|_| self.eof())
    }

    pub(crate) fn u16(&mut self) -> Result<u16, ParseError> {
        self.cursor.read_u16::<LittleEndian>().map_err(|_| self.eof())
    }

    pub(crate) fn u32(&mut self) -> Result<u32, ParseError> {
        self.cursor.read_u32::<LittleEndian>().map_err(|_| self.eof())
    }

    pub(crate) fn i32(&mut self) -> Result<i32, ParseError> {
        self.cursor.read_i32::<LittleEndian>().map_err(|_| self.eof())
    }

    pub(crate) fn f32(&mut self) -> Result<f32, ParseError> {
        self.cursor.read_f32::<LittleEndian>().map_err(|_| self.eof())
    }

    pub(crate) fn string(&mut self) -> Result<String, ParseError> {
        let len = self.u16()? as usize;
        let mut bytes = vec![0u8; len];
        self.cursor.read_exact(&mut bytes).map_err(|_| self.eof())?;
        String::from_utf8(bytes).map_err(|_| self.error("string is not valid UTF-8"))
    }

    /// Empty strings encode "none".
    pub(crate) fn opt_string(&mut self) -> Result<Option<String>, ParseError> {
        let s = self.string()?;
        Ok(if s.is_empty() { None } else { Some(s) })
    }

    fn remaining(&self) -> usize {
        let len = self.cursor.get_ref().len() as u64;
        len.saturating_sub(self.cursor.position()) as usize
    }

    /// Capacity for `count` records of at least `min_size` bytes each, bounded
    /// by what is left in the chunk.
    pub(crate) fn capacity(&self, count: u32, min_size: usize) -> usize {
        (count as usize).min(self.remaining() / min_size)
    }

    /// Reads an index and checks it against `len`.
    pub(crate) fn index(&mut self, len: usize, what: &str) -> Result<usize, ParseError> {
        let idx = self.u32()? as usize;
        if idx >= len {
            return Err(self.error(format!("{} index {} out of range ({})", what, idx, len)));
        }
        Ok(idx)
    }
}

pub(crate) fn read_bones(
    chunk: &mut ChunkReader,
    data: &mut SkeletonData,
    scale: f32,
) -> Result<(), ParseError> {
    let count = chunk.u32()?;
    for _ in 0..count {
        let name = chunk.string()?;
        let parent_id = chunk.i32()?;
        let index = data.bones.len();

        // Parents come first so world transforms can be computed in one pass
        let parent = if parent_id < 0 {
            None
        } else if (parent_id as usize) < index {
            Some(parent_id as usize)
        } else {
            return Err(chunk.error(format!(
                "bone '{}' references parent {} which is not defined before it",
                name, parent_id
            )));
        };

        let x = chunk.f32()? * scale;
        let y = chunk.f32()? * scale;
        let rotation = chunk.f32()?;
        let scale_x = chunk.f32()?;
        let scale_y = chunk.f32()?;
        let length = chunk.f32()? * scale;

        data.bones.push(BoneData {
            name,
            parent,
            x,
            y,
            rotation,
            scale_x,
            scale_y,
            length,
        });
    }
    Ok(())
}

pub(crate) fn read_slots(chunk: &mut ChunkReader, data: &mut SkeletonData) -> Result<(), ParseError> {
    let count = chunk.u32()?;
    for _ in 0..count {
        let name = chunk.string()?;
        let bone = chunk.index(data.bones.len(), "bone")?;
        let attachment = chunk.opt_string()?;
        let mut color = [0.0f32; 4];
        for c in &mut color {
            *c = chunk.u8()? as f32 / 255.0;
        }
        data.slots.push(SlotData {
            name,
            bone,
            attachment,
            color,
        });
    }
    Ok(())
}

pub(crate) fn read_skins(
    chunk: &mut ChunkReader,
    data: &mut SkeletonData,
    scale: f32,
) -> Result<(), ParseError> {
    let count = chunk.u32()?;
    for _ in 0..count {
        let name = chunk.string()?;
        let mut skin = SkinFragment::new(name);
        // Unknown tags fall back to name inference
        skin.category = chunk.opt_string()?.and_then(|tag| SkinCategory::from_tag(&tag));

        let attachment_count = chunk.u32()?;
        for _ in 0..attachment_count {
            let slot = chunk.index(data.slots.len(), "slot")?;
            let key = chunk.string()?;
            let path = chunk.opt_string()?.unwrap_or_else(|| key.clone());
            let mut attachment = RegionAttachment::new(path, 0.0, 0.0);
            attachment.x = chunk.f32()? * scale;
            attachment.y = chunk.f32()? * scale;
            attachment.rotation = chunk.f32()?;
            attachment.scale_x = chunk.f32()?;
            attachment.scale_y = chunk.f32()?;
            attachment.width = chunk.f32()? * scale;
            attachment.height = chunk.f32()? * scale;
            skin.set_attachment(slot, key, attachment);
        }

        data.push_skin(skin);
    }
    Ok(())
}

pub(crate) fn read_animations(
    chunk: &mut ChunkReader,
    data: &mut SkeletonData,
    scale: f32,
) -> Result<(), ParseError> {
    let count = chunk.u32()?;
    for _ in 0..count {
        let name = chunk.string()?;
        let duration = chunk.f32()?;
        if duration.is_nan() || duration < 0.0 {
            return Err(chunk.error(format!("animation '{}' has invalid duration {}", name, duration)));
        }
        let mut clip = AnimationClip::new(name, duration);

        let bone_timeline_count = chunk.u32()?;
        for _ in 0..bone_timeline_count {
            let bone = chunk.index(data.bones.len(), "bone")?;
            let code = chunk.u8()?;
            let property = BoneProperty::from_code(code)
                .ok_or_else(|| chunk.error(format!("unknown timeline property {}", code)))?;
            let key_scale = if property == BoneProperty::Translate { scale } else { 1.0 };

            let key_count = chunk.u32()?;
            let mut keys = Vec::with_capacity(chunk.capacity(key_count, 12));
            for _ in 0..key_count {
                let time = chunk.f32()?;
                let value = [chunk.f32()? * key_scale, chunk.f32()? * key_scale];
                keys.push(BoneKey { time, value });
            }
            keys.sort_by(|a, b| a.time.total_cmp(&b.time));
            clip.bone_timelines.push(BoneTimeline {
                bone,
                property,
                keys,
            });
        }

        let attachment_timeline_count = chunk.u32()?;
        for _ in 0..attachment_timeline_count {
            let slot = chunk.index(data.slots.len(), "slot")?;
            let key_count = chunk.u32()?;
            // time + string length prefix
            let mut keys = Vec::with_capacity(chunk.capacity(key_count, 6));
            for _ in 0..key_count {
                let time = chunk.f32()?;
                let name = chunk.opt_string()?;
                keys.push(AttachmentKey { time, name });
            }
            keys.sort_by(|a, b| a.time.total_cmp(&b.time));
            clip.attachment_timelines.push(AttachmentTimeline { slot, keys });
        }

        data.animations.push(clip);
    }
    Ok(())
}
