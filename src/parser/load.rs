use crate::error::{AssetError, ParseError};
use crate::model::SkeletonData;
use crate::parser::parser::{ChunkReader, read_animations, read_bones, read_skins, read_slots};
use crate::parser::{SKELETON_MAGIC, SKELETON_VERSION};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};

/// Parses a skeleton binary. `scale` multiplies every length in the file.
pub fn load_skeleton(bytes: &[u8], scale: f32) -> Result<SkeletonData, AssetError> {
    let mut file = Cursor::new(bytes);

    let mut magic = [0u8; 4];
    if file.read_exact(&mut magic).is_err() || &magic != SKELETON_MAGIC {
        return Err(AssetError::BadMagic);
    }
    let version = file.read_u32::<LittleEndian>()?;
    if version != SKELETON_VERSION {
        return Err(AssetError::UnsupportedVersion(version));
    }

    let mut data = SkeletonData::default();

    loop {
        let mut tag = [0u8; 4];
        if file.read_exact(&mut tag).is_err() {
            break;
        }

        let size = file
            .read_u32::<LittleEndian>()
            .map_err(|_| ParseError::new(&tag, "missing chunk size"))?;
        let start = file.position() as usize;
        let end = start + size as usize;
        if end > bytes.len() {
            return Err(ParseError::new(&tag, format!("chunk of {} bytes overruns file", size)).into());
        }

        let mut chunk = ChunkReader::new(tag, &bytes[start..end]);
        match &tag {
            b"INFO" => {
                data.name = chunk.string()?;
            }
            b"BONE" => {
                read_bones(&mut chunk, &mut data, scale)?;
                log::debug!("Loaded {} bones", data.bones.len());
            }
            b"SLOT" => {
                read_slots(&mut chunk, &mut data)?;
                log::debug!("Loaded {} slots", data.slots.len());
            }
            b"SKIN" => {
                read_skins(&mut chunk, &mut data, scale)?;
                log::debug!("Loaded {} skins", data.skins.len());
            }
            b"ANIM" => {
                read_animations(&mut chunk, &mut data, scale)?;
                log::debug!("Loaded {} animations", data.animations.len());
            }
            _ => {
                log::debug!(
                    "Skipping unknown chunk {} ({} bytes)",
                    String::from_utf8_lossy(&tag),
                    size
                );
            }
        }

        file.set_position(end as u64);
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;
    use crate::parser::write_skeleton;

    #[test]
    fn rejects_foreign_files() {
        assert!(matches!(load_skeleton(b"MDLX\0\0\0\0", 1.0), Err(AssetError::BadMagic)));
        assert!(matches!(load_skeleton(b"SK", 1.0), Err(AssetError::BadMagic)));

        let mut bytes = SKELETON_MAGIC.to_vec();
        bytes.extend_from_slice(&7u32.to_le_bytes());
        assert!(matches!(
            load_skeleton(&bytes, 1.0),
            Err(AssetError::UnsupportedVersion(7))
        ));
    }

    #[test]
    fn skips_unknown_chunks() {
        let data = demo::skeleton_data();
        let mut bytes = write_skeleton(&data);
        bytes.extend_from_slice(b"XTRA");
        bytes.extend_from_slice(&3u32.to_le_bytes());
        bytes.extend_from_slice(&[1, 2, 3]);

        let parsed = load_skeleton(&bytes, 1.0).unwrap();
        assert_eq!(parsed.skin_names(), data.skin_names());
    }

    #[test]
    fn truncated_chunk_is_a_parse_error() {
        let bytes = write_skeleton(&demo::skeleton_data());
        let err = load_skeleton(&bytes[..bytes.len() - 3], 1.0).unwrap_err();
        assert!(matches!(err, AssetError::Parse(_)), "{err}");
    }

    fn chunk(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut out = tag.to_vec();
        out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        out.extend_from_slice(payload);
        out
    }

    #[test]
    fn oversized_key_count_is_a_parse_error() {
        let mut bone = 1u32.to_le_bytes().to_vec();
        bone.extend_from_slice(&4u16.to_le_bytes());
        bone.extend_from_slice(b"root");
        bone.extend_from_slice(&(-1i32).to_le_bytes());
        for v in [0.0f32, 0.0, 0.0, 1.0, 1.0, 0.0] {
            bone.extend_from_slice(&v.to_le_bytes());
        }

        let mut anim = 1u32.to_le_bytes().to_vec();
        anim.extend_from_slice(&3u16.to_le_bytes());
        anim.extend_from_slice(b"bad");
        anim.extend_from_slice(&1.0f32.to_le_bytes());
        anim.extend_from_slice(&1u32.to_le_bytes()); // one bone timeline
        anim.extend_from_slice(&0u32.to_le_bytes()); // bone 0
        anim.push(0); // rotate
        anim.extend_from_slice(&u32::MAX.to_le_bytes());

        let mut bytes = SKELETON_MAGIC.to_vec();
        bytes.extend_from_slice(&SKELETON_VERSION.to_le_bytes());
        bytes.extend(chunk(b"BONE", &bone));
        bytes.extend(chunk(b"ANIM", &anim));

        let err = load_skeleton(&bytes, 1.0).unwrap_err();
        assert!(matches!(err, AssetError::Parse(ref e) if e.chunk == "ANIM"), "{err}");
    }

    #[test]
    fn scale_applies_to_lengths() {
        let bytes = write_skeleton(&demo::skeleton_data());
        let plain = load_skeleton(&bytes, 1.0).unwrap();
        let half = load_skeleton(&bytes, 0.5).unwrap();

        let torso = plain.find_bone("torso").unwrap();
        assert_eq!(half.bones[torso].y, plain.bones[torso].y * 0.5);
        assert_eq!(half.bones[torso].rotation, plain.bones[torso].rotation);

        let (slot, name, att) = plain.skins[0].attachments().next().unwrap();
        let scaled = half.skins[0].attachment(slot, name).unwrap();
        assert_eq!(scaled.width, att.width * 0.5);
    }
}
