use crate::error::AssetError;
use crate::model::{SkeletonData, TextureAtlas};

/// Resolves every region attachment against the atlas, filling in its UVs.
/// Fails on the first attachment whose region the atlas does not define or
/// whose region lies outside its page.
pub fn link_regions(data: &mut SkeletonData, atlas: &TextureAtlas) -> Result<(), AssetError> {
    for skin in data.all_skins_mut() {
        for attachment in skin.attachments_mut() {
            let region = atlas
                .find_region(&attachment.path)
                .ok_or_else(|| AssetError::MissingRegion(attachment.path.clone()))?;
            if !atlas.region_fits(region) {
                return Err(AssetError::RegionOutOfBounds(region.name.clone()));
            }
            attachment.region = atlas.region_uv(region);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;
    use crate::model::{RegionAttachment, SkinFragment};

    #[test]
    fn fills_uvs_for_every_attachment() {
        let mut data = demo::skeleton_data();
        link_regions(&mut data, &demo::atlas()).unwrap();
        for skin in data.default_skin.iter().chain(&data.skins) {
            for (_, _, attachment) in skin.attachments() {
                assert!(attachment.region.is_some(), "{} not linked", attachment.path);
            }
        }
    }

    #[test]
    fn missing_region_fails() {
        let mut data = demo::skeleton_data();
        let mut skin = SkinFragment::new("broken");
        skin.set_attachment(0, "torso", RegionAttachment::new("nowhere", 4.0, 4.0));
        data.push_skin(skin);

        let err = link_regions(&mut data, &demo::atlas()).unwrap_err();
        assert!(matches!(err, AssetError::MissingRegion(ref name) if name == "nowhere"));
    }

    #[test]
    fn region_outside_its_page_fails() {
        let mut data = demo::skeleton_data();
        let mut atlas = demo::atlas();
        let shadow = atlas.regions.iter_mut().find(|r| r.name == "shadow").unwrap();
        shadow.x = u32::MAX - 4;

        let err = link_regions(&mut data, &atlas).unwrap_err();
        assert!(matches!(err, AssetError::RegionOutOfBounds(ref name) if name == "shadow"));

        atlas.regions.iter_mut().find(|r| r.name == "shadow").unwrap().x = 100;
        let err = link_regions(&mut data, &atlas).unwrap_err();
        assert!(matches!(err, AssetError::RegionOutOfBounds(_)), "{err}");
    }
}
