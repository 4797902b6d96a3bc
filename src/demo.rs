//! Built-in mix-and-match character used by `--write-demo` and the tests.
//!
//! Three fragments (`body/a`, `body/b`, `hair/x`) over a five bone rig, plus a
//! `default` skin carrying the ground shadow, and two looping clips.

use crate::error::AssetError;
use crate::loader::AssetBundle;
use crate::model::{
    AnimationClip, AtlasPage, AtlasRegion, BoneData, BoneKey, BoneProperty, BoneTimeline,
    RegionAttachment, SkeletonData, SkinCategory, SkinFragment, SlotData, TextureAtlas,
};
use crate::parser::{link_regions, write_skeleton};
use image::{Rgba, RgbaImage};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const SKELETON_FILE: &str = "skelvis-demo-pro.skel";
pub const ATLAS_FILE: &str = "skelvis-demo-pma.atlas";
pub const PAGE_FILE: &str = "skelvis-demo-pma.png";

const PAGE_SIZE: u32 = 128;

// name, x, y, w, h, colour
const REGIONS: [(&str, u32, u32, u32, u32, [u8; 4]); 7] = [
    ("body/a/torso", 0, 0, 24, 40, [214, 120, 80, 255]),
    ("body/a/head", 24, 0, 24, 24, [240, 190, 150, 255]),
    ("body/a/legs", 48, 0, 24, 32, [70, 90, 160, 255]),
    ("body/b/torso", 0, 40, 24, 40, [90, 170, 100, 255]),
    ("body/b/legs", 24, 40, 24, 32, [40, 40, 40, 255]),
    ("hair/x/hair", 48, 40, 28, 16, [120, 70, 30, 255]),
    ("shadow", 0, 96, 48, 12, [0, 0, 0, 96]),
];

pub fn skeleton_data() -> SkeletonData {
    let mut data = SkeletonData {
        name: "skelvis-demo".to_string(),
        ..Default::default()
    };

    let bone = |name: &str, parent: Option<usize>, y: f32, length: f32| BoneData {
        y,
        length,
        ..BoneData::new(name, parent)
    };
    data.bones = vec![
        bone("root", None, 0.0, 0.0),
        bone("hip", Some(0), 36.0, 0.0),
        bone("torso", Some(1), 4.0, 40.0),
        bone("head", Some(2), 44.0, 24.0),
        bone("legs", Some(1), -18.0, 0.0),
    ];
    data.slots = vec![
        SlotData::new("shadow", 0, Some("shadow")),
        SlotData::new("legs", 4, Some("legs")),
        SlotData::new("torso", 2, Some("torso")),
        SlotData::new("head", 3, Some("head")),
        SlotData::new("hair", 3, Some("hair")),
    ];

    let mut default = SkinFragment::new("default");
    default.set_attachment(0, "shadow", RegionAttachment::new("shadow", 48.0, 12.0));
    data.push_skin(default);

    let mut body_a = SkinFragment::new("body/a");
    body_a.set_attachment(1, "legs", RegionAttachment::new("body/a/legs", 24.0, 32.0));
    body_a.set_attachment(2, "torso", RegionAttachment::new("body/a/torso", 24.0, 40.0).with_offset(0.0, 20.0));
    body_a.set_attachment(3, "head", RegionAttachment::new("body/a/head", 24.0, 24.0).with_offset(0.0, 12.0));
    data.push_skin(body_a);

    let mut body_b = SkinFragment::new("body/b");
    body_b.set_attachment(1, "legs", RegionAttachment::new("body/b/legs", 24.0, 32.0));
    body_b.set_attachment(2, "torso", RegionAttachment::new("body/b/torso", 24.0, 40.0).with_offset(0.0, 20.0));
    data.push_skin(body_b);

    let mut hair = SkinFragment::new("hair/x").with_category(SkinCategory::Hair);
    hair.set_attachment(4, "hair", RegionAttachment::new("hair/x/hair", 28.0, 16.0).with_offset(0.0, 24.0));
    data.push_skin(hair);

    let key = |time: f32, a: f32, b: f32| BoneKey { time, value: [a, b] };

    let mut idle = AnimationClip::new("idle", 2.0);
    idle.bone_timelines.push(BoneTimeline {
        bone: 2,
        property: BoneProperty::Rotate,
        keys: vec![key(0.0, 0.0, 0.0), key(1.0, 4.0, 0.0), key(2.0, 0.0, 0.0)],
    });
    idle.bone_timelines.push(BoneTimeline {
        bone: 3,
        property: BoneProperty::Rotate,
        keys: vec![key(0.0, 0.0, 0.0), key(1.0, -6.0, 0.0), key(2.0, 0.0, 0.0)],
    });
    data.animations.push(idle);

    let mut walk = AnimationClip::new("walk", 1.0);
    walk.bone_timelines.push(BoneTimeline {
        bone: 1,
        property: BoneProperty::Translate,
        keys: vec![key(0.0, 0.0, 0.0), key(0.25, 0.0, 3.0), key(0.5, 0.0, 0.0), key(0.75, 0.0, 3.0), key(1.0, 0.0, 0.0)],
    });
    walk.bone_timelines.push(BoneTimeline {
        bone: 2,
        property: BoneProperty::Rotate,
        keys: vec![key(0.0, -3.0, 0.0), key(0.5, 3.0, 0.0), key(1.0, -3.0, 0.0)],
    });
    walk.bone_timelines.push(BoneTimeline {
        bone: 4,
        property: BoneProperty::Scale,
        keys: vec![key(0.0, 1.0, 1.0), key(0.5, 1.0, 0.9), key(1.0, 1.0, 1.0)],
    });
    data.animations.push(walk);

    data
}

pub fn atlas() -> TextureAtlas {
    let mut page = AtlasPage::new(PAGE_FILE, PAGE_SIZE, PAGE_SIZE);
    page.image = Some(Arc::new(page_image()));
    TextureAtlas {
        pages: vec![page],
        regions: REGIONS
            .iter()
            .map(|&(name, x, y, width, height, _)| AtlasRegion {
                name: name.to_string(),
                page: 0,
                x,
                y,
                width,
                height,
                rotate: false,
            })
            .collect(),
    }
}

/// Text form of [`atlas`], as written next to the skeleton binary.
pub fn atlas_text() -> String {
    let atlas = atlas();
    let mut out = String::new();
    for (idx, page) in atlas.pages.iter().enumerate() {
        let _ = writeln!(out, "{}", page.name);
        let _ = writeln!(out, "size: {},{}", page.width, page.height);
        let _ = writeln!(out, "filter: Linear,Linear");
        let _ = writeln!(out, "pma: {}", page.pma);
        for region in atlas.regions.iter().filter(|r| r.page == idx) {
            let _ = writeln!(out, "{}", region.name);
            let _ = writeln!(
                out,
                "bounds: {},{},{},{}",
                region.x, region.y, region.width, region.height
            );
        }
        let _ = writeln!(out);
    }
    out
}

pub fn page_image() -> RgbaImage {
    let mut image = RgbaImage::new(PAGE_SIZE, PAGE_SIZE);
    for &(_, x, y, w, h, colour) in &REGIONS {
        for py in y..y + h {
            for px in x..x + w {
                image.put_pixel(px, py, Rgba(colour));
            }
        }
    }
    image
}

/// Linked, ready-to-use bundle, as the loader would produce it.
pub fn bundle() -> Result<AssetBundle, AssetError> {
    let atlas = atlas();
    let mut data = skeleton_data();
    link_regions(&mut data, &atlas)?;
    Ok(AssetBundle::new(atlas, data))
}

/// Writes the skeleton binary, atlas and page image into `dir`. Returns the
/// skeleton path.
pub fn write_to(dir: &Path) -> Result<PathBuf, AssetError> {
    std::fs::create_dir_all(dir)?;
    let skeleton_path = dir.join(SKELETON_FILE);
    std::fs::write(&skeleton_path, write_skeleton(&skeleton_data()))?;
    std::fs::write(dir.join(ATLAS_FILE), atlas_text())?;
    page_image().save(dir.join(PAGE_FILE))?;
    Ok(skeleton_path)
}
