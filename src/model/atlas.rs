use super::RegionUv;
use image::RgbaImage;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AtlasPage {
    pub name: String, // image file, relative to the atlas
    pub width: u32,
    pub height: u32,
    pub pma: bool,
    /// Decoded page image; filled by the loader after the text is parsed.
    pub image: Option<Arc<RgbaImage>>,
}

impl AtlasPage {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            pma: false,
            image: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AtlasRegion {
    pub name: String,
    pub page: usize,
    pub x: u32,
    pub y: u32,
    pub width: u32, // unrotated size; the packed footprint is swapped when `rotate`
    pub height: u32,
    pub rotate: bool,
}

impl AtlasRegion {
    /// Right and bottom edges of the packed footprint, `None` on overflow.
    pub fn extent(&self) -> Option<(u32, u32)> {
        let (w, h) = if self.rotate {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        };
        Some((self.x.checked_add(w)?, self.y.checked_add(h)?))
    }
}

#[derive(Debug, Clone, Default)]
pub struct TextureAtlas {
    pub pages: Vec<AtlasPage>,
    pub regions: Vec<AtlasRegion>,
}

impl TextureAtlas {
    pub fn find_region(&self, name: &str) -> Option<&AtlasRegion> {
        self.regions.iter().find(|r| r.name == name)
    }

    /// Whether the region lies inside its page. Pages whose size is not
    /// known yet accept any region that does not overflow.
    pub fn region_fits(&self, region: &AtlasRegion) -> bool {
        let (Some(page), Some((right, bottom))) = (self.pages.get(region.page), region.extent()) else {
            return false;
        };
        page.width == 0 || page.height == 0 || (right <= page.width && bottom <= page.height)
    }

    /// Normalized texture coordinates of a region on its page.
    pub fn region_uv(&self, region: &AtlasRegion) -> Option<RegionUv> {
        let page = self.pages.get(region.page)?;
        if page.width == 0 || page.height == 0 {
            return None;
        }
        let (w, h) = (page.width as f32, page.height as f32);
        let (right, bottom) = region.extent()?;
        Some(RegionUv {
            page: region.page,
            u: region.x as f32 / w,
            v: region.y as f32 / h,
            u2: right as f32 / w,
            v2: bottom as f32 / h,
            rotate: region.rotate,
        })
    }
}
