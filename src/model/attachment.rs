use serde::{Deserialize, Serialize};

/// Texture coordinates of an atlas region, resolved when the skeleton is linked
/// against its atlas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionUv {
    pub page: usize,
    pub u: f32,
    pub v: f32,
    pub u2: f32,
    pub v2: f32,
    pub rotate: bool,
}

impl RegionUv {
    /// Corner UVs in quad order: bottom-left, bottom-right, top-right, top-left.
    pub fn corners(&self) -> [[f32; 2]; 4] {
        if self.rotate {
            [
                [self.u2, self.v2],
                [self.u2, self.v],
                [self.u, self.v],
                [self.u, self.v2],
            ]
        } else {
            [
                [self.u, self.v2],
                [self.u2, self.v2],
                [self.u2, self.v],
                [self.u, self.v],
            ]
        }
    }
}

/// Textured quad attached to a slot's bone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionAttachment {
    pub path: String, // atlas region name
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(skip)]
    pub region: Option<RegionUv>,
}

impl RegionAttachment {
    pub fn new(path: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            path: path.into(),
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            width,
            height,
            region: None,
        }
    }

    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Quad corners in bone space, same order as [`RegionUv::corners`].
    pub fn local_corners(&self) -> [[f32; 2]; 4] {
        let hw = self.width * self.scale_x * 0.5;
        let hh = self.height * self.scale_y * 0.5;
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        [[-hw, -hh], [hw, -hh], [hw, hh], [-hw, hh]].map(|[x, y]| {
            [
                self.x + x * cos - y * sin,
                self.y + x * sin + y * cos,
            ]
        })
    }
}
