use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in skeleton space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn from_points<I: IntoIterator<Item = [f32; 2]>>(points: I) -> Option<Self> {
        let mut points = points.into_iter();
        let [x, y] = points.next()?;
        let mut bounds = Bounds {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        };
        for point in points {
            bounds.include(point);
        }
        Some(bounds)
    }

    pub fn include(&mut self, [x, y]: [f32; 2]) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> [f32; 2] {
        [
            (self.min_x + self.max_x) * 0.5,
            (self.min_y + self.max_y) * 0.5,
        ]
    }

    /// Same center, each side scaled by `factor`.
    pub fn padded(&self, factor: f32) -> Self {
        let [cx, cy] = self.center();
        let hw = self.width() * 0.5 * factor;
        let hh = self.height() * 0.5 * factor;
        Bounds {
            min_x: cx - hw,
            min_y: cy - hh,
            max_x: cx + hw,
            max_y: cy + hh,
        }
    }
}
