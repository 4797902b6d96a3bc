use crate::runtime::Bounds;
use crate::settings::FitMode;
use nalgebra_glm as glm;

/// Orthographic projection that frames `bounds` (scaled by `padding`) in a
/// `width` x `height` viewport. `Fit` keeps everything visible, `Expand`
/// fills the viewport and crops the longer side.
pub fn fit_projection(bounds: &Bounds, width: u32, height: u32, mode: FitMode, padding: f32) -> glm::Mat4 {
    let framed = bounds.padded(padding.max(0.01));
    let [cx, cy] = framed.center();
    let region_w = framed.width().max(1.0);
    let region_h = framed.height().max(1.0);
    let aspect = width.max(1) as f32 / height.max(1) as f32;

    let wider = region_w / region_h > aspect;
    let (half_w, half_h) = match (mode, wider) {
        (FitMode::Fit, true) | (FitMode::Expand, false) => (region_w * 0.5, region_w * 0.5 / aspect),
        (FitMode::Fit, false) | (FitMode::Expand, true) => (region_h * 0.5 * aspect, region_h * 0.5),
    };

    glm::ortho(cx - half_w, cx + half_w, cy - half_h, cy + half_h, -1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn project(m: &glm::Mat4, x: f32, y: f32) -> (f32, f32) {
        let p = m * glm::vec4(x, y, 0.0, 1.0);
        (p.x, p.y)
    }

    const TALL: Bounds = Bounds {
        min_x: -10.0,
        min_y: 0.0,
        max_x: 10.0,
        max_y: 100.0,
    };

    #[test]
    fn fit_keeps_the_tall_side_inside() {
        let m = fit_projection(&TALL, 800, 400, FitMode::Fit, 1.0);
        let (_, top) = project(&m, 0.0, 100.0);
        let (_, bottom) = project(&m, 0.0, 0.0);
        assert_relative_eq!(top, 1.0, epsilon = 1e-5);
        assert_relative_eq!(bottom, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn expand_fills_the_narrow_side() {
        let m = fit_projection(&TALL, 800, 400, FitMode::Expand, 1.0);
        let (right, _) = project(&m, 10.0, 50.0);
        assert_relative_eq!(right, 1.0, epsilon = 1e-5);
        let (_, top) = project(&m, 0.0, 100.0);
        assert!(top > 1.0);
    }
}
