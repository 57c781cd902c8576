//! Non‑maximum suppression on gradient magnitude with direction alignment.
//!
//! Each pixel above the low threshold is compared against its two
//! neighbours along the gradient direction, quantised to 0°, 45°, 90° or
//! 135°. On the axis-aligned directions the comparison is asymmetric
//! (strictly greater than the previous neighbour, greater or equal to the
//! next one) so a two-pixel plateau, as produced by a sharp step, keeps
//! exactly one pixel. Samples outside the frame count as zero magnitude.
use super::grad::Grad;
use crate::image::ImageView;

const TAN_22_5_DEG: f32 = 0.414_213_56;
const TAN_67_5_DEG: f32 = 2.414_213_6;

/// Classification of a pixel after suppression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum EdgeClass {
    Suppressed = 0,
    /// Local maximum above the low threshold; kept only if connected to a strong pixel.
    Weak = 1,
    /// Local maximum above the high threshold.
    Strong = 2,
}

/// Thin the gradient magnitude to local maxima and classify them against
/// the two hysteresis thresholds.
pub fn run_nms(grad: &Grad, low: f32, high: f32) -> Vec<EdgeClass> {
    let w = grad.mag.width();
    let h = grad.mag.height();
    let mut classes = vec![EdgeClass::Suppressed; w * h];
    if w == 0 || h == 0 {
        return classes;
    }

    let mag_at = |x: isize, y: isize| -> f32 {
        if x < 0 || y < 0 || x >= w as isize || y >= h as isize {
            0.0
        } else {
            grad.mag.get(x as usize, y as usize)
        }
    };

    for y in 0..h {
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);
        let mag_row = grad.mag.row(y);
        let yi = y as isize;

        for x in 0..w {
            let m = mag_row[x];
            if m <= low {
                continue;
            }
            let xi = x as isize;
            let gx = gx_row[x];
            let gy = gy_row[x];
            let ax = gx.abs();
            let ay = gy.abs();

            let is_max = if ay < ax * TAN_22_5_DEG {
                m > mag_at(xi - 1, yi) && m >= mag_at(xi + 1, yi)
            } else if ay > ax * TAN_67_5_DEG {
                m > mag_at(xi, yi - 1) && m >= mag_at(xi, yi + 1)
            } else {
                let s: isize = if (gx < 0.0) != (gy < 0.0) { -1 } else { 1 };
                m > mag_at(xi - s, yi - 1) && m > mag_at(xi + s, yi + 1)
            };
            if !is_max {
                continue;
            }

            classes[y * w + x] = if m > high {
                EdgeClass::Strong
            } else {
                EdgeClass::Weak
            };
        }
    }

    classes
}
