//! Canny edge detector producing a binary (0/255) edge map.
use super::grad::{sobel_gradients, GradientNorm};
use super::nms::{run_nms, EdgeClass};
use crate::image::{GrayFrame, ImageView};
use serde::{Deserialize, Serialize};

pub const EDGE: u8 = 255;

/// Thresholds of the hysteresis stage, in Sobel magnitude units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CannyParams {
    pub low_threshold: f32,
    pub high_threshold: f32,
    pub norm: GradientNorm,
}

impl Default for CannyParams {
    fn default() -> Self {
        Self {
            low_threshold: 50.0,
            high_threshold: 150.0,
            norm: GradientNorm::L1,
        }
    }
}

/// Detect edges on a (smoothed) intensity frame.
///
/// Pixels that survive non-maximum suppression with magnitude above
/// `high_threshold` seed the edge set; candidates above `low_threshold` join
/// it when 8-connected to a seed, directly or through other candidates.
pub fn canny(gray: &GrayFrame, params: &CannyParams) -> GrayFrame {
    let (w, h) = (gray.width(), gray.height());
    let grad = sobel_gradients(gray, params.norm);
    let classes = run_nms(&grad, params.low_threshold, params.high_threshold);

    let mut out = GrayFrame::new(w, h);
    let mut stack: Vec<(usize, usize)> = Vec::new();
    for y in 0..h {
        for x in 0..w {
            if classes[y * w + x] == EdgeClass::Strong {
                out.set(x, y, [EDGE]);
                stack.push((x, y));
            }
        }
    }

    while let Some((x, y)) = stack.pop() {
        for ny in y.saturating_sub(1)..=(y + 1).min(h - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(w - 1) {
                if classes[ny * w + nx] == EdgeClass::Weak && out.get(nx, ny)[0] == 0 {
                    out.set(nx, ny, [EDGE]);
                    stack.push((nx, ny));
                }
            }
        }
    }

    out
}
