//! Sobel image gradients with L1 or L2 magnitude.
//!
//! - Convolves the 3×3 Sobel pair with replicate (clamped) borders.
//! - Works on 0..255 intensities, so magnitudes share units with the
//!   hysteresis thresholds (a full black/white step has L1 magnitude 1020).
//!
//! Complexity: O(W·H); memory: three float planes.
use crate::image::{GrayFrame, ImageF32, ImageView, ImageViewMut};
use serde::{Deserialize, Serialize};

type Kernel3 = [[f32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// How the gradient vector is reduced to a magnitude.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientNorm {
    /// `|gx| + |gy|`
    #[default]
    L1,
    /// `sqrt(gx² + gy²)`
    L2,
}

/// Per‑pixel gradient buffers.
#[derive(Clone, Debug)]
pub struct Grad {
    /// Horizontal derivative
    pub gx: ImageF32,
    /// Vertical derivative
    pub gy: ImageF32,
    pub mag: ImageF32,
}

/// Compute Sobel gradients of an 8-bit intensity frame.
pub fn sobel_gradients(gray: &GrayFrame, norm: GradientNorm) -> Grad {
    let l = ImageF32::from_gray(gray);
    let (w, h) = (l.w, l.h);
    let mut gx = ImageF32::new(w, h);
    let mut gy = ImageF32::new(w, h);
    let mut mag = ImageF32::new(w, h);

    if w == 0 || h == 0 {
        return Grad { gx, gy, mag };
    }

    for y in 0..h {
        let rows = [
            l.row(y.saturating_sub(1)),
            l.row(y),
            l.row((y + 1).min(h - 1)),
        ];
        let out_gx = gx.row_mut(y);
        let out_gy = gy.row_mut(y);
        let out_mag = mag.row_mut(y);
        for x in 0..w {
            let xs = [x.saturating_sub(1), x, (x + 1).min(w - 1)];

            let mut sum_x = 0.0;
            let mut sum_y = 0.0;
            for (ky, row) in rows.iter().enumerate() {
                for (kx, &sx) in xs.iter().enumerate() {
                    sum_x += row[sx] * SOBEL_KERNEL_X[ky][kx];
                    sum_y += row[sx] * SOBEL_KERNEL_Y[ky][kx];
                }
            }

            out_gx[x] = sum_x;
            out_gy[x] = sum_y;
            out_mag[x] = match norm {
                GradientNorm::L1 => sum_x.abs() + sum_y.abs(),
                GradientNorm::L2 => (sum_x * sum_x + sum_y * sum_y).sqrt(),
            };
        }
    }

    Grad { gx, gy, mag }
}
