use super::{apply_separable, SeparableFilter};
use crate::error::{LaneError, Result};
use crate::image::GrayFrame;

// Fixed binomial tables used for small kernels when sigma is derived.
const TAPS_1: [f32; 1] = [1.0];
const TAPS_3: [f32; 3] = [0.25, 0.5, 0.25];
const TAPS_5: [f32; 5] = [0.0625, 0.25, 0.375, 0.25, 0.0625];
const TAPS_7: [f32; 7] = [
    0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125,
];

/// Normalised 1D Gaussian kernel of odd size.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianKernel {
    taps: Vec<f32>,
    sigma: f32,
}

impl GaussianKernel {
    /// Build a kernel of `ksize` taps.
    ///
    /// `sigma <= 0` derives the spread from the size as
    /// `0.3 * ((ksize - 1) * 0.5 - 1) + 0.8`; sizes 1, 3, 5 and 7 then use
    /// the binomial approximations (`[1, 4, 6, 4, 1] / 16` for 5).
    pub fn new(ksize: usize, sigma: f32) -> Result<Self> {
        if ksize == 0 || ksize % 2 == 0 {
            return Err(LaneError::InvalidParams(format!(
                "gaussian kernel size must be odd and positive, got {ksize}"
            )));
        }
        if !sigma.is_finite() {
            return Err(LaneError::InvalidParams(format!(
                "gaussian sigma must be finite, got {sigma}"
            )));
        }
        let derived = sigma <= 0.0;
        let sigma = if derived {
            0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8
        } else {
            sigma
        };

        let fixed: Option<&[f32]> = match (derived, ksize) {
            (true, 1) => Some(&TAPS_1),
            (true, 3) => Some(&TAPS_3),
            (true, 5) => Some(&TAPS_5),
            (true, 7) => Some(&TAPS_7),
            _ => None,
        };
        let taps = match fixed {
            Some(t) => t.to_vec(),
            None => sampled_taps(ksize, sigma),
        };
        Ok(Self { taps, sigma })
    }

    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    pub fn sigma(&self) -> f32 {
        self.sigma
    }
}

impl SeparableFilter for GaussianKernel {
    #[inline]
    fn taps(&self) -> &[f32] {
        &self.taps
    }
}

fn sampled_taps(ksize: usize, sigma: f32) -> Vec<f32> {
    let centre = (ksize / 2) as f32;
    let scale = -0.5 / (sigma * sigma);
    let mut taps: Vec<f32> = (0..ksize)
        .map(|i| {
            let d = i as f32 - centre;
            (scale * d * d).exp()
        })
        .collect();
    let sum: f32 = taps.iter().sum();
    for t in &mut taps {
        *t /= sum;
    }
    taps
}

/// Smooth a single-channel frame with a separable Gaussian.
pub fn gaussian_blur(src: &GrayFrame, kernel: &GaussianKernel) -> GrayFrame {
    apply_separable(kernel, src)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageView;

    #[test]
    fn even_or_zero_sizes_are_rejected() {
        assert!(GaussianKernel::new(0, 0.0).is_err());
        assert!(GaussianKernel::new(4, 0.0).is_err());
        assert!(GaussianKernel::new(5, f32::NAN).is_err());
    }

    #[test]
    fn five_tap_kernel_is_binomial() {
        let k = GaussianKernel::new(5, 0.0).unwrap();
        assert_eq!(k.taps(), &TAPS_5);
        assert!((k.sigma() - 1.1).abs() < 1e-6);
    }

    #[test]
    fn sampled_kernel_is_normalised_and_symmetric() {
        let k = GaussianKernel::new(11, 0.0).unwrap();
        let taps = k.taps();
        assert_eq!(taps.len(), 11);
        let sum: f32 = taps.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        for i in 0..5 {
            assert!((taps[i] - taps[10 - i]).abs() < 1e-7);
        }
        assert!(taps[5] > taps[4]);
    }

    #[test]
    fn blur_preserves_shape_and_range() {
        let (w, h) = (23usize, 17usize);
        let mut src = GrayFrame::new(w, h);
        for y in 0..h {
            for x in 0..w {
                let v = 40 + ((x * 37 + y * 91) % 160) as u8;
                src.set(x, y, [v]);
            }
        }
        let min = *src.samples().iter().min().unwrap();
        let max = *src.samples().iter().max().unwrap();
        for ksize in [1usize, 3, 5, 9] {
            let k = GaussianKernel::new(ksize, 0.0).unwrap();
            let out = gaussian_blur(&src, &k);
            assert_eq!(out.shape(), src.shape());
            assert!(out.samples().iter().all(|&v| v >= min && v <= max));
        }
    }

    #[test]
    fn size_one_kernel_is_identity() {
        let src = GrayFrame::from_raw(3, 2, vec![1, 50, 200, 7, 0, 255]).unwrap();
        let k = GaussianKernel::new(1, 0.0).unwrap();
        assert_eq!(gaussian_blur(&src, &k), src);
    }
}
