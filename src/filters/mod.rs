//! Separable smoothing filters.
//!
//! A separable 2D kernel is applied as a horizontal 1D pass followed by a
//! vertical 1D pass over an `ImageF32` intermediate. Borders use
//! reflect-101 (`dcb|abcd|cba`), so the outermost row/column is never
//! duplicated.

pub mod gaussian;

use crate::image::{GrayFrame, ImageF32, ImageView, ImageViewMut};

pub use gaussian::{gaussian_blur, GaussianKernel};

/// Trait implemented by separable 1D filters.
pub trait SeparableFilter {
    /// The 1D taps (left-to-right). The length is odd and the centre tap is
    /// aligned with the output sample.
    fn taps(&self) -> &[f32];
}

/// Map `idx` into `0..len` with reflect-101 borders.
#[inline]
pub(crate) fn reflect_101(idx: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let last = len as isize - 1;
    let mut i = idx;
    // Loop handles kernels wider than the image.
    loop {
        if i < 0 {
            i = -i;
        } else if i > last {
            i = 2 * last - i;
        } else {
            return i as usize;
        }
    }
}

/// Apply `filter` along both axes of an 8-bit frame.
pub fn apply_separable(filter: &dyn SeparableFilter, src: &GrayFrame) -> GrayFrame {
    let (w, h) = (src.width(), src.height());
    if w == 0 || h == 0 {
        return src.clone();
    }
    let taps = filter.taps();
    let radius = (taps.len() / 2) as isize;

    let mut horiz = ImageF32::new(w, h);
    for (src_row, dst_row) in src.rows().zip(horiz.rows_mut()) {
        for (x, dst) in dst_row.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for (k, &tap) in taps.iter().enumerate() {
                let sx = reflect_101(x as isize + k as isize - radius, w);
                acc += tap * src_row[sx] as f32;
            }
            *dst = acc;
        }
    }

    let mut out = ImageF32::new(w, h);
    for y in 0..h {
        let dst_row = out.row_mut(y);
        for (k, &tap) in taps.iter().enumerate() {
            let sy = reflect_101(y as isize + k as isize - radius, h);
            let src_row = horiz.row(sy);
            for (dst, &v) in dst_row.iter_mut().zip(src_row) {
                *dst += tap * v;
            }
        }
    }
    out.to_gray()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflect_101_mirrors_without_repeating_the_edge() {
        assert_eq!(reflect_101(-1, 5), 1);
        assert_eq!(reflect_101(-2, 5), 2);
        assert_eq!(reflect_101(5, 5), 3);
        assert_eq!(reflect_101(6, 5), 2);
        assert_eq!(reflect_101(3, 5), 3);
        assert_eq!(reflect_101(-3, 1), 0);
    }
}
