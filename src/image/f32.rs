//! Owned single-channel f32 plane used for intermediate filtering and
//! gradient computation. Values keep the 0..255 intensity scale of the
//! 8-bit source so edge thresholds stay in familiar units.
use super::frame::GrayFrame;
use super::traits::{ImageView, ImageViewMut};

#[derive(Clone, Debug)]
pub struct ImageF32 {
    pub w: usize,
    pub h: usize,
    pub data: Vec<f32>,
}

impl ImageF32 {
    /// Zero-initialised plane of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0.0; w * h],
        }
    }

    /// Widen an 8-bit frame without rescaling.
    pub fn from_gray(gray: &GrayFrame) -> Self {
        Self {
            w: gray.width(),
            h: gray.height(),
            data: gray.samples().iter().map(|&v| v as f32).collect(),
        }
    }

    /// Round to nearest and saturate back to 8 bits.
    pub fn to_gray(&self) -> GrayFrame {
        let data = self
            .data
            .iter()
            .map(|&v| v.round().clamp(0.0, 255.0) as u8)
            .collect();
        GrayFrame::from_parts(self.w, self.h, data)
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.w + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        self.data[y * self.w + x] = v;
    }
}

impl ImageView for ImageF32 {
    type Pixel = f32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn channels(&self) -> usize {
        1
    }
    #[inline]
    fn samples(&self) -> &[f32] {
        &self.data
    }
}

impl ImageViewMut for ImageF32 {
    #[inline]
    fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }
}
