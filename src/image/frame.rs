//! Owned 8-bit frames with a compile-time channel count.
//!
//! `GrayFrame` carries intensity or binary (0/255) maps, `RgbFrame` carries
//! colour video frames. Both are plain row-major buffers without padding.
use super::traits::{ImageView, ImageViewMut};
use crate::error::{LaneError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame<const C: usize> {
    w: usize,
    h: usize,
    data: Vec<u8>,
}

/// Single-channel intensity frame.
pub type GrayFrame = Frame<1>;
/// Three-channel colour frame (channel order is up to the producer).
pub type RgbFrame = Frame<3>;

impl<const C: usize> Frame<C> {
    /// Zero-filled (black) frame.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0; w * h * C],
        }
    }

    /// Frame where every pixel equals `px`.
    pub fn filled(w: usize, h: usize, px: [u8; C]) -> Self {
        let mut data = Vec::with_capacity(w * h * C);
        for _ in 0..w * h {
            data.extend_from_slice(&px);
        }
        Self { w, h, data }
    }

    /// Wrap an existing buffer, checking that its length matches `w * h * C`.
    pub fn from_raw(w: usize, h: usize, data: Vec<u8>) -> Result<Self> {
        if data.len() != w * h * C {
            return Err(LaneError::BufferSize {
                len: data.len(),
                width: w,
                height: h,
                channels: C,
            });
        }
        Ok(Self { w, h, data })
    }

    /// Internal constructor for buffers whose length is known to be right.
    pub(crate) fn from_parts(w: usize, h: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), w * h * C);
        Self { w, h, data }
    }

    /// A black frame with the same shape as `self`.
    pub fn zeros_like(&self) -> Self {
        Self::new(self.w, self.h)
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        (y * self.w + x) * C
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [u8; C] {
        let i = self.idx(x, y);
        let mut px = [0u8; C];
        px.copy_from_slice(&self.data[i..i + C]);
        px
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, px: [u8; C]) {
        let i = self.idx(x, y);
        self.data[i..i + C].copy_from_slice(&px);
    }

    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.data.chunks_exact(C)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Ensure `other` has the same width, height and channel count.
    pub fn check_same_shape<const D: usize>(&self, other: &Frame<D>) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(LaneError::ShapeMismatch {
                left: self.shape(),
                right: other.shape(),
            });
        }
        Ok(())
    }
}

impl GrayFrame {
    /// Replicate the single channel into three (edge-map visualisation).
    pub fn to_rgb(&self) -> RgbFrame {
        let mut data = Vec::with_capacity(self.data.len() * 3);
        for &v in &self.data {
            data.extend_from_slice(&[v, v, v]);
        }
        RgbFrame::from_parts(self.w, self.h, data)
    }

    /// Number of non-zero samples.
    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }
}

impl<const C: usize> ImageView for Frame<C> {
    type Pixel = u8;

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
        C
    }
    #[inline]
    fn samples(&self) -> &[u8] {
        &self.data
    }
}

impl<const C: usize> ImageViewMut for Frame<C> {
    #[inline]
    fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}
