//! Row-oriented access shared by the frame types.
//!
//! Every image in the crate is stored tightly packed in row-major order with
//! interleaved channels, so a row is `width * channels` consecutive samples.
use std::slice::{ChunksExact, ChunksExactMut};

pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn channels(&self) -> usize;

    /// All samples, row-major, channels interleaved.
    fn samples(&self) -> &[Self::Pixel];

    #[inline]
    fn row_len(&self) -> usize {
        self.width() * self.channels()
    }

    #[inline]
    fn row(&self, y: usize) -> &[Self::Pixel] {
        let len = self.row_len();
        &self.samples()[y * len..(y + 1) * len]
    }

    fn rows(&self) -> ChunksExact<'_, Self::Pixel> {
        // `chunks_exact(0)` panics; an empty image simply has no rows.
        self.samples().chunks_exact(self.row_len().max(1))
    }

    #[inline]
    fn shape(&self) -> (usize, usize, usize) {
        (self.width(), self.height(), self.channels())
    }

    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

pub trait ImageViewMut: ImageView {
    fn samples_mut(&mut self) -> &mut [Self::Pixel];

    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [Self::Pixel] {
        let len = self.row_len();
        &mut self.samples_mut()[y * len..(y + 1) * len]
    }

    fn rows_mut(&mut self) -> ChunksExactMut<'_, Self::Pixel> {
        let len = self.row_len().max(1);
        self.samples_mut().chunks_exact_mut(len)
    }
}
