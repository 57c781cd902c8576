use super::{FrameSink, FrameSource};
use crate::error::Result;
use crate::image::RgbFrame;
use std::collections::VecDeque;

/// Clip held in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    frames: VecDeque<RgbFrame>,
    fps: Option<f64>,
    total: usize,
}

impl MemorySource {
    pub fn new(frames: Vec<RgbFrame>) -> Self {
        let total = frames.len();
        Self {
            frames: frames.into(),
            fps: None,
            total,
        }
    }

    pub fn with_fps(mut self, fps: f64) -> Self {
        self.fps = Some(fps);
        self
    }
}

impl FrameSource for MemorySource {
    fn next_frame(&mut self) -> Result<Option<RgbFrame>> {
        Ok(self.frames.pop_front())
    }

    fn fps(&self) -> Option<f64> {
        self.fps
    }

    fn frame_count_hint(&self) -> Option<usize> {
        Some(self.total)
    }
}

/// Collects written frames.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    pub frames: Vec<RgbFrame>,
    pub finished: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameSink for MemorySink {
    fn write_frame(&mut self, frame: &RgbFrame) -> Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}
