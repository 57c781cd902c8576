//! Video mode: pull frames from a source, run the lane pipeline on each one,
//! push the composited frames to a sink.
//!
//! Backends
//! - [`MemorySource`] / [`MemorySink`] – in-memory clips.
//! - [`ImageSequenceSource`] / [`ImageSequenceSink`] – directories of stills.
//! - `VideoFileSource` / `VideoFileSink` – container files through OpenCV,
//!   behind the `video-file` feature.
//!
//! [`open_source`] and [`open_sink`] pick a backend from the path.

mod driver;
mod memory;
#[cfg(feature = "video-file")]
mod container;
mod sequence;

pub use driver::{DriverState, FrameDriver, VideoSummary};
pub use memory::{MemorySink, MemorySource};
#[cfg(feature = "video-file")]
pub use container::{VideoFileSink, VideoFileSource};
pub use sequence::{ImageSequenceSink, ImageSequenceSource};

use crate::error::Result;
use crate::image::RgbFrame;
use std::path::Path;

/// A stream of RGB frames, read once from start to end.
pub trait FrameSource {
    /// Next frame, or `None` once the stream is exhausted.
    fn next_frame(&mut self) -> Result<Option<RgbFrame>>;

    /// Native frame rate, if the backend knows it.
    fn fps(&self) -> Option<f64> {
        None
    }

    fn frame_count_hint(&self) -> Option<usize> {
        None
    }
}

/// Destination for processed frames. Output is only valid after `finish`.
pub trait FrameSink {
    fn write_frame(&mut self, frame: &RgbFrame) -> Result<()>;

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Open a directory of stills, or a container file when built with
/// `video-file`.
pub fn open_source(path: &Path) -> Result<Box<dyn FrameSource>> {
    if path.is_dir() {
        return Ok(Box::new(ImageSequenceSource::open(path)?));
    }
    open_file_source(path)
}

/// Directory-like paths (existing directory or no extension) get a still
/// sequence; anything else is a container file.
pub fn open_sink(path: &Path, fps: Option<f64>) -> Result<Box<dyn FrameSink>> {
    if path.is_dir() || path.extension().is_none() {
        return Ok(Box::new(ImageSequenceSink::create(path)?));
    }
    open_file_sink(path, fps)
}

#[cfg(feature = "video-file")]
fn open_file_source(path: &Path) -> Result<Box<dyn FrameSource>> {
    Ok(Box::new(VideoFileSource::open(path)?))
}

#[cfg(not(feature = "video-file"))]
fn open_file_source(path: &Path) -> Result<Box<dyn FrameSource>> {
    Err(crate::error::LaneError::Video(format!(
        "{} is not a directory; container files need the `video-file` feature",
        path.display()
    )))
}

#[cfg(feature = "video-file")]
fn open_file_sink(path: &Path, fps: Option<f64>) -> Result<Box<dyn FrameSink>> {
    Ok(Box::new(VideoFileSink::create(path, fps)))
}

#[cfg(not(feature = "video-file"))]
fn open_file_sink(path: &Path, _fps: Option<f64>) -> Result<Box<dyn FrameSink>> {
    Err(crate::error::LaneError::Video(format!(
        "cannot write {}: container files need the `video-file` feature",
        path.display()
    )))
}
