//! Error type shared by every stage of the lane pipeline.
use std::path::PathBuf;

/// Frame shape as `(width, height, channels)`.
pub type Shape = (usize, usize, usize);

#[derive(Debug, thiserror::Error)]
pub enum LaneError {
    /// An input image could not be opened or decoded.
    #[error("failed to open image {path}: {source}")]
    ImageOpen {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// An output image could not be encoded or written.
    #[error("failed to save image {path}: {source}")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize JSON for {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Two frames combined by a per-pixel operation differ in shape.
    #[error("frame shapes differ: {left:?} vs {right:?}")]
    ShapeMismatch { left: Shape, right: Shape },

    #[error("buffer of {len} bytes cannot hold a {width}x{height}x{channels} frame")]
    BufferSize {
        len: usize,
        width: usize,
        height: usize,
        channels: usize,
    },

    #[error("invalid parameter: {0}")]
    InvalidParams(String),

    #[error("video stream error: {0}")]
    Video(String),

    #[cfg(feature = "video-file")]
    #[error(transparent)]
    OpenCv(#[from] opencv::Error),
}

pub type Result<T> = std::result::Result<T, LaneError>;
