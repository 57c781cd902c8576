//! Lane detector orchestrating the single-frame pipeline.
//!
//! Overview
//! - Converts the frame to grayscale and smooths it with a Gaussian kernel.
//! - Runs Canny edge detection on the smoothed image.
//! - Extracts line segments from the full edge map with the progressive
//!   probabilistic Hough transform.
//! - Renders the segments onto a blank canvas, keeps only the part that
//!   overlaps the masked source inside the region of interest, and blends
//!   that overlay onto the source frame.
//!
//! Modules
//! - [`params`] – configuration shared by the still-image and video paths.
//! - `pipeline` – the [`LaneDetector`] implementation and its outputs.
//!
//! Key Ideas
//! - Segments are found on the unmasked edge map; the region only decides
//!   which stroke pixels survive into the output.
//! - Outside the region the result is the source scaled by `alpha`.
//! - No state is carried between frames.

pub mod params;
mod pipeline;

pub use params::LaneParams;
pub use pipeline::{LaneDetector, LaneFrame, StageImages};
