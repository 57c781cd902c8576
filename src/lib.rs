#![doc = include_str!("../README.md")]

// Pipeline entry points
pub mod config;
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod video;

// Individual stages, usable on their own.
pub mod blend;
pub mod color;
pub mod draw;
pub mod edges;
pub mod filters;
pub mod region;
pub mod segments;

// --- High-level re-exports -------------------------------------------------

pub use crate::detector::{LaneDetector, LaneFrame, LaneParams, StageImages};
pub use crate::diagnostics::LaneReport;
pub use crate::error::{LaneError, Result};
pub use crate::image::{GrayFrame, RgbFrame};
pub use crate::video::{FrameDriver, FrameSink, FrameSource};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use lane_finder::prelude::*;
///
/// # fn main() -> lane_finder::Result<()> {
/// let frame = RgbFrame::filled(960, 540, [90, 90, 90]);
/// let detector = LaneDetector::new(LaneParams::default())?;
/// let lane = detector.process(&frame)?;
/// println!("segments={} total_ms={:.3}", lane.report.segments.len(), lane.report.timings.total_ms);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{ImageView, RgbFrame};
    pub use crate::{LaneDetector, LaneFrame, LaneParams};
}
