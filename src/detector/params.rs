//! Parameter types configuring the lane pipeline.
//!
//! Every tuning constant lives in [`LaneParams`] so the still-image and the
//! video paths share a single source of truth. Defaults reproduce the
//! classic setup for 960×540 dash-cam footage.

use crate::blend::BlendWeights;
use crate::color::ChannelOrder;
use crate::edges::CannyParams;
use crate::error::{LaneError, Result};
use crate::region::RegionOfInterest;
use crate::segments::HoughParams;
use serde::{Deserialize, Serialize};

/// Widest stroke accepted for rendered segments, in pixels.
pub const MAX_LINE_THICKNESS: u32 = 1000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneParams {
    /// Which sample of the input frames holds red.
    pub channel_order: ChannelOrder,
    /// Gaussian kernel size (odd).
    pub kernel_size: usize,
    /// Gaussian sigma; `<= 0` derives it from the kernel size.
    pub sigma: f32,
    pub canny: CannyParams,
    pub hough: HoughParams,
    pub region: RegionOfInterest,
    /// Stroke colour of detected segments, in the input's channel order.
    pub line_color: [u8; 3],
    pub line_thickness: u32,
    pub blend: BlendWeights,
}

impl Default for LaneParams {
    fn default() -> Self {
        Self {
            channel_order: ChannelOrder::Rgb,
            kernel_size: 5,
            sigma: 0.0,
            canny: CannyParams::default(),
            hough: HoughParams::default(),
            region: RegionOfInterest::default(),
            line_color: [255, 0, 0],
            line_thickness: 10,
            blend: BlendWeights::default(),
        }
    }
}

impl LaneParams {
    pub fn validate(&self) -> Result<()> {
        if self.kernel_size == 0 || self.kernel_size % 2 == 0 {
            return Err(LaneError::InvalidParams(format!(
                "kernel_size must be odd and positive, got {}",
                self.kernel_size
            )));
        }
        let CannyParams {
            low_threshold,
            high_threshold,
            ..
        } = self.canny;
        if !(low_threshold.is_finite() && high_threshold.is_finite()) || low_threshold < 0.0 {
            return Err(LaneError::InvalidParams(format!(
                "canny thresholds must be finite and non-negative, got ({low_threshold}, {high_threshold})"
            )));
        }
        if low_threshold > high_threshold {
            return Err(LaneError::InvalidParams(format!(
                "canny low threshold {low_threshold} exceeds high threshold {high_threshold}"
            )));
        }
        if !(1..=MAX_LINE_THICKNESS).contains(&self.line_thickness) {
            return Err(LaneError::InvalidParams(format!(
                "line_thickness must be in 1..={MAX_LINE_THICKNESS}, got {}",
                self.line_thickness
            )));
        }
        self.hough.validate()?;
        self.region.validate()
    }
}
