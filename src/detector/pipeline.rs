//! The per-frame lane pipeline.
//!
//! ```no_run
//! use lane_finder::image::io::load_rgb_image;
//! use lane_finder::{LaneDetector, LaneParams};
//! use std::path::Path;
//!
//! # fn main() -> lane_finder::Result<()> {
//! let frame = load_rgb_image(Path::new("test_images/solidWhiteRight.jpg"))?;
//! let detector = LaneDetector::new(LaneParams::default())?;
//! let lane = detector.process(&frame)?;
//! println!("{} segments", lane.report.segments.len());
//! # Ok(())
//! # }
//! ```

use super::params::LaneParams;
use crate::blend::{bitwise_and, blend};
use crate::color::grayscale;
use crate::diagnostics::{DetectedSegment, LaneReport, TimingBreakdown};
use crate::draw::render_segments;
use crate::edges::canny;
use crate::error::Result;
use crate::filters::{gaussian_blur, GaussianKernel};
use crate::image::io::{save_gray_image, save_rgb_image};
use crate::image::{GrayFrame, ImageView, RgbFrame};
use crate::region::mask_region;
use crate::segments::{hough_lines_p, LineSegment};
use log::{debug, info};
use std::path::Path;
use std::time::Instant;

/// Composited frame plus its report.
#[derive(Clone, Debug)]
pub struct LaneFrame {
    pub output: RgbFrame,
    pub report: LaneReport,
}

/// Every intermediate frame of one pipeline run.
#[derive(Clone, Debug)]
pub struct StageImages {
    pub gray: GrayFrame,
    pub blurred: GrayFrame,
    pub edges: GrayFrame,
    /// Segments drawn on a black canvas.
    pub lines: RgbFrame,
    /// Edge map (as colour) blended with the line canvas.
    pub edges_lines: RgbFrame,
    pub region_mask: GrayFrame,
    /// Source frame with everything outside the region zeroed.
    pub masked: RgbFrame,
    /// `masked AND lines`: the part of the overlay that survives compositing.
    pub overlay: RgbFrame,
}

impl StageImages {
    /// Write every stage as `<name>.png` into `dir`, plus `result.png`.
    pub fn save(&self, result: &RgbFrame, dir: &Path) -> Result<()> {
        save_gray_image(&self.gray, &dir.join("gray.png"))?;
        save_gray_image(&self.blurred, &dir.join("blurred.png"))?;
        save_gray_image(&self.edges, &dir.join("edges.png"))?;
        save_gray_image(&self.region_mask, &dir.join("region_mask.png"))?;
        save_rgb_image(&self.lines, &dir.join("lines.png"))?;
        save_rgb_image(&self.edges_lines, &dir.join("edges_lines.png"))?;
        save_rgb_image(&self.masked, &dir.join("masked.png"))?;
        save_rgb_image(&self.overlay, &dir.join("overlay.png"))?;
        save_rgb_image(result, &dir.join("result.png"))?;
        info!("stage images written to {}", dir.display());
        Ok(())
    }
}

/// Stateless lane-line detector; one instance can process any number of
/// frames and never carries information from one frame to the next.
#[derive(Clone, Debug)]
pub struct LaneDetector {
    params: LaneParams,
    kernel: GaussianKernel,
}

impl LaneDetector {
    pub fn new(params: LaneParams) -> Result<Self> {
        params.validate()?;
        let kernel = GaussianKernel::new(params.kernel_size, params.sigma)?;
        Ok(Self { params, kernel })
    }

    /// Run the full pipeline and return the composited frame.
    pub fn process(&self, frame: &RgbFrame) -> Result<LaneFrame> {
        self.run(frame).map(|(lane, _)| lane)
    }

    /// Like [`process`](Self::process) but also returns every intermediate.
    pub fn process_with_stages(&self, frame: &RgbFrame) -> Result<(LaneFrame, StageImages)> {
        let (lane, stages) = self.run(frame)?;
        let edges_lines = blend(&stages.edges.to_rgb(), &stages.lines, &self.params.blend)?;
        let region_mask = lane.report.region.rasterize(frame.width(), frame.height());
        Ok((
            lane,
            StageImages {
                gray: stages.gray,
                blurred: stages.blurred,
                edges: stages.edges,
                lines: stages.lines,
                edges_lines,
                region_mask,
                masked: stages.masked,
                overlay: stages.overlay,
            },
        ))
    }

    fn run(&self, frame: &RgbFrame) -> Result<(LaneFrame, Intermediates)> {
        let p = &self.params;
        let start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let gray = timings.time("grayscale", || grayscale(frame, p.channel_order));
        let blurred = timings.time("gaussian_blur", || gaussian_blur(&gray, &self.kernel));
        let edges = timings.time("canny", || canny(&blurred, &p.canny));
        let segments = timings.time("hough", || hough_lines_p(&edges, &p.hough))?;
        let lines = timings.time("render", || {
            render_segments(frame.zeros_like(), &segments, p.line_color, p.line_thickness)
        });

        let polygon = p.region.polygon_for(frame.width(), frame.height());
        let masked = timings.time("region_mask", || mask_region(frame, polygon))?;
        let overlay = bitwise_and(&masked, &lines)?;
        let output = timings.time("composite", || blend(frame, &overlay, &p.blend))?;
        timings.total_ms = start.elapsed().as_secs_f64() * 1000.0;

        let detected = classify(&segments, polygon);
        let report = LaneReport {
            width: frame.width(),
            height: frame.height(),
            edge_pixels: edges.count_nonzero(),
            region: polygon.clone(),
            segments: detected,
            timings,
        };
        debug!(
            "lane pipeline {}x{}: {} edge px, {} segments ({} in region), {:.2} ms",
            report.width,
            report.height,
            report.edge_pixels,
            report.segments.len(),
            report.segments_inside().count(),
            report.timings.total_ms
        );

        Ok((
            LaneFrame { output, report },
            Intermediates {
                gray,
                blurred,
                edges,
                lines,
                masked,
                overlay,
            },
        ))
    }
}

struct Intermediates {
    gray: GrayFrame,
    blurred: GrayFrame,
    edges: GrayFrame,
    lines: RgbFrame,
    masked: RgbFrame,
    overlay: RgbFrame,
}

fn classify(
    segments: &[LineSegment],
    polygon: &crate::region::RegionPolygon,
) -> Vec<DetectedSegment> {
    segments
        .iter()
        .map(|s| DetectedSegment {
            segment: *s,
            inside_region: polygon.contains(&s.midpoint()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_frame_is_only_scaled() {
        let detector = LaneDetector::new(LaneParams::default()).unwrap();
        let frame = RgbFrame::filled(960, 540, [100, 150, 200]);
        let lane = detector.process(&frame).unwrap();
        assert!(lane.report.segments.is_empty());
        assert_eq!(lane.report.edge_pixels, 0);
        assert_eq!(lane.output, RgbFrame::filled(960, 540, [80, 120, 160]));
    }

    #[test]
    fn stages_share_the_input_shape() {
        let detector = LaneDetector::new(LaneParams::default()).unwrap();
        let mut frame = RgbFrame::filled(200, 120, [30, 30, 30]);
        for y in 40..80 {
            for x in 90..110 {
                frame.set(x, y, [250, 250, 250]);
            }
        }
        let (lane, stages) = detector.process_with_stages(&frame).unwrap();
        assert_eq!(lane.output.shape(), frame.shape());
        assert_eq!((stages.gray.width(), stages.gray.height()), (200, 120));
        assert_eq!(stages.edges.shape(), stages.blurred.shape());
        assert_eq!(stages.lines.shape(), frame.shape());
        assert_eq!(stages.edges_lines.shape(), frame.shape());
        assert_eq!(stages.overlay.shape(), frame.shape());
        assert!(stages.edges.count_nonzero() > 0);
    }

    #[test]
    fn invalid_params_fail_construction() {
        let params = LaneParams {
            kernel_size: 2,
            ..Default::default()
        };
        assert!(LaneDetector::new(params).is_err());
    }
}
