use super::{FrameSink, FrameSource};
use crate::detector::LaneDetector;
use crate::error::Result;
use log::{debug, info, warn};
use serde::Serialize;
use std::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Streaming { frames: usize },
}

/// Totals of one completed video job.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSummary {
    pub frames: usize,
    pub total_segments: usize,
    pub frames_without_segments: usize,
    pub elapsed_ms: f64,
    pub fps: f64,
}

/// Runs a [`LaneDetector`] over every frame of a source.
pub struct FrameDriver<'a> {
    detector: &'a LaneDetector,
    state: DriverState,
}

impl<'a> FrameDriver<'a> {
    pub fn new(detector: &'a LaneDetector) -> Self {
        Self {
            detector,
            state: DriverState::Idle,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Process the whole stream. On error the sink is left unfinished and
    /// whatever it holds must be treated as invalid.
    pub fn run(
        &mut self,
        source: &mut dyn FrameSource,
        sink: &mut dyn FrameSink,
    ) -> Result<VideoSummary> {
        self.state = DriverState::Streaming { frames: 0 };
        let result = self.stream(source, sink);
        let frames = match self.state {
            DriverState::Streaming { frames } => frames,
            DriverState::Idle => 0,
        };
        self.state = DriverState::Idle;
        if let Err(e) = &result {
            warn!("video job aborted after {frames} frames, output is incomplete: {e}");
        }
        result
    }

    fn stream(
        &mut self,
        source: &mut dyn FrameSource,
        sink: &mut dyn FrameSink,
    ) -> Result<VideoSummary> {
        let start = Instant::now();
        let mut summary = VideoSummary::default();
        if let Some(n) = source.frame_count_hint() {
            info!("processing {n} frames");
        }
        while let Some(frame) = source.next_frame()? {
            let lane = self.detector.process(&frame)?;
            sink.write_frame(&lane.output)?;

            let found = lane.report.segments.len();
            summary.frames += 1;
            summary.total_segments += found;
            if found == 0 {
                summary.frames_without_segments += 1;
            }
            self.state = DriverState::Streaming {
                frames: summary.frames,
            };
            debug!(
                "frame {}: {} segments, {:.2} ms",
                summary.frames, found, lane.report.timings.total_ms
            );
        }
        sink.finish()?;

        summary.elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        if summary.elapsed_ms > 0.0 {
            summary.fps = summary.frames as f64 * 1000.0 / summary.elapsed_ms;
        }
        info!(
            "video done: {} frames, {} segments, {:.1} fps",
            summary.frames, summary.total_segments, summary.fps
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::LaneParams;
    use crate::error::LaneError;
    use crate::image::RgbFrame;
    use crate::video::{MemorySink, MemorySource};

    struct FailingSink {
        accepted: usize,
        finished: bool,
    }

    impl FrameSink for FailingSink {
        fn write_frame(&mut self, _frame: &RgbFrame) -> Result<()> {
            if self.accepted == 2 {
                return Err(LaneError::Video("disk full".to_string()));
            }
            self.accepted += 1;
            Ok(())
        }

        fn finish(&mut self) -> Result<()> {
            self.finished = true;
            Ok(())
        }
    }

    fn clip(n: usize) -> MemorySource {
        MemorySource::new(vec![RgbFrame::filled(64, 48, [40, 60, 80]); n])
    }

    #[test]
    fn empty_source_finishes_with_zero_frames() {
        let detector = LaneDetector::new(LaneParams::default()).unwrap();
        let mut driver = FrameDriver::new(&detector);
        let mut sink = MemorySink::new();
        let summary = driver.run(&mut clip(0), &mut sink).unwrap();
        assert_eq!(summary.frames, 0);
        assert!(sink.finished);
        assert_eq!(driver.state(), DriverState::Idle);
    }

    #[test]
    fn sink_error_aborts_without_finishing() {
        let detector = LaneDetector::new(LaneParams::default()).unwrap();
        let mut driver = FrameDriver::new(&detector);
        let mut sink = FailingSink {
            accepted: 0,
            finished: false,
        };
        let err = driver.run(&mut clip(5), &mut sink).unwrap_err();
        assert!(matches!(err, LaneError::Video(_)));
        assert_eq!(sink.accepted, 2);
        assert!(!sink.finished);
        assert_eq!(driver.state(), DriverState::Idle);
    }

    #[test]
    fn frames_without_segments_are_counted() {
        let detector = LaneDetector::new(LaneParams::default()).unwrap();
        let mut driver = FrameDriver::new(&detector);
        let mut sink = MemorySink::new();
        let summary = driver.run(&mut clip(3), &mut sink).unwrap();
        assert_eq!(summary.frames, 3);
        assert_eq!(summary.total_segments, 0);
        assert_eq!(summary.frames_without_segments, 3);
        assert_eq!(sink.frames.len(), 3);
    }
}
