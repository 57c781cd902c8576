//! Per-frame diagnostics: stage timings and the serialisable frame report.
use crate::region::RegionPolygon;
use crate::segments::LineSegment;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Wall time spent in one pipeline stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

/// Stage timings of a single frame.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming {
            label: label.into(),
            elapsed_ms,
        });
    }

    /// Run `f`, record its duration under `label` and return its output.
    pub fn time<T>(&mut self, label: &str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = f();
        self.push(label, start.elapsed().as_secs_f64() * 1000.0);
        out
    }
}

/// A detected segment and whether its midpoint lies inside the region.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedSegment {
    #[serde(flatten)]
    pub segment: LineSegment,
    pub inside_region: bool,
}

/// Summary of one processed frame.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneReport {
    pub width: usize,
    pub height: usize,
    pub edge_pixels: usize,
    pub region: RegionPolygon,
    pub segments: Vec<DetectedSegment>,
    pub timings: TimingBreakdown,
}

impl LaneReport {
    pub fn segments_inside(&self) -> impl Iterator<Item = &LineSegment> + '_ {
        self.segments
            .iter()
            .filter(|s| s.inside_region)
            .map(|s| &s.segment)
    }

    pub fn segments_outside(&self) -> impl Iterator<Item = &LineSegment> + '_ {
        self.segments
            .iter()
            .filter(|s| !s.inside_region)
            .map(|s| &s.segment)
    }
}
