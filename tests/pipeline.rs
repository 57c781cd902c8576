mod common;

use common::synthetic_frames::{
    two_lane_scene, vertical_step, DISTRACTOR, LEFT_LANE, PAINT, RIGHT_LANE,
};
use lane_finder::color::{grayscale, ChannelOrder};
use lane_finder::edges::{canny, CannyParams};
use lane_finder::filters::{gaussian_blur, GaussianKernel};
use lane_finder::image::ImageView;
use lane_finder::region::RegionPolygon;
use lane_finder::segments::{hough_lines_p, HoughParams, LineSegment};
use lane_finder::{LaneDetector, LaneParams, RgbFrame};

fn scaled(v: u8, alpha: f32) -> u8 {
    (v as f32 * alpha).round_ties_even().clamp(0.0, 255.0) as u8
}

fn is_near(found: &LineSegment, truth: &LineSegment, tol: f32) -> bool {
    let angle = found.direction().angle(&truth.direction());
    let parallel = angle < 0.1 || angle > std::f32::consts::PI - 0.1;
    parallel && truth.distance_to(&found.midpoint()) < tol
}

#[test]
fn step_edge_yields_a_vertical_segment_at_the_step() {
    common::init_logging();
    let frame = vertical_step(200, 100, 100, 20, 220);
    let gray = grayscale(&frame, ChannelOrder::Rgb);
    let kernel = GaussianKernel::new(5, 0.0).unwrap();
    let edges = canny(&gaussian_blur(&gray, &kernel), &CannyParams::default());

    for y in 0..edges.height() {
        for x in 0..edges.width() {
            if edges.get(x, y)[0] != 0 {
                assert!((97..=102).contains(&x), "stray edge pixel at ({x}, {y})");
            }
        }
    }

    let segments = hough_lines_p(&edges, &HoughParams::default()).unwrap();
    assert!(!segments.is_empty());
    for s in &segments {
        assert!((s.x1 - s.x2).abs() <= 2, "not vertical: {s:?}");
        assert!((97..=102).contains(&s.x1), "off the step: {s:?}");
        assert!((s.y1 - s.y2).abs() >= 20);
    }
}

#[test]
fn uniform_frame_output_is_alpha_scaled_source() {
    common::init_logging();
    let detector = LaneDetector::new(LaneParams::default()).unwrap();
    let src = RgbFrame::filled(320, 180, [17, 128, 255]);
    let lane = detector.process(&src).unwrap();

    assert!(lane.report.segments.is_empty());
    let expected = [scaled(17, 0.8), scaled(128, 0.8), scaled(255, 0.8)];
    assert!(lane.output.pixels().all(|px| px == expected));
}

#[test]
fn two_lane_scene_draws_only_inside_the_region() {
    common::init_logging();
    let params = LaneParams::default();
    let detector = LaneDetector::new(params.clone()).unwrap();
    let src = two_lane_scene();
    let lane = detector.process(&src).unwrap();
    let report = &lane.report;

    assert_eq!((report.width, report.height), (960, 540));
    assert_eq!(&report.region, &RegionPolygon::default());
    assert!(report.edge_pixels > 0);

    assert!(
        report.segments_inside().any(|s| is_near(s, &LEFT_LANE, 8.0)),
        "left lane not found: {:?}",
        report.segments
    );
    assert!(
        report.segments_inside().any(|s| is_near(s, &RIGHT_LANE, 8.0)),
        "right lane not found: {:?}",
        report.segments
    );
    assert!(
        report.segments_outside().any(|s| is_near(s, &DISTRACTOR, 8.0)),
        "distractor should be detected but flagged outside the region"
    );

    // Outside the polygon nothing but the dimmed source survives.
    let mask = params.region.polygon.rasterize(960, 540);
    for y in 0..540 {
        for x in 0..960 {
            if mask.get(x, y)[0] == 0 {
                let s = src.get(x, y);
                let expected = [scaled(s[0], 0.8), scaled(s[1], 0.8), scaled(s[2], 0.8)];
                assert_eq!(lane.output.get(x, y), expected, "pixel ({x}, {y})");
            }
        }
    }

    // Lane paint under a red stroke: red saturates, the rest is dimmed.
    let dimmed = scaled(PAINT[1], 0.8);
    for lane_line in [LEFT_LANE, RIGHT_LANE] {
        let painted_red = (1..10).any(|i| {
            let t = i as f32 / 10.0;
            let p = lane_line.start() + lane_line.direction() * t;
            lane.output.get(p.x.round() as usize, p.y.round() as usize) == [255, dimmed, dimmed]
        });
        assert!(painted_red, "no red stroke on {lane_line:?}");
    }
}

#[test]
fn overlay_is_contained_in_region_and_lines() {
    common::init_logging();
    let detector = LaneDetector::new(LaneParams::default()).unwrap();
    let (_, stages) = detector.process_with_stages(&two_lane_scene()).unwrap();

    for ((o, l), m) in stages
        .overlay
        .pixels()
        .zip(stages.lines.pixels())
        .zip(stages.region_mask.pixels())
    {
        if m[0] == 0 {
            assert_eq!(o, &[0u8, 0, 0][..]);
        }
        for c in 0..3 {
            assert_eq!(o[c] & !l[c], 0);
        }
    }
}

#[test]
fn processing_is_deterministic() {
    let detector = LaneDetector::new(LaneParams::default()).unwrap();
    let src = two_lane_scene();
    let a = detector.process(&src).unwrap();
    let b = detector.process(&src).unwrap();
    assert_eq!(a.output, b.output);
    assert_eq!(
        a.report.segments.iter().map(|s| s.segment).collect::<Vec<_>>(),
        b.report.segments.iter().map(|s| s.segment).collect::<Vec<_>>()
    );
}
