use lane_finder::draw::render_segments;
use lane_finder::segments::LineSegment;
use lane_finder::RgbFrame;

pub const ROAD: [u8; 3] = [30, 30, 30];
pub const PAINT: [u8; 3] = [230, 230, 230];

pub const LEFT_LANE: LineSegment = LineSegment::new(200, 520, 445, 340);
pub const RIGHT_LANE: LineSegment = LineSegment::new(760, 520, 515, 340);
/// Horizontal marking far above the default region of interest.
pub const DISTRACTOR: LineSegment = LineSegment::new(100, 100, 860, 100);

/// 960×540 dark road with two painted lane lines converging towards the
/// horizon and one bright line outside the region.
pub fn two_lane_scene() -> RgbFrame {
    render_segments(
        RgbFrame::filled(960, 540, ROAD),
        &[LEFT_LANE, RIGHT_LANE, DISTRACTOR],
        PAINT,
        6,
    )
}

/// Vertical step: columns `< split` are `dark`, the rest `bright`.
pub fn vertical_step(w: usize, h: usize, split: usize, dark: u8, bright: u8) -> RgbFrame {
    let mut frame = RgbFrame::filled(w, h, [dark; 3]);
    for y in 0..h {
        for x in split..w {
            frame.set(x, y, [bright; 3]);
        }
    }
    frame
}

/// Short clip of the two-lane scene with the lane paint drifting sideways.
pub fn drifting_clip(frames: usize) -> Vec<RgbFrame> {
    (0..frames as i32)
        .map(|i| {
            let shift = i * 3;
            let left = LineSegment::new(200 + shift, 520, 445 + shift, 340);
            let right = LineSegment::new(760 + shift, 520, 515 + shift, 340);
            render_segments(RgbFrame::filled(960, 540, ROAD), &[left, right], PAINT, 6)
        })
        .collect()
}
