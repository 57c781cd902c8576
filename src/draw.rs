//! Segment rendering.
//!
//! Strokes are capsules: every pixel whose centre lies within
//! `thickness / 2` of the segment is painted, which gives round caps and a
//! constant width at any angle.
use crate::image::{Frame, ImageView};
use crate::segments::LineSegment;
use nalgebra::Point2;

/// Draw `segments` onto `canvas` and hand it back.
///
/// Taking the canvas by value keeps the rendering step a plain function of
/// its inputs; pass `frame.zeros_like()` for a blank overlay. An empty
/// `segments` slice returns the canvas untouched. `thickness` of 0 is
/// treated as 1.
pub fn render_segments<const C: usize>(
    mut canvas: Frame<C>,
    segments: &[LineSegment],
    color: [u8; C],
    thickness: u32,
) -> Frame<C> {
    for segment in segments {
        draw_segment(&mut canvas, segment, color, thickness);
    }
    canvas
}

/// Draw a single stroke in place.
pub fn draw_segment<const C: usize>(
    canvas: &mut Frame<C>,
    segment: &LineSegment,
    color: [u8; C],
    thickness: u32,
) {
    let (w, h) = (canvas.width() as i32, canvas.height() as i32);
    if w == 0 || h == 0 {
        return;
    }
    let radius = thickness.max(1) as f32 / 2.0;
    let reach = radius.ceil() as i32;

    let x_lo = segment.x1.min(segment.x2).saturating_sub(reach).max(0);
    let x_hi = segment.x1.max(segment.x2).saturating_add(reach).min(w - 1);
    let y_lo = segment.y1.min(segment.y2).saturating_sub(reach).max(0);
    let y_hi = segment.y1.max(segment.y2).saturating_add(reach).min(h - 1);

    for y in y_lo..=y_hi {
        for x in x_lo..=x_hi {
            let p = Point2::new(x as f32, y as f32);
            if segment.distance_to(&p) <= radius {
                canvas.set(x as usize, y as usize, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::RgbFrame;

    const RED: [u8; 3] = [255, 0, 0];

    #[test]
    fn empty_segment_list_leaves_canvas_unchanged() {
        let canvas = RgbFrame::filled(12, 9, [1, 2, 3]);
        let out = render_segments(canvas.clone(), &[], RED, 10);
        assert_eq!(out, canvas);
    }

    #[test]
    fn thick_horizontal_stroke_has_expected_width() {
        let canvas = RgbFrame::new(60, 40);
        let seg = LineSegment::new(10, 20, 50, 20);
        let out = render_segments(canvas, &[seg], RED, 10);
        let painted: Vec<usize> = (0..40).filter(|&y| out.get(30, y) == RED).collect();
        assert_eq!(painted, (15..=25).collect::<Vec<_>>());
        assert_eq!(out.get(30, 10), [0, 0, 0]);
        // Round cap reaches 5 px past the endpoint on the axis only.
        assert_eq!(out.get(55, 20), RED);
        assert_eq!(out.get(56, 20), [0, 0, 0]);
        assert_eq!(out.get(55, 24), [0, 0, 0]);
    }

    #[test]
    fn huge_thickness_covers_the_canvas() {
        let canvas = RgbFrame::new(16, 12);
        let seg = LineSegment::new(4, 3, 10, 3);
        let out = render_segments(canvas, &[seg], RED, u32::MAX);
        assert_eq!(out.get(0, 0), RED);
        assert_eq!(out.get(15, 11), RED);
    }

    #[test]
    fn strokes_are_clipped_to_the_frame() {
        let canvas = RgbFrame::new(20, 20);
        let seg = LineSegment::new(-30, 5, 50, 5);
        let out = render_segments(canvas, &[seg], RED, 3);
        assert_eq!(out.get(0, 5), RED);
        assert_eq!(out.get(19, 5), RED);
    }
}
