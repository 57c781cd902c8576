//! Progressive probabilistic Hough transform.
//!
//! Edge points are visited in a random (seeded) order. Each point votes into
//! a `(θ, ρ)` accumulator; as soon as one of its bins reaches the vote
//! threshold the corresponding line is walked in both directions from the
//! point with fixed-point stepping, tolerating up to `max_line_gap` missing
//! pixels. Every pixel touched by the walk is removed from the point set
//! (and its votes are withdrawn when the segment is kept), so each edge
//! pixel contributes to at most one segment.
use super::segment::LineSegment;
use crate::error::{LaneError, Result};
use crate::image::{GrayFrame, ImageView};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

const SHIFT: i32 = 16;

/// Parameters of the probabilistic line transform.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughParams {
    /// Distance resolution of the accumulator in pixels.
    pub rho: f32,
    /// Angle resolution of the accumulator in radians.
    pub theta: f32,
    /// Minimum votes for a line to be considered.
    pub threshold: u32,
    /// Segments whose x- and y-extent are both shorter are dropped.
    pub min_line_length: u32,
    /// Largest run of missing pixels bridged inside one segment.
    pub max_line_gap: u32,
    /// Stop after this many segments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_lines: Option<usize>,
    /// Seed of the point-ordering RNG; identical inputs give identical output.
    pub seed: u64,
}

impl Default for HoughParams {
    fn default() -> Self {
        Self {
            rho: 2.0,
            theta: std::f32::consts::PI / 180.0,
            threshold: 15,
            min_line_length: 20,
            max_line_gap: 20,
            max_lines: None,
            seed: 0x1a4e,
        }
    }
}

impl HoughParams {
    pub fn validate(&self) -> Result<()> {
        if !(self.rho.is_finite() && self.rho > 0.0) {
            return Err(LaneError::InvalidParams(format!(
                "hough rho must be positive, got {}",
                self.rho
            )));
        }
        if !(self.theta.is_finite() && self.theta > 0.0 && self.theta <= std::f32::consts::PI) {
            return Err(LaneError::InvalidParams(format!(
                "hough theta must be in (0, pi], got {}",
                self.theta
            )));
        }
        if self.threshold == 0 {
            return Err(LaneError::InvalidParams(
                "hough threshold must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

struct Accumulator {
    num_angle: usize,
    num_rho: usize,
    /// Interleaved `cos(θ_n)/ρ, sin(θ_n)/ρ`.
    trig: Vec<f32>,
    votes: Vec<i32>,
}

impl Accumulator {
    fn new(w: usize, h: usize, params: &HoughParams) -> Self {
        let num_angle = ((std::f32::consts::PI / params.theta).round() as usize).max(1);
        let num_rho = ((((w + h) * 2 + 1) as f32 / params.rho).round() as usize).max(1);
        let irho = 1.0 / params.rho;
        let mut trig = Vec::with_capacity(num_angle * 2);
        for n in 0..num_angle {
            let ang = n as f32 * params.theta;
            trig.push(ang.cos() * irho);
            trig.push(ang.sin() * irho);
        }
        Self {
            num_angle,
            num_rho,
            trig,
            votes: vec![0; num_angle * num_rho],
        }
    }

    #[inline]
    fn bin(&self, n: usize, x: i32, y: i32) -> usize {
        let r = (x as f32 * self.trig[2 * n] + y as f32 * self.trig[2 * n + 1]).round() as isize;
        let r = (r + (self.num_rho as isize - 1) / 2).clamp(0, self.num_rho as isize - 1);
        n * self.num_rho + r as usize
    }

    /// Add one vote per angle; return the strongest `(votes, angle index)`.
    fn vote(&mut self, x: i32, y: i32) -> (i32, usize) {
        let mut best = (0, 0);
        for n in 0..self.num_angle {
            let i = self.bin(n, x, y);
            self.votes[i] += 1;
            if self.votes[i] > best.0 {
                best = (self.votes[i], n);
            }
        }
        best
    }

    fn unvote(&mut self, x: i32, y: i32) {
        for n in 0..self.num_angle {
            let i = self.bin(n, x, y);
            self.votes[i] -= 1;
        }
    }
}

/// Fixed-point walker along a line direction.
#[derive(Clone, Copy)]
struct Walk {
    x0: i64,
    y0: i64,
    dx: i64,
    dy: i64,
    /// Step along x one pixel at a time (y in fixed point) when true.
    x_major: bool,
}

impl Walk {
    fn new(x: i32, y: i32, a: f32, b: f32) -> Self {
        let one = (1i64 << SHIFT) as f32;
        let (x, y) = (i64::from(x), i64::from(y));
        if a.abs() > b.abs() {
            Self {
                x0: x,
                y0: (y << SHIFT) + (1 << (SHIFT - 1)),
                dx: if a > 0.0 { 1 } else { -1 },
                dy: (b * one / a.abs()).round() as i64,
                x_major: true,
            }
        } else {
            Self {
                x0: (x << SHIFT) + (1 << (SHIFT - 1)),
                y0: y,
                dx: (a * one / b.abs()).round() as i64,
                dy: if b > 0.0 { 1 } else { -1 },
                x_major: false,
            }
        }
    }

    #[inline]
    fn pixel(&self, x: i64, y: i64) -> (i32, i32) {
        let (j, i) = if self.x_major {
            (x, y >> SHIFT)
        } else {
            (x >> SHIFT, y)
        };
        (clamp_i32(j), clamp_i32(i))
    }

    fn steps(&self, backwards: bool) -> (i64, i64) {
        if backwards {
            (-self.dx, -self.dy)
        } else {
            (self.dx, self.dy)
        }
    }
}

#[inline]
fn clamp_i32(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Detect line segments on a binary edge map (non-zero = edge).
///
/// Returns an empty vector when nothing qualifies.
pub fn hough_lines_p(edges: &GrayFrame, params: &HoughParams) -> Result<Vec<LineSegment>> {
    params.validate()?;
    let (w, h) = (edges.width(), edges.height());
    let mut lines = Vec::new();
    if w == 0 || h == 0 {
        return Ok(lines);
    }
    if params.max_lines == Some(0) {
        return Ok(lines);
    }

    let mut mask: Vec<bool> = edges.samples().iter().map(|&v| v != 0).collect();
    let mut points: Vec<(i32, i32)> = Vec::new();
    for y in 0..h {
        for x in 0..w {
            if mask[y * w + x] {
                points.push((x as i32, y as i32));
            }
        }
    }
    let point_count = points.len();

    let mut acc = Accumulator::new(w, h, params);
    let mut rng = StdRng::seed_from_u64(params.seed);
    let (wi, hi) = (w as i32, h as i32);
    let gap_limit = params.max_line_gap as i32;
    let min_len = params.min_line_length as i32;
    let threshold = params.threshold as i32;
    // Only called with in-frame coordinates.
    let at = |x: i32, y: i32| y as usize * w + x as usize;

    let mut remaining = points.len();
    while remaining > 0 {
        let pick = rng.gen_range(0..remaining);
        let (px, py) = points[pick];
        points[pick] = points[remaining - 1];
        remaining -= 1;

        // Already consumed by an earlier segment.
        if !mask[at(px, py)] {
            continue;
        }

        let (max_votes, max_n) = acc.vote(px, py);
        if max_votes < threshold {
            continue;
        }

        // Direction along the line is perpendicular to the (cos, sin) normal.
        let a = -acc.trig[2 * max_n + 1];
        let b = acc.trig[2 * max_n];
        let walk = Walk::new(px, py, a, b);

        let mut line_end = [(px, py); 2];
        for (k, end) in line_end.iter_mut().enumerate() {
            let (dx, dy) = walk.steps(k > 0);
            let (mut x, mut y) = (walk.x0, walk.y0);
            let mut gap = 0;
            loop {
                let (j, i) = walk.pixel(x, y);
                if j < 0 || j >= wi || i < 0 || i >= hi {
                    break;
                }
                if mask[at(j, i)] {
                    gap = 0;
                    *end = (j, i);
                } else {
                    gap += 1;
                    if gap > gap_limit {
                        break;
                    }
                }
                x += dx;
                y += dy;
            }
        }

        let good_line = (line_end[1].0 - line_end[0].0).abs() >= min_len
            || (line_end[1].1 - line_end[0].1).abs() >= min_len;

        for (k, end) in line_end.iter().enumerate() {
            let (dx, dy) = walk.steps(k > 0);
            let (mut x, mut y) = (walk.x0, walk.y0);
            loop {
                let (j, i) = walk.pixel(x, y);
                let idx = at(j, i);
                if mask[idx] {
                    if good_line {
                        acc.unvote(j, i);
                    }
                    mask[idx] = false;
                }
                if (j, i) == *end {
                    break;
                }
                x += dx;
                y += dy;
            }
        }

        if good_line {
            lines.push(LineSegment::new(
                line_end[0].0,
                line_end[0].1,
                line_end[1].0,
                line_end[1].1,
            ));
            if params.max_lines.is_some_and(|cap| lines.len() >= cap) {
                break;
            }
        }
    }

    debug!(
        "hough: {} edge points on {}x{} -> {} segments",
        point_count,
        w,
        h,
        lines.len()
    );
    Ok(lines)
}
