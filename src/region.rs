//! Region-of-interest polygons and masking.
//!
//! The polygon is rasterised into a 0/255 mask of the frame size and ANDed
//! with every channel. Vertices are absolute pixel coordinates; a polygon
//! tuned for one resolution is never rescaled for another, instead
//! [`RegionOfInterest`] can carry explicit per-resolution variants.
use crate::error::{LaneError, Result};
use crate::image::{Frame, GrayFrame, ImageView, ImageViewMut};
use log::debug;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

pub const MASK_ON: u8 = 255;

/// Closed polygon given by its vertices in drawing order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionPolygon {
    vertices: Vec<[i32; 2]>,
}

impl Default for RegionPolygon {
    /// Trapezoid over the road surface of a 960×540 dash-cam frame.
    fn default() -> Self {
        Self {
            vertices: vec![[100, 539], [900, 539], [520, 320], [440, 320]],
        }
    }
}

impl RegionPolygon {
    pub fn new(vertices: Vec<[i32; 2]>) -> Result<Self> {
        let polygon = Self { vertices };
        polygon.validate()?;
        Ok(polygon)
    }

    pub fn validate(&self) -> Result<()> {
        if self.vertices.len() < 3 {
            return Err(LaneError::InvalidParams(format!(
                "region polygon needs at least 3 vertices, got {}",
                self.vertices.len()
            )));
        }
        Ok(())
    }

    pub fn vertices(&self) -> &[[i32; 2]] {
        &self.vertices
    }

    fn edges(&self) -> impl Iterator<Item = ([i32; 2], [i32; 2])> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Boundary-inclusive point-in-polygon test (even-odd rule).
    pub fn contains(&self, p: &Point2<f32>) -> bool {
        let mut inside = false;
        for (a, b) in self.edges() {
            let (ax, ay) = (a[0] as f32, a[1] as f32);
            let (bx, by) = (b[0] as f32, b[1] as f32);
            if on_edge(p, (ax, ay), (bx, by)) {
                return true;
            }
            if (ay > p.y) != (by > p.y) {
                let x_cross = ax + (p.y - ay) * (bx - ax) / (by - ay);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Rasterise into a `w × h` mask: 255 inside or on the boundary, 0 outside.
    pub fn rasterize(&self, w: usize, h: usize) -> GrayFrame {
        let mut mask = GrayFrame::new(w, h);
        if w == 0 || h == 0 || self.vertices.len() < 3 {
            return mask;
        }

        let mut xs: Vec<f32> = Vec::with_capacity(self.vertices.len());
        for (y, row) in mask.rows_mut().enumerate() {
            let yf = y as f32;
            xs.clear();
            for (a, b) in self.edges() {
                let (ay, by) = (a[1] as f32, b[1] as f32);
                // Half-open in y so a shared vertex is counted once.
                if (ay <= yf && yf < by) || (by <= yf && yf < ay) {
                    let (ax, bx) = (a[0] as f32, b[0] as f32);
                    xs.push(ax + (yf - ay) * (bx - ax) / (by - ay));
                }
            }
            xs.sort_by(|l, r| l.total_cmp(r));
            for pair in xs.chunks_exact(2) {
                let x0 = pair[0].ceil().max(0.0);
                let x1 = pair[1].floor().min(w as f32 - 1.0);
                if x0 > x1 {
                    continue;
                }
                row[x0 as usize..=x1 as usize].fill(MASK_ON);
            }
        }

        for (a, b) in self.edges() {
            draw_edge(&mut mask, a, b);
        }
        mask
    }
}

fn on_edge(p: &Point2<f32>, a: (f32, f32), b: (f32, f32)) -> bool {
    const EPS: f32 = 1e-3;
    let cross = (b.0 - a.0) * (p.y - a.1) - (b.1 - a.1) * (p.x - a.0);
    let len = ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt().max(EPS);
    if (cross / len).abs() > EPS {
        return false;
    }
    p.x >= a.0.min(b.0) - EPS
        && p.x <= a.0.max(b.0) + EPS
        && p.y >= a.1.min(b.1) - EPS
        && p.y <= a.1.max(b.1) + EPS
}

fn draw_edge(mask: &mut GrayFrame, a: [i32; 2], b: [i32; 2]) {
    let (dx, dy) = (b[0] - a[0], b[1] - a[1]);
    let steps = dx.abs().max(dy.abs());
    let (w, h) = (mask.width() as i32, mask.height() as i32);
    for i in 0..=steps {
        let t = if steps == 0 { 0.0 } else { i as f32 / steps as f32 };
        let x = (a[0] as f32 + dx as f32 * t).round() as i32;
        let y = (a[1] as f32 + dy as f32 * t).round() as i32;
        if x >= 0 && y >= 0 && x < w && y < h {
            mask.set(x as usize, y as usize, [MASK_ON]);
        }
    }
}

/// Polygon used for frames of one exact resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionVariant {
    pub width: usize,
    pub height: usize,
    pub polygon: RegionPolygon,
}

/// Default polygon plus optional per-resolution overrides.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionOfInterest {
    pub polygon: RegionPolygon,
    pub variants: Vec<RegionVariant>,
}

impl RegionOfInterest {
    pub fn validate(&self) -> Result<()> {
        self.polygon.validate()?;
        for v in &self.variants {
            v.polygon.validate()?;
        }
        Ok(())
    }

    /// The variant registered for `w × h`, or the default polygon.
    pub fn polygon_for(&self, w: usize, h: usize) -> &RegionPolygon {
        match self
            .variants
            .iter()
            .find(|v| v.width == w && v.height == h)
        {
            Some(v) => &v.polygon,
            None => {
                if !self.variants.is_empty() {
                    debug!("no region variant for {w}x{h}, using default polygon");
                }
                &self.polygon
            }
        }
    }
}

/// Keep each sample of `frame` where `mask` is non-zero, zero it elsewhere.
pub fn apply_mask<const C: usize>(frame: &Frame<C>, mask: &GrayFrame) -> Result<Frame<C>> {
    if (frame.width(), frame.height()) != (mask.width(), mask.height()) {
        return Err(LaneError::ShapeMismatch {
            left: frame.shape(),
            right: mask.shape(),
        });
    }
    let mut out = frame.clone();
    for (px, &m) in out.samples_mut().chunks_exact_mut(C).zip(mask.samples()) {
        for v in px {
            *v &= m;
        }
    }
    Ok(out)
}

/// Zero every pixel outside `polygon`.
pub fn mask_region<const C: usize>(frame: &Frame<C>, polygon: &RegionPolygon) -> Result<Frame<C>> {
    apply_mask(frame, &polygon.rasterize(frame.width(), frame.height()))
}

/// Zero every pixel inside `polygon` (the complement of [`mask_region`]).
pub fn mask_outside<const C: usize>(frame: &Frame<C>, polygon: &RegionPolygon) -> Result<Frame<C>> {
    let mut mask = polygon.rasterize(frame.width(), frame.height());
    for m in mask.samples_mut() {
        *m = !*m;
    }
    apply_mask(frame, &mask)
}
