use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Straight segment between two integer pixel positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl LineSegment {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn start(&self) -> Point2<f32> {
        Point2::new(self.x1 as f32, self.y1 as f32)
    }

    pub fn end(&self) -> Point2<f32> {
        Point2::new(self.x2 as f32, self.y2 as f32)
    }

    pub fn midpoint(&self) -> Point2<f32> {
        nalgebra::center(&self.start(), &self.end())
    }

    pub fn direction(&self) -> Vector2<f32> {
        self.end() - self.start()
    }

    /// Euclidean distance from `p` to the closest point of the segment.
    pub fn distance_to(&self, p: &Point2<f32>) -> f32 {
        let d = self.direction();
        let len_sq = d.norm_squared();
        if len_sq == 0.0 {
            return (p - self.start()).norm();
        }
        let t = ((p - self.start()).dot(&d) / len_sq).clamp(0.0, 1.0);
        (p - (self.start() + d * t)).norm()
    }
}
