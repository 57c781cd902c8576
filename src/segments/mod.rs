//! Line-segment detection on binary edge maps.
//!
//! [`hough_lines_p`] implements the progressive probabilistic Hough
//! transform and returns independent [`LineSegment`]s. No merging,
//! left/right classification or extrapolation is performed.

pub mod hough;
pub mod segment;

pub use hough::{hough_lines_p, HoughParams};
pub use segment::LineSegment;
