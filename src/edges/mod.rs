//! Edge detection: Sobel gradients, non‑maximum suppression and Canny
//! hysteresis.
//!
//! - [`grad`] computes per‑pixel `gx`, `gy` and an L1/L2 magnitude with
//!   replicate borders.
//! - [`nms`] thins the magnitude to one-pixel ridges and classifies them as
//!   weak or strong.
//! - [`canny`] links weak ridges to strong ones and emits a 0/255 map.

pub mod canny;
pub mod grad;
pub mod nms;

pub use canny::{canny, CannyParams, EDGE};
pub use grad::{sobel_gradients, Grad, GradientNorm};
pub use nms::{run_nms, EdgeClass};
