//! Per-pixel compositing of equally shaped frames.
use crate::error::Result;
use crate::image::{Frame, ImageView};
use serde::{Deserialize, Serialize};

/// Weights of `first·alpha + second·beta + gamma`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendWeights {
    pub alpha: f32,
    pub beta: f32,
    pub gamma: f32,
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            alpha: 0.8,
            beta: 1.0,
            gamma: 0.0,
        }
    }
}

/// Weighted sum of two frames, rounded half-to-even and saturated to 0..=255.
pub fn add_weighted<const C: usize>(
    first: &Frame<C>,
    alpha: f32,
    second: &Frame<C>,
    beta: f32,
    gamma: f32,
) -> Result<Frame<C>> {
    first.check_same_shape(second)?;
    let data = first
        .samples()
        .iter()
        .zip(second.samples())
        .map(|(&a, &b)| saturate(a as f32 * alpha + b as f32 * beta + gamma))
        .collect();
    Ok(Frame::from_parts(first.width(), first.height(), data))
}

/// [`add_weighted`] with a [`BlendWeights`] bundle.
pub fn blend<const C: usize>(
    first: &Frame<C>,
    second: &Frame<C>,
    weights: &BlendWeights,
) -> Result<Frame<C>> {
    add_weighted(first, weights.alpha, second, weights.beta, weights.gamma)
}

pub fn bitwise_and<const C: usize>(a: &Frame<C>, b: &Frame<C>) -> Result<Frame<C>> {
    zip_bytes(a, b, |x, y| x & y)
}

pub fn bitwise_or<const C: usize>(a: &Frame<C>, b: &Frame<C>) -> Result<Frame<C>> {
    zip_bytes(a, b, |x, y| x | y)
}

fn zip_bytes<const C: usize>(
    a: &Frame<C>,
    b: &Frame<C>,
    op: impl Fn(u8, u8) -> u8,
) -> Result<Frame<C>> {
    a.check_same_shape(b)?;
    let data = a
        .samples()
        .iter()
        .zip(b.samples())
        .map(|(&x, &y)| op(x, y))
        .collect();
    Ok(Frame::from_parts(a.width(), a.height(), data))
}

#[inline]
fn saturate(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round_ties_even().clamp(0.0, 255.0) as u8
}
