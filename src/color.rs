//! Colour → intensity conversion.
use crate::image::{GrayFrame, ImageView, RgbFrame};
use serde::{Deserialize, Serialize};

// BT.601 luma weights in 14-bit fixed point (sum = 1 << 14).
const SHIFT: u32 = 14;
const WEIGHT_R: u32 = 4899;
const WEIGHT_G: u32 = 9617;
const WEIGHT_B: u32 = 1868;
const ROUND: u32 = 1 << (SHIFT - 1);

/// Which interleaved sample of a colour frame holds red.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    #[default]
    Rgb,
    Bgr,
}

/// Reduce a 3-channel frame to one intensity channel of the same size.
pub fn grayscale(frame: &RgbFrame, order: ChannelOrder) -> GrayFrame {
    let (wr, wb) = match order {
        ChannelOrder::Rgb => (WEIGHT_R, WEIGHT_B),
        ChannelOrder::Bgr => (WEIGHT_B, WEIGHT_R),
    };
    let data = frame
        .pixels()
        .map(|px| {
            let acc = px[0] as u32 * wr + px[1] as u32 * WEIGHT_G + px[2] as u32 * wb + ROUND;
            (acc >> SHIFT) as u8
        })
        .collect();
    GrayFrame::from_parts(frame.width(), frame.height(), data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_single_channel_with_same_size() {
        let frame = RgbFrame::filled(7, 3, [10, 20, 30]);
        let gray = grayscale(&frame, ChannelOrder::Rgb);
        assert_eq!(gray.shape(), (7, 3, 1));
    }

    #[test]
    fn neutral_colours_keep_their_level() {
        for v in [0u8, 1, 127, 128, 254, 255] {
            let frame = RgbFrame::filled(2, 2, [v, v, v]);
            let gray = grayscale(&frame, ChannelOrder::Rgb);
            assert!(gray.samples().iter().all(|&g| g == v), "level {v} drifted");
        }
    }

    #[test]
    fn channel_order_swaps_red_and_blue_weights() {
        let red = RgbFrame::filled(1, 1, [255, 0, 0]);
        let as_rgb = grayscale(&red, ChannelOrder::Rgb).get(0, 0)[0];
        let as_bgr = grayscale(&red, ChannelOrder::Bgr).get(0, 0)[0];
        assert_eq!(as_rgb, 76);
        assert_eq!(as_bgr, 29);
    }
}
