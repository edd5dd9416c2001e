//! Greenness mask.
//!
//! `g - avg(r, b)` separates green from yellow (high red) and cyan (high
//! blue), which share a strong green channel.

use backplane_core::{GrayImage, RgbImageView};

use crate::DetectParams;

/// `max(g - (r + b) / 2, 0)` in integer arithmetic.
#[inline]
pub fn greenness([r, g, b]: [u8; 3]) -> u8 {
    let avg = (r as i16 + b as i16) / 2;
    (g as i16 - avg).max(0) as u8
}

/// Thresholds greenness into a binary mask (255 = on).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaskBuilder {
    pub floor: u8,
    pub ceiling: u8,
}

impl MaskBuilder {
    pub fn new(floor: u8, ceiling: u8) -> Self {
        Self { floor, ceiling }
    }

    pub fn from_params(params: &DetectParams) -> Self {
        Self::new(params.green_floor, params.green_ceiling)
    }

    #[inline]
    pub fn is_on(&self, rgb: [u8; 3]) -> bool {
        (self.floor..=self.ceiling).contains(&greenness(rgb))
    }

    /// Build the mask; always succeeds, possibly with no pixel set.
    pub fn build(&self, img: &RgbImageView<'_>) -> GrayImage {
        let data = img
            .data
            .chunks_exact(3)
            .map(|px| {
                if self.is_on([px[0], px[1], px[2]]) {
                    255
                } else {
                    0
                }
            })
            .collect();
        GrayImage {
            width: img.width,
            height: img.height,
            data,
        }
    }
}
