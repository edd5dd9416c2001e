use serde::{Deserialize, Serialize};

use crate::{ColorCode, ParamsError};

/// Hue histogram bins over `[0°, 360°)` (15° each).
pub const DEFAULT_HUE_BINS: usize = 24;
/// Saturation histogram bins over `[0, 1]`.
pub const DEFAULT_SATURATION_BINS: usize = 8;
/// Saturation mode bins below this count read as white.
pub const DEFAULT_WHITE_SATURATION_BINS: usize = 2;
pub const DEFAULT_GRID_COLS: usize = 32;
pub const DEFAULT_GRID_ROWS: usize = 64;

/// How a histogram mode is chosen when several bins share the maximum count.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeTieBreak {
    /// First maximum in bin order.
    #[default]
    LowestBin,
    /// Last maximum in bin order.
    HighestBin,
    /// Any tie makes the cell ambiguous.
    Reject,
}

/// Inclusive range of hue bins mapped to one color.
///
/// `first_bin > last_bin` wraps around bin 0, e.g. `22..=23, 0`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct HueBand {
    pub color: ColorCode,
    pub first_bin: usize,
    pub last_bin: usize,
}

impl HueBand {
    pub fn new(color: ColorCode, first_bin: usize, last_bin: usize) -> Self {
        Self {
            color,
            first_bin,
            last_bin,
        }
    }

    pub fn contains(&self, bin: usize) -> bool {
        if self.first_bin <= self.last_bin {
            (self.first_bin..=self.last_bin).contains(&bin)
        } else {
            bin >= self.first_bin || bin <= self.last_bin
        }
    }
}

/// Hue bands for the default 24-bin histogram.
pub fn default_hue_bands() -> Vec<HueBand> {
    vec![
        HueBand::new(ColorCode::Red, 22, 0),
        HueBand::new(ColorCode::Orange, 1, 2),
        HueBand::new(ColorCode::Yellow, 3, 5),
        HueBand::new(ColorCode::Green, 6, 11),
        HueBand::new(ColorCode::Blue, 12, 17),
        HueBand::new(ColorCode::Purple, 18, 21),
    ]
}

/// Histogram layout and color table for cell classification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierParams {
    pub hue_bins: usize,
    pub saturation_bins: usize,
    pub white_saturation_bins: usize,
    /// Checked in order; the first band containing the hue mode wins.
    pub hue_bands: Vec<HueBand>,
    pub tie_break: ModeTieBreak,
}

impl Default for ClassifierParams {
    fn default() -> Self {
        Self {
            hue_bins: DEFAULT_HUE_BINS,
            saturation_bins: DEFAULT_SATURATION_BINS,
            white_saturation_bins: DEFAULT_WHITE_SATURATION_BINS,
            hue_bands: default_hue_bands(),
            tie_break: ModeTieBreak::default(),
        }
    }
}

impl ClassifierParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.hue_bins == 0 {
            return Err(ParamsError::ZeroCount { what: "hue_bins" });
        }
        if self.saturation_bins == 0 {
            return Err(ParamsError::ZeroCount {
                what: "saturation_bins",
            });
        }
        if self.white_saturation_bins > self.saturation_bins {
            return Err(ParamsError::WhiteBinsOutOfRange {
                white: self.white_saturation_bins,
                bins: self.saturation_bins,
            });
        }
        for band in &self.hue_bands {
            for bin in [band.first_bin, band.last_bin] {
                if bin >= self.hue_bins {
                    return Err(ParamsError::BandOutOfRange {
                        color: band.color,
                        bin,
                        hue_bins: self.hue_bins,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn color_for_hue_bin(&self, bin: usize) -> Option<ColorCode> {
        self.hue_bands
            .iter()
            .find(|band| band.contains(bin))
            .map(|band| band.color)
    }
}

/// Grid resolution of the backplane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridParams {
    pub cols: usize,
    pub rows: usize,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            cols: DEFAULT_GRID_COLS,
            rows: DEFAULT_GRID_ROWS,
        }
    }
}

impl GridParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.cols == 0 {
            return Err(ParamsError::ZeroCount { what: "cols" });
        }
        if self.rows == 0 {
            return Err(ParamsError::ZeroCount { what: "rows" });
        }
        Ok(())
    }
}
