use backplane_core::RgbImageView;
use palette::{FromColor, Hsv, Srgb};
use serde::{Deserialize, Serialize};

use crate::histogram::NoMode;
use crate::{ClassifierParams, ClassifyError, ColorCode, Histogram, ParamsError};

/// Rectangular view of one grid cell in the rectified image.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Hue/saturation histogram classifier for a single cell.
#[derive(Clone, Debug)]
pub struct CellColorClassifier {
    params: ClassifierParams,
}

impl CellColorClassifier {
    pub fn new(params: ClassifierParams) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &ClassifierParams {
        &self.params
    }

    /// `(hue_bin, saturation_bin)` of one sRGB pixel.
    pub fn bins(&self, [r, g, b]: [u8; 3]) -> (usize, usize) {
        let hsv: Hsv = Hsv::from_color(Srgb::new(r, g, b).into_format::<f32>());
        let hue = hsv.hue.into_positive_degrees();
        let hue_bin = scale_to_bin(hue / 360.0, self.params.hue_bins);
        let sat_bin = scale_to_bin(hsv.saturation, self.params.saturation_bins);
        (hue_bin, sat_bin)
    }

    /// Hue and saturation histograms over the pixels of `cell`.
    ///
    /// Pixels outside the image are skipped.
    pub fn histograms(&self, img: &RgbImageView<'_>, cell: &Cell) -> (Histogram, Histogram) {
        let mut hue = Histogram::new(self.params.hue_bins);
        let mut sat = Histogram::new(self.params.saturation_bins);
        let x_end = (cell.x + cell.width).min(img.width);
        let y_end = (cell.y + cell.height).min(img.height);
        for y in cell.y..y_end {
            for x in cell.x..x_end {
                let (h, s) = self.bins(img.pixel(x, y));
                hue.add(h);
                sat.add(s);
            }
        }
        (hue, sat)
    }

    pub fn classify(
        &self,
        img: &RgbImageView<'_>,
        cell: &Cell,
    ) -> Result<ColorCode, ClassifyError> {
        let (hue, sat) = self.histograms(img, cell);
        let tie_break = self.params.tie_break;

        let sat_bin = sat
            .try_mode(tie_break)
            .map_err(|why| ambiguous(None, None, why))?;
        if sat_bin < self.params.white_saturation_bins {
            log::trace!(
                "cell ({}, {}): saturation mode {sat_bin} -> white",
                cell.row,
                cell.col
            );
            return Ok(ColorCode::White);
        }

        let hue_bin = hue
            .try_mode(tie_break)
            .map_err(|why| ambiguous(None, Some(sat_bin), why))?;
        let color = self.params.color_for_hue_bin(hue_bin).ok_or(
            ClassifyError::AmbiguousColorClassification {
                hue_bin: Some(hue_bin),
                saturation_bin: Some(sat_bin),
                reason: "hue bin outside every band",
            },
        )?;
        log::trace!(
            "cell ({}, {}): hue mode {hue_bin}, saturation mode {sat_bin} -> {color:?}",
            cell.row,
            cell.col
        );
        Ok(color)
    }
}

fn scale_to_bin(unit: f32, bins: usize) -> usize {
    let bin = (unit.max(0.0) * bins as f32) as usize;
    bin.min(bins.saturating_sub(1))
}

fn ambiguous(
    hue_bin: Option<usize>,
    saturation_bin: Option<usize>,
    why: NoMode,
) -> ClassifyError {
    ClassifyError::AmbiguousColorClassification {
        hue_bin,
        saturation_bin,
        reason: match why {
            NoMode::Empty => "empty cell",
            NoMode::Tie => "histogram mode is tied",
        },
    }
}
