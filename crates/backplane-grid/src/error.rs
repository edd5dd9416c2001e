use crate::ColorCode;
use thiserror::Error;

/// Invalid classifier or grid configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParamsError {
    #[error("{what} must be at least 1")]
    ZeroCount { what: &'static str },
    #[error("white saturation bins ({white}) exceed saturation bins ({bins})")]
    WhiteBinsOutOfRange { white: usize, bins: usize },
    #[error("hue band {color:?} bin {bin} is outside 0..{hue_bins}")]
    BandOutOfRange {
        color: ColorCode,
        bin: usize,
        hue_bins: usize,
    },
}

/// A cell whose color could not be decided.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("ambiguous cell color (hue bin {hue_bin:?}, saturation bin {saturation_bin:?}): {reason}")]
    AmbiguousColorClassification {
        hue_bin: Option<usize>,
        saturation_bin: Option<usize>,
        reason: &'static str,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("image {width}x{height} is too small for a {cols}x{rows} grid")]
    GridTooFine {
        width: usize,
        height: usize,
        cols: usize,
        rows: usize,
    },
    #[error("cell (row {row}, col {col}): {source}")]
    Cell {
        row: usize,
        col: usize,
        #[source]
        source: ClassifyError,
    },
    #[error("invalid parameters: {0}")]
    InvalidParams(#[from] ParamsError),
}
