//! Grid readout of a rectified backplane.
//!
//! The rectified image is divided into `cols × rows` cells. Each cell is
//! classified independently from the modes of its HSV histograms: a low
//! saturation mode means [`ColorCode::White`], otherwise the hue mode is
//! looked up in a table of inclusive hue bands.
//!
//! ```
//! use backplane_core::RgbImage;
//! use backplane_grid::{ClassifierParams, ColorCode, GridParams, GridScanner};
//!
//! let mut img = RgbImage::new(4, 2);
//! for x in 0..4 {
//!     img.put_pixel(x, 0, [255, 0, 0]);
//!     img.put_pixel(x, 1, [0, 0, 255]);
//! }
//! let grid = GridParams { cols: 2, rows: 2 };
//! let scanner = GridScanner::new(grid, ClassifierParams::default()).unwrap();
//! let matrix = scanner.scan(&img.view()).unwrap();
//! assert_eq!(matrix.get(0, 1), Some(ColorCode::Red));
//! assert_eq!(matrix.to_text(), "11\n55\n");
//! ```

mod classifier;
mod color;
mod error;
mod histogram;
mod matrix;
mod params;
mod scanner;

pub use classifier::{Cell, CellColorClassifier};
pub use color::ColorCode;
pub use error::{ClassifyError, ParamsError, ScanError};
pub use histogram::Histogram;
pub use matrix::ScheduleMatrix;
pub use params::{
    default_hue_bands, ClassifierParams, GridParams, HueBand, ModeTieBreak, DEFAULT_GRID_COLS,
    DEFAULT_GRID_ROWS, DEFAULT_HUE_BINS, DEFAULT_SATURATION_BINS, DEFAULT_WHITE_SATURATION_BINS,
};
pub use scanner::{cell_layout, GridScanner};
