use backplane_core::RgbImageView;

use crate::{Cell, CellColorClassifier, ClassifierParams, GridParams, ScanError, ScheduleMatrix};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Split a `width × height` image into grid cells, row-major.
///
/// Cells are `width / cols` by `height / rows` pixels; the last column and
/// the last row absorb the remainder.
pub fn cell_layout(
    width: usize,
    height: usize,
    grid: &GridParams,
) -> Result<Vec<Cell>, ScanError> {
    grid.validate()?;
    let cell_w = width / grid.cols;
    let cell_h = height / grid.rows;
    if cell_w == 0 || cell_h == 0 {
        return Err(ScanError::GridTooFine {
            width,
            height,
            cols: grid.cols,
            rows: grid.rows,
        });
    }

    let span = |idx: usize, count: usize, step: usize, total: usize| {
        if idx + 1 == count {
            total - idx * step
        } else {
            step
        }
    };

    let mut cells = Vec::with_capacity(grid.cols * grid.rows);
    for row in 0..grid.rows {
        for col in 0..grid.cols {
            cells.push(Cell {
                x: col * cell_w,
                y: row * cell_h,
                width: span(col, grid.cols, cell_w, width),
                height: span(row, grid.rows, cell_h, height),
                row,
                col,
            });
        }
    }
    Ok(cells)
}

/// Reads a rectified backplane into a [`ScheduleMatrix`].
#[derive(Clone, Debug)]
pub struct GridScanner {
    grid: GridParams,
    classifier: CellColorClassifier,
}

impl GridScanner {
    pub fn new(grid: GridParams, classifier: ClassifierParams) -> Result<Self, ScanError> {
        grid.validate()?;
        Ok(Self {
            grid,
            classifier: CellColorClassifier::new(classifier)?,
        })
    }

    pub fn grid(&self) -> &GridParams {
        &self.grid
    }

    pub fn classifier(&self) -> &CellColorClassifier {
        &self.classifier
    }

    /// Classify every cell; the first failing cell fails the whole scan.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip_all, fields(w = img.width, h = img.height))
    )]
    pub fn scan(&self, img: &RgbImageView<'_>) -> Result<ScheduleMatrix, ScanError> {
        let cells = cell_layout(img.width, img.height, &self.grid)?;
        let colors = cells
            .iter()
            .map(|cell| {
                self.classifier
                    .classify(img, cell)
                    .map_err(|source| ScanError::Cell {
                        row: cell.row,
                        col: cell.col,
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!(
            "scanned {}x{} grid over {}x{} image",
            self.grid.cols,
            self.grid.rows,
            img.width,
            img.height
        );
        Ok(ScheduleMatrix::from_cells(self.grid.rows, self.grid.cols, colors))
    }
}
