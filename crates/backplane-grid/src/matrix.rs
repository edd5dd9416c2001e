use serde::Serialize;
use std::fmt;

use crate::ColorCode;

/// Row-major `rows × cols` matrix of cell colors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScheduleMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<ColorCode>,
}

impl ScheduleMatrix {
    /// Build from equally long rows; `None` for ragged input.
    pub fn from_rows(rows: Vec<Vec<ColorCode>>) -> Option<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != cols) {
            return None;
        }
        Some(Self {
            rows: rows.len(),
            cols,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub(crate) fn from_cells(rows: usize, cols: usize, cells: Vec<ColorCode>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<ColorCode> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col).copied()
    }

    pub fn row(&self, row: usize) -> Option<&[ColorCode]> {
        if row >= self.rows {
            return None;
        }
        Some(&self.cells[row * self.cols..(row + 1) * self.cols])
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[ColorCode]> {
        (0..self.rows).filter_map(move |r| self.row(r))
    }

    /// Each row as a string of digit symbols.
    pub fn row_strings(&self) -> Vec<String> {
        self.iter_rows()
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect()
    }

    /// One line per row, each terminated by `\n`.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.rows * (self.cols + 1));
        for line in self.row_strings() {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for ScheduleMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ColorCode::*;

    #[test]
    fn rows_and_text() {
        let rows = vec![vec![Red, Blue, White], vec![Yellow, Green, Purple]];
        let m = ScheduleMatrix::from_rows(rows).unwrap();
        assert_eq!((m.rows(), m.cols()), (2, 3));
        assert_eq!(m.get(1, 2), Some(Purple));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.get(0, 3), None);
        assert_eq!(m.row(0), Some(&[Red, Blue, White][..]));
        assert_eq!(m.to_text(), "150\n346\n");
        assert_eq!(m.to_string(), m.to_text());
    }

    #[test]
    fn ragged_rows_are_rejected() {
        assert!(ScheduleMatrix::from_rows(vec![vec![Red], vec![Red, Blue]]).is_none());
        let empty = ScheduleMatrix::from_rows(Vec::new()).unwrap();
        assert_eq!(empty.to_text(), "");
    }
}
