//! Main Raster type

use crate::error::{Error, Result};
use crate::raster::RasterElement;
use ndarray::{s, Array2};

/// A 2D raster grid.
///
/// `Raster<T>` stores values of type `T` in row-major order, indexed as
/// `(row, col)`. Pixel-space coordinates elsewhere in RowGuard use `(x, y)`
/// where `x` is the column and `y` the row.
///
/// # Example
///
/// ```ignore
/// use rowguard_core::Raster;
///
/// let mut raster: Raster<u8> = Raster::new(100, 100);
/// raster.set(10, 20, 42)?;
/// let value = raster.get(10, 20)?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Raster<T: RasterElement> {
    data: Array2<T>,
}

impl<T: RasterElement> Raster<T> {
    /// Create a new raster filled with zeros
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: Array2::zeros((rows, cols)),
        }
    }

    /// Create a new raster filled with a specific value
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            data: Array2::from_elem((rows, cols), value),
        }
    }

    /// Create a raster from row-major data
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::InvalidDimensions {
                width: cols,
                height: rows,
            });
        }

        let array = Array2::from_shape_vec((rows, cols), data)
            .map_err(|e| Error::Other(e.to_string()))?;

        Ok(Self { data: array })
    }

    /// Create a raster from an ndarray
    pub fn from_array(data: Array2<T>) -> Self {
        Self { data }
    }

    // Dimensions

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    // Data access

    /// Get value at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.data
            .get((row, col))
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            })
    }

    /// Set value at (row, col)
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if row >= self.rows() || col >= self.cols() {
            return Err(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        self.data[(row, col)] = value;
        Ok(())
    }

    /// Fill the axis-aligned rectangle `[x, x + width) x [y, y + height)`,
    /// clipped to the raster
    pub fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize, value: T) {
        let row_end = (y + height).min(self.rows());
        let col_end = (x + width).min(self.cols());
        if y >= row_end || x >= col_end {
            return;
        }
        self.data.slice_mut(s![y..row_end, x..col_end]).fill(value);
    }

    /// Get a reference to the underlying array
    pub fn data(&self) -> &Array2<T> {
        &self.data
    }

    /// Number of non-zero cells
    pub fn count_set(&self) -> usize {
        self.data.iter().filter(|&&v| v.is_set()).count()
    }

    // Statistics

    /// Statistics over the window `[x, x + width) x [y, y + height)`.
    ///
    /// The window is clipped to the raster; an empty window yields a mean of 0.
    pub fn window_stats(&self, x: usize, y: usize, width: usize, height: usize) -> WindowStats {
        let row_end = (y + height).min(self.rows());
        let col_end = (x + width).min(self.cols());
        if y >= row_end || x >= col_end {
            return WindowStats { mean: 0.0, count: 0 };
        }

        let window = self.data.slice(s![y..row_end, x..col_end]);
        let sum: f64 = window.iter().map(|&v| v.as_f64()).sum();
        let count = window.len();

        WindowStats {
            mean: sum / count as f64,
            count,
        }
    }
}

/// Summary of the cells inside a rectangular window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats {
    pub mean: f64,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_creation() {
        let raster: Raster<u8> = Raster::new(100, 200);
        assert_eq!(raster.rows(), 100);
        assert_eq!(raster.cols(), 200);
        assert_eq!(raster.shape(), (100, 200));
    }

    #[test]
    fn test_raster_access() {
        let mut raster: Raster<u8> = Raster::new(10, 10);
        raster.set(5, 5, 42).unwrap();
        assert_eq!(raster.get(5, 5).unwrap(), 42);
        assert!(raster.get(10, 0).is_err());
        assert!(raster.set(0, 10, 1).is_err());
    }

    #[test]
    fn test_from_vec_rejects_wrong_length() {
        assert!(Raster::<u8>::from_vec(vec![0; 5], 2, 3).is_err());
        assert!(Raster::<u8>::from_vec(vec![0; 6], 2, 3).is_ok());
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut raster: Raster<u8> = Raster::new(10, 10);
        raster.fill_rect(8, 8, 5, 5, 255);
        assert_eq!(raster.count_set(), 4);
        assert_eq!(raster.get(9, 9).unwrap(), 255);
    }

    #[test]
    fn test_window_stats() {
        let mut raster: Raster<u8> = Raster::new(10, 10);
        raster.fill_rect(0, 0, 2, 2, 100);

        let stats = raster.window_stats(0, 0, 4, 1);
        assert_eq!(stats.count, 4);
        assert!((stats.mean - 50.0).abs() < 1e-10);

        let empty = raster.window_stats(20, 20, 3, 3);
        assert_eq!(empty.count, 0);
        assert_eq!(empty.mean, 0.0);
    }
}
