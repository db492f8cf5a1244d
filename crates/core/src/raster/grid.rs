//! Single-band raster grid

use crate::error::{Error, Result};
use crate::raster::RasterElement;
use ndarray::{Array2, ArrayView2};

/// A 2D single-band raster grid.
///
/// `Raster<T>` stores one value of type `T` per pixel, indexed as
/// `(row, col)`. Vegetation score maps are `Raster<i16>` and binary masks
/// are `Raster<u8>`; both always share the dimensions of the image they
/// were derived from.
///
/// # Example
///
/// ```ignore
/// use verdant_core::Raster;
///
/// let mut mask: Raster<u8> = Raster::new(256, 256);
/// mask.set(10, 20, 1)?;
/// assert_eq!(mask.get(10, 20)?, 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Raster<T: RasterElement> {
    /// Raster data stored in row-major order (row, col)
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

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the raster is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
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

    /// Get a view of the underlying data
    pub fn view(&self) -> ArrayView2<'_, T> {
        self.data.view()
    }

    /// Get a reference to the underlying array
    pub fn data(&self) -> &Array2<T> {
        &self.data
    }

    /// Consume the raster and return the underlying array
    pub fn into_array(self) -> Array2<T> {
        self.data
    }

    /// Apply `f` to every cell, producing a raster of the same shape
    pub fn map<U, F>(&self, f: F) -> Raster<U>
    where
        U: RasterElement,
        F: Fn(T) -> U,
    {
        Raster {
            data: self.data.mapv(f),
        }
    }

    /// Number of cells satisfying `predicate`
    pub fn count_where<F>(&self, predicate: F) -> usize
    where
        F: Fn(T) -> bool,
    {
        self.data.iter().filter(|&&v| predicate(v)).count()
    }

    // Statistics

    /// Calculate basic statistics (min, max, mean)
    pub fn statistics(&self) -> RasterStatistics<T> {
        let mut min: Option<T> = None;
        let mut max: Option<T> = None;
        let mut sum: f64 = 0.0;
        let mut count: usize = 0;

        for &value in self.data.iter() {
            if min.is_none_or(|m| value < m) {
                min = Some(value);
            }
            if max.is_none_or(|m| value > m) {
                max = Some(value);
            }
            if let Some(v) = value.to_f64() {
                sum += v;
                count += 1;
            }
        }

        let mean = if count > 0 {
            Some(sum / count as f64)
        } else {
            None
        };

        RasterStatistics { min, max, mean }
    }
}

/// Basic statistics for a raster
#[derive(Debug, Clone)]
pub struct RasterStatistics<T> {
    pub min: Option<T>,
    pub max: Option<T>,
    pub mean: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_creation() {
        let raster: Raster<i16> = Raster::new(100, 200);
        assert_eq!(raster.rows(), 100);
        assert_eq!(raster.cols(), 200);
        assert_eq!(raster.shape(), (100, 200));
    }

    #[test]
    fn test_raster_access() {
        let mut raster: Raster<u8> = Raster::new(10, 10);
        raster.set(5, 5, 1).unwrap();
        assert_eq!(raster.get(5, 5).unwrap(), 1);
        assert!(raster.get(10, 0).is_err());
        assert!(raster.set(0, 10, 1).is_err());
    }

    #[test]
    fn test_from_vec_rejects_bad_length() {
        assert!(Raster::<u8>::from_vec(vec![0; 5], 2, 3).is_err());
        let r = Raster::from_vec(vec![1u8, 2, 3, 4, 5, 6], 2, 3).unwrap();
        assert_eq!(r.get(1, 0).unwrap(), 4);
    }

    #[test]
    fn test_map_and_count() {
        let r = Raster::from_vec(vec![-5i16, 0, 31, 100], 2, 2).unwrap();
        let doubled: Raster<i32> = r.map(|v| v as i32 * 2);
        assert_eq!(doubled.get(1, 1).unwrap(), 200);
        assert_eq!(r.count_where(|v| v > 30), 2);
    }

    #[test]
    fn test_raster_statistics() {
        let mut raster: Raster<i16> = Raster::new(10, 10);
        for i in 0..10 {
            for j in 0..10 {
                raster.set(i, j, (i * 10 + j) as i16 - 50).unwrap();
            }
        }

        let stats = raster.statistics();
        assert_eq!(stats.min, Some(-50));
        assert_eq!(stats.max, Some(49));
        assert!((stats.mean.unwrap() - -0.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_statistics() {
        let raster: Raster<u8> = Raster::new(0, 0);
        let stats = raster.statistics();
        assert!(raster.is_empty());
        assert_eq!(stats.min, None);
        assert_eq!(stats.mean, None);
    }
}
