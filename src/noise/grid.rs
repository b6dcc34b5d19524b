//! Row-major grid of sampled noise values.

/// A 2D grid of noise values in [0, 1], stored in row-major order.
///
/// Produced once per generation pass and read by both the texture and the
/// mesh builders.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseGrid {
    rows: usize,
    cols: usize,
    values: Vec<f32>,
}

impl NoiseGrid {
    pub(crate) fn from_values(rows: usize, cols: usize, values: Vec<f32>) -> Self {
        debug_assert_eq!(values.len(), rows * cols);
        Self { rows, cols, values }
    }

    /// Number of rows (the y axis, `y_size + 1`).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (the x axis, `x_size + 1`).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Value at `(row, col)`.
    ///
    /// # Panics
    /// Panics if the coordinate lies outside the grid.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(
            row < self.rows && col < self.cols,
            "grid index ({}, {}) out of bounds for {}x{}",
            row,
            col,
            self.rows,
            self.cols
        );
        self.values[row * self.cols + col]
    }

    /// All values in row-major order.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Iterates rows as slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f32]> {
        self.values.chunks_exact(self.cols)
    }

    /// Minimum and maximum sampled value.
    pub fn value_range(&self) -> (f32, f32) {
        let mut min = f32::MAX;
        let mut max = f32::MIN;

        for &v in &self.values {
            min = min.min(v);
            max = max.max(v);
        }

        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> NoiseGrid {
        let values = (0..6).map(|i| i as f32 / 10.0).collect();
        NoiseGrid::from_values(2, 3, values)
    }

    #[test]
    fn test_row_major_lookup() {
        let grid = ramp();
        assert_eq!(grid.get(0, 2), 0.2);
        assert_eq!(grid.get(1, 0), 0.3);
        assert_eq!(grid.iter_rows().count(), 2);
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds_panics() {
        ramp().get(2, 0);
    }

    #[test]
    fn test_value_range() {
        let (min, max) = ramp().value_range();
        assert_eq!(min, 0.0);
        assert!((max - 0.5).abs() < 1e-6);
    }
}
