//! Square grid of per-pixel terrain categories.
//!
//! Built once from a flat, row-major buffer of category codes. The side
//! length is the integer square root of the buffer length, so the buffer
//! must hold a perfect square number of pixels.

use crate::core::{Error, Result};
use crate::terrain::{Category, CategoryId};

/// Immutable square, row-major grid of categories.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryGrid {
    cells: Vec<Category>,
    side: u32,
}

impl CategoryGrid {
    /// Build a grid from raw category codes.
    ///
    /// Unknown codes are classified as [`Category::Other`]. An empty buffer
    /// yields an empty grid.
    pub fn from_buffer(buffer: &[CategoryId]) -> Result<Self> {
        let side = square_side(buffer.len())?;
        let cells = buffer.iter().copied().map(Category::from_code).collect();
        Ok(Self { cells, side })
    }

    /// Build a grid from already classified cells.
    pub fn from_categories(cells: Vec<Category>) -> Result<Self> {
        let side = square_side(cells.len())?;
        Ok(Self { cells, side })
    }

    /// Build a grid where every cell has the same category.
    pub fn filled(side: u32, category: Category) -> Self {
        Self {
            cells: vec![category; side as usize * side as usize],
            side,
        }
    }

    /// Side length in pixels.
    pub fn side(&self) -> u32 {
        self.side
    }

    /// Total number of pixels.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Category at pixel (x, y), or `None` outside the grid.
    pub fn get(&self, x: u32, y: u32) -> Option<Category> {
        if x >= self.side || y >= self.side {
            return None;
        }
        Some(self.cells[y as usize * self.side as usize + x as usize])
    }

    /// One row of the grid.
    ///
    /// # Panics
    /// Panics if `y >= side`.
    pub fn row(&self, y: u32) -> &[Category] {
        let start = y as usize * self.side as usize;
        &self.cells[start..start + self.side as usize]
    }

    pub fn as_slice(&self) -> &[Category] {
        &self.cells
    }
}

/// Side length of a square with `len` cells.
fn square_side(len: usize) -> Result<u32> {
    let side = len.isqrt();
    if side * side != len {
        return Err(Error::InvalidInput(format!(
            "buffer length {} is not a perfect square",
            len
        )));
    }
    u32::try_from(side).map_err(|_| {
        Error::InvalidInput(format!("grid side {} exceeds u32 range", side))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_buffer_square() {
        let grid = CategoryGrid::from_buffer(&[1, 1, 4, 0]).unwrap();
        assert_eq!(grid.side(), 2);
        assert_eq!(grid.len(), 4);
        assert_eq!(grid.get(0, 0), Some(Category::Grass));
        assert_eq!(grid.get(0, 1), Some(Category::Mountain));
        assert_eq!(grid.get(1, 1), Some(Category::Other));
    }

    #[test]
    fn test_non_square_rejected() {
        let err = CategoryGrid::from_buffer(&[0; 10]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let err = CategoryGrid::from_categories(vec![Category::Grass; 3]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_empty_buffer() {
        let grid = CategoryGrid::from_buffer(&[]).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.side(), 0);
        assert_eq!(grid.get(0, 0), None);
    }

    #[test]
    fn test_single_pixel() {
        let grid = CategoryGrid::from_buffer(&[4]).unwrap();
        assert_eq!(grid.side(), 1);
        assert_eq!(grid.get(0, 0), Some(Category::Mountain));
    }

    #[test]
    fn test_unknown_codes_classified_other() {
        let grid = CategoryGrid::from_buffer(&[9, 1, 1, 1]).unwrap();
        assert_eq!(grid.get(0, 0), Some(Category::Other));
    }

    #[test]
    fn test_rows_are_row_major() {
        let grid = CategoryGrid::from_buffer(&[1, 1, 1, 2, 2, 2, 4, 4, 4]).unwrap();
        assert_eq!(grid.row(1), &[Category::AltGrass1; 3]);
        assert_eq!(grid.row(2), &[Category::Mountain; 3]);
        assert_eq!(grid.get(3, 0), None);
    }

    #[test]
    fn test_filled() {
        let grid = CategoryGrid::filled(5, Category::AltGrass2);
        assert_eq!(grid.len(), 25);
        assert!(grid.as_slice().iter().all(|&c| c == Category::AltGrass2));
    }
}
