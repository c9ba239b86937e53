//! Tile map: ordered rectangles with one representative category each.
//!
//! Entries are stored in scan order (rows of tiles top to bottom, each row
//! left to right), so iteration is identical for identical inputs.

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::terrain::{Category, CategoryId, CATEGORY_COUNT};

/// Axis-aligned rectangle in pixel space
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl TileRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Number of pixels covered.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Exclusive right edge
    pub fn right(&self) -> u64 {
        self.x as u64 + self.width as u64
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> u64 {
        self.y as u64 + self.height as u64
    }

    /// Check if two rectangles share at least one pixel
    pub fn overlaps(&self, other: &TileRect) -> bool {
        (self.x as u64) < other.right()
            && (other.x as u64) < self.right()
            && (self.y as u64) < other.bottom()
            && (other.y as u64) < self.bottom()
    }

    /// Check if pixel (x, y) lies inside the rectangle
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && (x as u64) < self.right() && y >= self.y && (y as u64) < self.bottom()
    }

    /// Check if the rectangle lies within `[0, side)` on both axes
    pub fn fits_within(&self, side: u32) -> bool {
        self.right() <= side as u64 && self.bottom() <= side as u64
    }
}

/// Flat tile record for export
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRecord {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub category_id: CategoryId,
}

/// Simplified tile map for one (grid, LOD) pair.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileMap {
    entries: Vec<(TileRect, Category)>,
    grid_side: u32,
    tile_side: u32,
}

impl TileMap {
    /// Create an empty map for a grid of the given side.
    pub fn new(grid_side: u32, tile_side: u32) -> Self {
        Self {
            entries: Vec::new(),
            grid_side,
            tile_side,
        }
    }

    /// Create with pre-allocated capacity.
    pub fn with_capacity(grid_side: u32, tile_side: u32, capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            grid_side,
            tile_side,
        }
    }

    /// Append a tile. Callers building maps by hand can verify the result
    /// with [`check_coverage`](Self::check_coverage).
    pub fn push(&mut self, rect: TileRect, category: Category) {
        self.entries.push((rect, category));
    }

    pub(crate) fn extend<I: IntoIterator<Item = (TileRect, Category)>>(&mut self, entries: I) {
        self.entries.extend(entries);
    }

    /// Number of tiles.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Side of the source grid in pixels.
    pub fn grid_side(&self) -> u32 {
        self.grid_side
    }

    /// Nominal tile side; boundary tiles may be smaller.
    pub fn tile_side(&self) -> u32 {
        self.tile_side
    }

    pub fn get(&self, index: usize) -> Option<(TileRect, Category)> {
        self.entries.get(index).copied()
    }

    /// Iterate entries in scan order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &(TileRect, Category)> + '_ {
        self.entries.iter()
    }

    /// Category of the tile containing pixel (x, y).
    ///
    /// Maps in regular scan order are indexed directly; hand-built maps fall
    /// back to the first entry whose rect contains the pixel.
    pub fn category_at(&self, x: u32, y: u32) -> Option<Category> {
        if x >= self.grid_side || y >= self.grid_side {
            return None;
        }
        if self.tile_side > 0 {
            let per_row = self.grid_side.div_ceil(self.tile_side) as usize;
            let index = (y / self.tile_side) as usize * per_row + (x / self.tile_side) as usize;
            if let Some(&(rect, category)) = self.entries.get(index) {
                if rect.contains(x, y) {
                    return Some(category);
                }
            }
        }
        self.entries
            .iter()
            .find(|(rect, _)| rect.contains(x, y))
            .map(|&(_, category)| category)
    }

    /// Flat records in scan order.
    pub fn records(&self) -> Vec<TileRecord> {
        self.entries
            .iter()
            .map(|&(rect, category)| TileRecord {
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
                category_id: category.id(),
            })
            .collect()
    }

    /// Serialize records to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.records())?)
    }

    /// Total pixel area of all tiles.
    pub fn covered_area(&self) -> u64 {
        self.entries.iter().map(|(rect, _)| rect.area()).sum()
    }

    /// Number of tiles per category, indexed by category code.
    pub fn category_histogram(&self) -> [usize; CATEGORY_COUNT] {
        let mut counts = [0usize; CATEGORY_COUNT];
        for (_, category) in &self.entries {
            counts[category.index()] += 1;
        }
        counts
    }

    /// Verify the tiles cover `[0, grid_side)²` exactly once.
    ///
    /// Fails with `Error::Coverage` on an empty or out-of-bounds tile, an
    /// overlap, or a gap.
    pub fn check_coverage(&self) -> Result<()> {
        let side = self.grid_side as usize;
        let mut covered = vec![false; side * side];

        for (index, (rect, _)) in self.entries.iter().enumerate() {
            if rect.area() == 0 {
                return Err(Error::Coverage(format!("tile {} has zero area: {:?}", index, rect)));
            }
            if !rect.fits_within(self.grid_side) {
                return Err(Error::Coverage(format!(
                    "tile {} extends past grid side {}: {:?}",
                    index, self.grid_side, rect
                )));
            }
            for y in rect.y..rect.y + rect.height {
                let row = y as usize * side;
                for x in rect.x..rect.x + rect.width {
                    let cell = &mut covered[row + x as usize];
                    if *cell {
                        return Err(Error::Coverage(format!(
                            "tile {} overlaps another tile at ({}, {})",
                            index, x, y
                        )));
                    }
                    *cell = true;
                }
            }
        }

        if let Some(gap) = covered.iter().position(|&c| !c) {
            return Err(Error::Coverage(format!(
                "pixel ({}, {}) is not covered by any tile",
                gap % side,
                gap / side
            )));
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a TileMap {
    type Item = &'a (TileRect, Category);
    type IntoIter = std::slice::Iter<'a, (TileRect, Category)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> TileMap {
        let mut map = TileMap::new(2, 1);
        map.push(TileRect::new(0, 0, 1, 1), Category::Grass);
        map.push(TileRect::new(1, 0, 1, 1), Category::Grass);
        map.push(TileRect::new(0, 1, 1, 1), Category::Mountain);
        map.push(TileRect::new(1, 1, 1, 1), Category::Other);
        map
    }

    #[test]
    fn test_rect_overlap() {
        let a = TileRect::new(0, 0, 2, 2);
        assert!(a.overlaps(&TileRect::new(1, 1, 2, 2)));
        assert!(!a.overlaps(&TileRect::new(2, 0, 2, 2)));
        assert!(!a.overlaps(&TileRect::new(0, 2, 2, 2)));
    }

    #[test]
    fn test_rect_contains() {
        let rect = TileRect::new(2, 1, 2, 3);
        assert!(rect.contains(2, 1));
        assert!(rect.contains(3, 3));
        assert!(!rect.contains(4, 1));
        assert!(!rect.contains(2, 4));
        assert!(!rect.contains(1, 2));
    }

    #[test]
    fn test_rect_bounds() {
        assert!(TileRect::new(2, 2, 2, 2).fits_within(4));
        assert!(!TileRect::new(3, 0, 2, 1).fits_within(4));
        assert_eq!(TileRect::new(0, 0, 3, 5).area(), 15);
    }

    #[test]
    fn test_valid_coverage() {
        let map = two_by_two();
        assert!(map.check_coverage().is_ok());
        assert_eq!(map.covered_area(), 4);
    }

    #[test]
    fn test_empty_map_covers_empty_grid() {
        let map = TileMap::new(0, 1);
        assert!(map.is_empty());
        assert!(map.check_coverage().is_ok());
    }

    #[test]
    fn test_gap_detected() {
        let mut map = TileMap::new(2, 1);
        map.push(TileRect::new(0, 0, 2, 1), Category::Grass);
        let err = map.check_coverage().unwrap_err();
        assert!(matches!(err, Error::Coverage(_)));
    }

    #[test]
    fn test_overlap_detected() {
        let mut map = TileMap::new(2, 2);
        map.push(TileRect::new(0, 0, 2, 2), Category::Grass);
        map.push(TileRect::new(1, 1, 1, 1), Category::Grass);
        assert!(matches!(map.check_coverage(), Err(Error::Coverage(_))));
    }

    #[test]
    fn test_out_of_bounds_detected() {
        let mut map = TileMap::new(2, 4);
        map.push(TileRect::new(0, 0, 4, 4), Category::Grass);
        assert!(matches!(map.check_coverage(), Err(Error::Coverage(_))));
    }

    #[test]
    fn test_records_and_histogram() {
        let map = two_by_two();
        let records = map.records();
        assert_eq!(records.len(), 4);
        assert_eq!(
            records[2],
            TileRecord { x: 0, y: 1, width: 1, height: 1, category_id: 4 }
        );

        let histogram = map.category_histogram();
        assert_eq!(histogram[Category::Grass.index()], 2);
        assert_eq!(histogram[Category::Mountain.index()], 1);
        assert_eq!(histogram[Category::Other.index()], 1);
    }

    #[test]
    fn test_category_at() {
        let map = two_by_two();
        assert_eq!(map.category_at(0, 1), Some(Category::Mountain));
        assert_eq!(map.category_at(1, 1), Some(Category::Other));
        assert_eq!(map.category_at(2, 0), None);
    }

    #[test]
    fn test_category_at_irregular_map() {
        // Nominal tile side says 1, but tiles are a 2x1 strip and two 1x1 cells
        let mut map = TileMap::new(2, 1);
        map.push(TileRect::new(0, 0, 2, 1), Category::Mountain);
        map.push(TileRect::new(1, 1, 1, 1), Category::AltGrass1);
        map.push(TileRect::new(0, 1, 1, 1), Category::Grass);

        assert_eq!(map.category_at(1, 0), Some(Category::Mountain));
        assert_eq!(map.category_at(0, 1), Some(Category::Grass));
        assert_eq!(map.category_at(1, 1), Some(Category::AltGrass1));
        assert_eq!(map.category_at(0, 2), None);

        let mut partial = TileMap::new(2, 2);
        partial.push(TileRect::new(0, 0, 1, 1), Category::Grass);
        assert_eq!(partial.category_at(1, 1), None);
    }

    #[test]
    fn test_json_export() {
        let json = two_by_two().to_json().unwrap();
        let parsed: Vec<TileRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 4);
        assert!(json.contains("\"category_id\": 4"));
    }
}
