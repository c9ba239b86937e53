//! Level of Detail (LOD) policy for tile simplification
//!
//! Each LOD level doubles the tile side length, starting from single-pixel
//! tiles at LOD 0. Tile sides are clamped to the grid side so that the
//! coarsest useful level covers the whole grid with one tile.

use std::fmt;

use crate::core::{Error, Result};

/// Validated, non-negative level of detail.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LevelOfDetail(u32);

impl LevelOfDetail {
    /// Full detail: one tile per pixel.
    pub const FULL: Self = Self(0);

    /// Validate a raw LOD value.
    ///
    /// Negative values are rejected with `Error::InvalidInput`. Values past
    /// `u32::MAX` saturate; any LOD whose tile side reaches the grid side
    /// yields a single whole-grid tile.
    pub fn new(value: i64) -> Result<Self> {
        if value < 0 {
            return Err(Error::InvalidInput(format!(
                "level of detail must be non-negative, got {}",
                value
            )));
        }
        Ok(Self(u32::try_from(value).unwrap_or(u32::MAX)))
    }

    /// LOD level as an integer.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Tile side length for a grid of the given side. See [`tile_side_for_lod`].
    pub fn tile_side(self, grid_side: u32) -> u32 {
        tile_side_for_lod(self.0, grid_side)
    }
}

impl TryFrom<i64> for LevelOfDetail {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<i32> for LevelOfDetail {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        Self::new(value as i64)
    }
}

impl From<u32> for LevelOfDetail {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for LevelOfDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LOD {}", self.0)
    }
}

/// Calculate tile side length for a LOD level
///
/// The side is `2^lod`, clamped to `[1, grid_side]`. An empty grid
/// (side 0) still reports a side of 1.
///
/// # Arguments
/// * `lod` - LOD level
/// * `grid_side` - Side length of the grid in pixels
///
/// # Examples
/// ```
/// use tilelod::lod::tile_side_for_lod;
///
/// assert_eq!(tile_side_for_lod(0, 64), 1);   // Full detail
/// assert_eq!(tile_side_for_lod(1, 64), 2);
/// assert_eq!(tile_side_for_lod(3, 64), 8);
/// assert_eq!(tile_side_for_lod(10, 64), 64); // Clamped to grid
/// assert_eq!(tile_side_for_lod(4, 0), 1);    // Empty grid
/// ```
pub fn tile_side_for_lod(lod: u32, grid_side: u32) -> u32 {
    let side = 1u32.checked_shl(lod).unwrap_or(u32::MAX);
    side.min(grid_side.max(1))
}

/// Number of tiles along one axis for the given grid and tile sides
///
/// Boundary tiles that do not fit entirely are counted, since they are
/// clipped rather than dropped.
///
/// # Examples
/// ```
/// use tilelod::lod::tiles_per_side;
///
/// assert_eq!(tiles_per_side(8, 2), 4);
/// assert_eq!(tiles_per_side(5, 2), 3); // last column clipped to 1px
/// assert_eq!(tiles_per_side(0, 4), 0);
/// ```
pub fn tiles_per_side(grid_side: u32, tile_side: u32) -> u32 {
    grid_side.div_ceil(tile_side.max(1))
}

/// Smallest LOD at which the whole grid becomes a single tile
///
/// Levels above this produce the same tile map.
///
/// # Examples
/// ```
/// use tilelod::lod::coarsest_lod;
///
/// assert_eq!(coarsest_lod(1), 0);
/// assert_eq!(coarsest_lod(4), 2);
/// assert_eq!(coarsest_lod(5), 3);
/// assert_eq!(coarsest_lod(256), 8);
/// ```
pub fn coarsest_lod(grid_side: u32) -> u32 {
    if grid_side <= 1 {
        return 0;
    }
    grid_side
        .checked_next_power_of_two()
        .map_or(u32::BITS, |p| p.trailing_zeros())
}
