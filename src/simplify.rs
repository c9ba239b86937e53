//! LOD simplifier: reduces a category grid to a tile map.
//!
//! The grid is partitioned into square tiles of side `2^lod` (clamped to the
//! grid), scanning rows of tiles top to bottom and each row left to right.
//! Tiles reaching past the grid edge are clipped. Each tile takes its most
//! frequent category, ties going to the lowest category code.

use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use crate::config::SimplifierConfig;
use crate::core::{Error, Result};
use crate::grid::CategoryGrid;
use crate::lod::{tiles_per_side, LevelOfDetail};
use crate::terrain::{Category, CategoryId, CATEGORY_COUNT};
use crate::tile_map::{TileMap, TileRect};

/// Builds tile maps from category grids.
#[derive(Clone, Debug, Default)]
pub struct LodSimplifier {
    config: SimplifierConfig,
}

impl LodSimplifier {
    pub fn new(config: SimplifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimplifierConfig {
        &self.config
    }

    /// Compute the tile map of `grid` at `lod`.
    pub fn compute(&self, grid: &CategoryGrid, lod: LevelOfDetail) -> Result<TileMap> {
        self.run(grid, lod, None)
    }

    /// Compute the tile map, checking `cancel` before each row of tiles.
    ///
    /// Returns `Error::Cancelled` without a partial map once the flag is set.
    pub fn compute_cancellable(
        &self,
        grid: &CategoryGrid,
        lod: LevelOfDetail,
        cancel: &AtomicBool,
    ) -> Result<TileMap> {
        self.run(grid, lod, Some(cancel))
    }

    fn run(
        &self,
        grid: &CategoryGrid,
        lod: LevelOfDetail,
        cancel: Option<&AtomicBool>,
    ) -> Result<TileMap> {
        let side = grid.side();
        let tile = lod.tile_side(side);
        if grid.is_empty() {
            return Ok(TileMap::new(0, tile));
        }

        let rows = tiles_per_side(side, tile);
        let row_tiles = |ty: u32| -> Result<Vec<(TileRect, Category)>> {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                return Err(Error::Cancelled);
            }
            Ok(tile_row(grid, ty * tile, tile))
        };

        let parallel = self.config.use_parallel(side);
        let collected: Result<Vec<Vec<(TileRect, Category)>>> = if parallel {
            (0..rows).into_par_iter().map(row_tiles).collect()
        } else {
            (0..rows).map(row_tiles).collect()
        };
        let tile_rows = collected
            .inspect_err(|e| log::warn!("Tile map for {}px grid at {} aborted: {}", side, lod, e))?;

        let mut map = TileMap::with_capacity(side, tile, rows as usize * rows as usize);
        map.extend(tile_rows.into_iter().flatten());

        log::debug!(
            "Simplified {}x{} grid at {} (tile {}px, parallel={}) into {} tiles",
            side, side, lod, tile, parallel, map.len()
        );
        Ok(map)
    }
}

/// Compute one row of tiles whose top edge is at `y`.
fn tile_row(grid: &CategoryGrid, y: u32, tile: u32) -> Vec<(TileRect, Category)> {
    let side = grid.side();
    let height = tile.min(side - y);

    (0..side)
        .step_by(tile as usize)
        .map(|x| {
            let rect = TileRect::new(x, y, tile.min(side - x), height);
            (rect, majority_category(grid, &rect))
        })
        .collect()
}

/// Most frequent category inside `rect`, ties going to the lowest code.
///
/// Only the part of `rect` inside the grid is counted; a rect entirely
/// outside the grid counts nothing and yields `Other`.
pub fn majority_category(grid: &CategoryGrid, rect: &TileRect) -> Category {
    let side = grid.side() as u64;
    let x_end = rect.right().min(side) as usize;
    let y_end = rect.bottom().min(side) as u32;

    let mut counts = [0u64; CATEGORY_COUNT];
    for y in rect.y..y_end {
        let row = grid.row(y);
        for category in row.get(rect.x as usize..x_end).unwrap_or_default() {
            counts[category.index()] += 1;
        }
    }

    let mut best = Category::Other;
    for category in Category::ALL {
        if counts[category.index()] > counts[best.index()] {
            best = category;
        }
    }
    best
}

/// Compute a tile map with the default configuration.
pub fn compute_tile_map(grid: &CategoryGrid, lod: LevelOfDetail) -> Result<TileMap> {
    LodSimplifier::default().compute(grid, lod)
}

/// Validate a raw buffer and LOD, then compute the tile map.
///
/// Fails with `Error::InvalidInput` if the buffer length is not a perfect
/// square or the LOD is negative. An empty buffer yields an empty map.
pub fn simplify_buffer(buffer: &[CategoryId], lod: i64) -> Result<TileMap> {
    let lod = LevelOfDetail::new(lod)?;
    let grid = CategoryGrid::from_buffer(buffer)?;
    compute_tile_map(&grid, lod)
}
