//! Presentation side of the tile map.
//!
//! [`TileRenderer`] holds the current pixel buffer and LOD and keeps the
//! latest tile map snapshot. Setting inputs only marks it dirty; the host
//! calls [`TileRenderer::recompute`] explicitly and then [`TileRenderer::render`]
//! on every refresh. Drawing goes through the [`TileCanvas`] trait so any
//! surface can be plugged in.

use std::path::Path;
use std::sync::atomic::AtomicBool;

use image::{ImageFormat, RgbImage};

use crate::config::SimplifierConfig;
use crate::core::Result;
use crate::grid::CategoryGrid;
use crate::lod::LevelOfDetail;
use crate::simplify::LodSimplifier;
use crate::terrain::{resolve_color, CategoryId, Rgb};
use crate::tile_map::{TileMap, TileRect};

/// Drawing surface able to fill axis-aligned rectangles.
pub trait TileCanvas {
    fn fill_rect(&mut self, rect: TileRect, color: Rgb);
}

/// Owns renderer inputs and the current tile map snapshot.
#[derive(Debug, Default)]
pub struct TileRenderer {
    image_source: Option<Vec<CategoryId>>,
    level_of_detail: i64,
    simplifier: LodSimplifier,
    tile_map: Option<TileMap>,
    dirty: bool,
    generation: u32,
}

impl TileRenderer {
    pub fn new(config: SimplifierConfig) -> Self {
        Self {
            level_of_detail: config.level_of_detail as i64,
            simplifier: LodSimplifier::new(config),
            ..Default::default()
        }
    }

    /// Replace the classified pixel buffer. Takes effect on the next `recompute`.
    pub fn set_image_source(&mut self, buffer: Vec<CategoryId>) {
        self.image_source = Some(buffer);
        self.dirty = true;
    }

    pub fn image_source(&self) -> Option<&[CategoryId]> {
        self.image_source.as_deref()
    }

    /// Change the level of detail. Takes effect on the next `recompute`.
    ///
    /// The value is validated at recompute time, so a negative LOD is
    /// accepted here and reported there.
    pub fn set_level_of_detail(&mut self, lod: i64) {
        self.level_of_detail = lod;
        self.dirty = true;
    }

    pub fn level_of_detail(&self) -> i64 {
        self.level_of_detail
    }

    /// True when inputs changed since the last recompute.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of successful recomputes, wrapping.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Current tile map, if one was computed successfully.
    pub fn tile_map(&self) -> Option<&TileMap> {
        self.tile_map.as_ref()
    }

    /// Discard the current tile map and compute a new one from the inputs.
    ///
    /// Without an image source there is nothing to compute and the map stays
    /// absent. On error the map also stays absent and the error is returned.
    pub fn recompute(&mut self) -> Result<()> {
        self.recompute_inner(None)
    }

    /// Like [`recompute`](Self::recompute), aborting when `cancel` is set.
    pub fn recompute_cancellable(&mut self, cancel: &AtomicBool) -> Result<()> {
        self.recompute_inner(Some(cancel))
    }

    fn recompute_inner(&mut self, cancel: Option<&AtomicBool>) -> Result<()> {
        self.tile_map = None;
        self.dirty = false;

        let Some(buffer) = self.image_source.as_deref() else {
            return Ok(());
        };

        let result = LevelOfDetail::new(self.level_of_detail).and_then(|lod| {
            let grid = CategoryGrid::from_buffer(buffer)?;
            match cancel {
                Some(flag) => self.simplifier.compute_cancellable(&grid, lod, flag),
                None => self.simplifier.compute(&grid, lod),
            }
        });

        match result {
            Ok(map) => {
                self.generation = self.generation.wrapping_add(1);
                log::info!(
                    "Recomputed tile map #{}: {} tiles at LOD {}",
                    self.generation,
                    map.len(),
                    self.level_of_detail
                );
                self.tile_map = Some(map);
                Ok(())
            }
            Err(e) => {
                log::warn!("Tile map recompute failed, rendering nothing: {}", e);
                Err(e)
            }
        }
    }

    /// Draw the current tile map, one fill per tile.
    ///
    /// Returns the number of fills issued; an absent map draws nothing.
    pub fn render(&self, canvas: &mut dyn TileCanvas) -> usize {
        let Some(map) = &self.tile_map else {
            return 0;
        };
        for &(rect, category) in map {
            canvas.fill_rect(rect, resolve_color(category));
        }
        map.len()
    }
}

/// In-memory RGB raster canvas.
pub struct ImageCanvas {
    image: RgbImage,
}

impl ImageCanvas {
    /// Create a canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgb) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, image::Rgb(background.to_array())),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Color at pixel (x, y), or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        self.image
            .get_pixel_checked(x, y)
            .map(|p| Rgb::new(p.0[0], p.0[1], p.0[2]))
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Write the canvas as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.image.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

impl TileCanvas for ImageCanvas {
    fn fill_rect(&mut self, rect: TileRect, color: Rgb) {
        let x_end = rect.right().min(self.image.width() as u64) as u32;
        let y_end = rect.bottom().min(self.image.height() as u64) as u32;
        let pixel = image::Rgb(color.to_array());
        for y in rect.y..y_end {
            for x in rect.x..x_end {
                self.image.put_pixel(x, y, pixel);
            }
        }
    }
}
