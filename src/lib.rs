//! Tilelod - level-of-detail tile simplification for classified terrain rasters

pub mod core;
pub mod terrain;
pub mod grid;
pub mod lod;
pub mod tile_map;
pub mod simplify;
pub mod render;
pub mod config;

pub use config::SimplifierConfig;
pub use grid::CategoryGrid;
pub use lod::LevelOfDetail;
pub use simplify::{compute_tile_map, simplify_buffer, LodSimplifier};
pub use terrain::{resolve_color, Category, Rgb};
pub use tile_map::{TileMap, TileRecord, TileRect};
