//! Terrain categories and their display palette

pub mod category;
pub mod palette;

pub use category::{Category, CategoryId, CATEGORY_COUNT};
pub use palette::{resolve_color, resolve_color_id, Rgb};
