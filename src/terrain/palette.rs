//! Display colors for terrain categories.
//!
//! Colors are resolved only at paint time. The lookup is total: grass
//! variants share one green, unknown codes fall back to the water color.

use serde::{Deserialize, Serialize};
use super::category::{Category, CategoryId};

/// 8-bit sRGB color
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

pub const GRASS_COLOR: Rgb = Rgb::new(0, 128, 0);
pub const MOUNTAIN_COLOR: Rgb = Rgb::new(127, 127, 127);
/// Fallback for water and unrecognised categories
pub const WATER_COLOR: Rgb = Rgb::new(0, 0, 255);

/// Resolve the display color of a category.
pub fn resolve_color(category: Category) -> Rgb {
    match category {
        Category::Grass | Category::AltGrass1 | Category::AltGrass2 => GRASS_COLOR,
        Category::Mountain => MOUNTAIN_COLOR,
        Category::Other => WATER_COLOR,
    }
}

/// Resolve the display color of a raw category code.
pub fn resolve_color_id(code: CategoryId) -> Rgb {
    resolve_color(Category::from_code(code))
}
