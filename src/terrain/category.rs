//! Terrain categories assigned to classified pixels

use serde::{Deserialize, Serialize};

/// Raw category code as stored in a classified pixel buffer.
pub type CategoryId = u8;

/// Number of distinct categories.
pub const CATEGORY_COUNT: usize = 5;

/// Terrain category of a single pixel or tile.
///
/// Variants are ordered by their code; that ordering is also the tie-break
/// order when two categories are equally frequent inside a tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Category {
    /// Water or anything the classifier did not recognise
    #[default]
    Other = 0,
    Grass = 1,
    AltGrass1 = 2,
    AltGrass2 = 3,
    Mountain = 4,
}

impl Category {
    /// All categories in code order.
    pub const ALL: [Category; CATEGORY_COUNT] = [
        Category::Other,
        Category::Grass,
        Category::AltGrass1,
        Category::AltGrass2,
        Category::Mountain,
    ];

    /// Convert a raw code to a category. Unknown codes become `Other`.
    pub fn from_code(code: CategoryId) -> Self {
        match code {
            1 => Category::Grass,
            2 => Category::AltGrass1,
            3 => Category::AltGrass2,
            4 => Category::Mountain,
            _ => Category::Other,
        }
    }

    /// Raw code of this category.
    pub fn id(&self) -> CategoryId {
        *self as CategoryId
    }

    /// Index into per-category tables (same as the code).
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Whether this category is one of the grass variants
    pub fn is_grass(&self) -> bool {
        matches!(
            self,
            Category::Grass | Category::AltGrass1 | Category::AltGrass2
        )
    }
}

impl From<CategoryId> for Category {
    fn from(code: CategoryId) -> Self {
        Category::from_code(code)
    }
}

impl From<Category> for CategoryId {
    fn from(category: Category) -> Self {
        category.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for category in Category::ALL {
            assert_eq!(Category::from_code(category.id()), category);
        }
    }

    #[test]
    fn test_unknown_codes_are_other() {
        assert_eq!(Category::from_code(5), Category::Other);
        assert_eq!(Category::from_code(200), Category::Other);
        assert_eq!(Category::from_code(255), Category::Other);
    }

    #[test]
    fn test_ordering_follows_code() {
        assert!(Category::Other < Category::Grass);
        assert!(Category::AltGrass2 < Category::Mountain);
        let mut sorted = Category::ALL;
        sorted.sort();
        assert_eq!(sorted, Category::ALL);
    }

    #[test]
    fn test_grass_variants() {
        assert!(Category::Grass.is_grass());
        assert!(Category::AltGrass1.is_grass());
        assert!(Category::AltGrass2.is_grass());
        assert!(!Category::Mountain.is_grass());
        assert!(!Category::Other.is_grass());
    }

    #[test]
    fn test_default_is_other() {
        assert_eq!(Category::default(), Category::Other);
        assert_eq!(Category::default().index(), 0);
    }
}
