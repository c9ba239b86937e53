//! Simplifier configuration, loadable from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::Result;

/// Configuration for the tile simplification pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplifierConfig {
    /// Level of detail used when none is given explicitly (0 = one tile per pixel).
    pub level_of_detail: u32,
    /// Aggregate rows of tiles on the rayon thread pool.
    pub parallel: bool,
    /// Grids smaller than this side are always simplified sequentially.
    pub parallel_min_side: u32,
}

impl Default for SimplifierConfig {
    fn default() -> Self {
        Self {
            level_of_detail: 0,
            parallel: true,
            parallel_min_side: 256,
        }
    }
}

impl SimplifierConfig {
    /// Sequential configuration, mostly for tests and small grids.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Default::default()
        }
    }

    /// Parse from a JSON string. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Whether a grid of this side should use parallel aggregation.
    pub fn use_parallel(&self, grid_side: u32) -> bool {
        self.parallel && grid_side >= self.parallel_min_side
    }
}
