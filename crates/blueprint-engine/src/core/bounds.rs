use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// World bounding rectangle, fixed at level load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl MapBounds {
    /// Fails unless `min < max` on both axes.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self> {
        let bounds = Self {
            min_x,
            min_y,
            max_x,
            max_y,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    /// Deserialized bounds skip `new`, so loaders call this explicitly.
    pub fn validate(&self) -> Result<()> {
        if self.min_x < self.max_x && self.min_y < self.max_y {
            Ok(())
        } else {
            Err(EngineError::configuration(format!(
                "map bounds must satisfy min < max, got ({}, {})..({}, {})",
                self.min_x, self.min_y, self.max_x, self.max_y
            )))
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn min(&self) -> DVec2 {
        DVec2::new(self.min_x, self.min_y)
    }

    pub fn max(&self) -> DVec2 {
        DVec2::new(self.max_x, self.max_y)
    }

    pub fn center(&self) -> DVec2 {
        (self.min() + self.max()) * 0.5
    }

    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= self.min_x && point.x <= self.max_x && point.y >= self.min_y && point.y <= self.max_y
    }
}

impl Default for MapBounds {
    fn default() -> Self {
        Self {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 800.0,
            max_y: 600.0,
        }
    }
}
