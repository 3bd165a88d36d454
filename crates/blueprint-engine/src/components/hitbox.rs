use glam::DVec2;

use crate::error::{EngineError, Result};

/// Axis-aligned collision box. `(x, y)` is the top-left corner and doubles as the
/// owning object's position; y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitBox {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl HitBox {
    /// Width and height must both be strictly positive.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Result<Self> {
        if !(width > 0.0 && height > 0.0) {
            return Err(EngineError::InvalidArgument(format!(
                "hitbox dimensions must be positive, got {width}x{height}"
            )));
        }
        Ok(Self { x, y, width, height })
    }

    pub fn origin(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn set_origin(&mut self, origin: DVec2) {
        self.x = origin.x;
        self.y = origin.y;
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Overlap with non-zero area. Boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &HitBox) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Extent of the intersection along each axis (non-positive when disjoint).
    pub fn overlap_extent(&self, other: &HitBox) -> DVec2 {
        DVec2::new(
            self.right().min(other.right()) - self.x.max(other.x),
            self.bottom().min(other.bottom()) - self.y.max(other.y),
        )
    }
}
