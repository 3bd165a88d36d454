use glam::DVec2;

use crate::api::types::ObjectId;
use crate::components::object::GameObject;
use crate::core::bounds::MapBounds;
use crate::error::{EngineError, Result};
use crate::level::data::CameraData;

/// How the camera moves from tick to tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraMode {
    /// Stays where it was placed.
    Fixed,
    /// Centres on the tracked object's hitbox.
    Tracker { target: ObjectId },
    /// Drifts by a constant amount every tick.
    AutoScroll { speed: DVec2 },
}

/// Orthographic camera over a y-down world.
#[derive(Debug, Clone)]
pub struct Camera2D {
    /// Visible width in world units.
    pub width: f64,
    /// Visible height in world units.
    pub height: f64,
    /// Camera center position in world space.
    pub center: DVec2,
    /// Optional bounds the viewport may not leave.
    pub bounds: Option<MapBounds>,
    /// Smoothing factor for camera follow (0.0 = instant, 1.0 = never moves).
    pub smoothing: f64,
    pub mode: CameraMode,
}

impl Camera2D {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            center: DVec2::ZERO,
            bounds: None,
            smoothing: 0.0,
            mode: CameraMode::Fixed,
        }
    }

    /// Fixed camera showing the top-left corner of `bounds`.
    pub fn fixed(bounds: MapBounds, viewport: DVec2) -> Self {
        let mut camera = Self::new(viewport.x, viewport.y);
        camera.bounds = Some(bounds);
        camera.look_at(bounds.min() + viewport * 0.5);
        camera
    }

    /// Build a camera from level data.
    ///
    /// A tracker's `target` parameter names an object uuid or, failing that, the
    /// group of the first matching object in `objects`.
    pub fn from_data(
        data: &CameraData,
        bounds: MapBounds,
        viewport: DVec2,
        objects: &[GameObject],
    ) -> Result<Self> {
        let mut camera = Self::fixed(bounds, viewport);
        let double = |name: &str| data.double_params.get(name).copied();
        if let Some(smoothing) = double("smoothing") {
            camera.set_smoothing(smoothing);
        }
        match data.kind.to_ascii_lowercase().as_str() {
            "fixed" => {
                if let (Some(x), Some(y)) = (double("x"), double("y")) {
                    camera.look_at(DVec2::new(x, y));
                }
            }
            "tracker" => {
                let target = data
                    .string_params
                    .get("target")
                    .filter(|t| !t.is_empty())
                    .ok_or_else(|| EngineError::configuration("tracker camera needs a 'target'"))?;
                let object = ObjectId::parse(target)
                    .and_then(|id| objects.iter().find(|o| o.id() == id))
                    .or_else(|| objects.iter().find(|o| o.group() == target.as_str()))
                    .ok_or_else(|| {
                        EngineError::configuration(format!(
                            "tracker camera target '{target}' matches no object"
                        ))
                    })?;
                camera.mode = CameraMode::Tracker { target: object.id() };
                camera.look_at(object.hitbox().center());
            }
            "auto_scroll" => {
                let speed = DVec2::new(
                    double("speed_x").unwrap_or(1.0),
                    double("speed_y").unwrap_or(0.0),
                );
                camera.mode = CameraMode::AutoScroll { speed };
            }
            other => {
                return Err(EngineError::configuration(format!(
                    "unknown camera kind '{other}'"
                )))
            }
        }
        Ok(camera)
    }

    /// The object a tracker camera follows.
    pub fn tracked(&self) -> Option<ObjectId> {
        match self.mode {
            CameraMode::Tracker { target } => Some(target),
            _ => None,
        }
    }

    /// Advance one tick. `target` is the tracked object's centre, if it is still alive.
    pub fn update(&mut self, target: Option<DVec2>, dt: f64) {
        match self.mode {
            CameraMode::Fixed => {}
            CameraMode::Tracker { .. } => {
                if let Some(target) = target {
                    self.follow(target, dt);
                }
            }
            CameraMode::AutoScroll { speed } => {
                let next = self.center + speed;
                self.look_at(next);
            }
        }
    }

    /// 0.0 = instant snap, 0.9 = very smooth/slow.
    pub fn set_smoothing(&mut self, smoothing: f64) {
        self.smoothing = smoothing.clamp(0.0, 0.99);
    }

    pub fn look_at(&mut self, target: DVec2) {
        self.center = target;
        self.clamp_to_bounds();
    }

    /// Move toward `target`, honouring the smoothing factor.
    pub fn follow(&mut self, target: DVec2, dt: f64) {
        if self.smoothing <= 0.0 {
            self.look_at(target);
        } else {
            let lerp_factor = 1.0 - self.smoothing.powf(dt * 60.0);
            self.center += (target - self.center) * lerp_factor;
            self.clamp_to_bounds();
        }
    }

    fn clamp_to_bounds(&mut self) {
        let Some(bounds) = self.bounds else {
            return;
        };
        let half = DVec2::new(self.width, self.height) / 2.0;
        // Viewport larger than the level on an axis: centre on that axis.
        self.center.x = if self.width >= bounds.width() {
            bounds.center().x
        } else {
            self.center.x.clamp(bounds.min_x + half.x, bounds.max_x - half.x)
        };
        self.center.y = if self.height >= bounds.height() {
            bounds.center().y
        } else {
            self.center.y.clamp(bounds.min_y + half.y, bounds.max_y - half.y)
        };
    }

    /// Check if a world-space rectangle overlaps the viewport.
    pub fn is_rect_visible(&self, rect_center: DVec2, rect_half_size: DVec2) -> bool {
        let half = DVec2::new(self.width, self.height) / 2.0;
        let cam_min = self.center - half;
        let cam_max = self.center + half;
        let rect_min = rect_center - rect_half_size;
        let rect_max = rect_center + rect_half_size;
        rect_max.x >= cam_min.x
            && rect_min.x <= cam_max.x
            && rect_max.y >= cam_min.y
            && rect_min.y <= cam_max.y
    }
}
