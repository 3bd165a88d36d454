use glam::DVec2;

use crate::api::types::{GameStatus, ObjectId};
use crate::components::object::GameObject;
use crate::components::sprite::FrameData;
use crate::renderer::camera::Camera2D;

/// Everything a renderer needs to draw one object. Detached from the live object.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewObject {
    pub id: ObjectId,
    pub group: String,
    /// Hitbox top-left corner in world space.
    pub position: DVec2,
    /// Hitbox size in world units.
    pub size: DVec2,
    pub frame: FrameData,
    /// Sprite draw offset relative to `position`.
    pub sprite_offset: DVec2,
    /// Degrees.
    pub rotation: f64,
    pub flipped: bool,
    pub layer: i32,
    /// Displayed stats, players only.
    pub stats: Vec<(String, f64)>,
    /// Whether the hitbox overlaps the camera viewport.
    pub visible: bool,
}

impl ViewObject {
    pub fn from_object(object: &GameObject, camera: &Camera2D) -> Self {
        let hitbox = object.hitbox();
        let sprite = object.sprite();
        Self {
            id: object.id(),
            group: object.group().to_string(),
            position: hitbox.origin(),
            size: hitbox.size(),
            frame: sprite.current_frame().clone(),
            sprite_offset: sprite.offset,
            rotation: sprite.rotation,
            flipped: sprite.flipped,
            layer: object.layer(),
            stats: object.displayed_stats(),
            visible: camera.is_rect_visible(hitbox.center(), hitbox.size() / 2.0),
        }
    }
}

/// Immutable picture of the world after a tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldSnapshot {
    pub tick: u64,
    /// Sorted by layer, ties kept in processing order.
    pub objects: Vec<ViewObject>,
    pub camera_center: DVec2,
    pub status: GameStatus,
}

impl WorldSnapshot {
    pub fn capture<'a>(
        tick: u64,
        objects: impl IntoIterator<Item = &'a GameObject>,
        camera: &Camera2D,
        status: GameStatus,
    ) -> Self {
        let mut views: Vec<ViewObject> = objects
            .into_iter()
            .map(|object| ViewObject::from_object(object, camera))
            .collect();
        // Stable sort keeps insertion order within a layer.
        views.sort_by_key(|view| view.layer);
        Self {
            tick,
            objects: views,
            camera_center: camera.center,
            status,
        }
    }

    pub fn get(&self, id: ObjectId) -> Option<&ViewObject> {
        self.objects.iter().find(|view| view.id == id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
