//! Animation system: owns per-object playback state and advances it each tick.

use std::collections::HashMap;

use crate::api::types::ObjectId;
use crate::components::animation::AnimationState;
use crate::components::object::GameObject;
use crate::components::sprite::FrameData;
use crate::error::Result;

/// Animation controls available to outcomes.
pub trait Animator {
    /// Advance the object's playback one tick and return the frame to draw.
    fn current_frame_in_animation(&mut self, object: &GameObject) -> FrameData;

    /// Stop all animations; the object shows its base frame.
    fn go_to_base_image(&mut self, object: &mut GameObject);

    /// Queue an animation after the ones already playing.
    fn add_to_animations(&mut self, object: &GameObject, animation: &str);

    /// Play only this animation, from its first frame.
    fn clear_and_add_to_animation_list(&mut self, object: &GameObject, animation: &str);

    /// Replace the base frame. Fails with `FrameNotFound` for an unknown frame.
    fn set_base_image(&mut self, object: &mut GameObject, frame: &str) -> Result<()>;
}

/// Side table of [`AnimationState`] keyed by object id.
///
/// Entries are created on first use and must be evicted when the object is destroyed.
#[derive(Debug)]
pub struct AnimationHandler {
    states: HashMap<ObjectId, AnimationState>,
    max_skips: usize,
}

impl AnimationHandler {
    pub fn new(max_skips: usize) -> Self {
        Self {
            states: HashMap::new(),
            max_skips: max_skips.max(1),
        }
    }

    pub fn state(&self, id: ObjectId) -> Option<&AnimationState> {
        self.states.get(&id)
    }

    /// Drop the state of a destroyed object.
    pub fn evict(&mut self, id: ObjectId) -> Option<AnimationState> {
        self.states.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }

    /// Advance every object one tick and store the resolved frame on its sprite.
    pub fn tick_animations<'a>(&mut self, objects: impl IntoIterator<Item = &'a mut GameObject>) {
        for object in objects {
            let frame = self.current_frame_in_animation(object);
            object.sprite.set_current_frame(frame);
        }
    }
}

impl Default for AnimationHandler {
    fn default() -> Self {
        Self::new(16)
    }
}

impl Animator for AnimationHandler {
    fn current_frame_in_animation(&mut self, object: &GameObject) -> FrameData {
        // Idle objects never get an entry.
        match self.states.get_mut(&object.id) {
            Some(state) => state.next_frame(&object.sprite, self.max_skips),
            None => object.sprite.base_frame().clone(),
        }
    }

    fn go_to_base_image(&mut self, object: &mut GameObject) {
        if let Some(state) = self.states.get_mut(&object.id) {
            state.go_to_base();
        }
        let base = object.sprite.base_frame().clone();
        object.sprite.set_current_frame(base);
    }

    fn add_to_animations(&mut self, object: &GameObject, animation: &str) {
        self.states.entry(object.id).or_default().add_animation(animation);
    }

    fn clear_and_add_to_animation_list(&mut self, object: &GameObject, animation: &str) {
        self.states.entry(object.id).or_default().clear_and_play(animation);
    }

    fn set_base_image(&mut self, object: &mut GameObject, frame: &str) -> Result<()> {
        object.sprite.set_base_frame(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::hitbox::HitBox;
    use crate::components::sprite::{AnimationData, Sprite};
    use crate::error::EngineError;

    fn object() -> GameObject {
        let sprite = Sprite::new(
            vec![
                FrameData::new("idle", 0, 0, 8, 8),
                FrameData::new("a1", 8, 0, 8, 8),
                FrameData::new("a2", 16, 0, 8, 8),
            ],
            vec![AnimationData::new("spin", 1, &["a1", "a2"])],
            "idle",
        )
        .unwrap();
        GameObject::new(ObjectId::new_v4(), "hero", HitBox::new(0.0, 0.0, 8.0, 8.0).unwrap(), sprite)
    }

    fn current(obj: &GameObject) -> &str {
        &obj.sprite().current_frame().name
    }

    #[test]
    fn tick_updates_sprite_frame() {
        let mut handler = AnimationHandler::default();
        let mut obj = object();
        handler.add_to_animations(&obj, "spin");

        handler.tick_animations([&mut obj]);
        assert_eq!(current(&obj), "a1");
        handler.tick_animations([&mut obj]);
        assert_eq!(current(&obj), "a2");
        handler.tick_animations([&mut obj]);
        assert_eq!(current(&obj), "idle");
    }

    #[test]
    fn idle_objects_have_no_state() {
        let mut handler = AnimationHandler::default();
        let mut obj = object();
        handler.tick_animations([&mut obj]);
        assert_eq!(current(&obj), "idle");
        assert!(handler.is_empty());
    }

    #[test]
    fn go_to_base_resets_immediately() {
        let mut handler = AnimationHandler::default();
        let mut obj = object();
        handler.clear_and_add_to_animation_list(&obj, "spin");
        handler.tick_animations([&mut obj]);
        assert_eq!(current(&obj), "a1");

        handler.go_to_base_image(&mut obj);
        assert_eq!(current(&obj), "idle");
        assert!(!handler.state(obj.id()).unwrap().is_playing());
    }

    #[test]
    fn set_base_image_validates_frame() {
        let mut handler = AnimationHandler::default();
        let mut obj = object();
        handler.set_base_image(&mut obj, "a2").unwrap();
        assert_eq!(handler.current_frame_in_animation(&obj).name, "a2");
        assert!(matches!(
            handler.set_base_image(&mut obj, "nope"),
            Err(EngineError::FrameNotFound(_))
        ));
    }

    #[test]
    fn evict_drops_state() {
        let mut handler = AnimationHandler::default();
        let obj = object();
        handler.add_to_animations(&obj, "spin");
        assert_eq!(handler.len(), 1);
        assert!(handler.evict(obj.id()).is_some());
        assert!(handler.is_empty());
    }
}
