//! Per-object animation playback state.
//!
//! Animations are queued by name and played back to back. Each frame of an
//! animation is shown for `frame_len` ticks; when the last frame finishes the
//! animation is popped and playback moves to the next queued one. With an empty
//! queue the sprite's base frame is shown.

use std::collections::VecDeque;

use crate::components::sprite::{FrameData, Sprite};

/// Playback state for one game object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimationState {
    queue: VecDeque<String>,
    frame_index: usize,
    frame_tick: u32,
}

impl AnimationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while at least one animation is queued.
    pub fn is_playing(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Name of the animation currently at the head of the queue.
    pub fn current(&self) -> Option<&str> {
        self.queue.front().map(String::as_str)
    }

    pub fn queued(&self) -> impl Iterator<Item = &str> {
        self.queue.iter().map(String::as_str)
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn frame_tick(&self) -> u32 {
        self.frame_tick
    }

    /// Drop every queued animation. The next frame is the base frame.
    pub fn go_to_base(&mut self) {
        self.queue.clear();
        self.reset_counters();
    }

    /// Queue an animation behind the ones already playing.
    pub fn add_animation(&mut self, name: impl Into<String>) {
        self.queue.push_back(name.into());
    }

    /// Replace the queue with a single animation, starting from its first frame.
    pub fn clear_and_play(&mut self, name: impl Into<String>) {
        self.queue.clear();
        self.queue.push_back(name.into());
        self.reset_counters();
    }

    /// Advance one tick and return the frame to draw.
    ///
    /// Queue entries naming an unknown animation, or an animation whose current
    /// frame does not resolve, are dropped. After `max_skips` drops in one call
    /// the base frame is returned and the rest of the queue is left for the next tick.
    pub fn next_frame(&mut self, sprite: &Sprite, max_skips: usize) -> FrameData {
        let mut skipped = 0;
        while let Some(name) = self.queue.front() {
            let resolved = sprite.animation(name).and_then(|animation| {
                let frame = animation
                    .frame_names
                    .get(self.frame_index)
                    .and_then(|frame_name| sprite.frame(frame_name))?;
                Some((frame.clone(), animation.frame_len.max(1), animation.frame_count()))
            });

            let Some((frame, frame_len, frame_count)) = resolved else {
                log::debug!("dropping unplayable animation '{name}'");
                self.queue.pop_front();
                self.reset_counters();
                skipped += 1;
                if skipped >= max_skips {
                    break;
                }
                continue;
            };

            self.frame_tick += 1;
            if self.frame_tick >= frame_len {
                self.frame_tick = 0;
                self.frame_index += 1;
                if self.frame_index >= frame_count {
                    self.queue.pop_front();
                    self.frame_index = 0;
                }
            }
            return frame;
        }
        sprite.base_frame().clone()
    }

    fn reset_counters(&mut self) {
        self.frame_index = 0;
        self.frame_tick = 0;
    }
}
