use std::collections::HashMap;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// A named rectangle on a sprite sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameData {
    pub name: String,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

impl FrameData {
    pub fn new(name: impl Into<String>, x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            width,
            height,
        }
    }
}

/// A named sequence of frames, each shown for `frame_len` ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationData {
    pub name: String,
    /// Ticks per frame.
    #[serde(default = "default_frame_len")]
    pub frame_len: u32,
    #[serde(rename = "frames")]
    pub frame_names: Vec<String>,
}

fn default_frame_len() -> u32 {
    1
}

impl AnimationData {
    pub fn new(name: impl Into<String>, frame_len: u32, frame_names: &[&str]) -> Self {
        Self {
            name: name.into(),
            frame_len,
            frame_names: frame_names.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frame_names.len()
    }
}

/// Sprite component: frames, animations and draw state of one object.
#[derive(Debug, Clone)]
pub struct Sprite {
    frames: HashMap<String, FrameData>,
    animations: HashMap<String, AnimationData>,
    base_frame: FrameData,
    current_frame: FrameData,
    /// Pixel offset of the image relative to the hitbox origin.
    pub offset: DVec2,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Mirror horizontally when drawn.
    pub flipped: bool,
}

impl Sprite {
    /// Build a sprite whose base (and initial current) frame is `base_frame`.
    pub fn new(
        frames: impl IntoIterator<Item = FrameData>,
        animations: impl IntoIterator<Item = AnimationData>,
        base_frame: &str,
    ) -> Result<Self> {
        let frames: HashMap<String, FrameData> =
            frames.into_iter().map(|f| (f.name.clone(), f)).collect();
        let animations = animations
            .into_iter()
            .map(|a| (a.name.clone(), a))
            .collect();
        let base = frames
            .get(base_frame)
            .cloned()
            .ok_or_else(|| EngineError::FrameNotFound(base_frame.to_string()))?;
        Ok(Self {
            frames,
            animations,
            current_frame: base.clone(),
            base_frame: base,
            offset: DVec2::ZERO,
            rotation: 0.0,
            flipped: false,
        })
    }

    /// Single-frame sprite, convenient for scenery and tests.
    pub fn single(frame: FrameData) -> Self {
        let name = frame.name.clone();
        let mut frames = HashMap::new();
        frames.insert(name, frame.clone());
        Self {
            frames,
            animations: HashMap::new(),
            current_frame: frame.clone(),
            base_frame: frame,
            offset: DVec2::ZERO,
            rotation: 0.0,
            flipped: false,
        }
    }

    pub fn with_offset(mut self, offset: DVec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn frame(&self, name: &str) -> Option<&FrameData> {
        self.frames.get(name)
    }

    pub fn animation(&self, name: &str) -> Option<&AnimationData> {
        self.animations.get(name)
    }

    pub fn base_frame(&self) -> &FrameData {
        &self.base_frame
    }

    pub fn current_frame(&self) -> &FrameData {
        &self.current_frame
    }

    pub fn set_current_frame(&mut self, frame: FrameData) {
        self.current_frame = frame;
    }

    /// Replace the base frame. Fails if the sprite has no frame by that name.
    pub fn set_base_frame(&mut self, name: &str) -> Result<()> {
        let frame = self
            .frames
            .get(name)
            .ok_or_else(|| EngineError::FrameNotFound(name.to_string()))?;
        self.base_frame = frame.clone();
        Ok(())
    }

    /// Check that every animation only names frames this sprite owns.
    pub fn validate_animations(&self) -> Result<()> {
        for animation in self.animations.values() {
            if let Some(missing) = animation
                .frame_names
                .iter()
                .find(|name| !self.frames.contains_key(name.as_str()))
            {
                return Err(EngineError::FrameNotFound(format!(
                    "{missing} (animation '{}')",
                    animation.name
                )));
            }
        }
        Ok(())
    }
}
