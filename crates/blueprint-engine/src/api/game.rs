use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::api::types::ObjectId;
use crate::components::object::GameObject;
use crate::core::bounds::MapBounds;
use crate::error::Result;

/// Configuration for the engine, passed in explicitly by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f64,
    /// Ticks allowed to catch up in one frame (default: 10).
    pub max_steps_per_frame: u32,
    /// Seed for random outcomes such as random teleports.
    pub seed: u64,
    /// Unplayable animation entries dropped per object per tick before giving up.
    pub max_animation_skips: usize,
    /// Camera viewport in world units.
    pub view_width: f64,
    pub view_height: f64,
    /// Step used by movement outcomes that carry no `amount`.
    pub default_move_amount: f64,
    /// Per-tick vertical acceleration used by gravity outcomes that carry no `amount`.
    pub default_gravity: f64,
    /// Clamp integrated positions to the map and ground objects on the bottom edge.
    pub floor_snap: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_steps_per_frame: 10,
            seed: 42,
            max_animation_skips: 16,
            view_width: 800.0,
            view_height: 600.0,
            default_move_amount: 4.0,
            default_gravity: 5.0,
            floor_snap: true,
        }
    }
}

impl GameConfig {
    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A request to instantiate a blueprint at the end of the current tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    pub blueprint: u32,
    /// Top-left corner of the new object's hitbox.
    pub position: DVec2,
    /// Defaults to the blueprint placement layer (0) when absent.
    pub layer: Option<i32>,
    /// Reuse this id instead of minting a new one. The previous holder must be
    /// destroyed in the same tick.
    pub id: Option<ObjectId>,
}

/// Controller capabilities available to outcomes.
///
/// Structural changes requested here (destroy, spawn, level flow) are deferred
/// to the tick boundary; the object set seen by the rest of the tick is unchanged.
pub trait GameExecutor {
    /// Mark an object for removal at the end of the tick.
    fn destroy_game_object(&mut self, id: ObjectId);

    /// Queue a new object. The id is assigned now, the object appears at the end of the tick.
    fn add_game_object(&mut self, request: SpawnRequest) -> Result<ObjectId>;

    fn map_bounds(&self) -> MapBounds;

    /// Look up another live object. The object being updated is not reachable here.
    fn game_object(&self, id: ObjectId) -> Result<&GameObject>;

    /// Finish the session as a win or a loss.
    fn end_game(&mut self, won: bool);

    fn restart_level(&mut self);

    fn select_level(&mut self, level: &str);
}
